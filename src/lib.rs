//! z80-core - A cycle-accounted Z80 CPU core
//!
//! This library emulates the Zilog Z80 at instruction granularity: `step()`
//! executes one instruction (or accepts one interrupt) and returns the number
//! of T-states consumed. All documented and undocumented opcodes are
//! implemented, including the X/Y flag leakage through the internal MEMPTR
//! register that conformance suites (FUSE, ZEXALL) depend on.
//!
//! Memory and port I/O are supplied by the caller through the
//! [`memory::MemoryInterface`] and [`memory::IoInterface`] traits; the core
//! owns no storage beyond its register file.

pub mod memory;
pub mod z80;

pub use memory::Memory;
pub use z80::Z80;
