//! Instruction-throughput micro-benchmark.
//!
//! Runs a synthetic mix of loads, ALU ops, and a tight loop and reports
//! emulated T-states per wall-clock second.

use std::time::Instant;
use z80_core::memory::{IoInterface, MemoryInterface};
use z80_core::Z80;

#[derive(Debug)]
struct FlatMemory {
    data: Vec<u8>,
}

impl FlatMemory {
    fn new() -> Self {
        Self {
            data: vec![0; 0x10000],
        }
    }
}

impl MemoryInterface for FlatMemory {
    fn read_byte(&mut self, address: u16) -> u8 {
        self.data[address as usize]
    }
    fn write_byte(&mut self, address: u16, value: u8) {
        self.data[address as usize] = value;
    }
}

#[derive(Debug)]
struct NullIo;

impl IoInterface for NullIo {
    fn read_port(&mut self, _port: u16) -> u8 {
        0xFF
    }
    fn write_port(&mut self, _port: u16, _value: u8) {}
}

fn main() {
    let mut memory = FlatMemory::new();

    // LD B, 0xFF; loop: INC A; ADD A, B; LD (HL), A; DJNZ loop; JR start
    let program: &[u8] = &[
        0x06, 0xFF, // LD B, 0xFF
        0x3C, // INC A
        0x80, // ADD A, B
        0x77, // LD (HL), A
        0x10, 0xFB, // DJNZ -5
        0x18, 0xF9, // JR -7
    ];
    for (i, &b) in program.iter().enumerate() {
        memory.data[i] = b;
    }

    let mut cpu = Z80::new(memory, NullIo);
    cpu.set_hl(0x8000);

    const STEPS: u64 = 50_000_000;
    let start = Instant::now();
    for _ in 0..STEPS {
        cpu.step();
    }
    let elapsed = start.elapsed();

    let secs = elapsed.as_secs_f64();
    let mhz = cpu.cycles as f64 / secs / 1_000_000.0;
    println!("{STEPS} instructions in {elapsed:?}");
    println!(
        "{:.1} M instructions/s, {mhz:.1} emulated MHz (a real Z80 ran at ~3.5)",
        STEPS as f64 / secs / 1_000_000.0
    );
}
