use crate::memory::{IoInterface, Memory};
use crate::z80::Z80;
use std::collections::HashMap;

/// Scriptable I/O collaborator: reads come from a port map (0xFF when
/// unset), writes are recorded, and the interrupt line is a plain flag the
/// test flips.
#[derive(Debug, Default)]
pub struct TestIo {
    pub ports: HashMap<u16, u8>,
    pub interrupt_pending: bool,
}

impl IoInterface for TestIo {
    fn read_port(&mut self, port: u16) -> u8 {
        *self.ports.get(&port).unwrap_or(&0xFF)
    }

    fn write_port(&mut self, port: u16, value: u8) {
        self.ports.insert(port, value);
    }

    fn check_interrupt(&mut self) -> bool {
        self.interrupt_pending
    }
}

/// CPU over 64 KiB of RAM with the program loaded at address 0.
pub fn create_z80(program: &[u8]) -> Z80<Memory, TestIo> {
    let mut m = Memory::new(0x10000);
    for (i, &b) in program.iter().enumerate() {
        m.data[i] = b;
    }
    Z80::new(m, TestIo::default())
}
