#![no_main]

//! Random-program fuzzer: fill memory from the fuzz input and run a few
//! thousand steps. Every byte sequence is a valid Z80 program, so nothing
//! may panic and the cycle counter must keep advancing.

use libfuzzer_sys::fuzz_target;
use z80_core::memory::{IoInterface, Memory};
use z80_core::Z80;

#[derive(Debug)]
struct EchoIo {
    last: u8,
}

impl IoInterface for EchoIo {
    fn read_port(&mut self, _port: u16) -> u8 {
        self.last
    }
    fn write_port(&mut self, _port: u16, value: u8) {
        self.last = value;
    }
    fn check_interrupt(&mut self) -> bool {
        self.last & 0x80 != 0
    }
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let mut memory = Memory::new(0x10000);
    for chunk in memory.data.chunks_mut(data.len()) {
        chunk.copy_from_slice(&data[..chunk.len()]);
    }

    let mut cpu = Z80::new(memory, EchoIo { last: 0 });

    let mut total: u64 = 0;
    for _ in 0..4096 {
        let before = cpu.cycles;
        let t = cpu.step();
        assert!(t >= 4, "zero-length step");
        assert_eq!(cpu.cycles - before, u64::from(t));
        total += u64::from(t);
    }
    assert!(total >= 4 * 4096);
});
