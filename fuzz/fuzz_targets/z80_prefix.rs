#![no_main]

//! Prefix decode fuzzer: every CB/ED/DD/FD (and DD CB / FD CB) combination
//! must decode without panicking and report a plausible T-state count.

use libfuzzer_sys::fuzz_target;
use z80_core::memory::{IoInterface, Memory};
use z80_core::Z80;

#[derive(Debug)]
struct NullIo;
impl IoInterface for NullIo {
    fn read_port(&mut self, _port: u16) -> u8 {
        0xFF
    }
    fn write_port(&mut self, _port: u16, _value: u8) {}
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }

    let prefix = [0xCB, 0xED, 0xDD, 0xFD][data[0] as usize % 4];
    let mut memory = Memory::new(0x10000);
    memory.data[0] = prefix;
    memory.data[1] = data[1];
    memory.data[2] = data[2];
    memory.data[3] = data[3];

    let mut cpu = Z80::new(memory, NullIo);
    cpu.sp = 0x8000;
    let t = cpu.step();

    // No instruction is shorter than 4 or longer than 23 T-states
    assert!((4..=23).contains(&t), "bad T-state count {t} after {prefix:02X} {:02X}", data[1]);

    // R must have advanced by exactly two fetches, bit 7 untouched
    assert!(cpu.r & 0x7F <= 4, "runaway R increment");
});
