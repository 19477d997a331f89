//! Block transfer, search, and I/O instructions.
//!
//! Repeat forms execute one iteration per step with PC rewound by two, so the
//! tests drive them the way a machine would: step until PC moves past the
//! instruction.

use super::*;
use crate::memory::Memory;
use crate::z80::test_utils::{create_z80, TestIo};

fn run_block(c: &mut Z80<Memory, TestIo>, limit: u32) {
    for _ in 0..limit {
        c.step();
        if c.pc >= 2 {
            break;
        }
    }
}

// ============ LDI / LDD ============

#[test]
fn ldi_moves_one_byte() {
    let mut c = create_z80(&[0xED, 0xA0]);
    c.set_hl(0x1000);
    c.set_de(0x2000);
    c.set_bc(0x0002);
    c.memory.data[0x1000] = 0x5A;
    assert_eq!(c.step(), 16);
    assert_eq!(c.memory.data[0x2000], 0x5A);
    assert_eq!(c.hl(), 0x1001);
    assert_eq!(c.de(), 0x2001);
    assert_eq!(c.bc(), 0x0001);
    assert!(c.get_flag(flags::PARITY));
    assert!(!c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::ADD_SUB));
}

#[test]
fn ldi_pv_clears_when_bc_hits_zero() {
    let mut c = create_z80(&[0xED, 0xA0]);
    c.set_hl(0x1000);
    c.set_de(0x2000);
    c.set_bc(0x0001);
    c.step();
    assert!(!c.get_flag(flags::PARITY));
}

#[test]
fn ldd_moves_backwards() {
    let mut c = create_z80(&[0xED, 0xA8]);
    c.set_hl(0x1000);
    c.set_de(0x2000);
    c.set_bc(0x0002);
    c.memory.data[0x1000] = 0x77;
    c.step();
    assert_eq!(c.memory.data[0x2000], 0x77);
    assert_eq!(c.hl(), 0x0FFF);
    assert_eq!(c.de(), 0x1FFF);
}

#[test]
fn ldi_xy_from_value_plus_a() {
    let mut c = create_z80(&[0xED, 0xA0]);
    c.set_hl(0x1000);
    c.set_de(0x2000);
    c.set_bc(0x0002);
    c.a = 0x02;
    c.memory.data[0x1000] = 0x08;
    c.step();
    // n = 0x0A: bit 3 set, bit 1 set
    assert!(c.get_flag(flags::X_FLAG));
    assert!(c.get_flag(flags::Y_FLAG));
}

// ============ LDIR / LDDR ============

#[test]
fn ldir_copies_a_block() {
    let mut c = create_z80(&[0xED, 0xB0]);
    c.set_hl(0x1000);
    c.set_de(0x2000);
    c.set_bc(0x0010);
    for i in 0..16 {
        c.memory.data[0x1000 + i] = i as u8;
    }
    run_block(&mut c, 64);
    for i in 0..16 {
        assert_eq!(c.memory.data[0x2000 + i], i as u8);
    }
    assert_eq!(c.bc(), 0x0000);
    assert_eq!(c.hl(), 0x1010);
    assert_eq!(c.de(), 0x2010);
    assert_eq!(c.pc, 2);
}

#[test]
fn ldir_timing_21_while_repeating_16_at_end() {
    let mut c = create_z80(&[0xED, 0xB0]);
    c.set_hl(0x1000);
    c.set_de(0x2000);
    c.set_bc(0x0003);
    assert_eq!(c.step(), 21);
    assert_eq!(c.pc, 0);
    assert_eq!(c.step(), 21);
    assert_eq!(c.step(), 16);
    assert_eq!(c.pc, 2);
}

#[test]
fn ldir_is_interruptible_between_iterations() {
    let mut c = create_z80(&[0xED, 0xB0]);
    c.set_hl(0x1000);
    c.set_de(0x2000);
    c.set_bc(0x0004);
    c.iff1 = true;
    c.im = 1;
    c.sp = 0x9000;
    c.step();
    assert_eq!(c.bc(), 3);
    c.io.interrupt_pending = true;
    c.step();
    // The interrupt was taken with PC still on the instruction, so the
    // handler returns into the remaining iterations
    assert_eq!(c.pc, 0x0038);
    assert_eq!(c.memory.data[0x8FFE], 0x00);
    assert_eq!(c.bc(), 3);
}

#[test]
fn lddr_copies_descending() {
    let mut c = create_z80(&[0xED, 0xB8]);
    c.set_hl(0x100F);
    c.set_de(0x200F);
    c.set_bc(0x0010);
    for i in 0..16 {
        c.memory.data[0x1000 + i] = i as u8;
    }
    run_block(&mut c, 64);
    for i in 0..16 {
        assert_eq!(c.memory.data[0x2000 + i], i as u8);
    }
    assert_eq!(c.hl(), 0x0FFF);
    assert_eq!(c.de(), 0x1FFF);
}

// ============ CPI / CPD / CPIR ============

#[test]
fn cpi_compares_without_storing() {
    let mut c = create_z80(&[0xED, 0xA1]);
    c.set_hl(0x1000);
    c.set_bc(0x0005);
    c.a = 0x42;
    c.memory.data[0x1000] = 0x42;
    c.step();
    assert!(c.get_flag(flags::ZERO));
    assert!(c.get_flag(flags::ADD_SUB));
    assert_eq!(c.a, 0x42);
    assert_eq!(c.hl(), 0x1001);
    assert_eq!(c.bc(), 0x0004);
    assert!(c.get_flag(flags::PARITY));
}

#[test]
fn cpd_walks_backwards() {
    let mut c = create_z80(&[0xED, 0xA9]);
    c.set_hl(0x1000);
    c.set_bc(0x0002);
    c.a = 0x00;
    c.memory.data[0x1000] = 0x01;
    c.step();
    assert_eq!(c.hl(), 0x0FFF);
    assert!(!c.get_flag(flags::ZERO));
    // CPI/CPD leave C alone
    assert!(!c.get_flag(flags::CARRY));
}

#[test]
fn cpi_preserves_carry() {
    let mut c = create_z80(&[0xED, 0xA1]);
    c.set_hl(0x1000);
    c.set_bc(0x0001);
    c.set_flag(flags::CARRY, true);
    c.step();
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn cpir_stops_on_match() {
    let mut c = create_z80(&[0xED, 0xB1]);
    c.set_hl(0x1000);
    c.set_bc(0x0010);
    c.a = 0x33;
    c.memory.data[0x1003] = 0x33;
    run_block(&mut c, 64);
    assert!(c.get_flag(flags::ZERO));
    assert_eq!(c.hl(), 0x1004);
    assert_eq!(c.bc(), 0x000C);
    assert_eq!(c.pc, 2);
}

#[test]
fn cpir_stops_when_bc_exhausted() {
    let mut c = create_z80(&[0xED, 0xB1]);
    c.set_hl(0x1000);
    c.set_bc(0x0004);
    c.a = 0xEE; // never found
    run_block(&mut c, 64);
    assert!(!c.get_flag(flags::ZERO));
    assert!(!c.get_flag(flags::PARITY));
    assert_eq!(c.bc(), 0x0000);
}

// ============ INI / IND / OUTI / OUTD ============

#[test]
fn ini_reads_port_into_memory() {
    let mut c = create_z80(&[0xED, 0xA2]);
    c.set_bc(0x0234);
    c.set_hl(0x4000);
    c.io.ports.insert(0x0234, 0x99);
    assert_eq!(c.step(), 16);
    assert_eq!(c.memory.data[0x4000], 0x99);
    assert_eq!(c.b, 0x01);
    assert_eq!(c.hl(), 0x4001);
}

#[test]
fn ini_zero_flag_tracks_b() {
    let mut c = create_z80(&[0xED, 0xA2]);
    c.set_bc(0x0134);
    c.set_hl(0x4000);
    c.step();
    assert_eq!(c.b, 0x00);
    assert!(c.get_flag(flags::ZERO));
}

#[test]
fn ind_decrements_hl() {
    let mut c = create_z80(&[0xED, 0xAA]);
    c.set_bc(0x0234);
    c.set_hl(0x4000);
    c.step();
    assert_eq!(c.hl(), 0x3FFF);
}

#[test]
fn outi_writes_memory_to_port_with_decremented_b() {
    let mut c = create_z80(&[0xED, 0xA3]);
    c.set_bc(0x0210);
    c.set_hl(0x4000);
    c.memory.data[0x4000] = 0x77;
    c.step();
    // B decrements before the write, so the port sees B=0x01
    assert_eq!(c.io.ports[&0x0110], 0x77);
    assert_eq!(c.b, 0x01);
    assert_eq!(c.hl(), 0x4001);
}

#[test]
fn otir_repeats_until_b_zero() {
    let mut c = create_z80(&[0xED, 0xB3]);
    c.set_bc(0x0310);
    c.set_hl(0x4000);
    c.memory.data[0x4000] = 0x11;
    c.memory.data[0x4001] = 0x22;
    c.memory.data[0x4002] = 0x33;
    assert_eq!(c.step(), 21);
    assert_eq!(c.step(), 21);
    assert_eq!(c.step(), 16);
    assert_eq!(c.b, 0);
    assert!(c.get_flag(flags::ZERO));
    assert_eq!(c.pc, 2);
}

#[test]
fn inir_fills_memory() {
    let mut c = create_z80(&[0xED, 0xB2]);
    c.set_bc(0x0320);
    c.set_hl(0x4000);
    c.io.ports.insert(0x0320, 0xAA);
    c.io.ports.insert(0x0220, 0xBB);
    c.io.ports.insert(0x0120, 0xCC);
    run_block(&mut c, 16);
    assert_eq!(c.memory.data[0x4000], 0xAA);
    assert_eq!(c.memory.data[0x4001], 0xBB);
    assert_eq!(c.memory.data[0x4002], 0xCC);
    assert_eq!(c.b, 0);
}

#[test]
fn ini_n_flag_from_data_bit_7() {
    let mut c = create_z80(&[0xED, 0xA2]);
    c.set_bc(0x0234);
    c.set_hl(0x4000);
    c.io.ports.insert(0x0234, 0x80);
    c.step();
    assert!(c.get_flag(flags::ADD_SUB));
}
