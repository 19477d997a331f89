//! MEMPTR (WZ) latch contract.
//!
//! The only architectural window into MEMPTR is BIT n,(HL), whose X/Y flags
//! come from its high byte; these tests check both the latch values directly
//! and the flag leakage end to end.

use super::*;
use crate::z80::test_utils::create_z80;

#[test]
fn memptr_ld_a_nn() {
    let mut c = create_z80(&[0x3A, 0xFF, 0x59]); // LD A, (0x59FF)
    c.step();
    assert_eq!(c.memptr, 0x5A00);
}

#[test]
fn memptr_ld_nn_a() {
    let mut c = create_z80(&[0x32, 0x34, 0x12]); // LD (0x1234), A
    c.a = 0xAB;
    c.step();
    // High byte from A, low byte from nn+1
    assert_eq!(c.memptr, 0xAB35);
}

#[test]
fn memptr_ld_a_bc() {
    let mut c = create_z80(&[0x0A]);
    c.set_bc(0x1234);
    c.step();
    assert_eq!(c.memptr, 0x1235);
}

#[test]
fn memptr_ld_de_a() {
    let mut c = create_z80(&[0x12]);
    c.a = 0x80;
    c.set_de(0x20FF);
    c.step();
    assert_eq!(c.memptr, 0x8000);
}

#[test]
fn memptr_ld_nn_hl() {
    let mut c = create_z80(&[0x22, 0x00, 0x40]);
    c.step();
    assert_eq!(c.memptr, 0x4001);
}

#[test]
fn memptr_ed_ld_nn_sp() {
    let mut c = create_z80(&[0xED, 0x73, 0x00, 0x40]);
    c.step();
    assert_eq!(c.memptr, 0x4001);
}

#[test]
fn memptr_jp_taken_and_not_taken() {
    let mut c = create_z80(&[0xC2, 0x00, 0x80]); // JP NZ, 0x8000
    c.set_flag(flags::ZERO, true);
    c.step();
    // Target is latched even when the jump is not taken
    assert_eq!(c.memptr, 0x8000);
    assert_eq!(c.pc, 3);
}

#[test]
fn memptr_jr_taken_only() {
    let mut c = create_z80(&[0x28, 0x10]); // JR Z, +0x10
    c.memptr = 0xAAAA;
    c.f = 0;
    c.step();
    assert_eq!(c.memptr, 0xAAAA); // not taken: untouched
    let mut c = create_z80(&[0x28, 0x10]);
    c.set_flag(flags::ZERO, true);
    c.step();
    assert_eq!(c.memptr, 0x0012);
}

#[test]
fn memptr_call_ret_rst() {
    let mut c = create_z80(&[0xCD, 0x00, 0x80]);
    c.sp = 0x9000;
    c.step();
    assert_eq!(c.memptr, 0x8000);
    c.memory.data[0x8000] = 0xC9; // RET
    c.step();
    assert_eq!(c.memptr, 0x0003);
    c.memory.data[0x0003] = 0xEF; // RST 28H
    c.step();
    assert_eq!(c.memptr, 0x0028);
}

#[test]
fn memptr_ex_sp_hl() {
    let mut c = create_z80(&[0xE3]);
    c.sp = 0xFFFE;
    c.set_hl(0x1234);
    c.memory.data[0xFFFE] = 0x78;
    c.memory.data[0xFFFF] = 0x56;
    c.step();
    assert_eq!(c.hl(), 0x5678);
    assert_eq!(c.memptr, 0x5678);
}

#[test]
fn memptr_add_hl() {
    let mut c = create_z80(&[0x09]); // ADD HL, BC
    c.set_hl(0x1000);
    c.set_bc(0x0234);
    c.step();
    assert_eq!(c.memptr, 0x1001);
}

#[test]
fn memptr_add_ix() {
    let mut c = create_z80(&[0xDD, 0x19]); // ADD IX, DE
    c.ix = 0x4000;
    c.set_de(0x0001);
    c.step();
    assert_eq!(c.memptr, 0x4001);
}

#[test]
fn memptr_adc_hl() {
    let mut c = create_z80(&[0xED, 0x4A]);
    c.set_hl(0x2000);
    c.set_bc(0x0001);
    c.step();
    assert_eq!(c.memptr, 0x2001);
}

#[test]
fn memptr_out_n_a() {
    let mut c = create_z80(&[0xD3, 0xFF]); // OUT (0xFF), A
    c.a = 0x12;
    c.step();
    assert_eq!(c.memptr, 0x1200);
}

#[test]
fn memptr_in_r_c() {
    let mut c = create_z80(&[0xED, 0x40]); // IN B, (C)
    c.set_bc(0x1234);
    c.step();
    assert_eq!(c.memptr, 0x1235);
}

#[test]
fn memptr_indexed_access() {
    let mut c = create_z80(&[0xDD, 0x7E, 0x05]); // LD A, (IX+5)
    c.ix = 0x2A00;
    c.step();
    assert_eq!(c.memptr, 0x2A05);
}

#[test]
fn memptr_rld() {
    let mut c = create_z80(&[0xED, 0x6F]);
    c.set_hl(0x3000);
    c.step();
    assert_eq!(c.memptr, 0x3001);
}

#[test]
fn memptr_cpi_increments_cpd_decrements() {
    let mut c = create_z80(&[0xED, 0xA1]);
    c.set_hl(0x1000);
    c.set_bc(2);
    c.memptr = 0x5000;
    c.step();
    assert_eq!(c.memptr, 0x5001);
    let mut c = create_z80(&[0xED, 0xA9]);
    c.set_hl(0x1000);
    c.set_bc(2);
    c.memptr = 0x5000;
    c.step();
    assert_eq!(c.memptr, 0x4FFF);
}

#[test]
fn memptr_ldir_while_repeating() {
    let mut c = create_z80(&[0xED, 0xB0]);
    c.set_hl(0x1000);
    c.set_de(0x2000);
    c.set_bc(2);
    c.step();
    // PC rewound to 0; MEMPTR = PC + 1
    assert_eq!(c.memptr, 0x0001);
}

// ============ The observable window: BIT n,(HL) ============

#[test]
fn bit_hl_xy_leak_memptr_high_byte() {
    // LD A,(0x59FF) latches MEMPTR = 0x5A00; 0x5A has bit 3 set, bit 5 clear
    let mut c = create_z80(&[0x3A, 0xFF, 0x59, 0xCB, 0x7E]); // then BIT 7,(HL)
    c.set_hl(0x8000);
    c.memory.data[0x8000] = 0x80;
    c.step();
    assert_eq!(c.memptr, 0x5A00);
    c.step();
    assert!(c.get_flag(flags::X_FLAG));
    assert!(!c.get_flag(flags::Y_FLAG));
    assert!(c.get_flag(flags::SIGN));
    assert!(!c.get_flag(flags::ZERO));
    assert!(c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::ADD_SUB));
    assert!(!c.get_flag(flags::PARITY));
}

#[test]
fn bit_hl_xy_after_ld_a_bc() {
    // LD A,(BC) with BC = 0x2A27 latches MEMPTR = 0x2A28; 0x2A has both
    // bits 3 and 5 set
    let mut c = create_z80(&[0x0A, 0xCB, 0x46]);
    c.set_bc(0x2A27);
    c.set_hl(0x8000);
    c.memory.data[0x8000] = 0x01;
    c.step();
    c.step();
    assert!(c.get_flag(flags::X_FLAG));
    assert!(c.get_flag(flags::Y_FLAG));
}
