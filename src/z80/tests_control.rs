//! Control flow: jumps, relative jumps, calls, returns, restarts, DJNZ.

use super::*;
use crate::z80::test_utils::create_z80;

// ============ JP ============

#[test]
fn jp_nn() {
    let mut c = create_z80(&[0xC3, 0x00, 0x80]);
    c.step();
    assert_eq!(c.pc, 0x8000);
}

#[test]
fn jp_nz_taken() {
    let mut c = create_z80(&[0xC2, 0x00, 0x80]);
    c.f = 0;
    c.step();
    assert_eq!(c.pc, 0x8000);
}

#[test]
fn jp_nz_not_taken_falls_through() {
    let mut c = create_z80(&[0xC2, 0x00, 0x80]);
    c.set_flag(flags::ZERO, true);
    c.step();
    assert_eq!(c.pc, 3);
}

#[test]
fn jp_c_uses_carry() {
    let mut c = create_z80(&[0xDA, 0x34, 0x12]);
    c.set_flag(flags::CARRY, true);
    c.step();
    assert_eq!(c.pc, 0x1234);
}

#[test]
fn jp_pe_uses_parity() {
    let mut c = create_z80(&[0xEA, 0x34, 0x12]);
    c.set_flag(flags::PARITY, true);
    c.step();
    assert_eq!(c.pc, 0x1234);
}

#[test]
fn jp_m_uses_sign() {
    let mut c = create_z80(&[0xFA, 0x34, 0x12]);
    c.set_flag(flags::SIGN, true);
    c.step();
    assert_eq!(c.pc, 0x1234);
}

// ============ JR ============

#[test]
fn jr_forward() {
    let mut c = create_z80(&[0x18, 0x05]);
    c.step();
    assert_eq!(c.pc, 0x0007);
}

#[test]
fn jr_backward() {
    let mut c = create_z80(&[0x00, 0x00, 0x18, 0xFC]); // JR -4 at 0x0002
    c.step();
    c.step();
    c.step();
    assert_eq!(c.pc, 0x0000);
}

#[test]
fn jr_z_not_taken_skips_offset() {
    let mut c = create_z80(&[0x28, 0x10, 0x00]);
    c.f = 0;
    c.step();
    assert_eq!(c.pc, 2);
}

#[test]
fn jr_nc_taken() {
    let mut c = create_z80(&[0x30, 0x02]);
    c.f = 0;
    c.step();
    assert_eq!(c.pc, 4);
}

// ============ DJNZ ============

#[test]
fn djnz_loops_until_b_zero() {
    let mut c = create_z80(&[0x10, 0xFE]); // DJNZ -2 (tight loop)
    c.b = 3;
    c.step();
    assert_eq!(c.pc, 0);
    assert_eq!(c.b, 2);
    c.step();
    assert_eq!(c.b, 1);
    c.step();
    assert_eq!(c.b, 0);
    assert_eq!(c.pc, 2);
}

#[test]
fn djnz_touches_no_flags() {
    let mut c = create_z80(&[0x10, 0x00]);
    c.b = 1;
    c.f = 0xFF;
    c.step();
    assert_eq!(c.f, 0xFF);
}

// ============ CALL / RET ============

#[test]
fn call_pushes_return_address() {
    let mut c = create_z80(&[0xCD, 0x00, 0x80]);
    c.sp = 0xFFFE;
    c.step();
    assert_eq!(c.pc, 0x8000);
    assert_eq!(c.sp, 0xFFFC);
    assert_eq!(c.memory.data[0xFFFC], 0x03);
    assert_eq!(c.memory.data[0xFFFD], 0x00);
}

#[test]
fn call_then_ret_round_trip() {
    let mut c = create_z80(&[0xCD, 0x00, 0x80]);
    c.sp = 0xFFFE;
    c.memory.data[0x8000] = 0xC9; // RET
    c.step();
    c.step();
    assert_eq!(c.pc, 0x0003);
    assert_eq!(c.sp, 0xFFFE);
}

#[test]
fn call_nz_not_taken_does_not_push() {
    let mut c = create_z80(&[0xC4, 0x00, 0x80]);
    c.sp = 0xFFFE;
    c.set_flag(flags::ZERO, true);
    c.step();
    assert_eq!(c.pc, 3);
    assert_eq!(c.sp, 0xFFFE);
}

#[test]
fn ret_z_taken() {
    let mut c = create_z80(&[0xC8]);
    c.sp = 0x8000;
    c.memory.data[0x8000] = 0x34;
    c.memory.data[0x8001] = 0x12;
    c.set_flag(flags::ZERO, true);
    c.step();
    assert_eq!(c.pc, 0x1234);
    assert_eq!(c.sp, 0x8002);
}

#[test]
fn ret_z_not_taken() {
    let mut c = create_z80(&[0xC8]);
    c.sp = 0x8000;
    c.f = 0;
    c.step();
    assert_eq!(c.pc, 1);
    assert_eq!(c.sp, 0x8000);
}

// ============ RST ============

#[test]
fn rst_38_vectors_and_pushes() {
    let mut c = create_z80(&[0xFF]);
    c.sp = 0x9000;
    c.step();
    assert_eq!(c.pc, 0x0038);
    assert_eq!(c.sp, 0x8FFE);
    assert_eq!(c.memory.data[0x8FFE], 0x01);
}

#[test]
fn rst_targets_scale_with_y() {
    let mut c = create_z80(&[0xD7]); // RST 10H
    c.sp = 0x9000;
    c.step();
    assert_eq!(c.pc, 0x0010);
}

// ============ RETN / RETI ============

#[test]
fn retn_restores_iff1_from_iff2() {
    let mut c = create_z80(&[0xED, 0x45]);
    c.sp = 0x8000;
    c.memory.data[0x8000] = 0x00;
    c.memory.data[0x8001] = 0x10;
    c.iff1 = false;
    c.iff2 = true;
    c.step();
    assert_eq!(c.pc, 0x1000);
    assert!(c.iff1);
}

#[test]
fn reti_pops_without_touching_iff1() {
    let mut c = create_z80(&[0xED, 0x4D]);
    c.sp = 0x8000;
    c.memory.data[0x8001] = 0x20;
    c.iff1 = false;
    c.iff2 = true;
    c.step();
    assert_eq!(c.pc, 0x2000);
    assert!(!c.iff1);
}
