//! DAA: decimal adjust after addition and subtraction.

use super::*;
use crate::z80::test_utils::create_z80;

fn daa_with(a: u8, f: u8) -> Z80<crate::memory::Memory, crate::z80::test_utils::TestIo> {
    let mut c = create_z80(&[0x27]);
    c.a = a;
    c.f = f;
    c.step();
    c
}

// ============ After ADD (N=0) ============

#[test]
fn daa_leaves_valid_bcd_alone() {
    let c = daa_with(0x09, 0);
    assert_eq!(c.a, 0x09);
    assert!(!c.get_flag(flags::CARRY));
}

#[test]
fn daa_adjusts_low_nibble() {
    let c = daa_with(0x0A, 0);
    assert_eq!(c.a, 0x10);
}

#[test]
fn daa_adjusts_both_nibbles() {
    let c = daa_with(0x9A, 0);
    assert_eq!(c.a, 0x00);
    assert!(c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::ZERO));
}

#[test]
fn daa_adjusts_high_nibble() {
    let c = daa_with(0xA0, 0);
    assert_eq!(c.a, 0x00);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn daa_ff_becomes_65_with_carry() {
    let c = daa_with(0xFF, 0);
    assert_eq!(c.a, 0x65);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn daa_with_half_carry_in() {
    let c = daa_with(0x03, flags::HALF_CARRY);
    assert_eq!(c.a, 0x09);
}

#[test]
fn daa_with_carry_in() {
    let c = daa_with(0x09, flags::CARRY);
    assert_eq!(c.a, 0x69);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn daa_with_both_carries_in() {
    let c = daa_with(0x00, flags::CARRY | flags::HALF_CARRY);
    assert_eq!(c.a, 0x66);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn daa_after_add_sequence() {
    // LD A, 0x15; ADD A, 0x27; DAA => BCD 15 + 27 = 42
    let mut c = create_z80(&[0x3E, 0x15, 0xC6, 0x27, 0x27]);
    c.step();
    c.step();
    assert_eq!(c.a, 0x3C);
    c.step();
    assert_eq!(c.a, 0x42);
    assert!(!c.get_flag(flags::CARRY));
    assert!(!c.get_flag(flags::ADD_SUB));
    // 0x42 has even parity
    assert!(c.get_flag(flags::PARITY));
    // 0xC + 0x6 half-carries during the correction
    assert!(c.get_flag(flags::HALF_CARRY));
}

// ============ After SUB (N=1) ============

#[test]
fn daa_after_sub_identity() {
    let c = daa_with(0x42, flags::ADD_SUB);
    assert_eq!(c.a, 0x42);
}

#[test]
fn daa_after_sub_with_half_borrow() {
    let c = daa_with(0x0F, flags::ADD_SUB | flags::HALF_CARRY);
    assert_eq!(c.a, 0x09);
}

#[test]
fn daa_after_sub_with_borrow() {
    let c = daa_with(0x70, flags::ADD_SUB | flags::CARRY);
    assert_eq!(c.a, 0x10);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn daa_after_sub_sequence() {
    // LD A, 0x42; SUB 0x15; DAA => BCD 42 - 15 = 27
    let mut c = create_z80(&[0x3E, 0x42, 0xD6, 0x15, 0x27]);
    c.step();
    c.step();
    assert_eq!(c.a, 0x2D);
    c.step();
    assert_eq!(c.a, 0x27);
    assert!(!c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::ADD_SUB));
}

// ============ Flag details ============

#[test]
fn daa_sign_and_xy_from_result() {
    let c = daa_with(0x88, flags::CARRY | flags::HALF_CARRY);
    // 0x88 + 0x66 correction = 0xEE
    assert_eq!(c.a, 0xEE);
    assert!(c.get_flag(flags::SIGN));
    assert!(c.get_flag(flags::X_FLAG));
    assert!(c.get_flag(flags::Y_FLAG));
}

#[test]
fn daa_carry_is_sticky() {
    // Once carry is in, DAA keeps it
    let c = daa_with(0x05, flags::CARRY);
    assert!(c.get_flag(flags::CARRY));
}
