//! CB prefix: rotates, shifts, and bit operations on registers and (HL).

use super::*;
use crate::z80::test_utils::create_z80;

#[test]
fn rlc_b() {
    let mut c = create_z80(&[0xCB, 0x00]);
    c.b = 0x80;
    c.step();
    assert_eq!(c.b, 0x01);
    assert!(c.get_flag(flags::CARRY));
    assert!(!c.get_flag(flags::ZERO));
}

#[test]
fn rlc_sets_parity_of_result() {
    let mut c = create_z80(&[0xCB, 0x00]);
    c.b = 0xC0;
    c.step();
    assert_eq!(c.b, 0x81);
    assert!(c.get_flag(flags::PARITY));
    assert!(c.get_flag(flags::SIGN));
}

#[test]
fn rrc_a() {
    let mut c = create_z80(&[0xCB, 0x0F]);
    c.a = 0x01;
    c.step();
    assert_eq!(c.a, 0x80);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn rl_through_carry() {
    let mut c = create_z80(&[0xCB, 0x10]);
    c.b = 0x80;
    c.set_flag(flags::CARRY, true);
    c.step();
    assert_eq!(c.b, 0x01);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn rr_through_carry() {
    let mut c = create_z80(&[0xCB, 0x18]);
    c.b = 0x01;
    c.set_flag(flags::CARRY, false);
    c.step();
    assert_eq!(c.b, 0x00);
    assert!(c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::ZERO));
}

#[test]
fn sla_shifts_zero_into_lsb() {
    let mut c = create_z80(&[0xCB, 0x20]);
    c.b = 0x81;
    c.step();
    assert_eq!(c.b, 0x02);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn sra_keeps_sign() {
    let mut c = create_z80(&[0xCB, 0x28]);
    c.b = 0x81;
    c.step();
    assert_eq!(c.b, 0xC0);
    assert!(c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::SIGN));
}

#[test]
fn srl_clears_sign() {
    let mut c = create_z80(&[0xCB, 0x38]);
    c.b = 0x81;
    c.step();
    assert_eq!(c.b, 0x40);
    assert!(c.get_flag(flags::CARRY));
    assert!(!c.get_flag(flags::SIGN));
}

#[test]
fn rotate_hl_indirect_writes_back() {
    let mut c = create_z80(&[0xCB, 0x06]); // RLC (HL)
    c.set_hl(0x4000);
    c.memory.data[0x4000] = 0x55;
    c.step();
    assert_eq!(c.memory.data[0x4000], 0xAA);
}

// ============ BIT ============

#[test]
fn bit_0_set() {
    let mut c = create_z80(&[0xCB, 0x40]); // BIT 0, B
    c.b = 0x01;
    c.step();
    assert!(!c.get_flag(flags::ZERO));
    assert!(!c.get_flag(flags::PARITY));
    assert!(c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::ADD_SUB));
}

#[test]
fn bit_0_clear_mirrors_z_into_pv() {
    let mut c = create_z80(&[0xCB, 0x40]);
    c.b = 0xFE;
    c.step();
    assert!(c.get_flag(flags::ZERO));
    assert!(c.get_flag(flags::PARITY));
}

#[test]
fn bit_7_sets_sign_when_set() {
    let mut c = create_z80(&[0xCB, 0x78]); // BIT 7, B
    c.b = 0x80;
    c.step();
    assert!(c.get_flag(flags::SIGN));
    assert!(!c.get_flag(flags::ZERO));
}

#[test]
fn bit_6_never_sets_sign() {
    let mut c = create_z80(&[0xCB, 0x70]); // BIT 6, B
    c.b = 0x40;
    c.step();
    assert!(!c.get_flag(flags::SIGN));
    assert!(!c.get_flag(flags::ZERO));
}

#[test]
fn bit_register_xy_from_value() {
    let mut c = create_z80(&[0xCB, 0x40]);
    c.b = 0x29; // bits 0, 3, 5
    c.step();
    assert!(c.get_flag(flags::X_FLAG));
    assert!(c.get_flag(flags::Y_FLAG));
}

#[test]
fn bit_does_not_modify_operand() {
    let mut c = create_z80(&[0xCB, 0x46]); // BIT 0, (HL)
    c.set_hl(0x4000);
    c.memory.data[0x4000] = 0xFF;
    c.step();
    assert_eq!(c.memory.data[0x4000], 0xFF);
}

#[test]
fn bit_preserves_carry() {
    let mut c = create_z80(&[0xCB, 0x40]);
    c.b = 0x01;
    c.set_flag(flags::CARRY, true);
    c.step();
    assert!(c.get_flag(flags::CARRY));
}

// ============ RES / SET ============

#[test]
fn res_clears_bit() {
    let mut c = create_z80(&[0xCB, 0xB8]); // RES 7, B
    c.b = 0xFF;
    c.step();
    assert_eq!(c.b, 0x7F);
}

#[test]
fn set_sets_bit() {
    let mut c = create_z80(&[0xCB, 0xC7]); // SET 0, A
    c.a = 0x00;
    c.step();
    assert_eq!(c.a, 0x01);
}

#[test]
fn res_set_touch_no_flags() {
    let mut c = create_z80(&[0xCB, 0x80, 0xCB, 0xC0]); // RES 0,B; SET 0,B
    c.b = 0xFF;
    c.f = 0xFF;
    c.step();
    c.step();
    assert_eq!(c.f, 0xFF);
    assert_eq!(c.b, 0xFF);
}

#[test]
fn set_hl_indirect() {
    let mut c = create_z80(&[0xCB, 0xFE]); // SET 7, (HL)
    c.set_hl(0x4000);
    c.memory.data[0x4000] = 0x00;
    c.step();
    assert_eq!(c.memory.data[0x4000], 0x80);
}

// ============ RRD / RLD ============

#[test]
fn rrd_rotates_nibbles_right() {
    let mut c = create_z80(&[0xED, 0x67]);
    c.a = 0x84;
    c.set_hl(0x4000);
    c.memory.data[0x4000] = 0x20;
    c.step();
    assert_eq!(c.a, 0x80);
    assert_eq!(c.memory.data[0x4000], 0x42);
}

#[test]
fn rld_rotates_nibbles_left() {
    let mut c = create_z80(&[0xED, 0x6F]);
    c.a = 0x7A;
    c.set_hl(0x4000);
    c.memory.data[0x4000] = 0x31;
    c.step();
    assert_eq!(c.a, 0x73);
    assert_eq!(c.memory.data[0x4000], 0x1A);
}

#[test]
fn rld_flags_follow_a() {
    let mut c = create_z80(&[0xED, 0x6F]);
    c.a = 0x00;
    c.set_hl(0x4000);
    c.memory.data[0x4000] = 0x0F;
    c.step();
    assert_eq!(c.a, 0x00);
    assert!(c.get_flag(flags::ZERO));
    assert!(c.get_flag(flags::PARITY));
    assert!(!c.get_flag(flags::ADD_SUB));
}
