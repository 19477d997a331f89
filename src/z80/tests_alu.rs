//! ALU flag behavior: 8-bit arithmetic, logic, INC/DEC, and the 16-bit adds.

use super::*;
use crate::z80::test_utils::create_z80;

// ============ ADD / ADC ============

#[test]
fn add_a_b_basic() {
    let mut c = create_z80(&[0x80]);
    c.a = 0x12;
    c.b = 0x34;
    c.step();
    assert_eq!(c.a, 0x46);
    assert!(!c.get_flag(flags::CARRY));
    assert!(!c.get_flag(flags::ADD_SUB));
}

#[test]
fn add_carry_out() {
    let mut c = create_z80(&[0x80]);
    c.a = 0xFF;
    c.b = 0x02;
    c.step();
    assert_eq!(c.a, 0x01);
    assert!(c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::HALF_CARRY));
}

#[test]
fn add_half_carry() {
    let mut c = create_z80(&[0x80]);
    c.a = 0x0F;
    c.b = 0x01;
    c.step();
    assert_eq!(c.a, 0x10);
    assert!(c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::CARRY));
}

#[test]
fn add_signed_overflow() {
    // 0x7F + 1 overflows into the sign bit
    let mut c = create_z80(&[0x80]);
    c.a = 0x7F;
    c.b = 0x01;
    c.step();
    assert_eq!(c.a, 0x80);
    assert!(c.get_flag(flags::PARITY));
    assert!(c.get_flag(flags::SIGN));
}

#[test]
fn add_no_overflow_on_mixed_signs() {
    let mut c = create_z80(&[0x80]);
    c.a = 0x80;
    c.b = 0x7F;
    c.step();
    assert_eq!(c.a, 0xFF);
    assert!(!c.get_flag(flags::PARITY));
}

#[test]
fn add_xy_follow_result() {
    let mut c = create_z80(&[0x80]);
    c.a = 0x28; // bits 3 and 5
    c.b = 0x00;
    c.step();
    assert!(c.get_flag(flags::X_FLAG));
    assert!(c.get_flag(flags::Y_FLAG));
}

#[test]
fn adc_uses_carry_in() {
    let mut c = create_z80(&[0x88]);
    c.a = 0x10;
    c.b = 0x20;
    c.set_flag(flags::CARRY, true);
    c.step();
    assert_eq!(c.a, 0x31);
}

#[test]
fn adc_overflow_with_carry_variant() {
    // 0x7F + 0x00 + carry = 0x80: overflow must include the carry term
    let mut c = create_z80(&[0x88]);
    c.a = 0x7F;
    c.b = 0x00;
    c.set_flag(flags::CARRY, true);
    c.step();
    assert_eq!(c.a, 0x80);
    assert!(c.get_flag(flags::PARITY));
}

// ============ SUB / SBC / CP ============

#[test]
fn sub_basic() {
    let mut c = create_z80(&[0x90]);
    c.a = 0x34;
    c.b = 0x12;
    c.step();
    assert_eq!(c.a, 0x22);
    assert!(c.get_flag(flags::ADD_SUB));
    assert!(!c.get_flag(flags::CARRY));
}

#[test]
fn sub_borrow_sets_carry() {
    let mut c = create_z80(&[0x90]);
    c.a = 0x10;
    c.b = 0x20;
    c.step();
    assert_eq!(c.a, 0xF0);
    assert!(c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::SIGN));
}

#[test]
fn sub_half_borrow() {
    let mut c = create_z80(&[0x90]);
    c.a = 0x10;
    c.b = 0x01;
    c.step();
    assert_eq!(c.a, 0x0F);
    assert!(c.get_flag(flags::HALF_CARRY));
}

#[test]
fn sub_signed_overflow() {
    let mut c = create_z80(&[0x90]);
    c.a = 0x80;
    c.b = 0x01;
    c.step();
    assert_eq!(c.a, 0x7F);
    assert!(c.get_flag(flags::PARITY));
}

#[test]
fn sbc_with_borrow_in() {
    let mut c = create_z80(&[0x98]);
    c.a = 0x10;
    c.b = 0x05;
    c.set_flag(flags::CARRY, true);
    c.step();
    assert_eq!(c.a, 0x0A);
}

#[test]
fn sbc_a_a_with_carry_gives_ff() {
    let mut c = create_z80(&[0x9F]);
    c.a = 0x42;
    c.set_flag(flags::CARRY, true);
    c.step();
    assert_eq!(c.a, 0xFF);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn cp_leaves_a_unchanged() {
    let mut c = create_z80(&[0xB8]);
    c.a = 0x42;
    c.b = 0x42;
    c.step();
    assert_eq!(c.a, 0x42);
    assert!(c.get_flag(flags::ZERO));
    assert!(c.get_flag(flags::ADD_SUB));
}

#[test]
fn cp_xy_come_from_operand() {
    // Operand has bits 3 and 5 set; the difference does not
    let mut c = create_z80(&[0xB8]);
    c.a = 0x40;
    c.b = 0x28;
    c.step();
    assert!(c.get_flag(flags::X_FLAG));
    assert!(c.get_flag(flags::Y_FLAG));
}

#[test]
fn cp_carry_on_smaller_a() {
    let mut c = create_z80(&[0xFE, 0x50]); // CP 0x50
    c.a = 0x40;
    c.step();
    assert!(c.get_flag(flags::CARRY));
    assert_eq!(c.a, 0x40);
}

// ============ AND / OR / XOR ============

#[test]
fn and_sets_h_clears_c() {
    let mut c = create_z80(&[0xA0]);
    c.a = 0xF0;
    c.b = 0x0F;
    c.set_flag(flags::CARRY, true);
    c.step();
    assert_eq!(c.a, 0x00);
    assert!(c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::ZERO));
    // Even parity of 0x00
    assert!(c.get_flag(flags::PARITY));
}

#[test]
fn or_clears_h_and_c() {
    let mut c = create_z80(&[0xB0]);
    c.a = 0x11;
    c.b = 0x22;
    c.set_flag(flags::CARRY, true);
    c.set_flag(flags::HALF_CARRY, true);
    c.step();
    assert_eq!(c.a, 0x33);
    assert!(!c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::CARRY));
}

#[test]
fn xor_parity() {
    let mut c = create_z80(&[0xA8]);
    c.a = 0xFF;
    c.b = 0xFE;
    c.step();
    assert_eq!(c.a, 0x01);
    // 0x01 has odd parity
    assert!(!c.get_flag(flags::PARITY));
}

#[test]
fn xor_a_clears_a() {
    let mut c = create_z80(&[0xAF]);
    c.a = 0x5A;
    c.step();
    assert_eq!(c.a, 0);
    assert!(c.get_flag(flags::ZERO));
    assert!(c.get_flag(flags::PARITY));
}

// ============ INC / DEC ============

#[test]
fn inc_preserves_carry() {
    let mut c = create_z80(&[0x3C]);
    c.a = 0x00;
    c.set_flag(flags::CARRY, true);
    c.step();
    assert_eq!(c.a, 0x01);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn inc_overflow_at_7f() {
    let mut c = create_z80(&[0x3C]);
    c.a = 0x7F;
    c.step();
    assert_eq!(c.a, 0x80);
    assert!(c.get_flag(flags::PARITY));
    assert!(c.get_flag(flags::HALF_CARRY));
}

#[test]
fn dec_overflow_at_80() {
    let mut c = create_z80(&[0x3D]);
    c.a = 0x80;
    c.step();
    assert_eq!(c.a, 0x7F);
    assert!(c.get_flag(flags::PARITY));
    assert!(c.get_flag(flags::ADD_SUB));
}

#[test]
fn dec_half_borrow_at_nibble() {
    let mut c = create_z80(&[0x3D]);
    c.a = 0x10;
    c.step();
    assert_eq!(c.a, 0x0F);
    assert!(c.get_flag(flags::HALF_CARRY));
}

#[test]
fn inc_then_dec_restores_value_and_carry() {
    let mut c = create_z80(&[0x04, 0x05]);
    c.b = 0x3A;
    c.set_flag(flags::CARRY, true);
    c.step();
    c.step();
    assert_eq!(c.b, 0x3A);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn inc_hl_indirect() {
    let mut c = create_z80(&[0x34]);
    c.set_hl(0x5000);
    c.memory.data[0x5000] = 0xFF;
    c.step();
    assert_eq!(c.memory.data[0x5000], 0x00);
    assert!(c.get_flag(flags::ZERO));
    assert!(c.get_flag(flags::HALF_CARRY));
}

// ============ 16-bit arithmetic ============

#[test]
fn add_hl_hl_carries_out() {
    let mut c = create_z80(&[0x29]);
    c.set_hl(0x8000);
    c.f = 0;
    c.step();
    assert_eq!(c.hl(), 0x0000);
    assert!(c.get_flag(flags::CARRY));
    assert!(!c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::ADD_SUB));
    // X/Y come from the high byte of the result (0x00)
    assert!(!c.get_flag(flags::X_FLAG));
    assert!(!c.get_flag(flags::Y_FLAG));
    // S, Z, P/V untouched
    assert!(!c.get_flag(flags::SIGN));
    assert!(!c.get_flag(flags::ZERO));
    assert!(!c.get_flag(flags::PARITY));
}

#[test]
fn add_hl_bc_half_carry_from_bit_11() {
    let mut c = create_z80(&[0x09]);
    c.set_hl(0x0FFF);
    c.set_bc(0x0001);
    c.step();
    assert_eq!(c.hl(), 0x1000);
    assert!(c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::CARRY));
}

#[test]
fn add_hl_preserves_s_z_pv() {
    let mut c = create_z80(&[0x09]);
    c.set_hl(0x1000);
    c.set_bc(0x0234);
    c.f = flags::SIGN | flags::ZERO | flags::PARITY;
    c.step();
    assert!(c.get_flag(flags::SIGN));
    assert!(c.get_flag(flags::ZERO));
    assert!(c.get_flag(flags::PARITY));
}

#[test]
fn adc_hl_zero_flag_is_16_bit() {
    let mut c = create_z80(&[0xED, 0x4A]); // ADC HL, BC
    c.set_hl(0xFFFF);
    c.set_bc(0x0000);
    c.set_flag(flags::CARRY, true);
    c.step();
    assert_eq!(c.hl(), 0x0000);
    assert!(c.get_flag(flags::ZERO));
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn sbc_hl_borrow_and_sign() {
    let mut c = create_z80(&[0xED, 0x42]); // SBC HL, BC
    c.set_hl(0x0000);
    c.set_bc(0x0001);
    c.step();
    assert_eq!(c.hl(), 0xFFFF);
    assert!(c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::SIGN));
    assert!(c.get_flag(flags::ADD_SUB));
}

#[test]
fn sbc_hl_overflow() {
    let mut c = create_z80(&[0xED, 0x42]);
    c.set_hl(0x8000);
    c.set_bc(0x0001);
    c.step();
    assert_eq!(c.hl(), 0x7FFF);
    assert!(c.get_flag(flags::PARITY));
}

// ============ NEG ============

#[test]
fn neg_negates_a() {
    let mut c = create_z80(&[0xED, 0x44]);
    c.a = 0x01;
    c.step();
    assert_eq!(c.a, 0xFF);
    assert!(c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::ADD_SUB));
}

#[test]
fn neg_of_zero() {
    let mut c = create_z80(&[0xED, 0x44]);
    c.a = 0x00;
    c.step();
    assert_eq!(c.a, 0x00);
    assert!(!c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::ZERO));
}

#[test]
fn neg_of_80_overflows() {
    let mut c = create_z80(&[0xED, 0x44]);
    c.a = 0x80;
    c.step();
    assert_eq!(c.a, 0x80);
    assert!(c.get_flag(flags::PARITY));
}

// ============ CPL / SCF / CCF ============

#[test]
fn cpl_complements_and_sets_h_n() {
    let mut c = create_z80(&[0x2F]);
    c.a = 0x55;
    c.step();
    assert_eq!(c.a, 0xAA);
    assert!(c.get_flag(flags::HALF_CARRY));
    assert!(c.get_flag(flags::ADD_SUB));
}

#[test]
fn scf_sets_carry_clears_h_n() {
    let mut c = create_z80(&[0x37]);
    c.f = flags::HALF_CARRY | flags::ADD_SUB;
    c.step();
    assert!(c.get_flag(flags::CARRY));
    assert!(!c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::ADD_SUB));
}

#[test]
fn scf_xy_both_set_when_a_has_both() {
    let mut c = create_z80(&[0x37]);
    c.a = 0x28;
    c.f = 0;
    c.step();
    assert!(c.get_flag(flags::X_FLAG));
    assert!(c.get_flag(flags::Y_FLAG));
}

#[test]
fn ccf_moves_carry_to_h() {
    let mut c = create_z80(&[0x3F]);
    c.set_flag(flags::CARRY, true);
    c.step();
    assert!(!c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::HALF_CARRY));
    assert!(!c.get_flag(flags::ADD_SUB));
}

#[test]
fn ccf_toggles_clear_carry() {
    let mut c = create_z80(&[0x3F]);
    c.f = 0;
    c.step();
    assert!(c.get_flag(flags::CARRY));
    assert!(!c.get_flag(flags::HALF_CARRY));
}
