//! Property-based tests over the register file and ALU laws.

use super::*;
use crate::z80::test_utils::create_z80;
use proptest::prelude::*;

proptest! {
    // ==================== Register pair invariants ====================

    #[test]
    fn prop_bc_roundtrip(val in 0u16..=0xFFFF) {
        let mut c = create_z80(&[]);
        c.set_bc(val);
        prop_assert_eq!(c.bc(), val);
        prop_assert_eq!(c.b, (val >> 8) as u8);
        prop_assert_eq!(c.c, val as u8);
    }

    #[test]
    fn prop_af_roundtrip(val in 0u16..=0xFFFF) {
        let mut c = create_z80(&[]);
        c.set_af(val);
        prop_assert_eq!(c.af(), val);
    }

    #[test]
    fn prop_index_halves_consistent(val in 0u16..=0xFFFF) {
        let mut c = create_z80(&[]);
        c.ix = val;
        prop_assert_eq!((c.ixh() as u16) << 8 | c.ixl() as u16, val);
        c.set_ixh(0x12);
        c.set_ixl(0x34);
        prop_assert_eq!(c.ix, 0x1234);
    }

    // ==================== Immediate loads ====================

    #[test]
    fn prop_ld_rp_nn_little_endian(low in 0u8..=255, high in 0u8..=255) {
        let mut c = create_z80(&[0x21, low, high]); // LD HL, nn
        c.step();
        prop_assert_eq!(c.hl(), (high as u16) << 8 | low as u16);
        prop_assert_eq!(c.pc, 3);
    }

    // ==================== 16-bit INC/DEC ====================

    #[test]
    fn prop_inc_dec_rp_inverse(val in 0u16..=0xFFFF) {
        let mut c = create_z80(&[0x03, 0x0B]); // INC BC; DEC BC
        c.set_bc(val);
        c.step();
        prop_assert_eq!(c.bc(), val.wrapping_add(1));
        c.step();
        prop_assert_eq!(c.bc(), val);
    }

    // ==================== ALU laws ====================

    #[test]
    fn prop_add_wraps_and_sets_carry(a in 0u8..=255, b in 0u8..=255) {
        let mut c = create_z80(&[0x80]);
        c.a = a;
        c.b = b;
        c.step();
        prop_assert_eq!(c.a, a.wrapping_add(b));
        prop_assert_eq!(c.get_flag(flags::CARRY), (a as u16 + b as u16) > 0xFF);
        prop_assert_eq!(c.get_flag(flags::ZERO), a.wrapping_add(b) == 0);
        prop_assert!(!c.get_flag(flags::ADD_SUB));
    }

    #[test]
    fn prop_sub_wraps_and_sets_n(a in 0u8..=255, b in 0u8..=255) {
        let mut c = create_z80(&[0x90]);
        c.a = a;
        c.b = b;
        c.step();
        prop_assert_eq!(c.a, a.wrapping_sub(b));
        prop_assert_eq!(c.get_flag(flags::CARRY), a < b);
        prop_assert!(c.get_flag(flags::ADD_SUB));
    }

    #[test]
    fn prop_and_clears_c_sets_parity(a in 0u8..=255, b in 0u8..=255) {
        let mut c = create_z80(&[0xA0]);
        c.a = a;
        c.b = b;
        c.step();
        prop_assert_eq!(c.a, a & b);
        prop_assert!(!c.get_flag(flags::CARRY));
        prop_assert!(c.get_flag(flags::HALF_CARRY));
        prop_assert_eq!(c.get_flag(flags::PARITY), (a & b).count_ones() % 2 == 0);
    }

    #[test]
    fn prop_or_xor_clear_c_and_h(a in 0u8..=255, b in 0u8..=255) {
        let mut c = create_z80(&[0xB0]);
        c.a = a;
        c.b = b;
        c.step();
        prop_assert_eq!(c.a, a | b);
        prop_assert!(!c.get_flag(flags::CARRY));
        prop_assert!(!c.get_flag(flags::HALF_CARRY));
        prop_assert_eq!(c.get_flag(flags::PARITY), (a | b).count_ones() % 2 == 0);

        let mut c = create_z80(&[0xA8]);
        c.a = a;
        c.b = b;
        c.step();
        prop_assert_eq!(c.a, a ^ b);
        prop_assert!(!c.get_flag(flags::CARRY));
        prop_assert_eq!(c.get_flag(flags::PARITY), (a ^ b).count_ones() % 2 == 0);
    }

    #[test]
    fn prop_cp_preserves_a_and_z_means_equal(a in 0u8..=255, b in 0u8..=255) {
        let mut c = create_z80(&[0xB8]);
        c.a = a;
        c.b = b;
        let de = c.de();
        c.step();
        prop_assert_eq!(c.a, a);
        prop_assert_eq!(c.b, b);
        prop_assert_eq!(c.de(), de);
        prop_assert_eq!(c.get_flag(flags::ZERO), a == b);
    }

    #[test]
    fn prop_inc_then_dec_restores_value_and_carry(val in 0u8..=255, carry in any::<bool>()) {
        let mut c = create_z80(&[0x04, 0x05]);
        c.b = val;
        c.set_flag(flags::CARRY, carry);
        c.step();
        c.step();
        prop_assert_eq!(c.b, val);
        prop_assert_eq!(c.get_flag(flags::CARRY), carry);
    }

    // ==================== Rotates ====================

    #[test]
    fn prop_rlca_carry_is_old_bit_7(val in 0u8..=255) {
        let mut c = create_z80(&[0x07]);
        c.a = val;
        c.step();
        prop_assert_eq!(c.a, val.rotate_left(1));
        prop_assert_eq!(c.get_flag(flags::CARRY), (val & 0x80) != 0);
    }

    #[test]
    fn prop_rlca_rrca_inverse(val in 0u8..=255) {
        let mut c = create_z80(&[0x07, 0x0F]);
        c.a = val;
        c.step();
        c.step();
        prop_assert_eq!(c.a, val);
    }

    // ==================== Stack ====================

    #[test]
    fn prop_push_pop_roundtrip(val in 0u16..=0xFFFF) {
        let mut c = create_z80(&[0xC5, 0xC1]); // PUSH BC; POP BC
        c.sp = 0x8000;
        c.set_bc(val);
        c.step();
        c.set_bc(0);
        c.step();
        prop_assert_eq!(c.bc(), val);
        prop_assert_eq!(c.sp, 0x8000);
    }

    // ==================== CB bit operations ====================

    #[test]
    fn prop_cb_set_then_res(bit in 0u8..8, val in 0u8..=255) {
        let set_op = 0xC7 | (bit << 3); // SET bit, A
        let res_op = 0x87 | (bit << 3); // RES bit, A
        let mut c = create_z80(&[0xCB, set_op, 0xCB, res_op]);
        c.a = val;
        c.step();
        prop_assert_eq!(c.a, val | (1 << bit));
        c.step();
        prop_assert_eq!(c.a, val & !(1 << bit));
    }

    #[test]
    fn prop_cb_bit_z_flag(bit in 0u8..8, val in 0u8..=255) {
        let opcode = 0x47 | (bit << 3); // BIT bit, A
        let mut c = create_z80(&[0xCB, opcode]);
        c.a = val;
        c.step();
        prop_assert_eq!(c.get_flag(flags::ZERO), (val >> bit) & 1 == 0);
        prop_assert_eq!(c.get_flag(flags::PARITY), c.get_flag(flags::ZERO));
    }

    // ==================== Exchanges ====================

    #[test]
    fn prop_exx_involutive(bc in 0u16..=0xFFFF, de in 0u16..=0xFFFF, hl in 0u16..=0xFFFF) {
        let mut c = create_z80(&[0xD9, 0xD9]);
        c.set_bc(bc);
        c.set_de(de);
        c.set_hl(hl);
        c.step();
        c.step();
        prop_assert_eq!(c.bc(), bc);
        prop_assert_eq!(c.de(), de);
        prop_assert_eq!(c.hl(), hl);
    }

    // ==================== R register ====================

    #[test]
    fn prop_r_bit7_sticky(r in 0u8..=255) {
        let mut c = create_z80(&[0x00]);
        c.r = r;
        c.step();
        prop_assert_eq!(c.r & 0x80, r & 0x80);
        prop_assert_eq!(c.r & 0x7F, r.wrapping_add(1) & 0x7F);
    }
}
