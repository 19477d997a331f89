//! Undocumented instruction coverage: SLL, the index register halves, ED
//! mirrors, and prefix fall-through.

use super::*;
use crate::z80::test_utils::create_z80;

// ============ SLL (CB 30-37) ============

#[test]
fn sll_shifts_one_into_bit_0() {
    let mut c = create_z80(&[0xCB, 0x30]);
    c.b = 0x00;
    c.step();
    assert_eq!(c.b, 0x01);
    assert!(!c.get_flag(flags::CARRY));
}

#[test]
fn sll_carry_from_bit_7() {
    let mut c = create_z80(&[0xCB, 0x37]); // SLL A
    c.a = 0x80;
    c.step();
    assert_eq!(c.a, 0x01);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn sll_ff_stays_ff() {
    let mut c = create_z80(&[0xCB, 0x30]);
    c.b = 0xFF;
    c.step();
    assert_eq!(c.b, 0xFF);
    assert!(c.get_flag(flags::CARRY));
}

// ============ IXH/IXL/IYH/IYL ============

#[test]
fn ld_a_ixh() {
    let mut c = create_z80(&[0xDD, 0x7C]);
    c.ix = 0x1234;
    c.step();
    assert_eq!(c.a, 0x12);
}

#[test]
fn ld_ixl_b() {
    let mut c = create_z80(&[0xDD, 0x68]);
    c.ix = 0x1234;
    c.b = 0xAB;
    c.step();
    assert_eq!(c.ix, 0x12AB);
}

#[test]
fn ld_iyh_iyl() {
    let mut c = create_z80(&[0xFD, 0x65]); // LD IYH, IYL
    c.iy = 0x12AB;
    c.step();
    assert_eq!(c.iy, 0xABAB);
}

#[test]
fn inc_ixh_flags() {
    let mut c = create_z80(&[0xDD, 0x24]);
    c.ix = 0x7F00;
    c.step();
    assert_eq!(c.ix, 0x8000);
    assert!(c.get_flag(flags::PARITY));
    assert!(c.get_flag(flags::SIGN));
}

#[test]
fn dec_iyl() {
    let mut c = create_z80(&[0xFD, 0x2D]);
    c.iy = 0x1201;
    c.step();
    assert_eq!(c.iy, 0x1200);
    assert!(c.get_flag(flags::ZERO));
}

#[test]
fn ld_ixh_n() {
    let mut c = create_z80(&[0xDD, 0x26, 0x99]);
    c.ix = 0x0055;
    c.step();
    assert_eq!(c.ix, 0x9955);
}

#[test]
fn add_a_ixl() {
    let mut c = create_z80(&[0xDD, 0x85]);
    c.ix = 0x0034;
    c.a = 0x10;
    c.step();
    assert_eq!(c.a, 0x44);
}

#[test]
fn cp_iyh() {
    let mut c = create_z80(&[0xFD, 0xBC]);
    c.iy = 0x4200;
    c.a = 0x42;
    c.step();
    assert!(c.get_flag(flags::ZERO));
}

#[test]
fn index_halves_recoverable_through_16_bit_view() {
    let mut c = create_z80(&[0xDD, 0x26, 0xAB, 0xDD, 0x2E, 0xCD]);
    c.step();
    c.step();
    assert_eq!(c.ix, 0xABCD);
    assert_eq!(c.ixh(), 0xAB);
    assert_eq!(c.ixl(), 0xCD);
}

// ============ ED mirrors ============

#[test]
fn neg_mirrors_behave_like_neg() {
    for opcode in [0x4C, 0x54, 0x5C, 0x64, 0x6C, 0x74, 0x7C] {
        let mut c = create_z80(&[0xED, opcode]);
        c.a = 0x01;
        assert_eq!(c.step(), 8);
        assert_eq!(c.a, 0xFF, "ED {opcode:02X} should negate");
    }
}

#[test]
fn retn_mirrors_restore_iff1() {
    for opcode in [0x55, 0x5D, 0x65, 0x6D, 0x75, 0x7D] {
        let mut c = create_z80(&[0xED, opcode]);
        c.sp = 0x8000;
        c.iff2 = true;
        c.step();
        assert!(c.iff1, "ED {opcode:02X} should behave as RETN");
    }
}

#[test]
fn im_mirrors() {
    let mut c = create_z80(&[0xED, 0x4E]); // IM 0 mirror
    c.im = 2;
    c.step();
    assert_eq!(c.im, 0);
    let mut c = create_z80(&[0xED, 0x76]); // IM 1 mirror
    c.step();
    assert_eq!(c.im, 1);
    let mut c = create_z80(&[0xED, 0x7E]); // IM 2 mirror
    c.step();
    assert_eq!(c.im, 2);
}

#[test]
fn in_c_flags_only() {
    let mut c = create_z80(&[0xED, 0x70]);
    c.set_bc(0x0180);
    c.io.ports.insert(0x0180, 0x80);
    let before = (c.a, c.b, c.c, c.d, c.e, c.h, c.l);
    c.step();
    assert_eq!(before, (c.a, c.b, c.c, c.d, c.e, c.h, c.l));
    assert!(c.get_flag(flags::SIGN));
}

#[test]
fn out_c_zero() {
    let mut c = create_z80(&[0xED, 0x71]);
    c.set_bc(0x0180);
    c.step();
    assert_eq!(c.io.ports[&0x0180], 0x00);
}

#[test]
fn ld_r_a_stores_all_eight_bits() {
    let mut c = create_z80(&[0xED, 0x4F]);
    c.a = 0xFF;
    c.step();
    assert_eq!(c.r, 0xFF);
}

// ============ Prefix fall-through and chains ============

#[test]
fn dd_fallthrough_executes_unprefixed_opcode() {
    let mut c = create_z80(&[0xDD, 0x3C]); // DD + INC A
    c.a = 0x41;
    c.step();
    assert_eq!(c.a, 0x42);
    assert_eq!(c.pc, 2);
}

#[test]
fn fd_fallthrough_jp() {
    let mut c = create_z80(&[0xFD, 0xC3, 0x00, 0x80]); // FD + JP nn
    c.step();
    assert_eq!(c.pc, 0x8000);
}

#[test]
fn dd_fallthrough_bumps_r_twice() {
    let mut c = create_z80(&[0xDD, 0x00]);
    c.step();
    assert_eq!(c.r, 2);
}

#[test]
fn chained_dd_dd_is_prefix_nop() {
    let mut c = create_z80(&[0xDD, 0xDD, 0x23]); // second step sees DD 23
    assert_eq!(c.step(), 8);
    assert_eq!(c.pc, 2);
    c.step();
    assert_eq!(c.ix, 1);
}

#[test]
fn dd_halt_halts() {
    let mut c = create_z80(&[0xDD, 0x76]);
    assert_eq!(c.step(), 8);
    assert!(c.halted);
    // PC re-fetches the halt byte itself
    assert_eq!(c.pc, 1);
}
