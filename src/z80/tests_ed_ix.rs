//! ED miscellany and the DD/FD indexed instruction set.

use super::*;
use crate::z80::test_utils::create_z80;

// ============ ED: interrupt registers ============

#[test]
fn ld_i_a() {
    let mut c = create_z80(&[0xED, 0x47]);
    c.a = 0x55;
    c.step();
    assert_eq!(c.i, 0x55);
}

#[test]
fn ld_a_i_reflects_iff2_in_pv() {
    let mut c = create_z80(&[0xED, 0x57]);
    c.i = 0x80;
    c.iff2 = true;
    c.step();
    assert_eq!(c.a, 0x80);
    assert!(c.get_flag(flags::PARITY));
    assert!(c.get_flag(flags::SIGN));
    assert!(!c.get_flag(flags::ADD_SUB));
}

#[test]
fn ld_a_i_pv_clear_when_interrupts_disabled() {
    let mut c = create_z80(&[0xED, 0x57]);
    c.i = 0x01;
    c.iff2 = false;
    c.step();
    assert!(!c.get_flag(flags::PARITY));
}

#[test]
fn ld_a_r_reads_post_fetch_value() {
    let mut c = create_z80(&[0xED, 0x5F]);
    c.r = 0x00;
    c.step();
    // Two opcode fetches happened before R was read
    assert_eq!(c.a, 0x02);
}

#[test]
fn im_selection() {
    let mut c = create_z80(&[0xED, 0x46, 0xED, 0x56, 0xED, 0x5E]);
    c.step();
    assert_eq!(c.im, 0);
    c.step();
    assert_eq!(c.im, 1);
    c.step();
    assert_eq!(c.im, 2);
}

// ============ ED: port I/O through BC ============

#[test]
fn in_r_c_reads_port_and_sets_flags() {
    let mut c = create_z80(&[0xED, 0x50]); // IN D, (C)
    c.set_bc(0x10FE);
    c.io.ports.insert(0x10FE, 0x80);
    c.step();
    assert_eq!(c.d, 0x80);
    assert!(c.get_flag(flags::SIGN));
    assert!(!c.get_flag(flags::ADD_SUB));
    assert!(!c.get_flag(flags::HALF_CARRY));
}

#[test]
fn in_r_c_preserves_carry() {
    let mut c = create_z80(&[0xED, 0x40]);
    c.set_bc(0x0001);
    c.io.ports.insert(0x0001, 0x00);
    c.set_flag(flags::CARRY, true);
    c.step();
    assert!(c.get_flag(flags::CARRY));
    assert!(c.get_flag(flags::ZERO));
}

#[test]
fn out_c_r_writes_full_bc_port() {
    let mut c = create_z80(&[0xED, 0x79]); // OUT (C), A
    c.set_bc(0x1234);
    c.a = 0x9A;
    c.step();
    assert_eq!(c.io.ports[&0x1234], 0x9A);
}

#[test]
fn out_n_a_uses_a_as_port_high_byte() {
    let mut c = create_z80(&[0xD3, 0x55]); // OUT (0x55), A
    c.a = 0x12;
    c.step();
    assert_eq!(c.io.ports[&0x1255], 0x12);
}

#[test]
fn in_a_n_reads_port() {
    let mut c = create_z80(&[0xDB, 0x55]); // IN A, (0x55)
    c.a = 0x12;
    c.io.ports.insert(0x1255, 0x7F);
    c.step();
    assert_eq!(c.a, 0x7F);
}

// ============ DD/FD: 16-bit operations ============

#[test]
fn ld_ix_nn() {
    let mut c = create_z80(&[0xDD, 0x21, 0x34, 0x12]);
    c.step();
    assert_eq!(c.ix, 0x1234);
}

#[test]
fn ld_iy_nn() {
    let mut c = create_z80(&[0xFD, 0x21, 0x78, 0x56]);
    c.step();
    assert_eq!(c.iy, 0x5678);
}

#[test]
fn add_ix_bc() {
    let mut c = create_z80(&[0xDD, 0x09]);
    c.ix = 0x1000;
    c.set_bc(0x0234);
    c.step();
    assert_eq!(c.ix, 0x1234);
    assert!(!c.get_flag(flags::CARRY));
}

#[test]
fn add_ix_ix_doubles() {
    let mut c = create_z80(&[0xDD, 0x29]);
    c.ix = 0x8000;
    c.step();
    assert_eq!(c.ix, 0x0000);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn inc_dec_ix() {
    let mut c = create_z80(&[0xDD, 0x23, 0xDD, 0x2B]);
    c.ix = 0xFFFF;
    c.step();
    assert_eq!(c.ix, 0x0000);
    c.step();
    assert_eq!(c.ix, 0xFFFF);
}

#[test]
fn ld_nn_indirect_iy() {
    let mut c = create_z80(&[0xFD, 0x22, 0x00, 0x60]);
    c.iy = 0xBEEF;
    c.step();
    assert_eq!(c.memory.data[0x6000], 0xEF);
    assert_eq!(c.memory.data[0x6001], 0xBE);
}

#[test]
fn pop_push_ix() {
    let mut c = create_z80(&[0xDD, 0xE1, 0xDD, 0xE5]);
    c.sp = 0x8000;
    c.memory.data[0x8000] = 0x34;
    c.memory.data[0x8001] = 0x12;
    c.step();
    assert_eq!(c.ix, 0x1234);
    assert_eq!(c.sp, 0x8002);
    c.step();
    assert_eq!(c.sp, 0x8000);
    assert_eq!(c.memory.data[0x8000], 0x34);
}

#[test]
fn ex_sp_indirect_ix() {
    let mut c = create_z80(&[0xDD, 0xE3]);
    c.sp = 0x8000;
    c.ix = 0x1234;
    c.memory.data[0x8000] = 0x78;
    c.memory.data[0x8001] = 0x56;
    c.step();
    assert_eq!(c.ix, 0x5678);
    assert_eq!(c.memory.data[0x8000], 0x34);
    assert_eq!(c.memory.data[0x8001], 0x12);
}

#[test]
fn jp_ix() {
    let mut c = create_z80(&[0xDD, 0xE9]);
    c.ix = 0x4321;
    c.step();
    assert_eq!(c.pc, 0x4321);
}

#[test]
fn ld_sp_iy() {
    let mut c = create_z80(&[0xFD, 0xF9]);
    c.iy = 0xCAFE;
    c.step();
    assert_eq!(c.sp, 0xCAFE);
}

// ============ DD/FD: indexed memory operands ============

#[test]
fn ld_a_ix_plus_d() {
    let mut c = create_z80(&[0xDD, 0x7E, 0x05]);
    c.ix = 0x1000;
    c.memory.data[0x1005] = 0x42;
    c.step();
    assert_eq!(c.a, 0x42);
}

#[test]
fn ld_iy_minus_d_b() {
    let mut c = create_z80(&[0xFD, 0x70, 0xFF]); // LD (IY-1), B
    c.iy = 0x1000;
    c.b = 0x99;
    c.step();
    assert_eq!(c.memory.data[0x0FFF], 0x99);
}

#[test]
fn ld_ix_plus_d_n() {
    let mut c = create_z80(&[0xDD, 0x36, 0x02, 0xAB]); // LD (IX+2), 0xAB
    c.ix = 0x2000;
    c.step();
    assert_eq!(c.memory.data[0x2002], 0xAB);
    assert_eq!(c.pc, 4);
}

#[test]
fn inc_ix_plus_d() {
    let mut c = create_z80(&[0xDD, 0x34, 0x00]);
    c.ix = 0x3000;
    c.memory.data[0x3000] = 0x7F;
    c.step();
    assert_eq!(c.memory.data[0x3000], 0x80);
    assert!(c.get_flag(flags::PARITY));
}

#[test]
fn dec_iy_plus_d() {
    let mut c = create_z80(&[0xFD, 0x35, 0x01]);
    c.iy = 0x3000;
    c.memory.data[0x3001] = 0x01;
    c.step();
    assert_eq!(c.memory.data[0x3001], 0x00);
    assert!(c.get_flag(flags::ZERO));
}

#[test]
fn add_a_ix_plus_d() {
    let mut c = create_z80(&[0xDD, 0x86, 0x03]);
    c.ix = 0x5000;
    c.a = 0x10;
    c.memory.data[0x5003] = 0x22;
    c.step();
    assert_eq!(c.a, 0x32);
}

#[test]
fn cp_iy_plus_d() {
    let mut c = create_z80(&[0xFD, 0xBE, 0x00]);
    c.iy = 0x5000;
    c.a = 0x42;
    c.memory.data[0x5000] = 0x42;
    c.step();
    assert!(c.get_flag(flags::ZERO));
    assert_eq!(c.a, 0x42);
}
