//! 8-bit and 16-bit load group tests.

use super::*;
use crate::z80::test_utils::create_z80;

// ============ LD r, r' ============

#[test]
fn ld_b_c() {
    let mut c = create_z80(&[0x41]);
    c.c = 0x42;
    c.step();
    assert_eq!(c.b, 0x42);
}

#[test]
fn ld_a_h() {
    let mut c = create_z80(&[0x7C]);
    c.h = 0x99;
    c.step();
    assert_eq!(c.a, 0x99);
}

#[test]
fn ld_r_r_touches_no_flags() {
    let mut c = create_z80(&[0x41]);
    c.f = 0xFF;
    c.c = 0x00;
    c.step();
    assert_eq!(c.f, 0xFF);
}

#[test]
fn ld_b_hl_indirect() {
    let mut c = create_z80(&[0x46]);
    c.set_hl(0x2000);
    c.memory.data[0x2000] = 0x7E;
    c.step();
    assert_eq!(c.b, 0x7E);
}

#[test]
fn ld_hl_indirect_b() {
    let mut c = create_z80(&[0x70]);
    c.set_hl(0x2000);
    c.b = 0x5A;
    c.step();
    assert_eq!(c.memory.data[0x2000], 0x5A);
}

// ============ LD r, n ============

#[test]
fn ld_a_n() {
    let mut c = create_z80(&[0x3E, 0x77]);
    c.step();
    assert_eq!(c.a, 0x77);
    assert_eq!(c.pc, 2);
}

#[test]
fn ld_hl_indirect_n() {
    let mut c = create_z80(&[0x36, 0x33]);
    c.set_hl(0x3000);
    c.step();
    assert_eq!(c.memory.data[0x3000], 0x33);
}

// ============ Accumulator <-> memory ============

#[test]
fn ld_bc_indirect_a() {
    let mut c = create_z80(&[0x02]);
    c.a = 0x12;
    c.set_bc(0x1234);
    c.step();
    assert_eq!(c.memory.data[0x1234], 0x12);
}

#[test]
fn ld_a_de_indirect() {
    let mut c = create_z80(&[0x1A]);
    c.set_de(0x4444);
    c.memory.data[0x4444] = 0x88;
    c.step();
    assert_eq!(c.a, 0x88);
}

#[test]
fn ld_nn_indirect_a() {
    let mut c = create_z80(&[0x32, 0x00, 0x90]);
    c.a = 0xAB;
    c.step();
    assert_eq!(c.memory.data[0x9000], 0xAB);
    assert_eq!(c.pc, 3);
}

#[test]
fn ld_a_nn_indirect() {
    let mut c = create_z80(&[0x3A, 0x00, 0x90]);
    c.memory.data[0x9000] = 0xCD;
    c.step();
    assert_eq!(c.a, 0xCD);
}

// ============ 16-bit loads ============

#[test]
fn ld_sp_nn() {
    let mut c = create_z80(&[0x31, 0xFE, 0xFF]);
    c.step();
    assert_eq!(c.sp, 0xFFFE);
}

#[test]
fn ld_nn_indirect_hl() {
    let mut c = create_z80(&[0x22, 0x00, 0x80]);
    c.set_hl(0xBEEF);
    c.step();
    assert_eq!(c.memory.data[0x8000], 0xEF);
    assert_eq!(c.memory.data[0x8001], 0xBE);
}

#[test]
fn ld_hl_nn_indirect() {
    let mut c = create_z80(&[0x2A, 0x00, 0x80]);
    c.memory.data[0x8000] = 0x34;
    c.memory.data[0x8001] = 0x12;
    c.step();
    assert_eq!(c.hl(), 0x1234);
}

#[test]
fn ld_sp_hl() {
    let mut c = create_z80(&[0xF9]);
    c.set_hl(0xCAFE);
    c.step();
    assert_eq!(c.sp, 0xCAFE);
}

#[test]
fn pop_af_restores_flags() {
    let mut c = create_z80(&[0xF1]);
    c.sp = 0x8000;
    c.memory.data[0x8000] = 0xD7; // F
    c.memory.data[0x8001] = 0x3C; // A
    c.step();
    assert_eq!(c.af(), 0x3CD7);
    assert_eq!(c.sp, 0x8002);
}

// ============ Exchanges ============

#[test]
fn ex_de_hl() {
    let mut c = create_z80(&[0xEB]);
    c.set_de(0x1122);
    c.set_hl(0x3344);
    c.step();
    assert_eq!(c.de(), 0x3344);
    assert_eq!(c.hl(), 0x1122);
}

#[test]
fn ex_sp_indirect_hl() {
    let mut c = create_z80(&[0xE3]);
    c.sp = 0xFFFE;
    c.set_hl(0x1234);
    c.memory.data[0xFFFE] = 0x78;
    c.memory.data[0xFFFF] = 0x56;
    c.step();
    assert_eq!(c.hl(), 0x5678);
    assert_eq!(c.memory.data[0xFFFE], 0x34);
    assert_eq!(c.memory.data[0xFFFF], 0x12);
    assert_eq!(c.sp, 0xFFFE);
}

// ============ ED 16-bit (nn) forms ============

#[test]
fn ed_ld_nn_indirect_bc() {
    let mut c = create_z80(&[0xED, 0x43, 0x00, 0x70]);
    c.set_bc(0x1357);
    c.step();
    assert_eq!(c.memory.data[0x7000], 0x57);
    assert_eq!(c.memory.data[0x7001], 0x13);
}

#[test]
fn ed_ld_sp_nn_indirect() {
    let mut c = create_z80(&[0xED, 0x7B, 0x00, 0x70]);
    c.memory.data[0x7000] = 0xEF;
    c.memory.data[0x7001] = 0xBE;
    c.step();
    assert_eq!(c.sp, 0xBEEF);
}

#[test]
fn ed_ld_de_nn_indirect() {
    let mut c = create_z80(&[0xED, 0x5B, 0x10, 0x70]);
    c.memory.data[0x7010] = 0x0D;
    c.memory.data[0x7011] = 0xF0;
    c.step();
    assert_eq!(c.de(), 0xF00D);
}
