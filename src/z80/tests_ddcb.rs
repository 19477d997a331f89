//! DD CB / FD CB: indexed bit operations, including the undocumented dual
//! write-back into a register.

use super::*;
use crate::z80::test_utils::create_z80;

#[test]
fn ddcb_rlc_ix() {
    let mut c = create_z80(&[0xDD, 0xCB, 0x05, 0x06]); // RLC (IX+5)
    c.ix = 0x1000;
    c.memory.data[0x1005] = 0x80;
    c.step();
    assert_eq!(c.memory.data[0x1005], 0x01);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn fdcb_rlc_iy() {
    let mut c = create_z80(&[0xFD, 0xCB, 0x05, 0x06]); // RLC (IY+5)
    c.iy = 0x2000;
    c.memory.data[0x2005] = 0x01;
    c.step();
    assert_eq!(c.memory.data[0x2005], 0x02);
    assert!(!c.get_flag(flags::CARRY));
}

#[test]
fn ddcb_negative_displacement() {
    let mut c = create_z80(&[0xDD, 0xCB, 0xFE, 0x06]); // RLC (IX-2)
    c.ix = 0x1000;
    c.memory.data[0x0FFE] = 0x40;
    c.step();
    assert_eq!(c.memory.data[0x0FFE], 0x80);
}

#[test]
fn ddcb_srl_ix() {
    let mut c = create_z80(&[0xDD, 0xCB, 0x00, 0x3E]); // SRL (IX+0)
    c.ix = 0x1000;
    c.memory.data[0x1000] = 0x81;
    c.step();
    assert_eq!(c.memory.data[0x1000], 0x40);
    assert!(c.get_flag(flags::CARRY));
}

#[test]
fn ddcb_sll_ix() {
    let mut c = create_z80(&[0xDD, 0xCB, 0x00, 0x36]); // SLL (IX+0)
    c.ix = 0x1000;
    c.memory.data[0x1000] = 0x00;
    c.step();
    assert_eq!(c.memory.data[0x1000], 0x01);
}

// ============ Dual write-back ============

#[test]
fn ddcb_rlc_also_writes_b() {
    // DD CB 05 00 is RLC (IX+5) with the result mirrored into B
    let mut c = create_z80(&[0xDD, 0xCB, 0x05, 0x00]);
    c.ix = 0x4000;
    c.memory.data[0x4005] = 0x01;
    c.step();
    assert_eq!(c.memory.data[0x4005], 0x02);
    assert_eq!(c.b, 0x02);
}

#[test]
fn ddcb_set_also_writes_a() {
    let mut c = create_z80(&[0xDD, 0xCB, 0x00, 0xC7]); // SET 0, (IX+0), A
    c.ix = 0x4000;
    c.memory.data[0x4000] = 0x00;
    c.a = 0xFF;
    c.step();
    assert_eq!(c.memory.data[0x4000], 0x01);
    assert_eq!(c.a, 0x01);
}

#[test]
fn ddcb_res_also_writes_e() {
    let mut c = create_z80(&[0xDD, 0xCB, 0x00, 0x83]); // RES 0, (IX+0), E
    c.ix = 0x4000;
    c.memory.data[0x4000] = 0xFF;
    c.step();
    assert_eq!(c.memory.data[0x4000], 0xFE);
    assert_eq!(c.e, 0xFE);
}

#[test]
fn ddcb_plain_form_leaves_registers_alone() {
    let mut c = create_z80(&[0xDD, 0xCB, 0x00, 0xC6]); // SET 0, (IX+0)
    c.ix = 0x4000;
    let before = c.bc();
    c.step();
    assert_eq!(c.memory.data[0x4000], 0x01);
    assert_eq!(c.bc(), before);
}

// ============ BIT through the effective address ============

#[test]
fn ddcb_bit_reads_memory() {
    let mut c = create_z80(&[0xDD, 0xCB, 0x05, 0x46]); // BIT 0, (IX+5)
    c.ix = 0x1000;
    c.memory.data[0x1005] = 0x01;
    c.step();
    assert!(!c.get_flag(flags::ZERO));
}

#[test]
fn ddcb_bit_does_not_write_back() {
    let mut c = create_z80(&[0xDD, 0xCB, 0x05, 0x46]);
    c.ix = 0x1000;
    c.b = 0x77;
    c.memory.data[0x1005] = 0x01;
    c.step();
    assert_eq!(c.memory.data[0x1005], 0x01);
    assert_eq!(c.b, 0x77);
}

#[test]
fn ddcb_bit_xy_from_effective_address_high() {
    // IX+d = 0x2A05; high byte 0x2A has bits 3 and 5 set
    let mut c = create_z80(&[0xDD, 0xCB, 0x05, 0x46]);
    c.ix = 0x2A00;
    c.memory.data[0x2A05] = 0x01;
    c.step();
    assert!(c.get_flag(flags::X_FLAG));
    assert!(c.get_flag(flags::Y_FLAG));
}

#[test]
fn fdcb_bit_7_sign() {
    let mut c = create_z80(&[0xFD, 0xCB, 0x00, 0x7E]); // BIT 7, (IY+0)
    c.iy = 0x3000;
    c.memory.data[0x3000] = 0x80;
    c.step();
    assert!(c.get_flag(flags::SIGN));
    assert!(!c.get_flag(flags::ZERO));
}
