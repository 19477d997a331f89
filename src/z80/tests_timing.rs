//! T-state accounting across the instruction set, including the taken /
//! not-taken splits and prefix costs.

use super::*;
use crate::z80::test_utils::create_z80;

// ============ Unprefixed ============

#[test]
fn timing_nop() {
    let mut c = create_z80(&[0x00]);
    assert_eq!(c.step(), 4);
}

#[test]
fn timing_ld_rp_nn() {
    let mut c = create_z80(&[0x01, 0x00, 0x00]);
    assert_eq!(c.step(), 10);
}

#[test]
fn timing_ld_bc_indirect_a() {
    let mut c = create_z80(&[0x02]);
    c.set_bc(0x100);
    assert_eq!(c.step(), 7);
}

#[test]
fn timing_inc_rp() {
    let mut c = create_z80(&[0x03]);
    assert_eq!(c.step(), 6);
}

#[test]
fn timing_inc_r() {
    let mut c = create_z80(&[0x04]);
    assert_eq!(c.step(), 4);
}

#[test]
fn timing_inc_hl_indirect() {
    let mut c = create_z80(&[0x34]);
    c.set_hl(0x100);
    assert_eq!(c.step(), 11);
}

#[test]
fn timing_ld_r_n() {
    let mut c = create_z80(&[0x06, 0x00]);
    assert_eq!(c.step(), 7);
}

#[test]
fn timing_ld_hl_indirect_n() {
    let mut c = create_z80(&[0x36, 0x00]);
    c.set_hl(0x100);
    assert_eq!(c.step(), 10);
}

#[test]
fn timing_add_hl_rp() {
    let mut c = create_z80(&[0x09]);
    assert_eq!(c.step(), 11);
}

#[test]
fn timing_djnz() {
    let mut c = create_z80(&[0x10, 0x00]);
    c.b = 2;
    assert_eq!(c.step(), 13);
    let mut c = create_z80(&[0x10, 0x00]);
    c.b = 1;
    assert_eq!(c.step(), 8);
}

#[test]
fn timing_jr() {
    let mut c = create_z80(&[0x18, 0x00]);
    assert_eq!(c.step(), 12);
}

#[test]
fn timing_jr_cc() {
    let mut c = create_z80(&[0x20, 0x00]);
    c.f = 0;
    assert_eq!(c.step(), 12);
    let mut c = create_z80(&[0x20, 0x00]);
    c.set_flag(flags::ZERO, true);
    assert_eq!(c.step(), 7);
}

#[test]
fn timing_ld_nn_indirect_hl() {
    let mut c = create_z80(&[0x22, 0x00, 0x01]);
    assert_eq!(c.step(), 16);
}

#[test]
fn timing_ld_nn_indirect_a() {
    let mut c = create_z80(&[0x32, 0x00, 0x01]);
    assert_eq!(c.step(), 13);
}

#[test]
fn timing_ld_r_r() {
    let mut c = create_z80(&[0x41]);
    assert_eq!(c.step(), 4);
}

#[test]
fn timing_ld_r_hl_indirect() {
    let mut c = create_z80(&[0x46]);
    c.set_hl(0x100);
    assert_eq!(c.step(), 7);
}

#[test]
fn timing_alu_r() {
    let mut c = create_z80(&[0x80]);
    assert_eq!(c.step(), 4);
}

#[test]
fn timing_alu_hl_indirect() {
    let mut c = create_z80(&[0x86]);
    c.set_hl(0x100);
    assert_eq!(c.step(), 7);
}

#[test]
fn timing_alu_n() {
    let mut c = create_z80(&[0xC6, 0x01]);
    assert_eq!(c.step(), 7);
}

#[test]
fn timing_ret_cc() {
    let mut c = create_z80(&[0xC0]);
    c.sp = 0x8000;
    c.f = 0;
    assert_eq!(c.step(), 11);
    let mut c = create_z80(&[0xC0]);
    c.set_flag(flags::ZERO, true);
    assert_eq!(c.step(), 5);
}

#[test]
fn timing_pop_push() {
    let mut c = create_z80(&[0xC1, 0xC5]);
    c.sp = 0x8000;
    assert_eq!(c.step(), 10);
    assert_eq!(c.step(), 11);
}

#[test]
fn timing_ret() {
    let mut c = create_z80(&[0xC9]);
    c.sp = 0x8000;
    assert_eq!(c.step(), 10);
}

#[test]
fn timing_jp() {
    let mut c = create_z80(&[0xC3, 0x00, 0x00]);
    assert_eq!(c.step(), 10);
}

#[test]
fn timing_jp_cc_both_ways() {
    let mut c = create_z80(&[0xC2, 0x00, 0x00]);
    c.f = 0;
    assert_eq!(c.step(), 10);
    let mut c = create_z80(&[0xC2, 0x00, 0x00]);
    c.set_flag(flags::ZERO, true);
    assert_eq!(c.step(), 10);
}

#[test]
fn timing_call_cc() {
    let mut c = create_z80(&[0xCD, 0x00, 0x10]);
    c.sp = 0x8000;
    assert_eq!(c.step(), 17);
    let mut c = create_z80(&[0xC4, 0x00, 0x10]);
    c.set_flag(flags::ZERO, true);
    assert_eq!(c.step(), 10);
}

#[test]
fn timing_rst() {
    let mut c = create_z80(&[0xC7]);
    c.sp = 0x8000;
    assert_eq!(c.step(), 11);
}

#[test]
fn timing_out_in_n() {
    let mut c = create_z80(&[0xD3, 0x00]);
    assert_eq!(c.step(), 11);
    let mut c = create_z80(&[0xDB, 0x00]);
    assert_eq!(c.step(), 11);
}

#[test]
fn timing_ex_sp_hl() {
    let mut c = create_z80(&[0xE3]);
    c.sp = 0x8000;
    assert_eq!(c.step(), 19);
}

#[test]
fn timing_ex_de_hl_exx() {
    let mut c = create_z80(&[0xEB, 0xD9]);
    assert_eq!(c.step(), 4);
    assert_eq!(c.step(), 4);
}

#[test]
fn timing_jp_hl_ld_sp_hl() {
    let mut c = create_z80(&[0xF9]);
    assert_eq!(c.step(), 6);
    let mut c = create_z80(&[0xE9]);
    assert_eq!(c.step(), 4);
}

#[test]
fn timing_di_ei() {
    let mut c = create_z80(&[0xF3, 0xFB]);
    assert_eq!(c.step(), 4);
    assert_eq!(c.step(), 4);
}

// ============ CB prefix ============

#[test]
fn timing_cb_rotate_r() {
    let mut c = create_z80(&[0xCB, 0x00]);
    assert_eq!(c.step(), 8);
}

#[test]
fn timing_cb_rotate_hl_indirect() {
    let mut c = create_z80(&[0xCB, 0x06]);
    c.set_hl(0x100);
    assert_eq!(c.step(), 15);
}

#[test]
fn timing_cb_bit_r() {
    let mut c = create_z80(&[0xCB, 0x40]);
    assert_eq!(c.step(), 8);
}

#[test]
fn timing_cb_bit_hl_indirect() {
    let mut c = create_z80(&[0xCB, 0x46]);
    c.set_hl(0x100);
    assert_eq!(c.step(), 12);
}

#[test]
fn timing_cb_set_res_hl_indirect() {
    let mut c = create_z80(&[0xCB, 0xC6, 0xCB, 0x86]);
    c.set_hl(0x100);
    assert_eq!(c.step(), 15);
    assert_eq!(c.step(), 15);
}

// ============ ED prefix ============

#[test]
fn timing_ed_in_out_c() {
    let mut c = create_z80(&[0xED, 0x40, 0xED, 0x41]);
    assert_eq!(c.step(), 12);
    assert_eq!(c.step(), 12);
}

#[test]
fn timing_ed_adc_sbc_hl() {
    let mut c = create_z80(&[0xED, 0x4A, 0xED, 0x42]);
    assert_eq!(c.step(), 15);
    assert_eq!(c.step(), 15);
}

#[test]
fn timing_ed_ld_nn_rp() {
    let mut c = create_z80(&[0xED, 0x43, 0x00, 0x01]);
    assert_eq!(c.step(), 20);
}

#[test]
fn timing_ed_neg() {
    let mut c = create_z80(&[0xED, 0x44]);
    assert_eq!(c.step(), 8);
}

#[test]
fn timing_ed_retn_reti() {
    let mut c = create_z80(&[0xED, 0x45]);
    c.sp = 0x8000;
    assert_eq!(c.step(), 14);
    let mut c = create_z80(&[0xED, 0x4D]);
    c.sp = 0x8000;
    assert_eq!(c.step(), 14);
}

#[test]
fn timing_ed_im() {
    let mut c = create_z80(&[0xED, 0x56]);
    assert_eq!(c.step(), 8);
}

#[test]
fn timing_ed_ld_i_a_and_back() {
    let mut c = create_z80(&[0xED, 0x47, 0xED, 0x57]);
    assert_eq!(c.step(), 9);
    assert_eq!(c.step(), 9);
}

#[test]
fn timing_ed_rrd_rld() {
    let mut c = create_z80(&[0xED, 0x67, 0xED, 0x6F]);
    c.set_hl(0x100);
    assert_eq!(c.step(), 18);
    assert_eq!(c.step(), 18);
}

#[test]
fn timing_ed_block_single() {
    let mut c = create_z80(&[0xED, 0xA0]);
    c.set_bc(2);
    assert_eq!(c.step(), 16);
}

#[test]
fn timing_ed_noni() {
    let mut c = create_z80(&[0xED, 0x00]);
    assert_eq!(c.step(), 8);
}

// ============ DD/FD prefix ============

#[test]
fn timing_dd_add_ix_rp() {
    let mut c = create_z80(&[0xDD, 0x09]);
    assert_eq!(c.step(), 15);
}

#[test]
fn timing_dd_ld_ix_nn() {
    let mut c = create_z80(&[0xDD, 0x21, 0x00, 0x00]);
    assert_eq!(c.step(), 14);
}

#[test]
fn timing_dd_ld_nn_ix() {
    let mut c = create_z80(&[0xDD, 0x22, 0x00, 0x01]);
    assert_eq!(c.step(), 20);
}

#[test]
fn timing_dd_inc_ix() {
    let mut c = create_z80(&[0xDD, 0x23]);
    assert_eq!(c.step(), 10);
}

#[test]
fn timing_dd_inc_ixh() {
    let mut c = create_z80(&[0xDD, 0x24]);
    assert_eq!(c.step(), 8);
}

#[test]
fn timing_dd_ld_ixh_n() {
    let mut c = create_z80(&[0xDD, 0x26, 0x00]);
    assert_eq!(c.step(), 11);
}

#[test]
fn timing_dd_inc_indexed() {
    let mut c = create_z80(&[0xDD, 0x34, 0x00]);
    assert_eq!(c.step(), 23);
}

#[test]
fn timing_dd_ld_indexed_n() {
    let mut c = create_z80(&[0xDD, 0x36, 0x00, 0x00]);
    assert_eq!(c.step(), 19);
}

#[test]
fn timing_dd_ld_r_indexed() {
    let mut c = create_z80(&[0xDD, 0x7E, 0x00]);
    assert_eq!(c.step(), 19);
}

#[test]
fn timing_dd_alu_indexed() {
    let mut c = create_z80(&[0xDD, 0x86, 0x00]);
    assert_eq!(c.step(), 19);
}

#[test]
fn timing_dd_pop_push_ix() {
    let mut c = create_z80(&[0xDD, 0xE1, 0xDD, 0xE5]);
    c.sp = 0x8000;
    assert_eq!(c.step(), 14);
    assert_eq!(c.step(), 15);
}

#[test]
fn timing_dd_ex_sp_ix() {
    let mut c = create_z80(&[0xDD, 0xE3]);
    c.sp = 0x8000;
    assert_eq!(c.step(), 23);
}

#[test]
fn timing_dd_jp_ix() {
    let mut c = create_z80(&[0xDD, 0xE9]);
    assert_eq!(c.step(), 8);
}

#[test]
fn timing_ddcb() {
    let mut c = create_z80(&[0xDD, 0xCB, 0x00, 0x06]);
    assert_eq!(c.step(), 23);
    let mut c = create_z80(&[0xDD, 0xCB, 0x00, 0x46]);
    assert_eq!(c.step(), 20);
    let mut c = create_z80(&[0xDD, 0xCB, 0x00, 0xC6]);
    assert_eq!(c.step(), 23);
}

#[test]
fn timing_dd_fallthrough_adds_prefix_cost() {
    // DD before a non-indexed opcode: 4 T prefix + the unprefixed cost
    let mut c = create_z80(&[0xDD, 0x04]); // DD + INC B
    assert_eq!(c.step(), 8);
    assert_eq!(c.b, 1);
    let mut c = create_z80(&[0xDD, 0x00]); // DD + NOP
    assert_eq!(c.step(), 8);
}

#[test]
fn timing_halt_and_wait() {
    let mut c = create_z80(&[0x76]);
    assert_eq!(c.step(), 4);
    assert_eq!(c.step(), 4);
}
