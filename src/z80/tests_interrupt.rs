//! Interrupt behavior: DI/EI, maskable acceptance in IM 1/2, NMI, HALT
//! interaction, and the one-instruction EI deferral.

use super::*;
use crate::z80::test_utils::create_z80;

// ============ DI / EI ============

#[test]
fn di_clears_both_flip_flops() {
    let mut c = create_z80(&[0xF3]);
    c.iff1 = true;
    c.iff2 = true;
    c.step();
    assert!(!c.iff1);
    assert!(!c.iff2);
}

#[test]
fn ei_sets_both_flip_flops() {
    let mut c = create_z80(&[0xFB]);
    c.step();
    assert!(c.iff1);
    assert!(c.iff2);
}

// ============ Maskable interrupts ============

#[test]
fn interrupt_ignored_when_iff1_clear() {
    let mut c = create_z80(&[0x00]);
    c.io.interrupt_pending = true;
    c.iff1 = false;
    c.step();
    assert_eq!(c.pc, 1); // the NOP executed instead
}

#[test]
fn im1_interrupt_vectors_to_0038() {
    let mut c = create_z80(&[0x00]);
    c.pc = 0x1234;
    c.sp = 0x9000;
    c.iff1 = true;
    c.im = 1;
    c.io.interrupt_pending = true;
    let t = c.step();
    assert_eq!(t, 13);
    assert_eq!(c.pc, 0x0038);
    assert_eq!(c.sp, 0x8FFE);
    assert_eq!(c.memory.data[0x8FFE], 0x34);
    assert_eq!(c.memory.data[0x8FFF], 0x12);
    assert!(!c.iff1);
    assert!(!c.iff2);
}

#[test]
fn im0_serviced_like_im1() {
    let mut c = create_z80(&[0x00]);
    c.sp = 0x9000;
    c.iff1 = true;
    c.im = 0;
    c.io.interrupt_pending = true;
    assert_eq!(c.step(), 13);
    assert_eq!(c.pc, 0x0038);
}

#[test]
fn im2_interrupt_reads_vector_table() {
    let mut c = create_z80(&[0x00]);
    c.pc = 0x4000;
    c.sp = 0x9000;
    c.iff1 = true;
    c.im = 2;
    c.i = 0x12;
    c.memory.data[0x12FF] = 0x34;
    c.memory.data[0x1300] = 0x56;
    c.io.interrupt_pending = true;
    let t = c.step();
    assert_eq!(t, 19);
    assert_eq!(c.pc, 0x5634);
    assert_eq!(c.sp, 0x8FFE);
    assert_eq!(c.memory.data[0x8FFE], 0x00);
    assert_eq!(c.memory.data[0x8FFF], 0x40);
    assert!(!c.iff1);
    assert!(!c.iff2);
}

#[test]
fn interrupt_is_polled_per_step_not_latched() {
    let mut c = create_z80(&[0x00, 0x00]);
    c.iff1 = true;
    c.im = 1;
    c.sp = 0x9000;
    c.io.interrupt_pending = false;
    c.step();
    assert_eq!(c.pc, 1);
    c.io.interrupt_pending = true;
    c.step();
    assert_eq!(c.pc, 0x0038);
}

// ============ EI deferral ============

#[test]
fn no_interrupt_on_the_instruction_after_ei() {
    // EI; NOP with the line already asserted: the NOP must run first
    let mut c = create_z80(&[0xFB, 0x00]);
    c.sp = 0x9000;
    c.im = 1;
    c.io.interrupt_pending = true;
    c.step(); // EI
    c.step();
    assert_eq!(c.pc, 2); // the NOP ran
    c.step();
    assert_eq!(c.pc, 0x0038); // now the interrupt lands
}

#[test]
fn ei_deferral_is_one_shot() {
    let mut c = create_z80(&[0xFB, 0x00, 0x00]);
    c.sp = 0x9000;
    c.im = 1;
    c.step();
    c.step();
    c.step();
    // No interrupt pending at all: deferral must not linger
    assert_eq!(c.pc, 3);
    c.io.interrupt_pending = true;
    c.step();
    assert_eq!(c.pc, 0x0038);
}

// ============ HALT ============

#[test]
fn halt_resumed_by_interrupt() {
    let mut c = create_z80(&[0x76]);
    c.sp = 0x9000;
    c.iff1 = true;
    c.im = 1;
    c.step();
    assert!(c.halted);
    assert_eq!(c.pc, 0);
    c.io.interrupt_pending = true;
    let t = c.step();
    assert_eq!(t, 13);
    assert!(!c.halted);
    // PC advanced past the HALT byte before the push
    assert_eq!(c.memory.data[0x8FFE], 0x01);
    assert_eq!(c.memory.data[0x8FFF], 0x00);
    assert_eq!(c.pc, 0x0038);
    assert!(!c.iff1);
    assert!(!c.iff2);
}

#[test]
fn halt_burns_4_t_states_while_waiting() {
    let mut c = create_z80(&[0x76]);
    c.step();
    assert_eq!(c.step(), 4);
    assert_eq!(c.step(), 4);
    assert!(c.halted);
}

// ============ NMI ============

#[test]
fn nmi_vectors_to_0066() {
    let mut c = create_z80(&[0x00]);
    c.pc = 0x1234;
    c.sp = 0x9000;
    c.iff1 = true;
    c.iff2 = true;
    let t = c.nmi();
    assert_eq!(t, 11);
    assert_eq!(c.pc, 0x0066);
    assert_eq!(c.memory.data[0x8FFE], 0x34);
    assert_eq!(c.memory.data[0x8FFF], 0x12);
    assert!(!c.iff1);
    // IFF2 keeps the pre-NMI enable state for RETN
    assert!(c.iff2);
}

#[test]
fn nmi_wakes_halted_cpu() {
    let mut c = create_z80(&[0x76]);
    c.sp = 0x9000;
    c.step();
    assert!(c.halted);
    c.nmi();
    assert!(!c.halted);
    assert_eq!(c.pc, 0x0066);
    assert_eq!(c.memory.data[0x8FFE], 0x01);
}

#[test]
fn nmi_then_retn_restores_interrupt_state() {
    let mut c = create_z80(&[0x00]);
    c.iff1 = true;
    c.iff2 = true;
    c.sp = 0x9000;
    c.nmi();
    assert!(!c.iff1);
    // Handler at 0x0066 ends with RETN
    c.memory.data[0x0066] = 0xED;
    c.memory.data[0x0067] = 0x45;
    c.step();
    assert_eq!(c.pc, 0x0000);
    assert!(c.iff1);
}
