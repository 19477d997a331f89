//! JSON state snapshot round-trips.

use super::*;
use crate::z80::test_utils::create_z80;
use serde_json::json;

#[test]
fn read_write_state_round_trip() {
    let mut c = create_z80(&[]);
    c.a = 0xAA;
    c.f = 0xBB;
    c.set_bc(0x1234);
    c.set_de(0x5678);
    c.set_hl(0x9ABC);
    c.a_prime = 0x11;
    c.pc = 0xDEAD;
    c.sp = 0xBEEF;
    c.ix = 0x1111;
    c.iy = 0x2222;
    c.i = 0x12;
    c.r = 0x7F;
    c.halted = true;
    c.im = 2;
    c.iff1 = true;
    c.iff2 = false;
    c.memptr = 0x4455;
    c.cycles = 123_456;

    let state = c.read_state();
    assert_eq!(state["a"], 0xAA);
    assert_eq!(state["f"], 0xBB);
    assert_eq!(state["b"], 0x12);
    assert_eq!(state["c"], 0x34);
    assert_eq!(state["pc"], 0xDEAD);
    assert_eq!(state["halted"], true);
    assert_eq!(state["memptr"], 0x4455);

    let mut fresh = create_z80(&[]);
    fresh.write_state(&state);
    assert_eq!(fresh.a, 0xAA);
    assert_eq!(fresh.f, 0xBB);
    assert_eq!(fresh.bc(), 0x1234);
    assert_eq!(fresh.de(), 0x5678);
    assert_eq!(fresh.hl(), 0x9ABC);
    assert_eq!(fresh.a_prime, 0x11);
    assert_eq!(fresh.pc, 0xDEAD);
    assert_eq!(fresh.sp, 0xBEEF);
    assert_eq!(fresh.ix, 0x1111);
    assert_eq!(fresh.iy, 0x2222);
    assert_eq!(fresh.i, 0x12);
    assert_eq!(fresh.r, 0x7F);
    assert!(fresh.halted);
    assert_eq!(fresh.im, 2);
    assert!(fresh.iff1);
    assert!(!fresh.iff2);
    assert_eq!(fresh.memptr, 0x4455);
    assert_eq!(fresh.cycles, 123_456);
}

#[test]
fn partial_write_only_touches_named_fields() {
    let mut c = create_z80(&[]);
    c.b = 0x55;
    c.write_state(&json!({ "a": 0xFF, "pc": 0x8000 }));
    assert_eq!(c.a, 0xFF);
    assert_eq!(c.pc, 0x8000);
    assert_eq!(c.b, 0x55);
}

#[test]
fn snapshot_resumes_execution_identically() {
    // Run half a program, snapshot, resume on a fresh CPU over the same
    // memory, and compare against an uninterrupted run.
    let program = [0x3E, 0x15, 0xC6, 0x27, 0x27, 0x47]; // LD A; ADD; DAA; LD B,A
    let mut reference = create_z80(&program);
    for _ in 0..4 {
        reference.step();
    }

    let mut first_half = create_z80(&program);
    first_half.step();
    first_half.step();
    let state = first_half.read_state();

    let mut second_half = create_z80(&program);
    second_half.write_state(&state);
    second_half.step();
    second_half.step();

    assert_eq!(second_half.a, reference.a);
    assert_eq!(second_half.f, reference.f);
    assert_eq!(second_half.b, reference.b);
    assert_eq!(second_half.pc, reference.pc);
    assert_eq!(second_half.r, reference.r);
}
