//! CB-prefixed opcodes: rotates, shifts, and bit operations.
//!
//! Also hosts the executor for the DD CB / FD CB indexed forms, which share
//! the rotate/shift/bit core but write through a computed effective address
//! and mirror the result into a register (the undocumented dual write).

use crate::memory::{IoInterface, MemoryInterface};
use crate::z80::{flags, Z80};

pub trait CbOps {
    fn execute_cb_prefix(&mut self, opcode: u8) -> u32;
    fn execute_indexed_cb(&mut self, opcode: u8, addr: u16) -> u32;
}

impl<M: MemoryInterface, I: IoInterface> CbOps for Z80<M, I> {
    fn execute_cb_prefix(&mut self, opcode: u8) -> u32 {
        let x = (opcode >> 6) & 0x03;
        let y = (opcode >> 3) & 0x07;
        let z = opcode & 0x07;

        let val = self.get_reg(z);

        match x {
            0 => {
                // Rotate/shift
                let result = cb_rotate_shift(self, val, y);
                self.set_reg(z, result);
                if z == 6 {
                    15
                } else {
                    8
                }
            }
            1 => {
                // BIT y, r
                cb_bit(self, val, y);

                if z != 6 {
                    self.set_xy_flags(val);
                } else {
                    // For (HL), X/Y leak from the MEMPTR high byte
                    self.set_xy_flags((self.memptr >> 8) as u8);
                }

                if z == 6 {
                    12
                } else {
                    8
                }
            }
            2 => {
                // RES y, r - no flag effects
                self.set_reg(z, val & !(1 << y));
                if z == 6 {
                    15
                } else {
                    8
                }
            }
            3 => {
                // SET y, r - no flag effects
                self.set_reg(z, val | 1 << y);
                if z == 6 {
                    15
                } else {
                    8
                }
            }
            _ => 8,
        }
    }

    fn execute_indexed_cb(&mut self, opcode: u8, addr: u16) -> u32 {
        let x = (opcode >> 6) & 0x03;
        let y = (opcode >> 3) & 0x07;
        let z = opcode & 0x07;
        let val = self.read_byte(addr);

        match x {
            0 => {
                let result = cb_rotate_shift(self, val, y);
                self.write_byte(addr, result);
                if z != 6 {
                    self.set_reg(z, result);
                }
                23
            }
            1 => {
                // BIT y, (IX/IY+d): X/Y from the high byte of the effective
                // address; no write-back
                cb_bit(self, val, y);
                self.set_xy_flags((addr >> 8) as u8);
                20
            }
            2 => {
                let result = val & !(1 << y);
                self.write_byte(addr, result);
                if z != 6 {
                    self.set_reg(z, result);
                }
                23
            }
            3 => {
                let result = val | 1 << y;
                self.write_byte(addr, result);
                if z != 6 {
                    self.set_reg(z, result);
                }
                23
            }
            _ => 20,
        }
    }
}

fn cb_rotate_shift<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    val: u8,
    y: u8,
) -> u8 {
    let result = match y {
        0 => {
            // RLC
            cpu.set_flag(flags::CARRY, (val & 0x80) != 0);
            val.rotate_left(1)
        }
        1 => {
            // RRC
            cpu.set_flag(flags::CARRY, (val & 0x01) != 0);
            val.rotate_right(1)
        }
        2 => {
            // RL
            let old_carry = cpu.get_flag(flags::CARRY);
            cpu.set_flag(flags::CARRY, (val & 0x80) != 0);
            (val << 1) | u8::from(old_carry)
        }
        3 => {
            // RR
            let old_carry = cpu.get_flag(flags::CARRY);
            cpu.set_flag(flags::CARRY, (val & 0x01) != 0);
            (val >> 1) | if old_carry { 0x80 } else { 0 }
        }
        4 => {
            // SLA
            cpu.set_flag(flags::CARRY, (val & 0x80) != 0);
            val << 1
        }
        5 => {
            // SRA
            cpu.set_flag(flags::CARRY, (val & 0x01) != 0);
            (val >> 1) | (val & 0x80)
        }
        6 => {
            // SLL (undocumented): like SLA but shifts a 1 into bit 0
            cpu.set_flag(flags::CARRY, (val & 0x80) != 0);
            (val << 1) | 0x01
        }
        7 => {
            // SRL
            cpu.set_flag(flags::CARRY, (val & 0x01) != 0);
            val >> 1
        }
        _ => val,
    };
    cpu.set_flag(flags::HALF_CARRY, false);
    cpu.set_flag(flags::ADD_SUB, false);
    cpu.set_szxypv_flags(result);
    result
}

/// Shared BIT flag core. Z and P/V report the tested bit, S is set only for
/// BIT 7 of a set bit. X/Y depend on the operand form and are handled by the
/// callers.
fn cb_bit<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, val: u8, bit: u8) {
    let result = val & (1 << bit);
    cpu.set_flag(flags::ZERO, result == 0);
    cpu.set_flag(flags::PARITY, result == 0);
    cpu.set_flag(flags::HALF_CARRY, true);
    cpu.set_flag(flags::ADD_SUB, false);
    cpu.set_flag(flags::SIGN, bit == 7 && result != 0);
}
