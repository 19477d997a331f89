//! Unprefixed opcode execution.
//!
//! Decode follows the standard x/y/z/p/q field split; each z-group gets its
//! own function. T-state counts and MEMPTR latches follow the documented
//! per-opcode tables.

use crate::dispatch_z;
use crate::memory::{IoInterface, MemoryInterface};
use crate::z80::Z80;

pub trait GeneralOps {
    fn execute_x0(&mut self, opcode: u8, y: u8, z: u8, p: u8, q: u8) -> u32;
    fn execute_x1(&mut self, y: u8, z: u8) -> u32;
    fn execute_x2(&mut self, y: u8, z: u8) -> u32;
    fn execute_x3(&mut self, opcode: u8, y: u8, z: u8, p: u8, q: u8) -> u32;
}

impl<M: MemoryInterface, I: IoInterface> GeneralOps for Z80<M, I> {
    fn execute_x0(&mut self, _opcode: u8, y: u8, z: u8, p: u8, q: u8) -> u32 {
        dispatch_z!(
            z,
            execute_x0_control_misc(self, y),
            execute_x0_ld_rp_add_hl(self, p, q),
            execute_x0_load_indirect(self, p, q),
            execute_x0_inc_dec_rp(self, p, q),
            execute_x0_inc_r(self, y),
            execute_x0_dec_r(self, y),
            execute_x0_ld_r_n(self, y),
            execute_x0_accum_flag_ops(self, y)
        )
    }

    fn execute_x1(&mut self, y: u8, z: u8) -> u32 {
        if y == 6 && z == 6 {
            // HALT: PC stays on the halt opcode until an interrupt is taken
            self.halted = true;
            self.pc = self.pc.wrapping_sub(1);
            4
        } else {
            // LD r, r'
            let val = self.get_reg(z);
            self.set_reg(y, val);
            if y == 6 || z == 6 {
                7
            } else {
                4
            }
        }
    }

    fn execute_x2(&mut self, y: u8, z: u8) -> u32 {
        let val = self.get_reg(z);
        execute_alu(self, y, val);
        if z == 6 {
            7
        } else {
            4
        }
    }

    fn execute_x3(&mut self, _opcode: u8, y: u8, z: u8, p: u8, q: u8) -> u32 {
        dispatch_z!(
            z,
            execute_x3_ret_cc(self, y),
            execute_x3_pop_ret_exx(self, p, q),
            execute_x3_jp_cc(self, y),
            execute_x3_jp_out_ex_di_ei(self, y),
            execute_x3_call_cc(self, y),
            execute_x3_push_call(self, p, q),
            execute_x3_alu_n(self, y),
            execute_x3_rst(self, y)
        )
    }
}

/// Shared ALU dispatch for the x2 block, ALU n, and the indexed forms.
pub(crate) fn execute_alu<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, op: u8, val: u8) {
    match op {
        0 => cpu.add_a(val, false),        // ADD A
        1 => cpu.add_a(val, true),         // ADC A
        2 => cpu.sub_a(val, false, true),  // SUB
        3 => cpu.sub_a(val, true, true),   // SBC A
        4 => cpu.and_a(val),               // AND
        5 => cpu.xor_a(val),               // XOR
        6 => cpu.or_a(val),                // OR
        7 => cpu.sub_a(val, false, false), // CP
        _ => {}
    }
}

fn execute_x0_control_misc<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    match y {
        0 => 4, // NOP
        1 => {
            // EX AF, AF'
            std::mem::swap(&mut cpu.a, &mut cpu.a_prime);
            std::mem::swap(&mut cpu.f, &mut cpu.f_prime);
            4
        }
        2 => {
            // DJNZ e
            cpu.b = cpu.b.wrapping_sub(1);
            if cpu.b != 0 {
                let d = cpu.fetch_displacement();
                cpu.pc = cpu.pc.wrapping_add(d as u16);
                13
            } else {
                cpu.pc = cpu.pc.wrapping_add(1);
                8
            }
        }
        3 => {
            // JR e
            let d = cpu.fetch_displacement();
            cpu.pc = cpu.pc.wrapping_add(d as u16);
            cpu.memptr = cpu.pc;
            12
        }
        4..=7 => {
            // JR cc, e: MEMPTR is latched only on the taken path
            if cpu.check_condition(y - 4) {
                let d = cpu.fetch_displacement();
                cpu.pc = cpu.pc.wrapping_add(d as u16);
                cpu.memptr = cpu.pc;
                12
            } else {
                cpu.pc = cpu.pc.wrapping_add(1);
                7
            }
        }
        _ => 4,
    }
}

fn execute_x0_ld_rp_add_hl<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    p: u8,
    q: u8,
) -> u32 {
    if q == 0 {
        // LD rp, nn
        let nn = cpu.fetch_word();
        cpu.set_rp(p, nn);
        10
    } else {
        // ADD HL, rp
        let hl = cpu.hl();
        let rp = cpu.get_rp(p);
        cpu.memptr = hl.wrapping_add(1);
        let result = cpu.add16(hl, rp);
        cpu.set_hl(result);
        11
    }
}

fn execute_x0_load_indirect<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    p: u8,
    q: u8,
) -> u32 {
    match (p, q) {
        (0, 0) => {
            // LD (BC), A
            let addr = cpu.bc();
            cpu.write_byte(addr, cpu.a);
            cpu.memptr = (cpu.a as u16) << 8 | addr.wrapping_add(1) & 0xFF;
            7
        }
        (0, 1) => {
            // LD A, (BC)
            let addr = cpu.bc();
            cpu.a = cpu.read_byte(addr);
            cpu.memptr = addr.wrapping_add(1);
            7
        }
        (1, 0) => {
            // LD (DE), A
            let addr = cpu.de();
            cpu.write_byte(addr, cpu.a);
            cpu.memptr = (cpu.a as u16) << 8 | addr.wrapping_add(1) & 0xFF;
            7
        }
        (1, 1) => {
            // LD A, (DE)
            let addr = cpu.de();
            cpu.a = cpu.read_byte(addr);
            cpu.memptr = addr.wrapping_add(1);
            7
        }
        (2, 0) => {
            // LD (nn), HL
            let addr = cpu.fetch_word();
            let hl = cpu.hl();
            cpu.write_word(addr, hl);
            cpu.memptr = addr.wrapping_add(1);
            16
        }
        (2, 1) => {
            // LD HL, (nn)
            let addr = cpu.fetch_word();
            let val = cpu.read_word(addr);
            cpu.set_hl(val);
            cpu.memptr = addr.wrapping_add(1);
            16
        }
        (3, 0) => {
            // LD (nn), A
            let addr = cpu.fetch_word();
            cpu.write_byte(addr, cpu.a);
            cpu.memptr = (cpu.a as u16) << 8 | addr.wrapping_add(1) & 0xFF;
            13
        }
        (3, 1) => {
            // LD A, (nn)
            let addr = cpu.fetch_word();
            cpu.a = cpu.read_byte(addr);
            cpu.memptr = addr.wrapping_add(1);
            13
        }
        _ => 4,
    }
}

fn execute_x0_inc_dec_rp<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    p: u8,
    q: u8,
) -> u32 {
    // 16-bit INC/DEC touch no flags
    let rp = cpu.get_rp(p);
    if q == 0 {
        cpu.set_rp(p, rp.wrapping_add(1));
    } else {
        cpu.set_rp(p, rp.wrapping_sub(1));
    }
    6
}

fn execute_x0_inc_r<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    let val = cpu.get_reg(y);
    let result = cpu.inc8(val);
    cpu.set_reg(y, result);
    if y == 6 {
        11
    } else {
        4
    }
}

fn execute_x0_dec_r<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    let val = cpu.get_reg(y);
    let result = cpu.dec8(val);
    cpu.set_reg(y, result);
    if y == 6 {
        11
    } else {
        4
    }
}

fn execute_x0_ld_r_n<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    let n = cpu.fetch_byte();
    cpu.set_reg(y, n);
    if y == 6 {
        10
    } else {
        7
    }
}

fn execute_x0_accum_flag_ops<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    y: u8,
) -> u32 {
    match y {
        0 => cpu.rlca(),
        1 => cpu.rrca(),
        2 => cpu.rla(),
        3 => cpu.rra(),
        4 => cpu.daa(),
        5 => cpu.cpl(),
        6 => cpu.scf(),
        7 => cpu.ccf(),
        _ => {}
    }
    4
}

fn execute_x3_ret_cc<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    if cpu.check_condition(y) {
        cpu.pc = cpu.pop();
        cpu.memptr = cpu.pc;
        11
    } else {
        5
    }
}

fn execute_x3_pop_ret_exx<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    p: u8,
    q: u8,
) -> u32 {
    if q == 0 {
        // POP rp2
        let val = cpu.pop();
        cpu.set_rp2(p, val);
        10
    } else {
        match p {
            0 => {
                // RET
                cpu.pc = cpu.pop();
                cpu.memptr = cpu.pc;
                10
            }
            1 => {
                // EXX
                std::mem::swap(&mut cpu.b, &mut cpu.b_prime);
                std::mem::swap(&mut cpu.c, &mut cpu.c_prime);
                std::mem::swap(&mut cpu.d, &mut cpu.d_prime);
                std::mem::swap(&mut cpu.e, &mut cpu.e_prime);
                std::mem::swap(&mut cpu.h, &mut cpu.h_prime);
                std::mem::swap(&mut cpu.l, &mut cpu.l_prime);
                4
            }
            2 => {
                // JP (HL)
                cpu.pc = cpu.hl();
                4
            }
            3 => {
                // LD SP, HL
                cpu.sp = cpu.hl();
                6
            }
            _ => 4,
        }
    }
}

fn execute_x3_jp_cc<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    // MEMPTR gets the target whether or not the jump is taken
    let addr = cpu.fetch_word();
    cpu.memptr = addr;
    if cpu.check_condition(y) {
        cpu.pc = addr;
    }
    10
}

fn execute_x3_jp_out_ex_di_ei<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    y: u8,
) -> u32 {
    match y {
        0 => {
            // JP nn
            let addr = cpu.fetch_word();
            cpu.pc = addr;
            cpu.memptr = addr;
            10
        }
        1 => 4, // 0xCB is consumed by the step driver
        2 => {
            // OUT (n), A
            let n = cpu.fetch_byte();
            let port = (cpu.a as u16) << 8 | n as u16;
            cpu.write_port(port, cpu.a);
            cpu.memptr = (cpu.a as u16) << 8 | n.wrapping_add(1) as u16;
            11
        }
        3 => {
            // IN A, (n)
            let n = cpu.fetch_byte();
            let port = (cpu.a as u16) << 8 | n as u16;
            cpu.a = cpu.read_port(port);
            cpu.memptr = (cpu.a as u16) << 8 | n.wrapping_add(1) as u16;
            11
        }
        4 => {
            // EX (SP), HL
            let sp = cpu.sp;
            let val = cpu.read_word(sp);
            let hl = cpu.hl();
            cpu.write_word(sp, hl);
            cpu.set_hl(val);
            cpu.memptr = val;
            19
        }
        5 => {
            // EX DE, HL
            std::mem::swap(&mut cpu.d, &mut cpu.h);
            std::mem::swap(&mut cpu.e, &mut cpu.l);
            4
        }
        6 => {
            // DI
            cpu.iff1 = false;
            cpu.iff2 = false;
            4
        }
        7 => {
            // EI; acceptance is deferred until after the next instruction
            cpu.iff1 = true;
            cpu.iff2 = true;
            cpu.ei_pending = true;
            4
        }
        _ => 4,
    }
}

fn execute_x3_call_cc<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    let addr = cpu.fetch_word();
    cpu.memptr = addr;
    if cpu.check_condition(y) {
        cpu.push(cpu.pc);
        cpu.pc = addr;
        17
    } else {
        10
    }
}

fn execute_x3_push_call<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    p: u8,
    q: u8,
) -> u32 {
    if q == 0 {
        // PUSH rp2
        let val = cpu.get_rp2(p);
        cpu.push(val);
        11
    } else {
        match p {
            0 => {
                // CALL nn
                let addr = cpu.fetch_word();
                cpu.push(cpu.pc);
                cpu.pc = addr;
                cpu.memptr = addr;
                17
            }
            // 0xDD / 0xED / 0xFD are consumed by the step driver
            _ => 4,
        }
    }
}

fn execute_x3_alu_n<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    let n = cpu.fetch_byte();
    execute_alu(cpu, y, n);
    7
}

fn execute_x3_rst<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    cpu.push(cpu.pc);
    cpu.pc = (y as u16) * 8;
    cpu.memptr = cpu.pc;
    11
}
