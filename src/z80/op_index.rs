//! DD/FD-prefixed opcodes: IX and IY instructions.
//!
//! Both prefixes share one decoder parameterized on which index register is
//! live. Sub-opcodes with no indexed meaning fall through to the unprefixed
//! table, with the orphaned prefix costing its 4 T-states and R increment -
//! the "prefix acts as NOP" behavior of the real chip.

use crate::memory::{IoInterface, MemoryInterface};
use crate::z80::op_cb::CbOps;
use crate::z80::op_general::execute_alu;
use crate::z80::Z80;

pub trait IndexOps {
    fn execute_dd_prefix(&mut self, opcode: u8) -> u32;
    fn execute_fd_prefix(&mut self, opcode: u8) -> u32;
}

impl<M: MemoryInterface, I: IoInterface> IndexOps for Z80<M, I> {
    fn execute_dd_prefix(&mut self, opcode: u8) -> u32 {
        execute_index_prefix(self, opcode, true)
    }

    fn execute_fd_prefix(&mut self, opcode: u8) -> u32 {
        execute_index_prefix(self, opcode, false)
    }
}

fn get_index_val<M: MemoryInterface, I: IoInterface>(cpu: &Z80<M, I>, is_ix: bool) -> u16 {
    if is_ix {
        cpu.ix
    } else {
        cpu.iy
    }
}

fn set_index_val<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, val: u16, is_ix: bool) {
    if is_ix {
        cpu.ix = val;
    } else {
        cpu.iy = val;
    }
}

fn get_index_h<M: MemoryInterface, I: IoInterface>(cpu: &Z80<M, I>, is_ix: bool) -> u8 {
    if is_ix {
        cpu.ixh()
    } else {
        cpu.iyh()
    }
}

fn set_index_h<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, val: u8, is_ix: bool) {
    if is_ix {
        cpu.set_ixh(val);
    } else {
        cpu.set_iyh(val);
    }
}

fn get_index_l<M: MemoryInterface, I: IoInterface>(cpu: &Z80<M, I>, is_ix: bool) -> u8 {
    if is_ix {
        cpu.ixl()
    } else {
        cpu.iyl()
    }
}

fn set_index_l<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, val: u8, is_ix: bool) {
    if is_ix {
        cpu.set_ixl(val);
    } else {
        cpu.set_iyl(val);
    }
}

/// Effective address of an (IX+d)/(IY+d) operand; latches MEMPTR.
fn calc_index_addr<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    offset: i8,
    is_ix: bool,
) -> u16 {
    let addr = get_index_val(cpu, is_ix).wrapping_add(offset as u16);
    cpu.memptr = addr;
    addr
}

fn execute_index_add_16<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    // ADD IX/IY, rp with the index register itself in the HL slot
    let idx = get_index_val(cpu, is_ix);
    let rp = match opcode {
        0x09 => cpu.bc(),
        0x19 => cpu.de(),
        0x29 => idx,
        _ => cpu.sp,
    };
    cpu.memptr = idx.wrapping_add(1);
    let result = cpu.add16(idx, rp);
    set_index_val(cpu, result, is_ix);
    15
}

fn execute_index_load_store_16<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    match opcode {
        0x21 => {
            // LD IX, nn
            let val = cpu.fetch_word();
            set_index_val(cpu, val, is_ix);
            14
        }
        0x22 => {
            // LD (nn), IX
            let addr = cpu.fetch_word();
            let val = get_index_val(cpu, is_ix);
            cpu.write_word(addr, val);
            cpu.memptr = addr.wrapping_add(1);
            20
        }
        0x2A => {
            // LD IX, (nn)
            let addr = cpu.fetch_word();
            let val = cpu.read_word(addr);
            set_index_val(cpu, val, is_ix);
            cpu.memptr = addr.wrapping_add(1);
            20
        }
        _ => 8,
    }
}

fn execute_index_inc_dec_16<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    let val = get_index_val(cpu, is_ix);
    if opcode == 0x23 {
        set_index_val(cpu, val.wrapping_add(1), is_ix);
    } else {
        set_index_val(cpu, val.wrapping_sub(1), is_ix);
    }
    10
}

fn execute_index_8bit_halves<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    // Undocumented INC/DEC/LD on IXH/IXL/IYH/IYL
    match opcode {
        0x24 => {
            let val = get_index_h(cpu, is_ix);
            let res = cpu.inc8(val);
            set_index_h(cpu, res, is_ix);
            8
        }
        0x25 => {
            let val = get_index_h(cpu, is_ix);
            let res = cpu.dec8(val);
            set_index_h(cpu, res, is_ix);
            8
        }
        0x26 => {
            let n = cpu.fetch_byte();
            set_index_h(cpu, n, is_ix);
            11
        }
        0x2C => {
            let val = get_index_l(cpu, is_ix);
            let res = cpu.inc8(val);
            set_index_l(cpu, res, is_ix);
            8
        }
        0x2D => {
            let val = get_index_l(cpu, is_ix);
            let res = cpu.dec8(val);
            set_index_l(cpu, res, is_ix);
            8
        }
        0x2E => {
            let n = cpu.fetch_byte();
            set_index_l(cpu, n, is_ix);
            11
        }
        _ => 8,
    }
}

fn execute_index_mem_rmw<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    let d = cpu.fetch_displacement();
    let addr = calc_index_addr(cpu, d, is_ix);
    match opcode {
        0x34 => {
            // INC (IX+d)
            let val = cpu.read_byte(addr);
            let result = cpu.inc8(val);
            cpu.write_byte(addr, result);
            23
        }
        0x35 => {
            // DEC (IX+d)
            let val = cpu.read_byte(addr);
            let result = cpu.dec8(val);
            cpu.write_byte(addr, result);
            23
        }
        0x36 => {
            // LD (IX+d), n
            let n = cpu.fetch_byte();
            cpu.write_byte(addr, n);
            19
        }
        _ => 8,
    }
}

fn execute_index_alu_mem<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    let d = cpu.fetch_displacement();
    let addr = calc_index_addr(cpu, d, is_ix);
    let val = cpu.read_byte(addr);
    execute_alu(cpu, (opcode >> 3) & 0x07, val);
    19
}

fn execute_index_load_r_mem<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    let d = cpu.fetch_displacement();
    let addr = calc_index_addr(cpu, d, is_ix);
    let val = cpu.read_byte(addr);
    cpu.set_reg((opcode >> 3) & 0x07, val);
    19
}

fn execute_index_load_mem_r<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    let d = cpu.fetch_displacement();
    let addr = calc_index_addr(cpu, d, is_ix);
    let val = cpu.get_reg(opcode & 0x07);
    cpu.write_byte(addr, val);
    19
}

fn execute_index_stack_control<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    match opcode {
        0xE1 => {
            // POP IX
            let val = cpu.pop();
            set_index_val(cpu, val, is_ix);
            14
        }
        0xE3 => {
            // EX (SP), IX
            let sp = cpu.sp;
            let val = cpu.read_word(sp);
            let idx = get_index_val(cpu, is_ix);
            cpu.write_word(sp, idx);
            set_index_val(cpu, val, is_ix);
            cpu.memptr = val;
            23
        }
        0xE5 => {
            // PUSH IX
            let idx = get_index_val(cpu, is_ix);
            cpu.push(idx);
            15
        }
        0xE9 => {
            // JP (IX)
            cpu.pc = get_index_val(cpu, is_ix);
            8
        }
        0xF9 => {
            // LD SP, IX
            cpu.sp = get_index_val(cpu, is_ix);
            10
        }
        _ => 8,
    }
}

fn execute_index_undoc_load<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    // LD r, r' with H/L replaced by the index halves
    let val = get_index_byte(cpu, opcode & 0x07, is_ix);
    set_index_byte(cpu, (opcode >> 3) & 0x07, val, is_ix);
    8
}

fn execute_index_undoc_alu<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    let val = get_index_byte(cpu, opcode & 0x07, is_ix);
    execute_alu(cpu, (opcode >> 3) & 0x07, val);
    8
}

fn execute_index_ddcb<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    is_ix: bool,
) -> u32 {
    // DD CB d op: the displacement comes before the final opcode, and that
    // final byte is not an M1 fetch - R advances only for the two prefixes.
    let d = cpu.fetch_displacement();
    let addr = calc_index_addr(cpu, d, is_ix);
    let opcode = cpu.fetch_byte();
    cpu.execute_indexed_cb(opcode, addr)
}

fn execute_index_prefix<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    opcode: u8,
    is_ix: bool,
) -> u32 {
    match opcode {
        0x09 | 0x19 | 0x29 | 0x39 => execute_index_add_16(cpu, opcode, is_ix),
        0x21 | 0x22 | 0x2A => execute_index_load_store_16(cpu, opcode, is_ix),
        0x23 | 0x2B => execute_index_inc_dec_16(cpu, opcode, is_ix),
        0x24 | 0x25 | 0x26 | 0x2C | 0x2D | 0x2E => execute_index_8bit_halves(cpu, opcode, is_ix),
        0x34..=0x36 => execute_index_mem_rmw(cpu, opcode, is_ix),

        // LD r, (IX+d)
        0x46 | 0x4E | 0x56 | 0x5E | 0x66 | 0x6E | 0x7E => {
            execute_index_load_r_mem(cpu, opcode, is_ix)
        }
        // LD (IX+d), r
        0x70..=0x75 | 0x77 => execute_index_load_mem_r(cpu, opcode, is_ix),

        0x76 => {
            // DD HALT behaves as HALT behind a 4-T prefix
            cpu.halted = true;
            cpu.pc = cpu.pc.wrapping_sub(1);
            8
        }

        // Remaining loads in the 0x40..0x7F block use the index halves
        0x40..=0x7F => execute_index_undoc_load(cpu, opcode, is_ix),

        // ALU A, (IX+d)
        0x86 | 0x8E | 0x96 | 0x9E | 0xA6 | 0xAE | 0xB6 | 0xBE => {
            execute_index_alu_mem(cpu, opcode, is_ix)
        }
        // Remaining ALU in the 0x80..0xBF block uses the index halves
        0x80..=0xBF => execute_index_undoc_alu(cpu, opcode, is_ix),

        0xE1 | 0xE3 | 0xE5 | 0xE9 | 0xF9 => execute_index_stack_control(cpu, opcode, is_ix),

        0xCB => execute_index_ddcb(cpu, is_ix),

        // A chained prefix resolves as prefix + NOP
        0xDD | 0xED | 0xFD => 8,

        // Everything else: the prefix is a 4-T no-op and the sub-opcode
        // executes from the unprefixed table
        _ => 4 + cpu.execute_unprefixed(opcode),
    }
}

fn get_index_byte<M: MemoryInterface, I: IoInterface>(cpu: &Z80<M, I>, r: u8, is_ix: bool) -> u8 {
    match r {
        0 => cpu.b,
        1 => cpu.c,
        2 => cpu.d,
        3 => cpu.e,
        4 => get_index_h(cpu, is_ix),
        5 => get_index_l(cpu, is_ix),
        7 => cpu.a,
        _ => 0,
    }
}

fn set_index_byte<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    r: u8,
    val: u8,
    is_ix: bool,
) {
    match r {
        0 => cpu.b = val,
        1 => cpu.c = val,
        2 => cpu.d = val,
        3 => cpu.e = val,
        4 => set_index_h(cpu, val, is_ix),
        5 => set_index_l(cpu, val, is_ix),
        7 => cpu.a = val,
        _ => {}
    }
}
