//! ED-prefixed opcodes: 16-bit arithmetic and (nn) loads, port I/O through
//! BC, interrupt-mode control, RRD/RLD, and the block instructions.
//!
//! Block-repeat forms execute a single iteration per `step` and rewind PC by
//! two while unfinished, so interrupts stay serviceable between iterations
//! and the 21/16 T-state split falls out naturally.

use crate::dispatch_z;
use crate::memory::{IoInterface, MemoryInterface};
use crate::z80::{flags, parity, Z80};

pub trait EdOps {
    fn execute_ed_prefix(&mut self, opcode: u8) -> u32;
}

impl<M: MemoryInterface, I: IoInterface> EdOps for Z80<M, I> {
    fn execute_ed_prefix(&mut self, opcode: u8) -> u32 {
        let x = (opcode >> 6) & 0x03;
        let y = (opcode >> 3) & 0x07;
        let z = opcode & 0x07;
        let p = (y >> 1) & 0x03;
        let q = y & 0x01;

        match x {
            1 => dispatch_z!(
                z,
                execute_ed_in_r_c(self, y),
                execute_ed_out_c_r(self, y),
                execute_ed_sbc_adc_hl(self, p, q),
                execute_ed_ld_rp_nn(self, p, q),
                execute_ed_neg(self),
                execute_ed_retn_reti(self, y),
                execute_ed_im(self, y),
                execute_ed_misc(self, y)
            ),
            2 => execute_ed_block(self, y, z),
            // x=0 and x=3 are NONI: prefix plus a 4-T no-op
            _ => 8,
        }
    }
}

fn execute_ed_in_r_c<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    // IN r, (C); y=6 is the undocumented IN (C) that only sets flags
    let port = cpu.bc();
    let val = cpu.read_port(port);
    if y != 6 {
        cpu.set_reg(y, val);
    }
    cpu.set_flag(flags::HALF_CARRY, false);
    cpu.set_flag(flags::ADD_SUB, false);
    cpu.set_szxypv_flags(val);
    cpu.memptr = port.wrapping_add(1);
    12
}

fn execute_ed_out_c_r<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    // OUT (C), r; y=6 is the undocumented OUT (C), 0
    let port = cpu.bc();
    let val = if y == 6 { 0 } else { cpu.get_reg(y) };
    cpu.write_port(port, val);
    cpu.memptr = port.wrapping_add(1);
    12
}

fn execute_ed_sbc_adc_hl<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    p: u8,
    q: u8,
) -> u32 {
    let rp = cpu.get_rp(p);
    if q == 0 {
        cpu.sbc16(rp);
    } else {
        cpu.adc16(rp);
    }
    15
}

fn execute_ed_ld_rp_nn<M: MemoryInterface, I: IoInterface>(
    cpu: &mut Z80<M, I>,
    p: u8,
    q: u8,
) -> u32 {
    let nn = cpu.fetch_word();
    if q == 0 {
        // LD (nn), rp
        let val = cpu.get_rp(p);
        cpu.write_word(nn, val);
    } else {
        // LD rp, (nn)
        let val = cpu.read_word(nn);
        cpu.set_rp(p, val);
    }
    cpu.memptr = nn.wrapping_add(1);
    20
}

fn execute_ed_neg<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>) -> u32 {
    // NEG, and all its undocumented mirrors
    let a = cpu.a;
    cpu.a = 0;
    cpu.sub_a(a, false, true);
    8
}

fn execute_ed_retn_reti<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    // 0x4D is RETI; every other encoding in this column is a RETN mirror.
    // Only RETN restores IFF1 from the IFF2 copy saved at NMI entry.
    if y != 1 {
        cpu.iff1 = cpu.iff2;
    }
    cpu.pc = cpu.pop();
    cpu.memptr = cpu.pc;
    14
}

fn execute_ed_im<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    cpu.im = match y & 0x03 {
        0 | 1 => 0,
        2 => 1,
        3 => 2,
        _ => 0,
    };
    8
}

fn execute_ed_misc<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    match y {
        0 => {
            // LD I, A
            cpu.i = cpu.a;
            9
        }
        1 => {
            // LD R, A - stores all eight bits
            cpu.r = cpu.a;
            9
        }
        2 => {
            // LD A, I; P/V reflects IFF2
            cpu.a = cpu.i;
            cpu.set_szxy_flags(cpu.a);
            cpu.set_flag(flags::PARITY, cpu.iff2);
            cpu.set_flag(flags::HALF_CARRY, false);
            cpu.set_flag(flags::ADD_SUB, false);
            9
        }
        3 => {
            // LD A, R
            cpu.a = cpu.r;
            cpu.set_szxy_flags(cpu.a);
            cpu.set_flag(flags::PARITY, cpu.iff2);
            cpu.set_flag(flags::HALF_CARRY, false);
            cpu.set_flag(flags::ADD_SUB, false);
            9
        }
        4 => {
            // RRD
            let hl = cpu.hl();
            let m = cpu.read_byte(hl);
            let new_m = (cpu.a << 4) | (m >> 4);
            cpu.a = (cpu.a & 0xF0) | (m & 0x0F);
            cpu.write_byte(hl, new_m);
            cpu.memptr = hl.wrapping_add(1);
            cpu.set_flag(flags::HALF_CARRY, false);
            cpu.set_flag(flags::ADD_SUB, false);
            cpu.set_szxypv_flags(cpu.a);
            18
        }
        5 => {
            // RLD
            let hl = cpu.hl();
            let m = cpu.read_byte(hl);
            let new_m = (m << 4) | (cpu.a & 0x0F);
            cpu.a = (cpu.a & 0xF0) | (m >> 4);
            cpu.write_byte(hl, new_m);
            cpu.memptr = hl.wrapping_add(1);
            cpu.set_flag(flags::HALF_CARRY, false);
            cpu.set_flag(flags::ADD_SUB, false);
            cpu.set_szxypv_flags(cpu.a);
            18
        }
        _ => 8,
    }
}

fn execute_ed_block<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8, z: u8) -> u32 {
    if y >= 4 && z <= 3 {
        dispatch_z!(
            z,
            execute_ldi_ldd(cpu, y),
            execute_cpi_cpd(cpu, y),
            execute_ini_ind(cpu, y),
            execute_outi_outd(cpu, y),
            8,
            8,
            8,
            8
        )
    } else {
        8
    }
}

fn execute_ldi_ldd<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    let hl = cpu.hl();
    let de = cpu.de();
    let val = cpu.read_byte(hl);
    cpu.write_byte(de, val);

    let bc = cpu.bc().wrapping_sub(1);
    cpu.set_bc(bc);

    let (new_hl, new_de) = if (y & 1) == 0 {
        (hl.wrapping_add(1), de.wrapping_add(1)) // LDI
    } else {
        (hl.wrapping_sub(1), de.wrapping_sub(1)) // LDD
    };
    cpu.set_hl(new_hl);
    cpu.set_de(new_de);

    // X/Y come from bits 3 and 1 of (transferred byte + A)
    let n = val.wrapping_add(cpu.a);
    cpu.set_flag(flags::X_FLAG, (n & 0x08) != 0);
    cpu.set_flag(flags::Y_FLAG, (n & 0x02) != 0);
    cpu.set_flag(flags::PARITY, bc != 0);
    cpu.set_flag(flags::HALF_CARRY, false);
    cpu.set_flag(flags::ADD_SUB, false);

    if y >= 6 && bc != 0 {
        // LDIR/LDDR: rewind onto the prefix so the next step re-executes
        cpu.pc = cpu.pc.wrapping_sub(2);
        cpu.memptr = cpu.pc.wrapping_add(1);
        21
    } else {
        16
    }
}

fn execute_cpi_cpd<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    let hl = cpu.hl();
    let val = cpu.read_byte(hl);
    let result = cpu.a.wrapping_sub(val);

    let bc = cpu.bc().wrapping_sub(1);
    cpu.set_bc(bc);

    if (y & 1) == 0 {
        cpu.set_hl(hl.wrapping_add(1)); // CPI
        cpu.memptr = cpu.memptr.wrapping_add(1);
    } else {
        cpu.set_hl(hl.wrapping_sub(1)); // CPD
        cpu.memptr = cpu.memptr.wrapping_sub(1);
    }

    let half = (cpu.a & 0x0F) < (val & 0x0F);
    cpu.set_sz_flags(result);
    cpu.set_flag(flags::HALF_CARRY, half);
    cpu.set_flag(flags::PARITY, bc != 0);
    cpu.set_flag(flags::ADD_SUB, true);

    // X/Y come from bits 3 and 1 of (A - value - H)
    let n = if half {
        result.wrapping_sub(1)
    } else {
        result
    };
    cpu.set_flag(flags::X_FLAG, (n & 0x08) != 0);
    cpu.set_flag(flags::Y_FLAG, (n & 0x02) != 0);

    if y >= 6 && bc != 0 && result != 0 {
        cpu.pc = cpu.pc.wrapping_sub(2);
        cpu.memptr = cpu.pc.wrapping_add(1);
        21
    } else {
        16
    }
}

fn execute_ini_ind<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    // INI (y=4), IND (y=5), INIR (y=6), INDR (y=7)
    let port = cpu.bc();
    let hl = cpu.hl();
    let val = cpu.read_port(port);
    cpu.write_byte(hl, val);

    let inc = (y & 1) == 0;
    cpu.memptr = if inc {
        port.wrapping_add(1)
    } else {
        port.wrapping_sub(1)
    };

    let b = cpu.b.wrapping_sub(1);
    cpu.b = b;
    cpu.set_hl(if inc {
        hl.wrapping_add(1)
    } else {
        hl.wrapping_sub(1)
    });

    // Undocumented flag rule: k = value + ((C +/- 1) & 0xFF)
    let k = val as u16
        + if inc {
            cpu.c.wrapping_add(1)
        } else {
            cpu.c.wrapping_sub(1)
        } as u16;
    cpu.set_szxy_flags(b);
    cpu.set_flag(flags::ADD_SUB, (val & 0x80) != 0);
    cpu.set_flag(flags::HALF_CARRY, k > 0xFF);
    cpu.set_flag(flags::CARRY, k > 0xFF);
    cpu.set_flag(flags::PARITY, parity((k & 0x07) as u8 ^ b));

    if y >= 6 && b != 0 {
        cpu.pc = cpu.pc.wrapping_sub(2);
        21
    } else {
        16
    }
}

fn execute_outi_outd<M: MemoryInterface, I: IoInterface>(cpu: &mut Z80<M, I>, y: u8) -> u32 {
    // OUTI (y=4), OUTD (y=5), OTIR (y=6), OTDR (y=7)
    let hl = cpu.hl();
    let val = cpu.read_byte(hl);

    // B decrements before the port write, so the device sees the new count
    let b = cpu.b.wrapping_sub(1);
    cpu.b = b;
    let port = cpu.bc();
    cpu.write_port(port, val);

    let inc = (y & 1) == 0;
    cpu.memptr = if inc {
        port.wrapping_add(1)
    } else {
        port.wrapping_sub(1)
    };
    cpu.set_hl(if inc {
        hl.wrapping_add(1)
    } else {
        hl.wrapping_sub(1)
    });

    // Undocumented flag rule: k = value + new L
    let k = val as u16 + cpu.l as u16;
    cpu.set_szxy_flags(b);
    cpu.set_flag(flags::ADD_SUB, (val & 0x80) != 0);
    cpu.set_flag(flags::HALF_CARRY, k > 0xFF);
    cpu.set_flag(flags::CARRY, k > 0xFF);
    cpu.set_flag(flags::PARITY, parity((k & 0x07) as u8 ^ b));

    if y >= 6 && b != 0 {
        cpu.pc = cpu.pc.wrapping_sub(2);
        21
    } else {
        16
    }
}
