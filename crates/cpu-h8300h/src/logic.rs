//! Logic operations and CCR transfers.
//!
//! Logical results set N and Z, clear V, and never touch C or H.

use emu_core::Bus;

use crate::cpu::H8300h;
use crate::flags;

impl H8300h {
    fn logic_flags8(&mut self, result: u8) {
        self.regs.ccr.update_nz8(result);
        self.regs.ccr.clear(flags::V);
    }

    fn logic_flags16(&mut self, result: u16) {
        self.regs.ccr.update_nz16(result);
        self.regs.ccr.clear(flags::V);
    }

    fn logic_flags32(&mut self, result: u32) {
        self.regs.ccr.update_nz32(result);
        self.regs.ccr.clear(flags::V);
    }

    // Encoding: 16 sd (register) / Ed ii (immediate)
    pub(crate) fn exec_and_b(&mut self) {
        let (rd, operand) = if self.op[0] >> 8 == 0x16 {
            let rd = (self.op[0] & 0x0F) as u8;
            (rd, self.regs.read8((self.op[0] >> 4) as u8 & 0x0F))
        } else {
            ((self.op[0] >> 8) as u8 & 0x0F, self.op[0] as u8)
        };
        let result = self.regs.read8(rd) & operand;
        self.logic_flags8(result);
        self.regs.write8(rd, result);
    }

    // Encoding: 66 sd (register) / 796 d + imm16
    pub(crate) fn exec_and_w<B: Bus>(&mut self, bus: &mut B) {
        let rd = (self.op[0] & 0x0F) as u8;
        let operand = if self.op[0] >> 8 == 0x66 {
            self.regs.read16((self.op[0] >> 4) as u8 & 0x0F)
        } else {
            self.fetch16(bus)
        };
        let result = self.regs.read16(rd) & operand;
        self.logic_flags16(result);
        self.regs.write16(rd, result);
    }

    // Encoding: 01F0 66 sd (register) / 7A6 d + imm32
    pub(crate) fn exec_and_l<B: Bus>(&mut self, bus: &mut B) {
        let (erd, operand) = if self.op[0] >> 8 == 0x01 {
            let erd = (self.op[1] & 0x07) as u8;
            (erd, self.regs.read32((self.op[1] >> 4) as u8 & 0x07))
        } else {
            ((self.op[0] & 0x07) as u8, self.fetch32(bus))
        };
        let result = self.regs.read32(erd) & operand;
        self.logic_flags32(result);
        self.regs.write32(erd, result);
    }

    // Encoding: 14 sd (register) / Cd ii (immediate)
    pub(crate) fn exec_or_b(&mut self) {
        let (rd, operand) = if self.op[0] >> 8 == 0x14 {
            let rd = (self.op[0] & 0x0F) as u8;
            (rd, self.regs.read8((self.op[0] >> 4) as u8 & 0x0F))
        } else {
            ((self.op[0] >> 8) as u8 & 0x0F, self.op[0] as u8)
        };
        let result = self.regs.read8(rd) | operand;
        self.logic_flags8(result);
        self.regs.write8(rd, result);
    }

    // Encoding: 64 sd (register) / 794 d + imm16
    pub(crate) fn exec_or_w<B: Bus>(&mut self, bus: &mut B) {
        let rd = (self.op[0] & 0x0F) as u8;
        let operand = if self.op[0] >> 8 == 0x64 {
            self.regs.read16((self.op[0] >> 4) as u8 & 0x0F)
        } else {
            self.fetch16(bus)
        };
        let result = self.regs.read16(rd) | operand;
        self.logic_flags16(result);
        self.regs.write16(rd, result);
    }

    // Encoding: 01F0 64 sd (register) / 7A4 d + imm32
    pub(crate) fn exec_or_l<B: Bus>(&mut self, bus: &mut B) {
        let (erd, operand) = if self.op[0] >> 8 == 0x01 {
            let erd = (self.op[1] & 0x07) as u8;
            (erd, self.regs.read32((self.op[1] >> 4) as u8 & 0x07))
        } else {
            ((self.op[0] & 0x07) as u8, self.fetch32(bus))
        };
        let result = self.regs.read32(erd) | operand;
        self.logic_flags32(result);
        self.regs.write32(erd, result);
    }

    // Encoding: 15 sd (register) / Dd ii (immediate)
    pub(crate) fn exec_xor_b(&mut self) {
        let (rd, operand) = if self.op[0] >> 8 == 0x15 {
            let rd = (self.op[0] & 0x0F) as u8;
            (rd, self.regs.read8((self.op[0] >> 4) as u8 & 0x0F))
        } else {
            ((self.op[0] >> 8) as u8 & 0x0F, self.op[0] as u8)
        };
        let result = self.regs.read8(rd) ^ operand;
        self.logic_flags8(result);
        self.regs.write8(rd, result);
    }

    // Encoding: 65 sd (register) / 795 d + imm16
    pub(crate) fn exec_xor_w<B: Bus>(&mut self, bus: &mut B) {
        let rd = (self.op[0] & 0x0F) as u8;
        let operand = if self.op[0] >> 8 == 0x65 {
            self.regs.read16((self.op[0] >> 4) as u8 & 0x0F)
        } else {
            self.fetch16(bus)
        };
        let result = self.regs.read16(rd) ^ operand;
        self.logic_flags16(result);
        self.regs.write16(rd, result);
    }

    // Encoding: 01F0 65 sd (register) / 7A5 d + imm32
    pub(crate) fn exec_xor_l<B: Bus>(&mut self, bus: &mut B) {
        let (erd, operand) = if self.op[0] >> 8 == 0x01 {
            let erd = (self.op[1] & 0x07) as u8;
            (erd, self.regs.read32((self.op[1] >> 4) as u8 & 0x07))
        } else {
            ((self.op[0] & 0x07) as u8, self.fetch32(bus))
        };
        let result = self.regs.read32(erd) ^ operand;
        self.logic_flags32(result);
        self.regs.write32(erd, result);
    }

    // Encoding: 17 0d (byte) / 17 1d (word) / 17 3d (long)
    pub(crate) fn exec_not(&mut self) {
        match (self.op[0] >> 4) & 0x0F {
            0x0 => {
                let rd = (self.op[0] & 0x0F) as u8;
                let result = !self.regs.read8(rd);
                self.logic_flags8(result);
                self.regs.write8(rd, result);
            }
            0x1 => {
                let rd = (self.op[0] & 0x0F) as u8;
                let result = !self.regs.read16(rd);
                self.logic_flags16(result);
                self.regs.write16(rd, result);
            }
            _ => {
                let erd = (self.op[0] & 0x07) as u8;
                let result = !self.regs.read32(erd);
                self.logic_flags32(result);
                self.regs.write32(erd, result);
            }
        }
    }

    // Encoding: 04 ii
    pub(crate) fn exec_orc(&mut self) {
        self.regs.ccr.0 |= self.op[0] as u8;
    }

    // Encoding: 05 ii
    pub(crate) fn exec_xorc(&mut self) {
        self.regs.ccr.0 ^= self.op[0] as u8;
    }

    // Encoding: 06 ii
    pub(crate) fn exec_andc(&mut self) {
        self.regs.ccr.0 &= self.op[0] as u8;
    }

    // Encoding: 07 ii
    pub(crate) fn exec_ldc_imm(&mut self) {
        self.regs.ccr.0 = self.op[0] as u8;
    }

    // Encoding: 03 0s
    pub(crate) fn exec_ldc_b(&mut self) {
        self.regs.ccr.0 = self.regs.read8((self.op[0] & 0x0F) as u8);
    }

    // Encoding: 02 0d
    pub(crate) fn exec_stc_b(&mut self) {
        let value = self.regs.ccr.0;
        self.regs.write8((self.op[0] & 0x0F) as u8, value);
    }

    // Encoding: 0140 + 69/6B/6D/6F second word. Word-sized CCR moves:
    // the CCR travels in the upper byte of the transferred word.
    pub(crate) fn exec_ldc_stc_mem<B: Bus>(&mut self, bus: &mut B) {
        let store = self.op[1] & 0x0080 != 0;
        let address = match self.op[1] >> 8 {
            0x69 => self.regs.read32((self.op[1] >> 4) as u8 & 0x07) as u16,
            0x6B => {
                if (self.op[1] >> 4) & 0x02 == 0 {
                    self.fetch16(bus)
                } else {
                    self.fetch32(bus) as u16
                }
            }
            0x6D => {
                let er = (self.op[1] >> 4) as u8 & 0x07;
                if store {
                    // Pre-decrement for the push direction.
                    let address = self.regs.read32(er).wrapping_sub(2);
                    self.regs.write32(er, address);
                    address as u16
                } else {
                    // Post-increment for the pop direction.
                    let address = self.regs.read32(er);
                    self.regs.write32(er, address.wrapping_add(2));
                    address as u16
                }
            }
            _ => {
                let er = (self.op[1] >> 4) as u8 & 0x07;
                let disp = i32::from(self.fetch16(bus) as i16);
                self.regs.read32(er).wrapping_add_signed(disp) as u16
            }
        };

        if store {
            let ccr = u16::from(self.regs.ccr.0);
            bus.write16(address, (ccr << 8) | ccr);
        } else {
            self.regs.ccr.0 = (bus.read16(address) >> 8) as u8;
        }
    }
}
