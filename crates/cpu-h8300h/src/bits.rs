//! Bit manipulation handlers.
//!
//! Each operation exists in three operand forms sharing one handler:
//! register direct (single word), @ERd (0x7C/0x7D prefix) and @aa:8 in
//! the top page (0x7E/0x7F prefix). The word carrying the sub-opcode is
//! the first word for register forms and the second for memory forms.
//! The bit number comes from a register for the 0x60-0x63 sub-opcodes
//! and from a 3-bit immediate otherwise; bit 7 of the spec word selects
//! the inverted variants (BIAND, BILD, BIST, ...).

use emu_core::Bus;

use crate::cpu::H8300h;
use crate::flags;

/// Where the operand byte lives.
#[derive(Clone, Copy)]
enum Operand {
    Reg(u8),
    Mem(u16),
}

impl H8300h {
    fn bit_operand(&self) -> Operand {
        match self.op[0] >> 8 {
            0x60..=0x77 => Operand::Reg((self.op[0] & 0x0F) as u8),
            0x7C | 0x7D => {
                Operand::Mem(self.regs.read32((self.op[0] >> 4) as u8 & 0x07) as u16)
            }
            _ => Operand::Mem(0xFF00 | (self.op[0] & 0x00FF)),
        }
    }

    /// The word holding the sub-opcode, bit field and inversion bit.
    fn bit_spec(&self) -> u16 {
        if self.op[0] >> 8 >= 0x7C {
            self.op[1]
        } else {
            self.op[0]
        }
    }

    /// Bit number: register contents for 0x60-0x63 sub-opcodes,
    /// immediate field otherwise. Only the low three bits matter.
    fn bit_number(&self, spec: u16) -> u8 {
        if (0x60..=0x63).contains(&(spec >> 8)) {
            self.regs.read8((spec >> 4) as u8 & 0x0F) & 0x07
        } else {
            (spec >> 4) as u8 & 0x07
        }
    }

    fn read_operand<B: Bus>(&mut self, operand: Operand, bus: &mut B) -> u8 {
        match operand {
            Operand::Reg(r) => self.regs.read8(r),
            Operand::Mem(address) => bus.read8(address),
        }
    }

    fn write_operand<B: Bus>(&mut self, operand: Operand, bus: &mut B, value: u8) {
        match operand {
            Operand::Reg(r) => self.regs.write8(r, value),
            Operand::Mem(address) => bus.write8(address, value),
        }
    }

    // Encoding: 60 nd / 70 i0d, plus the 7D/7F memory prefixes
    pub(crate) fn exec_bset<B: Bus>(&mut self, bus: &mut B) {
        let spec = self.bit_spec();
        let operand = self.bit_operand();
        let bit = self.bit_number(spec);
        let value = self.read_operand(operand, bus);
        self.write_operand(operand, bus, value | (1 << bit));
    }

    // Encoding: 62 nd / 72 i0d, plus the 7D/7F memory prefixes
    pub(crate) fn exec_bclr<B: Bus>(&mut self, bus: &mut B) {
        let spec = self.bit_spec();
        let operand = self.bit_operand();
        let bit = self.bit_number(spec);
        let value = self.read_operand(operand, bus);
        self.write_operand(operand, bus, value & !(1 << bit));
    }

    // Encoding: 61 nd / 71 i0d, plus the 7D/7F memory prefixes
    pub(crate) fn exec_bnot<B: Bus>(&mut self, bus: &mut B) {
        let spec = self.bit_spec();
        let operand = self.bit_operand();
        let bit = self.bit_number(spec);
        let value = self.read_operand(operand, bus);
        self.write_operand(operand, bus, value ^ (1 << bit));
    }

    // Encoding: 63 nd / 73 i0d, plus the 7C/7E memory prefixes.
    // Z reflects the inverse of the tested bit.
    pub(crate) fn exec_btst<B: Bus>(&mut self, bus: &mut B) {
        let spec = self.bit_spec();
        let operand = self.bit_operand();
        let bit = self.bit_number(spec);
        let value = self.read_operand(operand, bus);
        self.regs.ccr.set_if(flags::Z, value & (1 << bit) == 0);
    }

    // Encoding: 77 i0d (BLD) / 77 1id (BILD), plus 7C/7E prefixes
    pub(crate) fn exec_bld<B: Bus>(&mut self, bus: &mut B) {
        let spec = self.bit_spec();
        let operand = self.bit_operand();
        let bit = self.bit_number(spec);
        let value = self.read_operand(operand, bus);
        let mut loaded = value & (1 << bit) != 0;
        if spec & 0x0080 != 0 {
            loaded = !loaded;
        }
        self.regs.ccr.set_if(flags::C, loaded);
    }

    // Encoding: 67 i0d (BST) / 67 1id (BIST), plus 7D/7F prefixes
    pub(crate) fn exec_bst<B: Bus>(&mut self, bus: &mut B) {
        let spec = self.bit_spec();
        let operand = self.bit_operand();
        let bit = self.bit_number(spec);
        let mut stored = self.regs.ccr.is_set(flags::C);
        if spec & 0x0080 != 0 {
            stored = !stored;
        }
        let value = self.read_operand(operand, bus);
        let value = if stored {
            value | (1 << bit)
        } else {
            value & !(1 << bit)
        };
        self.write_operand(operand, bus, value);
    }

    // Encoding: 76 i0d (BAND) / 76 1id (BIAND), plus 7C/7E prefixes
    pub(crate) fn exec_band<B: Bus>(&mut self, bus: &mut B) {
        let spec = self.bit_spec();
        let operand = self.bit_operand();
        let bit = self.bit_number(spec);
        let value = self.read_operand(operand, bus);
        let mut tested = value & (1 << bit) != 0;
        if spec & 0x0080 != 0 {
            tested = !tested;
        }
        let carry = self.regs.ccr.is_set(flags::C) && tested;
        self.regs.ccr.set_if(flags::C, carry);
    }

    // Encoding: 74 i0d (BOR) / 74 1id (BIOR), plus 7C/7E prefixes
    pub(crate) fn exec_bor<B: Bus>(&mut self, bus: &mut B) {
        let spec = self.bit_spec();
        let operand = self.bit_operand();
        let bit = self.bit_number(spec);
        let value = self.read_operand(operand, bus);
        let mut tested = value & (1 << bit) != 0;
        if spec & 0x0080 != 0 {
            tested = !tested;
        }
        let carry = self.regs.ccr.is_set(flags::C) || tested;
        self.regs.ccr.set_if(flags::C, carry);
    }

    // Encoding: 75 i0d (BXOR) / 75 1id (BIXOR), plus 7C/7E prefixes
    pub(crate) fn exec_bxor<B: Bus>(&mut self, bus: &mut B) {
        let spec = self.bit_spec();
        let operand = self.bit_operand();
        let bit = self.bit_number(spec);
        let value = self.read_operand(operand, bus);
        let mut tested = value & (1 << bit) != 0;
        if spec & 0x0080 != 0 {
            tested = !tested;
        }
        let carry = self.regs.ccr.is_set(flags::C) != tested;
        self.regs.ccr.set_if(flags::C, carry);
    }
}
