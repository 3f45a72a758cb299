//! Shift and rotate handlers.
//!
//! All eight operations shift by one place. The operand size lives in
//! the low two bits of the size nibble: 0 = byte, 1 = word, 3 = long.
//! The bit shifted out always lands in C. Only SHAL can overflow; every
//! other operation clears V.

use crate::cpu::H8300h;
use crate::flags;

/// Operand size selected by an 0x10-0x13 column opcode.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Size {
    Byte,
    Word,
    Long,
}

impl H8300h {
    fn shift_size(&self) -> Size {
        match (self.op[0] >> 4) & 0x03 {
            0x0 => Size::Byte,
            0x1 => Size::Word,
            _ => Size::Long,
        }
    }

    /// Run a byte/word/long shift through one closure per size, then
    /// set C from the ejected bit and N/Z/V from the result.
    fn shift_op(
        &mut self,
        f8: impl Fn(u8, bool) -> (u8, bool),
        f16: impl Fn(u16, bool) -> (u16, bool),
        f32: impl Fn(u32, bool) -> (u32, bool),
        overflow: bool,
    ) {
        let carry_in = self.regs.ccr.is_set(flags::C);
        match self.shift_size() {
            Size::Byte => {
                let rd = (self.op[0] & 0x0F) as u8;
                let a = self.regs.read8(rd);
                let (result, carry) = f8(a, carry_in);
                self.regs.ccr.set_if(flags::C, carry);
                self.regs
                    .ccr
                    .set_if(flags::V, overflow && (a ^ result) & 0x80 != 0);
                self.regs.ccr.update_nz8(result);
                self.regs.write8(rd, result);
            }
            Size::Word => {
                let rd = (self.op[0] & 0x0F) as u8;
                let a = self.regs.read16(rd);
                let (result, carry) = f16(a, carry_in);
                self.regs.ccr.set_if(flags::C, carry);
                self.regs
                    .ccr
                    .set_if(flags::V, overflow && (a ^ result) & 0x8000 != 0);
                self.regs.ccr.update_nz16(result);
                self.regs.write16(rd, result);
            }
            Size::Long => {
                let erd = (self.op[0] & 0x07) as u8;
                let a = self.regs.read32(erd);
                let (result, carry) = f32(a, carry_in);
                self.regs.ccr.set_if(flags::C, carry);
                self.regs
                    .ccr
                    .set_if(flags::V, overflow && (a ^ result) & 0x8000_0000 != 0);
                self.regs.ccr.update_nz32(result);
                self.regs.write32(erd, result);
            }
        }
    }

    // Encoding: 10 0d/1d/3d
    pub(crate) fn exec_shll(&mut self) {
        self.shift_op(
            |a, _| (a << 1, a & 0x80 != 0),
            |a, _| (a << 1, a & 0x8000 != 0),
            |a, _| (a << 1, a & 0x8000_0000 != 0),
            false,
        );
    }

    // Encoding: 10 8d/9d/Bd. Like SHLL but V tracks a sign change.
    pub(crate) fn exec_shal(&mut self) {
        self.shift_op(
            |a, _| (a << 1, a & 0x80 != 0),
            |a, _| (a << 1, a & 0x8000 != 0),
            |a, _| (a << 1, a & 0x8000_0000 != 0),
            true,
        );
    }

    // Encoding: 11 0d/1d/3d
    pub(crate) fn exec_shlr(&mut self) {
        self.shift_op(
            |a, _| (a >> 1, a & 1 != 0),
            |a, _| (a >> 1, a & 1 != 0),
            |a, _| (a >> 1, a & 1 != 0),
            false,
        );
    }

    // Encoding: 11 8d/9d/Bd. The sign bit is replicated.
    pub(crate) fn exec_shar(&mut self) {
        self.shift_op(
            |a, _| ((a >> 1) | (a & 0x80), a & 1 != 0),
            |a, _| ((a >> 1) | (a & 0x8000), a & 1 != 0),
            |a, _| ((a >> 1) | (a & 0x8000_0000), a & 1 != 0),
            false,
        );
    }

    // Encoding: 12 8d/9d/Bd
    pub(crate) fn exec_rotl(&mut self) {
        self.shift_op(
            |a, _| (a.rotate_left(1), a & 0x80 != 0),
            |a, _| (a.rotate_left(1), a & 0x8000 != 0),
            |a, _| (a.rotate_left(1), a & 0x8000_0000 != 0),
            false,
        );
    }

    // Encoding: 13 8d/9d/Bd
    pub(crate) fn exec_rotr(&mut self) {
        self.shift_op(
            |a, _| (a.rotate_right(1), a & 1 != 0),
            |a, _| (a.rotate_right(1), a & 1 != 0),
            |a, _| (a.rotate_right(1), a & 1 != 0),
            false,
        );
    }

    // Encoding: 12 0d/1d/3d. Rotate through carry.
    pub(crate) fn exec_rotxl(&mut self) {
        self.shift_op(
            |a, c| ((a << 1) | u8::from(c), a & 0x80 != 0),
            |a, c| ((a << 1) | u16::from(c), a & 0x8000 != 0),
            |a, c| ((a << 1) | u32::from(c), a & 0x8000_0000 != 0),
            false,
        );
    }

    // Encoding: 13 0d/1d/3d. Rotate through carry.
    pub(crate) fn exec_rotxr(&mut self) {
        self.shift_op(
            |a, c| ((a >> 1) | (u8::from(c) << 7), a & 1 != 0),
            |a, c| ((a >> 1) | (u16::from(c) << 15), a & 1 != 0),
            |a, c| ((a >> 1) | (u32::from(c) << 31), a & 1 != 0),
            false,
        );
    }
}
