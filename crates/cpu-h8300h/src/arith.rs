//! Additive arithmetic, compare, and multiply/divide handlers.
//!
//! Flag rules for additive operations:
//! - H: carry/borrow out of bit 3 (byte), 11 (word) or 27 (long)
//! - V: operands with matching signs produced a result of the other sign
//!   (addition), or operands with differing signs produced a result with
//!   the sign of the subtrahend (subtraction)
//! - C: unsigned carry/borrow out of the top bit
//!
//! INC/DEC and ADDS/SUBS never touch C or H; ADDS/SUBS set no flags at
//! all. ADDX/SUBX leave Z set only if it was already set and the result
//! is zero (multi-precision chains).

use emu_core::Bus;

use crate::cpu::H8300h;
use crate::flags;

impl H8300h {
    /// Byte addition with flag computation. Returns the result.
    fn add8(&mut self, a: u8, b: u8, carry_in: bool) -> u8 {
        let carry = u16::from(carry_in);
        let wide = u16::from(a) + u16::from(b) + carry;
        let result = wide as u8;

        let ccr = &mut self.regs.ccr;
        ccr.set_if(
            flags::H,
            u16::from(a & 0x0F) + u16::from(b & 0x0F) + carry > 0x0F,
        );
        ccr.set_if(flags::V, (a ^ b) & 0x80 == 0 && (a ^ result) & 0x80 != 0);
        ccr.set_if(flags::C, wide > 0xFF);
        ccr.update_nz8(result);
        result
    }

    /// Word addition with flag computation.
    fn add16(&mut self, a: u16, b: u16) -> u16 {
        let wide = u32::from(a) + u32::from(b);
        let result = wide as u16;

        let ccr = &mut self.regs.ccr;
        ccr.set_if(flags::H, (a & 0x0FFF) + (b & 0x0FFF) > 0x0FFF);
        ccr.set_if(
            flags::V,
            (a ^ b) & 0x8000 == 0 && (a ^ result) & 0x8000 != 0,
        );
        ccr.set_if(flags::C, wide > 0xFFFF);
        ccr.update_nz16(result);
        result
    }

    /// Longword addition with flag computation.
    fn add32(&mut self, a: u32, b: u32) -> u32 {
        let wide = u64::from(a) + u64::from(b);
        let result = wide as u32;

        let ccr = &mut self.regs.ccr;
        ccr.set_if(
            flags::H,
            (a & 0x0FFF_FFFF) + (b & 0x0FFF_FFFF) > 0x0FFF_FFFF,
        );
        ccr.set_if(
            flags::V,
            (a ^ b) & 0x8000_0000 == 0 && (a ^ result) & 0x8000_0000 != 0,
        );
        ccr.set_if(flags::C, wide > 0xFFFF_FFFF);
        ccr.update_nz32(result);
        result
    }

    /// Byte subtraction with flag computation. Returns a - b - borrow.
    pub(crate) fn sub8(&mut self, a: u8, b: u8, borrow_in: bool) -> u8 {
        let borrow = u16::from(borrow_in);
        let result = a.wrapping_sub(b).wrapping_sub(borrow as u8);

        let ccr = &mut self.regs.ccr;
        ccr.set_if(flags::H, u16::from(a & 0x0F) < u16::from(b & 0x0F) + borrow);
        ccr.set_if(flags::V, (a ^ b) & 0x80 != 0 && (a ^ result) & 0x80 != 0);
        ccr.set_if(flags::C, u16::from(a) < u16::from(b) + borrow);
        ccr.update_nz8(result);
        result
    }

    /// Word subtraction with flag computation.
    pub(crate) fn sub16(&mut self, a: u16, b: u16) -> u16 {
        let result = a.wrapping_sub(b);

        let ccr = &mut self.regs.ccr;
        ccr.set_if(flags::H, a & 0x0FFF < b & 0x0FFF);
        ccr.set_if(
            flags::V,
            (a ^ b) & 0x8000 != 0 && (a ^ result) & 0x8000 != 0,
        );
        ccr.set_if(flags::C, a < b);
        ccr.update_nz16(result);
        result
    }

    /// Longword subtraction with flag computation.
    pub(crate) fn sub32(&mut self, a: u32, b: u32) -> u32 {
        let result = a.wrapping_sub(b);

        let ccr = &mut self.regs.ccr;
        ccr.set_if(flags::H, a & 0x0FFF_FFFF < b & 0x0FFF_FFFF);
        ccr.set_if(
            flags::V,
            (a ^ b) & 0x8000_0000 != 0 && (a ^ result) & 0x8000_0000 != 0,
        );
        ccr.set_if(flags::C, a < b);
        ccr.update_nz32(result);
        result
    }

    // Encoding: 08 sd (register) / 8d ii (immediate)
    pub(crate) fn exec_add_b(&mut self) {
        let (rd, operand) = if self.op[0] >> 8 == 0x08 {
            let rd = (self.op[0] & 0x0F) as u8;
            (rd, self.regs.read8((self.op[0] >> 4) as u8 & 0x0F))
        } else {
            ((self.op[0] >> 8) as u8 & 0x0F, self.op[0] as u8)
        };
        let result = self.add8(self.regs.read8(rd), operand, false);
        self.regs.write8(rd, result);
    }

    // Encoding: 09 sd (register) / 7911 d + imm16
    pub(crate) fn exec_add_w<B: Bus>(&mut self, bus: &mut B) {
        let rd = (self.op[0] & 0x0F) as u8;
        let operand = if self.op[0] >> 8 == 0x09 {
            self.regs.read16((self.op[0] >> 4) as u8 & 0x0F)
        } else {
            self.fetch16(bus)
        };
        let result = self.add16(self.regs.read16(rd), operand);
        self.regs.write16(rd, result);
    }

    // Encoding: 0A 1sd (register) / 7A1 d + imm32
    pub(crate) fn exec_add_l<B: Bus>(&mut self, bus: &mut B) {
        let erd = (self.op[0] & 0x07) as u8;
        let operand = if self.op[0] >> 8 == 0x0A {
            self.regs.read32((self.op[0] >> 4) as u8 & 0x07)
        } else {
            self.fetch32(bus)
        };
        let result = self.add32(self.regs.read32(erd), operand);
        self.regs.write32(erd, result);
    }

    // Encoding: 0B 0d (#1) / 0B 8d (#2) / 0B 9d (#4). No flags.
    pub(crate) fn exec_adds(&mut self) {
        let erd = (self.op[0] & 0x07) as u8;
        let amount = match (self.op[0] >> 4) & 0x0F {
            0x0 => 1,
            0x8 => 2,
            _ => 4,
        };
        let result = self.regs.read32(erd).wrapping_add(amount);
        self.regs.write32(erd, result);
    }

    // Encoding: 1B 0d (#1) / 1B 8d (#2) / 1B 9d (#4). No flags.
    pub(crate) fn exec_subs(&mut self) {
        let erd = (self.op[0] & 0x07) as u8;
        let amount = match (self.op[0] >> 4) & 0x0F {
            0x0 => 1,
            0x8 => 2,
            _ => 4,
        };
        let result = self.regs.read32(erd).wrapping_sub(amount);
        self.regs.write32(erd, result);
    }

    // Encoding: 0E sd (register) / 9d ii (immediate)
    pub(crate) fn exec_addx(&mut self) {
        let (rd, operand) = if self.op[0] >> 8 == 0x0E {
            let rd = (self.op[0] & 0x0F) as u8;
            (rd, self.regs.read8((self.op[0] >> 4) as u8 & 0x0F))
        } else {
            ((self.op[0] >> 8) as u8 & 0x0F, self.op[0] as u8)
        };
        let carry = self.regs.ccr.is_set(flags::C);
        let zero_before = self.regs.ccr.is_set(flags::Z);
        let result = self.add8(self.regs.read8(rd), operand, carry);
        // Z survives only through a chain of zero results.
        self.regs
            .ccr
            .set_if(flags::Z, zero_before && result == 0);
        self.regs.write8(rd, result);
    }

    // Encoding: 1E sd (register) / Bd ii (immediate)
    pub(crate) fn exec_subx(&mut self) {
        let (rd, operand) = if self.op[0] >> 8 == 0x1E {
            let rd = (self.op[0] & 0x0F) as u8;
            (rd, self.regs.read8((self.op[0] >> 4) as u8 & 0x0F))
        } else {
            ((self.op[0] >> 8) as u8 & 0x0F, self.op[0] as u8)
        };
        let borrow = self.regs.ccr.is_set(flags::C);
        let zero_before = self.regs.ccr.is_set(flags::Z);
        let result = self.sub8(self.regs.read8(rd), operand, borrow);
        self.regs
            .ccr
            .set_if(flags::Z, zero_before && result == 0);
        self.regs.write8(rd, result);
    }

    // Encoding: 0A 0d. N/Z/V only; C and H untouched.
    pub(crate) fn exec_inc_b(&mut self) {
        let rd = (self.op[0] & 0x0F) as u8;
        let a = self.regs.read8(rd);
        let result = a.wrapping_add(1);
        self.regs.ccr.set_if(flags::V, a == 0x7F);
        self.regs.ccr.update_nz8(result);
        self.regs.write8(rd, result);
    }

    // Encoding: 0B 5d (#1) / 0B Dd (#2)
    pub(crate) fn exec_inc_w(&mut self) {
        let rd = (self.op[0] & 0x0F) as u8;
        let amount: u16 = if (self.op[0] >> 4) & 0x0F == 0x5 { 1 } else { 2 };
        let a = self.regs.read16(rd);
        let result = a.wrapping_add(amount);
        self.regs
            .ccr
            .set_if(flags::V, a & 0x8000 == 0 && result & 0x8000 != 0);
        self.regs.ccr.update_nz16(result);
        self.regs.write16(rd, result);
    }

    // Encoding: 0B 7d (#1) / 0B Fd (#2)
    pub(crate) fn exec_inc_l(&mut self) {
        let erd = (self.op[0] & 0x07) as u8;
        let amount: u32 = if (self.op[0] >> 4) & 0x0F == 0x7 { 1 } else { 2 };
        let a = self.regs.read32(erd);
        let result = a.wrapping_add(amount);
        self.regs.ccr.set_if(
            flags::V,
            a & 0x8000_0000 == 0 && result & 0x8000_0000 != 0,
        );
        self.regs.ccr.update_nz32(result);
        self.regs.write32(erd, result);
    }

    // Encoding: 1A 0d
    pub(crate) fn exec_dec_b(&mut self) {
        let rd = (self.op[0] & 0x0F) as u8;
        let a = self.regs.read8(rd);
        let result = a.wrapping_sub(1);
        self.regs.ccr.set_if(flags::V, a == 0x80);
        self.regs.ccr.update_nz8(result);
        self.regs.write8(rd, result);
    }

    // Encoding: 1B 5d (#1) / 1B Dd (#2)
    pub(crate) fn exec_dec_w(&mut self) {
        let rd = (self.op[0] & 0x0F) as u8;
        let amount: u16 = if (self.op[0] >> 4) & 0x0F == 0x5 { 1 } else { 2 };
        let a = self.regs.read16(rd);
        let result = a.wrapping_sub(amount);
        self.regs
            .ccr
            .set_if(flags::V, a & 0x8000 != 0 && result & 0x8000 == 0);
        self.regs.ccr.update_nz16(result);
        self.regs.write16(rd, result);
    }

    // Encoding: 1B 7d (#1) / 1B Fd (#2)
    pub(crate) fn exec_dec_l(&mut self) {
        let erd = (self.op[0] & 0x07) as u8;
        let amount: u32 = if (self.op[0] >> 4) & 0x0F == 0x7 { 1 } else { 2 };
        let a = self.regs.read32(erd);
        let result = a.wrapping_sub(amount);
        self.regs.ccr.set_if(
            flags::V,
            a & 0x8000_0000 != 0 && result & 0x8000_0000 == 0,
        );
        self.regs.ccr.update_nz32(result);
        self.regs.write32(erd, result);
    }

    // Encoding: 0F 0d. Decimal adjust after byte addition.
    pub(crate) fn exec_daa(&mut self) {
        let rd = (self.op[0] & 0x0F) as u8;
        let a = self.regs.read8(rd);

        let mut adjust = 0u8;
        let mut carry = self.regs.ccr.is_set(flags::C);
        if self.regs.ccr.is_set(flags::H) || a & 0x0F > 0x09 {
            adjust |= 0x06;
        }
        if carry || a > 0x99 {
            adjust |= 0x60;
            carry = true;
        }

        let result = a.wrapping_add(adjust);
        self.regs.ccr.update_nz8(result);
        self.regs.ccr.set_if(flags::C, carry);
        self.regs.write8(rd, result);
    }

    // Encoding: 1F 0d. Decimal adjust after byte subtraction; C holds.
    pub(crate) fn exec_das(&mut self) {
        let rd = (self.op[0] & 0x0F) as u8;
        let a = self.regs.read8(rd);

        let mut adjust = 0u8;
        if self.regs.ccr.is_set(flags::H) || a & 0x0F > 0x09 {
            adjust |= 0x06;
        }
        if self.regs.ccr.is_set(flags::C) || a > 0x99 {
            adjust |= 0x60;
        }

        let result = a.wrapping_sub(adjust);
        self.regs.ccr.update_nz8(result);
        self.regs.write8(rd, result);
    }

    // Encoding: 18 sd. Byte subtraction has no immediate form.
    pub(crate) fn exec_sub_b(&mut self) {
        let rd = (self.op[0] & 0x0F) as u8;
        let operand = self.regs.read8((self.op[0] >> 4) as u8 & 0x0F);
        let result = self.sub8(self.regs.read8(rd), operand, false);
        self.regs.write8(rd, result);
    }

    // Encoding: 19 sd (register) / 7913 d + imm16
    pub(crate) fn exec_sub_w<B: Bus>(&mut self, bus: &mut B) {
        let rd = (self.op[0] & 0x0F) as u8;
        let operand = if self.op[0] >> 8 == 0x19 {
            self.regs.read16((self.op[0] >> 4) as u8 & 0x0F)
        } else {
            self.fetch16(bus)
        };
        let result = self.sub16(self.regs.read16(rd), operand);
        self.regs.write16(rd, result);
    }

    // Encoding: 1A 1sd (register) / 7A3 d + imm32
    pub(crate) fn exec_sub_l<B: Bus>(&mut self, bus: &mut B) {
        let erd = (self.op[0] & 0x07) as u8;
        let operand = if self.op[0] >> 8 == 0x1A {
            self.regs.read32((self.op[0] >> 4) as u8 & 0x07)
        } else {
            self.fetch32(bus)
        };
        let result = self.sub32(self.regs.read32(erd), operand);
        self.regs.write32(erd, result);
    }

    // Encoding: 1C sd (register) / Ad ii (immediate)
    pub(crate) fn exec_cmp_b(&mut self) {
        let (rd, operand) = if self.op[0] >> 8 == 0x1C {
            let rd = (self.op[0] & 0x0F) as u8;
            (rd, self.regs.read8((self.op[0] >> 4) as u8 & 0x0F))
        } else {
            ((self.op[0] >> 8) as u8 & 0x0F, self.op[0] as u8)
        };
        self.sub8(self.regs.read8(rd), operand, false);
    }

    // Encoding: 1D sd (register) / 7912 d + imm16
    pub(crate) fn exec_cmp_w<B: Bus>(&mut self, bus: &mut B) {
        let rd = (self.op[0] & 0x0F) as u8;
        let operand = if self.op[0] >> 8 == 0x1D {
            self.regs.read16((self.op[0] >> 4) as u8 & 0x0F)
        } else {
            self.fetch16(bus)
        };
        self.sub16(self.regs.read16(rd), operand);
    }

    // Encoding: 1F 1sd (register) / 7A2 d + imm32
    pub(crate) fn exec_cmp_l<B: Bus>(&mut self, bus: &mut B) {
        let erd = (self.op[0] & 0x07) as u8;
        let operand = if self.op[0] >> 8 == 0x1F {
            self.regs.read32((self.op[0] >> 4) as u8 & 0x07)
        } else {
            self.fetch32(bus)
        };
        self.sub32(self.regs.read32(erd), operand);
    }

    // Encoding: 17 8d (byte) / 17 9d (word) / 17 Bd (long)
    pub(crate) fn exec_neg(&mut self) {
        match (self.op[0] >> 4) & 0x0F {
            0x8 => {
                let rd = (self.op[0] & 0x0F) as u8;
                let result = self.sub8(0, self.regs.read8(rd), false);
                self.regs.write8(rd, result);
            }
            0x9 => {
                let rd = (self.op[0] & 0x0F) as u8;
                let result = self.sub16(0, self.regs.read16(rd));
                self.regs.write16(rd, result);
            }
            _ => {
                let erd = (self.op[0] & 0x07) as u8;
                let result = self.sub32(0, self.regs.read32(erd));
                self.regs.write32(erd, result);
            }
        }
    }

    // Encoding: 17 5d (word) / 17 7d (long). Zero extension.
    pub(crate) fn exec_extu(&mut self) {
        if (self.op[0] >> 4) & 0x0F == 0x5 {
            let rd = (self.op[0] & 0x0F) as u8;
            let result = u16::from(self.regs.read16(rd) as u8);
            self.regs.ccr.update_nz16(result);
            self.regs.ccr.clear(flags::V);
            self.regs.write16(rd, result);
        } else {
            let erd = (self.op[0] & 0x07) as u8;
            let result = u32::from(self.regs.read32(erd) as u16);
            self.regs.ccr.update_nz32(result);
            self.regs.ccr.clear(flags::V);
            self.regs.write32(erd, result);
        }
    }

    // Encoding: 17 Dd (word) / 17 Fd (long). Sign extension.
    pub(crate) fn exec_exts(&mut self) {
        if (self.op[0] >> 4) & 0x0F == 0xD {
            let rd = (self.op[0] & 0x0F) as u8;
            let result = i16::from(self.regs.read16(rd) as i8) as u16;
            self.regs.ccr.update_nz16(result);
            self.regs.ccr.clear(flags::V);
            self.regs.write16(rd, result);
        } else {
            let erd = (self.op[0] & 0x07) as u8;
            let result = i32::from(self.regs.read32(erd) as i16) as u32;
            self.regs.ccr.update_nz32(result);
            self.regs.ccr.clear(flags::V);
            self.regs.write32(erd, result);
        }
    }

    // Encoding: 50 sd. RdL * Rs8 -> Rd16. No flags.
    pub(crate) fn exec_mulxu_b(&mut self) {
        let rd = (self.op[0] & 0x0F) as u8;
        let rs = (self.op[0] >> 4) as u8 & 0x0F;
        let result = u16::from(self.regs.read16(rd) as u8) * u16::from(self.regs.read8(rs));
        self.regs.write16(rd, result);
    }

    // Encoding: 52 s 0ed. Rd16 * Rs16 -> ERd32. No flags.
    pub(crate) fn exec_mulxu_w(&mut self) {
        let erd = (self.op[0] & 0x07) as u8;
        let rs = (self.op[0] >> 4) as u8 & 0x0F;
        let result =
            u32::from(self.regs.read32(erd) as u16) * u32::from(self.regs.read16(rs));
        self.regs.write32(erd, result);
    }

    // Encoding: 51 sd. Rd16 / Rs8 -> RdL quotient, RdH remainder.
    pub(crate) fn exec_divxu_b(&mut self) {
        let rd = (self.op[0] & 0x0F) as u8;
        let rs = (self.op[0] >> 4) as u8 & 0x0F;
        let dividend = self.regs.read16(rd);
        let divisor = self.regs.read8(rs);

        self.regs.ccr.set_if(flags::N, divisor & 0x80 != 0);
        self.regs.ccr.set_if(flags::Z, divisor == 0);
        if divisor != 0 {
            let quotient = dividend / u16::from(divisor);
            let remainder = dividend % u16::from(divisor);
            self.regs.write16(rd, (remainder << 8) | (quotient & 0x00FF));
        }
    }

    // Encoding: 53 s 0ed. ERd32 / Rs16 -> Rd quotient, Ed remainder.
    pub(crate) fn exec_divxu_w(&mut self) {
        let erd = (self.op[0] & 0x07) as u8;
        let rs = (self.op[0] >> 4) as u8 & 0x0F;
        let dividend = self.regs.read32(erd);
        let divisor = self.regs.read16(rs);

        self.regs.ccr.set_if(flags::N, divisor & 0x8000 != 0);
        self.regs.ccr.set_if(flags::Z, divisor == 0);
        if divisor != 0 {
            let quotient = dividend / u32::from(divisor);
            let remainder = dividend % u32::from(divisor);
            self.regs
                .write32(erd, (remainder << 16) | (quotient & 0xFFFF));
        }
    }

    // Encoding: 01C0 50 sd (byte) / 01C0 52 s 0ed (word). Signed multiply.
    pub(crate) fn exec_mulxs(&mut self) {
        if self.op[1] & 0x0200 == 0 {
            let rd = (self.op[1] & 0x0F) as u8;
            let rs = (self.op[1] >> 4) as u8 & 0x0F;
            let result = i16::from(self.regs.read16(rd) as u8 as i8)
                .wrapping_mul(i16::from(self.regs.read8(rs) as i8)) as u16;
            self.regs.ccr.update_nz16(result);
            self.regs.write16(rd, result);
        } else {
            let erd = (self.op[1] & 0x07) as u8;
            let rs = (self.op[1] >> 4) as u8 & 0x0F;
            let result = i32::from(self.regs.read32(erd) as u16 as i16)
                .wrapping_mul(i32::from(self.regs.read16(rs) as i16))
                as u32;
            self.regs.ccr.update_nz32(result);
            self.regs.write32(erd, result);
        }
    }

    // Encoding: 01D0 51 sd (byte) / 01D0 53 s 0ed (word). Signed divide.
    pub(crate) fn exec_divxs(&mut self) {
        if self.op[1] & 0x0200 == 0 {
            let rd = (self.op[1] & 0x0F) as u8;
            let rs = (self.op[1] >> 4) as u8 & 0x0F;
            let dividend = self.regs.read16(rd) as i16;
            let divisor = i16::from(self.regs.read8(rs) as i8);

            self.regs
                .ccr
                .set_if(flags::N, (dividend < 0) != (divisor < 0));
            self.regs.ccr.set_if(flags::Z, divisor == 0);
            if divisor != 0 {
                let quotient = dividend.wrapping_div(divisor);
                let remainder = dividend.wrapping_rem(divisor);
                self.regs
                    .write16(rd, ((remainder as u16) << 8) | (quotient as u16 & 0x00FF));
            }
        } else {
            let erd = (self.op[1] & 0x07) as u8;
            let rs = (self.op[1] >> 4) as u8 & 0x0F;
            let dividend = self.regs.read32(erd) as i32;
            let divisor = i32::from(self.regs.read16(rs) as i16);

            self.regs
                .ccr
                .set_if(flags::N, (dividend < 0) != (divisor < 0));
            self.regs.ccr.set_if(flags::Z, divisor == 0);
            if divisor != 0 {
                let quotient = dividend.wrapping_div(divisor);
                let remainder = dividend.wrapping_rem(divisor);
                self.regs
                    .write32(erd, ((remainder as u32) << 16) | (quotient as u32 & 0xFFFF));
            }
        }
    }
}
