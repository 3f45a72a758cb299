//! Data movement handlers.
//!
//! Every MOV form sets N and Z from the moved value and clears V; C is
//! untouched. The 8-bit absolute form addresses the top page
//! (0xFF00 | aa), where the on-chip I/O registers live.

use emu_core::Bus;

use crate::cpu::H8300h;
use crate::flags;

impl H8300h {
    fn mov_flags8(&mut self, value: u8) {
        self.regs.ccr.update_nz8(value);
        self.regs.ccr.clear(flags::V);
    }

    fn mov_flags16(&mut self, value: u16) {
        self.regs.ccr.update_nz16(value);
        self.regs.ccr.clear(flags::V);
    }

    fn mov_flags32(&mut self, value: u32) {
        self.regs.ccr.update_nz32(value);
        self.regs.ccr.clear(flags::V);
    }

    // Encoding: 0C sd
    pub(crate) fn exec_mov_b_regs(&mut self) {
        let value = self.regs.read8((self.op[0] >> 4) as u8 & 0x0F);
        self.mov_flags8(value);
        self.regs.write8((self.op[0] & 0x0F) as u8, value);
    }

    // Encoding: 0D sd
    pub(crate) fn exec_mov_w_regs(&mut self) {
        let value = self.regs.read16((self.op[0] >> 4) as u8 & 0x0F);
        self.mov_flags16(value);
        self.regs.write16((self.op[0] & 0x0F) as u8, value);
    }

    // Encoding: 0F 1sd
    pub(crate) fn exec_mov_l_regs(&mut self) {
        let value = self.regs.read32((self.op[0] >> 4) as u8 & 0x07);
        self.mov_flags32(value);
        self.regs.write32((self.op[0] & 0x07) as u8, value);
    }

    // Encoding: Fd ii
    pub(crate) fn exec_mov_b_imm(&mut self) {
        let value = self.op[0] as u8;
        self.mov_flags8(value);
        self.regs.write8((self.op[0] >> 8) as u8 & 0x0F, value);
    }

    // Encoding: 790 d + imm16
    pub(crate) fn exec_mov_w_imm<B: Bus>(&mut self, bus: &mut B) {
        let value = self.fetch16(bus);
        self.mov_flags16(value);
        self.regs.write16((self.op[0] & 0x0F) as u8, value);
    }

    // Encoding: 7A0 d + imm32
    pub(crate) fn exec_mov_l_imm<B: Bus>(&mut self, bus: &mut B) {
        let value = self.fetch32(bus);
        self.mov_flags32(value);
        self.regs.write32((self.op[0] & 0x07) as u8, value);
    }

    // Encoding: 2d aa. Loads from the top page.
    pub(crate) fn exec_mov_b_abs8_load<B: Bus>(&mut self, bus: &mut B) {
        let address = 0xFF00 | (self.op[0] & 0x00FF);
        let value = bus.read8(address);
        self.mov_flags8(value);
        self.regs.write8((self.op[0] >> 8) as u8 & 0x0F, value);
    }

    // Encoding: 3s aa. Stores to the top page.
    pub(crate) fn exec_mov_b_abs8_store<B: Bus>(&mut self, bus: &mut B) {
        let address = 0xFF00 | (self.op[0] & 0x00FF);
        let value = self.regs.read8((self.op[0] >> 8) as u8 & 0x0F);
        self.mov_flags8(value);
        bus.write8(address, value);
    }

    // Encoding: 68 sd (load) / 68 1dd (store, bit 7 set)
    pub(crate) fn exec_mov_b_ind<B: Bus>(&mut self, bus: &mut B) {
        let address = self.regs.read32((self.op[0] >> 4) as u8 & 0x07) as u16;
        let r = (self.op[0] & 0x0F) as u8;
        if self.op[0] & 0x0080 == 0 {
            let value = bus.read8(address);
            self.mov_flags8(value);
            self.regs.write8(r, value);
        } else {
            let value = self.regs.read8(r);
            self.mov_flags8(value);
            bus.write8(address, value);
        }
    }

    // Encoding: 69 sd (load) / 69 1dd (store, bit 7 set)
    pub(crate) fn exec_mov_w_ind<B: Bus>(&mut self, bus: &mut B) {
        let address = self.regs.read32((self.op[0] >> 4) as u8 & 0x07) as u16;
        let r = (self.op[0] & 0x0F) as u8;
        if self.op[0] & 0x0080 == 0 {
            let value = bus.read16(address);
            self.mov_flags16(value);
            self.regs.write16(r, value);
        } else {
            let value = self.regs.read16(r);
            self.mov_flags16(value);
            bus.write16(address, value);
        }
    }

    /// Absolute address for the 0x6A/0x6B column: mode nibble 0x0/0x8
    /// takes a 16-bit extension, 0x2/0xA a 32-bit one (24 bits used).
    fn fetch_abs<B: Bus>(&mut self, bus: &mut B) -> u16 {
        if (self.op[0] >> 4) & 0x02 == 0 {
            self.fetch16(bus)
        } else {
            self.fetch32(bus) as u16
        }
    }

    // Encoding: 6A 0d/2d aa (load) / 6A 8d/Ad aa (store)
    pub(crate) fn exec_mov_b_abs<B: Bus>(&mut self, bus: &mut B) {
        let address = self.fetch_abs(bus);
        let r = (self.op[0] & 0x0F) as u8;
        if self.op[0] & 0x0080 == 0 {
            let value = bus.read8(address);
            self.mov_flags8(value);
            self.regs.write8(r, value);
        } else {
            let value = self.regs.read8(r);
            self.mov_flags8(value);
            bus.write8(address, value);
        }
    }

    // Encoding: 6B 0d/2d aa (load) / 6B 8d/Ad aa (store)
    pub(crate) fn exec_mov_w_abs<B: Bus>(&mut self, bus: &mut B) {
        let address = self.fetch_abs(bus);
        let r = (self.op[0] & 0x0F) as u8;
        if self.op[0] & 0x0080 == 0 {
            let value = bus.read16(address);
            self.mov_flags16(value);
            self.regs.write16(r, value);
        } else {
            let value = self.regs.read16(r);
            self.mov_flags16(value);
            bus.write16(address, value);
        }
    }

    // Encoding: 6C sd (@ERs+ load) / 6C 1dd (@-ERd store)
    pub(crate) fn exec_mov_b_incdec<B: Bus>(&mut self, bus: &mut B) {
        let er = (self.op[0] >> 4) as u8 & 0x07;
        let r = (self.op[0] & 0x0F) as u8;
        if self.op[0] & 0x0080 == 0 {
            let address = self.regs.read32(er);
            self.regs.write32(er, address.wrapping_add(1));
            let value = bus.read8(address as u16);
            self.mov_flags8(value);
            self.regs.write8(r, value);
        } else {
            let address = self.regs.read32(er).wrapping_sub(1);
            self.regs.write32(er, address);
            let value = self.regs.read8(r);
            self.mov_flags8(value);
            bus.write8(address as u16, value);
        }
    }

    // Encoding: 6D sd (@ERs+ load) / 6D 1dd (@-ERd store)
    pub(crate) fn exec_mov_w_incdec<B: Bus>(&mut self, bus: &mut B) {
        let er = (self.op[0] >> 4) as u8 & 0x07;
        let r = (self.op[0] & 0x0F) as u8;
        if self.op[0] & 0x0080 == 0 {
            let address = self.regs.read32(er);
            self.regs.write32(er, address.wrapping_add(2));
            let value = bus.read16(address as u16);
            self.mov_flags16(value);
            self.regs.write16(r, value);
        } else {
            let address = self.regs.read32(er).wrapping_sub(2);
            self.regs.write32(er, address);
            let value = self.regs.read16(r);
            self.mov_flags16(value);
            bus.write16(address as u16, value);
        }
    }

    // Encoding: 6E sd + d:16 (load) / 6E 1dd + d:16 (store)
    pub(crate) fn exec_mov_b_disp16<B: Bus>(&mut self, bus: &mut B) {
        let er = (self.op[0] >> 4) as u8 & 0x07;
        let r = (self.op[0] & 0x0F) as u8;
        let disp = i32::from(self.fetch16(bus) as i16);
        let address = self.regs.read32(er).wrapping_add_signed(disp) as u16;
        if self.op[0] & 0x0080 == 0 {
            let value = bus.read8(address);
            self.mov_flags8(value);
            self.regs.write8(r, value);
        } else {
            let value = self.regs.read8(r);
            self.mov_flags8(value);
            bus.write8(address, value);
        }
    }

    // Encoding: 6F sd + d:16 (load) / 6F 1dd + d:16 (store)
    pub(crate) fn exec_mov_w_disp16<B: Bus>(&mut self, bus: &mut B) {
        let er = (self.op[0] >> 4) as u8 & 0x07;
        let r = (self.op[0] & 0x0F) as u8;
        let disp = i32::from(self.fetch16(bus) as i16);
        let address = self.regs.read32(er).wrapping_add_signed(disp) as u16;
        if self.op[0] & 0x0080 == 0 {
            let value = bus.read16(address);
            self.mov_flags16(value);
            self.regs.write16(r, value);
        } else {
            let value = self.regs.read16(r);
            self.mov_flags16(value);
            bus.write16(address, value);
        }
    }

    // Encoding: 78 0s + 6A/6B 2d|Ad + d:24 (stored as 32 bits)
    pub(crate) fn exec_mov_disp24<B: Bus>(&mut self, bus: &mut B) {
        let er = (self.op[0] >> 4) as u8 & 0x07;
        let r = (self.op[1] & 0x0F) as u8;
        let disp = self.fetch32(bus);
        let address = self.regs.read32(er).wrapping_add(disp) as u16;
        let store = self.op[1] & 0x0080 != 0;
        if self.op[1] >> 8 == 0x6A {
            if store {
                let value = self.regs.read8(r);
                self.mov_flags8(value);
                bus.write8(address, value);
            } else {
                let value = bus.read8(address);
                self.mov_flags8(value);
                self.regs.write8(r, value);
            }
        } else if store {
            let value = self.regs.read16(r);
            self.mov_flags16(value);
            bus.write16(address, value);
        } else {
            let value = bus.read16(address);
            self.mov_flags16(value);
            self.regs.write16(r, value);
        }
    }

    // Encoding: 0100 + 69/6B/6D/6F second word. Longword forms of the
    // indirect, absolute, post-increment/pre-decrement and d:16 moves.
    pub(crate) fn exec_mov_l_mem<B: Bus>(&mut self, bus: &mut B) {
        let store = self.op[1] & 0x0080 != 0;
        let erd = (self.op[1] & 0x07) as u8;
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
                    let address = self.regs.read32(er).wrapping_sub(4);
                    self.regs.write32(er, address);
                    address as u16
                } else {
                    let address = self.regs.read32(er);
                    self.regs.write32(er, address.wrapping_add(4));
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
            let value = self.regs.read32(erd);
            self.mov_flags32(value);
            bus.write32(address, value);
        } else {
            let value = bus.read32(address);
            self.mov_flags32(value);
            self.regs.write32(erd, value);
        }
    }

    // Encoding: 0100 78 0s + 6B 2d|Ad + d:24 (stored as 32 bits)
    pub(crate) fn exec_mov_l_disp24<B: Bus>(&mut self, bus: &mut B) {
        let er = (self.op[1] >> 4) as u8 & 0x07;
        let spec = self.fetch16(bus);
        let disp = self.fetch32(bus);
        if spec & 0xFF70 != 0x6B20 {
            return;
        }
        let erd = (spec & 0x07) as u8;
        let address = self.regs.read32(er).wrapping_add(disp) as u16;
        if spec & 0x0080 == 0 {
            let value = bus.read32(address);
            self.mov_flags32(value);
            self.regs.write32(erd, value);
        } else {
            let value = self.regs.read32(erd);
            self.mov_flags32(value);
            bus.write32(address, value);
        }
    }

    // Encoding: 7B5C 598F. Copies R4L bytes from @ER5+ to @ER6+.
    pub(crate) fn exec_eepmov_b<B: Bus>(&mut self, bus: &mut B) {
        if self.fetch16(bus) != 0x598F {
            return;
        }
        let mut count = u32::from(self.regs.read8(0x0C)); // R4L
        while count > 0 {
            let src = self.regs.read32(5);
            let dst = self.regs.read32(6);
            let value = bus.read8(src as u16);
            bus.write8(dst as u16, value);
            self.regs.write32(5, src.wrapping_add(1));
            self.regs.write32(6, dst.wrapping_add(1));
            count -= 1;
        }
        self.regs.write8(0x0C, 0);
    }

    // Encoding: 7BD4 598F. Copies R4 bytes from @ER5+ to @ER6+.
    pub(crate) fn exec_eepmov_w<B: Bus>(&mut self, bus: &mut B) {
        if self.fetch16(bus) != 0x598F {
            return;
        }
        let mut count = u32::from(self.regs.read16(4)); // R4
        while count > 0 {
            let src = self.regs.read32(5);
            let dst = self.regs.read32(6);
            let value = bus.read8(src as u16);
            bus.write8(dst as u16, value);
            self.regs.write32(5, src.wrapping_add(1));
            self.regs.write32(6, dst.wrapping_add(1));
            count -= 1;
        }
        self.regs.write16(4, 0);
    }
}
