//! Flow control handlers.
//!
//! Branch displacements are relative to the address after the full
//! instruction, which is where PC already points once the extension
//! words are fetched. Normal mode uses word-sized stack frames: BSR/JSR
//! push a 16-bit return address and RTE pops a CCR word (CCR in the
//! upper byte) followed by the PC word.

use emu_core::Bus;

use crate::cpu::H8300h;

impl H8300h {
    fn branch_to(&mut self, target: u32) {
        self.regs.pc = target & 0x00FF_FFFF;
    }

    // Encoding: 4c dd (cc = condition field)
    pub(crate) fn exec_bcc8(&mut self) {
        let disp = i32::from(self.op[0] as i8);
        if self.regs.ccr.condition((self.op[0] >> 8) as u8) {
            self.branch_to(self.regs.pc.wrapping_add_signed(disp));
        }
    }

    // Encoding: 58 c0 + d:16. The displacement is fetched whether or
    // not the branch is taken.
    pub(crate) fn exec_bcc16<B: Bus>(&mut self, bus: &mut B) {
        let disp = i32::from(self.fetch16(bus) as i16);
        if self.regs.ccr.condition((self.op[0] >> 4) as u8) {
            self.branch_to(self.regs.pc.wrapping_add_signed(disp));
        }
    }

    // Encoding: 55 dd
    pub(crate) fn exec_bsr8<B: Bus>(&mut self, bus: &mut B) {
        let disp = i32::from(self.op[0] as i8);
        let return_address = self.regs.pc as u16;
        self.push16(bus, return_address);
        self.branch_to(self.regs.pc.wrapping_add_signed(disp));
    }

    // Encoding: 5C 00 + d:16
    pub(crate) fn exec_bsr16<B: Bus>(&mut self, bus: &mut B) {
        let disp = i32::from(self.fetch16(bus) as i16);
        let return_address = self.regs.pc as u16;
        self.push16(bus, return_address);
        self.branch_to(self.regs.pc.wrapping_add_signed(disp));
    }

    // Encoding: 59 e0
    pub(crate) fn exec_jmp_reg(&mut self) {
        let target = self.regs.read32((self.op[0] >> 4) as u8 & 0x07);
        self.branch_to(target);
    }

    // Encoding: 5A aa + aa:16 (24-bit absolute split across the words)
    pub(crate) fn exec_jmp_abs24<B: Bus>(&mut self, bus: &mut B) {
        let high = u32::from(self.op[0] & 0x00FF);
        let low = u32::from(self.fetch16(bus));
        self.branch_to((high << 16) | low);
    }

    // Encoding: 5B aa. Memory indirect through the vector at aa:8.
    pub(crate) fn exec_jmp_ind<B: Bus>(&mut self, bus: &mut B) {
        let target = bus.read16(self.op[0] & 0x00FF);
        self.branch_to(u32::from(target));
    }

    // Encoding: 5D e0
    pub(crate) fn exec_jsr_reg<B: Bus>(&mut self, bus: &mut B) {
        let target = self.regs.read32((self.op[0] >> 4) as u8 & 0x07);
        let return_address = self.regs.pc as u16;
        self.push16(bus, return_address);
        self.branch_to(target);
    }

    // Encoding: 5E aa + aa:16
    pub(crate) fn exec_jsr_abs24<B: Bus>(&mut self, bus: &mut B) {
        let high = u32::from(self.op[0] & 0x00FF);
        let low = u32::from(self.fetch16(bus));
        let return_address = self.regs.pc as u16;
        self.push16(bus, return_address);
        self.branch_to((high << 16) | low);
    }

    // Encoding: 5F aa
    pub(crate) fn exec_jsr_ind<B: Bus>(&mut self, bus: &mut B) {
        let target = bus.read16(self.op[0] & 0x00FF);
        let return_address = self.regs.pc as u16;
        self.push16(bus, return_address);
        self.branch_to(u32::from(target));
    }

    // Encoding: 54 70
    pub(crate) fn exec_rts<B: Bus>(&mut self, bus: &mut B) {
        let target = self.pop16(bus);
        self.branch_to(u32::from(target));
    }

    // Encoding: 56 70
    pub(crate) fn exec_rte<B: Bus>(&mut self, bus: &mut B) {
        let ccr_word = self.pop16(bus);
        self.regs.ccr.0 = (ccr_word >> 8) as u8;
        let target = self.pop16(bus);
        self.branch_to(u32::from(target));
    }
}
