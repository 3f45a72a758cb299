//! H8/300H CPU core.
//!
//! The core runs in normal mode: a 24-bit program counter over a 16-bit
//! external address space, word-sized stack frames. Each `step` fetches,
//! decodes and executes exactly one instruction.

use emu_core::{Bus, Cpu};

use crate::decode::Op;
use crate::registers::Registers;

/// H8/300H CPU core.
pub struct H8300h {
    /// Register file, program counter and CCR.
    pub regs: Registers,
    /// Buffered instruction words for the instruction being executed.
    /// `op[0]` is the first word; tier-3 decode fills `op[1]`.
    pub(crate) op: [u16; 2],
    /// Whether the reset vector has been loaded into PC.
    ///
    /// Reset leaves PC at zero; the vector is read from address 0x0000
    /// on the first step so that a bus attached after reset still
    /// provides it.
    vector_loaded: bool,
}

impl H8300h {
    /// Create a CPU in its reset state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            regs: Registers::new(),
            op: [0; 2],
            vector_loaded: false,
        }
    }

    /// Reset the CPU: registers cleared, CCR to its reset value, and the
    /// reset vector pending until the next step.
    pub fn reset(&mut self) {
        self.regs = Registers::new();
        self.op = [0; 2];
        self.vector_loaded = false;
    }

    /// Execute one complete instruction.
    pub fn step<B: Bus>(&mut self, bus: &mut B) {
        if !self.vector_loaded {
            self.regs.pc = u32::from(bus.read16(0x0000));
            self.vector_loaded = true;
        }

        self.op[0] = self.fetch16(bus);
        let op = self.decode(bus);
        self.execute(op, bus);
    }

    /// Fetch the next instruction word and advance PC.
    pub(crate) fn fetch16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let word = bus.read16(self.regs.pc as u16);
        self.regs.pc = self.regs.pc.wrapping_add(2) & 0x00FF_FFFF;
        word
    }

    /// Fetch a 32-bit extension (two words, high first) and advance PC.
    pub(crate) fn fetch32<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let high = self.fetch16(bus);
        let low = self.fetch16(bus);
        (u32::from(high) << 16) | u32::from(low)
    }

    /// Push a word onto the stack (normal mode frame).
    pub(crate) fn push16<B: Bus>(&mut self, bus: &mut B, value: u16) {
        let sp = self.regs.sp().wrapping_sub(2);
        self.regs.set_sp(sp);
        bus.write16(sp as u16, value);
    }

    /// Pop a word from the stack (normal mode frame).
    pub(crate) fn pop16<B: Bus>(&mut self, bus: &mut B) -> u16 {
        let sp = self.regs.sp();
        let value = bus.read16(sp as u16);
        self.regs.set_sp(sp.wrapping_add(2));
        value
    }

    /// Dispatch a decoded instruction to its handler.
    fn execute<B: Bus>(&mut self, op: Op, bus: &mut B) {
        match op {
            // No architectural effect. TRAPA would need exception
            // delivery and SLEEP a standby state machine; neither is
            // modeled.
            Op::Nop | Op::Undefined | Op::Sleep | Op::Trapa => {}

            Op::StcB => self.exec_stc_b(),
            Op::LdcB => self.exec_ldc_b(),
            Op::LdcImm => self.exec_ldc_imm(),
            Op::LdcStcMem => self.exec_ldc_stc_mem(bus),
            Op::Orc => self.exec_orc(),
            Op::Xorc => self.exec_xorc(),
            Op::Andc => self.exec_andc(),

            Op::AddB => self.exec_add_b(),
            Op::AddW => self.exec_add_w(bus),
            Op::AddL => self.exec_add_l(bus),
            Op::Adds => self.exec_adds(),
            Op::Addx => self.exec_addx(),
            Op::IncB => self.exec_inc_b(),
            Op::IncW => self.exec_inc_w(),
            Op::IncL => self.exec_inc_l(),
            Op::Daa => self.exec_daa(),
            Op::SubB => self.exec_sub_b(),
            Op::SubW => self.exec_sub_w(bus),
            Op::SubL => self.exec_sub_l(bus),
            Op::Subs => self.exec_subs(),
            Op::Subx => self.exec_subx(),
            Op::DecB => self.exec_dec_b(),
            Op::DecW => self.exec_dec_w(),
            Op::DecL => self.exec_dec_l(),
            Op::Das => self.exec_das(),
            Op::CmpB => self.exec_cmp_b(),
            Op::CmpW => self.exec_cmp_w(bus),
            Op::CmpL => self.exec_cmp_l(bus),
            Op::Neg => self.exec_neg(),
            Op::Extu => self.exec_extu(),
            Op::Exts => self.exec_exts(),

            Op::MulxuB => self.exec_mulxu_b(),
            Op::MulxuW => self.exec_mulxu_w(),
            Op::DivxuB => self.exec_divxu_b(),
            Op::DivxuW => self.exec_divxu_w(),
            Op::Mulxs => self.exec_mulxs(),
            Op::Divxs => self.exec_divxs(),

            Op::AndB => self.exec_and_b(),
            Op::AndW => self.exec_and_w(bus),
            Op::AndL => self.exec_and_l(bus),
            Op::OrB => self.exec_or_b(),
            Op::OrW => self.exec_or_w(bus),
            Op::OrL => self.exec_or_l(bus),
            Op::XorB => self.exec_xor_b(),
            Op::XorW => self.exec_xor_w(bus),
            Op::XorL => self.exec_xor_l(bus),
            Op::Not => self.exec_not(),

            Op::Shll => self.exec_shll(),
            Op::Shlr => self.exec_shlr(),
            Op::Shal => self.exec_shal(),
            Op::Shar => self.exec_shar(),
            Op::Rotl => self.exec_rotl(),
            Op::Rotr => self.exec_rotr(),
            Op::Rotxl => self.exec_rotxl(),
            Op::Rotxr => self.exec_rotxr(),

            Op::MovBRegs => self.exec_mov_b_regs(),
            Op::MovWRegs => self.exec_mov_w_regs(),
            Op::MovLRegs => self.exec_mov_l_regs(),
            Op::MovBImm => self.exec_mov_b_imm(),
            Op::MovWImm => self.exec_mov_w_imm(bus),
            Op::MovLImm => self.exec_mov_l_imm(bus),
            Op::MovBAbs8Load => self.exec_mov_b_abs8_load(bus),
            Op::MovBAbs8Store => self.exec_mov_b_abs8_store(bus),
            Op::MovBInd => self.exec_mov_b_ind(bus),
            Op::MovWInd => self.exec_mov_w_ind(bus),
            Op::MovBAbs => self.exec_mov_b_abs(bus),
            Op::MovWAbs => self.exec_mov_w_abs(bus),
            Op::MovBIncDec => self.exec_mov_b_incdec(bus),
            Op::MovWIncDec => self.exec_mov_w_incdec(bus),
            Op::MovBDisp16 => self.exec_mov_b_disp16(bus),
            Op::MovWDisp16 => self.exec_mov_w_disp16(bus),
            Op::MovDisp24 => self.exec_mov_disp24(bus),
            Op::MovLMem => self.exec_mov_l_mem(bus),
            Op::MovLDisp24 => self.exec_mov_l_disp24(bus),
            Op::EepmovB => self.exec_eepmov_b(bus),
            Op::EepmovW => self.exec_eepmov_w(bus),

            Op::Bcc8 => self.exec_bcc8(),
            Op::Bcc16 => self.exec_bcc16(bus),
            Op::Bsr8 => self.exec_bsr8(bus),
            Op::Bsr16 => self.exec_bsr16(bus),
            Op::JmpReg => self.exec_jmp_reg(),
            Op::JmpAbs24 => self.exec_jmp_abs24(bus),
            Op::JmpInd => self.exec_jmp_ind(bus),
            Op::JsrReg => self.exec_jsr_reg(bus),
            Op::JsrAbs24 => self.exec_jsr_abs24(bus),
            Op::JsrInd => self.exec_jsr_ind(bus),
            Op::Rts => self.exec_rts(bus),
            Op::Rte => self.exec_rte(bus),

            Op::Bset => self.exec_bset(bus),
            Op::Bnot => self.exec_bnot(bus),
            Op::Bclr => self.exec_bclr(bus),
            Op::Btst => self.exec_btst(bus),
            Op::Bst => self.exec_bst(bus),
            Op::Bor => self.exec_bor(bus),
            Op::Bxor => self.exec_bxor(bus),
            Op::Band => self.exec_band(bus),
            Op::Bld => self.exec_bld(bus),
        }
    }
}

impl Cpu for H8300h {
    type Registers = Registers;

    fn step<B: Bus>(&mut self, bus: &mut B) {
        Self::step(self, bus);
    }

    fn pc(&self) -> u32 {
        self.regs.pc
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}

impl Default for H8300h {
    fn default() -> Self {
        Self::new()
    }
}
