//! Instruction decoder.
//!
//! Decoding proceeds in up to three tiers. Tier 1 dispatches on the top
//! 8 bits of the first instruction word. Columns whose top byte is not
//! enough (the 0x0*/0x1* arithmetic groups, 0x58 branches, 0x79/0x7A
//! immediates) go to tier 2, which dispatches on the top 12 bits. The
//! 0x01-prefix group and the 0x7C-0x7F bit-manipulation groups fetch a
//! second instruction word and dispatch on it (tier 3).
//!
//! Anything that matches no pattern decodes to [`Op::Undefined`], which
//! executes with no architectural effect.

use emu_core::Bus;

use crate::cpu::H8300h;

/// A decoded instruction.
///
/// Variants carry no operand payload: handlers re-extract their fields
/// from the buffered instruction words, which keeps the decode table a
/// pure classification of bit patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Nop,
    Undefined,
    Sleep,
    Trapa,

    // CCR transfers
    StcB,
    LdcB,
    LdcImm,
    LdcStcMem,
    Orc,
    Xorc,
    Andc,

    // Additive arithmetic
    AddB,
    AddW,
    AddL,
    Adds,
    Addx,
    IncB,
    IncW,
    IncL,
    Daa,
    SubB,
    SubW,
    SubL,
    Subs,
    Subx,
    DecB,
    DecW,
    DecL,
    Das,
    CmpB,
    CmpW,
    CmpL,
    Neg,
    Extu,
    Exts,

    // Multiply and divide
    MulxuB,
    MulxuW,
    DivxuB,
    DivxuW,
    Mulxs,
    Divxs,

    // Logic
    AndB,
    AndW,
    AndL,
    OrB,
    OrW,
    OrL,
    XorB,
    XorW,
    XorL,
    Not,

    // Shifts and rotates
    Shll,
    Shlr,
    Shal,
    Shar,
    Rotl,
    Rotr,
    Rotxl,
    Rotxr,

    // Data movement
    MovBRegs,
    MovWRegs,
    MovLRegs,
    MovBImm,
    MovWImm,
    MovLImm,
    MovBAbs8Load,
    MovBAbs8Store,
    MovBInd,
    MovWInd,
    MovBAbs,
    MovWAbs,
    MovBIncDec,
    MovWIncDec,
    MovBDisp16,
    MovWDisp16,
    MovDisp24,
    MovLMem,
    MovLDisp24,
    EepmovB,
    EepmovW,

    // Flow control
    Bcc8,
    Bcc16,
    Bsr8,
    Bsr16,
    JmpReg,
    JmpAbs24,
    JmpInd,
    JsrReg,
    JsrAbs24,
    JsrInd,
    Rts,
    Rte,

    // Bit manipulation
    Bset,
    Bnot,
    Bclr,
    Btst,
    Bst,
    Bor,
    Bxor,
    Band,
    Bld,
}

impl H8300h {
    /// Decode the instruction whose first word is already buffered.
    ///
    /// Tier 3 groups fetch their second word here, so the program
    /// counter ends up past every word that participates in decoding.
    pub(crate) fn decode<B: Bus>(&mut self, bus: &mut B) -> Op {
        match self.op[0] >> 8 {
            0x00 => Op::Nop,
            0x01 => self.decode_prefix_01(bus),
            0x02 => Op::StcB,
            0x03 => Op::LdcB,
            0x04 => Op::Orc,
            0x05 => Op::Xorc,
            0x06 => Op::Andc,
            0x07 => Op::LdcImm,
            0x08 => Op::AddB,
            0x09 => Op::AddW,
            0x0A | 0x0B | 0x0F | 0x10..=0x13 | 0x17 | 0x1A | 0x1B | 0x1F | 0x58 | 0x79
            | 0x7A => self.decode_group_2(),
            0x0C => Op::MovBRegs,
            0x0D => Op::MovWRegs,
            0x0E => Op::Addx,
            0x14 => Op::OrB,
            0x15 => Op::XorB,
            0x16 => Op::AndB,
            0x18 => Op::SubB,
            0x19 => Op::SubW,
            0x1C => Op::CmpB,
            0x1D => Op::CmpW,
            0x1E => Op::Subx,
            0x20..=0x2F => Op::MovBAbs8Load,
            0x30..=0x3F => Op::MovBAbs8Store,
            0x40..=0x4F => Op::Bcc8,
            0x50 => Op::MulxuB,
            0x51 => Op::DivxuB,
            0x52 => Op::MulxuW,
            0x53 => Op::DivxuW,
            0x54 => Op::Rts,
            0x55 => Op::Bsr8,
            0x56 => Op::Rte,
            0x57 => Op::Trapa,
            0x59 => Op::JmpReg,
            0x5A => Op::JmpAbs24,
            0x5B => Op::JmpInd,
            0x5C => Op::Bsr16,
            0x5D => Op::JsrReg,
            0x5E => Op::JsrAbs24,
            0x5F => Op::JsrInd,
            0x60 => Op::Bset,
            0x61 => Op::Bnot,
            0x62 => Op::Bclr,
            0x63 => Op::Btst,
            0x64 => Op::OrW,
            0x65 => Op::XorW,
            0x66 => Op::AndW,
            0x67 => Op::Bst,
            0x68 => Op::MovBInd,
            0x69 => Op::MovWInd,
            0x6A => Op::MovBAbs,
            0x6B => Op::MovWAbs,
            0x6C => Op::MovBIncDec,
            0x6D => Op::MovWIncDec,
            0x6E => Op::MovBDisp16,
            0x6F => Op::MovWDisp16,
            0x70 => Op::Bset,
            0x71 => Op::Bnot,
            0x72 => Op::Bclr,
            0x73 => Op::Btst,
            0x74 => Op::Bor,
            0x75 => Op::Bxor,
            0x76 => Op::Band,
            0x77 => Op::Bld,
            0x78 => self.decode_disp_24(bus),
            0x7B => match self.op[0] & 0x00FF {
                0x5C => Op::EepmovB,
                0xD4 => Op::EepmovW,
                _ => Op::Undefined,
            },
            0x7C | 0x7E => self.decode_bit_read(bus),
            0x7D | 0x7F => self.decode_bit_rmw(bus),
            0x80..=0x8F => Op::AddB,
            0x90..=0x9F => Op::Addx,
            0xA0..=0xAF => Op::CmpB,
            0xB0..=0xBF => Op::Subx,
            0xC0..=0xCF => Op::OrB,
            0xD0..=0xDF => Op::XorB,
            0xE0..=0xEF => Op::AndB,
            // The scrutinee is a shifted u16; nothing above 0xFF occurs.
            0xF0.. => Op::MovBImm,
        }
    }

    /// Tier 2: dispatch on the top 12 bits of the first word.
    fn decode_group_2(&self) -> Op {
        match self.op[0] >> 4 {
            0x0A0 => Op::IncB,
            0x0A8..=0x0AF => Op::AddL,
            0x0B0 | 0x0B8 | 0x0B9 => Op::Adds,
            0x0B5 | 0x0BD => Op::IncW,
            0x0B7 | 0x0BF => Op::IncL,
            0x0F0 => Op::Daa,
            0x0F8..=0x0FF => Op::MovLRegs,
            0x100 | 0x101 | 0x103 => Op::Shll,
            0x108 | 0x109 | 0x10B => Op::Shal,
            0x110 | 0x111 | 0x113 => Op::Shlr,
            0x118 | 0x119 | 0x11B => Op::Shar,
            0x120 | 0x121 | 0x123 => Op::Rotxl,
            0x128 | 0x129 | 0x12B => Op::Rotl,
            0x130 | 0x131 | 0x133 => Op::Rotxr,
            0x138 | 0x139 | 0x13B => Op::Rotr,
            0x170 | 0x171 | 0x173 => Op::Not,
            0x175 | 0x177 => Op::Extu,
            0x178 | 0x179 | 0x17B => Op::Neg,
            0x17D | 0x17F => Op::Exts,
            0x1A0 => Op::DecB,
            0x1A8..=0x1AF => Op::SubL,
            0x1B0 | 0x1B8 | 0x1B9 => Op::Subs,
            0x1B5 | 0x1BD => Op::DecW,
            0x1B7 | 0x1BF => Op::DecL,
            0x1F0 => Op::Das,
            0x1F8..=0x1FF => Op::CmpL,
            0x580..=0x58F => Op::Bcc16,
            0x790 => Op::MovWImm,
            0x791 => Op::AddW,
            0x792 => Op::CmpW,
            0x793 => Op::SubW,
            0x794 => Op::OrW,
            0x795 => Op::XorW,
            0x796 => Op::AndW,
            0x7A0 => Op::MovLImm,
            0x7A1 => Op::AddL,
            0x7A2 => Op::CmpL,
            0x7A3 => Op::SubL,
            0x7A4 => Op::OrL,
            0x7A5 => Op::XorL,
            0x7A6 => Op::AndL,
            _ => Op::Undefined,
        }
    }

    /// Tier 3: the 0x01-prefix column (longword moves, CCR word moves,
    /// SLEEP, signed multiply/divide, longword logic).
    fn decode_prefix_01<B: Bus>(&mut self, bus: &mut B) -> Op {
        match self.op[0] {
            0x0100 => {
                self.op[1] = self.fetch16(bus);
                match self.op[1] >> 8 {
                    0x69 | 0x6B | 0x6D | 0x6F => Op::MovLMem,
                    0x78 => Op::MovLDisp24,
                    _ => Op::Undefined,
                }
            }
            0x0140 => {
                self.op[1] = self.fetch16(bus);
                match self.op[1] >> 8 {
                    0x69 | 0x6B | 0x6D | 0x6F => Op::LdcStcMem,
                    _ => Op::Undefined,
                }
            }
            0x0180 => Op::Sleep,
            0x01C0 => {
                self.op[1] = self.fetch16(bus);
                if self.op[1] & 0xFD00 == 0x5000 {
                    Op::Mulxs
                } else {
                    Op::Undefined
                }
            }
            0x01D0 => {
                self.op[1] = self.fetch16(bus);
                if self.op[1] & 0xFD00 == 0x5100 {
                    Op::Divxs
                } else {
                    Op::Undefined
                }
            }
            0x01F0 => {
                self.op[1] = self.fetch16(bus);
                match self.op[1] >> 8 {
                    0x64 => Op::OrL,
                    0x65 => Op::XorL,
                    0x66 => Op::AndL,
                    _ => Op::Undefined,
                }
            }
            _ => Op::Undefined,
        }
    }

    /// Tier 3: 0x78-prefix byte/word moves with 24-bit displacement.
    fn decode_disp_24<B: Bus>(&mut self, bus: &mut B) -> Op {
        self.op[1] = self.fetch16(bus);
        match self.op[1] & 0xFFF0 {
            0x6A20 | 0x6AA0 | 0x6B20 | 0x6BA0 => Op::MovDisp24,
            _ => Op::Undefined,
        }
    }

    /// Tier 3: bit read group (BTST/BAND/BOR/BXOR/BLD on @ERd or @aa:8).
    fn decode_bit_read<B: Bus>(&mut self, bus: &mut B) -> Op {
        self.op[1] = self.fetch16(bus);
        match self.op[1] >> 8 {
            0x63 | 0x73 => Op::Btst,
            0x74 => Op::Bor,
            0x75 => Op::Bxor,
            0x76 => Op::Band,
            0x77 => Op::Bld,
            _ => Op::Undefined,
        }
    }

    /// Tier 3: bit read-modify-write group (BSET/BNOT/BCLR/BST on @ERd
    /// or @aa:8).
    fn decode_bit_rmw<B: Bus>(&mut self, bus: &mut B) -> Op {
        self.op[1] = self.fetch16(bus);
        match self.op[1] >> 8 {
            0x60 | 0x70 => Op::Bset,
            0x61 | 0x71 => Op::Bnot,
            0x62 | 0x72 => Op::Bclr,
            0x67 => Op::Bst,
            _ => Op::Undefined,
        }
    }
}
