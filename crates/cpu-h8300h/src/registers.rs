//! H8/300H register file.
//!
//! Eight 32-bit general registers ERn, each also addressable as a word
//! pair (Rn = low word, En = high word) and as a byte pair within Rn
//! (RnH = high byte, RnL = low byte). Instruction register fields select
//! the view: a 4-bit byte field picks RnH (0-7) or RnL (8-15), a 4-bit
//! word field picks Rn (0-7) or En (8-15), a 3-bit long field picks ERn.
//! ER7 doubles as the stack pointer.

use crate::flags::Ccr;

/// CPU register file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// General registers ER0-ER7.
    er: [u32; 8],
    /// Program counter (24 bits used).
    pub pc: u32,
    /// Condition code register.
    pub ccr: Ccr,
}

impl Registers {
    /// Create a register file in its reset state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            er: [0; 8],
            pc: 0,
            ccr: Ccr::new(),
        }
    }

    /// Read a byte register (4-bit field: RnH for 0-7, RnL for 8-15).
    #[must_use]
    pub fn read8(&self, index: u8) -> u8 {
        let er = self.er[(index & 7) as usize];
        if index & 0x08 == 0 {
            (er >> 8) as u8
        } else {
            er as u8
        }
    }

    /// Write a byte register (4-bit field: RnH for 0-7, RnL for 8-15).
    pub fn write8(&mut self, index: u8, value: u8) {
        let er = &mut self.er[(index & 7) as usize];
        if index & 0x08 == 0 {
            *er = (*er & 0xFFFF_00FF) | (u32::from(value) << 8);
        } else {
            *er = (*er & 0xFFFF_FF00) | u32::from(value);
        }
    }

    /// Read a word register (4-bit field: Rn for 0-7, En for 8-15).
    #[must_use]
    pub fn read16(&self, index: u8) -> u16 {
        let er = self.er[(index & 7) as usize];
        if index & 0x08 == 0 {
            er as u16
        } else {
            (er >> 16) as u16
        }
    }

    /// Write a word register (4-bit field: Rn for 0-7, En for 8-15).
    pub fn write16(&mut self, index: u8, value: u16) {
        let er = &mut self.er[(index & 7) as usize];
        if index & 0x08 == 0 {
            *er = (*er & 0xFFFF_0000) | u32::from(value);
        } else {
            *er = (*er & 0x0000_FFFF) | (u32::from(value) << 16);
        }
    }

    /// Read a longword register ERn (3-bit field).
    #[must_use]
    pub fn read32(&self, index: u8) -> u32 {
        self.er[(index & 7) as usize]
    }

    /// Write a longword register ERn (3-bit field).
    pub fn write32(&mut self, index: u8, value: u32) {
        self.er[(index & 7) as usize] = value;
    }

    /// Stack pointer (ER7).
    #[must_use]
    pub fn sp(&self) -> u32 {
        self.er[7]
    }

    /// Set the stack pointer (ER7).
    pub fn set_sp(&mut self, value: u32) {
        self.er[7] = value;
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
