//! Instruction-level tests against a flat 64 KiB test bus.
//!
//! Programs are placed at 0x0100 with the reset vector pointing at
//! them; the first `step` loads the vector and executes the first
//! instruction.

use cpu_h8300h::{H8300h, flags};
use emu_core::Bus;

struct TestBus {
    mem: [u8; 65536],
}

impl TestBus {
    fn new() -> Self {
        Self { mem: [0; 65536] }
    }

    fn load(&mut self, address: u16, bytes: &[u8]) {
        let start = address as usize;
        self.mem[start..start + bytes.len()].copy_from_slice(bytes);
    }
}

impl Bus for TestBus {
    fn read8(&mut self, address: u16) -> u8 {
        self.mem[address as usize]
    }

    fn read16(&mut self, address: u16) -> u16 {
        let index = (address & 0xFFFE) as usize;
        (u16::from(self.mem[index]) << 8) | u16::from(self.mem[index | 1])
    }

    fn write8(&mut self, address: u16, value: u8) {
        self.mem[address as usize] = value;
    }

    fn write16(&mut self, address: u16, value: u16) {
        let index = (address & 0xFFFE) as usize;
        self.mem[index] = (value >> 8) as u8;
        self.mem[index | 1] = value as u8;
    }
}

/// CPU plus bus with `program` at 0x0100 and the reset vector set.
fn setup(program: &[u8]) -> (H8300h, TestBus) {
    let mut bus = TestBus::new();
    bus.load(0x0000, &[0x01, 0x00]);
    bus.load(0x0100, program);
    (H8300h::new(), bus)
}

#[test]
fn test_reset_vector_loads_on_first_step_only() {
    // NOPs.
    let (mut cpu, mut bus) = setup(&[0x00, 0x00, 0x00, 0x00]);
    assert_eq!(cpu.regs.pc, 0);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0104);
}

#[test]
fn test_add_b_signed_overflow() {
    // ADD.B #0x01,R0H with R0H = 0x7F.
    let (mut cpu, mut bus) = setup(&[0x80, 0x01]);
    cpu.regs.write8(0, 0x7F);
    cpu.step(&mut bus);

    assert_eq!(cpu.regs.read8(0), 0x80);
    assert!(cpu.regs.ccr.is_set(flags::H));
    assert!(cpu.regs.ccr.is_set(flags::N));
    assert!(!cpu.regs.ccr.is_set(flags::Z));
    assert!(cpu.regs.ccr.is_set(flags::V));
    assert!(!cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_add_b_carry_to_zero() {
    // ADD.B #0x01,R0H with R0H = 0xFF.
    let (mut cpu, mut bus) = setup(&[0x80, 0x01]);
    cpu.regs.write8(0, 0xFF);
    cpu.step(&mut bus);

    assert_eq!(cpu.regs.read8(0), 0x00);
    assert!(cpu.regs.ccr.is_set(flags::C));
    assert!(cpu.regs.ccr.is_set(flags::Z));
    assert!(cpu.regs.ccr.is_set(flags::H));
    assert!(!cpu.regs.ccr.is_set(flags::V));
}

#[test]
fn test_add_w_register_form() {
    // ADD.W R1,R0.
    let (mut cpu, mut bus) = setup(&[0x09, 0x10]);
    cpu.regs.write16(0, 0x1234);
    cpu.regs.write16(1, 0x0111);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read16(0), 0x1345);
}

#[test]
fn test_add_l_immediate() {
    // ADD.L #0x00010001,ER2.
    let (mut cpu, mut bus) = setup(&[0x7A, 0x12, 0x00, 0x01, 0x00, 0x01]);
    cpu.regs.write32(2, 0x0000_FFFF);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read32(2), 0x0002_0000);
    assert_eq!(cpu.regs.pc, 0x0106);
}

#[test]
fn test_cmp_w_borrow() {
    // CMP.W #0x0006,R0 with R0 = 5.
    let (mut cpu, mut bus) = setup(&[0x79, 0x20, 0x00, 0x06]);
    cpu.regs.write16(0, 0x0005);
    cpu.step(&mut bus);

    assert_eq!(cpu.regs.read16(0), 0x0005); // compare never writes back
    assert!(cpu.regs.ccr.is_set(flags::C));
    assert!(cpu.regs.ccr.is_set(flags::N));
    assert!(!cpu.regs.ccr.is_set(flags::Z));
}

#[test]
fn test_addx_zero_chain() {
    // ADDX #0x00,R0L twice: Z survives a zero result, then a nonzero
    // result clears it.
    let (mut cpu, mut bus) = setup(&[0x98, 0x00, 0x98, 0x01]);
    cpu.regs.write8(8, 0x00);
    cpu.regs.ccr.set(flags::Z);
    cpu.step(&mut bus);
    assert!(cpu.regs.ccr.is_set(flags::Z));
    cpu.step(&mut bus);
    assert!(!cpu.regs.ccr.is_set(flags::Z));
    assert_eq!(cpu.regs.read8(8), 0x01);
}

#[test]
fn test_subx_uses_borrow() {
    // SUBX #0x00,R0L with C set borrows one.
    let (mut cpu, mut bus) = setup(&[0xB8, 0x00]);
    cpu.regs.write8(8, 0x10);
    cpu.regs.ccr.set(flags::C);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0x0F);
}

#[test]
fn test_sub_b_register_form() {
    // SUB.B R1H,R0H.
    let (mut cpu, mut bus) = setup(&[0x18, 0x10]);
    cpu.regs.write8(0, 0x40);
    cpu.regs.write8(1, 0x50);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(0), 0xF0);
    assert!(cpu.regs.ccr.is_set(flags::C));
    assert!(cpu.regs.ccr.is_set(flags::N));
}

#[test]
fn test_inc_b_leaves_carry_alone() {
    // INC.B R0H on 0x7F: V set, C untouched.
    let (mut cpu, mut bus) = setup(&[0x0A, 0x00]);
    cpu.regs.write8(0, 0x7F);
    cpu.regs.ccr.set(flags::C);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(0), 0x80);
    assert!(cpu.regs.ccr.is_set(flags::V));
    assert!(cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_adds_sets_no_flags() {
    // ADDS #4,ER0 on 0xFFFFFFFF wraps silently.
    let (mut cpu, mut bus) = setup(&[0x0B, 0x90]);
    cpu.regs.write32(0, 0xFFFF_FFFF);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read32(0), 0x0000_0003);
    assert_eq!(cpu.regs.ccr.0, 0x80); // reset value untouched
}

#[test]
fn test_neg_b() {
    // NEG.B R0L on 0x01.
    let (mut cpu, mut bus) = setup(&[0x17, 0x88]);
    cpu.regs.write8(8, 0x01);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0xFF);
    assert!(cpu.regs.ccr.is_set(flags::C));
    assert!(cpu.regs.ccr.is_set(flags::N));
}

#[test]
fn test_daa_after_bcd_add() {
    // ADD.B #0x08,R0H with R0H = 0x09, then DAA R0H: 09 + 08 = 17 BCD.
    let (mut cpu, mut bus) = setup(&[0x80, 0x08, 0x0F, 0x00]);
    cpu.regs.write8(0, 0x09);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(0), 0x17);
    assert!(!cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_mulxu_b() {
    // MULXU.B R1L,R0: R0 low byte * R1L -> R0.
    let (mut cpu, mut bus) = setup(&[0x50, 0x90]);
    cpu.regs.write16(0, 0x0005);
    cpu.regs.write8(9, 7); // R1L
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read16(0), 35);
}

#[test]
fn test_divxu_b_quotient_and_remainder() {
    // DIVXU.B R1L,R0: 100 / 7 = 14 rem 2.
    let (mut cpu, mut bus) = setup(&[0x51, 0x90]);
    cpu.regs.write16(0, 100);
    cpu.regs.write8(9, 7);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read16(0), 0x020E);
    assert!(!cpu.regs.ccr.is_set(flags::Z));
}

#[test]
fn test_divxu_b_by_zero_only_sets_flags() {
    let (mut cpu, mut bus) = setup(&[0x51, 0x90]);
    cpu.regs.write16(0, 100);
    cpu.regs.write8(9, 0);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read16(0), 100); // destination preserved
    assert!(cpu.regs.ccr.is_set(flags::Z));
}

#[test]
fn test_mulxs_b_negative() {
    // MULXS.B R1L,R0: -2 * 3 = -6.
    let (mut cpu, mut bus) = setup(&[0x01, 0xC0, 0x50, 0x90]);
    cpu.regs.write16(0, 0x00FE); // low byte -2
    cpu.regs.write8(9, 3);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read16(0), 0xFFFA);
    assert!(cpu.regs.ccr.is_set(flags::N));
}

#[test]
fn test_exts_w() {
    // EXTS.W R0 sign-extends R0L.
    let (mut cpu, mut bus) = setup(&[0x17, 0xD0]);
    cpu.regs.write16(0, 0x0080);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read16(0), 0xFF80);
    assert!(cpu.regs.ccr.is_set(flags::N));
}

#[test]
fn test_extu_l() {
    // EXTU.L ER0 zero-extends R0.
    let (mut cpu, mut bus) = setup(&[0x17, 0x70]);
    cpu.regs.write32(0, 0xDEAD_BEEF);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read32(0), 0x0000_BEEF);
}

#[test]
fn test_shll_b_carries_out_msb() {
    // SHLL.B R0L.
    let (mut cpu, mut bus) = setup(&[0x10, 0x08]);
    cpu.regs.write8(8, 0x81);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0x02);
    assert!(cpu.regs.ccr.is_set(flags::C));
    assert!(!cpu.regs.ccr.is_set(flags::V));
}

#[test]
fn test_shal_b_sets_overflow_on_sign_change() {
    // SHAL.B R0L on 0x40.
    let (mut cpu, mut bus) = setup(&[0x10, 0x88]);
    cpu.regs.write8(8, 0x40);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0x80);
    assert!(cpu.regs.ccr.is_set(flags::V));
    assert!(!cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_shar_b_keeps_sign() {
    // SHAR.B R0L on 0x81.
    let (mut cpu, mut bus) = setup(&[0x11, 0x88]);
    cpu.regs.write8(8, 0x81);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0xC0);
    assert!(cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_rotxl_b_through_carry() {
    // ROTXL.B R0L with C set.
    let (mut cpu, mut bus) = setup(&[0x12, 0x08]);
    cpu.regs.write8(8, 0x80);
    cpu.regs.ccr.set(flags::C);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0x01);
    assert!(cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_and_b_clears_v_keeps_c() {
    // AND.B #0x0F,R0H.
    let (mut cpu, mut bus) = setup(&[0xE0, 0x0F]);
    cpu.regs.write8(0, 0xF3);
    cpu.regs.ccr.set(flags::C);
    cpu.regs.ccr.set(flags::V);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(0), 0x03);
    assert!(!cpu.regs.ccr.is_set(flags::V));
    assert!(cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_or_l_register_pair() {
    // OR.L ER1,ER0 (01F0 prefix).
    let (mut cpu, mut bus) = setup(&[0x01, 0xF0, 0x64, 0x10]);
    cpu.regs.write32(0, 0x0F0F_0000);
    cpu.regs.write32(1, 0x0000_F0F0);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read32(0), 0x0F0F_F0F0);
}

#[test]
fn test_not_b() {
    let (mut cpu, mut bus) = setup(&[0x17, 0x08]);
    cpu.regs.write8(8, 0x0F);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0xF0);
    assert!(cpu.regs.ccr.is_set(flags::N));
}

#[test]
fn test_andc_and_stc() {
    // ANDC #0x7F clears the interrupt mask; STC.B CCR,R0H observes it.
    let (mut cpu, mut bus) = setup(&[0x06, 0x7F, 0x02, 0x00]);
    cpu.step(&mut bus);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(0) & 0x80, 0);
}

#[test]
fn test_mov_b_imm_sets_nz() {
    // MOV.B #0x80,R2L.
    let (mut cpu, mut bus) = setup(&[0xFA, 0x80]);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(0xA), 0x80);
    assert!(cpu.regs.ccr.is_set(flags::N));
    assert!(!cpu.regs.ccr.is_set(flags::V));
}

#[test]
fn test_mov_w_absolute_round_trip() {
    // MOV.W @0x2000:16,R0 then MOV.W R0,@0x3000:16.
    let (mut cpu, mut bus) = setup(&[0x6B, 0x00, 0x20, 0x00, 0x6B, 0x80, 0x30, 0x00]);
    bus.write16(0x2000, 0xBEEF);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read16(0), 0xBEEF);
    cpu.step(&mut bus);
    assert_eq!(bus.read16(0x3000), 0xBEEF);
}

#[test]
fn test_mov_b_postincrement_load() {
    // MOV.B @ER1+,R0L twice.
    let (mut cpu, mut bus) = setup(&[0x6C, 0x18, 0x6C, 0x18]);
    cpu.regs.write32(1, 0x2000);
    bus.load(0x2000, &[0x11, 0x22]);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0x11);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0x22);
    assert_eq!(cpu.regs.read32(1), 0x2002);
}

#[test]
fn test_mov_w_predecrement_store_is_push() {
    // MOV.W R0,@-ER7.
    let (mut cpu, mut bus) = setup(&[0x6D, 0xF0]);
    cpu.regs.set_sp(0x2000);
    cpu.regs.write16(0, 0xCAFE);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.sp(), 0x1FFE);
    assert_eq!(bus.read16(0x1FFE), 0xCAFE);
}

#[test]
fn test_mov_w_disp16() {
    // MOV.W @(0x0010,ER1),R0.
    let (mut cpu, mut bus) = setup(&[0x6F, 0x10, 0x00, 0x10]);
    cpu.regs.write32(1, 0x2000);
    bus.write16(0x2010, 0x1357);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read16(0), 0x1357);
}

#[test]
fn test_mov_l_indirect_load() {
    // MOV.L @ER1,ER2.
    let (mut cpu, mut bus) = setup(&[0x01, 0x00, 0x69, 0x12]);
    cpu.regs.write32(1, 0x2000);
    bus.write16(0x2000, 0x1122);
    bus.write16(0x2002, 0x3344);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read32(2), 0x1122_3344);
}

#[test]
fn test_mov_l_predecrement_store() {
    // MOV.L ER0,@-ER7 (PUSH.L).
    let (mut cpu, mut bus) = setup(&[0x01, 0x00, 0x6D, 0xF0]);
    cpu.regs.set_sp(0x2000);
    cpu.regs.write32(0, 0xDEAD_BEEF);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.sp(), 0x1FFC);
    assert_eq!(bus.read16(0x1FFC), 0xDEAD);
    assert_eq!(bus.read16(0x1FFE), 0xBEEF);
}

#[test]
fn test_mov_b_abs8_uses_top_page() {
    // MOV.B @0x40:8,R0L reads 0xFF40.
    let (mut cpu, mut bus) = setup(&[0x28, 0x40]);
    bus.write8(0xFF40, 0x77);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0x77);
}

#[test]
fn test_eepmov_b_copies_r4l_bytes() {
    // EEPMOV.B with R4L = 3.
    let (mut cpu, mut bus) = setup(&[0x7B, 0x5C, 0x59, 0x8F]);
    cpu.regs.write8(0x0C, 3); // R4L
    cpu.regs.write32(5, 0x2000);
    cpu.regs.write32(6, 0x3000);
    bus.load(0x2000, &[0xAA, 0xBB, 0xCC, 0xDD]);
    cpu.step(&mut bus);

    assert_eq!(bus.read8(0x3000), 0xAA);
    assert_eq!(bus.read8(0x3001), 0xBB);
    assert_eq!(bus.read8(0x3002), 0xCC);
    assert_eq!(bus.read8(0x3003), 0x00); // fourth byte not copied
    assert_eq!(cpu.regs.read8(0x0C), 0);
    assert_eq!(cpu.regs.read32(5), 0x2003);
    assert_eq!(cpu.regs.read32(6), 0x3003);
}

#[test]
fn test_bcc8_taken_and_not_taken() {
    // BEQ .+0x10 with Z clear (not taken) then Z set (taken).
    let (mut cpu, mut bus) = setup(&[0x47, 0x10, 0x47, 0x10]);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
    cpu.regs.ccr.set(flags::Z);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0114);
}

#[test]
fn test_bge_taken_with_negative_and_overflow() {
    // BGE d:16 with N=1 V=1.
    let (mut cpu, mut bus) = setup(&[0x58, 0xC0, 0x00, 0x20]);
    cpu.regs.ccr.set(flags::N);
    cpu.regs.ccr.set(flags::V);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0124);
}

#[test]
fn test_blt_not_taken_with_negative_and_overflow() {
    // BLT d:16 with N=1 V=1 falls through; displacement still fetched.
    let (mut cpu, mut bus) = setup(&[0x58, 0xD0, 0x00, 0x20]);
    cpu.regs.ccr.set(flags::N);
    cpu.regs.ccr.set(flags::V);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0104);
}

#[test]
fn test_bsr_rts_round_trip() {
    // BSR .+0x0E, then RTS at the target returns past the BSR.
    let (mut cpu, mut bus) = setup(&[0x55, 0x0E]);
    bus.load(0x0110, &[0x54, 0x70]); // RTS
    cpu.regs.set_sp(0x2000);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0110);
    assert_eq!(cpu.regs.sp(), 0x1FFE);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(cpu.regs.sp(), 0x2000);
}

#[test]
fn test_jmp_abs24() {
    // JMP @0x000200:24.
    let (mut cpu, mut bus) = setup(&[0x5A, 0x00, 0x02, 0x00]);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0200);
}

#[test]
fn test_jsr_memory_indirect() {
    // JSR @@0x20:8 through the vector at 0x0020.
    let (mut cpu, mut bus) = setup(&[0x5F, 0x20]);
    bus.write16(0x0020, 0x0300);
    cpu.regs.set_sp(0x2000);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0300);
    assert_eq!(bus.read16(0x1FFE), 0x0102);
}

#[test]
fn test_rte_restores_ccr_then_pc() {
    // Frame: CCR word (CCR in upper byte), then return address.
    let (mut cpu, mut bus) = setup(&[0x56, 0x70]);
    cpu.regs.set_sp(0x1FFC);
    bus.write16(0x1FFC, 0x0500); // CCR = 0x05
    bus.write16(0x1FFE, 0x0400);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.ccr.0, 0x05);
    assert_eq!(cpu.regs.pc, 0x0400);
    assert_eq!(cpu.regs.sp(), 0x2000);
}

#[test]
fn test_bset_and_btst_register() {
    // BSET #5,R0L then BTST #5,R0L.
    let (mut cpu, mut bus) = setup(&[0x70, 0x58, 0x73, 0x58]);
    cpu.regs.write8(8, 0x00);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0x20);
    cpu.step(&mut bus);
    assert!(!cpu.regs.ccr.is_set(flags::Z));
}

#[test]
fn test_btst_bit_number_from_register() {
    // BTST R1L,R0L with R1L = 1 and bit 1 clear.
    let (mut cpu, mut bus) = setup(&[0x63, 0x98]);
    cpu.regs.write8(8, 0xFD);
    cpu.regs.write8(9, 0x01);
    cpu.step(&mut bus);
    assert!(cpu.regs.ccr.is_set(flags::Z));
}

#[test]
fn test_bset_absolute_8() {
    // BSET #3,@0x10:8 targets 0xFF10.
    let (mut cpu, mut bus) = setup(&[0x7F, 0x10, 0x70, 0x30]);
    cpu.step(&mut bus);
    assert_eq!(bus.read8(0xFF10), 0x08);
}

#[test]
fn test_bld_indirect() {
    // BLD #2,@ER1.
    let (mut cpu, mut bus) = setup(&[0x7C, 0x10, 0x77, 0x20]);
    cpu.regs.write32(1, 0x2000);
    bus.write8(0x2000, 0x04);
    cpu.step(&mut bus);
    assert!(cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_bist_stores_inverted_carry() {
    // BIST #0,@0x11:8 with C set clears bit 0.
    let (mut cpu, mut bus) = setup(&[0x7F, 0x11, 0x67, 0x80]);
    bus.write8(0xFF11, 0xFF);
    cpu.regs.ccr.set(flags::C);
    cpu.step(&mut bus);
    assert_eq!(bus.read8(0xFF11), 0xFE);
}

#[test]
fn test_band_accumulates_into_carry() {
    // BAND #0,R0L twice: first bit set keeps C, then clear bit drops it.
    let (mut cpu, mut bus) = setup(&[0x76, 0x08, 0x76, 0x18]);
    cpu.regs.write8(8, 0x01); // bit 0 set, bit 1 clear
    cpu.regs.ccr.set(flags::C);
    cpu.step(&mut bus);
    assert!(cpu.regs.ccr.is_set(flags::C));
    cpu.step(&mut bus);
    assert!(!cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_das_after_bcd_subtract() {
    // SUB.B R1H,R0H with 0x32 - 0x05, then DAS R0H: 32 - 05 = 27 BCD.
    let (mut cpu, mut bus) = setup(&[0x18, 0x10, 0x1F, 0x00]);
    cpu.regs.write8(0, 0x32);
    cpu.regs.write8(1, 0x05);
    cpu.step(&mut bus);
    assert!(cpu.regs.ccr.is_set(flags::H));
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(0), 0x27);
    assert!(!cpu.regs.ccr.is_set(flags::C));
}

#[test]
fn test_mov_b_disp24_load() {
    // MOV.B @(0x000010,ER1),R0L.
    let (mut cpu, mut bus) = setup(&[0x78, 0x10, 0x6A, 0x28, 0x00, 0x00, 0x00, 0x10]);
    cpu.regs.write32(1, 0x2000);
    bus.write8(0x2010, 0x9C);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read8(8), 0x9C);
    assert!(cpu.regs.ccr.is_set(flags::N));
    assert_eq!(cpu.regs.pc, 0x0108);
}

#[test]
fn test_mov_w_disp24_store() {
    // MOV.W R0,@(0x000020,ER1).
    let (mut cpu, mut bus) = setup(&[0x78, 0x10, 0x6B, 0xA0, 0x00, 0x00, 0x00, 0x20]);
    cpu.regs.write32(1, 0x2000);
    cpu.regs.write16(0, 0x4321);
    cpu.step(&mut bus);
    assert_eq!(bus.read16(0x2020), 0x4321);
}

#[test]
fn test_mov_l_disp24_load() {
    // MOV.L @(0x000010,ER1),ER2.
    let (mut cpu, mut bus) = setup(&[
        0x01, 0x00, 0x78, 0x10, 0x6B, 0x22, 0x00, 0x00, 0x00, 0x10,
    ]);
    cpu.regs.write32(1, 0x2000);
    bus.write16(0x2010, 0x1234);
    bus.write16(0x2012, 0x5678);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.read32(2), 0x1234_5678);
    assert_eq!(cpu.regs.pc, 0x010A);
}

#[test]
fn test_eepmov_w_counts_with_r4() {
    // EEPMOV.W with R4 = 0x0100: a byte count wider than R4L.
    let (mut cpu, mut bus) = setup(&[0x7B, 0xD4, 0x59, 0x8F]);
    cpu.regs.write16(4, 0x0100);
    cpu.regs.write32(5, 0x2000);
    cpu.regs.write32(6, 0x3000);
    for offset in 0u16..0x100 {
        bus.write8(0x2000 + offset, offset as u8);
    }
    cpu.step(&mut bus);

    assert_eq!(bus.read8(0x3001), 0x01);
    assert_eq!(bus.read8(0x30FF), 0xFF);
    assert_eq!(bus.read8(0x3100), 0x00); // one past the copy
    assert_eq!(cpu.regs.read16(4), 0);
    assert_eq!(cpu.regs.read32(5), 0x2100);
    assert_eq!(cpu.regs.read32(6), 0x3100);
}

#[test]
fn test_undefined_opcode_has_no_effect() {
    // 0x0A10 matches nothing in the 0x0A column.
    let (mut cpu, mut bus) = setup(&[0x0A, 0x10]);
    cpu.regs.write32(0, 0x1234_5678);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.pc, 0x0102);
    assert_eq!(cpu.regs.read32(0), 0x1234_5678);
    assert_eq!(cpu.regs.ccr.0, 0x80);
}

#[test]
fn test_ldc_word_from_memory_uses_upper_byte() {
    // LDC.W @ER1,CCR.
    let (mut cpu, mut bus) = setup(&[0x01, 0x40, 0x69, 0x10]);
    cpu.regs.write32(1, 0x2000);
    bus.write16(0x2000, 0xA500);
    cpu.step(&mut bus);
    assert_eq!(cpu.regs.ccr.0, 0xA5);
}
