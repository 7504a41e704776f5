//! 6502 addressing modes.
//!
//! The 6502 has 12 addressing modes as far as the engine is concerned
//! (accumulator operands are folded into `Implied`):
//! - Implied: No memory operand (e.g., CLC, RTS, ASL A)
//! - Immediate: #$nn (literal value)
//! - Zero Page: $nn (8-bit address in page zero)
//! - Zero Page,X: $nn,X (8-bit address + X, wraps in page zero)
//! - Zero Page,Y: $nn,Y (8-bit address + Y, wraps in page zero)
//! - Relative: Branch offset (-128 to +127)
//! - Absolute: $nnnn (16-bit address)
//! - Absolute,X: $nnnn,X (16-bit address + X, may cross page)
//! - Absolute,Y: $nnnn,Y (16-bit address + Y, may cross page)
//! - Indirect: ($nnnn) (JMP only, buggy page boundary behavior)
//! - Indexed Indirect: ($nn,X) (pointer in zero page indexed by X)
//! - Indirect Indexed: ($nn),Y (zero page pointer + Y)
//!
//! Resolving a mode consumes its operand bytes, records where the operand
//! lives, and reports whether the mode may cost an extra cycle (1) or not
//! (0). Whether that cycle is actually charged also depends on the
//! operation; see `R6502::clock`.

use std::fmt;

use emu_core::Bus;

use crate::R6502;

/// How an instruction locates its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressingMode {
    /// No memory operand. Shifts and rotates act on the accumulator.
    Implied,
    /// Operand is the byte after the opcode.
    Immediate,
    /// `$nn`
    ZeroPage,
    /// `$nn,X` - wraps within page zero.
    ZeroPageX,
    /// `$nn,Y` - wraps within page zero.
    ZeroPageY,
    /// Signed displacement for branches.
    Relative,
    /// `$nnnn`
    Absolute,
    /// `$nnnn,X` - extra cycle on page cross.
    AbsoluteX,
    /// `$nnnn,Y` - extra cycle on page cross.
    AbsoluteY,
    /// `($nnnn)` - JMP only.
    Indirect,
    /// `($nn,X)`
    IndexedIndirect,
    /// `($nn),Y` - extra cycle on page cross.
    IndirectIndexed,
}

impl AddressingMode {
    /// Number of operand bytes following the opcode.
    #[must_use]
    pub const fn operand_len(self) -> u16 {
        match self {
            Self::Implied => 0,
            Self::Immediate
            | Self::ZeroPage
            | Self::ZeroPageX
            | Self::ZeroPageY
            | Self::Relative
            | Self::IndexedIndirect
            | Self::IndirectIndexed => 1,
            Self::Absolute | Self::AbsoluteX | Self::AbsoluteY | Self::Indirect => 2,
        }
    }

    /// Short assembler-style name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Implied => "IMP",
            Self::Immediate => "IMM",
            Self::ZeroPage => "ZP",
            Self::ZeroPageX => "ZPX",
            Self::ZeroPageY => "ZPY",
            Self::Relative => "REL",
            Self::Absolute => "ABS",
            Self::AbsoluteX => "ABSX",
            Self::AbsoluteY => "ABSY",
            Self::Indirect => "IND",
            Self::IndexedIndirect => "INDX",
            Self::IndirectIndexed => "INDY",
        }
    }
}

impl fmt::Display for AddressingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where the current instruction's operand lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Operand {
    /// No memory operand; the accumulator stands in for it.
    #[default]
    Implied,
    /// Effective address. Immediate operands point at the byte after the
    /// opcode.
    Address(u16),
    /// Sign-extended branch displacement, applied to PC when taken.
    Relative(u16),
}

/// True when `a` and `b` lie in different 256-byte pages.
pub(crate) const fn page_crossed(a: u16, b: u16) -> bool {
    a & 0xFF00 != b & 0xFF00
}

impl<B: Bus> R6502<B> {
    /// Resolve the operand for `mode`, advancing PC past its bytes.
    ///
    /// Returns 1 if the mode crossed a page and may cost an extra cycle.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> u8 {
        match mode {
            AddressingMode::Implied => {
                self.operand = Operand::Implied;
                self.data = self.regs.a;
                0
            }
            AddressingMode::Immediate => {
                let addr = self.regs.pc;
                self.regs.pc = addr.wrapping_add(1);
                self.operand = Operand::Address(addr);
                0
            }
            AddressingMode::ZeroPage => {
                let zp = self.fetch_byte();
                self.operand = Operand::Address(u16::from(zp));
                0
            }
            AddressingMode::ZeroPageX => {
                let zp = self.fetch_byte().wrapping_add(self.regs.x);
                self.operand = Operand::Address(u16::from(zp));
                0
            }
            AddressingMode::ZeroPageY => {
                let zp = self.fetch_byte().wrapping_add(self.regs.y);
                self.operand = Operand::Address(u16::from(zp));
                0
            }
            AddressingMode::Relative => {
                let offset = self.fetch_byte() as i8;
                self.operand = Operand::Relative(i16::from(offset) as u16);
                0
            }
            AddressingMode::Absolute => {
                let addr = self.fetch_word();
                self.operand = Operand::Address(addr);
                0
            }
            AddressingMode::AbsoluteX => {
                let base = self.fetch_word();
                self.indexed(base, self.regs.x)
            }
            AddressingMode::AbsoluteY => {
                let base = self.fetch_word();
                self.indexed(base, self.regs.y)
            }
            AddressingMode::Indirect => {
                let ptr = self.fetch_word();
                // The high byte is fetched without carrying into the pointer's
                // high byte: JMP ($30FF) reads $30FF and $3000.
                let hi_ptr = (ptr & 0xFF00) | (ptr.wrapping_add(1) & 0x00FF);
                let lo = self.read(ptr);
                let hi = self.read(hi_ptr);
                self.operand = Operand::Address(u16::from_le_bytes([lo, hi]));
                0
            }
            AddressingMode::IndexedIndirect => {
                let ptr = self.fetch_byte().wrapping_add(self.regs.x);
                let addr = self.read_zero_page_word(ptr);
                self.operand = Operand::Address(addr);
                0
            }
            AddressingMode::IndirectIndexed => {
                let ptr = self.fetch_byte();
                let base = self.read_zero_page_word(ptr);
                self.indexed(base, self.regs.y)
            }
        }
    }

    fn indexed(&mut self, base: u16, index: u8) -> u8 {
        let addr = base.wrapping_add(u16::from(index));
        self.operand = Operand::Address(addr);
        u8::from(page_crossed(base, addr))
    }

    /// Read a pointer from page zero; the high byte wraps to $00 after $FF.
    fn read_zero_page_word(&mut self, ptr: u8) -> u16 {
        let lo = self.read(u16::from(ptr));
        let hi = self.read(u16::from(ptr.wrapping_add(1)));
        u16::from_le_bytes([lo, hi])
    }
}
