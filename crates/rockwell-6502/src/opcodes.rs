//! Opcode table.
//!
//! One entry per opcode byte: the operation to run, how to find its operand,
//! and its base cycle count from the data sheet. Page-cross and branch
//! penalties are added at execution time. The 105 undocumented encodings all
//! map to a single two-cycle, one-byte no-op.

use std::fmt;

use crate::AddressingMode;
use crate::AddressingMode as M;
use Mnemonic as Op;

/// Instruction mnemonic; doubles as the operation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
    /// Undocumented opcode, executed as a no-op.
    Illegal,
}

impl Mnemonic {
    /// Upper-case assembler mnemonic, `???` for undocumented opcodes.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Adc => "ADC",
            Self::And => "AND",
            Self::Asl => "ASL",
            Self::Bcc => "BCC",
            Self::Bcs => "BCS",
            Self::Beq => "BEQ",
            Self::Bit => "BIT",
            Self::Bmi => "BMI",
            Self::Bne => "BNE",
            Self::Bpl => "BPL",
            Self::Brk => "BRK",
            Self::Bvc => "BVC",
            Self::Bvs => "BVS",
            Self::Clc => "CLC",
            Self::Cld => "CLD",
            Self::Cli => "CLI",
            Self::Clv => "CLV",
            Self::Cmp => "CMP",
            Self::Cpx => "CPX",
            Self::Cpy => "CPY",
            Self::Dec => "DEC",
            Self::Dex => "DEX",
            Self::Dey => "DEY",
            Self::Eor => "EOR",
            Self::Inc => "INC",
            Self::Inx => "INX",
            Self::Iny => "INY",
            Self::Jmp => "JMP",
            Self::Jsr => "JSR",
            Self::Lda => "LDA",
            Self::Ldx => "LDX",
            Self::Ldy => "LDY",
            Self::Lsr => "LSR",
            Self::Nop => "NOP",
            Self::Ora => "ORA",
            Self::Pha => "PHA",
            Self::Php => "PHP",
            Self::Pla => "PLA",
            Self::Plp => "PLP",
            Self::Rol => "ROL",
            Self::Ror => "ROR",
            Self::Rti => "RTI",
            Self::Rts => "RTS",
            Self::Sbc => "SBC",
            Self::Sec => "SEC",
            Self::Sed => "SED",
            Self::Sei => "SEI",
            Self::Sta => "STA",
            Self::Stx => "STX",
            Self::Sty => "STY",
            Self::Tax => "TAX",
            Self::Tay => "TAY",
            Self::Tsx => "TSX",
            Self::Txa => "TXA",
            Self::Txs => "TXS",
            Self::Tya => "TYA",
            Self::Illegal => "???",
        }
    }
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decoded form of one opcode byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: Mnemonic,
    pub mode: AddressingMode,
    /// Base cycle count, before page-cross and branch penalties.
    pub cycles: u8,
}

impl Instruction {
    /// Filler for undocumented opcodes.
    pub const ILLEGAL: Self = Self {
        mnemonic: Mnemonic::Illegal,
        mode: AddressingMode::Implied,
        cycles: 2,
    };

    /// Total length in bytes, opcode included.
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub const fn len(&self) -> u16 {
        1 + self.mode.operand_len()
    }

    /// False for the undocumented-opcode filler.
    #[must_use]
    pub const fn is_documented(&self) -> bool {
        !matches!(self.mnemonic, Mnemonic::Illegal)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.mnemonic, self.mode)
    }
}

/// Look up the descriptor for an opcode byte. Every byte has one.
#[must_use]
pub fn lookup(opcode: u8) -> &'static Instruction {
    &OPCODE_TABLE[usize::from(opcode)]
}

/// Descriptors for all 256 opcode bytes.
pub static OPCODE_TABLE: [Instruction; 256] = build_table();

const fn build_table() -> [Instruction; 256] {
    let mut table = [Instruction::ILLEGAL; 256];
    let mut i = 0;
    while i < DOCUMENTED.len() {
        let (opcode, mnemonic, mode, cycles) = DOCUMENTED[i];
        table[opcode as usize] = Instruction {
            mnemonic,
            mode,
            cycles,
        };
        i += 1;
    }
    table
}

/// The 151 documented encodings.
const DOCUMENTED: [(u8, Mnemonic, AddressingMode, u8); 151] = [
    (0x00, Op::Brk, M::Implied, 7),
    (0x01, Op::Ora, M::IndexedIndirect, 6),
    (0x05, Op::Ora, M::ZeroPage, 3),
    (0x06, Op::Asl, M::ZeroPage, 5),
    (0x08, Op::Php, M::Implied, 3),
    (0x09, Op::Ora, M::Immediate, 2),
    (0x0A, Op::Asl, M::Implied, 2),
    (0x0D, Op::Ora, M::Absolute, 4),
    (0x0E, Op::Asl, M::Absolute, 6),
    (0x10, Op::Bpl, M::Relative, 2),
    (0x11, Op::Ora, M::IndirectIndexed, 5),
    (0x15, Op::Ora, M::ZeroPageX, 4),
    (0x16, Op::Asl, M::ZeroPageX, 6),
    (0x18, Op::Clc, M::Implied, 2),
    (0x19, Op::Ora, M::AbsoluteY, 4),
    (0x1D, Op::Ora, M::AbsoluteX, 4),
    (0x1E, Op::Asl, M::AbsoluteX, 7),
    (0x20, Op::Jsr, M::Absolute, 6),
    (0x21, Op::And, M::IndexedIndirect, 6),
    (0x24, Op::Bit, M::ZeroPage, 3),
    (0x25, Op::And, M::ZeroPage, 3),
    (0x26, Op::Rol, M::ZeroPage, 5),
    (0x28, Op::Plp, M::Implied, 4),
    (0x29, Op::And, M::Immediate, 2),
    (0x2A, Op::Rol, M::Implied, 2),
    (0x2C, Op::Bit, M::Absolute, 4),
    (0x2D, Op::And, M::Absolute, 4),
    (0x2E, Op::Rol, M::Absolute, 6),
    (0x30, Op::Bmi, M::Relative, 2),
    (0x31, Op::And, M::IndirectIndexed, 5),
    (0x35, Op::And, M::ZeroPageX, 4),
    (0x36, Op::Rol, M::ZeroPageX, 6),
    (0x38, Op::Sec, M::Implied, 2),
    (0x39, Op::And, M::AbsoluteY, 4),
    (0x3D, Op::And, M::AbsoluteX, 4),
    (0x3E, Op::Rol, M::AbsoluteX, 7),
    (0x40, Op::Rti, M::Implied, 6),
    (0x41, Op::Eor, M::IndexedIndirect, 6),
    (0x45, Op::Eor, M::ZeroPage, 3),
    (0x46, Op::Lsr, M::ZeroPage, 5),
    (0x48, Op::Pha, M::Implied, 3),
    (0x49, Op::Eor, M::Immediate, 2),
    (0x4A, Op::Lsr, M::Implied, 2),
    (0x4C, Op::Jmp, M::Absolute, 3),
    (0x4D, Op::Eor, M::Absolute, 4),
    (0x4E, Op::Lsr, M::Absolute, 6),
    (0x50, Op::Bvc, M::Relative, 2),
    (0x51, Op::Eor, M::IndirectIndexed, 5),
    (0x55, Op::Eor, M::ZeroPageX, 4),
    (0x56, Op::Lsr, M::ZeroPageX, 6),
    (0x58, Op::Cli, M::Implied, 2),
    (0x59, Op::Eor, M::AbsoluteY, 4),
    (0x5D, Op::Eor, M::AbsoluteX, 4),
    (0x5E, Op::Lsr, M::AbsoluteX, 7),
    (0x60, Op::Rts, M::Implied, 6),
    (0x61, Op::Adc, M::IndexedIndirect, 6),
    (0x65, Op::Adc, M::ZeroPage, 3),
    (0x66, Op::Ror, M::ZeroPage, 5),
    (0x68, Op::Pla, M::Implied, 4),
    (0x69, Op::Adc, M::Immediate, 2),
    (0x6A, Op::Ror, M::Implied, 2),
    (0x6C, Op::Jmp, M::Indirect, 5),
    (0x6D, Op::Adc, M::Absolute, 4),
    (0x6E, Op::Ror, M::Absolute, 6),
    (0x70, Op::Bvs, M::Relative, 2),
    (0x71, Op::Adc, M::IndirectIndexed, 5),
    (0x75, Op::Adc, M::ZeroPageX, 4),
    (0x76, Op::Ror, M::ZeroPageX, 6),
    (0x78, Op::Sei, M::Implied, 2),
    (0x79, Op::Adc, M::AbsoluteY, 4),
    (0x7D, Op::Adc, M::AbsoluteX, 4),
    (0x7E, Op::Ror, M::AbsoluteX, 7),
    (0x81, Op::Sta, M::IndexedIndirect, 6),
    (0x84, Op::Sty, M::ZeroPage, 3),
    (0x85, Op::Sta, M::ZeroPage, 3),
    (0x86, Op::Stx, M::ZeroPage, 3),
    (0x88, Op::Dey, M::Implied, 2),
    (0x8A, Op::Txa, M::Implied, 2),
    (0x8C, Op::Sty, M::Absolute, 4),
    (0x8D, Op::Sta, M::Absolute, 4),
    (0x8E, Op::Stx, M::Absolute, 4),
    (0x90, Op::Bcc, M::Relative, 2),
    (0x91, Op::Sta, M::IndirectIndexed, 6),
    (0x94, Op::Sty, M::ZeroPageX, 4),
    (0x95, Op::Sta, M::ZeroPageX, 4),
    (0x96, Op::Stx, M::ZeroPageY, 4),
    (0x98, Op::Tya, M::Implied, 2),
    (0x99, Op::Sta, M::AbsoluteY, 5),
    (0x9A, Op::Txs, M::Implied, 2),
    (0x9D, Op::Sta, M::AbsoluteX, 5),
    (0xA0, Op::Ldy, M::Immediate, 2),
    (0xA1, Op::Lda, M::IndexedIndirect, 6),
    (0xA2, Op::Ldx, M::Immediate, 2),
    (0xA4, Op::Ldy, M::ZeroPage, 3),
    (0xA5, Op::Lda, M::ZeroPage, 3),
    (0xA6, Op::Ldx, M::ZeroPage, 3),
    (0xA8, Op::Tay, M::Implied, 2),
    (0xA9, Op::Lda, M::Immediate, 2),
    (0xAA, Op::Tax, M::Implied, 2),
    (0xAC, Op::Ldy, M::Absolute, 4),
    (0xAD, Op::Lda, M::Absolute, 4),
    (0xAE, Op::Ldx, M::Absolute, 4),
    (0xB0, Op::Bcs, M::Relative, 2),
    (0xB1, Op::Lda, M::IndirectIndexed, 5),
    (0xB4, Op::Ldy, M::ZeroPageX, 4),
    (0xB5, Op::Lda, M::ZeroPageX, 4),
    (0xB6, Op::Ldx, M::ZeroPageY, 4),
    (0xB8, Op::Clv, M::Implied, 2),
    (0xB9, Op::Lda, M::AbsoluteY, 4),
    (0xBA, Op::Tsx, M::Implied, 2),
    (0xBC, Op::Ldy, M::AbsoluteX, 4),
    (0xBD, Op::Lda, M::AbsoluteX, 4),
    (0xBE, Op::Ldx, M::AbsoluteY, 4),
    (0xC0, Op::Cpy, M::Immediate, 2),
    (0xC1, Op::Cmp, M::IndexedIndirect, 6),
    (0xC4, Op::Cpy, M::ZeroPage, 3),
    (0xC5, Op::Cmp, M::ZeroPage, 3),
    (0xC6, Op::Dec, M::ZeroPage, 5),
    (0xC8, Op::Iny, M::Implied, 2),
    (0xC9, Op::Cmp, M::Immediate, 2),
    (0xCA, Op::Dex, M::Implied, 2),
    (0xCC, Op::Cpy, M::Absolute, 4),
    (0xCD, Op::Cmp, M::Absolute, 4),
    (0xCE, Op::Dec, M::Absolute, 6),
    (0xD0, Op::Bne, M::Relative, 2),
    (0xD1, Op::Cmp, M::IndirectIndexed, 5),
    (0xD5, Op::Cmp, M::ZeroPageX, 4),
    (0xD6, Op::Dec, M::ZeroPageX, 6),
    (0xD8, Op::Cld, M::Implied, 2),
    (0xD9, Op::Cmp, M::AbsoluteY, 4),
    (0xDD, Op::Cmp, M::AbsoluteX, 4),
    (0xDE, Op::Dec, M::AbsoluteX, 7),
    (0xE0, Op::Cpx, M::Immediate, 2),
    (0xE1, Op::Sbc, M::IndexedIndirect, 6),
    (0xE4, Op::Cpx, M::ZeroPage, 3),
    (0xE5, Op::Sbc, M::ZeroPage, 3),
    (0xE6, Op::Inc, M::ZeroPage, 5),
    (0xE8, Op::Inx, M::Implied, 2),
    (0xE9, Op::Sbc, M::Immediate, 2),
    (0xEA, Op::Nop, M::Implied, 2),
    (0xEC, Op::Cpx, M::Absolute, 4),
    (0xED, Op::Sbc, M::Absolute, 4),
    (0xEE, Op::Inc, M::Absolute, 6),
    (0xF0, Op::Beq, M::Relative, 2),
    (0xF1, Op::Sbc, M::IndirectIndexed, 5),
    (0xF5, Op::Sbc, M::ZeroPageX, 4),
    (0xF6, Op::Inc, M::ZeroPageX, 6),
    (0xF8, Op::Sed, M::Implied, 2),
    (0xF9, Op::Sbc, M::AbsoluteY, 4),
    (0xFD, Op::Sbc, M::AbsoluteX, 4),
    (0xFE, Op::Inc, M::AbsoluteX, 7),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_byte_has_a_descriptor() {
        for opcode in 0..=0xFF_u8 {
            let instruction = lookup(opcode);
            assert!(instruction.cycles >= 1, "opcode ${opcode:02X}");
            assert!((1..=3).contains(&instruction.len()), "opcode ${opcode:02X}");
        }
    }

    #[test]
    fn documented_opcodes_are_unique() {
        let opcodes: HashSet<u8> = DOCUMENTED.iter().map(|entry| entry.0).collect();
        assert_eq!(opcodes.len(), DOCUMENTED.len());
        let documented = OPCODE_TABLE.iter().filter(|i| i.is_documented()).count();
        assert_eq!(documented, 151);
    }

    #[test]
    fn all_56_mnemonics_present() {
        let mnemonics: HashSet<Mnemonic> = DOCUMENTED.iter().map(|entry| entry.1).collect();
        assert_eq!(mnemonics.len(), 56);
        assert!(!mnemonics.contains(&Mnemonic::Illegal));
    }

    #[test]
    fn filler_is_two_cycle_implied() {
        for opcode in [0x02, 0x1A, 0x80, 0xFF] {
            assert_eq!(*lookup(opcode), Instruction::ILLEGAL);
        }
        assert_eq!(Instruction::ILLEGAL.len(), 1);
        assert_eq!(Instruction::ILLEGAL.to_string(), "??? IMP");
    }

    #[test]
    fn memory_operations_never_use_implied_or_relative() {
        let needs_address = [
            Mnemonic::Sta,
            Mnemonic::Stx,
            Mnemonic::Sty,
            Mnemonic::Jmp,
            Mnemonic::Jsr,
            Mnemonic::Inc,
            Mnemonic::Dec,
            Mnemonic::Lda,
            Mnemonic::Cmp,
            Mnemonic::Bit,
        ];
        for instruction in OPCODE_TABLE.iter() {
            if needs_address.contains(&instruction.mnemonic) {
                assert!(
                    !matches!(
                        instruction.mode,
                        AddressingMode::Implied | AddressingMode::Relative
                    ),
                    "{instruction}"
                );
            }
        }
    }

    #[test]
    fn branches_are_relative() {
        for opcode in [0x10, 0x30, 0x50, 0x70, 0x90, 0xB0, 0xD0, 0xF0] {
            let instruction = lookup(opcode);
            assert_eq!(instruction.mode, AddressingMode::Relative);
            assert_eq!(instruction.cycles, 2);
        }
    }

    #[test]
    fn spot_check_data_sheet_timings() {
        assert_eq!(
            *lookup(0xA9),
            Instruction {
                mnemonic: Mnemonic::Lda,
                mode: AddressingMode::Immediate,
                cycles: 2,
            }
        );
        assert_eq!(lookup(0x6C).cycles, 5);
        assert_eq!(lookup(0x91).cycles, 6);
        assert_eq!(lookup(0x9D).cycles, 5);
        assert_eq!(lookup(0xFE).cycles, 7);
        assert_eq!(lookup(0x00).cycles, 7);
        assert_eq!(lookup(0x20).to_string(), "JSR ABS");
    }
}
