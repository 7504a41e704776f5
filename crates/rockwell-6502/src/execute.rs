//! Instruction operations.
//!
//! Each operation runs after its addressing mode has been resolved and
//! returns 1 if it is one of the read instructions that pay for a page
//! crossing, 0 otherwise. Branches charge their own extra cycles.

use emu_core::Bus;
use log::debug;

use crate::addressing::{Operand, page_crossed};
use crate::cpu::IRQ_VECTOR;
use crate::flags::{C, D, I, N, V, Z};
use crate::{Mnemonic, R6502, Status};

impl<B: Bus> R6502<B> {
    /// Run `mnemonic` against the resolved operand.
    pub(crate) fn execute(&mut self, mnemonic: Mnemonic) -> u8 {
        match mnemonic {
            // Loads and stores
            Mnemonic::Lda => {
                self.regs.a = self.fetch();
                self.regs.p.update_nz(self.regs.a);
                1
            }
            Mnemonic::Ldx => {
                self.regs.x = self.fetch();
                self.regs.p.update_nz(self.regs.x);
                1
            }
            Mnemonic::Ldy => {
                self.regs.y = self.fetch();
                self.regs.p.update_nz(self.regs.y);
                1
            }
            Mnemonic::Sta => {
                let addr = self.target();
                self.write(addr, self.regs.a);
                0
            }
            Mnemonic::Stx => {
                let addr = self.target();
                self.write(addr, self.regs.x);
                0
            }
            Mnemonic::Sty => {
                let addr = self.target();
                self.write(addr, self.regs.y);
                0
            }

            // Arithmetic
            Mnemonic::Adc => {
                let value = self.fetch();
                self.adc(value);
                1
            }
            Mnemonic::Sbc => {
                let value = self.fetch();
                self.sbc(value);
                1
            }

            // Logic
            Mnemonic::And => {
                let value = self.fetch();
                self.regs.a &= value;
                self.regs.p.update_nz(self.regs.a);
                1
            }
            Mnemonic::Ora => {
                let value = self.fetch();
                self.regs.a |= value;
                self.regs.p.update_nz(self.regs.a);
                1
            }
            Mnemonic::Eor => {
                let value = self.fetch();
                self.regs.a ^= value;
                self.regs.p.update_nz(self.regs.a);
                1
            }
            Mnemonic::Bit => {
                let value = self.fetch();
                self.set_flag(Z, self.regs.a & value == 0);
                self.set_flag(N, value & 0x80 != 0);
                self.set_flag(V, value & 0x40 != 0);
                0
            }

            // Shifts and rotates
            Mnemonic::Asl => {
                let value = self.fetch();
                self.set_flag(C, value & 0x80 != 0);
                self.write_back(value << 1);
                0
            }
            Mnemonic::Lsr => {
                let value = self.fetch();
                self.set_flag(C, value & 0x01 != 0);
                self.write_back(value >> 1);
                0
            }
            Mnemonic::Rol => {
                let value = self.fetch();
                let carry_in = u8::from(self.get_flag(C));
                self.set_flag(C, value & 0x80 != 0);
                self.write_back((value << 1) | carry_in);
                0
            }
            Mnemonic::Ror => {
                let value = self.fetch();
                let carry_in = u8::from(self.get_flag(C)) << 7;
                self.set_flag(C, value & 0x01 != 0);
                self.write_back((value >> 1) | carry_in);
                0
            }

            // Increments and decrements
            Mnemonic::Inc => {
                let value = self.fetch().wrapping_add(1);
                self.write_back(value);
                0
            }
            Mnemonic::Dec => {
                let value = self.fetch().wrapping_sub(1);
                self.write_back(value);
                0
            }
            Mnemonic::Inx => {
                self.regs.x = self.regs.x.wrapping_add(1);
                self.regs.p.update_nz(self.regs.x);
                0
            }
            Mnemonic::Iny => {
                self.regs.y = self.regs.y.wrapping_add(1);
                self.regs.p.update_nz(self.regs.y);
                0
            }
            Mnemonic::Dex => {
                self.regs.x = self.regs.x.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.x);
                0
            }
            Mnemonic::Dey => {
                self.regs.y = self.regs.y.wrapping_sub(1);
                self.regs.p.update_nz(self.regs.y);
                0
            }

            // Compares
            Mnemonic::Cmp => {
                self.compare(self.regs.a);
                1
            }
            Mnemonic::Cpx => {
                self.compare(self.regs.x);
                0
            }
            Mnemonic::Cpy => {
                self.compare(self.regs.y);
                0
            }

            // Branches
            Mnemonic::Bcc => self.branch(!self.get_flag(C)),
            Mnemonic::Bcs => self.branch(self.get_flag(C)),
            Mnemonic::Bne => self.branch(!self.get_flag(Z)),
            Mnemonic::Beq => self.branch(self.get_flag(Z)),
            Mnemonic::Bpl => self.branch(!self.get_flag(N)),
            Mnemonic::Bmi => self.branch(self.get_flag(N)),
            Mnemonic::Bvc => self.branch(!self.get_flag(V)),
            Mnemonic::Bvs => self.branch(self.get_flag(V)),

            // Jumps, calls and returns
            Mnemonic::Jmp => {
                self.regs.pc = self.target();
                0
            }
            Mnemonic::Jsr => {
                let return_addr = self.regs.pc.wrapping_sub(1);
                self.push_word(return_addr);
                self.regs.pc = self.target();
                0
            }
            Mnemonic::Rts => {
                self.regs.pc = self.pull_word().wrapping_add(1);
                0
            }
            Mnemonic::Rti => {
                let status = self.pull();
                self.regs.p = Status::from_byte(status);
                self.regs.pc = self.pull_word();
                0
            }
            Mnemonic::Brk => {
                // The byte after BRK is padding; the return address skips it.
                let return_addr = self.regs.pc.wrapping_add(1);
                self.push_word(return_addr);
                let status = self.regs.p.to_byte_brk();
                self.push(status);
                self.set_flag(I, true);
                self.regs.pc = self.read_word(IRQ_VECTOR);
                0
            }

            // Stack
            Mnemonic::Pha => {
                self.push(self.regs.a);
                0
            }
            Mnemonic::Php => {
                let status = self.regs.p.to_byte_brk();
                self.push(status);
                0
            }
            Mnemonic::Pla => {
                self.regs.a = self.pull();
                self.regs.p.update_nz(self.regs.a);
                0
            }
            Mnemonic::Plp => {
                let status = self.pull();
                self.regs.p = Status::from_byte(status);
                0
            }

            // Transfers
            Mnemonic::Tax => {
                self.regs.x = self.regs.a;
                self.regs.p.update_nz(self.regs.x);
                0
            }
            Mnemonic::Tay => {
                self.regs.y = self.regs.a;
                self.regs.p.update_nz(self.regs.y);
                0
            }
            Mnemonic::Txa => {
                self.regs.a = self.regs.x;
                self.regs.p.update_nz(self.regs.a);
                0
            }
            Mnemonic::Tya => {
                self.regs.a = self.regs.y;
                self.regs.p.update_nz(self.regs.a);
                0
            }
            Mnemonic::Tsx => {
                self.regs.x = self.regs.s;
                self.regs.p.update_nz(self.regs.x);
                0
            }
            Mnemonic::Txs => {
                self.regs.s = self.regs.x;
                0
            }

            // Flags
            Mnemonic::Clc => self.flag_op(C, false),
            Mnemonic::Sec => self.flag_op(C, true),
            Mnemonic::Cli => self.flag_op(I, false),
            Mnemonic::Sei => self.flag_op(I, true),
            Mnemonic::Cld => self.flag_op(D, false),
            Mnemonic::Sed => self.flag_op(D, true),
            Mnemonic::Clv => self.flag_op(V, false),

            Mnemonic::Nop => 0,
            Mnemonic::Illegal => {
                debug!(
                    "illegal opcode ${:02X} at ${:04X}, executed as NOP",
                    self.opcode,
                    self.regs.pc.wrapping_sub(1)
                );
                0
            }
        }
    }

    /// Load the operand into `data`. Implied operands already hold A.
    fn fetch(&mut self) -> u8 {
        if let Operand::Address(addr) = self.operand {
            self.data = self.read(addr);
        }
        self.data
    }

    /// Effective address of a memory operand.
    fn target(&self) -> u16 {
        match self.operand {
            Operand::Address(addr) => addr,
            // Every mnemonic that calls this is tabled with a memory mode.
            Operand::Implied | Operand::Relative(_) => {
                unreachable!("{} has no effective address", self.instruction())
            }
        }
    }

    /// Store a read-modify-write result to A or memory, updating N and Z.
    fn write_back(&mut self, value: u8) {
        match self.operand {
            Operand::Address(addr) => self.write(addr, value),
            Operand::Implied | Operand::Relative(_) => self.regs.a = value,
        }
        self.regs.p.update_nz(value);
    }

    fn flag_op(&mut self, flag: u8, value: bool) -> u8 {
        self.set_flag(flag, value);
        0
    }

    fn compare(&mut self, register: u8) {
        let value = self.fetch();
        self.set_flag(C, register >= value);
        self.regs.p.update_nz(register.wrapping_sub(value));
    }

    /// Take a relative branch when `condition` holds.
    ///
    /// A taken branch costs one cycle, plus one more if the target is in a
    /// different page from the next instruction.
    fn branch(&mut self, condition: bool) -> u8 {
        if condition {
            let Operand::Relative(offset) = self.operand else {
                unreachable!("branch without a relative operand")
            };
            let target = self.regs.pc.wrapping_add(offset);
            self.remaining += 1;
            if page_crossed(target, self.regs.pc) {
                self.remaining += 1;
            }
            self.regs.pc = target;
        }
        0
    }

    fn adc(&mut self, value: u8) {
        if self.config.decimal_mode && self.get_flag(D) {
            self.adc_decimal(value);
        } else {
            self.adc_binary(value);
        }
    }

    fn adc_binary(&mut self, value: u8) {
        let a = self.regs.a;
        let sum = u16::from(a) + u16::from(value) + u16::from(self.get_flag(C));
        let result = sum as u8;

        self.set_flag(C, sum > 0xFF);
        self.set_flag(V, (a ^ result) & (value ^ result) & 0x80 != 0);
        self.regs.a = result;
        self.regs.p.update_nz(result);
    }

    /// NMOS BCD addition: A and C are decimal, Z comes from the binary sum,
    /// N and V from the intermediate after the low-nibble fix-up.
    fn adc_decimal(&mut self, value: u8) {
        let a = self.regs.a;
        let carry = u8::from(self.get_flag(C));

        let mut lo = (a & 0x0F) + (value & 0x0F) + carry;
        if lo > 9 {
            lo += 6;
        }
        let mut hi = (a >> 4) + (value >> 4) + u8::from(lo > 0x0F);

        let binary = a.wrapping_add(value).wrapping_add(carry);
        let intermediate = (hi << 4) | (lo & 0x0F);
        self.set_flag(Z, binary == 0);
        self.set_flag(N, intermediate & 0x80 != 0);
        self.set_flag(V, (a ^ intermediate) & (value ^ intermediate) & 0x80 != 0);

        if hi > 9 {
            hi += 6;
        }
        self.set_flag(C, hi > 0x0F);
        self.regs.a = (hi << 4) | (lo & 0x0F);
    }

    fn sbc(&mut self, value: u8) {
        if self.config.decimal_mode && self.get_flag(D) {
            self.sbc_decimal(value);
        } else {
            self.adc_binary(!value);
        }
    }

    /// NMOS BCD subtraction: every flag comes from the binary difference,
    /// only A is decimal-corrected.
    fn sbc_decimal(&mut self, value: u8) {
        let a = self.regs.a;
        let borrow = i16::from(!self.get_flag(C));

        self.adc_binary(!value);
        self.regs.a = a;

        let mut lo = i16::from(a & 0x0F) - i16::from(value & 0x0F) - borrow;
        let mut hi = i16::from(a >> 4) - i16::from(value >> 4);
        if lo < 0 {
            lo -= 6;
            hi -= 1;
        }
        if hi < 0 {
            hi -= 6;
        }
        self.regs.a = (((hi << 4) | (lo & 0x0F)) & 0xFF) as u8;
    }
}
