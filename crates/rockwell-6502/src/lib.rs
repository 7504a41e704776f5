//! Cycle-level Rockwell R6502 CPU emulator.
//!
//! The CPU owns (or borrows) the [`emu_core::Bus`] it drives and is clocked
//! one cycle at a time through [`emu_core::Cpu::clock`]. Whole instructions
//! execute on the first cycle; the remaining cycles of the documented cost
//! are counted down before the next fetch, so devices stepped between calls
//! see correct instruction timing.
//!
//! ```
//! use emu_core::{Cpu, SimpleBus};
//! use rockwell_6502::{R6502, RESET_VECTOR};
//!
//! let mut bus = SimpleBus::new();
//! bus.load(0x0200, &[0xA9, 0x42]).unwrap(); // LDA #$42
//! bus.load(RESET_VECTOR, &[0x00, 0x02]).unwrap();
//!
//! let mut cpu = R6502::new(bus);
//! cpu.reset();
//! cpu.step(); // reset sequence
//! assert_eq!(cpu.step(), 2);
//! assert_eq!(cpu.a(), 0x42);
//! ```

mod addressing;
mod config;
mod cpu;
mod execute;
pub mod flags;
mod opcodes;
mod registers;

pub use addressing::AddressingMode;
pub use config::CpuConfig;
pub use cpu::{IRQ_VECTOR, NMI_VECTOR, R6502, RESET_VECTOR};
pub use flags::Status;
pub use opcodes::{Instruction, Mnemonic, OPCODE_TABLE, lookup};
pub use registers::{Registers, STACK_PAGE};
