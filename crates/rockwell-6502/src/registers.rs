//! 6502 CPU registers.

use crate::Status;

/// Base address of the hardware stack page.
pub const STACK_PAGE: u16 = 0x0100;

/// Stack pointer value after reset.
pub const RESET_SP: u8 = 0xFD;

/// Register file snapshot.
///
/// The engine owns the live copy; hosts get one from `Cpu::registers()` and
/// harnesses may write one back with `R6502::set_registers()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registers {
    /// Accumulator.
    pub a: u8,
    /// X index register.
    pub x: u8,
    /// Y index register.
    pub y: u8,
    /// Stack pointer: low byte of the next free stack slot.
    pub s: u8,
    /// Program counter.
    pub pc: u16,
    /// Processor status flags.
    pub p: Status,
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    /// Create registers in the state `reset()` leaves them, minus the PC.
    ///
    /// A, X and Y are zero, S is $FD and only the unused flag is set. The PC
    /// stays at zero until the reset vector is read.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            a: 0,
            x: 0,
            y: 0,
            s: RESET_SP,
            pc: 0,
            p: Status::new(),
        }
    }

    /// Address for the next push, post-decrementing S.
    ///
    /// S wraps within 8 bits, so the address always stays in page 1.
    pub fn push(&mut self) -> u16 {
        let addr = self.stack_addr();
        self.s = self.s.wrapping_sub(1);
        addr
    }

    /// Address for the next pull, pre-incrementing S.
    pub fn pop(&mut self) -> u16 {
        self.s = self.s.wrapping_add(1);
        self.stack_addr()
    }

    /// Get the current stack address without modifying S.
    #[must_use]
    pub const fn stack_addr(&self) -> u16 {
        STACK_PAGE | (self.s as u16)
    }
}
