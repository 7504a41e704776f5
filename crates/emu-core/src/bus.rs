//! Memory and I/O bus interface.

use std::fmt;

/// Size of a flat 16-bit address space.
const ADDRESS_SPACE: usize = 0x1_0000;

/// Memory and I/O bus interface.
///
/// Components access memory and peripherals through this trait. The bus
/// handles address decoding and routing to the appropriate device. Every
/// address in the 16-bit space is readable; what an unmapped address returns
/// is the bus's policy, not the caller's concern.
pub trait Bus {
    /// Read a byte from the given address.
    ///
    /// May trigger read side effects on memory-mapped devices (clearing a
    /// status latch, advancing a FIFO).
    fn read(&mut self, address: u16) -> u8;

    /// Read a byte without any side effects.
    ///
    /// Used by introspection tooling (disassemblers, debuggers). Must return
    /// what `read` would return, minus anything a real device read would
    /// change.
    fn peek(&self, address: u16) -> u8;

    /// Write a byte to the given address.
    fn write(&mut self, address: u16, value: u8);
}

impl<B: Bus + ?Sized> Bus for &mut B {
    fn read(&mut self, address: u16) -> u8 {
        (**self).read(address)
    }

    fn peek(&self, address: u16) -> u8 {
        (**self).peek(address)
    }

    fn write(&mut self, address: u16, value: u8) {
        (**self).write(address, value);
    }
}

/// Errors reported by bus implementations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusError {
    /// An image placed at `address` would run past the top of the address
    /// space.
    ImageOverflow { address: u16, len: usize },
}

impl fmt::Display for BusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageOverflow { address, len } => write!(
                f,
                "image of {len} bytes at ${address:04X} runs past $FFFF ({} bytes available)",
                ADDRESS_SPACE - usize::from(*address),
            ),
        }
    }
}

impl std::error::Error for BusError {}

/// Flat 64 KB RAM covering the whole address space.
///
/// No devices, no mirroring: every read returns the last value written, and
/// reads never have side effects.
pub struct SimpleBus {
    ram: Box<[u8]>,
}

impl Default for SimpleBus {
    fn default() -> Self {
        Self::new()
    }
}

impl SimpleBus {
    /// Create a bus with all 64 KB cleared to zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ram: vec![0; ADDRESS_SPACE].into_boxed_slice(),
        }
    }

    /// Copy `data` into RAM starting at `address`.
    ///
    /// Fails without writing anything if the image would not fit below
    /// `$FFFF`.
    pub fn load(&mut self, address: u16, data: &[u8]) -> Result<(), BusError> {
        let start = usize::from(address);
        let end = start + data.len();
        if end > ADDRESS_SPACE {
            return Err(BusError::ImageOverflow {
                address,
                len: data.len(),
            });
        }
        self.ram[start..end].copy_from_slice(data);
        Ok(())
    }

    /// Read a 16-bit little-endian word without side effects.
    #[must_use]
    pub fn peek_word(&self, address: u16) -> u16 {
        u16::from_le_bytes([self.peek(address), self.peek(address.wrapping_add(1))])
    }
}

impl Bus for SimpleBus {
    fn read(&mut self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    fn peek(&self, address: u16) -> u8 {
        self.ram[usize::from(address)]
    }

    fn write(&mut self, address: u16, value: u8) {
        self.ram[usize::from(address)] = value;
    }
}
