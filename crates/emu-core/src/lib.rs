//! Core traits and types for cycle-accurate emulation.
//!
//! A CPU reaches the rest of the machine through exactly one capability: a
//! [`Bus`] that reads and writes bytes over a 16-bit address space. Hosts
//! drive components one cycle at a time through [`Cpu`] and [`Tickable`],
//! and inspect them through [`Observable`] without disturbing their state.

mod bus;
mod cpu;
mod observable;
mod tickable;
mod ticks;

pub use bus::{Bus, BusError, SimpleBus};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
pub use tickable::Tickable;
pub use ticks::Ticks;
