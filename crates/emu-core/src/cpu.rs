//! CPU core trait.

/// A CPU core.
///
/// A CPU is bound to its bus when it is constructed, so every method here
/// works on the CPU alone. The host calls `clock()` once per emulated cycle
/// and interleaves its own per-cycle device updates between calls.
///
/// CPUs expose their internal state for observation and debugging.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// Advance the CPU by one clock cycle.
    fn clock(&mut self);

    /// Force the CPU into its well-defined reset state.
    fn reset(&mut self);

    /// Assert the maskable interrupt line.
    ///
    /// Ignored while interrupts are disabled.
    fn irq(&mut self);

    /// Assert the non-maskable interrupt line.
    fn nmi(&mut self);

    /// Returns true between instructions: the next `clock()` fetches.
    fn is_instruction_complete(&self) -> bool;

    /// Returns the current program counter.
    fn pc(&self) -> u16;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;
}
