//! Engine configuration.

/// Per-engine options, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuConfig {
    /// Apply BCD correction in ADC/SBC when the D flag is set.
    ///
    /// With this off the D flag is still stored, pushed and pulled, but
    /// arithmetic is always binary (as on the NES 2A03).
    pub decimal_mode: bool,
}

impl Default for CpuConfig {
    fn default() -> Self {
        Self { decimal_mode: true }
    }
}

impl CpuConfig {
    /// Configuration for a core without BCD arithmetic.
    #[must_use]
    pub const fn binary_only() -> Self {
        Self {
            decimal_mode: false,
        }
    }
}
