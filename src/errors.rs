//! Errors

/// PLL calculation / configuration errors
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Reference (PLL source) frequency is zero or outside the supported band
    InvalidReferenceFrequency,

    /// Requested output frequency is outside the achievable sclk range
    InvalidOutputFrequency,

    /// No (ms, ns, fr) combination satisfies every stage limit
    NoFeasibleSolution,

    /// Divider value, or a PLLCFG field, is out of range
    InvalidDivider,

    /// Indicator GPIO error
    Pin,
}
