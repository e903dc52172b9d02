//! Constants
//!
//! AT32F423 reference manual, CRM chapter (PLL configuration register)
//! and the electrical characteristics of HEXT / HICK.

/// HICK, internal high speed RC oscillator
pub const HICK_FREQ: u32 = 8_000_000;

/// Minimum allowed HEXT (crystal / bypass) frequency
pub const HEXT_FREQ_MIN: u32 = 4_000_000;

/// Maximum allowed HEXT (crystal / bypass) frequency
pub const HEXT_FREQ_MAX: u32 = 25_000_000;

/// PLL_MS, pre-divider, 4 bit field, 0 is not allowed
pub const PLL_MS_MIN: u8 = 1;

/// PLL_MS upper bound
pub const PLL_MS_MAX: u8 = 15;

/// PLL_NS, feedback multiplier, 9 bit field
pub const PLL_NS_MIN: u16 = 31;

/// PLL_NS upper bound
pub const PLL_NS_MAX: u16 = 500;

/// The PLL input (reference after PLL_MS) has to stay within 2 .. 16 MHz
pub const PLL_IN_FREQ_MIN: u32 = 2_000_000;

/// Maximum PLL input frequency
pub const PLL_IN_FREQ_MAX: u32 = 16_000_000;

/// VCO (reference * PLL_NS / PLL_MS), min frequency
pub const VCO_FREQ_MIN: u32 = 500_000_000;

/// VCO max frequency
pub const VCO_FREQ_MAX: u32 = 1_200_000_000;

/// Fixed divide by two between the PLL_FR output and sclk
pub const SCLK_POST_DIV: u32 = 2;

/// Largest PLL_FR divisor
pub const PLL_FR_DIV_MAX: u32 = 32;

/// Minimum reachable system clock:
/// slowest VCO, largest post divider
pub const SCLK_FREQ_MIN: u32 = VCO_FREQ_MIN / PLL_FR_DIV_MAX / SCLK_POST_DIV;

/// Maximum system clock supported by the part
pub const SCLK_FREQ_MAX: u32 = 150_000_000;
