//! PLL clock source and hardware limits used by the parameter search

use crate::{constants::*, errors::*, register::{BitField, PllMs, PllNs}};


/// PLL reference clock source (PLLCFG.PLLRCS)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllSource {
    /// Internal 8 MHz RC oscillator
    Hick,
    /// External crystal / clock, frequency in Hz
    Hext(u32),
}

impl PllSource {
    /// Reference frequency fed into PLL_MS, validated against `limits`.
    pub fn freq_hz(self: &Self, limits: &PllLimits) -> Result<u32, Error> {
        match *self {
            PllSource::Hick => Ok(HICK_FREQ),
            PllSource::Hext(f) => limits.check_reference(f).map(|_| f),
        }
    }
}


/// Frequency bands and divider ranges the search has to respect.
/// All frequencies are in Hz, all bounds inclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllLimits {
    pub ref_freq_min: u32,
    pub ref_freq_max: u32,

    pub ms_min: u8,
    pub ms_max: u8,

    pub ns_min: u16,
    pub ns_max: u16,

    /// Band of `ref / ms`
    pub pll_in_freq_min: u32,
    pub pll_in_freq_max: u32,

    /// Band of `ref * ns / ms`
    pub vco_freq_min: u32,
    pub vco_freq_max: u32,

    /// Band of the requested system clock
    pub sclk_freq_min: u32,
    pub sclk_freq_max: u32,
}

impl PllLimits {

    /// AT32F423 CRM limits
    pub const AT32F423: PllLimits = PllLimits {
        ref_freq_min: HEXT_FREQ_MIN,
        ref_freq_max: HEXT_FREQ_MAX,
        ms_min: PLL_MS_MIN,
        ms_max: PLL_MS_MAX,
        ns_min: PLL_NS_MIN,
        ns_max: PLL_NS_MAX,
        pll_in_freq_min: PLL_IN_FREQ_MIN,
        pll_in_freq_max: PLL_IN_FREQ_MAX,
        vco_freq_min: VCO_FREQ_MIN,
        vco_freq_max: VCO_FREQ_MAX,
        sclk_freq_min: SCLK_FREQ_MIN,
        sclk_freq_max: SCLK_FREQ_MAX,
    };

    /// Reference has to be non-zero and inside the oscillator band.
    pub fn check_reference(self: &Self, ref_hz: u32) -> Result<(), Error> {
        if ref_hz == 0 || !(self.ref_freq_min ..= self.ref_freq_max).contains(&ref_hz) {
            Err(Error::InvalidReferenceFrequency)
        } else {
            Ok(())
        }
    }

    /// Target has to be inside the achievable sclk band.
    pub fn check_output(self: &Self, out_hz: u32) -> Result<(), Error> {
        if !(self.sclk_freq_min ..= self.sclk_freq_max).contains(&out_hz) {
            Err(Error::InvalidOutputFrequency)
        } else {
            Ok(())
        }
    }

    /// Divider ranges have to be non-empty, exclude 0 and fit the PLLCFG fields.
    pub fn check_dividers(self: &Self) -> Result<(), Error> {
        if self.ms_min == 0 || self.ms_min > self.ms_max || self.ms_max as u32 > PllMs::mask()
            || self.ns_min == 0 || self.ns_min > self.ns_max || self.ns_max as u32 > PllNs::mask()
        {
            Err(Error::InvalidDivider)
        } else {
            Ok(())
        }
    }

    #[inline]
    pub fn ms_valid(self: &Self, ms: u8) -> bool {
        (self.ms_min ..= self.ms_max).contains(&ms)
    }

    #[inline]
    pub fn ns_valid(self: &Self, ns: u16) -> bool {
        (self.ns_min ..= self.ns_max).contains(&ns)
    }

    #[inline]
    pub fn pll_in_valid(self: &Self, f: u64) -> bool {
        (self.pll_in_freq_min as u64 ..= self.pll_in_freq_max as u64).contains(&f)
    }

    #[inline]
    pub fn vco_valid(self: &Self, f: u64) -> bool {
        (self.vco_freq_min as u64 ..= self.vco_freq_max as u64).contains(&f)
    }
}

impl Default for PllLimits {
    fn default() -> Self {
        PllLimits::AT32F423
    }
}
