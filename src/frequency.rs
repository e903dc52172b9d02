//! PLL parameter calculation
//!
//! sclk = (ref * PLL_NS) / (PLL_MS * PLL_FR) / 2

use crate::{config::*, constants::*, errors::*, register::PllFr};


/// PLL divider settings
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DividerSet {
    /// Pre-divider
    pub ms: u8,
    /// Feedback multiplier
    pub ns: u16,
    /// Post-divider
    pub fr: PllFr,
}

impl DividerSet {

    /// Divider set with `ms` and `ns` checked against `limits`.
    pub fn new(ms: u8, ns: u16, fr: PllFr, limits: &PllLimits) -> Result<Self, Error> {
        limits.check_dividers()?;
        if limits.ms_valid(ms) && limits.ns_valid(ns) {
            Ok(DividerSet { ms, ns, fr })
        } else {
            Err(Error::InvalidDivider)
        }
    }

    /// PLL input, reference after the pre-divider
    pub fn pll_in_hz(self: &Self, ref_hz: u32) -> u32 {
        ref_hz / self.ms as u32
    }

    /// VCO frequency, ref * ns / ms
    pub fn vco_hz(self: &Self, ref_hz: u32) -> u64 {
        ref_hz as u64 * self.ns as u64 / self.ms as u64
    }

    /// System clock, truncated to a whole Hz
    pub fn sclk_hz(self: &Self, ref_hz: u32) -> u32 {
        (ref_hz as u64 * self.ns as u64 / self.sclk_divisor()) as u32
    }

    #[inline]
    fn sclk_divisor(self: &Self) -> u64 {
        self.ms as u64 * self.fr.divisor() as u64 * SCLK_POST_DIV as u64
    }
}


/// Successful calculation
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Solution {
    /// Divider settings to program
    pub dividers: DividerSet,
    /// Reference frequency the dividers were calculated for
    pub ref_hz: u32,
    /// Requested system clock
    pub target_hz: u32,
    /// System clock the dividers actually produce
    pub sclk_hz: u32,
}

impl Solution {
    /// Distance between requested and achieved sclk, Hz
    pub fn deviation_hz(self: &Self) -> u32 {
        abs_diff(self.sclk_hz, self.target_hz)
    }

    pub fn is_exact(self: &Self) -> bool {
        self.sclk_hz == self.target_hz
    }
}


/// Dividers for `target_hz` from a `ref_hz` reference, AT32F423 limits.
pub fn solve(ref_hz: u32, target_hz: u32) -> Result<Solution, Error> {
    solve_with(&PllLimits::AT32F423, ref_hz, target_hz)
}

/// Dividers for `target_hz` with the reference taken from a PLL source.
pub fn solve_for_source(source: PllSource, target_hz: u32) -> Result<Solution, Error> {
    let limits = PllLimits::AT32F423;
    let ref_hz = source.freq_hz(&limits)?;
    solve_with(&limits, ref_hz, target_hz)
}

/// Exhaustive search over ms and fr, ns derived from the target.
///
/// Candidates are visited with ascending `ms`, then ascending `fr`. A candidate
/// replaces the current best only when strictly closer to the target, so on
/// equal deviation the earliest one is kept. An exact hit stops the search.
pub fn solve_with(limits: &PllLimits, ref_hz: u32, target_hz: u32) -> Result<Solution, Error> {
    limits.check_dividers()?;
    limits.check_reference(ref_hz)?;
    limits.check_output(target_hz)?;

    let mut best: Option<Solution> = None;

    for ms in limits.ms_min ..= limits.ms_max {
        if !limits.pll_in_valid(ref_hz as u64 / ms as u64) {
            continue;
        }

        for fr in PllFr::ALL.iter().copied() {
            let ns = match nearest_ns(ref_hz, target_hz, ms, fr) {
                Some(ns) if limits.ns_valid(ns) => ns,
                _ => continue,
            };

            let dividers = DividerSet { ms, ns, fr };
            if !limits.vco_valid(dividers.vco_hz(ref_hz)) {
                continue;
            }

            // rounding ns can push sclk past the band edges
            let sclk_hz = dividers.sclk_hz(ref_hz);
            if limits.check_output(sclk_hz).is_err() {
                continue;
            }

            let candidate = Solution { dividers, ref_hz, target_hz, sclk_hz };

            if best.map_or(true, |b| candidate.deviation_hz() < b.deviation_hz()) {
                best = Some(candidate);
            }

            if candidate.is_exact() {
                #[cfg(feature = "defmt")]
                defmt::debug!("pll: exact {}", candidate);
                return Ok(candidate);
            }
        }
    }

    match best {
        Some(s) => {
            #[cfg(feature = "defmt")]
            defmt::debug!("pll: closest {} (off by {} Hz)", s, s.deviation_hz());
            Ok(s)
        }
        None => {
            #[cfg(feature = "defmt")]
            defmt::warn!("pll: no dividers for {} Hz from {} Hz", target_hz, ref_hz);
            Err(Error::NoFeasibleSolution)
        }
    }
}

/// ns = round(target * 2 * ms * fr / ref), None if it does not fit the field type
fn nearest_ns(ref_hz: u32, target_hz: u32, ms: u8, fr: PllFr) -> Option<u16> {
    let ref_hz = ref_hz as u64;
    let num = target_hz as u64 * SCLK_POST_DIV as u64 * ms as u64 * fr.divisor() as u64;
    let ns = (num + ref_hz / 2) / ref_hz;
    if ns > u16::MAX as u64 { None } else { Some(ns as u16) }
}

#[inline]
fn abs_diff(a: u32, b: u32) -> u32 {
    if a > b { a - b } else { b - a }
}
