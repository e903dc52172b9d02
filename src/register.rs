//! CRM PLLCFG register

use crate::{config::*, errors::*, frequency::DividerSet};


/// CRM PLL configuration register (PLLCFG) word.
/// Defaults to all config bits set to 0.
///
/// The clock setup code writes this word while the PLL is disabled,
/// then enables the PLL and waits for the stable flag before switching
/// sclk over to it.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PllCfg {
    /// Config register word
    pub w: u32,
}

impl PllCfg {

    /// Register word for a divider set fed from `source`.
    /// Dividers outside the hardware ranges are rejected, not masked.
    pub fn new(source: PllSource, d: &DividerSet) -> Result<Self, Error> {
        let d = DividerSet::new(d.ms, d.ns, d.fr, &PllLimits::AT32F423)?;
        let rcs = match source {
            PllSource::Hick => PllRcs::Hick,
            PllSource::Hext(_) => PllRcs::Hext,
        };
        Ok(
            PllCfg::default()
                .set(PllMs(d.ms))
                .set(PllNs(d.ns))
                .set(d.fr)
                .set(rcs)
        )
    }

    /// Get register bitfield value
    #[inline]
    pub fn get<F>(self: &Self) -> Result<F, Error>
    where F: BitField
    {
        F::decode((self.w >> F::offset()) & F::mask())
    }

    /// Update register bitfield
    #[inline]
    pub fn set<F>(mut self: Self, f: F) -> Self
    where F: BitField
    {
        let fbits = (f.encode() & F::mask()) << F::offset();
        let rbits = self.w & !(F::mask() << F::offset());
        self.w = rbits | fbits;
        self
    }

    /// Divider set currently held in the word.
    /// Fields outside the hardware ranges are rejected.
    pub fn dividers(self: &Self) -> Result<DividerSet, Error> {
        let ms: PllMs = self.get()?;
        let ns: PllNs = self.get()?;
        let fr: PllFr = self.get()?;
        DividerSet::new(ms.0, ns.0, fr, &PllLimits::AT32F423)
    }

    /// System clock produced by this configuration.
    /// `hext_hz` is only used when PLLRCS selects HEXT.
    pub fn sclk_hz(self: &Self, hext_hz: u32) -> Result<u32, Error> {
        let rcs: PllRcs = self.get()?;
        let source = match rcs {
            PllRcs::Hick => PllSource::Hick,
            PllRcs::Hext => PllSource::Hext(hext_hz),
        };
        let ref_hz = source.freq_hz(&PllLimits::AT32F423)?;
        Ok(self.dividers()?.sclk_hz(ref_hz))
    }
}


/// Bit operations on 32bit words
pub trait BitField: Sized {
    /// Number of bits in the bit field
    fn num_bits() -> u8;

    /// Offset from 0
    fn offset() -> u8;

    /// Field value from (already shifted and masked) register bits
    fn decode(bits: u32) -> Result<Self, Error>;

    /// Field value, unshifted
    fn encode(self) -> u32;

    #[inline]
    fn mask() -> u32 {
        !(0xFFFFFFFFu32 << Self::num_bits())
    }
}

/// Generate BitField position
macro_rules! gen_bitfield_pos {
    ($nb:tt, $off:tt) => {
        #[inline] fn num_bits() -> u8 { $nb }
        #[inline] fn offset() -> u8 { $off }
    }
}

/// Small bitfield-encoded numbers boilerplate
macro_rules! gen_bitfield_struct {
    ($(#[$meta:meta])*, $n:ident, $v:ty, $nb:tt, $off:tt) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $n(pub $v);

        impl BitField for $n {
            gen_bitfield_pos!($nb, $off);
            #[inline] fn decode(bits: u32) -> Result<Self, Error> { Ok($n(bits as $v)) }
            #[inline] fn encode(self) -> u32 { self.0 as u32 }
        }
    };
}


gen_bitfield_struct!(
    /// PLL_MS, bits [3:0]: PLL pre-divider, 1 to 15.
    /// 0 is reserved.
    , PllMs, u8, 4, 0
);

gen_bitfield_struct!(
    /// PLL_NS, bits [14:6]: PLL multiplication factor, 31 to 500.
    , PllNs, u16, 9, 6
);


/// PLL_FR, bits [18:16]: PLL post-divider.
/// Encodings 6 and 7 are reserved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllFr {
    Div1,
    Div2,
    Div4,
    Div8,
    Div16,
    Div32,
}

impl PllFr {
    /// Every post-divider, ascending
    pub const ALL: [PllFr; 6] = [
        PllFr::Div1,
        PllFr::Div2,
        PllFr::Div4,
        PllFr::Div8,
        PllFr::Div16,
        PllFr::Div32,
    ];

    /// Division factor
    #[inline]
    pub fn divisor(self: Self) -> u32 {
        1 << (self as u32)
    }

    /// Post-divider with the given division factor, if the hardware has one
    pub fn from_divisor(div: u32) -> Option<Self> {
        PllFr::ALL.iter().copied().find(|fr| fr.divisor() == div)
    }
}

impl BitField for PllFr {
    gen_bitfield_pos!(3, 16);

    fn decode(bits: u32) -> Result<Self, Error> {
        PllFr::ALL.get(bits as usize).copied().ok_or(Error::InvalidDivider)
    }

    #[inline]
    fn encode(self) -> u32 { self as u32 }
}


/// PLLRCS, bit 22: PLL reference clock select
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PllRcs {
    Hick,
    Hext,
}

impl BitField for PllRcs {
    gen_bitfield_pos!(1, 22);

    fn decode(bits: u32) -> Result<Self, Error> {
        Ok(if bits == 0 { PllRcs::Hick } else { PllRcs::Hext })
    }

    #[inline]
    fn encode(self) -> u32 { self as u32 }
}
