use at32f423_pll::{
    config::*,
    constants::*,
    errors::Error,
    frequency::*,
    register::*,
};

const REFERENCES: [u32; 7] = [4_000_000, 4_001_001, 8_000_000, 12_000_000, 16_000_000, 20_000_000, 25_000_000];

fn targets() -> impl Iterator<Item = u32> {
    (SCLK_FREQ_MIN ..= SCLK_FREQ_MAX).step_by(1_234_567).chain(core::iter::once(SCLK_FREQ_MAX))
}

/// First exactly matching (ms, fr) over every ns, same visiting order as the solver
fn first_exact(ref_hz: u32, target_hz: u32) -> Option<(u8, PllFr)> {
    let l = PllLimits::AT32F423;
    for ms in PLL_MS_MIN ..= PLL_MS_MAX {
        if !l.pll_in_valid(ref_hz as u64 / ms as u64) {
            continue;
        }
        for fr in PllFr::ALL.iter().copied() {
            for ns in PLL_NS_MIN ..= PLL_NS_MAX {
                let d = DividerSet { ms, ns, fr };
                if l.vco_valid(d.vco_hz(ref_hz)) && d.sclk_hz(ref_hz) == target_hz {
                    return Some((ms, fr));
                }
            }
        }
    }
    None
}

#[test]
fn documented_150mhz_from_8mhz_hext() {
    let s = solve(8_000_000, 150_000_000).unwrap();
    assert_eq!(s.sclk_hz, 150_000_000);
    assert_eq!(s.deviation_hz(), 0);

    let d = s.dividers;
    assert_eq!(
        8_000_000u64 * d.ns as u64 / (d.ms as u64 * d.fr.divisor() as u64) / 2,
        150_000_000
    );
}

#[test]
fn one_hz_target_fails() {
    assert!(solve(8_000_000, 1).is_err());
}

#[test]
fn zero_reference_fails() {
    assert_eq!(solve(0, 150_000_000), Err(Error::InvalidReferenceFrequency));
    assert_eq!(solve(0, 0), Err(Error::InvalidReferenceFrequency));
}

#[test]
fn every_success_stays_inside_stage_bands() {
    for &r in REFERENCES.iter() {
        for t in targets() {
            let s = match solve(r, t) {
                Ok(s) => s,
                Err(e) => {
                    assert_eq!(e, Error::NoFeasibleSolution, "ref {} target {}", r, t);
                    continue;
                }
            };
            let d = s.dividers;
            assert!((PLL_MS_MIN ..= PLL_MS_MAX).contains(&d.ms));
            assert!((PLL_NS_MIN ..= PLL_NS_MAX).contains(&d.ns));
            assert!((PLL_IN_FREQ_MIN ..= PLL_IN_FREQ_MAX).contains(&d.pll_in_hz(r)));
            assert!((VCO_FREQ_MIN as u64 ..= VCO_FREQ_MAX as u64).contains(&d.vco_hz(r)));
            assert!((SCLK_FREQ_MIN ..= SCLK_FREQ_MAX).contains(&s.sclk_hz), "ref {} target {}", r, t);
            assert_eq!(s.sclk_hz, d.sclk_hz(r));
            assert_eq!(s.ref_hz, r);
        }
    }
}

#[test]
fn out_of_range_targets_fail() {
    for &r in REFERENCES.iter() {
        for &t in [0, 1, SCLK_FREQ_MIN - 1, SCLK_FREQ_MAX + 1, u32::MAX].iter() {
            assert_eq!(solve(r, t), Err(Error::InvalidOutputFrequency));
        }
    }
}

#[test]
fn out_of_range_references_fail() {
    for &r in [1, HEXT_FREQ_MIN - 1, HEXT_FREQ_MAX + 1, u32::MAX].iter() {
        assert_eq!(solve(r, 100_000_000), Err(Error::InvalidReferenceFrequency));
    }
}

#[test]
fn deterministic() {
    for &r in REFERENCES.iter() {
        for t in targets() {
            assert_eq!(solve(r, t), solve(r, t));
        }
    }
}

#[test]
fn exact_whenever_possible_and_first_in_order() {
    for &r in [8_000_000, 12_000_000].iter() {
        for mhz in 8 ..= 150u32 {
            let t = mhz * 1_000_000;
            match first_exact(r, t) {
                Some((ms, fr)) => {
                    let s = solve(r, t).unwrap();
                    assert!(s.is_exact(), "ref {} target {}", r, t);
                    assert_eq!((s.dividers.ms, s.dividers.fr), (ms, fr), "ref {} target {}", r, t);
                }
                None => {
                    if let Ok(s) = solve(r, t) {
                        assert!(!s.is_exact());
                    }
                }
            }
        }
    }
}

#[test]
fn equal_deviation_keeps_smallest_ms() {
    // 8 MHz: ms = 1..=4 all reach 100 MHz exactly, ms = 1 / fr = /4 comes first
    let s = solve(8_000_000, 100_000_000).unwrap();
    assert_eq!(s.dividers, DividerSet { ms: 1, ns: 100, fr: PllFr::Div4 });
}

#[test]
fn custom_limits() {
    // forbid the VCO range the default answer uses
    let limits = PllLimits {
        vco_freq_min: 700_000_000,
        ..PllLimits::default()
    };
    let s = solve_with(&limits, 8_000_000, 150_000_000).unwrap();
    assert!(s.is_exact());
    assert!(s.dividers.vco_hz(8_000_000) >= 700_000_000);
    assert_eq!(s.dividers, DividerSet { ms: 1, ns: 150, fr: PllFr::Div4 });
}

#[test]
fn near_max_targets_never_overshoot() {
    for r in (HEXT_FREQ_MIN ..= HEXT_FREQ_MAX).step_by(99_991) {
        for &t in [SCLK_FREQ_MAX, SCLK_FREQ_MAX - 1, SCLK_FREQ_MAX - 100_000].iter() {
            match solve(r, t) {
                Ok(s) => assert!(s.sclk_hz <= SCLK_FREQ_MAX, "ref {} target {}: {:?}", r, t, s),
                Err(e) => assert_eq!(e, Error::NoFeasibleSolution),
            }
        }
    }
}

#[test]
fn invalid_limits_are_errors() {
    for limits in [
        PllLimits { ms_min: 0, ..PllLimits::AT32F423 },
        PllLimits { ms_max: 16, ..PllLimits::AT32F423 },
        PllLimits { ns_max: 512, ..PllLimits::AT32F423 },
    ].iter() {
        assert_eq!(solve_with(limits, 8_000_000, 150_000_000), Err(Error::InvalidDivider));
    }
}

#[test]
fn register_word_reproduces_solution() {
    for t in targets() {
        if let Ok(s) = solve_for_source(PllSource::Hext(12_000_000), t) {
            let cfg = PllCfg::new(PllSource::Hext(12_000_000), &s.dividers).unwrap();
            assert_eq!(cfg.dividers(), Ok(s.dividers));
            assert_eq!(cfg.sclk_hz(12_000_000), Ok(s.sclk_hz));
            assert_eq!(cfg.get::<PllRcs>(), Ok(PllRcs::Hext));
        }
    }
}
