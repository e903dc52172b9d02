//! Calculates the PLL settings for a 150 MHz sclk from an 8 MHz HEXT crystal
//! and prints them over semihosting.
//!
//! cargo run --example pll_150mhz --features demo --target thumbv7em-none-eabihf

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate panic_halt; // panic handler

use cortex_m_rt::entry;
use cortex_m_semihosting::hprintln;

use at32f423_pll::{ config::*, frequency::*, register::* };


#[entry]
fn main() -> ! {
    let hext = 8_000_000;
    let sclk = 150_000_000;

    match solve_for_source(PllSource::Hext(hext), sclk) {
        Ok(s) => {
            hprintln!("{:?}", s.dividers).ok();
            hprintln!("sclk {} Hz (off by {} Hz)", s.sclk_hz, s.deviation_hz()).ok();
            if let Ok(cfg) = PllCfg::new(PllSource::Hext(hext), &s.dividers) {
                hprintln!("PLLCFG {:#010x}", cfg.w).ok();
            }
        }
        Err(e) => {
            // clocks stay on HICK, the rest of the firmware has to cope
            hprintln!("no PLL settings for {} Hz: {:?}", sclk, e).ok();
        }
    }

    loop {
        cortex_m::asm::wfi();
    }
}
