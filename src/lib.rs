#![cfg_attr(not(test), no_std)]

//! AT32F423 PLL parameter calculation: PLL_MS / PLL_NS / PLL_FR for a target sclk.

pub mod constants;
pub mod errors;
pub mod config;
pub mod frequency;
pub mod register;
pub mod indicator;
