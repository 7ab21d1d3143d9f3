// src/data_analysis/mod.rs

pub mod frequency;
pub mod lowpass_filter;
pub mod modulus;
pub mod signal_crop;
pub mod trial_analysis;
pub mod zero_crossings;
