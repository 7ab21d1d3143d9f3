// src/plot_functions/mod.rs

pub mod plot_trial_trace;

// src/plot_functions/mod.rs
