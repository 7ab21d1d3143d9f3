// src/lib.rs - Library interface for internal module access

pub mod aggregation;
pub mod batch;
pub mod config;
pub mod constants;
pub mod data_analysis;
pub mod data_input;
pub mod error;
pub mod plot_framework;
pub mod plot_functions;
pub mod report;
pub mod types;

// Crate version: git semver when the build exports VERGEN_GIT_SEMVER, else Cargo's.
pub fn crate_version() -> &'static str {
    option_env!("VERGEN_GIT_SEMVER").unwrap_or(env!("CARGO_PKG_VERSION"))
}
