// src/types.rs
// Type aliases to reduce complexity warnings

use ndarray::Array1;
use std::error::Error;

/// Parallel (time, signal) arrays of equal length.
pub type TracePair = (Array1<f64>, Array1<f64>);

/// Plot rendering result; plotters backends expose heterogeneous error types.
pub type PlotResult = Result<(), Box<dyn Error>>;

// src/types.rs
