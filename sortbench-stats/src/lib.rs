#![warn(missing_docs)]
//! Sortbench Statistical Engine
//!
//! Reduces repeated timing samples to summary metrics:
//! - Range, mean and sample standard deviation
//! - Coefficient of variation (scale-free variability)

mod summary;

pub use summary::{
    DeviationStatistics, coefficient_of_variation, compute_summary, sample_std_dev,
};
