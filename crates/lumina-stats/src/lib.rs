//! lumina-stats - Statistical kernels for tabular data exploration
//!
//! This crate provides the numeric primitives behind the dashboard panels:
//!
//! - **Summary**: min, max, mean, median, sample standard deviation, quartiles
//! - **Correlation**: Pearson sample correlation over paired samples
//! - **Histogram**: equal-width binning with a closed final bin
//!
//! # Conventions
//!
//! Every kernel works on plain `f64` slices and ignores non-finite values.
//! Dispersion uses the sample definition (divide by n - 1) everywhere so that
//! summaries and correlations agree with each other. Degenerate inputs
//! (empty samples, zero variance, zero range) produce defined values instead
//! of NaN or infinity.

pub mod correlation;
pub mod histogram;
pub mod summary;

pub use correlation::*;
pub use histogram::*;
pub use summary::*;
