//! Reduction kernels for the platestats workspace.
//!
//! Every function in this crate is a pure reduction over a slice of `f64`
//! readings. Nothing here knows about wells or plates; the dispatch engine in
//! `platestats-engine` decides which readings a kernel sees.
//!
//! - **Descriptive statistics**: sums, extremes, moments
//! - **Percentiles**: interpolated percentile estimation
//! - **Summary**: several descriptive measures computed in one pass over sorted data
//!
//! # Modules
//!
//! - [`descriptive`]: Single-value reductions (sum, mean, variance, skewness, ...)
//! - [`percentiles`]: Percentile estimation and precomputed percentile tables
//! - [`summary`]: Combined descriptive summary of a dataset
//!
//! # Examples
//!
//! ## Reducing a slice
//!
//! ```
//! use platestats_stats::descriptive;
//!
//! let values = [1.0, 2.0, 3.0];
//! assert_eq!(descriptive::mean(&values), Some(2.0));
//! assert_eq!(descriptive::std_dev(&values), Some(1.0));
//! assert_eq!(descriptive::std_dev(&values[..1]), None);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use platestats_stats::percentiles::Percentiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
//! assert_eq!(percentiles.get(50.0), Some(3.0));
//! assert_eq!(percentiles.get(25.0), Some(1.5));
//! ```
//!
//! ## Summarizing a dataset
//!
//! ```
//! use platestats_stats::summary::DescriptiveSummary;
//!
//! let summary = DescriptiveSummary::new([4.0, 5.0, 6.0], &[50.0]).unwrap();
//! assert_eq!(summary.count, 3);
//! assert_eq!(summary.mean, 5.0);
//! assert_eq!(summary.percentiles.get(50.0), Some(5.0));
//! ```

pub mod descriptive;
pub mod percentiles;
pub mod summary;

/// Converts a sample size to `f64` for use in moment formulas.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn len_f64(values: &[f64]) -> f64 {
    values.len() as f64
}
