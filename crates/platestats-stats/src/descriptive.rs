//! Single-value descriptive reductions.
//!
//! Each function reduces a slice of readings to one number. Functions that
//! need a minimum number of values return `None` when the slice is shorter;
//! the minimum is stated on each function and mirrored by the statistic types
//! in `platestats-engine`.
//!
//! Moments use the corrected two-pass algorithm (deviations from the mean,
//! with the rounding error of the mean subtracted back out) so results stay
//! stable for readings with a large common offset, which is typical of raw
//! absorbance and fluorescence counts.
//!
//! None of the reductions depend on the order of `values`.

use crate::len_f64;

/// Sum of all values. The empty sum is `0.0`.
///
/// # Examples
///
/// ```
/// # use platestats_stats::descriptive::sum;
/// assert_eq!(sum(&[1.0, 2.0, 3.5]), 6.5);
/// assert_eq!(sum(&[]), 0.0);
/// ```
#[must_use]
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Sum of squared values. The empty sum is `0.0`.
#[must_use]
pub fn sum_of_squares(values: &[f64]) -> f64 {
    values.iter().map(|v| v * v).sum()
}

/// Smallest value, or `None` for an empty slice.
///
/// NaN readings are skipped unless every reading is NaN.
#[must_use]
pub fn min(values: &[f64]) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().copied().fold(*first, f64::min))
}

/// Largest value, or `None` for an empty slice.
///
/// NaN readings are skipped unless every reading is NaN.
#[must_use]
pub fn max(values: &[f64]) -> Option<f64> {
    let (first, rest) = values.split_first()?;
    Some(rest.iter().copied().fold(*first, f64::max))
}

/// Arithmetic mean. Requires at least one value.
///
/// # Examples
///
/// ```
/// # use platestats_stats::descriptive::mean;
/// assert_eq!(mean(&[4.0, 5.0, 6.0]), Some(5.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = len_f64(values);
    let approx = sum(values) / n;
    // second pass removes the rounding error of the first
    let correction = values.iter().map(|v| v - approx).sum::<f64>() / n;
    Some(approx + correction)
}

/// Geometric mean, `exp(mean(ln x))`. Requires at least one value.
///
/// Readings are not validated: a zero reading yields `0.0` and a negative
/// reading yields NaN.
#[must_use]
pub fn geometric_mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let log_sum = values.iter().map(|v| v.ln()).sum::<f64>();
    Some((log_sum / len_f64(values)).exp())
}

/// Sum of squared deviations from the mean and sum of plain deviations.
fn deviations(values: &[f64], mean: f64) -> (f64, f64) {
    values.iter().fold((0.0, 0.0), |(squared, plain), v| {
        let dev = v - mean;
        (squared + dev * dev, plain + dev)
    })
}

/// Bias-corrected sample variance (denominator `n - 1`). Requires at least two values.
///
/// # Examples
///
/// ```
/// # use platestats_stats::descriptive::variance;
/// assert_eq!(variance(&[1.0, 2.0, 3.0]), Some(1.0));
/// assert_eq!(variance(&[1.0]), None);
/// ```
#[must_use]
pub fn variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let n = len_f64(values);
    let (squared, plain) = deviations(values, m);
    Some((squared - plain * plain / n) / (n - 1.0))
}

/// Population variance (denominator `n`). Requires at least one value.
#[must_use]
pub fn population_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let n = len_f64(values);
    let (squared, plain) = deviations(values, m);
    Some((squared - plain * plain / n) / n)
}

/// Sample standard deviation, the square root of [`variance`]. Requires at least two values.
#[must_use]
pub fn std_dev(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

/// Adjusted Fisher-Pearson sample skewness. Requires at least three values.
///
/// Constant data has no asymmetry and yields `0.0`.
#[must_use]
pub fn skewness(values: &[f64]) -> Option<f64> {
    if values.len() < 3 {
        return None;
    }
    let m = mean(values)?;
    let var = variance(values)?;
    if var < 1e-19 {
        return Some(0.0);
    }
    let n = len_f64(values);
    let cubed = values.iter().map(|v| (v - m).powi(3)).sum::<f64>() / (var * var.sqrt());
    Some(n / ((n - 1.0) * (n - 2.0)) * cubed)
}

/// Sample excess kurtosis. Requires at least four values.
///
/// Constant data has no tails to measure and yields `0.0`, as in
/// [`skewness`].
#[must_use]
pub fn kurtosis(values: &[f64]) -> Option<f64> {
    if values.len() < 4 {
        return None;
    }
    let m = mean(values)?;
    let var = variance(values)?;
    if var < 1e-19 {
        return Some(0.0);
    }
    let n = len_f64(values);
    let fourth = values.iter().map(|v| (v - m).powi(4)).sum::<f64>() / (var * var);
    let coefficient = n * (n + 1.0) / ((n - 1.0) * (n - 2.0) * (n - 3.0));
    let offset = 3.0 * (n - 1.0).powi(2) / ((n - 2.0) * (n - 3.0));
    Some(coefficient * fourth - offset)
}
