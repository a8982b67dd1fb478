//! The built-in statistics.
//!
//! Every statistic is a small `Copy` value wrapping one kernel from
//! [`platestats_stats`]. Parameterless statistics are unit structs;
//! [`Percentile`] carries its rank, which is checked on construction.

use platestats_stats::{descriptive, percentiles};

use crate::{StatError, Statistic};

/// Number of readings. Defined for empty input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Count;

/// Conventional shorthand for [`Count`].
pub type N = Count;

impl Statistic for Count {
    type Output = usize;

    fn name(&self) -> &'static str {
        "count"
    }

    fn min_len(&self) -> usize {
        0
    }

    fn compute(&self, values: &[f64]) -> Option<usize> {
        Some(values.len())
    }
}

/// Sum of the readings; `0.0` for empty input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sum;

impl Statistic for Sum {
    type Output = f64;

    fn name(&self) -> &'static str {
        "sum"
    }

    fn min_len(&self) -> usize {
        0
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        Some(descriptive::sum(values))
    }
}

/// Sum of the squared readings; `0.0` for empty input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SumOfSquares;

impl Statistic for SumOfSquares {
    type Output = f64;

    fn name(&self) -> &'static str {
        "sum-of-squares"
    }

    fn min_len(&self) -> usize {
        0
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        Some(descriptive::sum_of_squares(values))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Min;

impl Statistic for Min {
    type Output = f64;

    fn name(&self) -> &'static str {
        "min"
    }

    fn min_len(&self) -> usize {
        1
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        descriptive::min(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Max;

impl Statistic for Max {
    type Output = f64;

    fn name(&self) -> &'static str {
        "max"
    }

    fn min_len(&self) -> usize {
        1
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        descriptive::max(values)
    }
}

/// Arithmetic mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mean;

impl Statistic for Mean {
    type Output = f64;

    fn name(&self) -> &'static str {
        "mean"
    }

    fn min_len(&self) -> usize {
        1
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        descriptive::mean(values)
    }
}

/// Geometric mean. Non-positive readings are not rejected; they produce
/// `0.0` or NaN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GeometricMean;

impl Statistic for GeometricMean {
    type Output = f64;

    fn name(&self) -> &'static str {
        "geometric-mean"
    }

    fn min_len(&self) -> usize {
        1
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        descriptive::geometric_mean(values)
    }
}

/// Bias-corrected sample variance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Variance;

impl Statistic for Variance {
    type Output = f64;

    fn name(&self) -> &'static str {
        "variance"
    }

    fn min_len(&self) -> usize {
        2
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        descriptive::variance(values)
    }
}

/// Variance of the readings taken as the whole population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PopulationVariance;

impl Statistic for PopulationVariance {
    type Output = f64;

    fn name(&self) -> &'static str {
        "population-variance"
    }

    fn min_len(&self) -> usize {
        1
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        descriptive::population_variance(values)
    }
}

/// Sample standard deviation. Needs at least two readings.
///
/// ```
/// use platestats_engine::{StandardDeviation, StatError, Statistic as _};
/// use platestats_model::{Well, WellId};
///
/// let single = Well::new(WellId::new(0, 0), vec![4.2]);
/// assert!(matches!(
///     StandardDeviation.well(&single),
///     Err(StatError::InsufficientData { required: 2, actual: 1, .. })
/// ));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StandardDeviation;

impl Statistic for StandardDeviation {
    type Output = f64;

    fn name(&self) -> &'static str {
        "std-dev"
    }

    fn min_len(&self) -> usize {
        2
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        descriptive::std_dev(values)
    }
}

/// Adjusted Fisher-Pearson skewness. `0.0` when the readings are constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Skewness;

impl Statistic for Skewness {
    type Output = f64;

    fn name(&self) -> &'static str {
        "skewness"
    }

    fn min_len(&self) -> usize {
        3
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        descriptive::skewness(values)
    }
}

/// Excess kurtosis. `0.0` when the readings are constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Kurtosis;

impl Statistic for Kurtosis {
    type Output = f64;

    fn name(&self) -> &'static str {
        "kurtosis"
    }

    fn min_len(&self) -> usize {
        4
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        descriptive::kurtosis(values)
    }
}

/// Interpolated percentile at an integer rank in `1..=100`.
///
/// The rank is part of the value, so there is no default percentile.
///
/// ```
/// use platestats_engine::{Percentile, Statistic as _};
/// use platestats_model::{Well, WellId};
///
/// let well = Well::new(WellId::new(0, 0), vec![3.0, 1.0, 2.0]);
/// assert_eq!(Percentile::new(50).unwrap().well(&well).unwrap(), 2.0);
/// assert_eq!(Percentile::new(100).unwrap().well(&well).unwrap(), 3.0);
/// assert!(Percentile::new(0).is_err());
/// assert!(Percentile::new(101).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Percentile {
    rank: u8,
}

impl Percentile {
    pub const MIN_RANK: u8 = 1;
    pub const MAX_RANK: u8 = 100;

    pub fn new(rank: u8) -> Result<Self, StatError> {
        if !(Self::MIN_RANK..=Self::MAX_RANK).contains(&rank) {
            return Err(StatError::InvalidParameter {
                name: "rank",
                reason: format!(
                    "{rank} is outside {}..={}",
                    Self::MIN_RANK,
                    Self::MAX_RANK
                ),
            });
        }
        Ok(Self { rank })
    }

    #[must_use]
    pub fn rank(self) -> u8 {
        self.rank
    }
}

impl Statistic for Percentile {
    type Output = f64;

    fn name(&self) -> &'static str {
        "percentile"
    }

    fn min_len(&self) -> usize {
        1
    }

    fn compute(&self, values: &[f64]) -> Option<f64> {
        let sorted = percentiles::sorted_copy(values);
        percentiles::compute_percentile(&sorted, f64::from(self.rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_len_matches_kernels() {
        fn check<S: Statistic>(stat: S) {
            let values = [3.0, 1.0, 4.0, 1.0, 5.0];
            let required = stat.min_len();
            if required > 0 {
                assert!(stat.compute(&values[..required - 1]).is_none(), "{}", stat.name());
                assert!(stat.reduce(&values[..required - 1]).is_err(), "{}", stat.name());
            }
            assert!(stat.compute(&values[..required]).is_some(), "{}", stat.name());
        }
        check(Count);
        check(Sum);
        check(SumOfSquares);
        check(Min);
        check(Max);
        check(Mean);
        check(GeometricMean);
        check(Variance);
        check(PopulationVariance);
        check(StandardDeviation);
        check(Skewness);
        check(Kurtosis);
        check(Percentile::new(42).unwrap());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(Count.reduce(&[]), Ok(0));
        assert_eq!(Sum.reduce(&[]), Ok(0.0));
        assert_eq!(
            Mean.reduce(&[]),
            Err(StatError::InsufficientData {
                statistic: "mean",
                required: 1,
                actual: 0,
            })
        );
    }

    #[test]
    fn test_percentile_rank_bounds() {
        assert_eq!(Percentile::new(1).map(Percentile::rank), Ok(1));
        assert_eq!(Percentile::new(100).map(Percentile::rank), Ok(100));
        let err = Percentile::new(0).unwrap_err();
        assert!(err.is_invalid_parameter());
        assert_eq!(err.to_string(), "invalid rank: 0 is outside 1..=100");
        assert!(Percentile::new(101).is_err());
        assert!(Percentile::new(u8::MAX).is_err());
    }

    #[test]
    fn test_percentile_ignores_input_order() {
        let p = Percentile::new(25).unwrap();
        assert_eq!(p.reduce(&[5.0, 1.0, 4.0, 2.0, 3.0]), Ok(1.5));
        assert_eq!(p.reduce(&[1.0, 2.0, 3.0, 4.0, 5.0]), Ok(1.5));
    }

    #[test]
    fn test_percentile_monotone_in_rank() {
        let values = [0.3, 9.1, 2.2, 7.7, 4.4, 4.4, 1.0];
        let mut previous = f64::NEG_INFINITY;
        for rank in Percentile::MIN_RANK..=Percentile::MAX_RANK {
            let value = Percentile::new(rank).unwrap().reduce(&values).unwrap();
            assert!(value >= previous, "rank {rank}: {value} < {previous}");
            previous = value;
        }
        assert_eq!(previous, 9.1);
    }

    #[test]
    fn test_moments() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(Mean.reduce(&values), Ok(5.0));
        assert_eq!(PopulationVariance.reduce(&values), Ok(4.0));
        let sample = Variance.reduce(&values).unwrap();
        assert!((sample - 32.0 / 7.0).abs() < 1e-12);
        assert_eq!(Skewness.reduce(&[1.0, 1.0, 1.0]), Ok(0.0));
        assert_eq!(Kurtosis.reduce(&[2.0; 4]), Ok(0.0));
        assert_eq!(Kurtosis.reduce(&[2.0; 4]), Skewness.reduce(&[2.0; 4]));
    }
}
