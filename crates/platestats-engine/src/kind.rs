//! Choosing a statistic at runtime.
//!
//! [`StatisticKind`] names every built-in statistic; [`AnyStatistic`] is the
//! built statistic, dispatching to the concrete type. Outputs are unified as
//! [`Value`] so callers can handle counts and real-valued results alike.
//!
//! # Example
//!
//! ```
//! use platestats_engine::{StatisticKind, Statistic as _, Value};
//! use platestats_model::{Well, WellId};
//!
//! let well = Well::new(WellId::new(0, 0), vec![1.0, 2.0, 3.0]);
//!
//! let kind: StatisticKind = "percentile".parse().unwrap();
//! let stat = kind.build(Some(50)).unwrap();
//! assert_eq!(stat.well(&well).unwrap(), Value::Real(2.0));
//!
//! let count = StatisticKind::Count.build(None).unwrap();
//! assert_eq!(count.well(&well).unwrap(), Value::Count(3));
//!
//! assert!(StatisticKind::Percentile.build(None).is_err());
//! ```

use std::{fmt, str::FromStr};

use serde::{Serialize, Serializer, ser::Error as _};

use crate::{
    Count, GeometricMean, Kurtosis, Max, Mean, Min, Percentile, PopulationVariance, Skewness,
    StandardDeviation, StatError, Statistic, Sum, SumOfSquares, Variance,
};

/// Name of a built-in statistic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatisticKind {
    Count,
    Sum,
    SumOfSquares,
    Min,
    Max,
    Mean,
    GeometricMean,
    Variance,
    PopulationVariance,
    StdDev,
    Skewness,
    Kurtosis,
    Percentile,
}

impl StatisticKind {
    pub const ALL: [Self; 13] = [
        Self::Count,
        Self::Sum,
        Self::SumOfSquares,
        Self::Min,
        Self::Max,
        Self::Mean,
        Self::GeometricMean,
        Self::Variance,
        Self::PopulationVariance,
        Self::StdDev,
        Self::Skewness,
        Self::Kurtosis,
        Self::Percentile,
    ];

    /// Kebab-case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Sum => "sum",
            Self::SumOfSquares => "sum-of-squares",
            Self::Min => "min",
            Self::Max => "max",
            Self::Mean => "mean",
            Self::GeometricMean => "geometric-mean",
            Self::Variance => "variance",
            Self::PopulationVariance => "population-variance",
            Self::StdDev => "std-dev",
            Self::Skewness => "skewness",
            Self::Kurtosis => "kurtosis",
            Self::Percentile => "percentile",
        }
    }

    /// Whether [`build`](Self::build) needs a rank.
    #[must_use]
    pub const fn takes_rank(self) -> bool {
        matches!(self, Self::Percentile)
    }

    /// Builds the statistic.
    ///
    /// `rank` is required for [`Percentile`](Self::Percentile) and rejected
    /// for every other kind.
    pub fn build(self, rank: Option<u8>) -> Result<AnyStatistic, StatError> {
        match (self, rank) {
            (Self::Percentile, Some(rank)) => Ok(AnyStatistic::Percentile(Percentile::new(rank)?)),
            (Self::Percentile, None) => Err(StatError::InvalidParameter {
                name: "rank",
                reason: "percentile requires a rank".to_owned(),
            }),
            (kind, Some(rank)) => Err(StatError::InvalidParameter {
                name: "rank",
                reason: format!("{kind} does not take a rank (got {rank})"),
            }),
            (Self::Count, None) => Ok(AnyStatistic::Count(Count)),
            (Self::Sum, None) => Ok(AnyStatistic::Sum(Sum)),
            (Self::SumOfSquares, None) => Ok(AnyStatistic::SumOfSquares(SumOfSquares)),
            (Self::Min, None) => Ok(AnyStatistic::Min(Min)),
            (Self::Max, None) => Ok(AnyStatistic::Max(Max)),
            (Self::Mean, None) => Ok(AnyStatistic::Mean(Mean)),
            (Self::GeometricMean, None) => Ok(AnyStatistic::GeometricMean(GeometricMean)),
            (Self::Variance, None) => Ok(AnyStatistic::Variance(Variance)),
            (Self::PopulationVariance, None) => {
                Ok(AnyStatistic::PopulationVariance(PopulationVariance))
            }
            (Self::StdDev, None) => Ok(AnyStatistic::StandardDeviation(StandardDeviation)),
            (Self::Skewness, None) => Ok(AnyStatistic::Skewness(Skewness)),
            (Self::Kurtosis, None) => Ok(AnyStatistic::Kurtosis(Kurtosis)),
        }
    }
}

impl fmt::Display for StatisticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown statistic '{input}'")]
pub struct ParseStatisticKindError {
    input: String,
}

impl FromStr for StatisticKind {
    type Err = ParseStatisticKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStatisticKindError { input: s.to_owned() })
    }
}

/// Result of an [`AnyStatistic`].
#[derive(Debug, Clone, Copy, PartialEq, derive_more::Display)]
pub enum Value {
    Count(usize),
    Real(f64),
}

/// Serialized as a bare number.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            Self::Count(n) => serializer.serialize_u64(u64::try_from(n).map_err(S::Error::custom)?),
            Self::Real(x) => serializer.serialize_f64(x),
        }
    }
}

/// A built-in statistic chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyStatistic {
    Count(Count),
    Sum(Sum),
    SumOfSquares(SumOfSquares),
    Min(Min),
    Max(Max),
    Mean(Mean),
    GeometricMean(GeometricMean),
    Variance(Variance),
    PopulationVariance(PopulationVariance),
    StandardDeviation(StandardDeviation),
    Skewness(Skewness),
    Kurtosis(Kurtosis),
    Percentile(Percentile),
}

impl AnyStatistic {
    #[must_use]
    pub fn kind(self) -> StatisticKind {
        match self {
            Self::Count(_) => StatisticKind::Count,
            Self::Sum(_) => StatisticKind::Sum,
            Self::SumOfSquares(_) => StatisticKind::SumOfSquares,
            Self::Min(_) => StatisticKind::Min,
            Self::Max(_) => StatisticKind::Max,
            Self::Mean(_) => StatisticKind::Mean,
            Self::GeometricMean(_) => StatisticKind::GeometricMean,
            Self::Variance(_) => StatisticKind::Variance,
            Self::PopulationVariance(_) => StatisticKind::PopulationVariance,
            Self::StandardDeviation(_) => StatisticKind::StdDev,
            Self::Skewness(_) => StatisticKind::Skewness,
            Self::Kurtosis(_) => StatisticKind::Kurtosis,
            Self::Percentile(_) => StatisticKind::Percentile,
        }
    }

    fn real<S>(stat: &S, values: &[f64]) -> Option<Value>
    where
        S: Statistic<Output = f64>,
    {
        stat.compute(values).map(Value::Real)
    }
}

impl Statistic for AnyStatistic {
    type Output = Value;

    fn name(&self) -> &'static str {
        match self {
            Self::Count(s) => s.name(),
            Self::Sum(s) => s.name(),
            Self::SumOfSquares(s) => s.name(),
            Self::Min(s) => s.name(),
            Self::Max(s) => s.name(),
            Self::Mean(s) => s.name(),
            Self::GeometricMean(s) => s.name(),
            Self::Variance(s) => s.name(),
            Self::PopulationVariance(s) => s.name(),
            Self::StandardDeviation(s) => s.name(),
            Self::Skewness(s) => s.name(),
            Self::Kurtosis(s) => s.name(),
            Self::Percentile(s) => s.name(),
        }
    }

    fn min_len(&self) -> usize {
        match self {
            Self::Count(s) => s.min_len(),
            Self::Sum(s) => s.min_len(),
            Self::SumOfSquares(s) => s.min_len(),
            Self::Min(s) => s.min_len(),
            Self::Max(s) => s.min_len(),
            Self::Mean(s) => s.min_len(),
            Self::GeometricMean(s) => s.min_len(),
            Self::Variance(s) => s.min_len(),
            Self::PopulationVariance(s) => s.min_len(),
            Self::StandardDeviation(s) => s.min_len(),
            Self::Skewness(s) => s.min_len(),
            Self::Kurtosis(s) => s.min_len(),
            Self::Percentile(s) => s.min_len(),
        }
    }

    fn compute(&self, values: &[f64]) -> Option<Value> {
        match self {
            Self::Count(s) => s.compute(values).map(Value::Count),
            Self::Sum(s) => Self::real(s, values),
            Self::SumOfSquares(s) => Self::real(s, values),
            Self::Min(s) => Self::real(s, values),
            Self::Max(s) => Self::real(s, values),
            Self::Mean(s) => Self::real(s, values),
            Self::GeometricMean(s) => Self::real(s, values),
            Self::Variance(s) => Self::real(s, values),
            Self::PopulationVariance(s) => Self::real(s, values),
            Self::StandardDeviation(s) => Self::real(s, values),
            Self::Skewness(s) => Self::real(s, values),
            Self::Kurtosis(s) => Self::real(s, values),
            Self::Percentile(s) => Self::real(s, values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for kind in StatisticKind::ALL {
            assert_eq!(kind.to_string().parse::<StatisticKind>(), Ok(kind));
            assert_eq!(kind.as_str().to_uppercase().parse::<StatisticKind>(), Ok(kind));
        }
        assert!("stddev".parse::<StatisticKind>().is_err());
        assert_eq!(
            "median".parse::<StatisticKind>().unwrap_err().to_string(),
            "unknown statistic 'median'"
        );
    }

    #[test]
    fn test_build_checks_rank() {
        for kind in StatisticKind::ALL {
            let built = kind.build(kind.takes_rank().then_some(10));
            assert_eq!(built.map(AnyStatistic::kind), Ok(kind));
            let wrong = kind.build((!kind.takes_rank()).then_some(10));
            assert!(wrong.unwrap_err().is_invalid_parameter(), "{kind}");
        }
        assert!(StatisticKind::Percentile.build(Some(0)).is_err());
    }

    #[test]
    fn test_matches_concrete_statistics() {
        let values = [1.5, 2.5, 9.0, 4.0, 4.0];
        assert_eq!(
            StatisticKind::Count.build(None).unwrap().reduce(&values),
            Ok(Value::Count(5))
        );
        assert_eq!(
            StatisticKind::Mean.build(None).unwrap().reduce(&values),
            Mean.reduce(&values).map(Value::Real)
        );
        assert_eq!(
            StatisticKind::Percentile.build(Some(90)).unwrap().reduce(&values),
            Percentile::new(90).unwrap().reduce(&values).map(Value::Real)
        );
        assert_eq!(
            StatisticKind::StdDev.build(None).unwrap().reduce(&[1.0]),
            Err(StatError::InsufficientData {
                statistic: "std-dev",
                required: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_value_serializes_bare() {
        let values = [Value::Count(3), Value::Real(1.5)];
        assert_eq!(serde_json::to_string(&values).unwrap(), "[3,1.5]");
        assert_eq!(Value::Count(3).to_string(), "3");
    }
}
