use crate::{descriptive, percentiles::Percentiles};

/// Descriptive summary of a dataset.
///
/// This structure contains common measures of central tendency and
/// dispersion together with a table of requested percentiles, computed from a
/// single sorted copy of the data.
///
/// # Examples
///
/// ```
/// use platestats_stats::summary::DescriptiveSummary;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let summary = DescriptiveSummary::new(values, &[25.0, 50.0, 75.0]).unwrap();
///
/// assert_eq!(summary.min, 1.0);
/// assert_eq!(summary.max, 6.0);
/// assert_eq!(summary.mean, 3.5);
/// assert_eq!(summary.percentiles.get(50.0), Some(3.5));
/// ```
#[derive(Debug, Clone)]
pub struct DescriptiveSummary {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean of the dataset.
    pub mean: f64,
    /// The sample variance, or `None` for a single value.
    pub variance: Option<f64>,
    /// The sample standard deviation, or `None` for a single value.
    pub std_dev: Option<f64>,
    /// Precomputed percentile values for quick lookup.
    pub percentiles: Percentiles,
}

impl DescriptiveSummary {
    /// Computes a summary from unsorted values.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveSummary)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    #[must_use]
    pub fn new<I>(values: I, percentile_points: &[f64]) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut sorted = values.into_iter().collect::<Vec<_>>();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Computes a summary from pre-sorted values.
    ///
    /// This skips the sorting step; use it when the data is already ordered.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `sorted_values` is not sorted in ascending order.
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Option<Self> {
        debug_assert!(
            sorted_values.is_sorted_by(|a, b| a.total_cmp(b).is_le()),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let mean = descriptive::mean(sorted_values)?;
        let variance = descriptive::variance(sorted_values);

        Some(Self {
            count: sorted_values.len(),
            min,
            max,
            mean,
            variance,
            std_dev: variance.map(f64::sqrt),
            percentiles: Percentiles::from_sorted(sorted_values, percentile_points),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_dataset() {
        assert!(DescriptiveSummary::new([], &[50.0]).is_none());
    }

    #[test]
    fn test_single_value_has_no_spread() {
        let summary = DescriptiveSummary::new([7.0], &[50.0]).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.min, 7.0);
        assert_eq!(summary.max, 7.0);
        assert_eq!(summary.variance, None);
        assert_eq!(summary.std_dev, None);
        assert_eq!(summary.percentiles.get(50.0), Some(7.0));
    }

    #[test]
    fn test_matches_individual_reductions() {
        let values = [3.0, 9.0, 1.0, 4.0, 4.0];
        let summary = DescriptiveSummary::new(values, &[10.0, 90.0]).unwrap();
        assert_eq!(summary.count, values.len());
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 9.0);
        assert_eq!(summary.variance, descriptive::variance(&values));
        assert_eq!(summary.std_dev, descriptive::std_dev(&values));
        assert_eq!(summary.percentiles.as_slice().len(), 2);
    }
}
