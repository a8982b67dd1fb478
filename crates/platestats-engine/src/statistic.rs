use std::fmt;

use platestats_model::{Plate, Well, WellId, WellSet};

use crate::{ResultMap, StatError, Window, dispatch};

/// A reduction from a sequence of readings to a single value, together with
/// every granularity it can be evaluated at.
///
/// Implementors only provide [`name`](Self::name),
/// [`min_len`](Self::min_len) and [`compute`](Self::compute). The
/// remaining methods are shared: they select readings (optionally through a
/// [`Window`]), validate them, and either reduce each well separately or pool
/// the wells of a container and reduce once.
///
/// Results of per-well methods are keyed by [`WellId`] in the container's
/// canonical order; results of collection methods are keyed by container
/// label in input order.
///
/// # Example
///
/// ```
/// use platestats_engine::{Count, Percentile, StandardDeviation, Statistic as _};
/// use platestats_model::{Plate, PlateType, Well, WellId};
///
/// let plate = Plate::new(
///     "assay",
///     PlateType::Plate96,
///     [
///         Well::new(WellId::new(0, 0), vec![1.0, 2.0, 3.0]),
///         Well::new(WellId::new(0, 1), vec![4.0, 5.0, 6.0]),
///     ],
/// )
/// .unwrap();
/// let a1 = plate.get(WellId::new(0, 0)).unwrap();
///
/// let counts = Count.plate(&plate).unwrap();
/// assert_eq!(counts[&WellId::new(0, 0)], 3);
/// assert_eq!(Count.plate_aggregated(&plate).unwrap(), 6);
/// assert_eq!(StandardDeviation.well(a1).unwrap(), 1.0);
/// assert_eq!(Percentile::new(50).unwrap().well(a1).unwrap(), 2.0);
/// ```
pub trait Statistic {
    type Output: Copy + PartialEq + fmt::Debug;

    /// Name used in error messages.
    fn name(&self) -> &'static str;

    /// Fewest readings the reduction accepts.
    fn min_len(&self) -> usize;

    /// Reduces `values`, or returns `None` if there are too few of them.
    fn compute(&self, values: &[f64]) -> Option<Self::Output>;

    /// Reduces `values`, raising [`StatError::InsufficientData`] below
    /// [`min_len`](Self::min_len).
    fn reduce(&self, values: &[f64]) -> Result<Self::Output, StatError> {
        let insufficient = || StatError::InsufficientData {
            statistic: self.name(),
            required: self.min_len(),
            actual: values.len(),
        };
        if values.len() < self.min_len() {
            return Err(insufficient());
        }
        self.compute(values).ok_or_else(insufficient)
    }

    fn well(&self, well: &Well) -> Result<Self::Output, StatError> {
        dispatch::single(self, well, None)
    }

    fn well_window(&self, well: &Well, window: Window) -> Result<Self::Output, StatError> {
        dispatch::single(self, well, Some(window))
    }

    /// One value per well of `plate`, in row-major order.
    fn plate(&self, plate: &Plate) -> Result<ResultMap<WellId, Self::Output>, StatError> {
        dispatch::per_well(self, plate, None)
    }

    fn plate_window(
        &self,
        plate: &Plate,
        window: Window,
    ) -> Result<ResultMap<WellId, Self::Output>, StatError> {
        dispatch::per_well(self, plate, Some(window))
    }

    /// One value per well of `set`, in ascending id order.
    fn set(&self, set: &WellSet) -> Result<ResultMap<WellId, Self::Output>, StatError> {
        dispatch::per_well(self, set, None)
    }

    fn set_window(
        &self,
        set: &WellSet,
        window: Window,
    ) -> Result<ResultMap<WellId, Self::Output>, StatError> {
        dispatch::per_well(self, set, Some(window))
    }

    /// Pools the readings of every well of `plate` and reduces them once.
    fn plate_aggregated(&self, plate: &Plate) -> Result<Self::Output, StatError> {
        dispatch::aggregated(self, plate, None)
    }

    /// Applies `window` to every well of `plate`, then pools and reduces.
    fn plate_aggregated_window(
        &self,
        plate: &Plate,
        window: Window,
    ) -> Result<Self::Output, StatError> {
        dispatch::aggregated(self, plate, Some(window))
    }

    fn set_aggregated(&self, set: &WellSet) -> Result<Self::Output, StatError> {
        dispatch::aggregated(self, set, None)
    }

    fn set_aggregated_window(
        &self,
        set: &WellSet,
        window: Window,
    ) -> Result<Self::Output, StatError> {
        dispatch::aggregated(self, set, Some(window))
    }

    /// One pooled value per plate, keyed by plate label.
    ///
    /// Accepts anything that yields `&Plate`: vectors, slices and arrays give
    /// identical results. A label seen twice keeps its first position and
    /// its last value.
    fn plates_aggregated<'a, I>(
        &self,
        plates: I,
    ) -> Result<ResultMap<String, Self::Output>, StatError>
    where
        I: IntoIterator<Item = &'a Plate>,
    {
        dispatch::aggregated_each(self, plates, None)
    }

    fn plates_aggregated_window<'a, I>(
        &self,
        plates: I,
        window: Window,
    ) -> Result<ResultMap<String, Self::Output>, StatError>
    where
        I: IntoIterator<Item = &'a Plate>,
    {
        dispatch::aggregated_each(self, plates, Some(window))
    }

    /// One pooled value per well set, keyed by set label.
    fn sets_aggregated<'a, I>(
        &self,
        sets: I,
    ) -> Result<ResultMap<String, Self::Output>, StatError>
    where
        I: IntoIterator<Item = &'a WellSet>,
    {
        dispatch::aggregated_each(self, sets, None)
    }

    fn sets_aggregated_window<'a, I>(
        &self,
        sets: I,
        window: Window,
    ) -> Result<ResultMap<String, Self::Output>, StatError>
    where
        I: IntoIterator<Item = &'a WellSet>,
    {
        dispatch::aggregated_each(self, sets, Some(window))
    }
}
