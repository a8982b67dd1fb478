//! Statistic dispatch over microplate data.
//!
//! A [`Statistic`] is a reduction from readings to one value. Implementing
//! the three required methods gives it every granularity:
//!
//! | method                                 | input           | result                          |
//! |----------------------------------------|-----------------|---------------------------------|
//! | `well`                                 | one well        | one value                       |
//! | `plate`, `set`                         | one container   | one value per well              |
//! | `plate_aggregated`, `set_aggregated`   | one container   | one value over pooled readings  |
//! | `plates_aggregated`, `sets_aggregated` | many containers | one pooled value per container  |
//!
//! Each of them has a `_window` variant taking a [`Window`], which restricts
//! every touched well to the same sub-range of readings before anything else
//! happens.
//!
//! The engine is pure: it reads the model types, never modifies them, keeps
//! no state between calls, and performs no I/O.
//!
//! # Examples
//!
//! ```
//! use platestats_engine::{Mean, Statistic as _, Window};
//! use platestats_model::{Plate, PlateType, Well, WellId};
//!
//! let plate = Plate::new(
//!     "assay",
//!     PlateType::Plate96,
//!     [
//!         Well::new(WellId::new(0, 0), vec![1.0, 2.0, 3.0, 4.0]),
//!         Well::new(WellId::new(0, 1), vec![5.0, 6.0, 7.0, 8.0]),
//!     ],
//! )
//! .unwrap();
//!
//! let per_well = Mean.plate(&plate).unwrap();
//! assert_eq!(per_well.values().copied().collect::<Vec<_>>(), [2.5, 6.5]);
//!
//! let window = Window::new(1, 2).unwrap();
//! assert_eq!(Mean.plate_aggregated_window(&plate, window).unwrap(), 4.5);
//!
//! let too_long = Window::new(2, 3).unwrap();
//! assert!(Mean.plate_window(&plate, too_long).is_err());
//! ```

pub use self::{
    descriptive::{
        Count, GeometricMean, Kurtosis, Max, Mean, Min, N, Percentile, PopulationVariance,
        Skewness, StandardDeviation, Sum, SumOfSquares, Variance,
    },
    dispatch::pool,
    error::{RangeError, StatError},
    kind::{AnyStatistic, ParseStatisticKindError, StatisticKind, Value},
    result::ResultMap,
    statistic::Statistic,
    window::Window,
};

pub mod descriptive;
mod dispatch;
mod error;
pub mod kind;
pub mod result;
mod statistic;
mod window;
