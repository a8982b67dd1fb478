//! Microplate data model: wells, well sets and plates.
//!
//! The types here are plain owned data. They are built once (by hand, from
//! JSON, or by the [`generate`] module) and only read afterwards; nothing in
//! the workspace mutates a well's readings after construction.
//!
//! # Data Structure
//!
//! ```text
//! Plate ("assay-1", 8x12)
//! ├─ A1: [0.12, 0.15, 0.11]
//! ├─ A2: [0.98, 1.02, 0.97]
//! └─ ...                     (row-major)
//!
//! WellSet ("controls")
//! ├─ A1: [...]
//! └─ H12: [...]              (sorted by well id)
//! ```
//!
//! Both containers implement [`WellContainer`], the read interface consumed by
//! the statistics engine.
//!
//! # Examples
//!
//! ```
//! use platestats_model::{Plate, PlateType, Well, WellId};
//!
//! let plate = Plate::new(
//!     "assay-1",
//!     PlateType::Plate96,
//!     [
//!         Well::new(WellId::new(0, 1), vec![4.0, 5.0, 6.0]),
//!         Well::new(WellId::new(0, 0), vec![1.0, 2.0, 3.0]),
//!     ],
//! )
//! .unwrap();
//!
//! let ids: Vec<String> = plate.wells().map(|w| w.id().to_string()).collect();
//! assert_eq!(ids, ["A1", "A2"]);
//! assert_eq!(plate.data_set().len(), 2);
//! ```

pub use self::{
    plate::{Plate, PlateType},
    well::{ParseWellIdError, Well, WellId},
    well_set::WellSet,
};

pub mod generate;
pub mod plate;
pub mod well;
pub mod well_set;

/// Errors raised while assembling containers.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ModelError {
    #[display("duplicate well {id} in '{label}'")]
    DuplicateWell { label: String, id: WellId },
    #[display("well {id} lies outside the {rows}x{columns} layout of plate '{label}'")]
    OutOfBounds {
        label: String,
        id: WellId,
        rows: u16,
        columns: u16,
    },
}

/// Read interface shared by [`Plate`] and [`WellSet`].
///
/// `wells()` yields every well exactly once in the container's canonical
/// order: row-major for plates, sorted by [`WellId`] for well sets. Because
/// [`WellId`] orders row-major, the two orders coincide.
pub trait WellContainer {
    /// Identity of the container, used as the key of aggregated results.
    #[must_use]
    fn label(&self) -> &str;

    /// Iterates over the wells in canonical order.
    fn wells(&self) -> impl Iterator<Item = &Well>;

    /// Number of wells in the container.
    #[must_use]
    fn well_count(&self) -> usize {
        self.wells().count()
    }
}
