use std::{
    collections::{BTreeMap, btree_map},
    fmt,
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ModelError, Well, WellContainer, WellId, WellSet};

/// Plate geometry.
///
/// The named variants are the SBS standard formats. Any other grid can be
/// described with [`PlateType::Custom`].
///
/// # Example
///
/// ```
/// use platestats_model::PlateType;
///
/// assert_eq!(PlateType::Plate384.dimensions(), (16, 24));
/// assert_eq!("96".parse::<PlateType>(), Ok(PlateType::Plate96));
/// assert_eq!(
///     "3x5".parse::<PlateType>(),
///     Ok(PlateType::Custom { rows: 3, columns: 5 })
/// );
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlateType {
    Plate6,
    Plate12,
    Plate24,
    Plate48,
    #[default]
    Plate96,
    Plate384,
    Plate1536,
    Custom {
        rows: u16,
        columns: u16,
    },
}

impl PlateType {
    /// `(rows, columns)` of the grid.
    #[must_use]
    pub const fn dimensions(self) -> (u16, u16) {
        match self {
            Self::Plate6 => (2, 3),
            Self::Plate12 => (3, 4),
            Self::Plate24 => (4, 6),
            Self::Plate48 => (6, 8),
            Self::Plate96 => (8, 12),
            Self::Plate384 => (16, 24),
            Self::Plate1536 => (32, 48),
            Self::Custom { rows, columns } => (rows, columns),
        }
    }

    #[must_use]
    pub const fn rows(self) -> u16 {
        self.dimensions().0
    }

    #[must_use]
    pub const fn columns(self) -> u16 {
        self.dimensions().1
    }

    /// Number of well positions on the grid.
    #[must_use]
    pub fn capacity(self) -> usize {
        let (rows, columns) = self.dimensions();
        usize::from(rows) * usize::from(columns)
    }

    /// Whether `id` is a position on this grid.
    #[must_use]
    pub const fn contains(self, id: WellId) -> bool {
        let (rows, columns) = self.dimensions();
        id.row() < rows && id.column() < columns
    }

    /// Every position on the grid in row-major order.
    pub fn positions(self) -> impl Iterator<Item = WellId> {
        let (rows, columns) = self.dimensions();
        (0..rows).flat_map(move |row| (0..columns).map(move |column| WellId::new(row, column)))
    }
}

impl fmt::Display for PlateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom { rows, columns } => write!(f, "{rows}x{columns}"),
            _ => write!(f, "{}", self.capacity()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("unknown plate type '{input}': expected 6, 12, 24, 48, 96, 384, 1536 or ROWSxCOLUMNS")]
pub struct ParsePlateTypeError {
    input: String,
}

impl FromStr for PlateType {
    type Err = ParsePlateTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParsePlateTypeError {
            input: s.to_owned(),
        };
        let plate_type = match s {
            "6" => Self::Plate6,
            "12" => Self::Plate12,
            "24" => Self::Plate24,
            "48" => Self::Plate48,
            "96" => Self::Plate96,
            "384" => Self::Plate384,
            "1536" => Self::Plate1536,
            _ => {
                let (rows, columns) = s.split_once(['x', 'X']).ok_or_else(err)?;
                let rows = rows.trim().parse::<u16>().map_err(|_| err())?;
                let columns = columns.trim().parse::<u16>().map_err(|_| err())?;
                if rows == 0 || columns == 0 {
                    return Err(err());
                }
                Self::Custom { rows, columns }
            }
        };
        Ok(plate_type)
    }
}

/// Serialized in the same notation as [`Display`](fmt::Display): `"96"`,
/// `"3x5"`.
impl Serialize for PlateType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PlateType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// A fixed-geometry grid of wells.
///
/// A plate need not populate every position, but every well it holds lies on
/// its grid and appears once. Wells are iterated row-major.
///
/// # Example
///
/// ```
/// use platestats_model::{Plate, PlateType, Well, WellId};
///
/// let plate = Plate::new(
///     "p1",
///     PlateType::Plate6,
///     [Well::new(WellId::new(1, 2), vec![3.0]), Well::new(WellId::new(0, 0), vec![1.0])],
/// )
/// .unwrap();
///
/// assert_eq!(plate.first().unwrap().id().to_string(), "A1");
/// assert!(plate.get_at(1, 2).is_some());
/// assert!(!plate.is_full());
///
/// // wells off the grid are rejected
/// assert!(Plate::new("p2", PlateType::Plate6, [Well::new(WellId::new(2, 0), vec![])]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlateRecord", into = "PlateRecord")]
pub struct Plate {
    label: String,
    plate_type: PlateType,
    wells: BTreeMap<WellId, Well>,
}

impl Plate {
    /// Creates a plate, rejecting wells off the grid and duplicate ids.
    pub fn new<S, I>(label: S, plate_type: PlateType, wells: I) -> Result<Self, ModelError>
    where
        S: Into<String>,
        I: IntoIterator<Item = Well>,
    {
        let label = label.into();
        let (rows, columns) = plate_type.dimensions();
        let mut map = BTreeMap::new();
        for well in wells {
            let id = well.id();
            if !plate_type.contains(id) {
                return Err(ModelError::OutOfBounds {
                    label,
                    id,
                    rows,
                    columns,
                });
            }
            match map.entry(id) {
                btree_map::Entry::Occupied(_) => {
                    return Err(ModelError::DuplicateWell { label, id });
                }
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(well);
                }
            }
        }
        Ok(Self {
            label,
            plate_type,
            wells: map,
        })
    }

    /// Assembles a plate from wells already known to sit on distinct grid positions.
    pub(crate) fn from_grid<I>(label: String, plate_type: PlateType, wells: I) -> Self
    where
        I: IntoIterator<Item = Well>,
    {
        Self {
            label,
            plate_type,
            wells: wells.into_iter().map(|well| (well.id(), well)).collect(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn plate_type(&self) -> PlateType {
        self.plate_type
    }

    #[must_use]
    pub fn rows(&self) -> u16 {
        self.plate_type.rows()
    }

    #[must_use]
    pub fn columns(&self) -> u16 {
        self.plate_type.columns()
    }

    /// Number of wells present on the plate.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Whether every grid position holds a well.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.wells.len() == self.plate_type.capacity()
    }

    #[must_use]
    pub fn get(&self, id: WellId) -> Option<&Well> {
        self.wells.get(&id)
    }

    #[must_use]
    pub fn get_at(&self, row: u16, column: u16) -> Option<&Well> {
        self.get(WellId::new(row, column))
    }

    /// Iterates over the wells in row-major order.
    pub fn wells(&self) -> impl Iterator<Item = &Well> {
        self.wells.values()
    }

    /// The first well in row-major order.
    ///
    /// Callers use it to probe a representative reading count.
    #[must_use]
    pub fn first(&self) -> Option<&Well> {
        self.wells.values().next()
    }

    /// A well set with the plate's label holding exactly the plate's wells.
    #[must_use]
    pub fn data_set(&self) -> WellSet {
        let mut set = WellSet::empty(self.label.clone());
        for well in self.wells.values() {
            set.insert(well.clone());
        }
        set
    }
}

impl WellContainer for Plate {
    fn label(&self) -> &str {
        self.label()
    }

    fn wells(&self) -> impl Iterator<Item = &Well> {
        self.wells()
    }

    fn well_count(&self) -> usize {
        self.len()
    }
}

impl<'a> IntoIterator for &'a Plate {
    type Item = &'a Well;
    type IntoIter = btree_map::Values<'a, WellId, Well>;

    fn into_iter(self) -> Self::IntoIter {
        self.wells.values()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PlateRecord {
    label: String,
    plate_type: PlateType,
    wells: Vec<Well>,
}

impl TryFrom<PlateRecord> for Plate {
    type Error = ModelError;

    fn try_from(record: PlateRecord) -> Result<Self, Self::Error> {
        Self::new(record.label, record.plate_type, record.wells)
    }
}

impl From<Plate> for PlateRecord {
    fn from(plate: Plate) -> Self {
        Self {
            label: plate.label,
            plate_type: plate.plate_type,
            wells: plate.wells.into_values().collect(),
        }
    }
}
