use std::collections::{BTreeMap, btree_map};

use serde::{Deserialize, Serialize};

use crate::{ModelError, Well, WellContainer, WellId};

/// A labelled collection of wells, unique by [`WellId`].
///
/// Iteration is always in ascending [`WellId`] order regardless of insertion
/// order.
///
/// # Example
///
/// ```
/// use platestats_model::{Well, WellId, WellSet};
///
/// let set = WellSet::new(
///     "controls",
///     [
///         Well::new(WellId::new(7, 11), vec![0.9]),
///         Well::new(WellId::new(0, 0), vec![0.1]),
///     ],
/// )
/// .unwrap();
///
/// let ids: Vec<String> = set.wells().map(|w| w.id().to_string()).collect();
/// assert_eq!(ids, ["A1", "H12"]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WellSetRecord", into = "WellSetRecord")]
pub struct WellSet {
    label: String,
    wells: BTreeMap<WellId, Well>,
}

impl WellSet {
    /// Creates a well set, rejecting duplicate well ids.
    pub fn new<S, I>(label: S, wells: I) -> Result<Self, ModelError>
    where
        S: Into<String>,
        I: IntoIterator<Item = Well>,
    {
        let mut set = Self::empty(label);
        for well in wells {
            match set.wells.entry(well.id()) {
                btree_map::Entry::Occupied(_) => {
                    return Err(ModelError::DuplicateWell {
                        label: set.label,
                        id: well.id(),
                    });
                }
                btree_map::Entry::Vacant(entry) => {
                    entry.insert(well);
                }
            }
        }
        Ok(set)
    }

    /// Creates a well set with no wells.
    #[must_use]
    pub fn empty<S>(label: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            label: label.into(),
            wells: BTreeMap::new(),
        }
    }

    /// Adds a well, returning the well previously stored under the same id.
    pub fn insert(&mut self, well: Well) -> Option<Well> {
        self.wells.insert(well.id(), well)
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn get(&self, id: WellId) -> Option<&Well> {
        self.wells.get(&id)
    }

    #[must_use]
    pub fn contains(&self, id: WellId) -> bool {
        self.wells.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.wells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    /// Iterates over the wells in ascending id order.
    pub fn wells(&self) -> impl Iterator<Item = &Well> {
        self.wells.values()
    }

    /// The well with the smallest id.
    #[must_use]
    pub fn first(&self) -> Option<&Well> {
        self.wells.values().next()
    }
}

impl WellContainer for WellSet {
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

impl<'a> IntoIterator for &'a WellSet {
    type Item = &'a Well;
    type IntoIter = btree_map::Values<'a, WellId, Well>;

    fn into_iter(self) -> Self::IntoIter {
        self.wells.values()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WellSetRecord {
    label: String,
    wells: Vec<Well>,
}

impl TryFrom<WellSetRecord> for WellSet {
    type Error = ModelError;

    fn try_from(record: WellSetRecord) -> Result<Self, Self::Error> {
        Self::new(record.label, record.wells)
    }
}

impl From<WellSet> for WellSetRecord {
    fn from(set: WellSet) -> Self {
        Self {
            label: set.label,
            wells: set.wells.into_values().collect(),
        }
    }
}
