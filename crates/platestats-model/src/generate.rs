//! Seeded random plate generation.
//!
//! Used to produce synthetic assay data for demos and tests. Readings for
//! every well are drawn from a normal distribution; each well gets its own
//! mean offset so that wells on one plate differ from each other, as they do
//! on a real dilution series.
//!
//! # Example
//!
//! ```
//! use platestats_model::{
//!     PlateType,
//!     generate::{GeneratorSeed, PlateGenerator},
//! };
//!
//! let generator = PlateGenerator::new(PlateType::Plate24, 5, 100.0, 10.0).unwrap();
//! let seed = GeneratorSeed::from_bytes([7; 16]);
//!
//! let first = generator.generate_many(3, &mut seed.rng());
//! let second = generator.generate_many(3, &mut seed.rng());
//!
//! assert_eq!(first.len(), 3);
//! assert!(first[0].is_full());
//! assert_eq!(first, second);
//! ```

use std::{fmt::Write as _, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_distr::{Normal, NormalError};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Plate, PlateType, Well};

/// Seed for deterministic plate generation.
///
/// A 128-bit seed for the PCG generator. The same seed always produces the
/// same plates, which keeps generated fixtures reproducible. Serialized as a
/// 32-character lowercase hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorSeed([u8; 16]);

impl GeneratorSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// A fresh generator seeded with this value.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl std::fmt::Display for GeneratorSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed '{input}': expected 32 hex characters")]
pub struct ParseSeedError {
    input: String,
}

impl FromStr for GeneratorSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for GeneratorSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut hex_str = String::with_capacity(2 * self.0.len());
        write!(&mut hex_str, "{self}").map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&hex_str)
    }
}

impl<'de> Deserialize<'de> for GeneratorSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `GeneratorSeed` values with `rng.random()`.
impl Distribution<GeneratorSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GeneratorSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        GeneratorSeed(seed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GeneratorError {
    #[display("invalid reading distribution: {_0}")]
    Distribution(NormalError),
}

/// Produces fully populated plates of normally distributed readings.
#[derive(Debug, Clone, Copy)]
pub struct PlateGenerator {
    plate_type: PlateType,
    readings_per_well: usize,
    well_means: Normal<f64>,
    std_dev: f64,
}

impl PlateGenerator {
    /// Creates a generator.
    ///
    /// Each well's own mean is drawn from `N(mean, std_dev)`; its readings are
    /// then drawn from `N(well_mean, std_dev / 2)`.
    pub fn new(
        plate_type: PlateType,
        readings_per_well: usize,
        mean: f64,
        std_dev: f64,
    ) -> Result<Self, GeneratorError> {
        let well_means = Normal::new(mean, std_dev).map_err(GeneratorError::Distribution)?;
        Ok(Self {
            plate_type,
            readings_per_well,
            well_means,
            std_dev,
        })
    }

    #[must_use]
    pub fn plate_type(&self) -> PlateType {
        self.plate_type
    }

    #[must_use]
    pub fn readings_per_well(&self) -> usize {
        self.readings_per_well
    }

    /// Generates one plate with every grid position populated.
    pub fn generate<R>(&self, label: impl Into<String>, rng: &mut R) -> Plate
    where
        R: Rng + ?Sized,
    {
        let wells = self.plate_type.positions().map(|id| {
            let well_mean = self.well_means.sample(&mut *rng);
            // only fails for a non-finite mean
            let readings = Normal::new(well_mean, self.std_dev / 2.0)
                .map(|dist| {
                    dist.sample_iter(&mut *rng)
                        .take(self.readings_per_well)
                        .collect()
                })
                .unwrap_or_else(|_| vec![well_mean; self.readings_per_well]);
            Well::new(id, readings)
        });
        Plate::from_grid(label.into(), self.plate_type, wells)
    }

    /// Generates `count` plates labelled `plate-1`, `plate-2`, ...
    pub fn generate_many<R>(&self, count: usize, rng: &mut R) -> Vec<Plate>
    where
        R: Rng + ?Sized,
    {
        (1..=count)
            .map(|i| self.generate(format!("plate-{i}"), &mut *rng))
            .collect()
    }
}
