use chrono::{DateTime, Utc};
use platestats_model::{Plate, generate::GeneratorSeed};
use serde::{Deserialize, Serialize};

/// A set of plates stored as one JSON document.
///
/// Written by `generate` and read by `compute` and `summary`. Hand-written
/// files may leave out the generation metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlateCollection {
    /// When the plates were generated (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<DateTime<Utc>>,
    /// Seed that reproduces the plates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<GeneratorSeed>,
    pub plates: Vec<Plate>,
}
