use std::path::PathBuf;

use anyhow::Context;
use platestats_model::{
    PlateType,
    generate::{GeneratorSeed, PlateGenerator},
};
use rand::Rng as _;
use tracing::info;

use crate::{schema::plate_collection::PlateCollection, util::Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Number of plates to generate
    #[arg(long, default_value_t = 3)]
    plates: usize,
    /// Plate format: 6, 12, 24, 48, 96, 384, 1536 or ROWSxCOLUMNS
    #[arg(long, default_value_t = PlateType::Plate96)]
    plate_type: PlateType,
    /// Readings per well
    #[arg(long, default_value_t = 10)]
    readings: usize,
    /// Mean of the per-well means
    #[arg(long, default_value_t = 100.0)]
    mean: f64,
    /// Spread of the per-well means
    #[arg(long, default_value_t = 10.0)]
    std_dev: f64,
    /// Seed as 32 hex characters; random if omitted
    #[arg(long)]
    seed: Option<GeneratorSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        plates,
        plate_type,
        readings,
        mean,
        std_dev,
        seed,
        output,
    } = arg;

    let generator = PlateGenerator::new(*plate_type, *readings, *mean, *std_dev)
        .context("Invalid generator parameters")?;
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    info!(%seed, plates, %plate_type, readings, "generating plates");

    let collection = PlateCollection {
        generated_at: Some(chrono::Utc::now()),
        seed: Some(seed),
        plates: generator.generate_many(*plates, &mut seed.rng()),
    };

    Output::save_json(&collection, output.clone())?;
    info!(plates = collection.plates.len(), "done");
    Ok(())
}
