use std::path::PathBuf;

use anyhow::{Context, ensure};
use platestats_engine::{ResultMap, Window, pool};
use platestats_model::Plate;
use platestats_stats::summary::DescriptiveSummary;
use tracing::{info, warn};

use crate::{
    schema::report::PlateSummary,
    util::{self, Output, WindowArg},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SummaryArg {
    /// Path to the plates JSON file
    #[arg(long)]
    input: PathBuf,
    #[command(flatten)]
    window: WindowArg,
    /// Percentiles to report (comma-separated, each in 0-100)
    #[arg(long, value_delimiter = ',', default_values_t = [25.0, 50.0, 75.0])]
    percentiles: Vec<f64>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let SummaryArg {
        input,
        window,
        percentiles,
        output,
    } = arg;

    for &p in percentiles {
        ensure!((0.0..=100.0).contains(&p), "Percentile {p} is outside 0-100");
    }
    let window = window.window()?;
    let collection = util::read_plates_file(input)?;
    info!(plates = collection.plates.len(), "summarizing");

    let summaries = summarize(&collection.plates, window, percentiles)?;
    Output::save_json(&summaries, output.clone())?;
    Ok(())
}

/// Summary of each plate's pooled readings, keyed by plate label.
///
/// Plates without readings are left out.
fn summarize(
    plates: &[Plate],
    window: Option<Window>,
    percentiles: &[f64],
) -> anyhow::Result<ResultMap<String, PlateSummary>> {
    let mut summaries = ResultMap::new();
    for plate in plates {
        let readings =
            pool(plate, window).with_context(|| format!("Plate '{}'", plate.label()))?;
        let Some(summary) = DescriptiveSummary::new(readings, percentiles) else {
            warn!(plate = plate.label(), "no readings, skipped");
            continue;
        };
        summaries.insert(plate.label().to_owned(), PlateSummary::from(summary));
    }
    Ok(summaries)
}
