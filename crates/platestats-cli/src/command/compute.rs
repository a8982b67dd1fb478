use std::path::PathBuf;

use anyhow::Context;
use platestats_engine::{AnyStatistic, ResultMap, Statistic as _, StatisticKind, Window, pool};
use platestats_model::Plate;
use tracing::{debug, info};

use crate::{
    schema::report::{ComputeReport, ComputeResults},
    util::{self, Output, WindowArg},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum Level {
    /// One value per well of every plate
    WellPerPlate,
    /// One value per plate over its pooled wells
    PlateAggregated,
    /// One value over the pooled wells of every plate
    AllAggregated,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Self::WellPerPlate => "well-per-plate",
            Self::PlateAggregated => "plate-aggregated",
            Self::AllAggregated => "all-aggregated",
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ComputeArg {
    /// Path to the plates JSON file
    #[arg(long)]
    input: PathBuf,
    /// Statistic to compute: count, sum, sum-of-squares, min, max, mean,
    /// geometric-mean, variance, population-variance, std-dev, skewness,
    /// kurtosis or percentile
    #[arg(long)]
    statistic: StatisticKind,
    /// Percentile rank (1-100), required by `percentile`
    #[arg(long)]
    rank: Option<u8>,
    /// Granularity of the results
    #[arg(long, value_enum, default_value_t = Level::WellPerPlate)]
    level: Level,
    #[command(flatten)]
    window: WindowArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ComputeArg) -> anyhow::Result<()> {
    let ComputeArg {
        input,
        statistic,
        rank,
        level,
        window,
        output,
    } = arg;

    let stat = statistic
        .build(*rank)
        .with_context(|| format!("Cannot compute {statistic}"))?;
    let window = window.window()?;
    let collection = util::read_plates_file(input)?;

    info!(
        statistic = %statistic,
        level = level.as_str(),
        plates = collection.plates.len(),
        "computing"
    );
    let results = compute(stat, *level, &collection.plates, window)
        .with_context(|| format!("Failed to compute {statistic} ({})", level.as_str()))?;

    let report = ComputeReport {
        statistic: statistic.to_string(),
        rank: *rank,
        level: level.as_str(),
        window: window.map(Into::into),
        results,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}

fn compute(
    stat: AnyStatistic,
    level: Level,
    plates: &[Plate],
    window: Option<Window>,
) -> anyhow::Result<ComputeResults> {
    let results = match level {
        Level::WellPerPlate => {
            let per_plate = plates
                .iter()
                .map(|plate| -> anyhow::Result<_> {
                    let values = match window {
                        Some(window) => stat.plate_window(plate, window),
                        None => stat.plate(plate),
                    }
                    .with_context(|| format!("Plate '{}'", plate.label()))?;
                    debug!(plate = plate.label(), wells = values.len(), "computed");
                    Ok((plate.label().to_owned(), values))
                })
                .collect::<anyhow::Result<ResultMap<_, _>>>()?;
            ComputeResults::PerWell(per_plate)
        }
        Level::PlateAggregated => {
            let per_plate = match window {
                Some(window) => stat.plates_aggregated_window(plates, window),
                None => stat.plates_aggregated(plates),
            }?;
            ComputeResults::PerPlate(per_plate)
        }
        Level::AllAggregated => {
            let mut pooled = Vec::new();
            for plate in plates {
                let readings =
                    pool(plate, window).with_context(|| format!("Plate '{}'", plate.label()))?;
                pooled.extend(readings);
            }
            debug!(readings = pooled.len(), "pooled all plates");
            ComputeResults::All(stat.reduce(&pooled)?)
        }
    };
    Ok(results)
}

#[cfg(test)]
mod tests {
    use platestats_engine::Value;
    use platestats_model::{PlateType, Well, WellId};

    use super::*;

    fn plates() -> Vec<Plate> {
        let plate = |label: &str, offset: f64| {
            Plate::new(
                label,
                PlateType::Plate6,
                [
                    Well::new(WellId::new(0, 0), vec![offset + 1.0, offset + 2.0, offset + 3.0]),
                    Well::new(WellId::new(0, 1), vec![offset + 4.0, offset + 5.0, offset + 6.0]),
                ],
            )
            .unwrap()
        };
        vec![plate("p1", 0.0), plate("p2", 10.0)]
    }

    fn count() -> AnyStatistic {
        StatisticKind::Count.build(None).unwrap()
    }

    #[test]
    fn test_levels() {
        let plates = plates();

        let ComputeResults::PerWell(per_well) =
            compute(count(), Level::WellPerPlate, &plates, None).unwrap()
        else {
            panic!("expected per-well results");
        };
        assert_eq!(per_well.len(), 2);
        assert_eq!(per_well["p2"][&WellId::new(0, 1)], Value::Count(3));

        let ComputeResults::PerPlate(per_plate) =
            compute(count(), Level::PlateAggregated, &plates, None).unwrap()
        else {
            panic!("expected per-plate results");
        };
        assert_eq!(per_plate["p1"], Value::Count(6));

        let window = Window::new(1, 2).ok();
        let ComputeResults::All(all) =
            compute(count(), Level::AllAggregated, &plates, window).unwrap()
        else {
            panic!("expected a single result");
        };
        assert_eq!(all, Value::Count(8));
    }

    #[test]
    fn test_all_aggregated_pools_every_plate() {
        let max = StatisticKind::Max.build(None).unwrap();
        let ComputeResults::All(value) =
            compute(max, Level::AllAggregated, &plates(), None).unwrap()
        else {
            panic!("expected a single result");
        };
        assert_eq!(value, Value::Real(16.0));
    }

    #[test]
    fn test_window_errors_propagate() {
        let window = Window::new(2, 2).ok();
        for level in [Level::WellPerPlate, Level::PlateAggregated, Level::AllAggregated] {
            assert!(compute(count(), level, &plates(), window).is_err());
        }
    }

    #[test]
    fn test_report_json_shape() {
        let results = compute(count(), Level::PlateAggregated, &plates(), None).unwrap();
        let report = ComputeReport {
            statistic: "count".to_owned(),
            rank: None,
            level: Level::PlateAggregated.as_str(),
            window: None,
            results,
        };
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "statistic": "count",
                "level": "plate-aggregated",
                "results": {"p1": 6, "p2": 6},
            })
        );
    }
}
