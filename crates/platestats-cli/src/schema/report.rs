use platestats_engine::{ResultMap, Value, Window};
use platestats_model::WellId;
use platestats_stats::summary::DescriptiveSummary;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WindowRecord {
    pub begin: usize,
    pub length: usize,
}

impl From<Window> for WindowRecord {
    fn from(window: Window) -> Self {
        Self {
            begin: window.begin(),
            length: window.length(),
        }
    }
}

/// Output of the `compute` command.
#[derive(Debug, Clone, Serialize)]
pub struct ComputeReport {
    pub statistic: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u8>,
    pub level: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowRecord>,
    pub results: ComputeResults,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ComputeResults {
    /// `{plate: {well: value}}`
    PerWell(ResultMap<String, ResultMap<WellId, Value>>),
    /// `{plate: value}`
    PerPlate(ResultMap<String, Value>),
    /// A single value over every plate
    All(Value),
}

/// Output of the `summary` command for one plate.
#[derive(Debug, Clone, Serialize)]
pub struct PlateSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub variance: Option<f64>,
    pub std_dev: Option<f64>,
    pub percentiles: Vec<PercentileRecord>,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PercentileRecord {
    pub percentile: f64,
    pub value: f64,
}

impl From<DescriptiveSummary> for PlateSummary {
    fn from(summary: DescriptiveSummary) -> Self {
        Self {
            count: summary.count,
            min: summary.min,
            max: summary.max,
            mean: summary.mean,
            variance: summary.variance,
            std_dev: summary.std_dev,
            percentiles: summary
                .percentiles
                .iter()
                .map(|(percentile, value)| PercentileRecord { percentile, value })
                .collect(),
        }
    }
}
