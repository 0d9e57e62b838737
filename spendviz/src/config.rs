use std::path::PathBuf;

use spendviz_charts::ChartOptions;
use spendviz_data::{SegmentSpec, DEFAULT_SEGMENTS};

/// Everything the chart run needs. The values are fixed, there are no flags.
pub(crate) struct ChartConfig {
    pub(crate) output: PathBuf,
    pub(crate) size: (u32, u32),
    pub(crate) seed: u64,
    /// Per segment quantile that amounts are capped to.
    pub(crate) cap_quantile: f64,
    pub(crate) segments: Vec<SegmentSpec>,
    pub(crate) chart: ChartOptions,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("chart.png"),
            size: (512, 512),
            seed: 42,
            cap_quantile: 0.995,
            segments: DEFAULT_SEGMENTS.to_vec(),
            chart: ChartOptions::default(),
        }
    }
}
