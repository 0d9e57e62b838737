mod segment;
mod stats;
mod synth;

pub use segment::{PurchaseRecord, Segment, SegmentSpec, DEFAULT_SEGMENTS};
pub use stats::{amounts_by_segment, cap_upper_tail, quantile, BoxStats};
pub use synth::synthesize;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("Invalid distribution parameters for {segment}: {source}")]
    Distribution {
        segment: Segment,
        #[source]
        source: rand_distr::NormalError,
    },
    #[error("Quantile must be within 0..=1, got {0}")]
    QuantileOutOfRange(f64),
}
