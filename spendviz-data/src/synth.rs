use rand::Rng;
use rand_distr::{Distribution, LogNormal, Normal};

use crate::{DataError, PurchaseRecord, SegmentSpec};

const NOISE_STD_DEV: f64 = 5.0;
const MIN_AMOUNT: f64 = 1.0;
const OUTLIER_MU_SHIFT: f64 = 1.1;
const OUTLIER_SIGMA_SHIFT: f64 = 0.3;

/// Generates skewed purchase amounts for each segment, in the order given.
///
/// Each segment draws `count` log-normal base amounts plus gaussian noise,
/// floors them at $1 and then adds a larger log-normal draw onto the first
/// few rows to simulate high ticket purchases.
pub fn synthesize<R>(
    specs: &[SegmentSpec],
    rng: &mut R,
) -> Result<Vec<PurchaseRecord>, DataError>
where
    R: Rng + ?Sized,
{
    let mut records = Vec::with_capacity(specs.iter().map(|s| s.count).sum());
    for spec in specs {
        let invalid = |source| DataError::Distribution {
            segment: spec.segment,
            source,
        };
        let noise = Normal::new(0.0, NOISE_STD_DEV).map_err(invalid)?;
        let base = LogNormal::new(spec.mu, spec.sigma).map_err(invalid)?;
        let outlier = LogNormal::new(
            spec.mu + OUTLIER_MU_SHIFT,
            spec.sigma + OUTLIER_SIGMA_SHIFT,
        )
        .map_err(invalid)?;

        let mut amounts: Vec<f64> = (0..spec.count).map(|_| base.sample(rng)).collect();
        for amount in amounts.iter_mut() {
            *amount = (*amount + noise.sample(rng)).max(MIN_AMOUNT);
        }
        for amount in amounts.iter_mut().take(spec.outlier_count()) {
            *amount += outlier.sample(rng);
        }

        records.extend(amounts.into_iter().map(|amount| PurchaseRecord {
            segment: spec.segment,
            amount,
        }));
    }
    Ok(records)
}
