use itertools::Itertools;

use crate::{DataError, PurchaseRecord, Segment};

/// Linearly interpolated quantile of already sorted data.
pub fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let position = q.clamp(0.0, 1.0) * last as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Clamps every amount above its segment's `q` quantile down to that quantile.
/// Returns how many amounts were lowered.
pub fn cap_upper_tail(records: &mut [PurchaseRecord], q: f64) -> Result<usize, DataError> {
    if !(0.0..=1.0).contains(&q) {
        return Err(DataError::QuantileOutOfRange(q));
    }
    let caps: Vec<(Segment, f64)> = amounts_by_segment(records)
        .into_iter()
        .flat_map(|(segment, amounts)| Some((segment, quantile(&amounts, q)?)))
        .collect();
    let mut capped = 0;
    for record in records.iter_mut() {
        let Some((_, cap)) = caps.iter().find(|(segment, _)| *segment == record.segment) else {
            continue;
        };
        if record.amount > *cap {
            record.amount = *cap;
            capped += 1;
        }
    }
    Ok(capped)
}

/// Sorted amounts for each segment that has rows, in display order.
pub fn amounts_by_segment(records: &[PurchaseRecord]) -> Vec<(Segment, Vec<f64>)> {
    records
        .iter()
        .into_group_map_by(|record| record.segment)
        .into_iter()
        .sorted_by_key(|(segment, _)| segment.display_index())
        .map(|(segment, rows)| {
            let amounts = rows
                .into_iter()
                .map(|record| record.amount)
                .sorted_by(f64::total_cmp)
                .collect();
            (segment, amounts)
        })
        .collect()
}

/// Tukey box summary. Whiskers reach the furthest point within 1.5 IQR of the box.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
    pub fliers: Vec<f64>,
}

impl BoxStats {
    const WHISKER_IQR: f64 = 1.5;

    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted: Vec<f64> = values
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .sorted_by(f64::total_cmp)
            .collect();
        let q1 = quantile(&sorted, 0.25)?;
        let median = quantile(&sorted, 0.5)?;
        let q3 = quantile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        let low_fence = q1 - Self::WHISKER_IQR * iqr;
        let high_fence = q3 + Self::WHISKER_IQR * iqr;
        let (lower_whisker, upper_whisker) = sorted
            .iter()
            .filter(|v| (low_fence..=high_fence).contains(*v))
            .minmax()
            .into_option()
            .map(|(low, high)| (*low, *high))
            .unwrap_or((q1, q3));
        let fliers = sorted
            .iter()
            .copied()
            .filter(|v| *v < lower_whisker || *v > upper_whisker)
            .collect();
        Some(Self {
            q1,
            median,
            q3,
            lower_whisker,
            upper_whisker,
            fliers,
        })
    }

    /// Highest point drawn for this box, whisker or flier.
    pub fn max_value(&self) -> f64 {
        self.fliers
            .iter()
            .copied()
            .fold(self.upper_whisker, f64::max)
    }
}
