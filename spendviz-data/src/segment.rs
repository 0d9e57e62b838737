use std::fmt::Display;

/// Customer tier a purchase belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Segment {
    Value,
    Mid,
    Premium,
    Vip,
}

impl Segment {
    /// Lower to higher value, the order boxes are drawn in.
    pub const DISPLAY_ORDER: [Segment; 4] =
        [Segment::Value, Segment::Mid, Segment::Premium, Segment::Vip];

    pub fn label(&self) -> &'static str {
        match self {
            Segment::Value => "Value",
            Segment::Mid => "Mid",
            Segment::Premium => "Premium",
            Segment::Vip => "VIP",
        }
    }

    pub fn display_index(&self) -> usize {
        match self {
            Segment::Value => 0,
            Segment::Mid => 1,
            Segment::Premium => 2,
            Segment::Vip => 3,
        }
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Sampling parameters for one segment. `mu` and `sigma` describe the normal
/// distribution underlying the log-normal purchase amounts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentSpec {
    pub segment: Segment,
    pub mu: f64,
    pub sigma: f64,
    pub count: usize,
}

impl SegmentSpec {
    /// Number of high ticket purchases injected into the segment.
    pub fn outlier_count(&self) -> usize {
        if self.count == 0 {
            0
        } else {
            (self.count / 50).max(1)
        }
    }
}

pub const DEFAULT_SEGMENTS: [SegmentSpec; 4] = [
    SegmentSpec {
        segment: Segment::Value,
        mu: 3.2,
        sigma: 0.55,
        count: 400,
    },
    SegmentSpec {
        segment: Segment::Mid,
        mu: 3.8,
        sigma: 0.50,
        count: 400,
    },
    SegmentSpec {
        segment: Segment::Premium,
        mu: 4.3,
        sigma: 0.45,
        count: 350,
    },
    SegmentSpec {
        segment: Segment::Vip,
        mu: 4.8,
        sigma: 0.40,
        count: 250,
    },
];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PurchaseRecord {
    pub segment: Segment,
    pub amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_follow_display_order() {
        let labels: Vec<_> = Segment::DISPLAY_ORDER.iter().map(|s| s.label()).collect();
        assert_eq!(labels, vec!["Value", "Mid", "Premium", "VIP"]);
        for (i, segment) in Segment::DISPLAY_ORDER.iter().enumerate() {
            assert_eq!(segment.display_index(), i);
        }
    }

    #[test]
    fn test_outlier_count() {
        let counts: Vec<_> = DEFAULT_SEGMENTS.iter().map(|s| s.outlier_count()).collect();
        assert_eq!(counts, vec![8, 8, 7, 5]);

        let small = SegmentSpec {
            count: 10,
            ..DEFAULT_SEGMENTS[0]
        };
        assert_eq!(small.outlier_count(), 1);

        let empty = SegmentSpec {
            count: 0,
            ..DEFAULT_SEGMENTS[0]
        };
        assert_eq!(empty.outlier_count(), 0);
    }
}
