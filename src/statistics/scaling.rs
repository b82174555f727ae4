use crate::models::{BucketSet, DisplayFrame, BAR_COUNT, MAX_LEVEL};

pub struct Scaler;

impl Scaler {
    /// Min-max normalizes the buckets against each other onto `0..=MAX_LEVEL`.
    /// A flat batch (max == min) maps to an all-zero frame.
    pub fn scale(buckets: &BucketSet) -> DisplayFrame {
        let min = buckets.min();
        let max = buckets.max();

        let mut levels = [0u8; BAR_COUNT];
        for (level, &value) in levels.iter_mut().zip(buckets.values()) {
            *level = Self::level_between(min, max, value);
        }

        DisplayFrame::new(levels).unwrap_or_default()
    }

    /// Scales a single price against the bounds of `values`.
    pub fn level(values: &[f64], value: f64) -> u8 {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self::level_between(min, max, value)
    }

    fn level_between(min: f64, max: f64, value: f64) -> u8 {
        let span = max - min;
        if !(span.is_finite() && span > 0.0) {
            return 0;
        }
        let scaled = ((value - min) / span * f64::from(MAX_LEVEL)).floor();
        scaled.clamp(0.0, f64::from(MAX_LEVEL)) as u8
    }
}
