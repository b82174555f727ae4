use crate::models::{BucketSet, PriceSeries, BAR_COUNT};

pub struct Aggregator;

impl Aggregator {
    /// Splits the series into `BAR_COUNT` contiguous slices by position and
    /// averages each. Buckets that receive no samples stay at zero.
    pub fn group(series: &PriceSeries) -> BucketSet {
        let samples = series.samples();
        let total = samples.len();
        if total == 0 {
            return BucketSet::default();
        }

        let mut sums = [0.0; BAR_COUNT];
        let mut counts = [0usize; BAR_COUNT];

        for (position, sample) in samples.iter().enumerate() {
            // position < total, so the bucket is always below BAR_COUNT
            let bucket = position * BAR_COUNT / total;
            sums[bucket] += sample.price;
            counts[bucket] += 1;
        }

        let mut averages = [0.0; BAR_COUNT];
        for bucket in 0..BAR_COUNT {
            if counts[bucket] > 0 {
                averages[bucket] = sums[bucket] / counts[bucket] as f64;
            }
        }

        BucketSet(averages)
    }
}
