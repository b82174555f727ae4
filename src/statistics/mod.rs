mod bucketing;
mod scaling;

pub use bucketing::Aggregator;
pub use scaling::Scaler;

use crate::models::{DisplayFrame, PriceSeries};

/// Bucket and scale a series into the frame the display shows.
pub fn frame_for(series: &PriceSeries) -> DisplayFrame {
    Scaler::scale(&Aggregator::group(series))
}
