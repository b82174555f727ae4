mod frame;
mod series;

pub use frame::{BucketSet, DisplayFrame, InvalidLevel, BAR_COUNT, MAX_LEVEL};
pub use series::{PriceSeries, Sample};
