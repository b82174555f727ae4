use serde::Deserialize;

use crate::{
    error::FetchError,
    models::{PriceSeries, Sample},
};

/*
{
  "prices": [
    [1631624546813, 29.634300756946963],
    [1631628534330, 28.529577037197395],
    ...
  ]
}
*/
#[derive(Deserialize, Debug)]
pub struct MarketChart {
    pub prices: Vec<ChartPoint>,
}

/// `[timestamp_ms, price, ...]`. The timestamp may arrive as a float and
/// anything after the price is ignored.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "Vec<f64>")]
pub struct ChartPoint(pub u64, pub f64);

impl TryFrom<Vec<f64>> for ChartPoint {
    type Error = String;

    fn try_from(point: Vec<f64>) -> Result<Self, Self::Error> {
        match point.as_slice() {
            [timestamp, price, ..] if timestamp.is_finite() && *timestamp >= 0.0 => {
                Ok(ChartPoint(*timestamp as u64, *price))
            }
            [timestamp, _, ..] => Err(format!("invalid timestamp {timestamp}")),
            _ => Err(format!("expected [timestamp, price], got {} values", point.len())),
        }
    }
}

impl MarketChart {
    pub fn parse(body: &str) -> Result<Self, FetchError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn into_series(self) -> PriceSeries {
        self.prices
            .into_iter()
            .map(|ChartPoint(timestamp, price)| Sample::new(timestamp, price))
            .collect()
    }
}
