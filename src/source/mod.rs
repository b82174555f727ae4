mod coingecko;
mod types;

pub use coingecko::{CoinGeckoClient, COINGECKO_API_URL};
pub use types::{ChartPoint, MarketChart};

use async_trait::async_trait;

use crate::{error::FetchError, models::PriceSeries};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Hourly,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Hourly => "hourly",
        }
    }
}

/// How far back a fetch reaches and at what resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lookback {
    pub days: u32,
    pub granularity: Granularity,
}

impl Lookback {
    /// One day of hourly points, roughly 24 samples.
    pub const DAY_HOURLY: Lookback = Lookback {
        days: 1,
        granularity: Granularity::Hourly,
    };
}

impl Default for Lookback {
    fn default() -> Self {
        Self::DAY_HOURLY
    }
}

#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, ticker: &str, lookback: Lookback) -> Result<PriceSeries, FetchError>;
}
