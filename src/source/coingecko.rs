use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use super::{Lookback, MarketChart, PriceSource};
use crate::{error::FetchError, models::PriceSeries};

pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    http_client: Client,
    base_url: String,
    vs_currency: String,
}

impl CoinGeckoClient {
    pub fn new(vs_currency: &str) -> reqwest::Result<CoinGeckoClient> {
        Self::with_base_url(COINGECKO_API_URL, vs_currency)
    }

    pub fn with_base_url(base_url: &str, vs_currency: &str) -> reqwest::Result<CoinGeckoClient> {
        let http_client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(CoinGeckoClient {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            vs_currency: vs_currency.to_string(),
        })
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    fn chart_url(&self, ticker: &str) -> String {
        format!("{}/coins/{}/market_chart", self.base_url, ticker)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch(&self, ticker: &str, lookback: Lookback) -> Result<PriceSeries, FetchError> {
        let url = self.chart_url(ticker);
        let days = lookback.days.to_string();
        debug!("GET {url} days={days} interval={}", lookback.granularity.as_str());

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("vs_currency", self.vs_currency.as_str()),
                ("days", days.as_str()),
                ("interval", lookback.granularity.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::SourceUnavailable(format!(
                "request for {ticker} failed: {status}"
            )));
        }

        let body = response.text().await?;
        let series = MarketChart::parse(&body)?.into_series();
        debug!("{ticker}: received {} samples", series.len());
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_url() {
        let client = CoinGeckoClient::with_base_url("http://localhost:8080/api/", "usd").unwrap();
        assert_eq!(
            client.chart_url("ethereum"),
            "http://localhost:8080/api/coins/ethereum/market_chart"
        );
        assert_eq!(client.vs_currency(), "usd");
    }

    #[tokio::test]
    async fn test_unreachable_source() {
        // nothing listens on the discard port
        let client = CoinGeckoClient::with_base_url("http://127.0.0.1:9", "eur").unwrap();
        let err = client.fetch("ethereum", Lookback::DAY_HOURLY).await.unwrap_err();
        assert!(matches!(err, FetchError::SourceUnavailable(_)));
    }
}
