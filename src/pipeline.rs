use log::debug;

use crate::{
    display::Transport,
    error::FetchError,
    models::DisplayFrame,
    source::{Lookback, PriceSource},
    statistics,
};

/// Fetch, bucket, scale and write one ticker's frame to the display.
pub struct Pipeline<S, T> {
    source: S,
    transport: T,
    lookback: Lookback,
}

impl<S: PriceSource, T: Transport> Pipeline<S, T> {
    pub fn new(source: S, transport: T) -> Self {
        Self {
            source,
            transport,
            lookback: Lookback::DAY_HOURLY,
        }
    }

    /// Runs one cycle for `ticker`. Returns the frame that was written.
    pub async fn fetch_and_dispatch(&mut self, ticker: &str) -> Result<DisplayFrame, FetchError> {
        let series = self.source.fetch(ticker, self.lookback).await?;
        let frame = statistics::frame_for(&series);
        debug!("{ticker}: {} samples -> frame {frame}", series.len());

        self.transport.write(&frame.encode())?;
        Ok(frame)
    }

    pub fn into_transport(self) -> T {
        self.transport
    }
}
