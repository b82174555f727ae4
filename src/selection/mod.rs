mod relay;

pub use relay::{spawn_relays, RelayGroup};

use std::time::Duration;

use log::{debug, error, info, warn};
use thiserror::Error;
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, MissedTickBehavior},
};

use crate::{
    config::MAX_FETCH_INTERVAL_SECS,
    display::Transport,
    pipeline::Pipeline,
    source::PriceSource,
    ui::{ItemId, Menu, MenuParts, APP_TITLE},
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("no tickers configured")]
    NoTickers,
}

/// The configured tickers and which one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickerSelection {
    tickers: Vec<String>,
    selected: usize,
}

impl TickerSelection {
    /// Starts with the first ticker selected.
    pub fn new(tickers: Vec<String>) -> Result<Self, SelectionError> {
        if tickers.is_empty() {
            return Err(SelectionError::NoTickers);
        }
        Ok(Self {
            tickers,
            selected: 0,
        })
    }

    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    pub fn selected(&self) -> &str {
        &self.tickers[self.selected]
    }

    pub fn selected_item(&self) -> ItemId {
        ItemId(self.selected)
    }

    /// Makes `item` the active ticker. Unknown items leave the selection alone.
    pub fn select(&mut self, item: ItemId) -> Option<&str> {
        if item.0 < self.tickers.len() {
            self.selected = item.0;
            Some(self.selected())
        } else {
            None
        }
    }
}

/// A menu click, as published by a click relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEvent {
    pub ticker: String,
    pub item: ItemId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopEvent {
    Select(SelectionEvent),
    Tick,
}

/// Owns the selection, the pipeline and the menu. Handles one event at a time.
pub struct SelectionLoop<S, T, M> {
    selection: TickerSelection,
    pipeline: Pipeline<S, T>,
    menu: M,
    fetch_interval: Duration,
}

impl<S, T, M> SelectionLoop<S, T, M>
where
    S: PriceSource,
    T: Transport,
    M: Menu,
{
    pub fn new(
        selection: TickerSelection,
        pipeline: Pipeline<S, T>,
        menu: M,
        fetch_interval: Duration,
    ) -> Self {
        Self {
            selection,
            pipeline,
            menu,
            fetch_interval,
        }
    }

    pub fn selection(&self) -> &TickerSelection {
        &self.selection
    }

    pub fn menu(&self) -> &M {
        &self.menu
    }

    pub async fn handle(&mut self, event: LoopEvent) {
        match event {
            LoopEvent::Select(SelectionEvent { ticker, item }) => {
                if item.0 >= self.selection.tickers().len() {
                    warn!("Ignoring selection of unknown item {item:?} ({ticker})");
                    return;
                }
                for index in 0..self.selection.tickers().len() {
                    self.menu.set_checked(ItemId(index), false);
                }
                self.menu.set_checked(item, true);

                self.selection.select(item);
                info!("Selected {ticker}");
                self.dispatch(&ticker).await;
            }
            LoopEvent::Tick => {
                let ticker = self.selection.selected().to_string();
                debug!("Refreshing {ticker}");
                self.dispatch(&ticker).await;
            }
        }
    }

    async fn dispatch(&mut self, ticker: &str) {
        match self.pipeline.fetch_and_dispatch(ticker).await {
            Ok(frame) => {
                info!("{ticker}: sent frame {frame}");
                self.menu.show_frame(ticker, &frame);
            }
            Err(e) => {
                error!("{ticker}: {e}");
                self.menu.show_error(ticker, &e.to_string());
            }
        }
    }

    /// Runs until the quit source fires (or closes), then stops the relays,
    /// waits for them, closes the transport and releases the menu.
    pub async fn run(
        mut self,
        mut events: mpsc::UnboundedReceiver<SelectionEvent>,
        mut quit: mpsc::Receiver<()>,
        relays: RelayGroup,
    ) {
        let period = refresh_period(self.fetch_interval);
        let mut refresh = interval_at(Instant::now() + period, period);
        refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            "Watching {} tickers, refreshing {} every {}s",
            self.selection.tickers().len(),
            self.selection.selected(),
            period.as_secs()
        );

        loop {
            let event = tokio::select! {
                biased;
                _ = quit.recv() => break,
                Some(selection) = events.recv() => LoopEvent::Select(selection),
                _ = refresh.tick() => LoopEvent::Tick,
            };
            self.handle(event).await;
        }

        info!("Shutting down");
        let stopped = relays.shutdown().await;
        debug!("{} click relays stopped", stopped.len());

        let Self { pipeline, menu, .. } = self;
        if let Err(e) = pipeline.into_transport().close() {
            error!("Failed to close display transport: {e}");
        }
        menu.release();
    }
}

/// Bounds the refresh period so the ticker deadlines stay representable.
fn refresh_period(fetch_interval: Duration) -> Duration {
    fetch_interval.clamp(
        Duration::from_secs(1),
        Duration::from_secs(MAX_FETCH_INTERVAL_SECS),
    )
}

/// Wires an opened menu to the selection loop: spawns a click relay per item,
/// titles the menu and runs until quit.
pub async fn serve<S, T, M>(
    parts: MenuParts<M>,
    selection: TickerSelection,
    pipeline: Pipeline<S, T>,
    fetch_interval: Duration,
) where
    S: PriceSource,
    T: Transport,
    M: Menu,
{
    let MenuParts {
        mut menu,
        items,
        quit,
    } = parts;

    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let relays = spawn_relays(items, events_tx);
    menu.set_title(APP_TITLE);

    SelectionLoop::new(selection, pipeline, menu, fetch_interval)
        .run(events_rx, quit, relays)
        .await;
}
