use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use tokio::sync::mpsc;

use ticker3d::{
    display::{Transport, TransportError},
    error::FetchError,
    models::{DisplayFrame, PriceSeries, MAX_LEVEL},
    pipeline::Pipeline,
    selection::{serve, TickerSelection},
    source::{Lookback, MarketChart, PriceSource},
    statistics::{frame_for, Scaler},
    ui::{click_channels, ItemId, Menu, MenuParts},
};

const MARKET_CHART: &str = include_str!("fixtures/market_chart.json");

fn tickers() -> Vec<String> {
    vec!["ethereum".to_string(), "polkadot".to_string(), "cosmos".to_string()]
}

fn fixture_series() -> PriceSeries {
    MarketChart::parse(MARKET_CHART).unwrap().into_series()
}

#[derive(Clone, Default)]
struct FixtureSource {
    fetched: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl PriceSource for FixtureSource {
    async fn fetch(&self, ticker: &str, lookback: Lookback) -> Result<PriceSeries, FetchError> {
        assert_eq!(lookback, Lookback::DAY_HOURLY);
        self.fetched.lock().unwrap().push(ticker.to_string());
        Ok(fixture_series())
    }
}

#[derive(Clone, Default)]
struct RecordingTransport {
    written: Arc<Mutex<Vec<Vec<u8>>>>,
    closed: Arc<AtomicUsize>,
}

impl Transport for RecordingTransport {
    fn write(&mut self, bytes: &[u8]) -> Result<(), TransportError> {
        self.written.lock().unwrap().push(bytes.to_vec());
        Ok(())
    }

    fn close(self) -> Result<(), TransportError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[derive(Default)]
struct MenuState {
    checked: Vec<bool>,
    title: String,
    frames: Vec<DisplayFrame>,
    released: usize,
}

#[derive(Clone)]
struct RecordingMenu {
    state: Arc<Mutex<MenuState>>,
}

impl RecordingMenu {
    fn new(items: usize) -> Self {
        let state = MenuState {
            checked: (0..items).map(|index| index == 0).collect(),
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }
}

impl Menu for RecordingMenu {
    fn set_checked(&mut self, item: ItemId, checked: bool) {
        self.state.lock().unwrap().checked[item.0] = checked;
    }

    fn set_title(&mut self, title: &str) {
        self.state.lock().unwrap().title = title.to_string();
    }

    fn show_frame(&mut self, _ticker: &str, frame: &DisplayFrame) {
        self.state.lock().unwrap().frames.push(*frame);
    }

    fn release(self) {
        self.state.lock().unwrap().released += 1;
    }
}

async fn wait_for_writes(transport: &RecordingTransport, count: usize) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while transport.written.lock().unwrap().len() < count {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("timed out waiting for display writes");
}

#[test]
fn test_realistic_series_fits_display() {
    let series = fixture_series();
    assert_eq!(series.len(), 25);

    let frame = frame_for(&series);
    assert_eq!(frame.levels().len(), 5);
    assert!(frame.levels().iter().all(|&level| level <= MAX_LEVEL));
    assert_eq!(frame.levels(), &[9, 5, 3, 0, 0]);
    assert_eq!(&frame.encode(), b"95300\n");
}

#[test]
fn test_level_against_raw_prices() {
    let prices: Vec<f64> = fixture_series().samples().iter().map(|s| s.price).collect();
    assert_eq!(Scaler::level(&prices, 28.0), 0);
    assert_eq!(Scaler::level(&prices, 29.0), 5);
}

#[tokio::test]
async fn test_click_dispatches_and_quit_shuts_down() {
    let tickers = tickers();
    let source = FixtureSource::default();
    let transport = RecordingTransport::default();
    let menu = RecordingMenu::new(tickers.len());

    let (clicks, items) = click_channels(&tickers);
    let (quit_tx, quit) = mpsc::channel(1);
    let parts = MenuParts {
        menu: menu.clone(),
        items,
        quit,
    };

    let selection = TickerSelection::new(tickers.clone()).unwrap();
    let pipeline = Pipeline::new(source.clone(), transport.clone());
    let running = tokio::spawn(serve(parts, selection, pipeline, Duration::from_secs(3600)));

    clicks[1].send(()).unwrap();
    wait_for_writes(&transport, 1).await;

    assert_eq!(*source.fetched.lock().unwrap(), vec!["polkadot".to_string()]);
    assert_eq!(*transport.written.lock().unwrap(), vec![b"95300\n".to_vec()]);
    {
        let state = menu.state.lock().unwrap();
        assert_eq!(state.checked, vec![false, true, false]);
        assert_eq!(state.title, "3d Ticker");
        assert_eq!(state.frames.len(), 1);
    }

    quit_tx.send(()).await.unwrap();
    running.await.unwrap();

    assert_eq!(transport.closed.load(Ordering::SeqCst), 1);
    assert_eq!(menu.state.lock().unwrap().released, 1);
    // the relays are gone along with their click sources
    assert!(clicks.iter().all(|click| click.send(()).is_err()));
}

#[tokio::test]
async fn test_timer_refreshes_initial_selection() {
    let tickers = tickers();
    let source = FixtureSource::default();
    let transport = RecordingTransport::default();
    let menu = RecordingMenu::new(tickers.len());

    let (_clicks, items) = click_channels(&tickers);
    let (quit_tx, quit) = mpsc::channel(1);
    let parts = MenuParts {
        menu: menu.clone(),
        items,
        quit,
    };

    let selection = TickerSelection::new(tickers.clone()).unwrap();
    let pipeline = Pipeline::new(source.clone(), transport.clone());
    let running = tokio::spawn(serve(parts, selection, pipeline, Duration::from_millis(20)));

    wait_for_writes(&transport, 2).await;
    drop(quit_tx);
    running.await.unwrap();

    let fetched = source.fetched.lock().unwrap();
    assert!(fetched.len() >= 2);
    assert!(fetched.iter().all(|ticker| ticker == "ethereum"));
    assert_eq!(menu.state.lock().unwrap().checked, vec![true, false, false]);
    assert_eq!(transport.closed.load(Ordering::SeqCst), 1);
}
