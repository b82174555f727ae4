mod headless;
mod terminal;

pub use headless::HeadlessMenu;
pub use terminal::TerminalMenu;

use tokio::sync::mpsc;

use crate::models::DisplayFrame;

pub const APP_TITLE: &str = "3d Ticker";

/// Position of a ticker's entry in the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(pub usize);

/// One menu entry's click stream. Each item gets its own independent source.
#[derive(Debug)]
pub struct ClickSource {
    pub item: ItemId,
    pub ticker: String,
    pub clicks: mpsc::UnboundedReceiver<()>,
}

/// What opening a menu hands back: the menu itself, one click source per
/// ticker in configured order, and the quit source.
pub struct MenuParts<M> {
    pub menu: M,
    pub items: Vec<ClickSource>,
    pub quit: mpsc::Receiver<()>,
}

pub trait Menu {
    fn set_checked(&mut self, item: ItemId, checked: bool);

    fn set_title(&mut self, title: &str);

    fn show_frame(&mut self, _ticker: &str, _frame: &DisplayFrame) {}

    fn show_error(&mut self, _ticker: &str, _message: &str) {}

    /// Tears the menu down and returns the terminal or console to the user.
    fn release(self)
    where
        Self: Sized;
}

/// Builds the per-item click channels. The senders stay with whatever reads
/// user input, the sources go to the click relays.
pub fn click_channels(tickers: &[String]) -> (Vec<mpsc::UnboundedSender<()>>, Vec<ClickSource>) {
    tickers
        .iter()
        .enumerate()
        .map(|(index, ticker)| {
            let (tx, rx) = mpsc::unbounded_channel();
            let source = ClickSource {
                item: ItemId(index),
                ticker: ticker.clone(),
                clicks: rx,
            };
            (tx, source)
        })
        .unzip()
}

/// Resolves a typed selection, either a ticker name or its 1-based position.
pub(crate) fn resolve_item(tickers: &[String], input: &str) -> Option<ItemId> {
    let input = input.trim();
    if let Some(index) = tickers.iter().position(|ticker| ticker.eq_ignore_ascii_case(input)) {
        return Some(ItemId(index));
    }
    match input.parse::<usize>() {
        Ok(number) if number >= 1 && number <= tickers.len() => Some(ItemId(number - 1)),
        _ => None,
    }
}
