use std::io::BufRead;

use log::{debug, error, info, warn};
use tokio::{sync::mpsc, task::JoinHandle};

use super::{click_channels, resolve_item, ItemId, Menu, MenuParts};
use crate::models::DisplayFrame;

/// Console stand-in for the tray menu. Stdin lines click items (ticker name or
/// 1-based index), `quit` or Ctrl-C quits, frames are echoed to stdout.
pub struct HeadlessMenu {
    tickers: Vec<String>,
    checked: Vec<bool>,
    signal_task: JoinHandle<()>,
}

impl HeadlessMenu {
    pub fn open(tickers: &[String], initial: ItemId) -> MenuParts<HeadlessMenu> {
        let (clicks, items) = click_channels(tickers);
        let (quit_tx, quit) = mpsc::channel(1);

        let signal_quit = quit_tx.clone();
        let signal_task = tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    let _ = signal_quit.try_send(());
                }
                Err(e) => error!("Failed to listen for Ctrl-C: {e}"),
            }
        });

        // stdin reads block, so they live on a plain thread that is left
        // behind at exit instead of a runtime task.
        let stdin_tickers = tickers.to_vec();
        std::thread::spawn(move || read_stdin(stdin_tickers, clicks, quit_tx));

        let menu = HeadlessMenu {
            tickers: tickers.to_vec(),
            checked: (0..tickers.len()).map(|index| index == initial.0).collect(),
            signal_task,
        };

        MenuParts { menu, items, quit }
    }
}

fn read_stdin(
    tickers: Vec<String>,
    clicks: Vec<mpsc::UnboundedSender<()>>,
    quit: mpsc::Sender<()>,
) {
    for line in std::io::stdin().lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                error!("Failed to read stdin: {e}");
                break;
            }
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") {
            let _ = quit.try_send(());
            return;
        }
        match resolve_item(&tickers, input) {
            Some(item) => {
                if clicks[item.0].send(()).is_err() {
                    return;
                }
            }
            None => warn!("Unknown ticker selection: {input}"),
        }
    }
    debug!("stdin closed");
}

impl Menu for HeadlessMenu {
    fn set_checked(&mut self, item: ItemId, checked: bool) {
        if let Some(slot) = self.checked.get_mut(item.0) {
            *slot = checked;
            debug!("[{}] {}", if checked { "x" } else { " " }, self.tickers[item.0]);
        }
    }

    fn set_title(&mut self, title: &str) {
        info!("{title}");
    }

    fn show_frame(&mut self, ticker: &str, frame: &DisplayFrame) {
        println!("{ticker} {frame}");
    }

    fn release(self) {
        self.signal_task.abort();
        debug!("Headless menu released");
    }
}
