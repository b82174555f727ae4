use std::io::{self, Stdout};

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use futures::StreamExt;
use log::{debug, error, warn};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Modifier, Style},
    widgets::{BarChart, Block, Borders, List, ListItem, Paragraph},
    Frame, Terminal,
};
use tokio::{sync::mpsc, task::JoinHandle};

use super::{click_channels, ItemId, Menu, MenuParts, APP_TITLE};
use crate::models::{DisplayFrame, BAR_COUNT, MAX_LEVEL};

const MAX_HOTKEYS: usize = 9;

struct Entry {
    label: String,
    checked: bool,
}

/// Checkbox menu drawn in the terminal. Keys `1`-`9` click the matching
/// entry, `q`, `Esc` or `Ctrl-C` quit.
pub struct TerminalMenu {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    title: String,
    entries: Vec<Entry>,
    last_frame: Option<(String, DisplayFrame)>,
    status: Option<String>,
    input_task: JoinHandle<()>,
}

impl TerminalMenu {
    pub fn open(tickers: &[String], initial: ItemId) -> io::Result<MenuParts<TerminalMenu>> {
        if tickers.len() > MAX_HOTKEYS {
            warn!(
                "{} tickers configured, only the first {MAX_HOTKEYS} can be selected from the keyboard",
                tickers.len()
            );
        }

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        let (clicks, items) = click_channels(tickers);
        let (quit_tx, quit) = mpsc::channel(1);
        let input_task = tokio::spawn(forward_input(clicks, quit_tx));

        let mut menu = TerminalMenu {
            terminal,
            title: APP_TITLE.to_string(),
            entries: tickers
                .iter()
                .enumerate()
                .map(|(index, ticker)| Entry {
                    label: ticker.clone(),
                    checked: index == initial.0,
                })
                .collect(),
            last_frame: None,
            status: None,
            input_task,
        };
        menu.draw();

        Ok(MenuParts { menu, items, quit })
    }

    fn draw(&mut self) {
        let Self {
            terminal,
            title,
            entries,
            last_frame,
            status,
            ..
        } = self;
        if let Err(e) = terminal.draw(|frame| render(frame, title, entries, last_frame.as_ref(), status.as_deref())) {
            error!("Failed to draw menu: {e}");
        }
    }
}

fn render(
    frame: &mut Frame,
    title: &str,
    entries: &[Entry],
    last_frame: Option<&(String, DisplayFrame)>,
    status: Option<&str>,
) {
    let [list_area, chart_area, status_area] = Layout::vertical([
        Constraint::Length(entries.len() as u16 + 2),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let items: Vec<ListItem> = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let mark = if entry.checked { "[x]" } else { "[ ]" };
            let hotkey = if index < MAX_HOTKEYS {
                format!("{}", index + 1)
            } else {
                " ".to_string()
            };
            let style = if entry.checked {
                Style::default().add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(format!("{hotkey} {mark} {}", entry.label)).style(style)
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().borders(Borders::ALL).title(title.to_string())),
        list_area,
    );

    let (chart_title, levels) = match last_frame {
        Some((ticker, display)) => (format!("{ticker} {display}"), *display.levels()),
        None => ("waiting for data".to_string(), [0; BAR_COUNT]),
    };
    let bar_values = bar_data(&levels);
    let bars: Vec<(&str, u64)> = bar_values
        .iter()
        .map(|(label, level)| (label.as_str(), *level))
        .collect();
    frame.render_widget(
        BarChart::default()
            .block(Block::default().borders(Borders::ALL).title(chart_title))
            .data(bars.as_slice())
            .max(u64::from(MAX_LEVEL))
            .bar_width(3)
            .bar_gap(1)
            .bar_style(Style::default().fg(Color::Green)),
        chart_area,
    );

    let status_line = status.unwrap_or("1-9 select  q quit");
    frame.render_widget(Paragraph::new(status_line.to_string()), status_area);
}

async fn forward_input(clicks: Vec<mpsc::UnboundedSender<()>>, quit: mpsc::Sender<()>) {
    let mut events = EventStream::new();
    while let Some(event) = events.next().await {
        match event {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if is_quit(&key) {
                    let _ = quit.try_send(());
                    continue;
                }
                if let KeyCode::Char(c) = key.code {
                    let clicked = c
                        .to_digit(10)
                        .and_then(|digit| (digit as usize).checked_sub(1))
                        .and_then(|index| clicks.get(index));
                    if let Some(tx) = clicked {
                        let _ = tx.send(());
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!("Failed to read terminal input: {e}");
                break;
            }
        }
    }
    debug!("Terminal input closed");
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

impl Menu for TerminalMenu {
    fn set_checked(&mut self, item: ItemId, checked: bool) {
        if let Some(entry) = self.entries.get_mut(item.0) {
            entry.checked = checked;
            self.draw();
        }
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        if let Err(e) = execute!(io::stdout(), SetTitle(title)) {
            warn!("Failed to set terminal title: {e}");
        }
        self.draw();
    }

    fn show_frame(&mut self, ticker: &str, frame: &DisplayFrame) {
        self.last_frame = Some((ticker.to_string(), *frame));
        self.status = None;
        self.draw();
    }

    fn show_error(&mut self, ticker: &str, message: &str) {
        self.status = Some(format!("{ticker}: {message}"));
        self.draw();
    }

    fn release(mut self) {
        self.input_task.abort();
        if let Err(e) = disable_raw_mode() {
            error!("Failed to disable raw mode: {e}");
        }
        if let Err(e) = execute!(self.terminal.backend_mut(), LeaveAlternateScreen) {
            error!("Failed to leave alternate screen: {e}");
        }
        if let Err(e) = self.terminal.show_cursor() {
            error!("Failed to restore cursor: {e}");
        }
    }
}

/// One labelled bar per level, numbered from 1.
fn bar_data(levels: &[u8; BAR_COUNT]) -> Vec<(String, u64)> {
    levels
        .iter()
        .enumerate()
        .map(|(index, level)| ((index + 1).to_string(), u64::from(*level)))
        .collect()
}
