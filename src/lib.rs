pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod helpers;
pub mod models;
pub mod pipeline;
pub mod selection;
pub mod source;
pub mod statistics;
pub mod ui;

pub use error::FetchError;
pub use pipeline::Pipeline;
pub use selection::{SelectionLoop, TickerSelection};
