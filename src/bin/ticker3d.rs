use anyhow::Context;
use clap::Parser;
use log::info;

use ticker3d::{
    cli::Args,
    config::{effective_interval, Config},
    display::SerialTransport,
    helpers::init_file_logger,
    pipeline::Pipeline,
    selection::{serve, TickerSelection},
    source::CoinGeckoClient,
    ui::{HeadlessMenu, TerminalMenu},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_file_logger(&args.log_file)
        .with_context(|| format!("failed to create log file {}", args.log_file.display()))?;

    let config = Config::load_or_init(&args.config_path)?;
    info!("Loaded config from {}", args.config_path.display());

    let fetch_interval = match args.interval {
        Some(interval) => effective_interval(i64::try_from(interval.secs).unwrap_or(i64::MAX)),
        None => config.fetch_interval(),
    };

    let selection = TickerSelection::new(config.tickers.clone())?;
    let source = CoinGeckoClient::new(&config.vs_currency)?;
    let transport = SerialTransport::open_or_detached(&config.com_port, config.baud_rate);
    let pipeline = Pipeline::new(source, transport);

    if args.headless {
        let parts = HeadlessMenu::open(selection.tickers(), selection.selected_item());
        serve(parts, selection, pipeline, fetch_interval).await;
    } else {
        let parts = TerminalMenu::open(selection.tickers(), selection.selected_item())
            .context("failed to open terminal menu")?;
        serve(parts, selection, pipeline, fetch_interval).await;
    }

    info!("Exited cleanly");
    Ok(())
}
