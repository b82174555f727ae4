use clap::Parser;
use log::info;

use ticker3d::{
    source::{CoinGeckoClient, Lookback, PriceSource},
    statistics::{Aggregator, Scaler},
};

/// Fetches one ticker and prints the frame the display would show.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct PreviewArgs {
    ticker: String,

    #[arg(short, long, default_value = "eur")]
    currency: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = PreviewArgs::parse();

    let source = CoinGeckoClient::new(&args.currency)?;
    let series = source.fetch(&args.ticker, Lookback::DAY_HOURLY).await?;
    info!("Fetched {} samples for {}", series.len(), args.ticker);

    if let (Some(first), Some(last)) = (
        series.first().and_then(|s| s.time()),
        series.last().and_then(|s| s.time()),
    ) {
        println!("window:  {} .. {}", first.format("%Y-%m-%d %H:%M"), last.format("%Y-%m-%d %H:%M"));
    }
    println!("samples: {}", series.len());

    let buckets = Aggregator::group(&series);
    let averages: Vec<String> = buckets
        .values()
        .iter()
        .map(|v| format!("{v:.4}"))
        .collect();
    println!("buckets: [{}] {}", averages.join(", "), args.currency);

    let frame = Scaler::scale(&buckets);
    println!("frame:   {frame}");
    println!("bytes:   {:?}", String::from_utf8_lossy(&frame.encode()));
    Ok(())
}
