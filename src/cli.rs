use clap::Parser;
use std::{path::PathBuf, str::FromStr};

#[derive(Debug, Parser)]
#[command(author, version, about = "Drives a 5-bar LED display from crypto price history", long_about = None)]
pub struct Args {
    #[arg(long, default_value = "./conf.json")]
    pub config_path: PathBuf,

    #[arg(long, default_value = "3d-ticker.log")]
    pub log_file: PathBuf,

    /// Overrides FetchIntervalSeconds, e.g. 30s, 10m or 1h.
    #[arg(short, long, value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// Read selections from stdin instead of drawing the terminal menu.
    #[arg(long)]
    pub headless: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    pub secs: u64,
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} seconds", self.secs)
    }
}

pub fn parse_duration(s: &str) -> Result<Duration, String> {
    if let Some(stripped) = s.strip_suffix('s') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        Ok(Duration { secs: num })
    } else if let Some(stripped) = s.strip_suffix('m') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        let secs = num.checked_mul(60).ok_or_else(|| format!("{s} is too long"))?;
        Ok(Duration { secs })
    } else if let Some(stripped) = s.strip_suffix('h') {
        let num = u64::from_str(stripped).map_err(|e| e.to_string())?;
        let secs = num.checked_mul(3600).ok_or_else(|| format!("{s} is too long"))?;
        Ok(Duration { secs })
    } else {
        Err("Invalid duration format. Use formats like 1s, 3m, or 1h.".into())
    }
}
