use std::{
    fs,
    io,
    path::{Path, PathBuf},
    time::Duration,
};

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_FETCH_INTERVAL_SECS: u64 = 10;
pub const FALLBACK_FETCH_INTERVAL_SECS: u64 = 60;
pub const MAX_FETCH_INTERVAL_SECS: u64 = 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("config must list at least one ticker")]
    NoTickers,

    #[error("ticker at position {0} is blank")]
    BlankTicker(usize),
}

/// On-disk settings, stored as JSON with PascalCase keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Config {
    pub tickers: Vec<String>,
    pub fetch_interval_seconds: i64,
    pub com_port: String,
    pub baud_rate: u32,
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
}

fn default_vs_currency() -> String {
    "eur".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tickers: vec![
                "ethereum".to_string(),
                "polkadot".to_string(),
                "cosmos".to_string(),
            ],
            fetch_interval_seconds: 60 * 10,
            com_port: "COM5".to_string(),
            baud_rate: 9600,
            vs_currency: default_vs_currency(),
        }
    }
}

impl Config {
    /// Loads the config at `path`, writing and returning the defaults if the
    /// file does not exist yet.
    pub fn load_or_init<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                config.save(path)?;
                info!("Wrote default config to {}", path.display());
                Ok(config)
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tickers.is_empty() {
            return Err(ConfigError::NoTickers);
        }
        if let Some(position) = self.tickers.iter().position(|t| t.trim().is_empty()) {
            return Err(ConfigError::BlankTicker(position));
        }
        Ok(())
    }

    pub fn fetch_interval(&self) -> Duration {
        effective_interval(self.fetch_interval_seconds)
    }
}

/// Intervals under ten seconds fall back to one minute. Anything longer than
/// the one-day lookback is capped at a day.
pub fn effective_interval(seconds: i64) -> Duration {
    match u64::try_from(seconds) {
        Ok(secs) if secs >= MIN_FETCH_INTERVAL_SECS => {
            Duration::from_secs(secs.min(MAX_FETCH_INTERVAL_SECS))
        }
        _ => Duration::from_secs(FALLBACK_FETCH_INTERVAL_SECS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_floor() {
        assert_eq!(effective_interval(600), Duration::from_secs(600));
        assert_eq!(effective_interval(10), Duration::from_secs(10));
        assert_eq!(effective_interval(9), Duration::from_secs(60));
        assert_eq!(effective_interval(0), Duration::from_secs(60));
        assert_eq!(effective_interval(-5), Duration::from_secs(60));
        assert_eq!(effective_interval(86_400), Duration::from_secs(86_400));
        assert_eq!(effective_interval(86_401), Duration::from_secs(86_400));
        assert_eq!(effective_interval(i64::MAX), Duration::from_secs(86_400));
    }

    #[test]
    fn test_huge_interval_in_file_is_capped() {
        let content = r#"{"Tickers":["ethereum"],"FetchIntervalSeconds":9223372036854775807,"ComPort":"COM5","BaudRate":9600}"#;
        let config = Config::parse(content, Path::new("conf.json")).unwrap();
        assert_eq!(config.fetch_interval(), Duration::from_secs(MAX_FETCH_INTERVAL_SECS));
    }

    #[test]
    fn test_parse_pascal_case_config() {
        let content = r#"{"Tickers":["bitcoin","cardano"],"FetchIntervalSeconds":5,"ComPort":"/dev/ttyUSB0","BaudRate":115200}"#;
        let config = Config::parse(content, Path::new("conf.json")).unwrap();
        assert_eq!(config.tickers, vec!["bitcoin", "cardano"]);
        assert_eq!(config.com_port, "/dev/ttyUSB0");
        assert_eq!(config.baud_rate, 115200);
        assert_eq!(config.vs_currency, "eur");
        assert_eq!(config.fetch_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_reject_empty_tickers() {
        let content = r#"{"Tickers":[],"FetchIntervalSeconds":60,"ComPort":"COM5","BaudRate":9600}"#;
        let err = Config::parse(content, Path::new("conf.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NoTickers));

        let content = r#"{"Tickers":["ethereum"," "],"FetchIntervalSeconds":60,"ComPort":"COM5","BaudRate":9600}"#;
        let err = Config::parse(content, Path::new("conf.json")).unwrap_err();
        assert!(matches!(err, ConfigError::BlankTicker(1)));
    }

    #[test]
    fn test_reject_malformed_config() {
        let err = Config::parse("{\"Tickers\":", Path::new("conf.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conf.json");

        let config = Config::load_or_init(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::load_or_init(&path).unwrap(), config);

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"FetchIntervalSeconds\": 600"));
    }
}
