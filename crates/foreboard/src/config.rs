use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "foreboard.toml";
pub const DEFAULT_DATA_FILE: &str = "./data/golf_scores.xlsx";
pub const DEFAULT_CACHE_TTL_SECS: u64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Workbook read when no file is supplied on the command line.
    pub data_file: PathBuf,
    pub cache_ttl_secs: u64,
    /// Date window used when no date flags are given, e.g. `"Last 20 rounds"` or `"all"`.
    pub default_window: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            default_window: "Last 20 rounds".to_string(),
            log_format: LogFormat::Json,
        }
    }
}

impl AppConfig {
    /// `.env`, then the TOML file (`FOREBOARD_CONFIG` or `./foreboard.toml`), then
    /// `FOREBOARD_*` variables.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = env::var("FOREBOARD_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        let mut config = if path.exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        config.apply_overrides(|key| env::var(key).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("FOREBOARD_DATA_FILE") {
            self.data_file = PathBuf::from(path);
        }
        if let Some(ttl) = lookup("FOREBOARD_CACHE_TTL_SECS") {
            self.cache_ttl_secs = ttl
                .trim()
                .parse()
                .with_context(|| format!("invalid FOREBOARD_CACHE_TTL_SECS {ttl:?}"))?;
        }
        Ok(())
    }
}
