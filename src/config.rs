//! Client configuration.
//!
//! Stored as YAML in `~/.clusterview/config.yaml`; a missing file means
//! defaults. Command line flags override whatever the file says.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::chart::{ChartBuilder, Palette};
use crate::controller::DEFAULT_K;
use crate::fetcher::{ApiClient, DEFAULT_API_URL};

/// Default base configuration directory name.
pub const DEFAULT_BASE_DIR: &str = ".clusterview";
/// Default configuration filename.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";
/// Default page written by the HTML chart area.
pub const DEFAULT_OUTPUT: &str = "charts.html";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the aggregation API.
    pub api_base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// k used when the k input does not parse.
    pub default_k: u32,
    /// Where the chart page is written.
    pub output: PathBuf,
    /// Cluster colors; the built-in palette when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palette: Option<Palette>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 30,
            default_k: DEFAULT_K,
            output: PathBuf::from(DEFAULT_OUTPUT),
            palette: None,
        }
    }
}

impl Config {
    /// Gets the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(DEFAULT_BASE_DIR).join(DEFAULT_CONFIG_FILE))
    }

    /// Loads from `custom_path`, or the default path when none is given.
    pub fn load(custom_path: Option<&Path>) -> Result<Self> {
        let path = match custom_path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        if !path.exists() {
            if custom_path.is_some() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Invalid config at {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn api_client(&self) -> Result<ApiClient> {
        ApiClient::with_timeout(&self.api_base_url, self.timeout())
            .context("Failed to build HTTP client")
    }

    pub fn chart_builder(&self) -> ChartBuilder {
        ChartBuilder::new(self.palette.clone().unwrap_or_default())
    }
}
