use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Remote photo listing to fetch from.
    pub source: SourceOptions,
    /// Where the preference slots live on disk.
    pub storage: StorageOptions,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            !self.source.endpoint.is_empty(),
            "source.endpoint must not be empty"
        );
        ensure!(self.source.limit > 0, "source.limit must be greater than zero");
        ensure!(
            self.source.request_timeout > Duration::ZERO,
            "source.request-timeout must be positive"
        );
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            source: SourceOptions::default(),
            storage: StorageOptions::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SourceOptions {
    /// Listing endpoint; must answer with a JSON array of photo records.
    pub endpoint: String,
    /// Page requested from the listing.
    pub page: u32,
    /// Number of records requested per fetch.
    pub limit: u32,
    /// Per-request timeout.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl SourceOptions {
    fn default_endpoint() -> String {
        "https://picsum.photos/v2/list".to_owned()
    }

    const fn default_page() -> u32 {
        2
    }

    const fn default_limit() -> u32 {
        40
    }

    const fn default_request_timeout() -> Duration {
        Duration::from_secs(10)
    }
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            endpoint: Self::default_endpoint(),
            page: Self::default_page(),
            limit: Self::default_limit(),
            request_timeout: Self::default_request_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct StorageOptions {
    /// Directory holding one file per preference slot.
    pub path: PathBuf,
}

impl Default for StorageOptions {
    fn default() -> Self {
        Self {
            path: PathBuf::from("gallery-settings"),
        }
    }
}
