use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fs, path::PathBuf};

use crate::provider::ProviderId;

pub const DEFAULT_BASE_URL: &str = "http://datapoint.metoffice.gov.uk/public/data";
/// Ewell, Surrey.
pub const DEFAULT_LOCATION_ID: &str = "351409";
/// London & South East England.
pub const DEFAULT_REGION_ID: &str = "514";

pub const ENV_API_KEY: &str = "DATAPOINT_API_KEY";
pub const ENV_BASE_URL: &str = "DATAPOINT_BASE_URL";
pub const ENV_LOCATION_ID: &str = "DATAPOINT_LOCATION_ID";
pub const ENV_REGION_ID: &str = "DATAPOINT_REGION_ID";

/// Configuration for a single provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub api_key: String,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Site used for the local forecast.
    #[serde(default = "default_location_id")]
    pub location_id: String,

    /// Region used for the text forecast.
    #[serde(default = "default_region_id")]
    pub region_id: String,
}

impl ProviderConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            location_id: default_location_id(),
            region_id: default_region_id(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_location_id() -> String {
    DEFAULT_LOCATION_ID.to_string()
}

fn default_region_id() -> String {
    DEFAULT_REGION_ID.to_string()
}

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Optional default provider id, e.g. "datapoint".
    pub default_provider: Option<String>,

    /// Example TOML:
    /// [providers.datapoint]
    /// api_key = "..."
    /// region_id = "514"
    #[serde(default)]
    pub providers: BTreeMap<String, ProviderConfig>,
}

impl Config {
    /// Return the default provider as a strongly-typed ProviderId.
    pub fn default_provider_id(&self) -> Result<ProviderId> {
        let s = self.default_provider.as_ref().ok_or_else(|| {
            anyhow!(
                "No default provider configured.\n\
                 Hint: run `forecast configure <provider>` (e.g. `forecast configure datapoint`) first."
            )
        })?;

        ProviderId::try_from(s.as_str())
    }

    pub fn provider_config(&self, id: ProviderId) -> Option<&ProviderConfig> {
        self.providers.get(id.as_str())
    }

    /// Store default provider as string.
    pub fn set_default_provider(&mut self, id: ProviderId) {
        self.default_provider = Some(id.as_str().to_string());
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Load config from disk and apply `DATAPOINT_*` environment overrides.
    pub fn load_with_env() -> Result<Self> {
        let mut cfg = Self::load()?;
        cfg.apply_env_overrides(|name| std::env::var(name).ok());
        Ok(cfg)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: Config = toml::from_str(contents)?;
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "datapoint-forecast", "forecast-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Override DataPoint settings from the environment.
    ///
    /// `lookup` is `std::env::var` in production. An API key from the
    /// environment is enough to create the provider entry when the file has none.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let id = ProviderId::Datapoint;
        let lookup = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(api_key) = lookup(ENV_API_KEY) {
            self.upsert_provider_api_key(id, api_key);
        }

        let Some(cfg) = self.providers.get_mut(id.as_str()) else {
            return;
        };

        if let Some(base_url) = lookup(ENV_BASE_URL) {
            cfg.base_url = base_url;
        }
        if let Some(location_id) = lookup(ENV_LOCATION_ID) {
            cfg.location_id = location_id;
        }
        if let Some(region_id) = lookup(ENV_REGION_ID) {
            cfg.region_id = region_id;
        }
    }

    /// Set/replace a provider's API key, keeping its other settings,
    /// and make it the default provider if none is set yet.
    pub fn upsert_provider_api_key(&mut self, provider_id: ProviderId, api_key: String) {
        self.providers
            .entry(provider_id.as_str().to_string())
            .and_modify(|cfg| cfg.api_key = api_key.clone())
            .or_insert_with(|| ProviderConfig::new(api_key));

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Replace a provider's whole configuration.
    pub fn upsert_provider(&mut self, provider_id: ProviderId, cfg: ProviderConfig) {
        self.providers.insert(provider_id.as_str().to_string(), cfg);

        if self.default_provider.is_none() {
            self.default_provider = Some(provider_id.to_string());
        }
    }

    /// Returns API key for a provider, if present.
    pub fn provider_api_key(&self, provider_id: ProviderId) -> Option<&str> {
        self.providers
            .get(provider_id.as_str())
            .map(|cfg| cfg.api_key.as_str())
            .filter(|key| !key.is_empty())
    }

    pub fn is_provider_configured(&self, provider_id: ProviderId) -> bool {
        self.provider_api_key(provider_id).is_some()
    }
}
