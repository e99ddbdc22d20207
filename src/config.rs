use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub google: GoogleConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding addresses.json, history.json and pinned.json
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl StorageConfig {
    pub fn addresses_path(&self) -> PathBuf {
        self.data_dir.join("addresses.json")
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join("history.json")
    }

    pub fn pinned_path(&self) -> PathBuf {
        self.data_dir.join("pinned.json")
    }
}

/// Shared secret gating address registration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub shared_secret: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GoogleConfig {
    #[serde(default = "default_routes_base_url")]
    pub routes_base_url: String,
    #[serde(default = "default_geocode_base_url")]
    pub geocode_base_url: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            routes_base_url: default_routes_base_url(),
            geocode_base_url: default_geocode_base_url(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PricingConfig {
    /// Factor applied to the provider's base toll estimate (6-axle loaded truck)
    #[serde(default = "default_axle_multiplier")]
    pub axle_multiplier: u32,
    #[serde(default = "default_rate_per_km")]
    pub default_rate_per_km: f64,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            axle_multiplier: default_axle_multiplier(),
            default_rate_per_km: default_rate_per_km(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "text" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_routes_base_url() -> String {
    "https://routes.googleapis.com".to_string()
}

fn default_geocode_base_url() -> String {
    "https://maps.googleapis.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_axle_multiplier() -> u32 {
    6
}

fn default_rate_per_km() -> f64 {
    12.0
}

fn default_currency_symbol() -> String {
    "R$".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Load configuration from `path` (optional) overlaid with `VECTURA__*` environment variables.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("VECTURA").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.google.timeout_seconds == 0 {
        anyhow::bail!("google.timeout_seconds must be greater than zero");
    }

    if cfg.pricing.axle_multiplier == 0 {
        anyhow::bail!("pricing.axle_multiplier must be greater than zero");
    }

    if !(cfg.pricing.default_rate_per_km.is_finite() && cfg.pricing.default_rate_per_km > 0.0) {
        anyhow::bail!("pricing.default_rate_per_km must be a positive number");
    }

    match cfg.logging.format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid logging.format: {}", other),
    }

    if cfg.storage.data_dir.as_os_str().is_empty() {
        anyhow::bail!("storage.data_dir cannot be empty");
    }

    Ok(())
}
