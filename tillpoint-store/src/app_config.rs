use rust_decimal::Decimal;
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EngineConfig {
    /// Percent, applied to items without their own rate
    #[serde(default)]
    pub default_tax_rate: Decimal,
    /// Ledger key for selections that have no order item yet
    #[serde(default = "default_preview_key")]
    pub preview_key: String,
}

fn default_preview_key() -> String {
    "new".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_tax_rate: Decimal::ZERO,
            preview_key: default_preview_key(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    "tillpoint=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_filter() }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    /// JSON file with the item records to serve
    pub path: Option<PathBuf>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Defaults are compiled in, so even the base file is optional
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `TILLPOINT__ENGINE__DEFAULT_TAX_RATE=8.25`
            .add_source(config::Environment::with_prefix("TILLPOINT").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
