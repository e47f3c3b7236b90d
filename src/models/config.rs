//! Runtime configuration shared by the tracker job and the dashboard.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// HTTP settings for fetching product pages.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

/// Telegram bot endpoint and credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Base URL of the Bot API, without trailing slash.
    pub api_base: String,
    pub timeout_secs: u64,
    /// Taken from `TELEGRAM_BOT_TOKEN`.
    pub bot_token: Option<String>,
    /// Taken from `TELEGRAM_CHAT_ID`.
    pub chat_id: Option<String>,
}

/// Where the dashboard listens and finds its templates.
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub address: String,
    pub port: u16,
    pub templates_dir: String,
}

/// Configuration options for the price tracker.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Path of the SQLite database file.
    pub database_url: String,
    /// CSV watchlist with `product_name,url,target_price` columns.
    pub products_file: String,
    /// When set, the tracker repeats the job with this pause in between.
    pub poll_interval_secs: Option<u64>,
    pub fetch: FetchConfig,
    pub telegram: TelegramConfig,
    pub dashboard: DashboardConfig,
}

impl AppConfig {
    /// Load configuration from `config/default.yaml`, `config/{APP_ENV}.yaml`
    /// and `APP__*` environment variables, in increasing priority.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("telegram.bot_token", std::env::var("TELEGRAM_BOT_TOKEN").ok())?
            .set_override_option("telegram.chat_id", std::env::var("TELEGRAM_CHAT_ID").ok())?
            .build()?
            .try_deserialize()
    }

    /// Builder pre-populated with defaults for every required key.
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("database_url", "prices.db")?
            .set_default("products_file", "products.csv")?
            .set_default("fetch.timeout_secs", 15)?
            .set_default("fetch.user_agent", DEFAULT_USER_AGENT)?
            .set_default("telegram.api_base", "https://api.telegram.org")?
            .set_default("telegram.timeout_secs", 10)?
            .set_default("dashboard.address", "127.0.0.1")?
            .set_default("dashboard.port", 8080)?
            .set_default("dashboard.templates_dir", "templates/**/*")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn defaults_are_complete() {
        let config: AppConfig = AppConfig::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database_url, "prices.db");
        assert_eq!(config.products_file, "products.csv");
        assert_eq!(config.poll_interval_secs, None);
        assert_eq!(config.fetch.timeout_secs, 15);
        assert_eq!(config.telegram.api_base, "https://api.telegram.org");
        assert!(config.telegram.bot_token.is_none());
        assert_eq!(config.dashboard.port, 8080);
    }

    #[test]
    fn yaml_overrides_defaults() {
        let yaml = "database_url: /var/lib/pricewatch/prices.db\n\
                    poll_interval_secs: 600\n\
                    telegram:\n  chat_id: \"2096012658\"\n";
        let config: AppConfig = AppConfig::builder()
            .unwrap()
            .add_source(File::from_str(yaml, FileFormat::Yaml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.database_url, "/var/lib/pricewatch/prices.db");
        assert_eq!(config.poll_interval_secs, Some(600));
        assert_eq!(config.telegram.chat_id.as_deref(), Some("2096012658"));
        assert_eq!(config.telegram.timeout_secs, 10);
    }
}
