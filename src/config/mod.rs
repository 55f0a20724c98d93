//! # Configuration Management Module
//!
//! TOML configuration for the whole application, with validation, defaults,
//! and a generator for a starter file. The bot and web bindings themselves
//! live outside this crate, but their tuning (command prefix, bind address,
//! cookie name) is configured here so the external collaborators and the
//! data layer read one file.
//!
//! ```toml
//! [app]
//! name = "Pawpad"
//! greeting = "Welcome to Pawpad! Earn points, buy a pet, keep it happy."
//!
//! [storage]
//! data_file = "data/data.json"
//! assets_dir = "static"
//! seeds_dir = "data/seeds"
//!
//! [bot]
//! command_prefix = "/"
//!
//! [web]
//! bind = "127.0.0.1:8000"
//! cookie_name = "user_id"
//!
//! [logging]
//! level = "info"
//! ```

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

/// Command prefixes the chat parser tolerates; anything else is rejected at
/// load time rather than silently ignored at runtime.
const ALLOWED_PREFIXES: [&str; 4] = ["/", "!", "^", "$"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub name: String,
    /// First line of the START reply.
    pub greeting: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the single JSON document everything is stored in.
    pub data_file: String,
    /// Directory the catalog `animation` paths resolve against.
    pub assets_dir: String,
    /// Directory holding `catalog.json` seed data.
    pub seeds_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Prefix stripped from public-channel commands. Must be one of a
    /// hard-coded allowed set.
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            command_prefix: default_command_prefix(),
        }
    }
}

fn default_command_prefix() -> String {
    "/".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebConfig {
    /// Address the companion web page binding listens on.
    pub bind: String,
    /// Cookie carrying the user id.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8000".to_string(),
            cookie_name: default_cookie_name(),
        }
    }
}

fn default_cookie_name() -> String {
    "user_id".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// error | warn | info | debug | trace
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Optional log file; stderr when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub bot: BotConfig,
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app: AppConfig {
                name: "Pawpad".to_string(),
                greeting: "Welcome to Pawpad! Earn points, buy a pet, keep it happy.".to_string(),
            },
            storage: StorageConfig {
                data_file: "data/data.json".to_string(),
                assets_dir: "static".to_string(),
                seeds_dir: "data/seeds".to_string(),
            },
            bot: BotConfig::default(),
            web: WebConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;
        let config: Config =
            toml::from_str(&content).map_err(|e| anyhow!("Failed to parse {}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    /// Write a starter configuration file. Refuses to clobber an existing one.
    pub async fn create_default(path: &str) -> Result<()> {
        if fs::try_exists(path).await? {
            return Err(anyhow!("Config file {} already exists", path));
        }
        let config = Config::default();
        let content = toml::to_string_pretty(&config)?;
        fs::write(path, content).await?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.app.name.trim().is_empty() {
            return Err(anyhow!("app.name must not be empty"));
        }
        if self.storage.data_file.trim().is_empty() {
            return Err(anyhow!("storage.data_file must not be empty"));
        }
        if !ALLOWED_PREFIXES.contains(&self.bot.command_prefix.as_str()) {
            return Err(anyhow!(
                "bot.command_prefix must be one of {:?}",
                ALLOWED_PREFIXES
            ));
        }
        match self.logging.level.as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => {}
            other => return Err(anyhow!("logging.level '{}' is not a log level", other)),
        }
        Ok(())
    }
}
