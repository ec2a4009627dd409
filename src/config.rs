use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for docsign
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct DocsignConfig {
    /// Blob storage settings
    pub storage: StorageConfig,
    /// Document lifecycle behaviour
    pub lifecycle: LifecycleConfig,
    /// File-backed document store
    pub store: StoreConfig,
    /// Logging settings
    pub observability: ObservabilityConfig,
    /// Database settings (optional, requires the `database` feature)
    pub database: Option<DatabaseConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory uploaded blobs are written to
    pub root: PathBuf,
    /// Write to a temporary file and rename it into place
    pub atomic_writes: bool,
    /// Skip the write when a blob with the same digest already exists
    pub deduplicate: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("storage"),
            atomic_writes: true,
            deduplicate: false,
        }
    }
}

/// When signers are notified relative to persisting them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyOrder {
    /// Notify with the in-memory document, then save; a notifier failure aborts
    #[default]
    NotifyFirst,
    /// Save first; a notifier failure is logged and reported, not fatal
    PersistFirst,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LifecycleConfig {
    /// Days between creation and expiration
    pub expiration_days: u32,
    /// Reject status changes that are not in the transition table
    pub enforce_transitions: bool,
    pub notify_order: NotifyOrder,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            expiration_days: 20,
            enforce_transitions: false,
            notify_order: NotifyOrder::NotifyFirst,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON file holding every document record
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".docsign/documents.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level
    pub log_level: String,
    /// Emit JSON structured logs instead of human-readable lines
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database URL (SQLite file path or connection string)
    pub url: String,
    /// Maximum connections in pool
    pub max_connections: u32,
    /// Enable automatic migrations
    pub auto_migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://.docsign/docsign.db".to_string(),
            max_connections: 10,
            auto_migrate: true,
        }
    }
}

impl DocsignConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration files (docsign.toml, .docsign-rc)
    /// 3. Environment variables (prefixed with DOCSIGN_, `__` between sections)
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Same as [`DocsignConfig::load`] with config files looked up in `dir`
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut builder = Config::builder();

        let main_file = dir.join("docsign.toml");
        if main_file.exists() {
            builder = builder.add_source(File::from(main_file));
        }

        let rc_file = dir.join(".docsign-rc");
        if rc_file.exists() {
            builder = builder
                .add_source(File::from(rc_file).format(config::FileFormat::Toml));
        }

        builder = builder.add_source(
            Environment::with_prefix("DOCSIGN")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        let docsign_config: DocsignConfig = config.try_deserialize()?;
        Ok(docsign_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}
