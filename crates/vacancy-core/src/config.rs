//! Configuration types for vacancy-search.
//!
//! [`Config::load`] layers, lowest priority first: the embedded defaults, an
//! optional TOML file, and `VACANCY__<SECTION>__<KEY>` environment variables.
//! [`Config::defaults`] returns the embedded defaults without touching the
//! filesystem or environment (useful in tests).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[server]
bind      = "0.0.0.0:8080"
page_size = 10

[synonyms]
path = "config/synonyms.json"

[store]
backend          = "clickhouse"
url              = "http://localhost:8123"
database         = "default"
user             = "default"
password         = ""
table            = "vacancies"
query_timeout_ms = 2000
provision_schema = false
fixtures         = ""
"#;

/// Config file read when no explicit path is given. Missing is fine.
pub const DEFAULT_CONFIG_PATH: &str = "config/vacancy-search.toml";

const ENV_PREFIX: &str = "VACANCY";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub synonyms: SynonymsConfig,
    pub store: StoreConfig,
}

/// `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind: String,
    /// Postings per result page.
    pub page_size: u64,
}

/// `[synonyms]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct SynonymsConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    ClickHouse,
    Memory,
}

/// `[store]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub url: String,
    pub database: String,
    pub user: String,
    pub password: String,
    pub table: String,
    pub query_timeout_ms: u64,
    /// Create the postings table on startup if it does not exist.
    pub provision_schema: bool,
    /// JSON array of postings preloaded into the memory backend.
    pub fixtures: String,
}

impl StoreConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_millis(self.query_timeout_ms)
    }

    pub fn fixtures_path(&self) -> Option<&Path> {
        (!self.fixtures.trim().is_empty()).then(|| Path::new(self.fixtures.as_str()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. An explicit `path` must exist; the
    /// default path is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => config::File::from(path).required(true),
            None => config::File::from(Path::new(DEFAULT_CONFIG_PATH)).required(false),
        };

        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(self.server.page_size >= 1, "server.page_size must be at least 1");
        anyhow::ensure!(
            self.store.query_timeout_ms >= 1,
            "store.query_timeout_ms must be at least 1"
        );
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
