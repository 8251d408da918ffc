use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerRuntimeConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

pub const DEFAULT_DB_URL: &str = "sqlite://guessr.sqlite";
pub const DEFAULT_DB_POOL_MAX: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ServerRuntimeConfig {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_url")]
    pub url: String,
    #[serde(default = "default_db_pool_max")]
    pub pool_max: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_db_url(),
            pool_max: default_db_pool_max(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default)]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MetricsConfig {
    #[serde(default)]
    pub enabled: bool,
    /// Prometheus text file written after each command, for the
    /// node-exporter textfile collector.
    #[serde(default)]
    pub textfile: Option<String>,
}

fn default_db_url() -> String {
    DEFAULT_DB_URL.to_string()
}

const fn default_db_pool_max() -> u32 {
    DEFAULT_DB_POOL_MAX
}
