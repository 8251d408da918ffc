use std::env;

use crate::config::ServerConfig;

mod env_config;

/// A config problem found while loading settings. Held until the subscriber
/// is installed, then emitted by [`Settings::log_issues`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub event: &'static str,
    pub subject: String,
    pub detail: String,
}

impl ConfigIssue {
    fn new(event: &'static str, subject: &str, detail: impl ToString) -> Self {
        Self {
            event,
            subject: subject.to_string(),
            detail: detail.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: String,
    pub db_url: String,
    pub db_pool_max: u32,
    pub config: ServerConfig,
    pub issues: Vec<ConfigIssue>,
}

impl Settings {
    /// Loads the YAML config file, then applies `GUESSR_*` environment
    /// overrides on top of it.
    #[must_use]
    pub fn from_env() -> Self {
        let config_path =
            env::var("GUESSR_CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());
        let mut issues = Vec::new();
        let mut config = env_config::load_config(&config_path, &mut issues);
        env_config::apply_database_env_overrides(&mut config, &mut issues);
        env_config::apply_logging_env_overrides(&mut config, &mut issues);
        env_config::apply_metrics_env_overrides(&mut config, &mut issues);

        Self {
            config_path,
            db_url: config.database.url.clone(),
            db_pool_max: config.database.pool_max,
            config,
            issues,
        }
    }

    pub fn log_issues(&self) {
        for issue in &self.issues {
            tracing::warn!(
                event = issue.event,
                subject = %issue.subject,
                detail = %issue.detail,
                "Configuration problem"
            );
        }
    }
}

pub fn preflight(settings: &Settings) -> Result<(), Vec<String>> {
    let mut problems = Vec::new();
    if guessr_db::Backend::from_url(&settings.db_url).is_none() {
        problems.push(
            "GUESSR_DB_URL (or database.url) must start with postgres://, postgresql:// or sqlite:"
                .to_string(),
        );
    }
    if settings.db_pool_max == 0 {
        problems.push("GUESSR_DB_POOL_MAX must be at least 1".to_string());
    }
    if settings.config.metrics.enabled && settings.config.metrics.textfile.is_none() {
        problems.push(
            "metrics.enabled requires metrics.textfile (or GUESSR_METRICS_TEXTFILE)".to_string(),
        );
    }
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems)
    }
}
