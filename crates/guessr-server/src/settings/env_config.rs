use std::env;
use std::fs;
use std::path::Path;

use guessr_core::parse_flag;

use super::ConfigIssue;
use crate::config::{LogFormat, ServerConfig};

pub(super) fn load_config(path: &str, issues: &mut Vec<ConfigIssue>) -> ServerConfig {
    if !Path::new(path).exists() {
        return ServerConfig::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) => {
            issues.push(ConfigIssue::new("config_read_failed", path, err));
            return ServerConfig::default();
        }
    };
    match serde_yaml::from_str(&contents) {
        Ok(config) => config,
        Err(err) => {
            issues.push(ConfigIssue::new("config_parse_failed", path, err));
            ServerConfig::default()
        }
    }
}

fn invalid(field: &str, value: &str) -> ConfigIssue {
    ConfigIssue::new("config_invalid", field, format!("invalid value {value:?}"))
}

pub(super) fn apply_database_env_overrides(
    config: &mut ServerConfig,
    issues: &mut Vec<ConfigIssue>,
) {
    if let Ok(value) = env::var("GUESSR_DB_URL") {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            issues.push(invalid("GUESSR_DB_URL", &value));
        } else {
            config.database.url = trimmed.to_string();
        }
    }
    if let Ok(value) = env::var("GUESSR_DB_POOL_MAX") {
        match value.trim().parse::<u32>() {
            Ok(pool_max) if pool_max > 0 => config.database.pool_max = pool_max,
            _ => issues.push(invalid("GUESSR_DB_POOL_MAX", &value)),
        }
    }
}

pub(super) fn apply_logging_env_overrides(
    config: &mut ServerConfig,
    issues: &mut Vec<ConfigIssue>,
) {
    if let Ok(value) = env::var("GUESSR_LOG_FORMAT") {
        match parse_log_format(&value) {
            Some(format) => config.logging.format = format,
            None => issues.push(invalid("GUESSR_LOG_FORMAT", &value)),
        }
    }
}

pub(super) fn apply_metrics_env_overrides(
    config: &mut ServerConfig,
    issues: &mut Vec<ConfigIssue>,
) {
    if let Ok(value) = env::var("GUESSR_METRICS_ENABLED") {
        match parse_flag(&value) {
            Some(enabled) => config.metrics.enabled = enabled,
            None => issues.push(invalid("GUESSR_METRICS_ENABLED", &value)),
        }
    }
    if let Ok(value) = env::var("GUESSR_METRICS_TEXTFILE") {
        let trimmed = value.trim();
        config.metrics.textfile = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }
}

fn parse_log_format(value: &str) -> Option<LogFormat> {
    match value.trim().to_ascii_lowercase().as_str() {
        "pretty" | "text" => Some(LogFormat::Pretty),
        "json" => Some(LogFormat::Json),
        _ => None,
    }
}
