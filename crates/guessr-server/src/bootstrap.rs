use guessr_db::{DbStore, StorePool};

use crate::app::AppState;
use crate::config::MetricsConfig;
use crate::infra::metrics;
use crate::settings;

pub fn log_startup(settings: &settings::Settings) {
    let backend = guessr_db::Backend::from_url(&settings.db_url).map(guessr_db::Backend::as_str);
    tracing::info!(
        event = "startup",
        config_path = %settings.config_path,
        db_backend = ?backend,
        db_pool_max = settings.db_pool_max,
        log_format = ?settings.config.logging.format,
        metrics_enabled = settings.config.metrics.enabled,
        server_name = ?settings.config.server.name,
        "Configuration loaded"
    );
}

pub async fn connect_db(settings: &settings::Settings) -> Result<StorePool, sqlx_core::Error> {
    let pool = StorePool::connect(&settings.db_url, settings.db_pool_max).await?;
    tracing::info!(
        event = "db_connected",
        db_backend = pool.backend().as_str(),
        db_pool_max = settings.db_pool_max
    );
    Ok(pool)
}

pub fn build_state(settings: &settings::Settings, pool: StorePool) -> AppState {
    AppState::new(DbStore::new(pool), settings.config.clone())
}

pub fn flush_metrics(config: &MetricsConfig) {
    if !config.enabled {
        return;
    }
    let Some(path) = config.textfile.as_deref() else {
        return;
    };
    if let Err(err) = metrics::write_textfile(path) {
        tracing::warn!(event = "metrics_textfile_failed", path, error = %err);
    }
}
