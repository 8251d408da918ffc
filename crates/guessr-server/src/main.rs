#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]

use guessr_server::infra::metrics;
use guessr_server::{bootstrap, cli, runtime, settings};

#[tokio::main]
async fn main() {
    let command = cli::parse_args();
    let settings = settings::Settings::from_env();
    runtime::init_tracing(&settings.config.logging);
    settings.log_issues();
    if let Err(problems) = settings::preflight(&settings) {
        tracing::error!(
            event = "preflight_failed",
            problems = ?problems,
            "Configuration is invalid"
        );
        std::process::exit(1);
    }
    bootstrap::log_startup(&settings);
    metrics::init_registry(settings.config.metrics.enabled);

    let pool = match bootstrap::connect_db(&settings).await {
        Ok(pool) => pool,
        Err(err) => {
            tracing::error!(event = "db_connect_failed", error = %err);
            std::process::exit(1);
        }
    };
    let state = bootstrap::build_state(&settings, pool);

    let result = cli::run(&state, command).await;
    bootstrap::flush_metrics(&settings.config.metrics);
    state.store.pool().close().await;

    match result {
        Ok(output) => {
            print!("{}", output.stdout);
            std::process::exit(output.exit_code);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
