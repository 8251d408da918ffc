#![allow(dead_code)]

use std::ops::Deref;
use std::path::PathBuf;

use guessr_db::{DbStore, StorePool};
use guessr_server::app::AppState;
use guessr_server::cli::{self, CommandOutput};
use guessr_server::config::ServerConfig;
use guessr_server::domains::errors::ServiceError;
use uuid::Uuid;

/// App state over a migrated temp-file SQLite database. The database
/// files are deleted on drop.
pub struct TestApp {
    state: AppState,
    db_path: PathBuf,
}

impl TestApp {
    pub fn db_path(&self) -> &PathBuf {
        &self.db_path
    }
}

impl Deref for TestApp {
    type Target = AppState;

    fn deref(&self) -> &AppState {
        &self.state
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut path = self.db_path.clone().into_os_string();
            path.push(suffix);
            let _ = std::fs::remove_file(path);
        }
    }
}

pub async fn setup_state() -> TestApp {
    let db_path = std::env::temp_dir().join(format!(
        "guessr-server-{}.sqlite",
        Uuid::now_v7().simple()
    ));
    let db_url = format!("sqlite://{}", db_path.display());
    let pool = StorePool::connect(&db_url, 1).await.expect("sqlite");
    pool.migrate().await.expect("migrate");
    TestApp {
        state: AppState::new(DbStore::new(pool), ServerConfig::default()),
        db_path,
    }
}

/// Runs one CLI invocation, argv without the program name.
pub async fn run_cli(state: &AppState, args: &[&str]) -> Result<CommandOutput, ServiceError> {
    let argv = std::iter::once("guessr-server").chain(args.iter().copied());
    let command = cli::try_parse_from(argv).expect("parse args");
    cli::run(state, command).await
}

pub async fn run_ok(state: &AppState, args: &[&str]) -> CommandOutput {
    run_cli(state, args).await.expect("command succeeds")
}
