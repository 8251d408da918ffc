mod support;

use guessr_core::StoreError;
use guessr_server::domains::errors::ServiceError;

#[tokio::test]
async fn migrate_is_idempotent() {
    let state = support::setup_state().await;
    let output = support::run_ok(&state, &["migrate"]).await;
    assert_eq!(output.stdout, "migrations applied\n");
}

#[tokio::test]
async fn banned_word_admin_round() {
    let state = support::setup_state().await;
    let added = support::run_ok(&state, &["banned-words", "add", " Troll ", "jerk"]).await;
    assert_eq!(added.stdout, "added troll\nadded jerk\n");

    let again = support::run_ok(&state, &["banned-words", "add", "TROLL"]).await;
    assert_eq!(again.stdout, "exists troll\n");

    let listed = support::run_ok(&state, &["banned-words", "list"]).await;
    assert_eq!(listed.stdout, "troll\njerk\n");

    let removed = support::run_ok(&state, &["banned-words", "remove", "Jerk"]).await;
    assert_eq!(removed.exit_code, 0);
    let missing = support::run_ok(&state, &["banned-words", "remove", "jerk"]).await;
    assert_eq!(missing.exit_code, 1);

    let listed = support::run_ok(&state, &["banned-words", "list"]).await;
    assert_eq!(listed.stdout, "troll\n");
}

#[tokio::test]
async fn blank_banned_word_is_refused() {
    let state = support::setup_state().await;
    let err = support::run_cli(&state, &["banned-words", "add", "  "])
        .await
        .expect_err("blank word");
    assert!(matches!(err, ServiceError::BadRequest(_)));
}

#[tokio::test]
async fn settings_get_and_set() {
    let state = support::setup_state().await;
    let missing = support::run_ok(&state, &["setting", "get", "motd", "--default", "hi"]).await;
    assert_eq!(missing.stdout, "hi\n");

    support::run_ok(&state, &["setting", "set", "motd", "hello"]).await;
    support::run_ok(&state, &["setting", "set", "motd", "welcome"]).await;
    let stored = support::run_ok(&state, &["setting", "get", "motd"]).await;
    assert_eq!(stored.stdout, "welcome\n");
}

#[tokio::test]
async fn store_errors_surface_from_admin_commands() {
    let state = support::setup_state().await;
    state.store.pool().close().await;
    let err = support::run_cli(&state, &["banned-words", "list"])
        .await
        .expect_err("closed pool");
    assert!(matches!(
        err,
        ServiceError::DbError(StoreError::Unavailable(_))
    ));
}

#[test]
fn conflicting_total_sources_are_rejected() {
    let argv = ["guessr-server", "avatars", "--user-id", "1", "--total", "3"];
    assert!(guessr_server::cli::try_parse_from(argv).is_err());
    let argv = ["guessr-server", "avatars"];
    assert!(guessr_server::cli::try_parse_from(argv).is_err());
}

#[tokio::test]
async fn temp_database_is_removed_on_drop() {
    let state = support::setup_state().await;
    let db_path = state.db_path().clone();
    assert!(db_path.exists());
    drop(state);
    assert!(!db_path.exists());
}
