use std::sync::Arc;

use guessr_db::DbStore;

use crate::config::ServerConfig;
use crate::domains::donations::DonationTierResolver;
use crate::domains::usernames::UsernameValidator;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DbStore>,
    pub config: ServerConfig,
    pub donations: DonationTierResolver,
    pub usernames: UsernameValidator,
}

impl AppState {
    /// Wires both services to the same store.
    pub fn new(store: DbStore, config: ServerConfig) -> Self {
        let store = Arc::new(store);
        Self {
            donations: DonationTierResolver::new(store.clone()),
            usernames: UsernameValidator::new(store.clone(), store.clone()),
            store,
            config,
        }
    }
}
