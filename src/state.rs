use chrono::Duration;
use sqlx::SqlitePool;

use crate::{
    auth::JwtKeys,
    config::Config,
    services::{AuthService, TaskService},
    store::{TaskStore, UserStore},
};

/// Everything the HTTP layer needs, built once at startup and cloned into
/// each worker.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub tasks: TaskService,
    pub keys: JwtKeys,
}

impl AppState {
    pub fn new(pool: SqlitePool, keys: JwtKeys) -> Self {
        Self {
            auth: AuthService::new(UserStore::new(pool.clone()), keys.clone()),
            tasks: TaskService::new(TaskStore::new(pool)),
            keys,
        }
    }

    pub fn from_config(pool: SqlitePool, config: &Config) -> Self {
        let keys = JwtKeys::new(&config.jwt_secret, Duration::days(config.token_ttl_days));
        Self::new(pool, keys)
    }
}
