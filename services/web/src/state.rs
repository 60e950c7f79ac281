use chrono::{DateTime, Utc};
use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::infra::db::DbAccountRepository;
use crate::infra::google::GoogleOauthClient;
use crate::infra::mail::SmtpMailer;
use crate::infra::session::RedisSessionStore;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub mailer: SmtpMailer,
    pub google: GoogleOauthClient,
    pub cookie_domain: String,
    /// Process start time. Sessions created before it are dead on arrival.
    pub epoch: DateTime<Utc>,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_store(&self) -> RedisSessionStore {
        RedisSessionStore {
            pool: self.redis.clone(),
        }
    }
}
