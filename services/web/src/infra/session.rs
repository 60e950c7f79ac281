use anyhow::Context as _;
use chrono::{DateTime, Utc};
use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;
use uuid::Uuid;

use crate::domain::repository::SessionStore;
use crate::domain::types::{SESSION_TTL_SECS, SessionData};
use crate::error::WebServiceError;
use crate::infra::store_call;

#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
}

fn session_key(sid: Uuid) -> String {
    format!("sess:{sid}")
}

impl SessionStore for RedisSessionStore {
    async fn load(&self, sid: Uuid) -> Result<Option<SessionData>, WebServiceError> {
        let key = session_key(sid);
        let pool = self.pool.clone();
        let value: Option<String> = store_call("load session", async move {
            let mut conn = pool.get().await.context("get redis connection")?;
            let value: Option<String> = conn.get(&key).await.context("get session")?;
            Ok::<_, anyhow::Error>(value)
        })
        .await?;
        // Undecodable payloads read as absent: the shape may have drifted
        // across deployments and a stale record must not lock anyone out.
        Ok(value.and_then(|v| serde_json::from_str(&v).ok()))
    }

    async fn save(&self, sid: Uuid, data: &SessionData) -> Result<(), WebServiceError> {
        let key = session_key(sid);
        let payload = serde_json::to_string(data).context("serialize session")?;
        let pool = self.pool.clone();
        store_call("save session", async move {
            let mut conn = pool.get().await.context("get redis connection")?;
            let (): () = conn
                .set_ex(&key, payload, SESSION_TTL_SECS as u64)
                .await
                .context("set session")?;
            Ok::<_, anyhow::Error>(())
        })
        .await
    }

    async fn destroy(&self, sid: Uuid) -> Result<(), WebServiceError> {
        let key = session_key(sid);
        let pool = self.pool.clone();
        store_call("destroy session", async move {
            let mut conn = pool.get().await.context("get redis connection")?;
            let (): () = conn.del(&key).await.context("del session")?;
            Ok::<_, anyhow::Error>(())
        })
        .await
    }
}

/// A session opened for the current request.
pub struct SessionCtx {
    pub sid: Uuid,
    pub data: SessionData,
    /// True when no stored record backed this session yet (the caller must
    /// save and set the cookie for the session to persist).
    pub is_new: bool,
}

/// Resolve the request's session: load by cookie sid, discard records created
/// before the server epoch, and fall back to a fresh guest session.
pub async fn open_session<S>(
    store: &S,
    sid_hint: Option<Uuid>,
    epoch: DateTime<Utc>,
) -> Result<SessionCtx, WebServiceError>
where
    S: SessionStore,
{
    if let Some(sid) = sid_hint {
        match store.load(sid).await? {
            Some(data) if data.created_at >= epoch => {
                return Ok(SessionCtx {
                    sid,
                    data,
                    is_new: false,
                });
            }
            Some(_) => {
                // Pre-epoch session: a restart invalidates everything issued before it.
                store.destroy(sid).await?;
            }
            None => {}
        }
    }

    Ok(SessionCtx {
        sid: Uuid::new_v4(),
        data: SessionData::new(Utc::now()),
        is_new: true,
    })
}
