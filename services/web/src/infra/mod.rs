use std::future::Future;
use std::time::Duration;

use crate::error::WebServiceError;

pub mod db;
pub mod google;
pub mod mail;
pub mod session;

/// Deadline applied to every credential-store and session-store call.
pub const STORE_DEADLINE: Duration = Duration::from_secs(3);

/// Run a store operation under the uniform deadline.
///
/// Timeouts are the one transient failure kind (`STORE_UNAVAILABLE`); other
/// store errors keep their context chain and surface as internal.
pub async fn store_call<T, E, F>(op: &'static str, fut: F) -> Result<T, WebServiceError>
where
    F: Future<Output = Result<T, E>>,
    E: Into<anyhow::Error>,
{
    match tokio::time::timeout(STORE_DEADLINE, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(WebServiceError::Internal(e.into().context(op))),
        Err(_) => {
            tracing::warn!(op, "store call exceeded deadline");
            Err(WebServiceError::StoreUnavailable)
        }
    }
}
