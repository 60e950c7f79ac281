use axum::Extension;
use axum::Json;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use aurum_core::serde::{opt_to_rfc3339_ms, to_rfc3339_ms};
use aurum_domain::account::AccountRole;

use crate::error::WebServiceError;
use crate::middleware::CurrentAccount;

/// Account view for the signed-in customer. Credentials never leave the
/// service; only the presence of a Google link is exposed.
#[derive(Serialize)]
pub struct AccountResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: AccountRole,
    pub google_linked: bool,
    #[serde(serialize_with = "opt_to_rfc3339_ms")]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

// ── GET /account ──────────────────────────────────────────────────────────────

pub async fn get_account(
    Extension(CurrentAccount(account)): Extension<CurrentAccount>,
) -> Result<impl IntoResponse, WebServiceError> {
    Ok(Json(AccountResponse {
        id: account.id,
        name: account.name,
        email: account.email,
        phone: account.phone,
        role: account.role,
        google_linked: account.google_id.is_some(),
        last_login_at: account.last_login_at,
        created_at: account.created_at,
    }))
}
