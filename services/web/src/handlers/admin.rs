use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use aurum_core::middleware::set_no_store;
use aurum_domain::account::AccountRole;

use crate::cookie::{clear_session_cookie, session_id};
use crate::domain::repository::SessionStore as _;
use crate::domain::types::SessionIdentity;
use crate::error::WebServiceError;
use crate::handlers::persist_session;
use crate::infra::session::open_session;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};

// ── POST /admin/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AdminLoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn admin_login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<AdminLoginRequest>,
) -> Result<impl IntoResponse, WebServiceError> {
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
    };
    let account_id = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
            role: AccountRole::Admin,
        })
        .await?;

    let store = state.session_store();
    let mut ctx = open_session(&store, session_id(&jar), state.epoch).await?;
    ctx.data.identity = SessionIdentity::Admin(account_id);
    ctx.data.pending_registration = None;
    ctx.data.password_reset = None;
    let jar = persist_session(&store, &ctx, jar, &state.cookie_domain).await?;

    Ok((StatusCode::NO_CONTENT, jar))
}

// ── POST /admin/logout ────────────────────────────────────────────────────────

pub async fn admin_logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebServiceError> {
    let store = state.session_store();
    if let Some(sid) = session_id(&jar) {
        store.destroy(sid).await?;
    }
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());

    // Back-office logout must also stop the browser showing a cached page
    // behind the back button.
    let mut headers = HeaderMap::new();
    set_no_store(&mut headers);

    Ok((StatusCode::NO_CONTENT, headers, jar))
}
