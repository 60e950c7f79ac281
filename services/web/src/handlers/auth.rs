use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use aurum_domain::account::AccountRole;

use crate::cookie::{clear_session_cookie, session_id};
use crate::domain::repository::SessionStore as _;
use crate::domain::types::SessionIdentity;
use crate::error::WebServiceError;
use crate::handlers::persist_session;
use crate::infra::session::open_session;
use crate::state::AppState;
use crate::usecase::login::{LoginInput, LoginUseCase};
use crate::usecase::signup::{
    ResendSignupUseCase, StartSignupInput, StartSignupUseCase, VerifySignupInput,
    VerifySignupUseCase,
};

// ── POST /signup ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

pub async fn start_signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, WebServiceError> {
    let usecase = StartSignupUseCase {
        accounts: state.account_repo(),
        mailer: state.mailer.clone(),
    };
    let pending = usecase
        .execute(StartSignupInput {
            name: body.name,
            email: body.email,
            phone: body.phone,
            password: body.password,
            confirm_password: body.confirm_password,
        })
        .await?;

    let store = state.session_store();
    let mut ctx = open_session(&store, session_id(&jar), state.epoch).await?;
    ctx.data.pending_registration = Some(pending);
    let jar = persist_session(&store, &ctx, jar, &state.cookie_domain).await?;

    Ok((StatusCode::ACCEPTED, jar))
}

// ── POST /signup/verify ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifySignupRequest {
    pub code: String,
}

pub async fn verify_signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifySignupRequest>,
) -> Result<impl IntoResponse, WebServiceError> {
    let store = state.session_store();
    let mut ctx = open_session(&store, session_id(&jar), state.epoch).await?;

    let pending = ctx
        .data
        .pending_registration
        .clone()
        .ok_or(WebServiceError::SessionExpired)?;

    let usecase = VerifySignupUseCase {
        accounts: state.account_repo(),
    };
    // On failure the pending registration stays in the session so the user
    // can retry or ask for a resend.
    let account_id = usecase
        .execute(VerifySignupInput {
            pending,
            code: body.code,
        })
        .await?;

    ctx.data.identity = SessionIdentity::Customer(account_id);
    ctx.data.pending_registration = None;
    let jar = persist_session(&store, &ctx, jar, &state.cookie_domain).await?;

    Ok((StatusCode::CREATED, jar))
}

// ── POST /signup/resend ───────────────────────────────────────────────────────

pub async fn resend_signup(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebServiceError> {
    let store = state.session_store();
    let mut ctx = open_session(&store, session_id(&jar), state.epoch).await?;

    let Some(pending) = ctx.data.pending_registration.as_mut() else {
        return Err(WebServiceError::SessionExpired);
    };

    let usecase = ResendSignupUseCase {
        mailer: state.mailer.clone(),
    };
    let otp = usecase.execute(pending).await?;

    // Only the code changes; name, email, phone and password stay put.
    pending.otp = otp;
    let jar = persist_session(&store, &ctx, jar, &state.cookie_domain).await?;

    Ok((StatusCode::ACCEPTED, jar))
}

// ── POST /login ───────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, WebServiceError> {
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
    };
    let account_id = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
            role: AccountRole::Customer,
        })
        .await?;

    let store = state.session_store();
    let mut ctx = open_session(&store, session_id(&jar), state.epoch).await?;
    ctx.data.identity = SessionIdentity::Customer(account_id);
    // A fresh login discards any half-finished flows.
    ctx.data.pending_registration = None;
    ctx.data.password_reset = None;
    let jar = persist_session(&store, &ctx, jar, &state.cookie_domain).await?;

    Ok((StatusCode::NO_CONTENT, jar))
}

// ── POST /logout ──────────────────────────────────────────────────────────────

pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, WebServiceError> {
    let store = state.session_store();
    if let Some(sid) = session_id(&jar) {
        store.destroy(sid).await?;
    }
    let jar = clear_session_cookie(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}
