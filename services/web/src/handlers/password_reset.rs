use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;

use crate::cookie::{clear_session_cookie, session_id};
use crate::domain::repository::SessionStore as _;
use crate::error::WebServiceError;
use crate::handlers::persist_session;
use crate::infra::session::{SessionCtx, open_session};
use crate::state::AppState;
use crate::usecase::password_reset::{
    CompletePasswordResetInput, CompletePasswordResetUseCase, ResendPasswordResetUseCase,
    StartPasswordResetInput, StartPasswordResetUseCase, VerifyPasswordResetInput,
    VerifyPasswordResetOutcome, VerifyPasswordResetUseCase,
};

/// A mid-flow block kills the whole session, not just the reset state.
async fn destroy_on_block(
    state: &AppState,
    ctx: SessionCtx,
    jar: CookieJar,
    err: WebServiceError,
) -> Response {
    if matches!(err, WebServiceError::AccountBlocked) {
        let store = state.session_store();
        if !ctx.is_new {
            if let Err(e) = store.destroy(ctx.sid).await {
                tracing::warn!(error = %e, "failed to destroy blocked session");
            }
        }
        let jar = clear_session_cookie(jar, state.cookie_domain.clone());
        return (jar, err).into_response();
    }
    err.into_response()
}

// ── POST /forgot-password ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

pub async fn start_reset(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, WebServiceError> {
    let usecase = StartPasswordResetUseCase {
        accounts: state.account_repo(),
        mailer: state.mailer.clone(),
    };
    let reset = usecase
        .execute(StartPasswordResetInput { email: body.email })
        .await?;

    let store = state.session_store();
    let mut ctx = open_session(&store, session_id(&jar), state.epoch).await?;
    ctx.data.password_reset = Some(reset);
    let jar = persist_session(&store, &ctx, jar, &state.cookie_domain).await?;

    Ok((StatusCode::ACCEPTED, jar))
}

// ── POST /forgot-password/verify ──────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyResetRequest {
    pub code: String,
}

pub async fn verify_reset(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<VerifyResetRequest>,
) -> Response {
    let store = state.session_store();
    let ctx = match open_session(&store, session_id(&jar), state.epoch).await {
        Ok(ctx) => ctx,
        Err(e) => return e.into_response(),
    };

    let Some(reset) = ctx.data.password_reset.clone() else {
        return WebServiceError::SessionExpired.into_response();
    };

    let usecase = VerifyPasswordResetUseCase {
        accounts: state.account_repo(),
    };
    match usecase
        .execute(VerifyPasswordResetInput {
            state: reset,
            code: body.code,
        })
        .await
    {
        Ok(VerifyPasswordResetOutcome::Verified(next)) => {
            let mut ctx = ctx;
            ctx.data.password_reset = Some(next);
            match persist_session(&store, &ctx, jar, &state.cookie_domain).await {
                Ok(jar) => (StatusCode::OK, jar).into_response(),
                Err(e) => e.into_response(),
            }
        }
        // Mismatch and expiry leave the issued state alone for a retry.
        Err(err) => destroy_on_block(&state, ctx, jar, err).await,
    }
}

// ── POST /forgot-password/resend ──────────────────────────────────────────────

pub async fn resend_reset(State(state): State<AppState>, jar: CookieJar) -> Response {
    let store = state.session_store();
    let ctx = match open_session(&store, session_id(&jar), state.epoch).await {
        Ok(ctx) => ctx,
        Err(e) => return e.into_response(),
    };

    let Some(reset) = ctx.data.password_reset.clone() else {
        return WebServiceError::SessionExpired.into_response();
    };

    let usecase = ResendPasswordResetUseCase {
        accounts: state.account_repo(),
        mailer: state.mailer.clone(),
    };
    match usecase.execute(&reset).await {
        Ok(next) => {
            let mut ctx = ctx;
            ctx.data.password_reset = Some(next);
            match persist_session(&store, &ctx, jar, &state.cookie_domain).await {
                Ok(jar) => (StatusCode::ACCEPTED, jar).into_response(),
                Err(e) => e.into_response(),
            }
        }
        Err(err) => destroy_on_block(&state, ctx, jar, err).await,
    }
}

// ── POST /reset-password ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
    pub confirm_password: String,
}

pub async fn complete_reset(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<ResetPasswordRequest>,
) -> Response {
    let store = state.session_store();
    let ctx = match open_session(&store, session_id(&jar), state.epoch).await {
        Ok(ctx) => ctx,
        Err(e) => return e.into_response(),
    };

    let Some(reset) = ctx.data.password_reset.clone() else {
        return WebServiceError::SessionExpired.into_response();
    };

    let usecase = CompletePasswordResetUseCase {
        accounts: state.account_repo(),
    };
    match usecase
        .execute(CompletePasswordResetInput {
            state: reset,
            password: body.password,
            confirm_password: body.confirm_password,
        })
        .await
    {
        Ok(()) => {
            // One-shot: once the password is written, the reset state is gone
            // and the old code cannot be replayed.
            let mut ctx = ctx;
            ctx.data.password_reset = None;
            match persist_session(&store, &ctx, jar, &state.cookie_domain).await {
                Ok(jar) => (StatusCode::OK, jar).into_response(),
                Err(e) => e.into_response(),
            }
        }
        Err(err) => destroy_on_block(&state, ctx, jar, err).await,
    }
}
