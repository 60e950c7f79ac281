use axum::extract::{Query, State};
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use uuid::Uuid;

use crate::cookie::session_id;
use crate::domain::repository::{GoogleIdentityPort as _, SessionStore as _};
use crate::domain::types::{OauthIntent, SessionIdentity};
use crate::handlers::persist_session;
use crate::infra::session::open_session;
use crate::state::AppState;
use crate::usecase::oauth::{
    GoogleSigninInput, GoogleSigninOutcome, GoogleSigninRejection, GoogleSigninUseCase,
};

fn failure_target(intent: OauthIntent, error: &str) -> String {
    match intent {
        OauthIntent::Signup => format!("/signup?error={error}"),
        OauthIntent::Login => format!("/login?error={error}"),
    }
}

// ── GET /auth/google ──────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct StartGoogleQuery {
    pub intent: Option<OauthIntent>,
}

pub async fn start_google(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<StartGoogleQuery>,
) -> Response {
    let intent = query.intent.unwrap_or(OauthIntent::Login);
    let csrf_state = Uuid::new_v4().simple().to_string();

    let store = state.session_store();
    let mut ctx = match open_session(&store, session_id(&jar), state.epoch).await {
        Ok(ctx) => ctx,
        Err(e) => return e.into_response(),
    };
    ctx.data.oauth_intent = Some(intent);
    ctx.data.oauth_state = Some(csrf_state.clone());
    let jar = match persist_session(&store, &ctx, jar, &state.cookie_domain).await {
        Ok(jar) => jar,
        Err(e) => return e.into_response(),
    };

    (jar, Redirect::to(&state.google.authorize_url(&csrf_state))).into_response()
}

// ── GET /auth/google/callback ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn google_callback(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<GoogleCallbackQuery>,
) -> Response {
    let store = state.session_store();
    let mut ctx = match open_session(&store, session_id(&jar), state.epoch).await {
        Ok(ctx) => ctx,
        Err(e) => return e.into_response(),
    };

    let intent = ctx.data.oauth_intent.take().unwrap_or(OauthIntent::Login);
    let expected_state = ctx.data.oauth_state.take();

    // The intent and state token are single-use whatever happens next.
    let jar = match persist_session(&store, &ctx, jar, &state.cookie_domain).await {
        Ok(jar) => jar,
        Err(e) => return e.into_response(),
    };

    let state_ok = matches!((&expected_state, &query.state), (Some(a), Some(b)) if a == b);
    if query.error.is_some() || !state_ok {
        return (jar, Redirect::to(&failure_target(intent, "google_auth_failed"))).into_response();
    }
    let Some(code) = query.code else {
        return (jar, Redirect::to(&failure_target(intent, "google_auth_failed"))).into_response();
    };

    let profile = match state.google.exchange_code(&code).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return (jar, Redirect::to(&failure_target(intent, "google_auth_failed")))
                .into_response();
        }
        Err(e) => return e.into_response(),
    };

    let usecase = GoogleSigninUseCase {
        accounts: state.account_repo(),
    };
    let outcome = match usecase.execute(GoogleSigninInput { profile, intent }).await {
        Ok(outcome) => outcome,
        Err(e) => return e.into_response(),
    };

    match outcome {
        GoogleSigninOutcome::Authenticated(account_id) => {
            ctx.data.identity = SessionIdentity::Customer(account_id);
            ctx.data.pending_registration = None;
            ctx.data.password_reset = None;
            // Session already persisted above; write the identity change too.
            match store.save(ctx.sid, &ctx.data).await {
                Ok(()) => (jar, Redirect::to("/")).into_response(),
                Err(e) => e.into_response(),
            }
        }
        GoogleSigninOutcome::Rejected(GoogleSigninRejection::Blocked) => {
            (jar, Redirect::to("/login?error=google_user_blocked")).into_response()
        }
        GoogleSigninOutcome::Rejected(GoogleSigninRejection::AlreadyRegistered) => {
            (jar, Redirect::to("/signup?error=google_user_exists")).into_response()
        }
        GoogleSigninOutcome::Rejected(GoogleSigninRejection::NotFound) => {
            (jar, Redirect::to("/login?error=user_not_found")).into_response()
        }
    }
}
