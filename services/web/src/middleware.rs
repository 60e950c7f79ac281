//! Session guards for customer- and admin-protected routes.
//!
//! Both guards re-load the account from the store on every request, so a
//! block or role change takes effect within one request of being applied.
//! Rejections destroy the session, clear the cookie and redirect to the
//! matching login page.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use aurum_core::middleware::set_no_store;
use aurum_domain::account::AccountRole;

use crate::cookie::{clear_session_cookie, session_id};
use crate::domain::repository::{AccountRepository, SessionStore};
use crate::domain::types::{Account, SessionIdentity};
use crate::error::WebServiceError;
use crate::infra::session::{SessionCtx, open_session};
use crate::state::AppState;

/// The guarded account, inserted as a request extension on pass.
#[derive(Clone)]
pub struct CurrentAccount(pub Account);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardVerdict {
    Pass,
    Reject(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Guest session, stale session, or identity of the wrong kind.
    NotAuthenticated,
    /// The session points at an account that no longer exists.
    AccountMissing,
    AccountBlocked,
    /// The account's stored role no longer matches its session identity.
    WrongRole,
}

/// Decide whether a session + freshly loaded account may pass the customer guard.
pub fn customer_verdict(identity: SessionIdentity, account: Option<&Account>) -> GuardVerdict {
    let SessionIdentity::Customer(_) = identity else {
        return GuardVerdict::Reject(RejectReason::NotAuthenticated);
    };
    let Some(account) = account else {
        return GuardVerdict::Reject(RejectReason::AccountMissing);
    };
    if account.role != AccountRole::Customer {
        return GuardVerdict::Reject(RejectReason::WrongRole);
    }
    if account.is_blocked {
        return GuardVerdict::Reject(RejectReason::AccountBlocked);
    }
    GuardVerdict::Pass
}

/// Decide whether a session + freshly loaded account may pass the admin guard.
pub fn admin_verdict(identity: SessionIdentity, account: Option<&Account>) -> GuardVerdict {
    let SessionIdentity::Admin(_) = identity else {
        return GuardVerdict::Reject(RejectReason::NotAuthenticated);
    };
    let Some(account) = account else {
        return GuardVerdict::Reject(RejectReason::AccountMissing);
    };
    if account.role != AccountRole::Admin {
        return GuardVerdict::Reject(RejectReason::WrongRole);
    }
    if account.is_blocked {
        return GuardVerdict::Reject(RejectReason::AccountBlocked);
    }
    GuardVerdict::Pass
}

fn identity_account_id(identity: SessionIdentity) -> Option<uuid::Uuid> {
    match identity {
        SessionIdentity::Customer(id) | SessionIdentity::Admin(id) => Some(id),
        SessionIdentity::Guest => None,
    }
}

async fn run_guard(
    state: &AppState,
    jar: CookieJar,
    req: Request,
    next: Next,
    verdict: fn(SessionIdentity, Option<&Account>) -> GuardVerdict,
    login_path: &'static str,
) -> Result<Response, WebServiceError> {
    let store = state.session_store();
    let ctx = open_session(&store, session_id(&jar), state.epoch).await?;

    let account = match identity_account_id(ctx.data.identity) {
        Some(id) => state.account_repo().find_by_id(id).await?,
        None => None,
    };

    let decision = verdict(ctx.data.identity, account.as_ref());
    match (decision, account) {
        (GuardVerdict::Pass, Some(account)) => {
            let mut req = req;
            req.extensions_mut().insert(CurrentAccount(account));
            Ok(next.run(req).await)
        }
        (GuardVerdict::Pass, None) => {
            // Verdict functions never pass without an account; treat as missing.
            let reason = RejectReason::AccountMissing;
            Ok(reject(&store, ctx, jar, state.cookie_domain.clone(), reason, login_path).await)
        }
        (GuardVerdict::Reject(reason), _) => {
            Ok(reject(&store, ctx, jar, state.cookie_domain.clone(), reason, login_path).await)
        }
    }
}

async fn reject<S>(
    store: &S,
    ctx: SessionCtx,
    jar: CookieJar,
    cookie_domain: String,
    reason: RejectReason,
    login_path: &'static str,
) -> Response
where
    S: SessionStore,
{
    // Clear the cookie even if the store delete fails: the browser must not
    // keep presenting a session the server has already condemned.
    if !ctx.is_new {
        if let Err(e) = store.destroy(ctx.sid).await {
            tracing::warn!(error = %e, "failed to destroy rejected session");
        }
    }
    let jar = clear_session_cookie(jar, cookie_domain);
    let target = if reason == RejectReason::AccountBlocked {
        format!("{login_path}?error=account_blocked")
    } else {
        login_path.to_owned()
    };
    (jar, Redirect::to(&target)).into_response()
}

/// Guard for customer-protected routes. Redirects to `/login` on rejection.
pub async fn require_customer(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    match run_guard(&state, jar, req, next, customer_verdict, "/login").await {
        Ok(resp) => resp,
        Err(e) => e.into_response(),
    }
}

/// Guard for admin routes. Redirects to `/admin/login` on rejection and
/// stamps cache-prevention headers on every response, pass or reject.
pub async fn require_admin(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let mut resp = match run_guard(&state, jar, req, next, admin_verdict, "/admin/login").await {
        Ok(resp) => resp,
        Err(e) => e.into_response(),
    };
    set_no_store(resp.headers_mut());
    resp
}
