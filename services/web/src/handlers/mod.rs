use axum_extra::extract::CookieJar;

use crate::cookie::set_session_cookie;
use crate::domain::repository::SessionStore;
use crate::error::WebServiceError;
use crate::infra::session::SessionCtx;

pub mod account;
pub mod admin;
pub mod auth;
pub mod customer;
pub mod oauth;
pub mod password_reset;

/// Write the session back and make sure the browser carries its cookie.
async fn persist_session<S>(
    store: &S,
    ctx: &SessionCtx,
    jar: CookieJar,
    cookie_domain: &str,
) -> Result<CookieJar, WebServiceError>
where
    S: SessionStore,
{
    store.save(ctx.sid, &ctx.data).await?;
    Ok(if ctx.is_new {
        set_session_cookie(jar, ctx.sid, cookie_domain.to_owned())
    } else {
        jar
    })
}
