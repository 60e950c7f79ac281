//! Session cookie builders.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;
use uuid::Uuid;

use crate::domain::types::SESSION_TTL_SECS;

/// Cookie name carrying the session id.
pub const AURUM_SID: &str = "aurum_sid";

/// Read the session id from the jar, if the cookie is present and parseable.
pub fn session_id(jar: &CookieJar) -> Option<Uuid> {
    jar.get(AURUM_SID).and_then(|c| c.value().parse().ok())
}

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use aurum_web::cookie::{set_session_cookie, AURUM_SID};
///
/// let sid = uuid::Uuid::new_v4();
/// let jar = set_session_cookie(CookieJar::new(), sid, "example.com".to_string());
/// let cookie = jar.get(AURUM_SID).unwrap();
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(72 * 3600)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(jar: CookieJar, sid: Uuid, domain: String) -> CookieJar {
    let cookie = Cookie::build((AURUM_SID, sid.to_string()))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(SESSION_TTL_SECS))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Clear the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use aurum_web::cookie::{clear_session_cookie, set_session_cookie, AURUM_SID};
///
/// let jar = set_session_cookie(CookieJar::new(), uuid::Uuid::new_v4(), "example.com".to_string());
/// let jar = clear_session_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(AURUM_SID).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((AURUM_SID, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
