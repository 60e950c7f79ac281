use axum::http::StatusCode;

/// `GET /healthz` — the process is up.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — ready for traffic. The web service opens its database and
/// Redis pools before binding the listener, so readiness matches liveness.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
