use axum::{
    Router, middleware,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use aurum_core::health::{healthz, readyz};
use aurum_core::middleware::request_id_layer;

use crate::handlers::{
    account::get_account,
    admin::{admin_login, admin_logout},
    auth::{login, logout, resend_signup, start_signup, verify_signup},
    customer::{block_customer, customer_stats, get_customer, list_customers, unblock_customer},
    oauth::{google_callback, start_google},
    password_reset::{complete_reset, resend_reset, start_reset, verify_reset},
};
use crate::middleware::{require_admin, require_customer};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let customer_routes = Router::new()
        .route("/account", get(get_account))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_customer,
        ));

    let admin_routes = Router::new()
        .route("/admin/customers", get(list_customers))
        .route("/admin/customers/stats", get(customer_stats))
        .route("/admin/customers/{id}", get(get_customer))
        .route("/admin/customers/{id}/block", patch(block_customer))
        .route("/admin/customers/{id}/unblock", patch(unblock_customer))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Signup
        .route("/signup", post(start_signup))
        .route("/signup/verify", post(verify_signup))
        .route("/signup/resend", post(resend_signup))
        // Login / logout
        .route("/login", post(login))
        .route("/logout", post(logout))
        // Password reset
        .route("/forgot-password", post(start_reset))
        .route("/forgot-password/verify", post(verify_reset))
        .route("/forgot-password/resend", post(resend_reset))
        .route("/reset-password", post(complete_reset))
        // Google OAuth
        .route("/auth/google", get(start_google))
        .route("/auth/google/callback", get(google_callback))
        // Admin session
        .route("/admin/login", post(admin_login))
        .route("/admin/logout", post(admin_logout))
        .merge(customer_routes)
        .merge(admin_routes)
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
