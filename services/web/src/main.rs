use chrono::Utc;
use sea_orm::Database;
use tracing::info;

use aurum_web::config::WebConfig;
use aurum_web::infra::google::GoogleOauthClient;
use aurum_web::infra::mail::SmtpMailer;
use aurum_web::router::build_router;
use aurum_web::state::AppState;

#[tokio::main]
async fn main() {
    aurum_core::tracing::init_tracing();

    let config = WebConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let mailer = SmtpMailer::new(&config.smtp).expect("failed to build SMTP mailer");
    let google = GoogleOauthClient::new(&config.google);

    let state = AppState {
        db,
        redis,
        mailer,
        google,
        cookie_domain: config.cookie_domain,
        // Sessions created before this moment are invalid from here on.
        epoch: Utc::now(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("web service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
