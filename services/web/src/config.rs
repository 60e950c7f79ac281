/// Web service configuration loaded from environment variables.
#[derive(Debug)]
pub struct WebConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL.
    pub redis_url: String,
    /// Cookie domain attribute (root domain, e.g. "example.com").
    pub cookie_domain: String,
    /// TCP port to listen on (default 3000). Env var: `PORT`.
    pub port: u16,
    pub smtp: SmtpConfig,
    pub google: GoogleConfig,
}

/// SMTP transport settings for code-delivery mail.
#[derive(Debug)]
pub struct SmtpConfig {
    pub host: String,
    /// SMTP port (default 465).
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_email: String,
    pub from_name: Option<String>,
}

/// Google OAuth client settings.
#[derive(Debug)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    /// Absolute callback URL registered with Google.
    pub redirect_url: String,
}

impl WebConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            redis_url: std::env::var("REDIS_URL").expect("REDIS_URL"),
            cookie_domain: std::env::var("COOKIE_DOMAIN").expect("COOKIE_DOMAIN"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            smtp: SmtpConfig {
                host: std::env::var("SMTP_HOST").expect("SMTP_HOST"),
                port: std::env::var("SMTP_PORT")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(465),
                username: std::env::var("SMTP_USERNAME").expect("SMTP_USERNAME"),
                password: std::env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD"),
                from_email: std::env::var("SMTP_FROM_EMAIL").expect("SMTP_FROM_EMAIL"),
                from_name: std::env::var("SMTP_FROM_NAME").ok().filter(|v| !v.is_empty()),
            },
            google: GoogleConfig {
                client_id: std::env::var("GOOGLE_CLIENT_ID").expect("GOOGLE_CLIENT_ID"),
                client_secret: std::env::var("GOOGLE_CLIENT_SECRET").expect("GOOGLE_CLIENT_SECRET"),
                redirect_url: std::env::var("GOOGLE_REDIRECT_URL").expect("GOOGLE_REDIRECT_URL"),
            },
        }
    }
}
