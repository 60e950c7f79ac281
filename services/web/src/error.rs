use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Web service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum WebServiceError {
    #[error("required fields are missing")]
    MissingFields,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password must be at least 8 characters with an uppercase letter, a lowercase letter and a digit")]
    WeakPassword,
    #[error("invalid code")]
    InvalidOtp,
    #[error("code has expired")]
    ExpiredOtp,
    #[error("session expired, please start over")]
    SessionExpired,
    #[error("code has not been verified")]
    OtpNotVerified,
    #[error("email is already registered")]
    EmailTaken,
    #[error("phone number is already registered")]
    PhoneTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account is blocked")]
    AccountBlocked,
    #[error("this account uses Google sign-in")]
    UseGoogleSignin,
    #[error("account not found")]
    AccountNotFound,
    #[error("account is already registered")]
    AlreadyRegistered,
    #[error("account is already blocked")]
    AlreadyBlocked,
    #[error("account is already active")]
    AlreadyActive,
    #[error("failed to send email")]
    MailDelivery,
    #[error("storage temporarily unavailable")]
    StoreUnavailable,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl WebServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::InvalidOtp => "INVALID_OTP",
            Self::ExpiredOtp => "EXPIRED_OTP",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::OtpNotVerified => "OTP_NOT_VERIFIED",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::PhoneTaken => "PHONE_TAKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AccountBlocked => "ACCOUNT_BLOCKED",
            Self::UseGoogleSignin => "USE_GOOGLE_SIGNIN",
            Self::AccountNotFound => "ACCOUNT_NOT_FOUND",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::AlreadyBlocked => "ALREADY_BLOCKED",
            Self::AlreadyActive => "ALREADY_ACTIVE",
            Self::MailDelivery => "MAIL_DELIVERY",
            Self::StoreUnavailable => "STORE_UNAVAILABLE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingFields
            | Self::PasswordMismatch
            | Self::WeakPassword
            | Self::InvalidOtp
            | Self::ExpiredOtp
            | Self::SessionExpired
            | Self::OtpNotVerified
            | Self::UseGoogleSignin => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::AccountBlocked => StatusCode::FORBIDDEN,
            Self::AccountNotFound => StatusCode::NOT_FOUND,
            Self::EmailTaken
            | Self::PhoneTaken
            | Self::AlreadyRegistered
            | Self::AlreadyBlocked
            | Self::AlreadyActive => StatusCode::CONFLICT,
            Self::MailDelivery | Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
