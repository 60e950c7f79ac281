use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aurum_domain::account::AccountRole;

/// Customer or admin account as the service sees it.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    /// Stored lowercase; all lookups lowercase the input first.
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
    pub role: AccountRole,
    pub is_blocked: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One-time code mailed during signup and password reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneTimeCode {
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl OneTimeCode {
    pub fn issue(code: String, now: DateTime<Utc>) -> Self {
        Self {
            code,
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Signup data held in the session between submission and OTP confirmation.
/// The account row does not exist until the code is confirmed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingRegistration {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub otp: OneTimeCode,
}

/// Password-reset progress, held in the session.
///
/// The verified state carries no code, so a verified session cannot replay
/// it; completion clears the state entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum PasswordReset {
    OtpIssued { account_id: Uuid, otp: OneTimeCode },
    OtpVerified { account_id: Uuid },
}

impl PasswordReset {
    pub fn account_id(&self) -> Uuid {
        match self {
            Self::OtpIssued { account_id, .. } | Self::OtpVerified { account_id } => *account_id,
        }
    }
}

/// Who the session belongs to. A session is never both customer and admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SessionIdentity {
    Guest,
    Customer(Uuid),
    Admin(Uuid),
}

/// What the user asked for when they started the Google flow. Stored in the
/// session so the callback knows how to resolve ambiguous matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OauthIntent {
    Signup,
    Login,
}

/// The session record stored in Redis (JSON under `sess:{sid}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub identity: SessionIdentity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_intent: Option<OauthIntent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oauth_state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_registration: Option<PendingRegistration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_reset: Option<PasswordReset>,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            identity: SessionIdentity::Guest,
            oauth_intent: None,
            oauth_state: None,
            pending_registration: None,
            password_reset: None,
            created_at: now,
        }
    }
}

/// Identity resolved by the Google token + userinfo exchange.
#[derive(Debug, Clone)]
pub struct GoogleProfile {
    /// Google's stable subject identifier.
    pub id: String,
    pub email: String,
    pub name: String,
}

/// Status filter for the admin customer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    #[default]
    All,
    Active,
    Blocked,
}

/// Filter for the admin customer list. Matches non-admin accounts only.
#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    /// Case-insensitive substring over name, email and phone.
    pub search: Option<String>,
    pub status: CustomerStatus,
}

/// Aggregate counts over non-admin accounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CustomerStats {
    pub total: u64,
    pub active: u64,
    pub blocked: u64,
    pub google_linked: u64,
}

/// One-time code length in digits.
pub const OTP_LEN: usize = 6;

/// One-time code time-to-live in seconds (10 minutes).
pub const OTP_TTL_SECS: i64 = 600;

/// Session time-to-live in seconds (72 hours).
pub const SESSION_TTL_SECS: i64 = 72 * 3600;

/// Minimum password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// bcrypt work factor.
pub const BCRYPT_COST: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_expire_code_after_ttl() {
        let now = Utc::now();
        let otp = OneTimeCode::issue("123456".to_owned(), now);
        assert!(!otp.is_expired(now));
        assert!(!otp.is_expired(now + Duration::seconds(OTP_TTL_SECS - 1)));
        assert!(otp.is_expired(now + Duration::seconds(OTP_TTL_SECS)));
        assert!(otp.is_expired(now + Duration::seconds(OTP_TTL_SECS + 1)));
    }

    #[test]
    fn should_round_trip_session_data_via_serde() {
        let now = Utc::now();
        let mut data = SessionData::new(now);
        data.identity = SessionIdentity::Customer(Uuid::new_v4());
        data.password_reset = Some(PasswordReset::OtpIssued {
            account_id: Uuid::new_v4(),
            otp: OneTimeCode::issue("123456".to_owned(), now),
        });
        let json = serde_json::to_string(&data).unwrap();
        let parsed: SessionData = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.identity, data.identity);
        assert!(matches!(
            parsed.password_reset,
            Some(PasswordReset::OtpIssued { .. })
        ));
    }

    #[test]
    fn should_not_serialize_code_in_verified_reset_state() {
        let state = PasswordReset::OtpVerified {
            account_id: Uuid::new_v4(),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(!json.contains("code"));
        assert!(json.contains("otp_verified"));
    }
}
