#![allow(async_fn_in_trait)]

use uuid::Uuid;

use aurum_domain::pagination::PageRequest;

use crate::domain::types::{
    Account, CustomerFilter, CustomerStats, GoogleProfile, SessionData,
};
use crate::error::WebServiceError;

/// Data needed to insert a new account row.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password_hash: Option<String>,
    pub google_id: Option<String>,
}

/// Repository for account rows.
pub trait AccountRepository: Send + Sync {
    /// Lookup by email. Callers lowercase the input first.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, WebServiceError>;

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, WebServiceError>;

    async fn find_by_google_id(&self, google_id: &str)
    -> Result<Option<Account>, WebServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, WebServiceError>;

    /// Insert a customer account. Role is always Customer, unblocked.
    async fn create(&self, account: &NewAccount) -> Result<(), WebServiceError>;

    async fn update_password_hash(&self, id: Uuid, hash: &str) -> Result<(), WebServiceError>;

    /// Attach a Google subject id to an existing account.
    async fn link_google_id(&self, id: Uuid, google_id: &str) -> Result<(), WebServiceError>;

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<(), WebServiceError>;

    async fn touch_last_login(&self, id: Uuid) -> Result<(), WebServiceError>;

    /// Page of non-admin accounts, newest first.
    async fn list_customers(
        &self,
        filter: &CustomerFilter,
        page: PageRequest,
    ) -> Result<Vec<Account>, WebServiceError>;

    /// Count of non-admin accounts matching the filter.
    async fn count_customers(&self, filter: &CustomerFilter) -> Result<u64, WebServiceError>;

    async fn customer_stats(&self) -> Result<CustomerStats, WebServiceError>;
}

/// Store for session records keyed by session id.
pub trait SessionStore: Send + Sync {
    async fn load(&self, sid: Uuid) -> Result<Option<SessionData>, WebServiceError>;

    /// Write the record and refresh its TTL.
    async fn save(&self, sid: Uuid, data: &SessionData) -> Result<(), WebServiceError>;

    async fn destroy(&self, sid: Uuid) -> Result<(), WebServiceError>;
}

/// Outbound mail. Delivery is synchronous: flows that mail a code must not
/// record any state when delivery fails.
pub trait Mailer: Send + Sync {
    async fn send_signup_code(&self, to: &str, code: &str) -> Result<(), WebServiceError>;

    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), WebServiceError>;
}

/// Port for resolving a Google authorization code into a profile.
pub trait GoogleIdentityPort: Send + Sync {
    /// Exchange the callback code for tokens and fetch the userinfo profile.
    /// Returns `None` when the provider rejects the code.
    async fn exchange_code(&self, code: &str) -> Result<Option<GoogleProfile>, WebServiceError>;
}
