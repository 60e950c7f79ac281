// Not every test binary uses every mock.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use aurum_domain::account::AccountRole;
use aurum_domain::pagination::PageRequest;

use aurum_web::domain::repository::{
    AccountRepository, Mailer, NewAccount, SessionStore,
};
use aurum_web::domain::types::{
    Account, CustomerFilter, CustomerStats, CustomerStatus, SessionData,
};
use aurum_web::error::WebServiceError;

/// Cheap bcrypt cost for fixtures; production uses the real work factor.
pub const TEST_BCRYPT_COST: u32 = 4;

// ── MockAccountRepo ──────────────────────────────────────────────────────────

pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<Account>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the account list for post-execution inspection.
    pub fn accounts_handle(&self) -> Arc<Mutex<Vec<Account>>> {
        Arc::clone(&self.accounts)
    }
}

fn matches_filter(account: &Account, filter: &CustomerFilter) -> bool {
    if account.role != AccountRole::Customer {
        return false;
    }
    let status_ok = match filter.status {
        CustomerStatus::All => true,
        CustomerStatus::Active => !account.is_blocked,
        CustomerStatus::Blocked => account.is_blocked,
    };
    if !status_ok {
        return false;
    }
    match filter.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        None => true,
        Some(search) => {
            let needle = search.to_lowercase();
            account.name.to_lowercase().contains(&needle)
                || account.email.to_lowercase().contains(&needle)
                || account
                    .phone
                    .as_deref()
                    .is_some_and(|p| p.to_lowercase().contains(&needle))
        }
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, WebServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email)
            .cloned())
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, WebServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.phone.as_deref() == Some(phone))
            .cloned())
    }

    async fn find_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<Account>, WebServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.google_id.as_deref() == Some(google_id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, WebServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, account: &NewAccount) -> Result<(), WebServiceError> {
        let now = Utc::now();
        self.accounts.lock().unwrap().push(Account {
            id: account.id,
            name: account.name.clone(),
            email: account.email.clone(),
            phone: account.phone.clone(),
            password_hash: account.password_hash.clone(),
            google_id: account.google_id.clone(),
            role: AccountRole::Customer,
            is_blocked: false,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        });
        Ok(())
    }

    async fn update_password_hash(&self, id: Uuid, hash: &str) -> Result<(), WebServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(a) = accounts.iter_mut().find(|a| a.id == id) {
            a.password_hash = Some(hash.to_owned());
            a.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn link_google_id(&self, id: Uuid, google_id: &str) -> Result<(), WebServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(a) = accounts.iter_mut().find(|a| a.id == id) {
            a.google_id = Some(google_id.to_owned());
            a.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<(), WebServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(a) = accounts.iter_mut().find(|a| a.id == id) {
            a.is_blocked = blocked;
            a.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), WebServiceError> {
        let mut accounts = self.accounts.lock().unwrap();
        if let Some(a) = accounts.iter_mut().find(|a| a.id == id) {
            a.last_login_at = Some(Utc::now());
        }
        Ok(())
    }

    async fn list_customers(
        &self,
        filter: &CustomerFilter,
        page: PageRequest,
    ) -> Result<Vec<Account>, WebServiceError> {
        let mut matched: Vec<Account> = self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| matches_filter(a, filter))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.per_page as usize)
            .collect())
    }

    async fn count_customers(&self, filter: &CustomerFilter) -> Result<u64, WebServiceError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| matches_filter(a, filter))
            .count() as u64)
    }

    async fn customer_stats(&self) -> Result<CustomerStats, WebServiceError> {
        let accounts = self.accounts.lock().unwrap();
        let customers: Vec<&Account> = accounts
            .iter()
            .filter(|a| a.role == AccountRole::Customer)
            .collect();
        let total = customers.len() as u64;
        let blocked = customers.iter().filter(|a| a.is_blocked).count() as u64;
        let google_linked = customers.iter().filter(|a| a.google_id.is_some()).count() as u64;
        Ok(CustomerStats {
            total,
            active: total - blocked,
            blocked,
            google_linked,
        })
    }
}

// ── MockMailer ───────────────────────────────────────────────────────────────

pub struct MockMailer {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    /// Returns a shared handle to the (recipient, code) log.
    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }

    fn deliver(&self, to: &str, code: &str) -> Result<(), WebServiceError> {
        if self.fail {
            return Err(WebServiceError::MailDelivery);
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), code.to_owned()));
        Ok(())
    }
}

impl Mailer for MockMailer {
    async fn send_signup_code(&self, to: &str, code: &str) -> Result<(), WebServiceError> {
        self.deliver(to, code)
    }

    async fn send_reset_code(&self, to: &str, code: &str) -> Result<(), WebServiceError> {
        self.deliver(to, code)
    }
}

// ── MockSessionStore ─────────────────────────────────────────────────────────

/// Stores raw JSON payloads like the real store, so decode failures can be
/// exercised by planting garbage.
pub struct MockSessionStore {
    pub records: Arc<Mutex<HashMap<Uuid, String>>>,
}

impl MockSessionStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn records_handle(&self) -> Arc<Mutex<HashMap<Uuid, String>>> {
        Arc::clone(&self.records)
    }
}

impl SessionStore for MockSessionStore {
    async fn load(&self, sid: Uuid) -> Result<Option<SessionData>, WebServiceError> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .get(&sid)
            .and_then(|v| serde_json::from_str(v).ok()))
    }

    async fn save(&self, sid: Uuid, data: &SessionData) -> Result<(), WebServiceError> {
        let payload = serde_json::to_string(data).map_err(anyhow::Error::from)?;
        self.records.lock().unwrap().insert(sid, payload);
        Ok(())
    }

    async fn destroy(&self, sid: Uuid) -> Result<(), WebServiceError> {
        self.records.lock().unwrap().remove(&sid);
        Ok(())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn hash_for_tests(password: &str) -> String {
    bcrypt::hash(password, TEST_BCRYPT_COST).unwrap()
}

pub fn test_customer(email: &str, password: &str) -> Account {
    let now = Utc::now();
    Account {
        id: Uuid::now_v7(),
        name: "Test Customer".to_owned(),
        email: email.to_owned(),
        phone: None,
        password_hash: Some(hash_for_tests(password)),
        google_id: None,
        role: AccountRole::Customer,
        is_blocked: false,
        last_login_at: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_admin(email: &str, password: &str) -> Account {
    Account {
        role: AccountRole::Admin,
        name: "Test Admin".to_owned(),
        ..test_customer(email, password)
    }
}

pub fn test_google_customer(email: &str, google_id: &str) -> Account {
    Account {
        password_hash: None,
        google_id: Some(google_id.to_owned()),
        ..test_customer(email, "unused")
    }
}
