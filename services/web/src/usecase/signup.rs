use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AccountRepository, Mailer, NewAccount};
use crate::domain::types::{OneTimeCode, PendingRegistration};
use crate::error::WebServiceError;
use crate::usecase::{generate_otp, password};

pub struct StartSignupInput {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub password: String,
    pub confirm_password: String,
}

/// First signup step: validate, check uniqueness, mail a code. No account row
/// exists until the code is confirmed; the pending registration lives in the
/// caller's session.
pub struct StartSignupUseCase<A, M>
where
    A: AccountRepository,
    M: Mailer,
{
    pub accounts: A,
    pub mailer: M,
}

impl<A, M> StartSignupUseCase<A, M>
where
    A: AccountRepository,
    M: Mailer,
{
    pub async fn execute(
        &self,
        input: StartSignupInput,
    ) -> Result<PendingRegistration, WebServiceError> {
        let name = input.name.trim().to_owned();
        let email = input.email.trim().to_lowercase();
        let phone = input
            .phone
            .map(|p| p.trim().to_owned())
            .filter(|p| !p.is_empty());

        if name.is_empty() || email.is_empty() || input.password.is_empty() {
            return Err(WebServiceError::MissingFields);
        }
        if input.password != input.confirm_password {
            return Err(WebServiceError::PasswordMismatch);
        }
        password::validate_strength(&input.password)?;

        if self.accounts.find_by_email(&email).await?.is_some() {
            return Err(WebServiceError::EmailTaken);
        }
        if let Some(ref phone) = phone {
            if self.accounts.find_by_phone(phone).await?.is_some() {
                return Err(WebServiceError::PhoneTaken);
            }
        }

        // Mail before returning: a delivery failure must leave no trace.
        let otp = OneTimeCode::issue(generate_otp(), Utc::now());
        self.mailer.send_signup_code(&email, &otp.code).await?;

        Ok(PendingRegistration {
            name,
            email,
            phone,
            password: input.password,
            otp,
        })
    }
}

pub struct VerifySignupInput {
    pub pending: PendingRegistration,
    pub code: String,
}

/// Second signup step: confirm the mailed code and create the account.
pub struct VerifySignupUseCase<A>
where
    A: AccountRepository,
{
    pub accounts: A,
}

impl<A> VerifySignupUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(&self, input: VerifySignupInput) -> Result<Uuid, WebServiceError> {
        let pending = input.pending;

        // Expiry before comparison: an expired code is expired even if it matches.
        if pending.otp.is_expired(Utc::now()) {
            return Err(WebServiceError::ExpiredOtp);
        }
        if pending.otp.code != input.code {
            return Err(WebServiceError::InvalidOtp);
        }

        // The email may have been taken while the code sat in the inbox.
        if self.accounts.find_by_email(&pending.email).await?.is_some() {
            return Err(WebServiceError::EmailTaken);
        }

        let hash = password::hash(&pending.password).await?;
        let account = NewAccount {
            id: Uuid::now_v7(),
            name: pending.name,
            email: pending.email,
            phone: pending.phone,
            password_hash: Some(hash),
            google_id: None,
        };
        self.accounts.create(&account).await?;
        Ok(account.id)
    }
}

/// Replace the pending code with a fresh one and mail it. Other pending data
/// is untouched.
pub struct ResendSignupUseCase<M>
where
    M: Mailer,
{
    pub mailer: M,
}

impl<M> ResendSignupUseCase<M>
where
    M: Mailer,
{
    pub async fn execute(
        &self,
        pending: &PendingRegistration,
    ) -> Result<OneTimeCode, WebServiceError> {
        let otp = OneTimeCode::issue(generate_otp(), Utc::now());
        self.mailer.send_signup_code(&pending.email, &otp.code).await?;
        Ok(otp)
    }
}
