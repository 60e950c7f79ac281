//! Password reset as a session state machine:
//! absent → OtpIssued → OtpVerified → (cleared on completion).
//!
//! Each step re-loads the account so a block lands mid-flow.

use chrono::Utc;

use aurum_domain::account::AccountRole;

use crate::domain::repository::{AccountRepository, Mailer};
use crate::domain::types::{Account, OneTimeCode, PasswordReset};
use crate::error::WebServiceError;
use crate::usecase::{generate_otp, password};

pub struct StartPasswordResetInput {
    pub email: String,
}

pub struct StartPasswordResetUseCase<A, M>
where
    A: AccountRepository,
    M: Mailer,
{
    pub accounts: A,
    pub mailer: M,
}

impl<A, M> StartPasswordResetUseCase<A, M>
where
    A: AccountRepository,
    M: Mailer,
{
    pub async fn execute(
        &self,
        input: StartPasswordResetInput,
    ) -> Result<PasswordReset, WebServiceError> {
        let email = input.email.trim().to_lowercase();
        if email.is_empty() {
            return Err(WebServiceError::MissingFields);
        }

        // Admin accounts do not exist as far as the storefront reset is concerned.
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .filter(|a| a.role == AccountRole::Customer)
            .ok_or(WebServiceError::AccountNotFound)?;

        if account.is_blocked {
            return Err(WebServiceError::AccountBlocked);
        }
        if account.password_hash.is_none() {
            return Err(WebServiceError::UseGoogleSignin);
        }

        // Mail before returning: a delivery failure must leave no state behind.
        let otp = OneTimeCode::issue(generate_otp(), Utc::now());
        self.mailer.send_reset_code(&account.email, &otp.code).await?;

        Ok(PasswordReset::OtpIssued {
            account_id: account.id,
            otp,
        })
    }
}

pub struct VerifyPasswordResetInput {
    pub state: PasswordReset,
    pub code: String,
}

/// Outcome of a verify attempt that did not end the flow with an error the
/// session should survive.
#[derive(Debug)]
pub enum VerifyPasswordResetOutcome {
    /// Code matched; the state no longer carries it.
    Verified(PasswordReset),
}

pub struct VerifyPasswordResetUseCase<A>
where
    A: AccountRepository,
{
    pub accounts: A,
}

impl<A> VerifyPasswordResetUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(
        &self,
        input: VerifyPasswordResetInput,
    ) -> Result<VerifyPasswordResetOutcome, WebServiceError> {
        let (account_id, otp) = match input.state {
            PasswordReset::OtpIssued { account_id, otp } => (account_id, otp),
            PasswordReset::OtpVerified { .. } => return Err(WebServiceError::SessionExpired),
        };

        // Re-load: the account may have been blocked since the code was issued.
        reload_active_customer(&self.accounts, account_id).await?;

        if otp.is_expired(Utc::now()) {
            return Err(WebServiceError::ExpiredOtp);
        }
        if otp.code != input.code {
            return Err(WebServiceError::InvalidOtp);
        }

        Ok(VerifyPasswordResetOutcome::Verified(
            PasswordReset::OtpVerified { account_id },
        ))
    }
}

pub struct ResendPasswordResetUseCase<A, M>
where
    A: AccountRepository,
    M: Mailer,
{
    pub accounts: A,
    pub mailer: M,
}

impl<A, M> ResendPasswordResetUseCase<A, M>
where
    A: AccountRepository,
    M: Mailer,
{
    pub async fn execute(&self, state: &PasswordReset) -> Result<PasswordReset, WebServiceError> {
        let account_id = match state {
            PasswordReset::OtpIssued { account_id, .. } => *account_id,
            PasswordReset::OtpVerified { .. } => return Err(WebServiceError::SessionExpired),
        };

        let account = reload_active_customer(&self.accounts, account_id).await?;

        let otp = OneTimeCode::issue(generate_otp(), Utc::now());
        self.mailer.send_reset_code(&account.email, &otp.code).await?;

        Ok(PasswordReset::OtpIssued { account_id, otp })
    }
}

pub struct CompletePasswordResetInput {
    pub state: PasswordReset,
    pub password: String,
    pub confirm_password: String,
}

pub struct CompletePasswordResetUseCase<A>
where
    A: AccountRepository,
{
    pub accounts: A,
}

impl<A> CompletePasswordResetUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(&self, input: CompletePasswordResetInput) -> Result<(), WebServiceError> {
        let account_id = match input.state {
            PasswordReset::OtpVerified { account_id } => account_id,
            PasswordReset::OtpIssued { .. } => return Err(WebServiceError::OtpNotVerified),
        };

        if input.password.is_empty() || input.confirm_password.is_empty() {
            return Err(WebServiceError::MissingFields);
        }
        if input.password != input.confirm_password {
            return Err(WebServiceError::PasswordMismatch);
        }
        password::validate_strength(&input.password)?;

        // Last blocked check right before the write.
        reload_active_customer(&self.accounts, account_id).await?;

        let hash = password::hash(&input.password).await?;
        self.accounts.update_password_hash(account_id, &hash).await?;
        Ok(())
    }
}

async fn reload_active_customer<A>(
    accounts: &A,
    account_id: uuid::Uuid,
) -> Result<Account, WebServiceError>
where
    A: AccountRepository,
{
    let account = accounts
        .find_by_id(account_id)
        .await?
        .filter(|a| a.role == AccountRole::Customer)
        .ok_or(WebServiceError::AccountNotFound)?;
    if account.is_blocked {
        return Err(WebServiceError::AccountBlocked);
    }
    Ok(account)
}
