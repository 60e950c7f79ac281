use uuid::Uuid;

use aurum_domain::account::AccountRole;

use crate::domain::repository::AccountRepository;
use crate::error::WebServiceError;
use crate::usecase::password;

pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Which surface the request came from. A customer login never admits an
    /// admin account and vice versa.
    pub role: AccountRole,
}

pub struct LoginUseCase<A>
where
    A: AccountRepository,
{
    pub accounts: A,
}

impl<A> LoginUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(&self, input: LoginInput) -> Result<Uuid, WebServiceError> {
        let email = input.email.trim().to_lowercase();
        if email.is_empty() || input.password.is_empty() {
            return Err(WebServiceError::MissingFields);
        }

        // Wrong-surface accounts read as nonexistent, not forbidden.
        let account = self
            .accounts
            .find_by_email(&email)
            .await?
            .filter(|a| a.role == input.role)
            .ok_or(WebServiceError::InvalidCredentials)?;

        // Blocked check comes before any password work so a blocked account
        // gets the same answer whether or not the password is right.
        if account.is_blocked {
            return Err(WebServiceError::AccountBlocked);
        }

        let hash = account
            .password_hash
            .as_deref()
            .ok_or(WebServiceError::UseGoogleSignin)?;

        if !password::verify(&input.password, hash).await? {
            return Err(WebServiceError::InvalidCredentials);
        }

        Ok(account.id)
    }
}
