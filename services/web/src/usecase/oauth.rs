use uuid::Uuid;

use aurum_domain::account::AccountRole;

use crate::domain::repository::{AccountRepository, NewAccount};
use crate::domain::types::{GoogleProfile, OauthIntent};
use crate::error::WebServiceError;

/// How a Google sign-in resolved. Rejections are flow outcomes, not errors:
/// the handler turns them into redirects, never into JSON error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleSigninOutcome {
    Authenticated(Uuid),
    Rejected(GoogleSigninRejection),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoogleSigninRejection {
    Blocked,
    /// A signup attempt hit an account that already exists.
    AlreadyRegistered,
    /// A login attempt found nothing to log into.
    NotFound,
}

pub struct GoogleSigninInput {
    pub profile: GoogleProfile,
    pub intent: OauthIntent,
}

/// Resolve a verified Google profile against local accounts.
///
/// Precedence: an account already linked to the Google id wins over an
/// unlinked account with the same email. Signup intent never authenticates
/// into an existing account (that would let a Google identity take over an
/// email/password account without proof of the password), and login intent
/// never creates one.
pub struct GoogleSigninUseCase<A>
where
    A: AccountRepository,
{
    pub accounts: A,
}

impl<A> GoogleSigninUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(
        &self,
        input: GoogleSigninInput,
    ) -> Result<GoogleSigninOutcome, WebServiceError> {
        use GoogleSigninOutcome::{Authenticated, Rejected};
        use GoogleSigninRejection::{AlreadyRegistered, Blocked, NotFound};

        let profile = input.profile;
        let email = profile.email.trim().to_lowercase();

        if let Some(account) = self.accounts.find_by_google_id(&profile.id).await? {
            if account.role == AccountRole::Admin {
                // Admins never authenticate through this path.
                return Ok(Rejected(NotFound));
            }
            if account.is_blocked {
                return Ok(Rejected(Blocked));
            }
            if input.intent == OauthIntent::Signup {
                return Ok(Rejected(AlreadyRegistered));
            }
            self.accounts.touch_last_login(account.id).await?;
            return Ok(Authenticated(account.id));
        }

        if let Some(account) = self.accounts.find_by_email(&email).await? {
            if account.role == AccountRole::Admin {
                return Ok(Rejected(NotFound));
            }
            if account.is_blocked {
                return Ok(Rejected(Blocked));
            }
            if input.intent == OauthIntent::Signup {
                return Ok(Rejected(AlreadyRegistered));
            }
            self.accounts.link_google_id(account.id, &profile.id).await?;
            self.accounts.touch_last_login(account.id).await?;
            return Ok(Authenticated(account.id));
        }

        match input.intent {
            OauthIntent::Signup => {
                let account = NewAccount {
                    id: Uuid::now_v7(),
                    name: profile.name,
                    email,
                    phone: None,
                    password_hash: None,
                    google_id: Some(profile.id),
                };
                self.accounts.create(&account).await?;
                self.accounts.touch_last_login(account.id).await?;
                Ok(Authenticated(account.id))
            }
            OauthIntent::Login => Ok(Rejected(NotFound)),
        }
    }
}
