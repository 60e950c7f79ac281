//! Admin-side customer administration.

use uuid::Uuid;

use aurum_domain::account::AccountRole;
use aurum_domain::pagination::PageRequest;

use crate::domain::repository::AccountRepository;
use crate::domain::types::{Account, CustomerFilter, CustomerStats};
use crate::error::WebServiceError;

pub struct ListCustomersInput {
    pub filter: CustomerFilter,
    pub page: PageRequest,
}

pub struct ListCustomersOutput {
    pub customers: Vec<Account>,
    pub total: u64,
}

pub struct ListCustomersUseCase<A>
where
    A: AccountRepository,
{
    pub accounts: A,
}

impl<A> ListCustomersUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(
        &self,
        input: ListCustomersInput,
    ) -> Result<ListCustomersOutput, WebServiceError> {
        let page = input.page.clamped();
        let customers = self.accounts.list_customers(&input.filter, page).await?;
        let total = self.accounts.count_customers(&input.filter).await?;
        Ok(ListCustomersOutput { customers, total })
    }
}

pub struct GetCustomerUseCase<A>
where
    A: AccountRepository,
{
    pub accounts: A,
}

impl<A> GetCustomerUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(&self, id: Uuid) -> Result<Account, WebServiceError> {
        // Admin rows are invisible here: an admin id reads as not found.
        self.accounts
            .find_by_id(id)
            .await?
            .filter(|a| a.role == AccountRole::Customer)
            .ok_or(WebServiceError::AccountNotFound)
    }
}

pub struct SetCustomerBlockedUseCase<A>
where
    A: AccountRepository,
{
    pub accounts: A,
}

impl<A> SetCustomerBlockedUseCase<A>
where
    A: AccountRepository,
{
    /// Block or unblock. Takes effect on the customer's next request: session
    /// guards re-load the account every time.
    pub async fn execute(&self, id: Uuid, blocked: bool) -> Result<(), WebServiceError> {
        let account = self
            .accounts
            .find_by_id(id)
            .await?
            .filter(|a| a.role == AccountRole::Customer)
            .ok_or(WebServiceError::AccountNotFound)?;

        if account.is_blocked == blocked {
            return Err(if blocked {
                WebServiceError::AlreadyBlocked
            } else {
                WebServiceError::AlreadyActive
            });
        }

        self.accounts.set_blocked(id, blocked).await
    }
}

pub struct CustomerStatsUseCase<A>
where
    A: AccountRepository,
{
    pub accounts: A,
}

impl<A> CustomerStatsUseCase<A>
where
    A: AccountRepository,
{
    pub async fn execute(&self) -> Result<CustomerStats, WebServiceError> {
        self.accounts.customer_stats().await
    }
}
