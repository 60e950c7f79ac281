use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use aurum_domain::account::AccountRole;
use aurum_domain::pagination::PageRequest;
use aurum_schema::accounts;

use crate::domain::repository::{AccountRepository, NewAccount};
use crate::domain::types::{Account, CustomerFilter, CustomerStats, CustomerStatus};
use crate::error::WebServiceError;
use crate::infra::store_call;

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, WebServiceError> {
        let model = store_call(
            "find account by email",
            accounts::Entity::find()
                .filter(accounts::Column::Email.eq(email))
                .one(&self.db),
        )
        .await?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Account>, WebServiceError> {
        let model = store_call(
            "find account by phone",
            accounts::Entity::find()
                .filter(accounts::Column::Phone.eq(phone))
                .one(&self.db),
        )
        .await?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_google_id(
        &self,
        google_id: &str,
    ) -> Result<Option<Account>, WebServiceError> {
        let model = store_call(
            "find account by google id",
            accounts::Entity::find()
                .filter(accounts::Column::GoogleId.eq(google_id))
                .one(&self.db),
        )
        .await?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, WebServiceError> {
        let model = store_call(
            "find account by id",
            accounts::Entity::find_by_id(id).one(&self.db),
        )
        .await?;
        model.map(account_from_model).transpose()
    }

    async fn create(&self, account: &NewAccount) -> Result<(), WebServiceError> {
        let now = Utc::now();
        let model = accounts::ActiveModel {
            id: Set(account.id),
            name: Set(account.name.clone()),
            email: Set(account.email.clone()),
            phone: Set(account.phone.clone()),
            password_hash: Set(account.password_hash.clone()),
            google_id: Set(account.google_id.clone()),
            role: Set(AccountRole::Customer.as_i16()),
            is_blocked: Set(false),
            last_login_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };
        store_call("create account", model.insert(&self.db)).await?;
        Ok(())
    }

    async fn update_password_hash(&self, id: Uuid, hash: &str) -> Result<(), WebServiceError> {
        let model = accounts::ActiveModel {
            id: Set(id),
            password_hash: Set(Some(hash.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        store_call("update account password", model.update(&self.db)).await?;
        Ok(())
    }

    async fn link_google_id(&self, id: Uuid, google_id: &str) -> Result<(), WebServiceError> {
        let model = accounts::ActiveModel {
            id: Set(id),
            google_id: Set(Some(google_id.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        store_call("link account google id", model.update(&self.db)).await?;
        Ok(())
    }

    async fn set_blocked(&self, id: Uuid, blocked: bool) -> Result<(), WebServiceError> {
        let model = accounts::ActiveModel {
            id: Set(id),
            is_blocked: Set(blocked),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        store_call("set account blocked", model.update(&self.db)).await?;
        Ok(())
    }

    async fn touch_last_login(&self, id: Uuid) -> Result<(), WebServiceError> {
        let model = accounts::ActiveModel {
            id: Set(id),
            last_login_at: Set(Some(Utc::now())),
            ..Default::default()
        };
        store_call("touch account last login", model.update(&self.db)).await?;
        Ok(())
    }

    async fn list_customers(
        &self,
        filter: &CustomerFilter,
        page: PageRequest,
    ) -> Result<Vec<Account>, WebServiceError> {
        let models = store_call(
            "list customers",
            accounts::Entity::find()
                .filter(customer_condition(filter))
                .order_by_desc(accounts::Column::CreatedAt)
                .offset(page.offset())
                .limit(u64::from(page.per_page))
                .all(&self.db),
        )
        .await?;
        models.into_iter().map(account_from_model).collect()
    }

    async fn count_customers(&self, filter: &CustomerFilter) -> Result<u64, WebServiceError> {
        use sea_orm::PaginatorTrait;
        store_call(
            "count customers",
            accounts::Entity::find()
                .filter(customer_condition(filter))
                .count(&self.db),
        )
        .await
    }

    async fn customer_stats(&self) -> Result<CustomerStats, WebServiceError> {
        use sea_orm::PaginatorTrait;
        let customers =
            accounts::Entity::find().filter(accounts::Column::Role.eq(AccountRole::Customer.as_i16()));

        let total = store_call("count customers total", customers.clone().count(&self.db)).await?;
        let blocked = store_call(
            "count customers blocked",
            customers
                .clone()
                .filter(accounts::Column::IsBlocked.eq(true))
                .count(&self.db),
        )
        .await?;
        let google_linked = store_call(
            "count customers google linked",
            customers
                .filter(accounts::Column::GoogleId.is_not_null())
                .count(&self.db),
        )
        .await?;

        // The three counts are separate queries; a row blocked in between
        // must not underflow the derived active count.
        Ok(CustomerStats {
            total,
            active: total.saturating_sub(blocked),
            blocked,
            google_linked,
        })
    }
}

fn customer_condition(filter: &CustomerFilter) -> Condition {
    let mut cond =
        Condition::all().add(accounts::Column::Role.eq(AccountRole::Customer.as_i16()));

    match filter.status {
        CustomerStatus::All => {}
        CustomerStatus::Active => cond = cond.add(accounts::Column::IsBlocked.eq(false)),
        CustomerStatus::Blocked => cond = cond.add(accounts::Column::IsBlocked.eq(true)),
    }

    if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = format!("%{}%", search.trim());
        cond = cond.add(
            Condition::any()
                .add(Expr::col((accounts::Entity, accounts::Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((accounts::Entity, accounts::Column::Email)).ilike(pattern.clone()))
                .add(Expr::col((accounts::Entity, accounts::Column::Phone)).ilike(pattern)),
        );
    }

    cond
}

fn account_from_model(model: accounts::Model) -> Result<Account, WebServiceError> {
    let role = AccountRole::from_i16(model.role)
        .ok_or_else(|| anyhow::anyhow!("unknown account role {}", model.role))?;
    Ok(Account {
        id: model.id,
        name: model.name,
        email: model.email,
        phone: model.phone,
        password_hash: model.password_hash,
        google_id: model.google_id,
        role,
        is_blocked: model.is_blocked,
        last_login_at: model.last_login_at,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
