//! Admin-guarded customer administration endpoints.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use aurum_core::serde::{opt_to_rfc3339_ms, to_rfc3339_ms};
use aurum_domain::pagination::PageRequest;

use crate::domain::types::{Account, CustomerFilter, CustomerStatus};
use crate::error::WebServiceError;
use crate::state::AppState;
use crate::usecase::customer::{
    CustomerStatsUseCase, GetCustomerUseCase, ListCustomersInput, ListCustomersUseCase,
    SetCustomerBlockedUseCase,
};

/// Customer view for the back office. Password hashes never leave the service.
#[derive(Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub google_linked: bool,
    pub is_blocked: bool,
    #[serde(serialize_with = "opt_to_rfc3339_ms")]
    pub last_login_at: Option<DateTime<Utc>>,
    #[serde(serialize_with = "to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

fn customer_response(account: Account) -> CustomerResponse {
    CustomerResponse {
        id: account.id,
        name: account.name,
        email: account.email,
        phone: account.phone,
        google_linked: account.google_id.is_some(),
        is_blocked: account.is_blocked,
        last_login_at: account.last_login_at,
        created_at: account.created_at,
    }
}

// ── GET /admin/customers ──────────────────────────────────────────────────────

// Plain optional fields: query-string deserialization cannot see through a
// flattened struct, so the page is assembled by hand below.
#[derive(Deserialize)]
pub struct ListCustomersQuery {
    pub search: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(rename = "per-page")]
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

#[derive(Serialize)]
pub struct ListCustomersResponse {
    pub customers: Vec<CustomerResponse>,
    pub total: u64,
    pub page: u32,
    #[serde(rename = "per-page")]
    pub per_page: u32,
}

pub async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<ListCustomersQuery>,
) -> Result<impl IntoResponse, WebServiceError> {
    let usecase = ListCustomersUseCase {
        accounts: state.account_repo(),
    };
    let defaults = PageRequest::default();
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(defaults.per_page),
        page: query.page.unwrap_or(defaults.page),
    }
    .clamped();
    let out = usecase
        .execute(ListCustomersInput {
            filter: CustomerFilter {
                search: query.search,
                status: query.status,
            },
            page,
        })
        .await?;

    Ok(Json(ListCustomersResponse {
        customers: out.customers.into_iter().map(customer_response).collect(),
        total: out.total,
        page: page.page,
        per_page: page.per_page,
    }))
}

// ── GET /admin/customers/stats ────────────────────────────────────────────────

pub async fn customer_stats(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, WebServiceError> {
    let usecase = CustomerStatsUseCase {
        accounts: state.account_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(stats))
}

// ── GET /admin/customers/{id} ─────────────────────────────────────────────────

pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, WebServiceError> {
    let usecase = GetCustomerUseCase {
        accounts: state.account_repo(),
    };
    let account = usecase.execute(id).await?;
    Ok(Json(customer_response(account)))
}

// ── PATCH /admin/customers/{id}/block ─────────────────────────────────────────

pub async fn block_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, WebServiceError> {
    let usecase = SetCustomerBlockedUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(id, true).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PATCH /admin/customers/{id}/unblock ───────────────────────────────────────

pub async fn unblock_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, WebServiceError> {
    let usecase = SetCustomerBlockedUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(id, false).await?;
    Ok(StatusCode::NO_CONTENT)
}
