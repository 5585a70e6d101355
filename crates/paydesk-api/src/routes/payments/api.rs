//! Payments API endpoints - JSON
//!
//! Endpoints:
//! - api_payments_list: GET /payments?skip&take&accountId
//! - api_payment_get: GET /payments/:id
//! - api_payment_create: POST /payments/:accountId
//! - api_payment_update: PATCH /payments/:id

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use paydesk_core::{
    payment, CoreError, NewPayment, Page, PaymentFilter, PaymentPatch, PaymentWithAccount,
};

use crate::error::ApiResult;
use crate::routes::params::{optional_i32, page_request, parse_id, QueryParams};
use crate::AppState;

/// List payments with pagination, optionally for one account (JSON API)
pub async fn api_payments_list(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<Page<PaymentWithAccount>>> {
    let request = page_request(&params, &state.config.pagination)?;
    let filter = PaymentFilter {
        account_id: optional_i32(&params, "accountId")?,
    };
    Ok(Json(state.payments.list(filter, request).await?))
}

/// Get a single payment (JSON API)
pub async fn api_payment_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<payment::Model>> {
    let id = parse_id("id", &id)?;
    let payment = state
        .payments
        .get(id)
        .await?
        .ok_or(CoreError::PaymentNotFound { id })?;
    Ok(Json(payment))
}

/// Create a payment for the account in the path (JSON API)
pub async fn api_payment_create(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
    body: Result<Json<NewPayment>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<payment::Model>)> {
    let account_id = parse_id("accountId", &account_id)?;
    let Json(input) = body?;
    let payment = state.payments.create(account_id, input).await?;
    log::info!("Payment {} created for account {}", payment.id, account_id);
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Partially update a payment, including its status (JSON API)
pub async fn api_payment_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<PaymentPatch>, JsonRejection>,
) -> ApiResult<Json<payment::Model>> {
    let id = parse_id("id", &id)?;
    let Json(patch) = body?;
    Ok(Json(state.payments.update(id, patch).await?))
}
