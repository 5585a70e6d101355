//! Accounts API endpoints - JSON
//!
//! Endpoints:
//! - api_accounts_list: GET /accounts?skip&take
//! - api_account_get: GET /accounts/:id
//! - api_account_create: POST /accounts
//! - api_account_update: PATCH /accounts/:id

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use paydesk_core::{account, AccountPatch, CoreError, NewAccount, Page};

use crate::error::ApiResult;
use crate::routes::params::{page_request, parse_id, QueryParams};
use crate::AppState;

/// List accounts with pagination (JSON API)
pub async fn api_accounts_list(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> ApiResult<Json<Page<account::Model>>> {
    let request = page_request(&params, &state.config.pagination)?;
    Ok(Json(state.accounts.list(request).await?))
}

/// Get a single account (JSON API)
pub async fn api_account_get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<account::Model>> {
    let id = parse_id("id", &id)?;
    let account = state
        .accounts
        .get(id)
        .await?
        .ok_or(CoreError::AccountNotFound { id })?;
    Ok(Json(account))
}

/// Create an account (JSON API)
pub async fn api_account_create(
    State(state): State<AppState>,
    body: Result<Json<NewAccount>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<account::Model>)> {
    let Json(input) = body?;
    let account = state.accounts.create(input).await?;
    log::info!("Account {} created", account.id);
    Ok((StatusCode::CREATED, Json(account)))
}

/// Partially update an account (JSON API)
pub async fn api_account_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<AccountPatch>, JsonRejection>,
) -> ApiResult<Json<account::Model>> {
    let id = parse_id("id", &id)?;
    let Json(patch) = body?;
    Ok(Json(state.accounts.update(id, patch).await?))
}
