//! Account pages - HTMX rendering and form handlers

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use paydesk_core::{account, AccountService, CoreError, CoreResult, Page};
use paydesk_utils::escape_html;

use super::form::{patch_from, render_create_modal, render_edit_form, AccountForm};
use crate::error::ApiError;
use crate::routes::forms::{parse_form, FormErrors};
use crate::routes::notify::{failure, notify};
use crate::routes::params::{page_request, parse_id, QueryParams};
use crate::routes::payments::{payments_table, REFRESH_PAYMENTS};
use crate::routes::table::{fetch_failed, PageSource, PaginationState, Table};
use crate::{page_response, AppState};

pub const REFRESH_ACCOUNTS: &str = "refresh-accounts";

/// Table rows come straight from the account service
pub struct AccountSource {
    service: AccountService,
}

impl AccountSource {
    pub fn new(service: AccountService) -> Self {
        Self { service }
    }
}

#[async_trait]
impl PageSource<account::Model> for AccountSource {
    async fn fetch(&self, state: PaginationState) -> CoreResult<Page<account::Model>> {
        self.service.list(state.request()).await
    }
}

fn accounts_table() -> Table<account::Model> {
    Table::new("accounts-table", "/admin/accounts/table", REFRESH_ACCOUNTS)
        .empty_message("No accounts yet")
        .column("ID", |a: &account::Model| a.id.to_string())
        .column("Name", |a: &account::Model| {
            format!(
                "<a href='/admin/accounts/{}' class='text-indigo-600 hover:underline'>{}</a>",
                a.id,
                escape_html(&a.name)
            )
        })
        .column("Address", |a: &account::Model| escape_html(&a.address))
        .column("Phone", |a: &account::Model| escape_html(&a.phone_number))
        .column("Bank Account", |a: &account::Model| {
            a.bank_account_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string())
        })
}

/// Accounts page
pub async fn page_accounts(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let initial = PaginationState {
        skip: 0,
        take: state.config.pagination.default_take,
    };
    let inner_content = format!(
        r##"<div class='flex items-center justify-between mb-4'>
    <h2 class='text-2xl font-bold'>Accounts</h2>
    <button hx-get='/admin/accounts/new' hx-target='#modal' hx-swap='innerHTML'
        class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Create Account</button>
</div>
{}"##,
        accounts_table().placeholder(initial)
    );
    Html(page_response(&headers, "Accounts", "/admin/accounts", &inner_content))
}

/// HTMX: accounts table fragment
pub async fn htmx_accounts_table(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Response {
    let request = match page_request(&params, &state.config.pagination) {
        Ok(request) => request,
        Err(e) => return fetch_failed(e),
    };
    let source = AccountSource::new(state.accounts.clone());
    accounts_table().respond(&source, request.into()).await
}

/// HTMX: empty create form in the modal
pub async fn htmx_account_create_form() -> Html<String> {
    Html(render_create_modal(&AccountForm::default(), &FormErrors::new()))
}

/// HTMX: submit the create form
pub async fn htmx_account_store(State(state): State<AppState>, body: String) -> Response {
    let form = AccountForm::from_params(&parse_form(&body));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Html(render_create_modal(&form, &errors)).into_response(),
    };

    match state.accounts.create(input).await {
        Ok(account) => {
            log::info!("Account {} created from admin form", account.id);
            (
                notify("Account created successfully!").event(REFRESH_ACCOUNTS),
                Html(String::new()),
            )
                .into_response()
        }
        Err(e) => failure("Failed to create account", e.into()),
    }
}

fn message_page(headers: &HeaderMap, status: StatusCode, message: &str) -> Response {
    let inner_content = format!(
        r#"<div class='text-center py-12'>
    <p class='text-gray-600 mb-4'>{}</p>
    <a href='/admin/accounts' class='text-indigo-600 hover:underline'>Back to accounts</a>
</div>"#,
        escape_html(message)
    );
    (
        status,
        Html(page_response(headers, "Account", "/admin/accounts", &inner_content)),
    )
        .into_response()
}

/// Account page: edit form plus the account's payments
pub async fn page_account_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Response {
    let id = match parse_id("id", &id) {
        Ok(id) => id,
        Err(e) => return message_page(&headers, e.status(), &e.to_string()),
    };
    let account = match state.accounts.get(id).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            let error = CoreError::AccountNotFound { id };
            return message_page(&headers, StatusCode::NOT_FOUND, &error.to_string());
        }
        Err(e) => {
            let error = ApiError::from(e);
            error.log();
            return message_page(&headers, error.status(), &error.user_message());
        }
    };

    let initial = PaginationState {
        skip: 0,
        take: state.config.pagination.default_take,
    };
    let inner_content = format!(
        r##"<div class='mb-4'>
    <a href='/admin/accounts' class='text-sm text-gray-500 hover:underline'>&larr; Accounts</a>
    <h2 class='text-2xl font-bold'>{name}</h2>
</div>
{form}
<div class='flex items-center justify-between mt-8 mb-4'>
    <h3 class='text-xl font-semibold'>Payments</h3>
    <button hx-get='/admin/payments/new?accountId={id}' hx-target='#modal' hx-swap='innerHTML'
        class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Create Payment</button>
</div>
{payments}"##,
        name = escape_html(&account.name),
        form = render_edit_form(id, &AccountForm::from_model(&account), &FormErrors::new()),
        id = id,
        payments = payments_table(Some(id)).placeholder(initial),
    );
    let title = escape_html(&account.name);
    Html(page_response(&headers, &title, "/admin/accounts", &inner_content)).into_response()
}

/// HTMX: submit the edit form
pub async fn htmx_account_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Response {
    let id = match parse_id("id", &id) {
        Ok(id) => id,
        Err(e) => return failure("Failed to update account", e),
    };
    let form = AccountForm::from_params(&parse_form(&body));
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => return Html(render_edit_form(id, &form, &errors)).into_response(),
    };

    match state.accounts.update(id, patch_from(input)).await {
        Ok(account) => (
            notify("Account updated successfully!")
                .event(REFRESH_ACCOUNTS)
                .event(REFRESH_PAYMENTS),
            Html(render_edit_form(
                id,
                &AccountForm::from_model(&account),
                &FormErrors::new(),
            )),
        )
            .into_response(),
        Err(e) => failure("Failed to update account", e.into()),
    }
}
