//! Payment pages - HTMX rendering, form handlers and the status control

use async_trait::async_trait;
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse, Response};
use paydesk_core::{
    account, payment, CoreResult, Page, PageRequest, PaymentFilter, PaymentService,
    PaymentStatus, PaymentWithAccount,
};
use paydesk_utils::{escape_html, format_amount};

use super::form::{render_create_modal, PaymentForm};
use crate::error::ApiError;
use crate::routes::forms::{field, parse_form, FormErrors};
use crate::routes::notify::{failure, notify};
use crate::routes::params::{optional_i32, page_request, parse_id, QueryParams};
use crate::routes::table::{fetch_failed, PageSource, PaginationState, Table};
use crate::{page_response, AppState};

pub const REFRESH_PAYMENTS: &str = "refresh-payments";

const STATUSES: [PaymentStatus; 2] = [PaymentStatus::Pending, PaymentStatus::Approved];

/// Payment rows, optionally narrowed to one account
pub struct PaymentSource {
    service: PaymentService,
    filter: PaymentFilter,
}

impl PaymentSource {
    pub fn new(service: PaymentService, filter: PaymentFilter) -> Self {
        Self { service, filter }
    }
}

#[async_trait]
impl PageSource<PaymentWithAccount> for PaymentSource {
    async fn fetch(&self, state: PaginationState) -> CoreResult<Page<PaymentWithAccount>> {
        self.service.list(self.filter, state.request()).await
    }
}

fn status_control(payment: &payment::Model) -> String {
    let options: String = STATUSES
        .iter()
        .map(|status| {
            let selected = if *status == payment.status { " selected" } else { "" };
            format!(
                "<option value='{}'{}>{}</option>",
                status.as_str(),
                selected,
                status.label()
            )
        })
        .collect();
    format!(
        "<select name='status' hx-patch='/admin/payments/{}/status' hx-trigger='change' hx-swap='none' class='px-2 py-1 border rounded'>{}</select>",
        payment.id, options
    )
}

/// Payments table, scoped to one account when `account_id` is set
pub fn payments_table(account_id: Option<i32>) -> Table<PaymentWithAccount> {
    let endpoint = match account_id {
        Some(id) => format!("/admin/payments/table?accountId={}", id),
        None => "/admin/payments/table".to_string(),
    };
    Table::new("payments-table", &endpoint, REFRESH_PAYMENTS)
        .empty_message("No payments yet")
        .column("ID", |p: &PaymentWithAccount| p.payment.id.to_string())
        .column("Amount", |p: &PaymentWithAccount| format_amount(p.payment.amount))
        .column("Notes", |p: &PaymentWithAccount| {
            p.payment
                .notes
                .as_deref()
                .map(escape_html)
                .unwrap_or_else(|| "-".to_string())
        })
        .column("Status", |p: &PaymentWithAccount| status_control(&p.payment))
        .column("Account Name", |p: &PaymentWithAccount| {
            p.account
                .as_ref()
                .map(|a| {
                    format!(
                        "<a href='/admin/accounts/{}' class='text-indigo-600 hover:underline'>{}</a>",
                        a.id,
                        escape_html(&a.name)
                    )
                })
                .unwrap_or_else(|| "-".to_string())
        })
        .column("Recipient's Name", |p: &PaymentWithAccount| {
            escape_html(&p.payment.recipient_name)
        })
        .column("Recipient's Bank Name", |p: &PaymentWithAccount| {
            escape_html(&p.payment.recipient_bank_name)
        })
        .column("Recipient's Account Number", |p: &PaymentWithAccount| {
            escape_html(&p.payment.recipient_account_number)
        })
}

/// Payments page
pub async fn page_payments(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let initial = PaginationState {
        skip: 0,
        take: state.config.pagination.default_take,
    };
    let inner_content = format!(
        r##"<div class='flex items-center justify-between mb-4'>
    <h2 class='text-2xl font-bold'>Payments</h2>
    <button hx-get='/admin/payments/new' hx-target='#modal' hx-swap='innerHTML'
        class='px-4 py-2 bg-indigo-600 text-white rounded-lg hover:bg-indigo-700'>Create Payment</button>
</div>
{}"##,
        payments_table(None).placeholder(initial)
    );
    Html(page_response(&headers, "Payments", "/admin/payments", &inner_content))
}

/// HTMX: payments table fragment
pub async fn htmx_payments_table(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Response {
    let parsed = page_request(&params, &state.config.pagination)
        .and_then(|request| Ok((request, optional_i32(&params, "accountId")?)));
    let (request, account_id) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => return fetch_failed(e),
    };
    let filter = PaymentFilter { account_id };
    let source = PaymentSource::new(state.payments.clone(), filter);
    payments_table(account_id).respond(&source, request.into()).await
}

/// Accounts offered by the form's select control
async fn account_choices(state: &AppState) -> CoreResult<Vec<account::Model>> {
    let request = PageRequest::new(0, state.config.pagination.max_take);
    Ok(state.accounts.list(request).await?.data)
}

/// HTMX: create form in the modal, preselecting `accountId` when given
pub async fn htmx_payment_create_form(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Response {
    let account_id = match optional_i32(&params, "accountId") {
        Ok(account_id) => account_id,
        Err(e) => return failure("Failed to open payment form", e),
    };
    let accounts = match account_choices(&state).await {
        Ok(accounts) => accounts,
        Err(e) => return failure("Failed to load accounts", e.into()),
    };
    let form = PaymentForm::for_account(account_id);
    Html(render_create_modal(
        &form,
        &FormErrors::new(),
        &accounts,
        account_id.is_some(),
    ))
    .into_response()
}

/// HTMX: submit the create form
pub async fn htmx_payment_store(State(state): State<AppState>, body: String) -> Response {
    let params = parse_form(&body);
    let form = PaymentForm::from_params(&params);
    let locked = field(&params, "locked") == "true";

    let (account_id, input) = match form.validate() {
        Ok(valid) => valid,
        Err(errors) => {
            return match account_choices(&state).await {
                Ok(accounts) => {
                    Html(render_create_modal(&form, &errors, &accounts, locked)).into_response()
                }
                Err(e) => failure("Failed to load accounts", e.into()),
            };
        }
    };

    match state.payments.create(account_id, input).await {
        Ok(payment) => {
            log::info!(
                "Payment {} created from admin form for account {}",
                payment.id,
                account_id
            );
            (
                notify("Payment created successfully!").event(REFRESH_PAYMENTS),
                Html(String::new()),
            )
                .into_response()
        }
        Err(e) => failure("Failed to create payment", e.into()),
    }
}

/// HTMX: status control change on a payment row
pub async fn htmx_payment_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: String,
) -> Response {
    let id = match parse_id("id", &id) {
        Ok(id) => id,
        Err(e) => return failure("Failed to update payment status", e),
    };
    let status = match field(&parse_form(&body), "status").parse::<PaymentStatus>() {
        Ok(status) => status,
        Err(message) => {
            return failure("Failed to update payment status", ApiError::bad_request(message))
        }
    };

    match state.payments.set_status(id, status).await {
        Ok(payment) => {
            log::info!("Payment {} moved to {}", payment.id, payment.status);
            (
                notify("Payment status updated successfully").event(REFRESH_PAYMENTS),
                Html(String::new()),
            )
                .into_response()
        }
        Err(e) => {
            // reload so the control shows the stored status again
            let error = ApiError::from(e);
            error.log();
            (
                error.status(),
                notify(format!(
                    "Failed to update payment status: {}",
                    error.user_message()
                ))
                .event(REFRESH_PAYMENTS),
                Html(String::new()),
            )
                .into_response()
        }
    }
}
