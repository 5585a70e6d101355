//! Payment routes
//!
//! Features:
//! - JSON CRUD with pagination and an optional account filter
//! - Paginated payment table with a per-row status control
//! - Create modal, optionally bound to one account
//!
//! Structure:
//! - api.rs: JSON API endpoints
//! - form.rs: Payment form
//! - page.rs: HTMX pages and form handlers

pub mod api;
pub mod form;
pub mod page;

pub use api::{api_payment_create, api_payment_get, api_payment_update, api_payments_list};
pub use page::{
    htmx_payment_create_form, htmx_payment_status, htmx_payment_store, htmx_payments_table,
    page_payments, payments_table, PaymentSource, REFRESH_PAYMENTS,
};
