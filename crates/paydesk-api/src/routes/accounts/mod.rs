//! Account routes
//!
//! Features:
//! - JSON CRUD with pagination
//! - Paginated account table with a create modal
//! - Account page with an edit form and that account's payments
//!
//! Structure:
//! - api.rs: JSON API endpoints
//! - form.rs: Account form
//! - page.rs: HTMX pages and form handlers

pub mod api;
pub mod form;
pub mod page;

pub use api::{api_account_create, api_account_get, api_account_update, api_accounts_list};
pub use page::{
    htmx_account_create_form, htmx_account_store, htmx_account_update, htmx_accounts_table,
    page_account_detail, page_accounts, AccountSource, REFRESH_ACCOUNTS,
};
