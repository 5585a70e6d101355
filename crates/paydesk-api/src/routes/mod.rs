//! Route modules for the API server
//!
//! Each resource module follows the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON API endpoints
//! - form.rs: Form rendering and field checks
//! - page.rs: HTMX page rendering
//!
//! Shared building blocks:
//! - params: strict path/query integer parsing
//! - notify: `HX-Trigger` notifications and refresh events
//! - table: paginated table fragment
//! - forms: form decoding and field widgets

pub mod accounts;
pub mod forms;
pub mod notify;
pub mod params;
pub mod payments;
pub mod table;
