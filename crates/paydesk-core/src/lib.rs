//! Core persistence and business logic for paydesk
//!
//! This crate owns the stored records (accounts and their payments), the
//! offset pagination contract and the resource services the HTTP layer
//! and the admin pages call into.

pub mod accounts;
pub mod db;
pub mod entities;
pub mod error;
pub mod pagination;
pub mod payments;
pub mod seed;
pub mod types;

pub use accounts::{AccountPatch, AccountService, NewAccount};
pub use entities::{account, payment, PaymentStatus};
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use pagination::{Page, PageRequest};
pub use payments::{NewPayment, PaymentFilter, PaymentPatch, PaymentService, PaymentWithAccount};

/// Re-exported so callers can hold a pool without naming sea-orm
pub use sea_orm::DatabaseConnection;
