//! sea-orm entities for the two stored record types

pub mod account;
pub mod payment;

pub use payment::PaymentStatus;
