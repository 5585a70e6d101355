//! Demo data for a fresh database

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::accounts::{AccountService, NewAccount};
use crate::entities::PaymentStatus;
use crate::error::{CoreError, CoreResult};
use crate::payments::{NewPayment, PaymentService};

pub const DEFAULT_ACCOUNTS: usize = 50;
pub const DEFAULT_PAYMENTS: usize = 200;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Chloe", "Dmitri", "Elena", "Farid", "Grace", "Hiro", "Ines", "Jonas", "Kara",
    "Luis", "Mira", "Nils", "Olga", "Priya", "Quinn", "Rosa", "Sami", "Tomas",
];

const LAST_NAMES: &[&str] = &[
    "Almeida", "Brandt", "Costa", "Dubois", "Eriksen", "Fischer", "Garcia", "Haddad", "Ivanova",
    "Jensen", "Kowalski", "Larsen", "Moreau", "Novak", "Okafor", "Petrov",
];

const STREETS: &[&str] = &[
    "Maple Street", "Harbor Road", "Station Avenue", "Mill Lane", "Church Street", "Park Drive",
    "River Walk", "Hill Crescent",
];

const BANK_PREFIXES: &[&str] = &[
    "First Union", "Northwind", "Bluewater", "Summit", "Granite", "Meridian", "Oakridge", "Pioneer",
];

const NOTES: &[&str] = &[
    "Monthly invoice settlement",
    "Quarterly supplier payment",
    "Refund for returned goods",
    "Consulting services",
    "Office rent",
    "Travel reimbursement",
];

/// Rows written by a seeding run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub accounts: usize,
    pub payments: usize,
}

fn full_name<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {}",
        FIRST_NAMES.choose(rng).copied().unwrap_or("Alex"),
        LAST_NAMES.choose(rng).copied().unwrap_or("Smith")
    )
}

fn random_account<R: Rng>(rng: &mut R) -> NewAccount {
    NewAccount {
        name: full_name(rng),
        address: format!(
            "{} {}",
            rng.gen_range(1..=999),
            STREETS.choose(rng).copied().unwrap_or("Main Street")
        ),
        phone_number: format!(
            "+1 {:03}-{:03}-{:04}",
            rng.gen_range(200..1000),
            rng.gen_range(0..1000),
            rng.gen_range(0..10000)
        ),
        bank_account_number: Some(rng.gen_range(10_000_000..=99_999_999)),
    }
}

fn random_payment<R: Rng>(rng: &mut R) -> NewPayment {
    let cents: i64 = rng.gen_range(1_000..=100_000);
    let notes = if rng.gen_bool(0.7) {
        NOTES.choose(rng).map(|n| n.to_string())
    } else {
        None
    };
    let status = if rng.gen_bool(0.5) {
        PaymentStatus::Pending
    } else {
        PaymentStatus::Approved
    };
    NewPayment {
        amount: cents as f64 / 100.0,
        notes,
        status: Some(status),
        recipient_name: full_name(rng),
        recipient_bank_name: format!(
            "{} Bank",
            BANK_PREFIXES.choose(rng).copied().unwrap_or("Central")
        ),
        recipient_account_number: format!("{:08}", rng.gen_range(0..100_000_000)),
    }
}

/// Insert `accounts` random accounts, then `payments` random payments
/// spread over them.
pub async fn seed_with<R: Rng + Send>(
    accounts: &AccountService,
    payments: &PaymentService,
    rng: &mut R,
    account_count: usize,
    payment_count: usize,
) -> CoreResult<SeedSummary> {
    let mut account_ids = Vec::with_capacity(account_count);
    for _ in 0..account_count {
        let account = accounts.create(random_account(rng)).await?;
        account_ids.push(account.id);
    }

    if payment_count > 0 && account_ids.is_empty() {
        return Err(CoreError::validation(
            "cannot seed payments without any accounts",
        ));
    }

    for _ in 0..payment_count {
        let owner = account_ids[rng.gen_range(0..account_ids.len())];
        payments.create(owner, random_payment(rng)).await?;
    }

    log::info!(
        "Seeded {} accounts and {} payments",
        account_count,
        payment_count
    );
    Ok(SeedSummary {
        accounts: account_count,
        payments: payment_count,
    })
}

/// Seed the default demo volume from an entropy-seeded generator
pub async fn seed_demo(
    accounts: &AccountService,
    payments: &PaymentService,
) -> CoreResult<SeedSummary> {
    let mut rng = StdRng::from_entropy();
    seed_with(accounts, payments, &mut rng, DEFAULT_ACCOUNTS, DEFAULT_PAYMENTS).await
}
