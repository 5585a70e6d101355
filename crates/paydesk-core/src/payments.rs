//! Payment resource service
//!
//! Payments always belong to an account. Creation checks the account
//! inside the insert transaction, and listing can be narrowed to one
//! account with the page total counted over the same filter.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};

use crate::entities::{account, payment, PaymentStatus};
use crate::error::{CoreError, CoreResult};
use crate::pagination::{Page, PageRequest};
use crate::types::{finite_amount, nullable, optional_text, required_text};

/// Optional narrowing of payment lists and counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentFilter {
    pub account_id: Option<i32>,
}

impl PaymentFilter {
    pub fn for_account(account_id: i32) -> Self {
        Self {
            account_id: Some(account_id),
        }
    }

    fn select(&self) -> Select<payment::Entity> {
        let mut select = payment::Entity::find();
        if let Some(account_id) = self.account_id {
            select = select.filter(payment::Column::AccountId.eq(account_id));
        }
        select
    }
}

/// A payment row together with its owning account
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentWithAccount {
    #[serde(flatten)]
    pub payment: payment::Model,
    pub account: Option<account::Model>,
}

/// Input for creating a payment. The owning account comes from the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub amount: f64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    pub recipient_name: String,
    pub recipient_bank_name: String,
    pub recipient_account_number: String,
}

/// Partial payment update. `accountId` is not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPatch {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<PaymentStatus>,
    #[serde(default)]
    pub recipient_name: Option<String>,
    #[serde(default)]
    pub recipient_bank_name: Option<String>,
    #[serde(default)]
    pub recipient_account_number: Option<String>,
}

impl PaymentPatch {
    /// Patch that only moves the status
    pub fn status(status: PaymentStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.notes.is_none()
            && self.status.is_none()
            && self.recipient_name.is_none()
            && self.recipient_bank_name.is_none()
            && self.recipient_account_number.is_none()
    }
}

/// CRUD, listing and counting for payments
#[derive(Debug, Clone)]
pub struct PaymentService {
    db: DatabaseConnection,
}

impl PaymentService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// One page of payments in ascending id order, each with its account.
    /// `total` counts every payment matching `filter`.
    pub async fn list(
        &self,
        filter: PaymentFilter,
        request: PageRequest,
    ) -> CoreResult<Page<PaymentWithAccount>> {
        let total = filter.select().count(&self.db).await?;
        let rows = filter
            .select()
            .find_also_related(account::Entity)
            .order_by_asc(payment::Column::Id)
            .offset(request.skip)
            .limit(request.take)
            .all(&self.db)
            .await?;

        let data = rows
            .into_iter()
            .map(|(payment, account)| PaymentWithAccount { payment, account })
            .collect();
        Ok(Page::new(data, total, request))
    }

    pub async fn get(&self, id: i32) -> CoreResult<Option<payment::Model>> {
        Ok(payment::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn count(&self, filter: PaymentFilter) -> CoreResult<u64> {
        Ok(filter.select().count(&self.db).await?)
    }

    /// Insert a payment for `account_id`.
    ///
    /// Fails with `AccountNotFound` and writes nothing when the account
    /// does not exist.
    pub async fn create(&self, account_id: i32, input: NewPayment) -> CoreResult<payment::Model> {
        let active = payment::ActiveModel {
            id: NotSet,
            amount: Set(finite_amount(input.amount)?),
            notes: Set(optional_text(input.notes)),
            status: Set(input.status.unwrap_or_default()),
            account_id: Set(account_id),
            recipient_name: Set(required_text("recipientName", &input.recipient_name)?),
            recipient_bank_name: Set(required_text(
                "recipientBankName",
                &input.recipient_bank_name,
            )?),
            recipient_account_number: Set(required_text(
                "recipientAccountNumber",
                &input.recipient_account_number,
            )?),
        };

        let txn = self.db.begin().await?;
        if account::Entity::find_by_id(account_id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Err(CoreError::AccountNotFound { id: account_id });
        }
        let model = active.insert(&txn).await?;
        txn.commit().await?;

        log::debug!("Created payment {} for account {}", model.id, account_id);
        Ok(model)
    }

    /// Merge `patch` onto the stored payment. Last writer wins.
    pub async fn update(&self, id: i32, patch: PaymentPatch) -> CoreResult<payment::Model> {
        let existing = self
            .get(id)
            .await?
            .ok_or(CoreError::PaymentNotFound { id })?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let mut active: payment::ActiveModel = existing.into();
        if let Some(amount) = patch.amount {
            active.amount = Set(finite_amount(amount)?);
        }
        if let Some(notes) = patch.notes {
            active.notes = Set(optional_text(notes));
        }
        if let Some(status) = patch.status {
            active.status = Set(status);
        }
        if let Some(name) = patch.recipient_name {
            active.recipient_name = Set(required_text("recipientName", &name)?);
        }
        if let Some(bank) = patch.recipient_bank_name {
            active.recipient_bank_name = Set(required_text("recipientBankName", &bank)?);
        }
        if let Some(number) = patch.recipient_account_number {
            active.recipient_account_number = Set(required_text("recipientAccountNumber", &number)?);
        }

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CoreError::PaymentNotFound { id },
            other => other.into(),
        })?;
        log::debug!("Updated payment {}", id);
        Ok(model)
    }

    /// Overwrite the status; either direction is allowed
    pub async fn set_status(&self, id: i32, status: PaymentStatus) -> CoreResult<payment::Model> {
        self.update(id, PaymentPatch::status(status)).await
    }
}
