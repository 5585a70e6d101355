//! Account resource service

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    QuerySelect, Set,
};
use serde::Deserialize;

use crate::entities::account;
use crate::error::{CoreError, CoreResult};
use crate::pagination::{Page, PageRequest};
use crate::types::{nullable, required_text};

/// Input for creating an account
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    #[serde(default)]
    pub bank_account_number: Option<i64>,
}

/// Partial account update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub bank_account_number: Option<Option<i64>>,
}

impl AccountPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone_number.is_none()
            && self.bank_account_number.is_none()
    }
}

/// CRUD, listing and counting for accounts
#[derive(Debug, Clone)]
pub struct AccountService {
    db: DatabaseConnection,
}

impl AccountService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// One page of accounts in ascending id order, with the total count
    pub async fn list(&self, request: PageRequest) -> CoreResult<Page<account::Model>> {
        let select = account::Entity::find();
        let total = select.clone().count(&self.db).await?;
        let data = select
            .order_by_asc(account::Column::Id)
            .offset(request.skip)
            .limit(request.take)
            .all(&self.db)
            .await?;
        Ok(Page::new(data, total, request))
    }

    pub async fn get(&self, id: i32) -> CoreResult<Option<account::Model>> {
        Ok(account::Entity::find_by_id(id).one(&self.db).await?)
    }

    pub async fn create(&self, input: NewAccount) -> CoreResult<account::Model> {
        let active = account::ActiveModel {
            id: NotSet,
            name: Set(required_text("name", &input.name)?),
            address: Set(required_text("address", &input.address)?),
            phone_number: Set(required_text("phoneNumber", &input.phone_number)?),
            bank_account_number: Set(input.bank_account_number),
        };
        let model = active.insert(&self.db).await?;
        log::debug!("Created account {}", model.id);
        Ok(model)
    }

    /// Merge `patch` onto the stored account. Last writer wins.
    pub async fn update(&self, id: i32, patch: AccountPatch) -> CoreResult<account::Model> {
        let existing = self
            .get(id)
            .await?
            .ok_or(CoreError::AccountNotFound { id })?;
        if patch.is_empty() {
            return Ok(existing);
        }

        let mut active: account::ActiveModel = existing.into();
        if let Some(name) = patch.name {
            active.name = Set(required_text("name", &name)?);
        }
        if let Some(address) = patch.address {
            active.address = Set(required_text("address", &address)?);
        }
        if let Some(phone_number) = patch.phone_number {
            active.phone_number = Set(required_text("phoneNumber", &phone_number)?);
        }
        if let Some(bank_account_number) = patch.bank_account_number {
            active.bank_account_number = Set(bank_account_number);
        }

        let model = active.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => CoreError::AccountNotFound { id },
            other => other.into(),
        })?;
        log::debug!("Updated account {}", id);
        Ok(model)
    }

    pub async fn count(&self) -> CoreResult<u64> {
        Ok(account::Entity::find().count(&self.db).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use crate::error::ErrorCode;
    use paydesk_config::DatabaseConfig;

    async fn service() -> AccountService {
        let db = db::open(&DatabaseConfig::in_memory()).await.unwrap();
        AccountService::new(db)
    }

    fn new_account(name: &str) -> NewAccount {
        NewAccount {
            name: name.to_string(),
            address: "X".to_string(),
            phone_number: "1".to_string(),
            bank_account_number: Some(111),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = service().await;
        let created = service.create(new_account("A")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(created.bank_account_number, Some(111));

        let fetched = service.get(created.id).await.unwrap();
        assert_eq!(fetched, Some(created));
        assert_eq!(service.get(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields() {
        let service = service().await;
        let err = service.create(new_account("   ")).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationError);
        assert_eq!(service.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_pages_in_id_order() {
        let service = service().await;
        for i in 0..50 {
            service.create(new_account(&format!("Account {}", i))).await.unwrap();
        }

        let page = service.list(PageRequest::new(0, 10)).await.unwrap();
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.total, 50);
        assert_eq!(page.data[0].id, 1);

        let tail = service.list(PageRequest::new(45, 10)).await.unwrap();
        assert_eq!(tail.data.len(), 5);
        assert_eq!(tail.total, 50);
        assert!(tail.is_last_page());
        let ids: Vec<i32> = tail.data.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![46, 47, 48, 49, 50]);

        let again = service.list(PageRequest::new(45, 10)).await.unwrap();
        assert_eq!(again, tail);
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let service = service().await;
        let created = service.create(new_account("A")).await.unwrap();

        let patch = AccountPatch {
            address: Some("Y".to_string()),
            ..Default::default()
        };
        let updated = service.update(created.id, patch).await.unwrap();
        assert_eq!(updated.address, "Y");
        assert_eq!(updated.name, "A");
        assert_eq!(updated.phone_number, "1");
        assert_eq!(updated.bank_account_number, Some(111));
    }

    #[tokio::test]
    async fn test_update_clears_bank_account_with_null() {
        let service = service().await;
        let created = service.create(new_account("A")).await.unwrap();

        let patch: AccountPatch = serde_json::from_str(r#"{"bankAccountNumber": null}"#).unwrap();
        let updated = service.update(created.id, patch).await.unwrap();
        assert_eq!(updated.bank_account_number, None);
        assert_eq!(updated.name, "A");
    }

    #[tokio::test]
    async fn test_empty_patch_returns_stored_row() {
        let service = service().await;
        let created = service.create(new_account("A")).await.unwrap();
        let updated = service.update(created.id, AccountPatch::default()).await.unwrap();
        assert_eq!(updated, created);
    }

    #[tokio::test]
    async fn test_update_missing_account() {
        let service = service().await;
        let err = service.update(7, AccountPatch::default()).await.unwrap_err();
        assert!(matches!(err, CoreError::AccountNotFound { id: 7 }));
    }
}
