//! Payment entity - an outbound transfer request owned by one account.
//! `account_id` is the foreign key and is never changed after insert.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payment")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub amount: f64,
    pub notes: Option<String>,
    pub status: PaymentStatus,
    pub account_id: i32,
    pub recipient_name: String,
    pub recipient_bank_name: String,
    pub recipient_account_number: String,
}

/// Payment status; any value may overwrite any other
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    #[sea_orm(string_value = "PENDING")]
    Pending,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "PENDING",
            PaymentStatus::Approved => "APPROVED",
        }
    }

    /// Label shown in the admin UI
    pub fn label(&self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Approved => "Approved",
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(PaymentStatus::Pending),
            "APPROVED" => Ok(PaymentStatus::Approved),
            _ => Err(format!("Invalid payment status: {}", s)),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict"
    )]
    Account,
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_as_screaming_case() {
        assert_eq!(
            serde_json::to_value(PaymentStatus::Approved).unwrap(),
            serde_json::json!("APPROVED")
        );
        let status: PaymentStatus = serde_json::from_value(serde_json::json!("PENDING")).unwrap();
        assert_eq!(status, PaymentStatus::Pending);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("approved".parse::<PaymentStatus>(), Ok(PaymentStatus::Approved));
        assert!("REJECTED".parse::<PaymentStatus>().is_err());
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn test_model_json_is_camel_case() {
        let model = Model {
            id: 1,
            amount: 50.0,
            notes: None,
            status: PaymentStatus::Pending,
            account_id: 1,
            recipient_name: "R".to_string(),
            recipient_bank_name: "B".to_string(),
            recipient_account_number: "999".to_string(),
        };
        let json = serde_json::to_value(&model).unwrap();
        assert_eq!(json["accountId"], 1);
        assert_eq!(json["recipientBankName"], "B");
        assert_eq!(json["status"], "PENDING");
    }
}
