//! Database connection and schema bootstrap

use std::time::Duration;

use paydesk_config::DatabaseConfig;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Schema};

use crate::entities::{account, payment};
use crate::error::CoreResult;

/// Open a connection pool for the configured database
pub async fn connect(config: &DatabaseConfig) -> CoreResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(options).await?;
    log::debug!("Connected to database: {}", config.url);
    Ok(db)
}

/// Create the account and payment tables if they do not exist yet.
///
/// Account goes first since payment carries a foreign key to it.
pub async fn create_schema(db: &DatabaseConnection) -> CoreResult<()> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let account_table = schema
        .create_table_from_entity(account::Entity)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&account_table)).await?;

    let payment_table = schema
        .create_table_from_entity(payment::Entity)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&payment_table)).await?;

    log::info!("Database schema ready");
    Ok(())
}

/// Connect and make sure the schema exists
pub async fn open(config: &DatabaseConfig) -> CoreResult<DatabaseConnection> {
    let db = connect(config).await?;
    create_schema(&db).await?;
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{EntityTrait, PaginatorTrait};

    #[tokio::test]
    async fn test_open_creates_empty_tables() {
        let db = open(&DatabaseConfig::in_memory()).await.unwrap();
        assert_eq!(account::Entity::find().count(&db).await.unwrap(), 0);
        assert_eq!(payment::Entity::find().count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_schema_is_idempotent() {
        let db = open(&DatabaseConfig::in_memory()).await.unwrap();
        assert!(create_schema(&db).await.is_ok());
    }
}
