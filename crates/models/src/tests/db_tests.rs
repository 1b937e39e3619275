use crate::db::{connect_with_config, test_connection, DATABASE_URL};
use configs::DatabaseConfig;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use anyhow::Result;

use super::try_setup_db;

/// Test basic database connection
#[tokio::test]
async fn test_basic_connection() -> Result<()> {
    let Some(db) = try_setup_db().await else { return Ok(()) };

    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT 1 as test".to_string());
    let row = db.query_one(stmt).await?.expect("one row");
    let test_value: i32 = row.try_get("", "test")?;
    assert_eq!(test_value, 1);
    test_connection(&db).await?;
    Ok(())
}

/// Test connection with pool settings from configuration
#[tokio::test]
async fn test_custom_config_connection() -> Result<()> {
    if try_setup_db().await.is_none() {
        return Ok(());
    }

    let mut config = DatabaseConfig::from_url(DATABASE_URL.clone());
    config.max_connections = 5;
    config.min_connections = 1;
    config.connect_timeout_secs = 10;
    config.validate()?;

    let db = connect_with_config(&config).await?;
    let stmt = Statement::from_string(DatabaseBackend::Postgres, "SELECT current_database()".to_string());
    assert!(db.query_one(stmt).await?.is_some());
    Ok(())
}
