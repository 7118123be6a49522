use sea_orm::{Database, DatabaseConnection, DbErr};
use std::env;

/// Connect using `DATABASE_URL`, falling back to a local SQLite file for
/// development. Postgres URLs work unchanged.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let db_url = env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./careers.db?mode=rwc".to_string());

    tracing::info!("Connecting to database");
    Database::connect(&db_url).await
}
