//! Database module for SQLite persistence using SeaORM

pub mod entities;

use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};
use std::path::Path;

/// Initialize database connection and create tables
pub async fn init_database(db_path: &Path) -> Result<DatabaseConnection, DbErr> {
    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    tracing::info!("Connecting to database: {}", db_url);

    let db = Database::connect(&db_url).await?;

    create_tables(&db).await?;

    Ok(db)
}

async fn execute(db: &DatabaseConnection, sql: &str) -> Result<(), DbErr> {
    db.execute(Statement::from_string(db.get_database_backend(), sql.to_string()))
        .await?;
    Ok(())
}

/// Create all tables if they don't exist
async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    execute(db, "PRAGMA foreign_keys = ON").await?;

    // Filters table
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS filters (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL,
            "primary" TEXT NOT NULL DEFAULT 'No',
            typology TEXT NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0 CHECK (quantity >= 0)
        )
        "#,
    )
    .await?;

    // Cars table, one row per (make, model, engine)
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS cars (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            make TEXT NOT NULL,
            model TEXT NOT NULL,
            year TEXT NOT NULL,
            engine TEXT NOT NULL DEFAULT 'petrol',
            cylinders TEXT NOT NULL,
            oil_quantity REAL NOT NULL DEFAULT 0 CHECK (oil_quantity >= 0 AND oil_quantity <= 10000),
            oil_specific TEXT NOT NULL DEFAULT 'RN0710',
            UNIQUE(make, model, engine)
        )
        "#,
    )
    .await?;

    // Car/filter links (no uniqueness on the pair)
    execute(
        db,
        r#"
        CREATE TABLE IF NOT EXISTS car_filters (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            car_id INTEGER NOT NULL,
            filter_id INTEGER NOT NULL,
            FOREIGN KEY (car_id) REFERENCES cars(id) ON DELETE CASCADE,
            FOREIGN KEY (filter_id) REFERENCES filters(id) ON DELETE CASCADE
        )
        "#,
    )
    .await?;

    execute(db, "CREATE INDEX IF NOT EXISTS idx_car_filters_car ON car_filters(car_id)").await?;
    execute(db, "CREATE INDEX IF NOT EXISTS idx_car_filters_filter ON car_filters(filter_id)").await?;

    tracing::info!("Database tables initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init_database_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("warehouse.db");

        let db = init_database(&path).await.unwrap();
        create_tables(&db).await.unwrap();
        assert!(path.exists());
    }
}
