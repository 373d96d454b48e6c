//! Lookup-store access layer
//!
//! The metadata store is a SQLite database with a single keyed table
//! (`Softwareinformationen`). Column names follow the upstream store,
//! which was built for a German inventory.

use crate::config::DbConfig;
use crate::Result;
use sqlx::SqlitePool;
use tracing::{info, warn};

mod software_info;
pub use software_info::{fetch_software_info, upsert_software_info, MetadataTriple};

/// Connect to the lookup store, creating the database file if missing
pub async fn connect(config: &DbConfig) -> Result<SqlitePool> {
    if let Some(parent) = config.database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    // mode=rwc: create on first run so a fresh install works without setup
    let db_url = format!("sqlite://{}?mode=rwc", config.database_path.display());
    let pool = SqlitePool::connect(&db_url).await?;

    Ok(pool)
}

/// Ensure the metadata table exists
///
/// An externally seeded store is left untouched; only a missing table is
/// created (empty, so every lookup misses until the store is populated).
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    let table_exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS(
            SELECT 1 FROM sqlite_master
            WHERE type='table' AND name='Softwareinformationen'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        warn!("Softwareinformationen table does not exist - creating empty table");

        sqlx::query(
            r#"
            CREATE TABLE Softwareinformationen (
                Softwarebezeichnung TEXT PRIMARY KEY,
                Softwarekategorie TEXT NOT NULL DEFAULT '',
                Fachbereich TEXT NOT NULL DEFAULT '',
                Softwarebeschreibung TEXT NOT NULL DEFAULT ''
            )
            "#,
        )
        .execute(pool)
        .await?;

        info!("Created Softwareinformationen table");
    }

    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory pool with the metadata schema applied
    pub async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        init_schema(&pool).await.unwrap();

        pool
    }
}
