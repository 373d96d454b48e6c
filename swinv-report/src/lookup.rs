//! SQL-backed metadata lookup
//!
//! Production implementation of [`MetadataLookup`] over the shared
//! SQLite store. Connection lifecycle belongs to the pool; this type
//! only borrows it per query.

use crate::aggregate::MetadataLookup;
use async_trait::async_trait;
use sqlx::SqlitePool;
use swinv_common::db::{fetch_software_info, MetadataTriple};
use swinv_common::Result;

/// Lookup collaborator backed by the Softwareinformationen table
pub struct SqlLookup {
    pool: SqlitePool,
}

impl SqlLookup {
    /// Wrap an existing connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MetadataLookup for SqlLookup {
    async fn fetch(&self, title: &str) -> Result<MetadataTriple> {
        // A miss is not an error: unknown titles get empty metadata
        Ok(fetch_software_info(&self.pool, title)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use swinv_common::db::{init_schema, upsert_software_info};

    async fn seeded_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();
        init_schema(&pool).await.unwrap();
        upsert_software_info(
            &pool,
            "Office",
            &MetadataTriple {
                category: "Büroanwendung".to_string(),
                department: "Verwaltung".to_string(),
                description: "Office-Paket".to_string(),
            },
        )
        .await
        .unwrap();
        pool
    }

    #[tokio::test]
    async fn test_known_title_resolves() {
        let lookup = SqlLookup::new(seeded_pool().await);

        let triple = lookup.fetch("Office").await.unwrap();

        assert_eq!(triple.category, "Büroanwendung");
        assert_eq!(triple.department, "Verwaltung");
    }

    #[tokio::test]
    async fn test_unknown_title_degrades_to_empty() {
        let lookup = SqlLookup::new(seeded_pool().await);

        let triple = lookup.fetch("No Such Software").await.unwrap();

        assert_eq!(triple, MetadataTriple::default());
    }
}
