//! Keyed metadata queries against the Softwareinformationen table

use crate::Result;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Categorical metadata for one software title
///
/// All fields default to empty strings when the store has no match for a
/// title; consumers never see a missing triple, only an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataTriple {
    /// Software category (Softwarekategorie)
    pub category: String,
    /// Owning department (Fachbereich)
    pub department: String,
    /// Free-text description (Softwarebeschreibung)
    pub description: String,
}

/// Fetch the metadata triple for one canonical title
///
/// Returns `Ok(None)` when the title has no row. A blank key cannot match
/// anything and short-circuits without touching the pool.
pub async fn fetch_software_info(
    pool: &SqlitePool,
    title: &str,
) -> Result<Option<MetadataTriple>> {
    if title.trim().is_empty() {
        return Ok(None);
    }

    let row = sqlx::query_as::<_, (String, String, String)>(
        r#"
        SELECT Softwarekategorie, Fachbereich, Softwarebeschreibung
        FROM Softwareinformationen
        WHERE Softwarebezeichnung = ?
        "#,
    )
    .bind(title)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|(category, department, description)| MetadataTriple {
        category,
        department,
        description,
    }))
}

/// Insert or update the metadata triple for a title
pub async fn upsert_software_info(
    pool: &SqlitePool,
    title: &str,
    info: &MetadataTriple,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO Softwareinformationen
            (Softwarebezeichnung, Softwarekategorie, Fachbereich, Softwarebeschreibung)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(Softwarebezeichnung) DO UPDATE SET
            Softwarekategorie = excluded.Softwarekategorie,
            Fachbereich = excluded.Fachbereich,
            Softwarebeschreibung = excluded.Softwarebeschreibung
        "#,
    )
    .bind(title)
    .bind(&info.category)
    .bind(&info.department)
    .bind(&info.description)
    .execute(pool)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::setup_test_db;

    fn sample_triple() -> MetadataTriple {
        MetadataTriple {
            category: "Grafikanwendung".to_string(),
            department: "Marketing".to_string(),
            description: "Bildbearbeitung".to_string(),
        }
    }

    #[tokio::test]
    async fn test_fetch_known_title() {
        let pool = setup_test_db().await;
        upsert_software_info(&pool, "Adobe Photoshop", &sample_triple())
            .await
            .unwrap();

        let info = fetch_software_info(&pool, "Adobe Photoshop")
            .await
            .unwrap();

        assert_eq!(info, Some(sample_triple()));
    }

    #[tokio::test]
    async fn test_fetch_unknown_title_returns_none() {
        let pool = setup_test_db().await;

        let info = fetch_software_info(&pool, "No Such Software")
            .await
            .unwrap();

        assert_eq!(info, None);
    }

    #[tokio::test]
    async fn test_blank_key_short_circuits() {
        let pool = setup_test_db().await;

        assert_eq!(fetch_software_info(&pool, "").await.unwrap(), None);
        assert_eq!(fetch_software_info(&pool, "   ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_upsert_overwrites_existing_row() {
        let pool = setup_test_db().await;
        upsert_software_info(&pool, "GIMP", &sample_triple())
            .await
            .unwrap();

        let updated = MetadataTriple {
            category: "Grafikanwendung".to_string(),
            department: "IT".to_string(),
            description: "Freie Bildbearbeitung".to_string(),
        };
        upsert_software_info(&pool, "GIMP", &updated).await.unwrap();

        let info = fetch_software_info(&pool, "GIMP").await.unwrap();
        assert_eq!(info, Some(updated));
    }
}
