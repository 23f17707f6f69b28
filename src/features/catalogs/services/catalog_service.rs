use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::catalogs::dtos::{CatalogResponseDto, CreateCatalogDto, ListCatalogsQuery};
use crate::features::catalogs::models::CatalogWithContext;

const CATALOG_WITH_CONTEXT: &str = r#"
    SELECT k.id, k.title, k.pdf_url, k.thumbnail_url,
           k.size_id, s.name AS size_name, c.name AS category_name,
           k.created_at
    FROM catalogs k
    JOIN sizes s ON s.id = k.size_id
    JOIN categories c ON c.id = s.category_id
"#;

/// Service for catalog operations
pub struct CatalogService {
    pool: PgPool,
}

impl CatalogService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List catalogs newest first, with optional size/search filters
    pub async fn list(&self, query: ListCatalogsQuery) -> Result<Vec<CatalogResponseDto>> {
        let catalogs = sqlx::query_as::<_, CatalogWithContext>(&format!(
            r#"
            {CATALOG_WITH_CONTEXT}
            WHERE ($1::uuid IS NULL OR k.size_id = $1)
              AND ($2::text IS NULL OR k.title ILIKE '%' || $2 || '%')
            ORDER BY k.created_at DESC
            "#
        ))
        .bind(query.size_id)
        .bind(query.search.as_deref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list catalogs: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(catalogs.into_iter().map(|c| c.into()).collect())
    }

    /// Create a catalog for an existing size
    pub async fn create(&self, dto: CreateCatalogDto) -> Result<CatalogResponseDto> {
        let size_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM sizes WHERE id = $1)")
                .bind(dto.size_id)
                .fetch_one(&self.pool)
                .await?;

        if !size_exists {
            return Err(AppError::NotFound("Size not found".to_string()));
        }

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO catalogs (title, pdf_url, thumbnail_url, size_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(dto.title.trim())
        .bind(dto.pdf_url.trim())
        .bind(dto.thumbnail_url.as_deref())
        .bind(dto.size_id)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Catalog created: id={}, title={}", id, dto.title.trim());

        let catalog = sqlx::query_as::<_, CatalogWithContext>(&format!(
            "{CATALOG_WITH_CONTEXT} WHERE k.id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(catalog.into())
    }

    /// Delete a catalog
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM catalogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Catalog not found".to_string()));
        }

        tracing::info!("Catalog deleted: id={}", id);

        Ok(())
    }
}
