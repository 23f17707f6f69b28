use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::sizes::dtos::{CreateSizeDto, SizeResponseDto, UpdateSizeDto};
use crate::features::sizes::models::SizeWithCategory;

const SIZE_WITH_CATEGORY: &str = r#"
    SELECT s.id, s.name, s.description, s.category_id, c.name AS category_name,
           COUNT(p.id) AS product_count, s.created_at
    FROM sizes s
    JOIN categories c ON c.id = s.category_id
    LEFT JOIN products p ON p.size_id = s.id
"#;

/// Service for size operations
pub struct SizeService {
    pool: PgPool,
}

impl SizeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all sizes, newest first, with category name and product count
    pub async fn list(&self) -> Result<Vec<SizeResponseDto>> {
        let sizes = sqlx::query_as::<_, SizeWithCategory>(&format!(
            "{SIZE_WITH_CATEGORY} GROUP BY s.id, c.name ORDER BY s.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list sizes: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(sizes.into_iter().map(|s| s.into()).collect())
    }

    /// Get size by id
    pub async fn get(&self, id: Uuid) -> Result<SizeResponseDto> {
        let size = sqlx::query_as::<_, SizeWithCategory>(&format!(
            "{SIZE_WITH_CATEGORY} WHERE s.id = $1 GROUP BY s.id, c.name"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        size.map(|s| s.into())
            .ok_or_else(|| AppError::NotFound("Size not found".to_string()))
    }

    /// Create a size under an existing category
    pub async fn create(&self, dto: CreateSizeDto) -> Result<SizeResponseDto> {
        let category_exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
                .bind(dto.category_id)
                .fetch_one(&self.pool)
                .await?;

        if !category_exists {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO sizes (name, description, category_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.description.as_deref())
        .bind(dto.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(format!(
                "Size '{}' already exists in this category",
                dto.name.trim()
            )),
            _ => {
                tracing::error!("Failed to create size: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Size created: id={}, name={}", id, dto.name.trim());

        self.get(id).await
    }

    /// Update a size's name and description
    pub async fn update(&self, id: Uuid, dto: UpdateSizeDto) -> Result<SizeResponseDto> {
        let result = sqlx::query(
            r#"
            UPDATE sizes
            SET name = $2, description = $3, updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(dto.name.trim())
        .bind(dto.description.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::Conflict(format!(
                "Size '{}' already exists in this category",
                dto.name.trim()
            )),
            _ => AppError::Database(e),
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Size not found".to_string()));
        }

        self.get(id).await
    }

    /// Delete a size; rejected while it still owns products
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let product_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE size_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if product_count > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete size with {} products",
                product_count
            )));
        }

        let result = sqlx::query("DELETE FROM sizes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Size not found".to_string()));
        }

        tracing::info!("Size deleted: id={}", id);

        Ok(())
    }
}
