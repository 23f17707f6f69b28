use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::features::categories::models::CategoryWithCounts;

const CATEGORY_WITH_COUNTS: &str = r#"
    SELECT c.id, c.name, c.description, c.created_at,
           COUNT(DISTINCT s.id) AS size_count,
           COUNT(p.id) AS product_count
    FROM categories c
    LEFT JOIN sizes s ON s.category_id = c.id
    LEFT JOIN products p ON p.size_id = s.id
"#;

/// Service for category operations
pub struct CategoryService {
    pool: PgPool,
}

impl CategoryService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List all categories, newest first, with size/product counts
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = sqlx::query_as::<_, CategoryWithCounts>(&format!(
            "{CATEGORY_WITH_COUNTS} GROUP BY c.id ORDER BY c.created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list categories: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(categories.into_iter().map(|c| c.into()).collect())
    }

    /// Get category by id
    pub async fn get(&self, id: Uuid) -> Result<CategoryResponseDto> {
        let category = sqlx::query_as::<_, CategoryWithCounts>(&format!(
            "{CATEGORY_WITH_COUNTS} WHERE c.id = $1 GROUP BY c.id"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        category
            .map(|c| c.into())
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// Create a new category; the name must be unique
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let created = sqlx::query_as::<_, CategoryWithCounts>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description, created_at,
                      0::bigint AS size_count, 0::bigint AS product_count
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.description.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Category '{}' already exists", dto.name.trim()))
            }
            _ => {
                tracing::error!("Failed to create category: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("Category created: id={}, name={}", created.id, created.name);

        Ok(created.into())
    }

    /// Update a category's name and description
    pub async fn update(&self, id: Uuid, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let result = sqlx::query(
            r#"
            UPDATE categories
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
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                AppError::Conflict(format!("Category '{}' already exists", dto.name.trim()))
            }
            _ => AppError::Database(e),
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        self.get(id).await
    }

    /// Delete a category; rejected while it still owns sizes
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let size_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sizes WHERE category_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        if size_count > 0 {
            return Err(AppError::Conflict(format!(
                "Cannot delete category with {} sizes",
                size_count
            )));
        }

        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        tracing::info!("Category deleted: id={}", id);

        Ok(())
    }
}
