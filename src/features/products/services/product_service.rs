use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::products::dtos::{
    CreateProductDto, ListProductsQuery, ProductResponseDto,
};
use crate::features::products::models::{ProductImage, ProductWithContext};
use crate::shared::constants::SIMILAR_PRODUCTS_LIMIT;
use crate::shared::types::PaginationQuery;

const PRODUCT_WITH_CONTEXT: &str = r#"
    SELECT p.id, p.name, p.description, p.finish, p.color,
           p.size_id, s.name AS size_name,
           c.id AS category_id, c.name AS category_name,
           p.created_at
    FROM products p
    JOIN sizes s ON s.id = p.size_id
    JOIN categories c ON c.id = s.category_id
"#;

const LIST_FILTER: &str = r#"
    WHERE ($1::text IS NULL OR p.name ILIKE '%' || $1 || '%' OR p.description ILIKE '%' || $1 || '%')
      AND ($2::text IS NULL OR c.name = $2)
      AND ($3::text IS NULL OR s.name = $3)
      AND ($4::text IS NULL OR p.finish = $4)
      AND ($5::text IS NULL OR p.color = $5)
"#;

/// Service for product operations
pub struct ProductService {
    pool: PgPool,
}

impl ProductService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List products newest first, with optional filters and pagination.
    /// Returns the page plus the total matching count.
    pub async fn list(
        &self,
        query: ListProductsQuery,
        pagination: PaginationQuery,
    ) -> Result<(Vec<ProductResponseDto>, i64)> {
        let products = sqlx::query_as::<_, ProductWithContext>(&format!(
            "{PRODUCT_WITH_CONTEXT} {LIST_FILTER} ORDER BY p.created_at DESC LIMIT $6 OFFSET $7"
        ))
        .bind(query.search.as_deref())
        .bind(query.category.as_deref())
        .bind(query.size.as_deref())
        .bind(query.finish.as_deref())
        .bind(query.color.as_deref())
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list products: {:?}", e);
            AppError::Database(e)
        })?;

        let total: i64 = sqlx::query_scalar(&format!(
            r#"
            SELECT COUNT(*)
            FROM products p
            JOIN sizes s ON s.id = p.size_id
            JOIN categories c ON c.id = s.category_id
            {LIST_FILTER}
            "#
        ))
        .bind(query.search.as_deref())
        .bind(query.category.as_deref())
        .bind(query.size.as_deref())
        .bind(query.finish.as_deref())
        .bind(query.color.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok((self.attach_images(products).await?, total))
    }

    /// Get product by id with its ordered images
    pub async fn get(&self, id: Uuid) -> Result<ProductResponseDto> {
        let product = sqlx::query_as::<_, ProductWithContext>(&format!(
            "{PRODUCT_WITH_CONTEXT} WHERE p.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Product not found".to_string()))?;

        let mut products = self.attach_images(vec![product]).await?;
        Ok(products.remove(0))
    }

    /// Create a product with nested images; category and size are matched by name,
    /// the size within the resolved category
    pub async fn create(&self, dto: CreateProductDto) -> Result<ProductResponseDto> {
        let category_id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM categories WHERE name = $1")
                .bind(dto.category.trim())
                .fetch_optional(&self.pool)
                .await?;

        let category_id = category_id.ok_or_else(|| {
            AppError::NotFound(format!("Category '{}' not found", dto.category.trim()))
        })?;

        let size_id: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM sizes WHERE name = $1 AND category_id = $2")
                .bind(dto.size.trim())
                .bind(category_id)
                .fetch_optional(&self.pool)
                .await?;

        let size_id = size_id.ok_or_else(|| {
            AppError::NotFound(format!(
                "Size '{}' not found in category '{}'",
                dto.size.trim(),
                dto.category.trim()
            ))
        })?;

        let image_urls: Vec<&str> = dto
            .images
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .collect();

        let mut tx = self.pool.begin().await?;

        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, finish, color, size_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(dto.name.trim())
        .bind(dto.description.as_deref())
        .bind(dto.finish.as_deref())
        .bind(dto.color.as_deref())
        .bind(size_id)
        .fetch_one(&mut *tx)
        .await?;

        for (position, url) in image_urls.iter().enumerate() {
            sqlx::query("INSERT INTO product_images (url, product_id, position) VALUES ($1, $2, $3)")
                .bind(url)
                .bind(id)
                .bind(position as i32)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::info!("Product created: id={}, name={}", id, dto.name.trim());

        self.get(id).await
    }

    /// Delete a product; images are removed by the FK cascade
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Product not found".to_string()));
        }

        tracing::info!("Product deleted: id={}", id);

        Ok(())
    }

    /// Similar products by relaxation: size+finish+color, then size+finish,
    /// then size only, newest first, capped at SIMILAR_PRODUCTS_LIMIT
    pub async fn similar(&self, id: Uuid) -> Result<Vec<ProductResponseDto>> {
        let current = sqlx::query_as::<_, (Uuid, Option<String>, Option<String>)>(
            "SELECT size_id, finish, color FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some((size_id, finish, color)) = current else {
            return Ok(Vec::new());
        };

        let mut similar: Vec<ProductWithContext> = Vec::new();
        let mut exclude: Vec<Uuid> = vec![id];

        // Strict match first: same size, finish and color
        let remaining = SIMILAR_PRODUCTS_LIMIT;
        let batch = sqlx::query_as::<_, ProductWithContext>(&format!(
            "{PRODUCT_WITH_CONTEXT} \
             WHERE p.size_id = $1 AND p.finish IS NOT DISTINCT FROM $2 \
               AND p.color IS NOT DISTINCT FROM $3 AND p.id <> ALL($4) \
             ORDER BY p.created_at DESC LIMIT $5"
        ))
        .bind(size_id)
        .bind(finish.as_deref())
        .bind(color.as_deref())
        .bind(&exclude)
        .bind(remaining)
        .fetch_all(&self.pool)
        .await?;
        exclude.extend(batch.iter().map(|p| p.id));
        similar.extend(batch);

        // Relax color: same size and finish
        let remaining = SIMILAR_PRODUCTS_LIMIT - similar.len() as i64;
        if remaining > 0 {
            let batch = sqlx::query_as::<_, ProductWithContext>(&format!(
                "{PRODUCT_WITH_CONTEXT} \
                 WHERE p.size_id = $1 AND p.finish IS NOT DISTINCT FROM $2 \
                   AND p.id <> ALL($3) \
                 ORDER BY p.created_at DESC LIMIT $4"
            ))
            .bind(size_id)
            .bind(finish.as_deref())
            .bind(&exclude)
            .bind(remaining)
            .fetch_all(&self.pool)
            .await?;
            exclude.extend(batch.iter().map(|p| p.id));
            similar.extend(batch);
        }

        // Relax finish too: same size only
        let remaining = SIMILAR_PRODUCTS_LIMIT - similar.len() as i64;
        if remaining > 0 {
            let batch = sqlx::query_as::<_, ProductWithContext>(&format!(
                "{PRODUCT_WITH_CONTEXT} \
                 WHERE p.size_id = $1 AND p.id <> ALL($2) \
                 ORDER BY p.created_at DESC LIMIT $3"
            ))
            .bind(size_id)
            .bind(&exclude)
            .bind(remaining)
            .fetch_all(&self.pool)
            .await?;
            similar.extend(batch);
        }

        self.attach_images(similar).await
    }

    /// Batch-load ordered images for a set of products, preserving product order
    async fn attach_images(
        &self,
        products: Vec<ProductWithContext>,
    ) -> Result<Vec<ProductResponseDto>> {
        if products.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = products.iter().map(|p| p.id).collect();

        let images = sqlx::query_as::<_, ProductImage>(
            r#"
            SELECT id, url, product_id
            FROM product_images
            WHERE product_id = ANY($1)
            ORDER BY position
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        let mut by_product: HashMap<Uuid, Vec<ProductImage>> = HashMap::new();
        for image in images {
            by_product.entry(image.product_id).or_default().push(image);
        }

        Ok(products
            .into_iter()
            .map(|p| {
                let images = by_product.remove(&p.id).unwrap_or_default();
                ProductResponseDto::from_parts(p, images)
            })
            .collect())
    }
}
