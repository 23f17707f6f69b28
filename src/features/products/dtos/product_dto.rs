use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::products::models::{ProductImage, ProductWithContext};

/// Response DTO for a product image
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductImageDto {
    pub id: Uuid,
    pub url: String,
}

impl From<ProductImage> for ProductImageDto {
    fn from(i: ProductImage) -> Self {
        Self { id: i.id, url: i.url }
    }
}

/// Response DTO for product, including ordered images (first image is the main one)
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub finish: Option<String>,
    pub color: Option<String>,
    pub size_id: Uuid,
    pub size_name: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub images: Vec<ProductImageDto>,
    pub created_at: DateTime<Utc>,
}

impl ProductResponseDto {
    pub fn from_parts(product: ProductWithContext, images: Vec<ProductImage>) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            finish: product.finish,
            color: product.color,
            size_id: product.size_id,
            size_name: product.size_name,
            category_id: product.category_id,
            category_name: product.category_name,
            images: images.into_iter().map(|i| i.into()).collect(),
            created_at: product.created_at,
        }
    }
}

/// Query params for listing products
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListProductsQuery {
    /// Case-insensitive substring match on name or description
    pub search: Option<String>,
    /// Exact category name
    pub category: Option<String>,
    /// Exact size name
    pub size: Option<String>,
    pub finish: Option<String>,
    pub color: Option<String>,
}

/// Request DTO for creating a product; category and size are referenced by name
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductDto {
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub finish: Option<String>,
    pub color: Option<String>,
    pub category: String,
    pub size: String,
    /// Image URLs in display order; blank entries are skipped
    pub images: Vec<String>,
}
