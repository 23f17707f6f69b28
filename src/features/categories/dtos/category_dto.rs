use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::categories::models::CategoryWithCounts;

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Number of sizes owned by this category
    pub size_count: i64,
    /// Number of products reachable through this category's sizes
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<CategoryWithCounts> for CategoryResponseDto {
    fn from(c: CategoryWithCounts) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            size_count: c.size_count,
            product_count: c.product_count,
            created_at: c.created_at,
        }
    }
}

/// Request DTO for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryDto {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,
    pub description: Option<String>,
}

/// Request DTO for updating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCategoryDto {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,
    pub description: Option<String>,
}
