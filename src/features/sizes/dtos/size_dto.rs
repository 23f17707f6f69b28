use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::features::sizes::models::SizeWithCategory;

/// Response DTO for size
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SizeResponseDto {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub category_name: String,
    /// Number of products belonging to this size
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<SizeWithCategory> for SizeResponseDto {
    fn from(s: SizeWithCategory) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            category_id: s.category_id,
            category_name: s.category_name,
            product_count: s.product_count,
            created_at: s.created_at,
        }
    }
}

/// Request DTO for creating a size
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSizeDto {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
}

/// Request DTO for updating a size
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateSizeDto {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,
    pub description: Option<String>,
}
