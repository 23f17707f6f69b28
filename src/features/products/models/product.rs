use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Product joined with its size and category names
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithContext {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub finish: Option<String>,
    pub color: Option<String>,
    pub size_id: Uuid,
    pub size_name: String,
    pub category_id: Uuid,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}

/// Database model for a product image, always loaded in position order
#[derive(Debug, Clone, FromRow)]
pub struct ProductImage {
    pub id: Uuid,
    pub url: String,
    pub product_id: Uuid,
}
