use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Size joined with its category name and product count
#[derive(Debug, Clone, FromRow)]
pub struct SizeWithCategory {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category_id: Uuid,
    pub category_name: String,
    pub product_count: i64,
    pub created_at: DateTime<Utc>,
}
