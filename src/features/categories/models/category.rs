use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Category joined with aggregate counts of owned sizes and products
#[derive(Debug, Clone, FromRow)]
pub struct CategoryWithCounts {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub size_count: i64,
    pub product_count: i64,
}
