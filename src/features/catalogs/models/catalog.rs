use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Catalog joined with its size and category names
#[derive(Debug, Clone, FromRow)]
pub struct CatalogWithContext {
    pub id: Uuid,
    pub title: String,
    pub pdf_url: String,
    pub thumbnail_url: Option<String>,
    pub size_id: Uuid,
    pub size_name: String,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}
