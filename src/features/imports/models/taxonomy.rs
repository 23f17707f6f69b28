use sqlx::FromRow;
use uuid::Uuid;

/// Category reference data, snapshotted once per preview/import call
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
}

/// Size reference data; category_id disambiguates size names shared
/// across categories
#[derive(Debug, Clone, FromRow)]
pub struct SizeRef {
    pub id: Uuid,
    pub name: String,
    pub category_id: Uuid,
}
