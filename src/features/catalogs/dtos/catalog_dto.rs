use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::catalogs::models::CatalogWithContext;

/// Response DTO for catalog
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CatalogResponseDto {
    pub id: Uuid,
    pub title: String,
    pub pdf_url: String,
    pub thumbnail_url: Option<String>,
    pub size_id: Uuid,
    pub size_name: String,
    pub category_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<CatalogWithContext> for CatalogResponseDto {
    fn from(c: CatalogWithContext) -> Self {
        Self {
            id: c.id,
            title: c.title,
            pdf_url: c.pdf_url,
            thumbnail_url: c.thumbnail_url,
            size_id: c.size_id,
            size_name: c.size_name,
            category_name: c.category_name,
            created_at: c.created_at,
        }
    }
}

/// Query params for listing catalogs
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListCatalogsQuery {
    /// Restrict to catalogs of one size
    pub size_id: Option<Uuid>,
    /// Case-insensitive substring match on title
    pub search: Option<String>,
}

/// Request DTO for creating a catalog
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCatalogDto {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,
    #[validate(url(message = "pdf_url must be a valid URL"))]
    pub pdf_url: String,
    #[validate(url(message = "thumbnail_url must be a valid URL"))]
    pub thumbnail_url: Option<String>,
    pub size_id: Uuid,
}
