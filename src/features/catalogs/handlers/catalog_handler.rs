use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::catalogs::dtos::{CatalogResponseDto, CreateCatalogDto, ListCatalogsQuery};
use crate::features::catalogs::services::CatalogService;
use crate::shared::types::ApiResponse;

/// List catalogs with optional size/search filters
#[utoipa::path(
    get,
    path = "/api/catalogs",
    params(ListCatalogsQuery),
    responses(
        (status = 200, description = "List of catalogs", body = ApiResponse<Vec<CatalogResponseDto>>),
    ),
    tag = "catalogs"
)]
pub async fn list_catalogs(
    State(service): State<Arc<CatalogService>>,
    Query(query): Query<ListCatalogsQuery>,
) -> Result<Json<ApiResponse<Vec<CatalogResponseDto>>>> {
    let catalogs = service.list(query).await?;
    Ok(Json(ApiResponse::success(Some(catalogs), None, None)))
}

/// Create a catalog bound to a size
#[utoipa::path(
    post,
    path = "/api/catalogs",
    request_body = CreateCatalogDto,
    responses(
        (status = 201, description = "Catalog created", body = ApiResponse<CatalogResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Size not found")
    ),
    tag = "catalogs"
)]
pub async fn create_catalog(
    State(service): State<Arc<CatalogService>>,
    Json(dto): Json<CreateCatalogDto>,
) -> Result<(StatusCode, Json<ApiResponse<CatalogResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let catalog = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(catalog), None, None)),
    ))
}

/// Delete a catalog
#[utoipa::path(
    delete,
    path = "/api/catalogs/{id}",
    params(
        ("id" = Uuid, Path, description = "Catalog id")
    ),
    responses(
        (status = 200, description = "Catalog deleted"),
        (status = 404, description = "Catalog not found")
    ),
    tag = "catalogs"
)]
pub async fn delete_catalog(
    State(service): State<Arc<CatalogService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Catalog deleted successfully".to_string()),
        None,
    )))
}
