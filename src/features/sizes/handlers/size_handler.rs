use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::sizes::dtos::{CreateSizeDto, SizeResponseDto, UpdateSizeDto};
use crate::features::sizes::services::SizeService;
use crate::shared::types::ApiResponse;

/// List all sizes with their category and product counts
#[utoipa::path(
    get,
    path = "/api/sizes",
    responses(
        (status = 200, description = "List of sizes", body = ApiResponse<Vec<SizeResponseDto>>),
    ),
    tag = "sizes"
)]
pub async fn list_sizes(
    State(service): State<Arc<SizeService>>,
) -> Result<Json<ApiResponse<Vec<SizeResponseDto>>>> {
    let sizes = service.list().await?;
    Ok(Json(ApiResponse::success(Some(sizes), None, None)))
}

/// Create a new size under a category
#[utoipa::path(
    post,
    path = "/api/sizes",
    request_body = CreateSizeDto,
    responses(
        (status = 201, description = "Size created", body = ApiResponse<SizeResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Category not found"),
        (status = 409, description = "Size name already exists in the category")
    ),
    tag = "sizes"
)]
pub async fn create_size(
    State(service): State<Arc<SizeService>>,
    Json(dto): Json<CreateSizeDto>,
) -> Result<(StatusCode, Json<ApiResponse<SizeResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let size = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(size), None, None)),
    ))
}

/// Update a size
#[utoipa::path(
    put,
    path = "/api/sizes/{id}",
    params(
        ("id" = Uuid, Path, description = "Size id")
    ),
    request_body = UpdateSizeDto,
    responses(
        (status = 200, description = "Size updated", body = ApiResponse<SizeResponseDto>),
        (status = 404, description = "Size not found"),
        (status = 409, description = "Size name already exists in the category")
    ),
    tag = "sizes"
)]
pub async fn update_size(
    State(service): State<Arc<SizeService>>,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateSizeDto>,
) -> Result<Json<ApiResponse<SizeResponseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let size = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(size), None, None)))
}

/// Delete a size; fails while it still owns products
#[utoipa::path(
    delete,
    path = "/api/sizes/{id}",
    params(
        ("id" = Uuid, Path, description = "Size id")
    ),
    responses(
        (status = 200, description = "Size deleted"),
        (status = 404, description = "Size not found"),
        (status = 409, description = "Size still owns products")
    ),
    tag = "sizes"
)]
pub async fn delete_size(
    State(service): State<Arc<SizeService>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Size deleted successfully".to_string()),
        None,
    )))
}
