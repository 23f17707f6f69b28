use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::features::imports::dtos::{
    BulkUploadFormDto, ErrorResponseDto, ImportRequestDto, ImportResultDto, PreviewResponseDto,
};
use crate::features::imports::error::{ImportError, ImportResult};
use crate::features::imports::services::template::{
    build_template, TEMPLATE_CONTENT_TYPE, TEMPLATE_FILENAME,
};
use crate::features::imports::services::{ImportService, PreviewPayload};

/// Parse and validate a spreadsheet upload without persisting anything
#[utoipa::path(
    post,
    path = "/api/products/bulk-upload/preview",
    request_body(
        content = BulkUploadFormDto,
        content_type = "multipart/form-data",
        description = "Spreadsheet upload with optional default category/size overrides",
    ),
    responses(
        (status = 200, description = "Preview of parsed rows", body = PreviewResponseDto),
        (status = 400, description = "Missing or unreadable upload", body = ErrorResponseDto)
    ),
    tag = "bulk-upload"
)]
pub async fn preview_bulk_upload(
    State(service): State<Arc<ImportService>>,
    mut multipart: Multipart,
) -> ImportResult<Json<PreviewResponseDto>> {
    let mut payload = PreviewPayload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ImportError::BadRequest(format!("Invalid multipart payload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ImportError::BadRequest(format!("Failed to read file: {e}")))?;
                if !bytes.is_empty() {
                    payload.file = Some(bytes.to_vec());
                }
            }
            "googleSheetUrl" => {
                let text = field.text().await.map_err(|e| {
                    ImportError::BadRequest(format!("Failed to read form field: {e}"))
                })?;
                if !text.trim().is_empty() {
                    payload.sheet_url = Some(text);
                }
            }
            // Malformed ids just mean no default is applied
            "categoryId" => {
                payload.category_id = field.text().await.ok().and_then(|t| t.trim().parse().ok());
            }
            "sizeId" => {
                payload.size_id = field.text().await.ok().and_then(|t| t.trim().parse().ok());
            }
            _ => {}
        }
    }

    let preview = service.preview(payload).await?;
    Ok(Json(preview))
}

/// Persist rows the client confirmed in the preview
#[utoipa::path(
    post,
    path = "/api/products/bulk-upload/import",
    request_body = ImportRequestDto,
    responses(
        (status = 200, description = "Import outcome with per-row errors", body = ImportResultDto),
        (status = 400, description = "Empty batch", body = ErrorResponseDto)
    ),
    tag = "bulk-upload"
)]
pub async fn import_products(
    State(service): State<Arc<ImportService>>,
    Json(request): Json<ImportRequestDto>,
) -> ImportResult<Json<ImportResultDto>> {
    let result = service.import(request).await?;
    Ok(Json(result))
}

/// Download the XLSX upload template
#[utoipa::path(
    get,
    path = "/api/products/bulk-upload/template",
    responses(
        (status = 200, description = "XLSX template file"),
        (status = 500, description = "Template generation failed", body = ErrorResponseDto)
    ),
    tag = "bulk-upload"
)]
pub async fn download_template() -> Response {
    match build_template() {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, TEMPLATE_CONTENT_TYPE.to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename={TEMPLATE_FILENAME}"),
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("Template generation error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponseDto {
                    error: "Failed to generate template".to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::get, Router};
    use axum_test::TestServer;

    #[tokio::test]
    async fn template_download_sets_attachment_headers() {
        let app = Router::new().route(
            "/api/products/bulk-upload/template",
            get(download_template),
        );
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/products/bulk-upload/template").await;

        response.assert_status_ok();
        assert_eq!(
            response.header(header::CONTENT_TYPE),
            TEMPLATE_CONTENT_TYPE
        );
        assert_eq!(
            response.header(header::CONTENT_DISPOSITION),
            "attachment; filename=bulk-upload-template.xlsx"
        );
        assert!(response.as_bytes().starts_with(b"PK\x03\x04"));
    }
}
