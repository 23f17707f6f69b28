use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Note: This struct is for Swagger UI documentation only.
/// The actual handler uses axum's Multipart extractor directly.
#[derive(Debug, Deserialize, ToSchema)]
#[allow(dead_code)]
#[serde(rename_all = "camelCase")]
pub struct BulkUploadFormDto {
    /// Spreadsheet file (XLSX or CSV)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub file: Option<String>,
    /// Link to a publicly shared Google Sheet, used when no file is sent
    #[schema(example = "https://docs.google.com/spreadsheets/d/abc123/edit")]
    pub google_sheet_url: Option<String>,
    /// Category id applied to every row
    pub category_id: Option<String>,
    /// Size id applied to every row
    pub size_id: Option<String>,
}

/// Classification outcome of a single parsed row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RowStatus {
    Ready,
    Warning,
    Error,
}

impl Default for RowStatus {
    fn default() -> Self {
        RowStatus::Ready
    }
}

/// One row of the upload, as shown in the preview and echoed back on import
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowDto {
    pub row_number: usize,
    pub design_name: String,
    pub size: String,
    pub collection: String,
    pub image1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image4: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image5: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub status: RowStatus,
}

impl ImportRowDto {
    /// All image cells that carry a value, in column order
    pub fn image_urls(&self) -> Vec<&str> {
        let mut urls = vec![self.image1.as_str()];
        for extra in [&self.image2, &self.image3, &self.image4, &self.image5] {
            if let Some(url) = extra {
                urls.push(url.as_str());
            }
        }
        urls.retain(|u| !u.trim().is_empty());
        urls
    }
}

/// Aggregate counts over all previewed rows
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportStatsDto {
    pub total: usize,
    pub ready: usize,
    pub warnings: usize,
    pub errors: usize,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponseDto {
    pub products: Vec<ImportRowDto>,
    pub stats: ImportStatsDto,
    /// Name of the category override, when one was selected and resolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_size: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequestDto {
    pub products: Vec<ImportRowDto>,
    #[serde(default)]
    pub default_category: Option<String>,
    #[serde(default)]
    pub default_size: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResultDto {
    pub imported: usize,
    pub total: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponseDto {
    pub error: String,
}
