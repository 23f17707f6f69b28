use sqlx::PgPool;
use tracing::{error, info};
use uuid::Uuid;

use crate::features::imports::dtos::{
    ImportRequestDto, ImportResultDto, ImportRowDto, PreviewResponseDto,
};
use crate::features::imports::error::{ImportError, ImportResult};
use crate::features::imports::models::{CategoryRef, SizeRef};
use crate::features::imports::services::row_classifier::{
    self, resolve_category, resolve_size, ImportDefaults, SizeLookup,
};
use crate::features::imports::services::sheet_reader;
use crate::shared::validation::is_valid_http_url;

/// Bulk upload pipeline: preview parses and validates a spreadsheet
/// without writing anything, import persists rows the client sends back.
pub struct ImportService {
    pool: PgPool,
}

/// Multipart form contents of the preview request
#[derive(Debug, Default)]
pub struct PreviewPayload {
    pub file: Option<Vec<u8>>,
    pub sheet_url: Option<String>,
    pub category_id: Option<Uuid>,
    pub size_id: Option<Uuid>,
}

pub(crate) struct ProductInsert {
    pub name: String,
    pub size_id: Uuid,
    pub finish: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
    pub image_urls: Vec<String>,
}

pub(crate) enum RowPlan {
    Insert(ProductInsert),
    Skip(String),
}

impl ImportService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_taxonomy(&self) -> Result<(Vec<CategoryRef>, Vec<SizeRef>), sqlx::Error> {
        let categories =
            sqlx::query_as::<_, CategoryRef>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(&self.pool);
        let sizes = sqlx::query_as::<_, SizeRef>(
            "SELECT id, name, category_id FROM sizes ORDER BY name",
        )
        .fetch_all(&self.pool);

        tokio::try_join!(categories, sizes)
    }

    /// Parse the uploaded file or Google Sheet and classify every row
    /// against the current catalog
    pub async fn preview(&self, payload: PreviewPayload) -> ImportResult<PreviewResponseDto> {
        let bytes = if let Some(file) = payload.file {
            file
        } else if let Some(url) = payload.sheet_url.as_deref() {
            sheet_reader::fetch_google_sheet(url).await?
        } else {
            return Err(ImportError::BadRequest(
                "No file or Google Sheets URL provided".to_string(),
            ));
        };

        let rows = sheet_reader::parse_upload(&bytes)?;
        if rows.is_empty() {
            return Err(ImportError::BadRequest(
                "No data found in the file".to_string(),
            ));
        }

        let (categories, sizes) = self.load_taxonomy().await?;

        // Unknown override ids silently fall back to per-row resolution
        let default_category = payload
            .category_id
            .and_then(|id| categories.iter().find(|c| c.id == id));
        let default_size = payload
            .size_id
            .and_then(|id| sizes.iter().find(|s| s.id == id));
        let defaults = ImportDefaults {
            category: default_category,
            size: default_size,
        };

        let products: Vec<ImportRowDto> = rows
            .iter()
            .map(|row| row_classifier::classify_row(row, &defaults, &categories, &sizes))
            .collect();
        let stats = row_classifier::stats(&products);

        Ok(PreviewResponseDto {
            products,
            stats,
            default_category: default_category.map(|c| c.name.clone()),
            default_size: default_size.map(|s| s.name.clone()),
        })
    }

    /// Persist the confirmed rows one by one. A failing row is recorded
    /// and skipped, it never aborts the batch.
    pub async fn import(&self, request: ImportRequestDto) -> ImportResult<ImportResultDto> {
        if request.products.is_empty() {
            return Err(ImportError::BadRequest("No products to import".to_string()));
        }

        let (categories, sizes) = self.load_taxonomy().await?;

        let total = request.products.len();
        let mut imported = 0;
        let mut errors = Vec::new();

        for product in &request.products {
            let plan = plan_row(
                product,
                request.default_category.as_deref(),
                request.default_size.as_deref(),
                &categories,
                &sizes,
            );

            match plan {
                RowPlan::Insert(insert) => match self.insert_product(&insert).await {
                    Ok(product_id) => {
                        info!("Imported product {product_id} from row {}", product.row_number);
                        imported += 1;
                    }
                    Err(e) => {
                        error!("Failed to import row {}: {e}", product.row_number);
                        errors.push(format!("Row {}: Import failed", product.row_number));
                    }
                },
                RowPlan::Skip(message) => errors.push(message),
            }
        }

        Ok(ImportResultDto {
            imported,
            total,
            errors: (!errors.is_empty()).then_some(errors),
        })
    }

    async fn insert_product(&self, insert: &ProductInsert) -> Result<Uuid, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let product_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO products (name, description, finish, color, size_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&insert.name)
        .bind(&insert.description)
        .bind(&insert.finish)
        .bind(&insert.color)
        .bind(insert.size_id)
        .fetch_one(&mut *tx)
        .await?;

        for (position, url) in insert.image_urls.iter().enumerate() {
            sqlx::query(
                "INSERT INTO product_images (product_id, url, position) VALUES ($1, $2, $3)",
            )
            .bind(product_id)
            .bind(url)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(product_id)
    }
}

/// Decide what to do with one confirmed row. Resolution mirrors the
/// preview: defaults win over cell values, sizes resolve through the
/// category when the bare name spans several.
pub(crate) fn plan_row(
    product: &ImportRowDto,
    default_category: Option<&str>,
    default_size: Option<&str>,
    categories: &[CategoryRef],
    sizes: &[SizeRef],
) -> RowPlan {
    let category_id = default_category
        .or(product.category.as_deref())
        .and_then(|name| resolve_category(name, categories))
        .map(|c| c.id);

    let size_name = default_size.unwrap_or(&product.size);
    if size_name.trim().is_empty() {
        return RowPlan::Skip(format!("Row {}: Size not found", product.row_number));
    }

    let size = match resolve_size(size_name, sizes, category_id) {
        SizeLookup::Found(size) => size,
        SizeLookup::Ambiguous => {
            return RowPlan::Skip(format!(
                "Row {}: Size name is ambiguous",
                product.row_number
            ))
        }
        SizeLookup::NotFound => {
            return RowPlan::Skip(format!("Row {}: Size not found", product.row_number))
        }
    };

    let image_urls: Vec<String> = product
        .image_urls()
        .into_iter()
        .filter(|url| is_valid_http_url(url))
        .map(str::to_string)
        .collect();
    if image_urls.is_empty() {
        return RowPlan::Skip(format!("Row {}: No valid images", product.row_number));
    }

    RowPlan::Insert(ProductInsert {
        name: product.design_name.clone(),
        size_id: size.id,
        finish: non_empty(&product.collection),
        color: product.color.as_deref().and_then(non_empty),
        description: product.description.as_deref().and_then(non_empty),
        image_urls,
    })
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::imports::dtos::RowStatus;

    fn taxonomy() -> (Vec<CategoryRef>, Vec<SizeRef>) {
        let categories = vec![
            CategoryRef {
                id: Uuid::now_v7(),
                name: "Porcelain Tiles".to_string(),
            },
            CategoryRef {
                id: Uuid::now_v7(),
                name: "Wall Tiles".to_string(),
            },
        ];
        let sizes = vec![
            SizeRef {
                id: Uuid::now_v7(),
                name: "600x1200mm".to_string(),
                category_id: categories[0].id,
            },
            SizeRef {
                id: Uuid::now_v7(),
                name: "300x600mm".to_string(),
                category_id: categories[0].id,
            },
            SizeRef {
                id: Uuid::now_v7(),
                name: "300x600mm".to_string(),
                category_id: categories[1].id,
            },
        ];
        (categories, sizes)
    }

    fn row(number: usize, size: &str, image1: &str) -> ImportRowDto {
        ImportRowDto {
            row_number: number,
            design_name: "AMORA BLUE".to_string(),
            size: size.to_string(),
            collection: "GLOSSY".to_string(),
            image1: image1.to_string(),
            image2: None,
            image3: None,
            image4: None,
            image5: None,
            description: None,
            category: Some("Porcelain Tiles".to_string()),
            color: Some("Blue".to_string()),
            errors: Vec::new(),
            warnings: Vec::new(),
            status: RowStatus::Ready,
        }
    }

    #[test]
    fn plans_an_insert_for_a_resolvable_row() {
        let (categories, sizes) = taxonomy();
        let product = row(2, "600x1200mm", "https://example.com/a.jpg");

        match plan_row(&product, None, None, &categories, &sizes) {
            RowPlan::Insert(insert) => {
                assert_eq!(insert.name, "AMORA BLUE");
                assert_eq!(insert.size_id, sizes[0].id);
                assert_eq!(insert.finish.as_deref(), Some("GLOSSY"));
                assert_eq!(insert.image_urls, vec!["https://example.com/a.jpg"]);
            }
            RowPlan::Skip(message) => panic!("expected insert, got skip: {message}"),
        }
    }

    #[test]
    fn skips_rows_with_unknown_sizes() {
        let (categories, sizes) = taxonomy();
        let product = row(4, "450x450mm", "https://example.com/a.jpg");

        match plan_row(&product, None, None, &categories, &sizes) {
            RowPlan::Skip(message) => assert_eq!(message, "Row 4: Size not found"),
            RowPlan::Insert(_) => panic!("expected skip"),
        }
    }

    #[test]
    fn skips_rows_without_any_valid_image() {
        let (categories, sizes) = taxonomy();
        let mut product = row(5, "600x1200mm", "not-a-url");
        product.image2 = Some("also bad".to_string());

        match plan_row(&product, None, None, &categories, &sizes) {
            RowPlan::Skip(message) => assert_eq!(message, "Row 5: No valid images"),
            RowPlan::Insert(_) => panic!("expected skip"),
        }
    }

    #[test]
    fn default_size_overrides_the_row_value() {
        let (categories, sizes) = taxonomy();
        let product = row(2, "450x450mm", "https://example.com/a.jpg");

        match plan_row(&product, None, Some("600x1200mm"), &categories, &sizes) {
            RowPlan::Insert(insert) => assert_eq!(insert.size_id, sizes[0].id),
            RowPlan::Skip(message) => panic!("expected insert, got skip: {message}"),
        }
    }

    #[test]
    fn ambiguous_size_without_category_is_skipped() {
        let (categories, sizes) = taxonomy();
        let mut product = row(3, "300x600mm", "https://example.com/a.jpg");
        product.category = None;

        match plan_row(&product, None, None, &categories, &sizes) {
            RowPlan::Skip(message) => assert_eq!(message, "Row 3: Size name is ambiguous"),
            RowPlan::Insert(_) => panic!("expected skip"),
        }
    }

    #[test]
    fn category_narrows_a_size_shared_across_categories() {
        let (categories, sizes) = taxonomy();
        let mut product = row(3, "300x600mm", "https://example.com/a.jpg");
        product.category = Some("Wall Tiles".to_string());

        match plan_row(&product, None, None, &categories, &sizes) {
            RowPlan::Insert(insert) => assert_eq!(insert.size_id, sizes[2].id),
            RowPlan::Skip(message) => panic!("expected insert, got skip: {message}"),
        }
    }

    #[test]
    fn invalid_image_urls_are_dropped_but_valid_ones_keep_column_order() {
        let (categories, sizes) = taxonomy();
        let mut product = row(2, "600x1200mm", "https://example.com/a.jpg");
        product.image2 = Some("bad".to_string());
        product.image3 = Some("https://example.com/c.jpg".to_string());

        match plan_row(&product, None, None, &categories, &sizes) {
            RowPlan::Insert(insert) => {
                assert_eq!(
                    insert.image_urls,
                    vec!["https://example.com/a.jpg", "https://example.com/c.jpg"]
                );
            }
            RowPlan::Skip(message) => panic!("expected insert, got skip: {message}"),
        }
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let (categories, sizes) = taxonomy();
        let mut product = row(2, "600x1200mm", "https://example.com/a.jpg");
        product.collection = String::new();
        product.description = Some("  ".to_string());

        match plan_row(&product, None, None, &categories, &sizes) {
            RowPlan::Insert(insert) => {
                assert!(insert.finish.is_none());
                assert!(insert.description.is_none());
            }
            RowPlan::Skip(message) => panic!("expected insert, got skip: {message}"),
        }
    }
}
