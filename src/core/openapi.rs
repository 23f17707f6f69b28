use utoipa::{Modify, OpenApi};

use crate::features::catalogs::{dtos as catalogs_dtos, handlers as catalogs_handlers};
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::imports::{dtos as imports_dtos, handlers as imports_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::sizes::{dtos as sizes_dtos, handlers as sizes_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::get_category,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Sizes
        sizes_handlers::list_sizes,
        sizes_handlers::create_size,
        sizes_handlers::update_size,
        sizes_handlers::delete_size,
        // Products
        products_handlers::list_products,
        products_handlers::get_product,
        products_handlers::create_product,
        products_handlers::delete_product,
        products_handlers::similar_products,
        // Catalogs
        catalogs_handlers::list_catalogs,
        catalogs_handlers::create_catalog,
        catalogs_handlers::delete_catalog,
        // Bulk upload
        imports_handlers::preview_bulk_upload,
        imports_handlers::import_products,
        imports_handlers::download_template,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CategoryResponseDto,
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Sizes
            sizes_dtos::SizeResponseDto,
            sizes_dtos::CreateSizeDto,
            sizes_dtos::UpdateSizeDto,
            ApiResponse<Vec<sizes_dtos::SizeResponseDto>>,
            ApiResponse<sizes_dtos::SizeResponseDto>,
            // Products
            products_dtos::ProductImageDto,
            products_dtos::ProductResponseDto,
            products_dtos::CreateProductDto,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<products_dtos::ProductResponseDto>,
            // Catalogs
            catalogs_dtos::CatalogResponseDto,
            catalogs_dtos::CreateCatalogDto,
            ApiResponse<Vec<catalogs_dtos::CatalogResponseDto>>,
            ApiResponse<catalogs_dtos::CatalogResponseDto>,
            // Bulk upload
            imports_dtos::BulkUploadFormDto,
            imports_dtos::RowStatus,
            imports_dtos::ImportRowDto,
            imports_dtos::ImportStatsDto,
            imports_dtos::PreviewResponseDto,
            imports_dtos::ImportRequestDto,
            imports_dtos::ImportResultDto,
            imports_dtos::ErrorResponseDto,
        )
    ),
    tags(
        (name = "categories", description = "Tile category management"),
        (name = "sizes", description = "Tile size management"),
        (name = "products", description = "Product catalog"),
        (name = "catalogs", description = "Downloadable PDF catalogs"),
        (name = "bulk-upload", description = "Spreadsheet bulk product import"),
    ),
    info(
        title = "Tilehub API",
        version = "0.1.0",
        description = "API documentation for the Tilehub catalog backend",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
