/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// BULK IMPORT CONSTANTS
// =============================================================================

/// Spreadsheet rows are numbered from 2: row 1 is the header row
pub const FIRST_DATA_ROW: usize = 2;

/// Cap for the similar-products relaxation search
pub const SIMILAR_PRODUCTS_LIMIT: i64 = 5;
