mod catalog;

pub use catalog::CatalogWithContext;
