pub mod import_service;
pub mod row_classifier;
pub mod sheet_reader;
pub mod template;

pub use import_service::{ImportService, PreviewPayload};
