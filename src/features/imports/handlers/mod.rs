mod import_handler;

pub use import_handler::*;
