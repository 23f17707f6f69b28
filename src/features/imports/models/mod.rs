mod taxonomy;

pub use taxonomy::{CategoryRef, SizeRef};
