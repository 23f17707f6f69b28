mod product;

pub use product::{ProductImage, ProductWithContext};
