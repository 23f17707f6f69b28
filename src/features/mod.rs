pub mod catalogs;
pub mod categories;
pub mod imports;
pub mod products;
pub mod sizes;
