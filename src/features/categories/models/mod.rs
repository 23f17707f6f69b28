mod category;

pub use category::CategoryWithCounts;
