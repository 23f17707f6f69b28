mod size;

pub use size::SizeWithCategory;
