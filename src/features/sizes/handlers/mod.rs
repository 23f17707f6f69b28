mod size_handler;

pub use size_handler::*;
