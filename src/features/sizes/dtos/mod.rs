mod size_dto;

pub use size_dto::{CreateSizeDto, SizeResponseDto, UpdateSizeDto};
