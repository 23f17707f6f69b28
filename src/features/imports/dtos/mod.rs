mod import_dto;

pub use import_dto::{
    BulkUploadFormDto, ErrorResponseDto, ImportRequestDto, ImportResultDto, ImportRowDto,
    ImportStatsDto, PreviewResponseDto, RowStatus,
};
