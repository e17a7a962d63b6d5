mod officer_dto;

pub use officer_dto::OfficerResponseDto;
