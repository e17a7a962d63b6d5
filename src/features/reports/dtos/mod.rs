mod report_dto;

pub use report_dto::{
    AdvanceStatusDto, AssignOfficerDto, AttachResolutionDto, ReportResponseDto, ReportStatsDto,
    SubmitReportDto,
};
