mod report_dto;

pub use report_dto::{
    CreateReportDto, ReportAttachmentDto, ReportDetailDto, ReportResponseDto, UploadFileDto,
};
