mod submission_dto;

pub use submission_dto::{
    AttachmentDownloadDto, CreateSubmissionDto, FieldOfficerDto, ReviewStatus, StatusFilter,
    StatusFilterQuery, SubmissionAttachmentDto, SubmissionResponseDto, UpdateStatusDto,
    UpdateSubmissionDto,
};
