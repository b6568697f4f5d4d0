mod answer;
mod submission;

pub use answer::{
    append_file_urls, compute_timeliness, remove_file_urls, validate_scalar_answer, FieldAnswer,
    SubmissionData,
};
pub use submission::{
    ReportSubmission, SubmissionAttachment, SubmissionStatus, SubmissionWithContext, Timeliness,
};
