mod submission_service;

pub use submission_service::{
    NewSubmission, SubmissionChanges, SubmissionService, UploadedAnswerFile,
};
