mod form_schema;
mod report;

pub use form_schema::{validate_form_schema, FieldType, FormField};
pub use report::{Report, ReportAttachment, ReportWithSubmissionStatus};
