//! Notification payload shaping.
//!
//! Each builder produces the JSON document persisted with the notification
//! row and consumed verbatim by the recipient's in-app feed.

use serde_json::{json, Value};
use uuid::Uuid;

/// A new report was added to a program the field officer serves
pub fn new_report_added(report_id: Uuid, report_title: &str, action_url: &str) -> Value {
    json!({
        "type": "new_report_submission_required",
        "title": "New report submission required",
        "message": format!(
            "A new report \"{}\" has been assigned to you. Please submit it before the deadline.",
            report_title
        ),
        "report_id": report_id,
        "report_title": report_title,
        "action_url": action_url,
        "icon": "document",
    })
}

/// Receipt confirmation for the submitting field officer
pub fn submission_confirmation(
    submission_id: Uuid,
    report_id: Uuid,
    program_id: Uuid,
    report_title: &str,
    action_url: &str,
) -> Value {
    json!({
        "type": "report_submission_confirmation",
        "title": "Report Successfully Submitted",
        "message": format!(
            "Your report \"{}\" has been submitted successfully and is awaiting review",
            report_title
        ),
        "report_submission_id": submission_id,
        "report_id": report_id,
        "program_id": program_id,
        "action_url": action_url,
    })
}

/// New-submission announcement for the report's coordinator
pub fn submission_received(
    submission_id: Uuid,
    report_id: Uuid,
    program_id: Uuid,
    report_title: &str,
    officer_name: &str,
    action_url: &str,
) -> Value {
    json!({
        "type": "report_submission_submitted",
        "title": "New Report Submission",
        "message": format!("{} submitted a report for \"{}\"", officer_name, report_title),
        "report_submission_id": submission_id,
        "report_id": report_id,
        "program_id": program_id,
        "submitted_by": officer_name,
        "action_url": action_url,
        "icon": "document",
        "priority": "high",
    })
}

/// The coordinator accepted the submission
pub fn submission_accepted(submission_id: Uuid, report_title: &str, action_url: &str) -> Value {
    json!({
        "type": "report_submission_accepted",
        "title": "Report submission accepted",
        "message": format!(
            "Your submission for \"{}\" was reviewed and accepted.",
            report_title
        ),
        "report_submission_id": submission_id,
        "report_title": report_title,
        "action_url": action_url,
        "icon": "document",
    })
}

/// The coordinator returned the submission for revision
pub fn submission_returned(submission_id: Uuid, report_title: &str, action_url: &str) -> Value {
    json!({
        "type": "report_submission_returned",
        "title": "Report submission requires revision",
        "message": format!(
            "Your submission for \"{}\" was reviewed and needs revision. Please check the feedback and resubmit.",
            report_title
        ),
        "report_submission_id": submission_id,
        "report_title": report_title,
        "action_url": action_url,
        "icon": "document",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returned_payload_references_report_title() {
        let id = Uuid::new_v4();
        let payload = submission_returned(id, "Q3 Field Survey", "https://app/x");

        assert_eq!(payload["type"], "report_submission_returned");
        assert!(payload["message"]
            .as_str()
            .unwrap()
            .contains("Q3 Field Survey"));
        assert_eq!(payload["report_submission_id"], json!(id));
    }

    #[test]
    fn received_payload_carries_officer_and_priority() {
        let payload = submission_received(
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Monthly Progress",
            "Siti",
            "https://app/y",
        );

        assert_eq!(payload["submitted_by"], "Siti");
        assert_eq!(payload["priority"], "high");
        assert_eq!(
            payload["message"],
            "Siti submitted a report for \"Monthly Progress\""
        );
    }

    #[test]
    fn new_report_payload_has_deadline_reminder() {
        let payload = new_report_added(Uuid::new_v4(), "Census", "https://app/z");

        assert_eq!(payload["title"], "New report submission required");
        assert!(payload["message"]
            .as_str()
            .unwrap()
            .contains("before the deadline"));
    }
}
