//! Submission answer values and the pure logic for manipulating them.
//!
//! A submission's `data` column is a JSON object keyed by form-field id.
//! Scalar fields store their answer as a plain string; file fields store an
//! array of attachment URLs. The untagged enum keeps the stored layout flat.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::features::reports::models::{FieldType, FormField};

use super::submission::Timeliness;

/// One answer in a submission's data map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldAnswer {
    /// Attachment URLs answering a `file` field
    Files(Vec<String>),
    /// Text form of any non-file answer
    Scalar(String),
}

/// Answers keyed by form-field id; BTreeMap keeps serialization stable
pub type SubmissionData = BTreeMap<String, FieldAnswer>;

/// Check a scalar answer against the declared type of its form field
pub fn validate_scalar_answer(field: &FormField, value: &str) -> Result<(), String> {
    match field.field_type {
        FieldType::Text | FieldType::Textarea => Ok(()),
        FieldType::Number => {
            value.parse::<f64>().map(|_| ()).map_err(|_| {
                format!("Field '{}' expects a numeric value", field.label)
            })
        }
        FieldType::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(|_| ())
            .map_err(|_| format!("Field '{}' expects a date (YYYY-MM-DD)", field.label)),
        FieldType::File => Err(format!(
            "Field '{}' expects file uploads, not a text value",
            field.label
        )),
    }
}

/// Classify a submission moment against the report deadline, at day
/// granularity. Submitting any time on the deadline day counts as on time.
pub fn compute_timeliness(submitted_at: DateTime<Utc>, deadline: DateTime<Utc>) -> Timeliness {
    let submitted = submitted_at.date_naive();
    let due = deadline.date_naive();

    if submitted < due {
        Timeliness::Early
    } else if submitted == due {
        Timeliness::OnTime
    } else {
        Timeliness::Late
    }
}

/// Strip the given URLs from every file answer, dropping keys whose URL list
/// becomes empty. Scalar answers are untouched.
pub fn remove_file_urls(data: &mut SubmissionData, urls: &HashSet<String>) {
    data.retain(|_, answer| match answer {
        FieldAnswer::Files(list) => {
            list.retain(|url| !urls.contains(url));
            !list.is_empty()
        }
        FieldAnswer::Scalar(_) => true,
    });
}

/// Append newly uploaded URLs to a field's file answer, replacing any scalar
/// residue under the same key
pub fn append_file_urls(data: &mut SubmissionData, field_id: &str, urls: Vec<String>) {
    if urls.is_empty() {
        return;
    }

    match data.get_mut(field_id) {
        Some(FieldAnswer::Files(existing)) => existing.extend(urls),
        _ => {
            data.insert(field_id.to_string(), FieldAnswer::Files(urls));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn field(id: &str, field_type: FieldType) -> FormField {
        FormField {
            id: id.to_string(),
            label: id.to_string(),
            field_type,
            required: true,
        }
    }

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn timeliness_day_before_deadline_is_early() {
        let t = compute_timeliness(utc(2025, 3, 9, 23), utc(2025, 3, 10, 9));
        assert_eq!(t, Timeliness::Early);
    }

    #[test]
    fn timeliness_midnight_of_deadline_day_is_on_time() {
        let t = compute_timeliness(utc(2025, 3, 10, 0), utc(2025, 3, 10, 9));
        assert_eq!(t, Timeliness::OnTime);
    }

    #[test]
    fn timeliness_late_evening_of_deadline_day_is_on_time() {
        // Even past the deadline's time of day, same calendar day counts
        let t = compute_timeliness(utc(2025, 3, 10, 23), utc(2025, 3, 10, 9));
        assert_eq!(t, Timeliness::OnTime);
    }

    #[test]
    fn timeliness_next_day_is_late() {
        let t = compute_timeliness(utc(2025, 3, 11, 0), utc(2025, 3, 10, 9));
        assert_eq!(t, Timeliness::Late);
    }

    #[test]
    fn scalar_validation_by_type() {
        assert!(validate_scalar_answer(&field("n", FieldType::Number), "42.5").is_ok());
        assert!(validate_scalar_answer(&field("n", FieldType::Number), "many").is_err());
        assert!(validate_scalar_answer(&field("d", FieldType::Date), "2025-03-10").is_ok());
        assert!(validate_scalar_answer(&field("d", FieldType::Date), "10/03/2025").is_err());
        assert!(validate_scalar_answer(&field("t", FieldType::Textarea), "anything").is_ok());
        assert!(validate_scalar_answer(&field("f", FieldType::File), "text").is_err());
    }

    #[test]
    fn answer_serialization_is_flat() {
        let mut data = SubmissionData::new();
        data.insert("summary".into(), FieldAnswer::Scalar("done".into()));
        data.insert(
            "photos".into(),
            FieldAnswer::Files(vec!["http://x/a.png".into()]),
        );

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["summary"], "done");
        assert_eq!(json["photos"][0], "http://x/a.png");

        let back: SubmissionData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn remove_urls_drops_emptied_keys_only() {
        let mut data = SubmissionData::new();
        data.insert(
            "photos".into(),
            FieldAnswer::Files(vec!["http://x/a".into(), "http://x/b".into()]),
        );
        data.insert("docs".into(), FieldAnswer::Files(vec!["http://x/c".into()]));
        data.insert("summary".into(), FieldAnswer::Scalar("http://x/c".into()));

        let gone: HashSet<String> = ["http://x/a".to_string(), "http://x/c".to_string()]
            .into_iter()
            .collect();
        remove_file_urls(&mut data, &gone);

        assert_eq!(
            data.get("photos"),
            Some(&FieldAnswer::Files(vec!["http://x/b".into()]))
        );
        assert!(!data.contains_key("docs"));
        // Scalars are never treated as URLs
        assert_eq!(
            data.get("summary"),
            Some(&FieldAnswer::Scalar("http://x/c".into()))
        );
    }

    #[test]
    fn append_urls_merges_and_replaces_scalars() {
        let mut data = SubmissionData::new();
        data.insert("photos".into(), FieldAnswer::Files(vec!["http://x/a".into()]));
        data.insert("evidence".into(), FieldAnswer::Scalar("stale".into()));

        append_file_urls(&mut data, "photos", vec!["http://x/b".into()]);
        append_file_urls(&mut data, "evidence", vec!["http://x/c".into()]);
        append_file_urls(&mut data, "empty", Vec::new());

        assert_eq!(
            data.get("photos"),
            Some(&FieldAnswer::Files(vec![
                "http://x/a".into(),
                "http://x/b".into()
            ]))
        );
        assert_eq!(
            data.get("evidence"),
            Some(&FieldAnswer::Files(vec!["http://x/c".into()]))
        );
        assert!(!data.contains_key("empty"));
    }
}
