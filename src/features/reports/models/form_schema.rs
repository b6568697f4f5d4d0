//! Dynamic form schemas attached to reports.
//!
//! A report's `form_schema` is an ordered list of fields the field officer
//! answers when submitting. Stored as JSONB on the report row.

use std::collections::HashSet;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

lazy_static! {
    static ref FIELD_ID_REGEX: Regex = Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap();
}

/// Kind of answer a form field expects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Date,
    Textarea,
    File,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Date => "date",
            FieldType::Textarea => "textarea",
            FieldType::File => "file",
        }
    }
}

/// One field of a report's dynamic form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FormField {
    /// Stable identifier; submission answers are keyed by this
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default)]
    pub required: bool,
}

/// Check a form schema is well formed: every field id non-empty and unique,
/// every label non-empty.
pub fn validate_form_schema(fields: &[FormField]) -> Result<(), String> {
    let mut seen: HashSet<&str> = HashSet::new();

    for field in fields {
        if field.id.trim().is_empty() {
            return Err("form_schema field ids must not be empty".to_string());
        }
        if !FIELD_ID_REGEX.is_match(&field.id) {
            return Err(format!(
                "form_schema field id '{}' may only contain letters, digits, '-' and '_'",
                field.id
            ));
        }
        if field.label.trim().is_empty() {
            return Err(format!(
                "form_schema field '{}' must have a label",
                field.id
            ));
        }
        if !seen.insert(field.id.as_str()) {
            return Err(format!(
                "form_schema field id '{}' is duplicated",
                field.id
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str, field_type: FieldType) -> FormField {
        FormField {
            id: id.to_string(),
            label: format!("Label for {}", id),
            field_type,
            required: false,
        }
    }

    #[test]
    fn accepts_unique_fields() {
        let schema = vec![
            field("summary", FieldType::Textarea),
            field("count", FieldType::Number),
            field("evidence", FieldType::File),
        ];
        assert!(validate_form_schema(&schema).is_ok());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let schema = vec![field("summary", FieldType::Text), field("summary", FieldType::Date)];
        let err = validate_form_schema(&schema).unwrap_err();
        assert!(err.contains("duplicated"));
    }

    #[test]
    fn rejects_empty_id() {
        let schema = vec![field("  ", FieldType::Text)];
        assert!(validate_form_schema(&schema).is_err());
    }

    #[test]
    fn rejects_bracketed_id() {
        // Would collide with the multipart part-name convention
        let schema = vec![field("photos[]", FieldType::File)];
        assert!(validate_form_schema(&schema).is_err());
    }

    #[test]
    fn field_type_deserializes_from_type_key() {
        let json = r#"{"id":"photo","label":"Photo","type":"file","required":true}"#;
        let parsed: FormField = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.field_type, FieldType::File);
        assert!(parsed.required);
    }

    #[test]
    fn required_defaults_to_false() {
        let json = r#"{"id":"notes","label":"Notes","type":"textarea"}"#;
        let parsed: FormField = serde_json::from_str(json).unwrap();
        assert!(!parsed.required);
    }
}
