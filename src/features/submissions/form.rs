//! Multipart part-name conventions for submission forms.
//!
//! Answers arrive as `submission_data[<field_id>]` parts; multi-file answers
//! may use the `submission_data[<field_id>][]` array convention. Everything
//! else (`report_id`, `description`, `files_to_delete`) is a plain part.

/// Extract the form-field id from a `submission_data[...]` part name.
/// Returns None for any other part name.
pub fn submission_field_id(part_name: &str) -> Option<&str> {
    let rest = part_name.strip_prefix("submission_data[")?;
    let rest = rest.strip_suffix("[]").unwrap_or(rest);
    let field_id = rest.strip_suffix(']')?;

    if field_id.is_empty() || field_id.contains(['[', ']']) {
        return None;
    }

    Some(field_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_field() {
        assert_eq!(submission_field_id("submission_data[summary]"), Some("summary"));
    }

    #[test]
    fn parses_array_field() {
        assert_eq!(submission_field_id("submission_data[photos][]"), Some("photos"));
    }

    #[test]
    fn rejects_other_parts() {
        assert_eq!(submission_field_id("report_id"), None);
        assert_eq!(submission_field_id("description"), None);
        assert_eq!(submission_field_id("submission_data"), None);
        assert_eq!(submission_field_id("submission_data[]"), None);
        assert_eq!(submission_field_id("submission_data[a][b]"), None);
        assert_eq!(submission_field_id("submission_data[photos"), None);
    }
}
