use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::notifications::models::Notification;

/// Feed entry for the in-app notification list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct NotificationResponseDto {
    pub id: Uuid,
    pub title: String,
    pub message: String,
    pub action_url: Option<String>,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Notification> for NotificationResponseDto {
    fn from(n: Notification) -> Self {
        let text = |key: &str| {
            n.payload
                .get(key)
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_string()
        };

        Self {
            id: n.id,
            title: text("title"),
            message: text("message"),
            action_url: n
                .payload
                .get("action_url")
                .and_then(|v| v.as_str())
                .map(String::from),
            read_at: n.read_at,
            created_at: n.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_payload_fields_into_feed_entry() {
        let n = Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            payload: json!({
                "title": "Report submission accepted",
                "message": "Your submission was accepted.",
                "action_url": "https://app/programs/1",
            }),
            read_at: None,
            created_at: Utc::now(),
        };

        let dto = NotificationResponseDto::from(n);
        assert_eq!(dto.title, "Report submission accepted");
        assert_eq!(dto.action_url.as_deref(), Some("https://app/programs/1"));
    }

    #[test]
    fn missing_payload_fields_default_to_empty() {
        let n = Notification {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            payload: json!({}),
            read_at: None,
            created_at: Utc::now(),
        };

        let dto = NotificationResponseDto::from(n);
        assert_eq!(dto.title, "");
        assert!(dto.action_url.is_none());
    }
}
