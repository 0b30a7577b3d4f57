/// User model
///
/// The identity record handed out by the authentication collaborator after a
/// successful sign-in or sign-up. Credentials never cross that boundary, so
/// there is nothing secret in here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authenticated user identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Opaque identifier assigned by the auth collaborator
    pub id: String,

    /// Email address
    pub email: String,

    /// Optional display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_user_wire_field_names() {
        let user = User {
            id: "u1".to_string(),
            email: "dana@example.com".to_string(),
            display_name: Some("Dana".to_string()),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["displayName"], "Dana");
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_user_display_name_omitted_when_absent() {
        let user = User {
            id: "u2".to_string(),
            email: "anon@example.com".to_string(),
            display_name: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("displayName").is_none());
    }
}
