//! Member-related DTOs for API requests and responses.

use crate::api::dto::format_timestamp;
use crate::models::{Member, NewMember};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for registering a member.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterMemberRequest {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 320, message = "Email must be at most 320 characters")
    )]
    #[schema(format = "email", max_length = 320, example = "john@doe.com")]
    pub email: String,
}

impl RegisterMemberRequest {
    pub fn into_new_member(self) -> NewMember {
        NewMember {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
        }
    }
}

/// Request body for updating a member. Every field is overwritten.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateMemberRequest {
    #[validate(range(min = 1, message = "id must be a positive integer"))]
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    #[validate(
        email(message = "Invalid email format"),
        length(max = 320, message = "Email must be at most 320 characters")
    )]
    #[schema(format = "email", max_length = 320)]
    pub email: String,
}

impl UpdateMemberRequest {
    /// Splits the request into the target id and the replacement fields.
    pub fn into_parts(self) -> (i64, NewMember) {
        (
            self.id,
            NewMember {
                first_name: self.first_name,
                last_name: self.last_name,
                email: self.email,
            },
        )
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct MemberResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name,
            last_name: member.last_name,
            email: member.email,
            created_at: format_timestamp(member.created_at),
            updated_at: format_timestamp(member.updated_at),
            deleted_at: member.deleted_at.map(format_timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str) -> RegisterMemberRequest {
        RegisterMemberRequest {
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_register_request_accepts_valid_email() {
        assert!(register("john@doe.com").validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_bad_emails() {
        assert!(register("").validate().is_err());
        assert!(register("john.doe.com").validate().is_err());

        let too_long = format!("{}@doe.com", "j".repeat(320));
        assert!(register(&too_long).validate().is_err());
    }

    #[test]
    fn test_update_request_rejects_non_positive_id() {
        let request: UpdateMemberRequest = serde_json::from_str(
            r#"{"id":0,"first_name":"John","last_name":"Doe","email":"john@doe.com"}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_of_live_member() {
        let member = Member::new(7, "John".into(), "Doe".into(), "john@doe.com".into());
        let json = serde_json::to_value(MemberResponse::from(member)).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["email"], "john@doe.com");
        assert!(json["deleted_at"].is_null());
        assert!(json["created_at"].as_str().unwrap().ends_with('Z'));
    }
}
