//! Gathering-related DTOs for API requests and responses.

use crate::api::dto::format_timestamp;
use crate::models::{Gathering, GatheringType, NewGathering};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// ============================================================================
// Request DTOs
// ============================================================================

/// Request body for creating a gathering.
///
/// `type` is 1 for a fixed number of attendees, 2 for expiring invitations.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateGatheringRequest {
    /// Member id of the creator, not checked against existing members
    pub creator: i64,
    #[schema(example = "Rust meetup")]
    pub name: String,
    #[schema(example = "Jakarta")]
    pub location: String,
    /// RFC 3339 timestamp
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime, example = "2025-06-01T18:00:00Z")]
    pub scheduled_at: Option<Timestamp>,
    #[serde(rename = "type")]
    #[schema(value_type = i16, example = 1)]
    pub gathering_type: GatheringType,
}

impl CreateGatheringRequest {
    pub fn into_new_gathering(self) -> NewGathering {
        NewGathering {
            creator: self.creator,
            gathering_type: self.gathering_type,
            scheduled_at: self.scheduled_at,
            name: self.name,
            location: self.location,
        }
    }
}

/// Request body for updating a gathering. Every field is overwritten.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateGatheringRequest {
    #[validate(range(min = 1, message = "id must be a positive integer"))]
    pub id: i64,
    pub creator: i64,
    pub name: String,
    pub location: String,
    #[serde(default)]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub scheduled_at: Option<Timestamp>,
    #[serde(rename = "type")]
    #[schema(value_type = i16)]
    pub gathering_type: GatheringType,
}

impl UpdateGatheringRequest {
    pub fn into_parts(self) -> (i64, NewGathering) {
        (
            self.id,
            NewGathering {
                creator: self.creator,
                gathering_type: self.gathering_type,
                scheduled_at: self.scheduled_at,
                name: self.name,
                location: self.location,
            },
        )
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize, ToSchema)]
pub struct GatheringResponse {
    pub id: i64,
    pub creator: i64,
    #[serde(rename = "type")]
    #[schema(value_type = i16)]
    pub gathering_type: GatheringType,
    pub scheduled_at: Option<String>,
    pub name: String,
    pub location: String,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl From<Gathering> for GatheringResponse {
    fn from(gathering: Gathering) -> Self {
        Self {
            id: gathering.id,
            creator: gathering.creator,
            gathering_type: gathering.gathering_type,
            scheduled_at: gathering.scheduled_at.map(format_timestamp),
            name: gathering.name,
            location: gathering.location,
            created_at: format_timestamp(gathering.created_at),
            updated_at: format_timestamp(gathering.updated_at),
            deleted_at: gathering.deleted_at.map(format_timestamp),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_reads_type_and_schedule() {
        let request: CreateGatheringRequest = serde_json::from_str(
            r#"{"creator":321,"name":"Rust meetup","location":"Jakarta",
                "scheduled_at":"2025-06-01T18:00:00Z","type":2}"#,
        )
        .unwrap();

        let new_gathering = request.into_new_gathering();
        assert_eq!(new_gathering.gathering_type, GatheringType::ExpiringInvitations);
        assert_eq!(
            new_gathering.scheduled_at,
            Some("2025-06-01T18:00:00Z".parse().unwrap())
        );
    }

    #[test]
    fn test_create_request_schedule_is_optional() {
        let request: CreateGatheringRequest = serde_json::from_str(
            r#"{"creator":321,"name":"Rust meetup","location":"Jakarta","type":1}"#,
        )
        .unwrap();
        assert!(request.scheduled_at.is_none());
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let result = serde_json::from_str::<CreateGatheringRequest>(
            r#"{"creator":321,"name":"x","location":"y","type":9}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_response_writes_type_as_integer() {
        let gathering = Gathering::new(
            444,
            321,
            GatheringType::FixedNumberOfAttendees,
            None,
            "Rust meetup".to_string(),
            "Jakarta".to_string(),
        );
        let json = serde_json::to_value(GatheringResponse::from(gathering)).unwrap();
        assert_eq!(json["type"], 1);
        assert!(json["scheduled_at"].is_null());
    }
}
