//! Data Transfer Objects for API requests and responses.
//!
//! DTOs are organized by domain:
//! - `member`, `gathering`, `invitation` - entity request/response DTOs
//! - `attendee` - attendance listing responses
//! - `query` - the `?id=` query shared by lookup and delete routes
//! - `error` - Common error response DTOs
//! - `health` - Health check responses

mod attendee;
mod error;
mod gathering;
mod health;
mod invitation;
mod member;
mod query;

pub use attendee::AttendeeResponse;
pub use error::ErrorResponse;
pub use gathering::{CreateGatheringRequest, GatheringResponse, UpdateGatheringRequest};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use invitation::{InvitationResponse, InviteMemberRequest, UpdateInvitationRequest};
pub use member::{MemberResponse, RegisterMemberRequest, UpdateMemberRequest};
pub use query::IdQuery;

use jiff::Timestamp;

/// Renders a timestamp as UTC with millisecond precision.
pub(crate) fn format_timestamp(timestamp: Timestamp) -> String {
    timestamp.strftime("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timestamp_is_millisecond_utc() {
        let ts: Timestamp = "2024-03-09T10:15:30.123456Z".parse().unwrap();
        assert_eq!(format_timestamp(ts), "2024-03-09T10:15:30.123Z");

        let ts: Timestamp = "2024-03-09T10:15:30Z".parse().unwrap();
        assert_eq!(format_timestamp(ts), "2024-03-09T10:15:30.000Z");
    }
}
