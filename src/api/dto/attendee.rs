use crate::api::dto::format_timestamp;
use crate::models::Attendee;
use serde::Serialize;
use utoipa::ToSchema;

/// One live attendance of a member at a gathering.
#[derive(Debug, Serialize, ToSchema)]
pub struct AttendeeResponse {
    pub member_id: i64,
    pub gathering_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Attendee> for AttendeeResponse {
    fn from(attendee: Attendee) -> Self {
        Self {
            member_id: attendee.member_id,
            gathering_id: attendee.gathering_id,
            created_at: format_timestamp(attendee.created_at),
            updated_at: format_timestamp(attendee.updated_at),
        }
    }
}
