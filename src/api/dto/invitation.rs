//! Invitation-related DTOs for API requests and responses.

use crate::api::dto::format_timestamp;
use crate::models::{Invitation, InvitationStatus, NewInvitation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for inviting a member to a gathering.
///
/// `status` is 1 (pending), 2 (active) or 3 (expired).
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct InviteMemberRequest {
    #[schema(example = 321)]
    pub member_id: i64,
    #[schema(example = 444)]
    pub gathering_id: i64,
    #[schema(value_type = i16, example = 2)]
    pub status: InvitationStatus,
}

impl InviteMemberRequest {
    pub fn into_new_invitation(self) -> NewInvitation {
        NewInvitation {
            member_id: self.member_id,
            gathering_id: self.gathering_id,
            status: self.status,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateInvitationRequest {
    #[validate(range(min = 1, message = "id must be a positive integer"))]
    pub id: i64,
    pub member_id: i64,
    pub gathering_id: i64,
    #[schema(value_type = i16)]
    pub status: InvitationStatus,
}

impl UpdateInvitationRequest {
    pub fn into_parts(self) -> (i64, NewInvitation) {
        (
            self.id,
            NewInvitation {
                member_id: self.member_id,
                gathering_id: self.gathering_id,
                status: self.status,
            },
        )
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InvitationResponse {
    pub id: i64,
    pub member_id: i64,
    pub gathering_id: i64,
    #[schema(value_type = i16)]
    pub status: InvitationStatus,
    pub created_at: String,
    pub updated_at: String,
    pub deleted_at: Option<String>,
}

impl From<Invitation> for InvitationResponse {
    fn from(invitation: Invitation) -> Self {
        Self {
            id: invitation.id,
            member_id: invitation.member_id,
            gathering_id: invitation.gathering_id,
            status: invitation.status,
            created_at: format_timestamp(invitation.created_at),
            updated_at: format_timestamp(invitation.updated_at),
            deleted_at: invitation.deleted_at.map(format_timestamp),
        }
    }
}
