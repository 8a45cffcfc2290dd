//! Invitation model and its int-coded status.

use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::SmallInt;
use diesel::{AsExpression, FromSqlRow};
use jiff::Timestamp;
use jiff_diesel::ToDiesel;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Lifecycle state of an invitation. Stored and transmitted as an integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = SmallInt)]
#[serde(try_from = "i16", into = "i16")]
pub enum InvitationStatus {
    Pending = 1,
    Active = 2,
    Expired = 3,
}

impl From<InvitationStatus> for i16 {
    fn from(value: InvitationStatus) -> Self {
        value as i16
    }
}

impl TryFrom<i16> for InvitationStatus {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(InvitationStatus::Pending),
            2 => Ok(InvitationStatus::Active),
            3 => Ok(InvitationStatus::Expired),
            other => Err(format!("Unrecognized invitation status: {}", other)),
        }
    }
}

impl diesel::query_builder::QueryId for InvitationStatus {
    type QueryId = InvitationStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<SmallInt, Pg> for InvitationStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(&i16::from(*self).to_be_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<SmallInt, Pg> for InvitationStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let value = <i16 as FromSql<SmallInt, Pg>>::from_sql(bytes)?;
        InvitationStatus::try_from(value).map_err(Into::into)
    }
}

/// An invitation of a member to a gathering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: i64,
    pub member_id: i64,
    pub gathering_id: i64,
    pub status: InvitationStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Invitation {
    pub fn new(id: i64, member_id: i64, gathering_id: i64, status: InvitationStatus) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            member_id,
            gathering_id,
            status,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Caller-supplied invitation fields, used for inviting and updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewInvitation {
    pub member_id: i64,
    pub gathering_id: i64,
    pub status: InvitationStatus,
}

impl NewInvitation {
    pub fn into_invitation(self, id: i64) -> Invitation {
        Invitation::new(id, self.member_id, self.gathering_id, self.status)
    }
}

/// Row of the `invitations` table.
#[derive(Debug, Queryable, Selectable, Insertable, Clone)]
#[diesel(table_name = crate::schema::invitations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct InvitationRecord {
    pub id: i64,
    pub member_id: i64,
    pub gathering_id: i64,
    pub status: InvitationStatus,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
    pub deleted_at: Option<jiff_diesel::Timestamp>,
}

impl From<InvitationRecord> for Invitation {
    fn from(record: InvitationRecord) -> Self {
        Self {
            id: record.id,
            member_id: record.member_id,
            gathering_id: record.gathering_id,
            status: record.status,
            created_at: record.created_at.to_jiff(),
            updated_at: record.updated_at.to_jiff(),
            deleted_at: record.deleted_at.map(|t| t.to_jiff()),
        }
    }
}

impl From<&Invitation> for InvitationRecord {
    fn from(invitation: &Invitation) -> Self {
        Self {
            id: invitation.id,
            member_id: invitation.member_id,
            gathering_id: invitation.gathering_id,
            status: invitation.status,
            created_at: invitation.created_at.to_diesel(),
            updated_at: invitation.updated_at.to_diesel(),
            deleted_at: invitation.deleted_at.map(|t| t.to_diesel()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invitation_status_codes() {
        assert_eq!(i16::from(InvitationStatus::Pending), 1);
        assert_eq!(i16::from(InvitationStatus::Active), 2);
        assert_eq!(i16::from(InvitationStatus::Expired), 3);
        assert!(InvitationStatus::try_from(4).is_err());
    }

    #[test]
    fn test_new_invitation_is_live() {
        let invitation = Invitation::new(123, 321, 444, InvitationStatus::Active);
        assert_eq!(invitation.created_at, invitation.updated_at);
        assert!(invitation.deleted_at.is_none());
    }
}
