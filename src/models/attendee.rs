use diesel::prelude::*;
use jiff::Timestamp;
use jiff_diesel::ToDiesel;

/// Join record between a member and a gathering, keyed by the pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attendee {
    pub member_id: i64,
    pub gathering_id: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Attendee {
    pub fn new(member_id: i64, gathering_id: i64) -> Self {
        let now = Timestamp::now();
        Self {
            member_id,
            gathering_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Row of the `attendees` table.
#[derive(Debug, Queryable, Selectable, Insertable, Clone)]
#[diesel(table_name = crate::schema::attendees)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AttendeeRecord {
    pub member_id: i64,
    pub gathering_id: i64,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
    pub deleted_at: Option<jiff_diesel::Timestamp>,
}

impl From<AttendeeRecord> for Attendee {
    fn from(record: AttendeeRecord) -> Self {
        Self {
            member_id: record.member_id,
            gathering_id: record.gathering_id,
            created_at: record.created_at.to_jiff(),
            updated_at: record.updated_at.to_jiff(),
            deleted_at: record.deleted_at.map(|t| t.to_jiff()),
        }
    }
}

impl From<&Attendee> for AttendeeRecord {
    fn from(attendee: &Attendee) -> Self {
        Self {
            member_id: attendee.member_id,
            gathering_id: attendee.gathering_id,
            created_at: attendee.created_at.to_diesel(),
            updated_at: attendee.updated_at.to_diesel(),
            deleted_at: attendee.deleted_at.map(|t| t.to_diesel()),
        }
    }
}
