use diesel::prelude::*;
use jiff::Timestamp;
use jiff_diesel::ToDiesel;

/// A registered member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Member {
    /// Builds an unsaved member; timestamps are assigned by the repository.
    pub fn new(id: i64, first_name: String, last_name: String, email: String) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            first_name,
            last_name,
            email,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Caller-supplied member fields, used for registration and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewMember {
    pub fn into_member(self, id: i64) -> Member {
        Member::new(id, self.first_name, self.last_name, self.email)
    }
}

/// Row of the `members` table.
#[derive(Debug, Queryable, Selectable, Insertable, Clone)]
#[diesel(table_name = crate::schema::members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct MemberRecord {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
    pub deleted_at: Option<jiff_diesel::Timestamp>,
}

impl From<MemberRecord> for Member {
    fn from(record: MemberRecord) -> Self {
        Self {
            id: record.id,
            first_name: record.first_name,
            last_name: record.last_name,
            email: record.email,
            created_at: record.created_at.to_jiff(),
            updated_at: record.updated_at.to_jiff(),
            deleted_at: record.deleted_at.map(|t| t.to_jiff()),
        }
    }
}

impl From<&Member> for MemberRecord {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id,
            first_name: member.first_name.clone(),
            last_name: member.last_name.clone(),
            email: member.email.clone(),
            created_at: member.created_at.to_diesel(),
            updated_at: member.updated_at.to_diesel(),
            deleted_at: member.deleted_at.map(|t| t.to_diesel()),
        }
    }
}
