//! Gathering model and its int-coded type.

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

/// How attendance of a gathering is bounded. Stored and transmitted as an integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsExpression, FromSqlRow,
)]
#[diesel(sql_type = SmallInt)]
#[serde(try_from = "i16", into = "i16")]
pub enum GatheringType {
    FixedNumberOfAttendees = 1,
    ExpiringInvitations = 2,
}

impl From<GatheringType> for i16 {
    fn from(value: GatheringType) -> Self {
        value as i16
    }
}

impl TryFrom<i16> for GatheringType {
    type Error = String;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GatheringType::FixedNumberOfAttendees),
            2 => Ok(GatheringType::ExpiringInvitations),
            other => Err(format!("Unrecognized gathering type: {}", other)),
        }
    }
}

impl diesel::query_builder::QueryId for GatheringType {
    type QueryId = GatheringType;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<SmallInt, Pg> for GatheringType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        out.write_all(&i16::from(*self).to_be_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<SmallInt, Pg> for GatheringType {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let value = <i16 as FromSql<SmallInt, Pg>>::from_sql(bytes)?;
        GatheringType::try_from(value).map_err(Into::into)
    }
}

/// A scheduled gathering created by a member.
///
/// `creator` holds a member id but is not enforced as a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gathering {
    pub id: i64,
    pub creator: i64,
    pub gathering_type: GatheringType,
    pub scheduled_at: Option<Timestamp>,
    pub name: String,
    pub location: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Gathering {
    pub fn new(
        id: i64,
        creator: i64,
        gathering_type: GatheringType,
        scheduled_at: Option<Timestamp>,
        name: String,
        location: String,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            creator,
            gathering_type,
            scheduled_at,
            name,
            location,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Caller-supplied gathering fields, used for creation and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGathering {
    pub creator: i64,
    pub gathering_type: GatheringType,
    pub scheduled_at: Option<Timestamp>,
    pub name: String,
    pub location: String,
}

impl NewGathering {
    pub fn into_gathering(self, id: i64) -> Gathering {
        Gathering::new(
            id,
            self.creator,
            self.gathering_type,
            self.scheduled_at,
            self.name,
            self.location,
        )
    }
}

/// Row of the `gatherings` table.
#[derive(Debug, Queryable, Selectable, Insertable, Clone)]
#[diesel(table_name = crate::schema::gatherings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct GatheringRecord {
    pub id: i64,
    pub creator: i64,
    #[diesel(column_name = type_)]
    pub gathering_type: GatheringType,
    pub scheduled_at: Option<jiff_diesel::Timestamp>,
    pub name: String,
    pub location: String,
    pub created_at: jiff_diesel::Timestamp,
    pub updated_at: jiff_diesel::Timestamp,
    pub deleted_at: Option<jiff_diesel::Timestamp>,
}

impl From<GatheringRecord> for Gathering {
    fn from(record: GatheringRecord) -> Self {
        Self {
            id: record.id,
            creator: record.creator,
            gathering_type: record.gathering_type,
            scheduled_at: record.scheduled_at.map(|t| t.to_jiff()),
            name: record.name,
            location: record.location,
            created_at: record.created_at.to_jiff(),
            updated_at: record.updated_at.to_jiff(),
            deleted_at: record.deleted_at.map(|t| t.to_jiff()),
        }
    }
}

impl From<&Gathering> for GatheringRecord {
    fn from(gathering: &Gathering) -> Self {
        Self {
            id: gathering.id,
            creator: gathering.creator,
            gathering_type: gathering.gathering_type,
            scheduled_at: gathering.scheduled_at.map(|t| t.to_diesel()),
            name: gathering.name.clone(),
            location: gathering.location.clone(),
            created_at: gathering.created_at.to_diesel(),
            updated_at: gathering.updated_at.to_diesel(),
            deleted_at: gathering.deleted_at.map(|t| t.to_diesel()),
        }
    }
}
