//! Attendee repository for async database operations.
//!
//! Rows are keyed by `(member_id, gathering_id)`; there is no surrogate id.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff::Timestamp;
use jiff_diesel::ToDiesel;

use crate::db::AsyncDbPool;
use crate::error::{AppResult, DatabaseErrorConverter};
use crate::models::{Attendee, AttendeeRecord};
use crate::repositories::AttendeeRepository;

#[derive(Clone)]
pub struct PgAttendeeRepository {
    pool: AsyncDbPool,
}

impl PgAttendeeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    async fn find_pair_unscoped(
        &self,
        pair_member_id: i64,
        pair_gathering_id: i64,
    ) -> AppResult<Option<Attendee>> {
        use crate::schema::attendees::dsl::*;
        let mut conn = self.pool.get().await?;

        attendees
            .find((pair_member_id, pair_gathering_id))
            .select(AttendeeRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|found| found.map(Attendee::from))
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select attendee"))
    }
}

#[async_trait]
impl AttendeeRepository for PgAttendeeRepository {
    /// Inserts the pair; on key conflict clears `deleted_at` and bumps `updated_at`.
    async fn create(&self, attendee: &Attendee) -> AppResult<Attendee> {
        use crate::schema::attendees::dsl::*;
        let mut conn = self.pool.get().await?;

        let now = Timestamp::now();
        let record = AttendeeRecord::from(&Attendee {
            created_at: now,
            updated_at: now,
            deleted_at: None,
            ..attendee.clone()
        });
        let revived_at = now.to_diesel();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(attendees)
                    .values(&record)
                    .on_conflict((member_id, gathering_id))
                    .do_update()
                    .set((
                        deleted_at.eq(None::<jiff_diesel::Timestamp>),
                        updated_at.eq(revived_at),
                    ))
                    .returning(AttendeeRecord::as_returning())
                    .get_result(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map(Attendee::from)
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert attendee"))
    }

    async fn find_by_member_id(&self, by_member_id: i64) -> AppResult<Vec<Attendee>> {
        use crate::schema::attendees::dsl::*;
        let mut conn = self.pool.get().await?;

        attendees
            .filter(member_id.eq(by_member_id))
            .filter(deleted_at.is_null())
            .order(created_at.asc())
            .select(AttendeeRecord::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Attendee::from).collect())
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select attendees"))
    }

    async fn find_by_gathering_id(&self, by_gathering_id: i64) -> AppResult<Vec<Attendee>> {
        use crate::schema::attendees::dsl::*;
        let mut conn = self.pool.get().await?;

        attendees
            .filter(gathering_id.eq(by_gathering_id))
            .filter(deleted_at.is_null())
            .order(created_at.asc())
            .select(AttendeeRecord::as_select())
            .load(&mut conn)
            .await
            .map(|rows| rows.into_iter().map(Attendee::from).collect())
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select attendees"))
    }

    async fn delete_by_member_id_and_gathering_id(
        &self,
        pair_member_id: i64,
        pair_gathering_id: i64,
    ) -> AppResult<Option<Attendee>> {
        use crate::schema::attendees::dsl::*;
        let mut conn = self.pool.get().await?;
        let now = Timestamp::now().to_diesel();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::update(
                    attendees
                        .find((pair_member_id, pair_gathering_id))
                        .filter(deleted_at.is_null()),
                )
                .set(deleted_at.eq(now))
                .execute(conn)
                .await
            }
            .scope_boxed()
        })
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete attendee"))?;

        drop(conn);
        self.find_pair_unscoped(pair_member_id, pair_gathering_id)
            .await
    }
}
