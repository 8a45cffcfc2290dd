//! Member repository for async database operations.
//!
//! Provides CRUD operations for the members table using diesel_async.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff::Timestamp;
use jiff_diesel::ToDiesel;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Member, MemberRecord};
use crate::repositories::MemberRepository;

/// Member repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgMemberRepository {
    pool: AsyncDbPool,
}

impl PgMemberRepository {
    /// Creates a new PgMemberRepository with the given connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    /// Inserts a member inside a transaction.
    ///
    /// # Arguments
    /// * `member` - The member to insert; its timestamps are replaced with now
    ///
    /// # Returns
    /// The stored row
    async fn create(&self, member: &Member) -> AppResult<Member> {
        use crate::schema::members::dsl::*;
        let mut conn = self.pool.get().await?;

        let now = Timestamp::now();
        let record = MemberRecord::from(&Member {
            created_at: now,
            updated_at: now,
            deleted_at: None,
            ..member.clone()
        });

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(members)
                    .values(&record)
                    .returning(MemberRecord::as_returning())
                    .get_result(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map(Member::from)
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert member"))
    }

    async fn find_by_id(&self, member_id: i64) -> AppResult<Option<Member>> {
        use crate::schema::members::dsl::*;
        let mut conn = self.pool.get().await?;

        members
            .filter(id.eq(member_id))
            .filter(deleted_at.is_null())
            .select(MemberRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|found| found.map(Member::from))
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select member"))
    }

    async fn find_by_id_unscoped(&self, member_id: i64) -> AppResult<Option<Member>> {
        use crate::schema::members::dsl::*;
        let mut conn = self.pool.get().await?;

        members
            .find(member_id)
            .select(MemberRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|found| found.map(Member::from))
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select member"))
    }

    /// Rewrites the mutable columns of a live member.
    ///
    /// # Returns
    /// `None` when no live row has this id, otherwise the re-read row
    async fn update_by_id(&self, member: &Member) -> AppResult<Option<Member>> {
        use crate::schema::members::dsl::*;

        if self.find_by_id(member.id).await?.is_none() {
            return Ok(None);
        }

        let mut conn = self.pool.get().await?;
        let member_id = member.id;
        let new_first_name = member.first_name.clone();
        let new_last_name = member.last_name.clone();
        let new_email = member.email.clone();
        let now = Timestamp::now().to_diesel();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::update(members.find(member_id))
                    .set((
                        first_name.eq(new_first_name),
                        last_name.eq(new_last_name),
                        email.eq(new_email),
                        updated_at.eq(now),
                    ))
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update member"))?;

        drop(conn);
        self.find_by_id(member_id).await
    }

    /// Marks a member deleted and returns it, read through the unscoped path.
    async fn delete_by_id(&self, member_id: i64) -> AppResult<Member> {
        use crate::schema::members::dsl::*;
        let mut conn = self.pool.get().await?;
        let now = Timestamp::now().to_diesel();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::update(members.find(member_id).filter(deleted_at.is_null()))
                    .set(deleted_at.eq(now))
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete member"))?;

        drop(conn);
        self.find_by_id_unscoped(member_id)
            .await?
            .ok_or_else(|| AppError::not_found("member", "id", member_id))
    }
}
