//! Invitation repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff::Timestamp;
use jiff_diesel::ToDiesel;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Invitation, InvitationRecord};
use crate::repositories::InvitationRepository;

#[derive(Clone)]
pub struct PgInvitationRepository {
    pool: AsyncDbPool,
}

impl PgInvitationRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InvitationRepository for PgInvitationRepository {
    async fn create(&self, invitation: &Invitation) -> AppResult<Invitation> {
        use crate::schema::invitations::dsl::*;
        let mut conn = self.pool.get().await?;

        let now = Timestamp::now();
        let record = InvitationRecord::from(&Invitation {
            created_at: now,
            updated_at: now,
            deleted_at: None,
            ..invitation.clone()
        });

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(invitations)
                    .values(&record)
                    .returning(InvitationRecord::as_returning())
                    .get_result(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map(Invitation::from)
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert invitation"))
    }

    async fn find_by_id(&self, invitation_id: i64) -> AppResult<Option<Invitation>> {
        use crate::schema::invitations::dsl::*;
        let mut conn = self.pool.get().await?;

        invitations
            .filter(id.eq(invitation_id))
            .filter(deleted_at.is_null())
            .select(InvitationRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|found| found.map(Invitation::from))
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select invitation"))
    }

    async fn find_by_id_unscoped(&self, invitation_id: i64) -> AppResult<Option<Invitation>> {
        use crate::schema::invitations::dsl::*;
        let mut conn = self.pool.get().await?;

        invitations
            .find(invitation_id)
            .select(InvitationRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|found| found.map(Invitation::from))
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select invitation"))
    }

    async fn update_by_id(&self, invitation: &Invitation) -> AppResult<Option<Invitation>> {
        use crate::schema::invitations::dsl::*;

        if self.find_by_id(invitation.id).await?.is_none() {
            return Ok(None);
        }

        let mut conn = self.pool.get().await?;
        let invitation_id = invitation.id;
        let new_member_id = invitation.member_id;
        let new_gathering_id = invitation.gathering_id;
        let new_status = invitation.status;
        let now = Timestamp::now().to_diesel();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::update(invitations.find(invitation_id))
                    .set((
                        member_id.eq(new_member_id),
                        gathering_id.eq(new_gathering_id),
                        status.eq(new_status),
                        updated_at.eq(now),
                    ))
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update invitation"))?;

        drop(conn);
        self.find_by_id(invitation_id).await
    }

    async fn delete_by_id(&self, invitation_id: i64) -> AppResult<Invitation> {
        use crate::schema::invitations::dsl::*;
        let mut conn = self.pool.get().await?;
        let now = Timestamp::now().to_diesel();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::update(invitations.find(invitation_id).filter(deleted_at.is_null()))
                    .set(deleted_at.eq(now))
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete invitation"))?;

        drop(conn);
        self.find_by_id_unscoped(invitation_id)
            .await?
            .ok_or_else(|| AppError::not_found("invitation", "id", invitation_id))
    }
}
