//! Gathering repository for async database operations.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use jiff::Timestamp;
use jiff_diesel::ToDiesel;

use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult, DatabaseErrorConverter};
use crate::models::{Gathering, GatheringRecord};
use crate::repositories::GatheringRepository;

#[derive(Clone)]
pub struct PgGatheringRepository {
    pool: AsyncDbPool,
}

impl PgGatheringRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GatheringRepository for PgGatheringRepository {
    async fn create(&self, gathering: &Gathering) -> AppResult<Gathering> {
        use crate::schema::gatherings::dsl::*;
        let mut conn = self.pool.get().await?;

        let now = Timestamp::now();
        let record = GatheringRecord::from(&Gathering {
            created_at: now,
            updated_at: now,
            deleted_at: None,
            ..gathering.clone()
        });

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::insert_into(gatherings)
                    .values(&record)
                    .returning(GatheringRecord::as_returning())
                    .get_result(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map(Gathering::from)
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "insert gathering"))
    }

    async fn find_by_id(&self, gathering_id: i64) -> AppResult<Option<Gathering>> {
        use crate::schema::gatherings::dsl::*;
        let mut conn = self.pool.get().await?;

        gatherings
            .filter(id.eq(gathering_id))
            .filter(deleted_at.is_null())
            .select(GatheringRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|found| found.map(Gathering::from))
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select gathering"))
    }

    async fn find_by_id_unscoped(&self, gathering_id: i64) -> AppResult<Option<Gathering>> {
        use crate::schema::gatherings::dsl::*;
        let mut conn = self.pool.get().await?;

        gatherings
            .find(gathering_id)
            .select(GatheringRecord::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map(|found| found.map(Gathering::from))
            .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "select gathering"))
    }

    /// Gatherings only protect `created_at`: the caller's `deleted_at` is written too.
    async fn update_by_id(&self, gathering: &Gathering) -> AppResult<Option<Gathering>> {
        use crate::schema::gatherings::dsl::*;

        if self.find_by_id(gathering.id).await?.is_none() {
            return Ok(None);
        }

        let mut conn = self.pool.get().await?;
        let gathering_id = gathering.id;
        let record = GatheringRecord::from(&Gathering {
            updated_at: Timestamp::now(),
            ..gathering.clone()
        });

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::update(gatherings.find(gathering_id))
                    .set((
                        creator.eq(record.creator),
                        type_.eq(record.gathering_type),
                        scheduled_at.eq(record.scheduled_at),
                        name.eq(record.name),
                        location.eq(record.location),
                        updated_at.eq(record.updated_at),
                        deleted_at.eq(record.deleted_at),
                    ))
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "update gathering"))?;

        drop(conn);
        self.find_by_id(gathering_id).await
    }

    async fn delete_by_id(&self, gathering_id: i64) -> AppResult<Gathering> {
        use crate::schema::gatherings::dsl::*;
        let mut conn = self.pool.get().await?;
        let now = Timestamp::now().to_diesel();

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            async move {
                diesel::update(gatherings.find(gathering_id).filter(deleted_at.is_null()))
                    .set(deleted_at.eq(now))
                    .execute(conn)
                    .await
            }
            .scope_boxed()
        })
        .await
        .map_err(|e| DatabaseErrorConverter::convert_diesel_error(e, "delete gathering"))?;

        drop(conn);
        self.find_by_id_unscoped(gathering_id)
            .await?
            .ok_or_else(|| AppError::not_found("gathering", "id", gathering_id))
    }
}
