//! Gathering service for business logic operations.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Gathering, NewGathering};
use crate::repositories::GatheringRepository;
use crate::utils::IdGenerator;

#[derive(Clone)]
pub struct GatheringService {
    repo: Arc<dyn GatheringRepository>,
    ids: Arc<IdGenerator>,
}

impl GatheringService {
    pub fn new(repo: Arc<dyn GatheringRepository>, ids: Arc<IdGenerator>) -> Self {
        Self { repo, ids }
    }

    /// Creates a gathering under a freshly generated ID.
    ///
    /// The creator is stored as given; it is not checked against members.
    pub async fn create_gathering(&self, new_gathering: NewGathering) -> AppResult<Gathering> {
        let gathering = new_gathering.into_gathering(self.ids.next_id());
        tracing::debug!(gathering_id = gathering.id, creator = gathering.creator, "Creating gathering");

        self.repo
            .create(&gathering)
            .await
            .inspect_err(|e| tracing::error!(error = %e, gathering_id = gathering.id, "Failed to create gathering"))
    }

    pub async fn find_gathering_by_id(&self, id: i64) -> AppResult<Gathering> {
        tracing::debug!(gathering_id = id, "Finding gathering");

        self.repo
            .find_by_id(id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, gathering_id = id, "Failed to find gathering"))?
            .ok_or_else(|| AppError::not_found("gathering", "id", id))
    }

    /// Rewrites every field of an existing gathering except `created_at`.
    pub async fn update_gathering_by_id(
        &self,
        id: i64,
        changes: NewGathering,
    ) -> AppResult<Gathering> {
        self.find_gathering_by_id(id).await?;

        let gathering = changes.into_gathering(id);
        self.repo
            .update_by_id(&gathering)
            .await
            .inspect_err(|e| tracing::error!(error = %e, gathering_id = id, "Failed to update gathering"))?
            .ok_or_else(|| AppError::not_found("gathering", "id", id))
    }

    pub async fn delete_gathering_by_id(&self, id: i64) -> AppResult<Gathering> {
        self.find_gathering_by_id(id).await?;

        self.repo
            .delete_by_id(id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, gathering_id = id, "Failed to delete gathering"))
    }
}
