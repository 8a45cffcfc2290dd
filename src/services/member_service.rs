//! Member service for business logic operations.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Member, NewMember};
use crate::repositories::MemberRepository;
use crate::utils::IdGenerator;

/// Member service wrapping a `MemberRepository`.
///
/// Cloning is cheap: both fields are reference counted.
#[derive(Clone)]
pub struct MemberService {
    repo: Arc<dyn MemberRepository>,
    ids: Arc<IdGenerator>,
}

impl MemberService {
    /// Creates a new MemberService with the given repository and ID source.
    pub fn new(repo: Arc<dyn MemberRepository>, ids: Arc<IdGenerator>) -> Self {
        Self { repo, ids }
    }

    /// Registers a new member under a freshly generated ID.
    ///
    /// # Arguments
    /// * `new_member` - Name and email of the member
    ///
    /// # Returns
    /// The stored member with its timestamps
    pub async fn register(&self, new_member: NewMember) -> AppResult<Member> {
        let member = new_member.into_member(self.ids.next_id());
        tracing::debug!(member_id = member.id, "Registering member");

        self.repo
            .create(&member)
            .await
            .inspect_err(|e| tracing::error!(error = %e, member_id = member.id, "Failed to register member"))
    }

    /// Gets a live member by ID.
    ///
    /// # Returns
    /// The member if found, or `NotFound` for absent and soft-deleted rows
    pub async fn find_member_by_id(&self, id: i64) -> AppResult<Member> {
        tracing::debug!(member_id = id, "Finding member");

        self.repo
            .find_by_id(id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, member_id = id, "Failed to find member"))?
            .ok_or_else(|| AppError::not_found("member", "id", id))
    }

    /// Rewrites name and email of an existing member.
    ///
    /// The existence check runs first, so a missing member never reaches the
    /// repository write path.
    pub async fn update_member_by_id(&self, id: i64, changes: NewMember) -> AppResult<Member> {
        self.find_member_by_id(id).await?;

        let member = changes.into_member(id);
        self.repo
            .update_by_id(&member)
            .await
            .inspect_err(|e| tracing::error!(error = %e, member_id = id, "Failed to update member"))?
            .ok_or_else(|| AppError::not_found("member", "id", id))
    }

    /// Soft-deletes an existing member and returns the deleted snapshot.
    pub async fn delete_member_by_id(&self, id: i64) -> AppResult<Member> {
        self.find_member_by_id(id).await?;

        self.repo
            .delete_by_id(id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, member_id = id, "Failed to delete member"))
    }
}
