//! Repository trait definitions.
//!
//! Every storage backend implements these traits. Reads exclude soft-deleted
//! rows unless the method says otherwise; writes are atomic per call.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Attendee, Gathering, Invitation, Member};

#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Persists a new member and returns the stored row.
    async fn create(&self, member: &Member) -> AppResult<Member>;

    /// Finds a live member. `Ok(None)` when absent or soft-deleted.
    async fn find_by_id(&self, member_id: i64) -> AppResult<Option<Member>>;

    /// Finds a member including soft-deleted rows.
    async fn find_by_id_unscoped(&self, member_id: i64) -> AppResult<Option<Member>>;

    /// Overwrites name and email. `created_at` and `deleted_at` are kept.
    async fn update_by_id(&self, member: &Member) -> AppResult<Option<Member>>;

    /// Soft-deletes a member and returns the deleted snapshot.
    async fn delete_by_id(&self, member_id: i64) -> AppResult<Member>;
}

#[async_trait]
pub trait GatheringRepository: Send + Sync {
    async fn create(&self, gathering: &Gathering) -> AppResult<Gathering>;

    async fn find_by_id(&self, gathering_id: i64) -> AppResult<Option<Gathering>>;

    async fn find_by_id_unscoped(&self, gathering_id: i64) -> AppResult<Option<Gathering>>;

    /// Overwrites every column except `created_at`, including `deleted_at`.
    async fn update_by_id(&self, gathering: &Gathering) -> AppResult<Option<Gathering>>;

    async fn delete_by_id(&self, gathering_id: i64) -> AppResult<Gathering>;
}

#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn create(&self, invitation: &Invitation) -> AppResult<Invitation>;

    async fn find_by_id(&self, invitation_id: i64) -> AppResult<Option<Invitation>>;

    async fn find_by_id_unscoped(&self, invitation_id: i64) -> AppResult<Option<Invitation>>;

    /// Overwrites member, gathering and status. `created_at` and `deleted_at` are kept.
    async fn update_by_id(&self, invitation: &Invitation) -> AppResult<Option<Invitation>>;

    async fn delete_by_id(&self, invitation_id: i64) -> AppResult<Invitation>;
}

#[async_trait]
pub trait AttendeeRepository: Send + Sync {
    /// Inserts the pair, reviving it if a soft-deleted row already exists.
    async fn create(&self, attendee: &Attendee) -> AppResult<Attendee>;

    async fn find_by_member_id(&self, member_id: i64) -> AppResult<Vec<Attendee>>;

    async fn find_by_gathering_id(&self, gathering_id: i64) -> AppResult<Vec<Attendee>>;

    /// Soft-deletes the pair and returns the deleted snapshot, or `None`
    /// when no row exists for it.
    async fn delete_by_member_id_and_gathering_id(
        &self,
        member_id: i64,
        gathering_id: i64,
    ) -> AppResult<Option<Attendee>>;
}
