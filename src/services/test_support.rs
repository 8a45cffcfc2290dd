//! Fixtures and repository wrappers shared by the service tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{Attendee, GatheringType, Member, NewGathering, NewMember};
use crate::repositories::memory::{MemoryAttendeeRepository, MemoryMemberRepository};
use crate::repositories::{AttendeeRepository, MemberRepository};

pub fn john_doe() -> NewMember {
    NewMember {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        email: "john@doe.com".to_string(),
    }
}

pub fn rust_meetup(creator: i64) -> NewGathering {
    NewGathering {
        creator,
        gathering_type: GatheringType::FixedNumberOfAttendees,
        scheduled_at: None,
        name: "Rust Meetup".to_string(),
        location: "Jakarta".to_string(),
    }
}

/// Member repository that counts write-path calls.
#[derive(Default)]
pub struct SpyMemberRepository {
    inner: MemoryMemberRepository,
    updates: AtomicUsize,
}

impl SpyMemberRepository {
    pub fn update_calls(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MemberRepository for SpyMemberRepository {
    async fn create(&self, member: &Member) -> AppResult<Member> {
        self.inner.create(member).await
    }

    async fn find_by_id(&self, member_id: i64) -> AppResult<Option<Member>> {
        self.inner.find_by_id(member_id).await
    }

    async fn find_by_id_unscoped(&self, member_id: i64) -> AppResult<Option<Member>> {
        self.inner.find_by_id_unscoped(member_id).await
    }

    async fn update_by_id(&self, member: &Member) -> AppResult<Option<Member>> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        self.inner.update_by_id(member).await
    }

    async fn delete_by_id(&self, member_id: i64) -> AppResult<Member> {
        self.inner.delete_by_id(member_id).await
    }
}

/// Attendee repository whose writes can be made to fail.
///
/// Reads always go through to the wrapped in-memory table.
#[derive(Default)]
pub struct FailingAttendeeRepository {
    pub inner: Arc<MemoryAttendeeRepository>,
    pub fail_create: bool,
    pub fail_delete: bool,
}

fn injected(operation: &str) -> AppError {
    AppError::Database {
        operation: operation.to_string(),
        source: anyhow::anyhow!("injected failure"),
    }
}

#[async_trait]
impl AttendeeRepository for FailingAttendeeRepository {
    async fn create(&self, attendee: &Attendee) -> AppResult<Attendee> {
        if self.fail_create {
            return Err(injected("create attendee"));
        }
        self.inner.create(attendee).await
    }

    async fn find_by_member_id(&self, member_id: i64) -> AppResult<Vec<Attendee>> {
        self.inner.find_by_member_id(member_id).await
    }

    async fn find_by_gathering_id(&self, gathering_id: i64) -> AppResult<Vec<Attendee>> {
        self.inner.find_by_gathering_id(gathering_id).await
    }

    async fn delete_by_member_id_and_gathering_id(
        &self,
        member_id: i64,
        gathering_id: i64,
    ) -> AppResult<Option<Attendee>> {
        if self.fail_delete {
            return Err(injected("delete attendee"));
        }
        self.inner
            .delete_by_member_id_and_gathering_id(member_id, gathering_id)
            .await
    }
}
