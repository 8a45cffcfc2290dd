//! In-memory repository backend.
//!
//! Tables are `tokio::sync::RwLock`-guarded maps. Each write holds the write
//! lock for its whole duration, so a write is atomic with respect to readers,
//! matching the per-call transaction of the PostgreSQL backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::models::{Attendee, Gathering, Invitation, Member};
use crate::repositories::{
    AttendeeRepository, GatheringRepository, InvitationRepository, MemberRepository,
};

type Table<K, V> = Arc<RwLock<HashMap<K, V>>>;

fn duplicate(entity: &str, value: impl ToString) -> AppError {
    AppError::Duplicate {
        entity: entity.to_string(),
        field: "id".to_string(),
        value: value.to_string(),
    }
}

#[derive(Clone, Default)]
pub struct MemoryMemberRepository {
    rows: Table<i64, Member>,
}

impl MemoryMemberRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberRepository for MemoryMemberRepository {
    async fn create(&self, member: &Member) -> AppResult<Member> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&member.id) {
            return Err(duplicate("members", member.id));
        }

        let now = Timestamp::now();
        let stored = Member {
            created_at: now,
            updated_at: now,
            deleted_at: None,
            ..member.clone()
        };
        rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, member_id: i64) -> AppResult<Option<Member>> {
        let rows = self.rows.read().await;
        Ok(rows.get(&member_id).filter(|m| m.deleted_at.is_none()).cloned())
    }

    async fn find_by_id_unscoped(&self, member_id: i64) -> AppResult<Option<Member>> {
        Ok(self.rows.read().await.get(&member_id).cloned())
    }

    async fn update_by_id(&self, member: &Member) -> AppResult<Option<Member>> {
        let mut rows = self.rows.write().await;
        let Some(current) = rows.get_mut(&member.id).filter(|m| m.deleted_at.is_none()) else {
            return Ok(None);
        };

        current.first_name = member.first_name.clone();
        current.last_name = member.last_name.clone();
        current.email = member.email.clone();
        current.updated_at = Timestamp::now();
        Ok(Some(current.clone()))
    }

    async fn delete_by_id(&self, member_id: i64) -> AppResult<Member> {
        let mut rows = self.rows.write().await;
        let current = rows
            .get_mut(&member_id)
            .ok_or_else(|| AppError::not_found("member", "id", member_id))?;

        if current.deleted_at.is_none() {
            current.deleted_at = Some(Timestamp::now());
        }
        Ok(current.clone())
    }
}

#[derive(Clone, Default)]
pub struct MemoryGatheringRepository {
    rows: Table<i64, Gathering>,
}

impl MemoryGatheringRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GatheringRepository for MemoryGatheringRepository {
    async fn create(&self, gathering: &Gathering) -> AppResult<Gathering> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&gathering.id) {
            return Err(duplicate("gatherings", gathering.id));
        }

        let now = Timestamp::now();
        let stored = Gathering {
            created_at: now,
            updated_at: now,
            deleted_at: None,
            ..gathering.clone()
        };
        rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, gathering_id: i64) -> AppResult<Option<Gathering>> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(&gathering_id)
            .filter(|g| g.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_id_unscoped(&self, gathering_id: i64) -> AppResult<Option<Gathering>> {
        Ok(self.rows.read().await.get(&gathering_id).cloned())
    }

    async fn update_by_id(&self, gathering: &Gathering) -> AppResult<Option<Gathering>> {
        let mut rows = self.rows.write().await;
        let Some(current) = rows
            .get_mut(&gathering.id)
            .filter(|g| g.deleted_at.is_none())
        else {
            return Ok(None);
        };

        *current = Gathering {
            created_at: current.created_at,
            updated_at: Timestamp::now(),
            ..gathering.clone()
        };
        // The re-read goes through the live-only path, like the PostgreSQL backend.
        Ok(Some(current.clone()).filter(|g| g.deleted_at.is_none()))
    }

    async fn delete_by_id(&self, gathering_id: i64) -> AppResult<Gathering> {
        let mut rows = self.rows.write().await;
        let current = rows
            .get_mut(&gathering_id)
            .ok_or_else(|| AppError::not_found("gathering", "id", gathering_id))?;

        if current.deleted_at.is_none() {
            current.deleted_at = Some(Timestamp::now());
        }
        Ok(current.clone())
    }
}

#[derive(Clone, Default)]
pub struct MemoryInvitationRepository {
    rows: Table<i64, Invitation>,
}

impl MemoryInvitationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored invitation, deleted ones included.
    #[cfg(test)]
    pub async fn snapshot(&self) -> Vec<Invitation> {
        self.rows.read().await.values().cloned().collect()
    }
}

#[async_trait]
impl InvitationRepository for MemoryInvitationRepository {
    async fn create(&self, invitation: &Invitation) -> AppResult<Invitation> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&invitation.id) {
            return Err(duplicate("invitations", invitation.id));
        }

        let now = Timestamp::now();
        let stored = Invitation {
            created_at: now,
            updated_at: now,
            deleted_at: None,
            ..invitation.clone()
        };
        rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, invitation_id: i64) -> AppResult<Option<Invitation>> {
        let rows = self.rows.read().await;
        Ok(rows
            .get(&invitation_id)
            .filter(|i| i.deleted_at.is_none())
            .cloned())
    }

    async fn find_by_id_unscoped(&self, invitation_id: i64) -> AppResult<Option<Invitation>> {
        Ok(self.rows.read().await.get(&invitation_id).cloned())
    }

    async fn update_by_id(&self, invitation: &Invitation) -> AppResult<Option<Invitation>> {
        let mut rows = self.rows.write().await;
        let Some(current) = rows
            .get_mut(&invitation.id)
            .filter(|i| i.deleted_at.is_none())
        else {
            return Ok(None);
        };

        current.member_id = invitation.member_id;
        current.gathering_id = invitation.gathering_id;
        current.status = invitation.status;
        current.updated_at = Timestamp::now();
        Ok(Some(current.clone()))
    }

    async fn delete_by_id(&self, invitation_id: i64) -> AppResult<Invitation> {
        let mut rows = self.rows.write().await;
        let current = rows
            .get_mut(&invitation_id)
            .ok_or_else(|| AppError::not_found("invitation", "id", invitation_id))?;

        if current.deleted_at.is_none() {
            current.deleted_at = Some(Timestamp::now());
        }
        Ok(current.clone())
    }
}

#[derive(Clone, Default)]
pub struct MemoryAttendeeRepository {
    rows: Table<(i64, i64), Attendee>,
}

impl MemoryAttendeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn live_where(&self, keep: impl Fn(&Attendee) -> bool) -> Vec<Attendee> {
        let rows = self.rows.read().await;
        let mut found: Vec<Attendee> = rows
            .values()
            .filter(|a| a.deleted_at.is_none() && keep(a))
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.created_at, a.member_id, a.gathering_id));
        found
    }
}

#[async_trait]
impl AttendeeRepository for MemoryAttendeeRepository {
    async fn create(&self, attendee: &Attendee) -> AppResult<Attendee> {
        let mut rows = self.rows.write().await;
        let now = Timestamp::now();
        let key = (attendee.member_id, attendee.gathering_id);

        let stored = rows
            .entry(key)
            .and_modify(|existing| {
                existing.deleted_at = None;
                existing.updated_at = now;
            })
            .or_insert_with(|| Attendee {
                created_at: now,
                updated_at: now,
                deleted_at: None,
                ..attendee.clone()
            });
        Ok(stored.clone())
    }

    async fn find_by_member_id(&self, member_id: i64) -> AppResult<Vec<Attendee>> {
        Ok(self.live_where(|a| a.member_id == member_id).await)
    }

    async fn find_by_gathering_id(&self, gathering_id: i64) -> AppResult<Vec<Attendee>> {
        Ok(self.live_where(|a| a.gathering_id == gathering_id).await)
    }

    async fn delete_by_member_id_and_gathering_id(
        &self,
        member_id: i64,
        gathering_id: i64,
    ) -> AppResult<Option<Attendee>> {
        let mut rows = self.rows.write().await;
        let Some(current) = rows.get_mut(&(member_id, gathering_id)) else {
            return Ok(None);
        };

        if current.deleted_at.is_none() {
            current.deleted_at = Some(Timestamp::now());
        }
        Ok(Some(current.clone()))
    }
}
