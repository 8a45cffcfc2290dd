//! Repository layer for data access operations.
//!
//! Each entity has a trait in [`traits`] with a PostgreSQL implementation and
//! an in-memory implementation. The backend is picked by `storage.backend`.

mod attendee_repo;
mod gathering_repo;
mod invitation_repo;
pub mod memory;
mod member_repo;
mod traits;

pub use attendee_repo::PgAttendeeRepository;
pub use gathering_repo::PgGatheringRepository;
pub use invitation_repo::PgInvitationRepository;
pub use member_repo::PgMemberRepository;
pub use traits::{AttendeeRepository, GatheringRepository, InvitationRepository, MemberRepository};

use std::sync::Arc;

use crate::db::AsyncDbPool;
use memory::{
    MemoryAttendeeRepository, MemoryGatheringRepository, MemoryInvitationRepository,
    MemoryMemberRepository,
};

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub members: Arc<dyn MemberRepository>,
    pub gatherings: Arc<dyn GatheringRepository>,
    pub invitations: Arc<dyn InvitationRepository>,
    pub attendees: Arc<dyn AttendeeRepository>,
}

impl Repositories {
    /// Creates PostgreSQL-backed repositories sharing one connection pool.
    ///
    /// # Arguments
    /// * `pool` - The async database connection pool
    pub fn postgres(pool: AsyncDbPool) -> Self {
        Self {
            members: Arc::new(PgMemberRepository::new(pool.clone())),
            gatherings: Arc::new(PgGatheringRepository::new(pool.clone())),
            invitations: Arc::new(PgInvitationRepository::new(pool.clone())),
            attendees: Arc::new(PgAttendeeRepository::new(pool)),
        }
    }

    /// Creates empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            members: Arc::new(MemoryMemberRepository::new()),
            gatherings: Arc::new(MemoryGatheringRepository::new()),
            invitations: Arc::new(MemoryInvitationRepository::new()),
            attendees: Arc::new(MemoryAttendeeRepository::new()),
        }
    }
}
