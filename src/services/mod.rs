//! Service layer for business logic operations.
//!
//! Services turn empty repository lookups into `NotFound` errors and run the
//! cross-entity checks of the invitation workflow.

mod gathering_service;
mod invitation_service;
mod member_service;
#[cfg(test)]
pub(crate) mod test_support;

pub use gathering_service::GatheringService;
pub use invitation_service::InvitationService;
pub use member_service::MemberService;

use std::sync::Arc;

use crate::repositories::Repositories;
use crate::utils::IdGenerator;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since every field holds `Arc`s.
#[derive(Clone)]
pub struct Services {
    pub members: MemberService,
    pub gatherings: GatheringService,
    pub invitations: InvitationService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    ///
    /// All services draw IDs from the same generator.
    pub fn new(repos: Repositories, ids: Arc<IdGenerator>) -> Self {
        Self {
            members: MemberService::new(repos.members.clone(), ids.clone()),
            gatherings: GatheringService::new(repos.gatherings.clone(), ids.clone()),
            invitations: InvitationService::new(&repos, ids),
        }
    }
}
