//! Invitation workflow across members, gatherings and attendees.
//!
//! Each step is a separate repository call. There is no transaction spanning
//! the invitation and attendee writes: a failure after the invitation write
//! leaves that write in place and returns the error.

use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::{Attendee, Gathering, Invitation, Member, NewInvitation};
use crate::repositories::{
    AttendeeRepository, GatheringRepository, InvitationRepository, MemberRepository, Repositories,
};
use crate::utils::IdGenerator;

#[derive(Clone)]
pub struct InvitationService {
    members: Arc<dyn MemberRepository>,
    gatherings: Arc<dyn GatheringRepository>,
    invitations: Arc<dyn InvitationRepository>,
    attendees: Arc<dyn AttendeeRepository>,
    ids: Arc<IdGenerator>,
}

impl InvitationService {
    /// Creates a new InvitationService over the given repositories.
    pub fn new(repos: &Repositories, ids: Arc<IdGenerator>) -> Self {
        Self {
            members: repos.members.clone(),
            gatherings: repos.gatherings.clone(),
            invitations: repos.invitations.clone(),
            attendees: repos.attendees.clone(),
            ids,
        }
    }

    async fn require_member(&self, member_id: i64) -> AppResult<Member> {
        self.members
            .find_by_id(member_id)
            .await?
            .ok_or_else(|| AppError::not_found("member", "id", member_id))
    }

    async fn require_gathering(&self, gathering_id: i64) -> AppResult<Gathering> {
        self.gatherings
            .find_by_id(gathering_id)
            .await?
            .ok_or_else(|| AppError::not_found("gathering", "id", gathering_id))
    }

    /// Invites a member to a gathering and records the attendee pair.
    ///
    /// Steps run in order and stop at the first failure:
    /// member lookup, gathering lookup, invitation insert, attendee insert,
    /// invitation re-read. An attendee failure leaves the invitation stored.
    pub async fn invite_member_to_gathering(
        &self,
        new_invitation: NewInvitation,
    ) -> AppResult<Invitation> {
        tracing::debug!(
            member_id = new_invitation.member_id,
            gathering_id = new_invitation.gathering_id,
            "Inviting member to gathering"
        );

        self.require_member(new_invitation.member_id).await?;
        self.require_gathering(new_invitation.gathering_id).await?;

        let invitation = new_invitation.into_invitation(self.ids.next_id());
        let created = self
            .invitations
            .create(&invitation)
            .await
            .inspect_err(|e| tracing::error!(error = %e, invitation_id = invitation.id, "Failed to create invitation"))?;

        self.attendees
            .create(&Attendee::new(created.member_id, created.gathering_id))
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    invitation_id = created.id,
                    "Failed to create attendee, invitation left in place"
                )
            })?;

        self.find_invitation_by_id(created.id).await
    }

    pub async fn find_invitation_by_id(&self, id: i64) -> AppResult<Invitation> {
        tracing::debug!(invitation_id = id, "Finding invitation");

        self.invitations
            .find_by_id(id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, invitation_id = id, "Failed to find invitation"))?
            .ok_or_else(|| AppError::not_found("invitation", "id", id))
    }

    /// Rewrites member, gathering and status of an existing invitation.
    ///
    /// The invitation, then the member, then the gathering must exist. The
    /// attendee table is left untouched even when the pair changes.
    pub async fn update_invitation_by_id(
        &self,
        id: i64,
        changes: NewInvitation,
    ) -> AppResult<Invitation> {
        self.find_invitation_by_id(id).await?;
        self.require_member(changes.member_id).await?;
        self.require_gathering(changes.gathering_id).await?;

        self.invitations
            .update_by_id(&changes.into_invitation(id))
            .await
            .inspect_err(|e| tracing::error!(error = %e, invitation_id = id, "Failed to update invitation"))?
            .ok_or_else(|| AppError::not_found("invitation", "id", id))
    }

    /// Soft-deletes an invitation and then its attendee pair.
    ///
    /// A pair with no attendee row (the invitation was moved to another
    /// member or gathering) is skipped. If the attendee step fails the error
    /// is returned and the invitation stays deleted.
    pub async fn delete_invitation_by_id(&self, id: i64) -> AppResult<Invitation> {
        let existing = self.find_invitation_by_id(id).await?;

        let deleted = self
            .invitations
            .delete_by_id(id)
            .await
            .inspect_err(|e| tracing::error!(error = %e, invitation_id = id, "Failed to delete invitation"))?;

        let attendee = self
            .attendees
            .delete_by_member_id_and_gathering_id(existing.member_id, existing.gathering_id)
            .await
            .inspect_err(|e| {
                tracing::error!(
                    error = %e,
                    invitation_id = id,
                    "Failed to delete attendee, invitation stays deleted"
                )
            })?;

        if attendee.is_none() {
            tracing::debug!(
                invitation_id = id,
                member_id = existing.member_id,
                gathering_id = existing.gathering_id,
                "No attendee row for invitation pair"
            );
        }

        Ok(deleted)
    }

    /// Lists live attendee rows of a live gathering.
    pub async fn attendees_of_gathering(&self, gathering_id: i64) -> AppResult<Vec<Attendee>> {
        self.require_gathering(gathering_id).await?;
        self.attendees.find_by_gathering_id(gathering_id).await
    }

    /// Lists live attendee rows of a live member.
    pub async fn gatherings_of_member(&self, member_id: i64) -> AppResult<Vec<Attendee>> {
        self.require_member(member_id).await?;
        self.attendees.find_by_member_id(member_id).await
    }
}
