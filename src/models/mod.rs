//! Domain models and their database records.
//!
//! Each entity has a diesel-free domain struct used by services and the API,
//! and a `*Record` struct that maps one row of its PostgreSQL table.

mod attendee;
mod gathering;
mod invitation;
mod member;

pub use attendee::{Attendee, AttendeeRecord};
pub use gathering::{Gathering, GatheringRecord, GatheringType, NewGathering};
pub use invitation::{Invitation, InvitationRecord, InvitationStatus, NewInvitation};
pub use member::{Member, MemberRecord, NewMember};
