//! Caller-facing membership operations.
//!
//! Each operation is an action struct generic over the collaborator
//! traits it needs, with an async `execute`. Control flow is uniform:
//! validate input shape and role enumeration, consult the authorization
//! guard (redemption excepted, it is self-service), perform one atomic
//! batch against the store, then optionally fire the best-effort email
//! notification.

mod accept;
mod invite;
mod remove;
mod send_invite_email;
mod update_role;

pub use accept::{AcceptInviteAction, AcceptOutcome};
pub use invite::{InviteMemberAction, InviteMemberInput, InviteOutcome};
pub use remove::RemoveMemberAction;
pub use send_invite_email::{SendInviteEmailAction, SendInviteEmailInput};
pub use update_role::UpdateMemberRoleAction;
