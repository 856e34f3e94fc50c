//! Team membership and invitation lifecycle management.
//!
//! `roster` implements the membership core of a multi-tenant application:
//! adding members to a company (directly or via invitation), accepting
//! invitations, removing members, and changing roles. Storage, identity,
//! and email are pluggable collaborators behind async traits, so the core
//! logic runs unchanged against production backends or the bundled
//! in-memory mocks.
//!
//! Every mutation that touches more than one record goes through a single
//! atomic [`WriteBatch`], which is what keeps the authoritative `Member`
//! record and the denormalized `UserProfile` consistent.

pub mod actions;
pub mod authz;
pub mod config;
pub mod crypto;
pub mod email;
pub mod identity;
pub mod role;
pub mod store;
pub mod types;
pub mod validators;

#[cfg(feature = "mocks")]
pub mod mocks;

pub use actions::{
    AcceptInviteAction, AcceptOutcome, InviteMemberAction, InviteMemberInput, InviteOutcome,
    RemoveMemberAction, SendInviteEmailAction, SendInviteEmailInput, UpdateMemberRoleAction,
};
pub use authz::require_admin;
pub use config::{MailSettings, RosterConfig};
pub use crypto::SecretString;
pub use email::{InviteMailer, MailError, Mailer};
pub use identity::{Caller, IdentityProvider};
pub use role::Role;
pub use store::{MembershipStore, WriteBatch, WriteOp};
pub use types::{Member, PendingInvite, UserProfile};

#[cfg(feature = "mocks")]
pub use mocks::{MockIdentityProvider, MockMailer, MockMembershipStore};

use std::fmt;

/// Errors surfaced by membership operations.
///
/// Variants map one-to-one onto the caller-facing failure taxonomy:
/// every failure carries a machine-readable kind (see [`MembershipError::kind`])
/// and a human-readable message naming the violated precondition.
#[derive(Debug, Clone, PartialEq)]
pub enum MembershipError {
    /// No authenticated caller identity was supplied.
    Unauthenticated,
    /// Missing, malformed, or out-of-enumeration input.
    InvalidArgument(String),
    /// Caller lacks the permission the operation requires.
    PermissionDenied(String),
    /// The referenced record does not exist (or no longer exists).
    NotFound,
    /// A collaborator the operation depends on is not configured.
    FailedPrecondition(String),
    /// Storage backend or other internal fault.
    Internal(String),
}

impl MembershipError {
    /// Machine-readable kind string for transports and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MembershipError::Unauthenticated => "unauthenticated",
            MembershipError::InvalidArgument(_) => "invalid_argument",
            MembershipError::PermissionDenied(_) => "permission_denied",
            MembershipError::NotFound => "not_found",
            MembershipError::FailedPrecondition(_) => "failed_precondition",
            MembershipError::Internal(_) => "internal",
        }
    }
}

impl std::error::Error for MembershipError {}

impl fmt::Display for MembershipError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MembershipError::Unauthenticated => write!(f, "Authentication required"),
            MembershipError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            MembershipError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            MembershipError::NotFound => write!(f, "Not found"),
            MembershipError::FailedPrecondition(msg) => write!(f, "Failed precondition: {}", msg),
            MembershipError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}
