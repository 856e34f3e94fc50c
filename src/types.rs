//! Core records for membership management.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::role::Role;

/// An account's authoritative role record within one company.
///
/// Keyed by `uid`, unique within a company. An account is a member of at
/// most one company; the profile denormalization depends on that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    /// Account identifier.
    pub uid: String,
    /// Email the account was added or invited under.
    pub email: String,
    /// The member's role in the company.
    pub role: Role,
    /// When the member was added.
    pub added_at: DateTime<Utc>,
}

/// A one-time redeemable capability representing an unaccepted invitation.
///
/// Keyed by a globally unique opaque token; redemption deletes it and
/// creates the corresponding [`Member`]. There is no expiry: an invite
/// stays pending until it is redeemed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingInvite {
    /// Random redemption token, unique across all companies.
    pub token: String,
    /// Company the invite grants membership in.
    pub company_id: String,
    /// Email the invite was sent to.
    pub email: String,
    /// Role granted on redemption.
    pub role: Role,
    /// When the invite was issued.
    pub invited_at: DateTime<Utc>,
    /// Account id of the admin who issued the invite.
    pub invited_by: String,
}

/// A denormalized, per-account cache of current company and role.
///
/// Exists so a client can resolve "what company/role am I in" with a
/// single point read. After every completed operation it exactly mirrors
/// the account's `Member` record; after removal both fields are null
/// (the profile itself is cleared, not deleted).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account identifier.
    pub uid: String,
    /// Company the account currently belongs to, if any.
    pub company_id: Option<String>,
    /// Role within that company, if any.
    pub role: Option<Role>,
}

impl UserProfile {
    /// Profile mirroring a current membership.
    pub fn member_of(uid: impl Into<String>, company_id: impl Into<String>, role: Role) -> Self {
        Self {
            uid: uid.into(),
            company_id: Some(company_id.into()),
            role: Some(role),
        }
    }

    /// Profile of an account with no membership.
    pub fn cleared(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            company_id: None,
            role: None,
        }
    }
}
