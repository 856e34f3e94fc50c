//! The fixed role enumeration and its validation.
//!
//! Every `Member`, `PendingInvite`, and non-null `UserProfile` role is one
//! of `admin`, `edit`, or `view`. Records store the typed enum, so the
//! enumeration invariant holds by construction; caller-facing inputs carry
//! strings and are validated on entry via [`Role::parse`].

use serde::{Deserialize, Serialize};

use crate::MembershipError;

/// A member's role within a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full control, including membership management.
    Admin,
    /// Read and write access to company content.
    Edit,
    /// Read-only access.
    View,
}

impl Role {
    /// String form used in storage and caller-facing payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Edit => "edit",
            Role::View => "view",
        }
    }

    /// Parses a caller-supplied role string.
    ///
    /// Returns `InvalidArgument` for anything outside the enumeration;
    /// matching is exact (no trimming, no case folding).
    pub fn parse(s: &str) -> Result<Self, MembershipError> {
        match s {
            "admin" => Ok(Role::Admin),
            "edit" => Ok(Role::Edit),
            "view" => Ok(Role::View),
            other => Err(MembershipError::InvalidArgument(format!(
                "invalid role \"{}\", expected one of: admin, edit, view",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
