//! Authorization guard for admin-gated operations.

use crate::role::Role;
use crate::store::MembershipStore;
use crate::MembershipError;

/// Requires that `caller_uid` is an admin of `company_id`.
///
/// Reads the caller's member record and succeeds silently when it exists
/// with the `admin` role; an absent record and a non-admin role both fail
/// with `PermissionDenied`. Callers must run this before building any
/// write batch, so a failed check leaves no partial mutation.
pub async fn require_admin<S: MembershipStore>(
    store: &S,
    company_id: &str,
    caller_uid: &str,
) -> Result<(), MembershipError> {
    let member = store.member(company_id, caller_uid).await?;
    match member {
        Some(m) if m.role == Role::Admin => Ok(()),
        _ => Err(MembershipError::PermissionDenied(
            "caller is not an admin of this company".to_owned(),
        )),
    }
}
