use crate::authz::require_admin;
use crate::identity::{require_caller, Caller};
use crate::role::Role;
use crate::store::{MembershipStore, WriteBatch};
use crate::validators::require_non_empty;
use crate::MembershipError;

/// Action to change an existing member's role.
///
/// Admin-gated. Updates the member record and merges the new role into
/// the mirroring profile (company untouched) in one atomic batch. Admins
/// cannot change their own role.
pub struct UpdateMemberRoleAction<S: MembershipStore> {
    store: S,
}

impl<S: MembershipStore> UpdateMemberRoleAction<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Sets `target_uid`'s role in `company_id` to `role`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` - missing fields, out-of-enumeration role, or
    ///   target is the caller
    /// - `PermissionDenied` - caller is not an admin of the company
    /// - `NotFound` - target member does not exist
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "update_member_role", skip_all, err)
    )]
    pub async fn execute(
        &self,
        caller: Option<&Caller>,
        company_id: &str,
        target_uid: &str,
        role: &str,
    ) -> Result<Role, MembershipError> {
        let caller = require_caller(caller)?;
        require_non_empty(company_id, "companyId")?;
        require_non_empty(target_uid, "targetUid")?;
        let role = Role::parse(role)?;
        if target_uid == caller.uid {
            return Err(MembershipError::InvalidArgument(
                "cannot change your own role".to_owned(),
            ));
        }

        require_admin(&self.store, company_id, &caller.uid).await?;

        let mut batch = WriteBatch::new();
        batch.change_role(company_id, target_uid, role);
        self.store.commit(batch).await?;

        log::info!(
            target: "roster",
            "msg=\"member role updated\", company_id={}, uid={}, role={}, updated_by={}",
            company_id,
            target_uid,
            role,
            caller.uid
        );

        Ok(role)
    }
}
