use crate::authz::require_admin;
use crate::identity::{require_caller, Caller};
use crate::store::{MembershipStore, WriteBatch};
use crate::validators::require_non_empty;
use crate::MembershipError;

/// Action to remove a member from a company.
///
/// Admin-gated. Deletes the member record and clears (does not delete)
/// the mirroring profile in one atomic batch. Admins cannot remove
/// themselves.
pub struct RemoveMemberAction<S: MembershipStore> {
    store: S,
}

impl<S: MembershipStore> RemoveMemberAction<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Removes `target_uid` from `company_id`.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` - missing fields, or target is the caller
    /// - `PermissionDenied` - caller is not an admin of the company
    /// - `NotFound` - target member does not exist (surfaced from the
    ///   store's commit-time check, not swallowed)
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "remove_member", skip_all, err)
    )]
    pub async fn execute(
        &self,
        caller: Option<&Caller>,
        company_id: &str,
        target_uid: &str,
    ) -> Result<(), MembershipError> {
        let caller = require_caller(caller)?;
        require_non_empty(company_id, "companyId")?;
        require_non_empty(target_uid, "targetUid")?;
        if target_uid == caller.uid {
            return Err(MembershipError::InvalidArgument(
                "cannot remove yourself from the company".to_owned(),
            ));
        }

        require_admin(&self.store, company_id, &caller.uid).await?;

        let mut batch = WriteBatch::new();
        batch.clear_membership(company_id, target_uid);
        self.store.commit(batch).await?;

        log::info!(
            target: "roster",
            "msg=\"member removed\", company_id={}, uid={}, removed_by={}",
            company_id,
            target_uid,
            caller.uid
        );

        Ok(())
    }
}
