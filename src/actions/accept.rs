use chrono::Utc;

use crate::crypto::SecretString;
use crate::identity::{require_caller, Caller};
use crate::role::Role;
use crate::store::{MembershipStore, WriteBatch};
use crate::types::Member;
use crate::MembershipError;

/// Result of redeeming an invite.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptOutcome {
    pub company_id: String,
    pub role: Role,
}

/// Action to redeem a pending invite. Self-service, no admin check: the
/// token itself plus the caller's verified email is the credential.
///
/// Member creation, profile update, and invite deletion are one atomic
/// batch, so partial application (member added but invite surviving) is
/// impossible, and of two concurrent redemptions of the same token at
/// most one commit succeeds.
pub struct AcceptInviteAction<S: MembershipStore> {
    store: S,
}

impl<S: MembershipStore> AcceptInviteAction<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Redeems `token` for the authenticated caller.
    ///
    /// # Errors
    ///
    /// - `NotFound` - token never existed, or was already redeemed
    /// - `PermissionDenied` - caller's email does not match the invite's
    ///   (compared case-insensitively; the invite is kept so the
    ///   legitimate holder can still redeem it)
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "accept_invite", skip_all, err)
    )]
    pub async fn execute(
        &self,
        caller: Option<&Caller>,
        token: &SecretString,
    ) -> Result<AcceptOutcome, MembershipError> {
        let caller = require_caller(caller)?;
        let token = token.expose_secret();
        if token.is_empty() {
            return Err(MembershipError::InvalidArgument(
                "token cannot be empty".to_owned(),
            ));
        }

        // Global lookup: tokens are unique across all companies, and
        // NotFound covers "never existed" and "already redeemed" alike.
        let invite = self
            .store
            .invite_by_token(token)
            .await?
            .ok_or(MembershipError::NotFound)?;

        if !invite.email.eq_ignore_ascii_case(&caller.email) {
            return Err(MembershipError::PermissionDenied(format!(
                "this invitation was sent to {}",
                invite.email
            )));
        }

        let member = Member {
            uid: caller.uid.clone(),
            email: caller.email.clone(),
            role: invite.role,
            added_at: Utc::now(),
        };

        let mut batch = WriteBatch::new();
        batch.set_membership(&invite.company_id, member);
        batch.delete_invite(token);
        // A NotFound here means a concurrent redemption deleted the
        // invite first; the batch applied nothing.
        self.store.commit(batch).await?;

        log::info!(
            target: "roster",
            "msg=\"invite accepted\", company_id={}, uid={}, role={}",
            invite.company_id,
            caller.uid,
            invite.role
        );

        Ok(AcceptOutcome {
            company_id: invite.company_id,
            role: invite.role,
        })
    }
}
