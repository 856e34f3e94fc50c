use chrono::Utc;

use crate::authz::require_admin;
use crate::config::RosterConfig;
use crate::crypto::{generate_token, SecretString};
use crate::email::{InviteMailer, Mailer};
use crate::identity::{require_caller, Caller, IdentityProvider};
use crate::role::Role;
use crate::store::{MembershipStore, WriteBatch};
use crate::types::{Member, PendingInvite};
use crate::validators::{require_non_empty, validate_email};
use crate::MembershipError;

/// Input for inviting someone into a company.
#[derive(Debug, Clone)]
pub struct InviteMemberInput {
    pub company_id: String,
    pub email: String,
    /// Role string, validated against the enumeration on entry.
    pub role: String,
}

/// Result of an invite operation.
#[derive(Debug)]
pub enum InviteOutcome {
    /// The email resolved to an existing account, which was added as a
    /// member immediately. No invite token exists.
    Added { uid: String, email: String },
    /// No account exists for that email; a pending invite was created.
    /// The token is returned so the admin can share it out-of-band if
    /// email dispatch is unavailable.
    Invited { email: String, token: SecretString },
}

/// Action to add or invite a member to a company.
///
/// If the email resolves to an existing account, the member and its
/// profile are written in one atomic batch. Otherwise a pending invite is
/// created and an invite email is sent best-effort: delivery failure is
/// logged and never fails the operation, since the persisted invite is
/// the source of truth.
pub struct InviteMemberAction<S, P, M>
where
    S: MembershipStore,
    P: IdentityProvider,
    M: Mailer,
{
    store: S,
    identity: P,
    mailer: Option<InviteMailer<M>>,
    config: RosterConfig,
}

impl<S, P, M> InviteMemberAction<S, P, M>
where
    S: MembershipStore,
    P: IdentityProvider,
    M: Mailer,
{
    /// Creates the action without an email transport. Invites still
    /// succeed; tokens are only shared through the returned outcome.
    pub fn new(store: S, identity: P, config: RosterConfig) -> Self {
        Self {
            store,
            identity,
            mailer: None,
            config,
        }
    }

    /// Creates the action with an email transport for invite delivery.
    pub fn with_mailer(
        store: S,
        identity: P,
        config: RosterConfig,
        mailer: InviteMailer<M>,
    ) -> Self {
        Self {
            store,
            identity,
            mailer: Some(mailer),
            config,
        }
    }

    /// Adds or invites a member. Caller must be an admin of the company.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "invite_member", skip_all, err)
    )]
    pub async fn execute(
        &self,
        caller: Option<&Caller>,
        input: InviteMemberInput,
    ) -> Result<InviteOutcome, MembershipError> {
        let caller = require_caller(caller)?;
        require_non_empty(&input.company_id, "companyId")?;
        validate_email(&input.email)?;
        let role = Role::parse(&input.role)?;

        require_admin(&self.store, &input.company_id, &caller.uid).await?;

        // Best-effort account lookup: not-found routes to the invite path.
        if let Some(uid) = self.identity.uid_for_email(&input.email).await? {
            let member = Member {
                uid: uid.clone(),
                email: input.email.clone(),
                role,
                added_at: Utc::now(),
            };

            let mut batch = WriteBatch::new();
            batch.set_membership(&input.company_id, member);
            self.store.commit(batch).await?;

            log::info!(
                target: "roster",
                "msg=\"member added\", company_id={}, uid={}, role={}",
                input.company_id,
                uid,
                role
            );

            return Ok(InviteOutcome::Added {
                uid,
                email: input.email,
            });
        }

        let token = generate_token(self.config.token_length);
        let invite = PendingInvite {
            token: token.clone(),
            company_id: input.company_id.clone(),
            email: input.email.clone(),
            role,
            invited_at: Utc::now(),
            invited_by: caller.uid.clone(),
        };

        let mut batch = WriteBatch::new();
        batch.put_invite(invite);
        self.store.commit(batch).await?;

        log::info!(
            target: "roster",
            "msg=\"invite created\", company_id={}, email=\"{}\", role={}, invited_by={}",
            input.company_id,
            input.email,
            role,
            caller.uid
        );

        // Notification phase: outcome is observability only, never
        // correctness. The committed invite is not rolled back.
        match &self.mailer {
            Some(mailer) => {
                let invite_url = mailer.settings().invite_url(&token);
                if let Err(e) = mailer.send_invite(&input.email, role, &invite_url).await {
                    log::error!(
                        target: "roster",
                        "msg=\"invite email delivery failed\", company_id={}, email=\"{}\", error=\"{}\"",
                        input.company_id,
                        input.email,
                        e
                    );
                }
            }
            None => {
                log::warn!(
                    target: "roster",
                    "msg=\"no mailer configured, invite token returned to caller only\", company_id={}",
                    input.company_id
                );
            }
        }

        Ok(InviteOutcome::Invited {
            email: input.email,
            token: SecretString::new(token),
        })
    }
}
