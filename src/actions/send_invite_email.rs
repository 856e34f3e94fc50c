use crate::email::{InviteMailer, MailError, Mailer};
use crate::identity::{require_caller, Caller};
use crate::role::Role;
use crate::validators::{require_non_empty, validate_email};
use crate::MembershipError;

/// Input for the direct-send operation.
#[derive(Debug, Clone)]
pub struct SendInviteEmailInput {
    pub to: String,
    pub invite_url: String,
    /// Role string, validated against the enumeration on entry.
    pub role: String,
}

/// Action that sends an invite email and nothing else (resends, or
/// UI-triggered dispatch).
///
/// Unlike invite issuance, delivery here is the operation's entire
/// purpose, so a missing email configuration is `FailedPrecondition` and
/// a provider failure is the operation's own failure.
pub struct SendInviteEmailAction<M: Mailer> {
    mailer: Option<InviteMailer<M>>,
}

impl<M: Mailer> SendInviteEmailAction<M> {
    pub fn new(mailer: Option<InviteMailer<M>>) -> Self {
        Self { mailer }
    }

    /// Sends the invite email described by `input`.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "send_invite_email", skip_all, err)
    )]
    pub async fn execute(
        &self,
        caller: Option<&Caller>,
        input: SendInviteEmailInput,
    ) -> Result<(), MembershipError> {
        require_caller(caller)?;
        validate_email(&input.to)?;
        require_non_empty(&input.invite_url, "inviteUrl")?;
        let role = Role::parse(&input.role)?;

        let mailer = self.mailer.as_ref().ok_or_else(|| {
            MembershipError::FailedPrecondition("email service is not configured".to_owned())
        })?;

        mailer
            .send_invite(&input.to, role, &input.invite_url)
            .await
            .map_err(|e| match e {
                MailError::InvalidConfig(msg) => MembershipError::FailedPrecondition(msg),
                MailError::SendFailed(msg) => {
                    MembershipError::Internal(format!("email delivery failed: {}", msg))
                }
            })?;

        log::info!(
            target: "roster",
            "msg=\"invite email sent\", to=\"{}\", role={}",
            input.to,
            role
        );

        Ok(())
    }
}
