//! Outbound email collaborator.
//!
//! The core treats email as a best-effort notification channel: invite
//! issuance logs and swallows delivery failures, while the dedicated
//! send operation propagates them, since delivery is its whole contract.

mod templates;

#[cfg(feature = "email-resend")]
mod resend;

pub use templates::InviteEmailContent;

#[cfg(feature = "email-resend")]
pub use resend::ResendMailer;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::MailSettings;
use crate::role::Role;

/// Email sending error.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("failed to send email: {0}")]
    SendFailed(String),

    #[error("invalid email configuration: {0}")]
    InvalidConfig(String),
}

/// A transport that can deliver one email message.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a message. `from` is an RFC 5322 style sender string.
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), MailError>;
}

#[async_trait]
impl<T: Mailer + ?Sized> Mailer for &T {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), MailError> {
        (**self).send(from, to, subject, text, html).await
    }
}

#[async_trait]
impl<T: Mailer + ?Sized> Mailer for std::sync::Arc<T> {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), MailError> {
        (**self).send(from, to, subject, text, html).await
    }
}

/// A [`Mailer`] bundled with the sender settings needed to address and
/// link invite email.
pub struct InviteMailer<M: Mailer> {
    mailer: M,
    settings: MailSettings,
}

impl<M: Mailer> InviteMailer<M> {
    pub fn new(mailer: M, settings: MailSettings) -> Self {
        Self { mailer, settings }
    }

    pub fn settings(&self) -> &MailSettings {
        &self.settings
    }

    /// Renders and sends an invite email carrying `invite_url`.
    pub async fn send_invite(
        &self,
        to: &str,
        role: Role,
        invite_url: &str,
    ) -> Result<(), MailError> {
        let content = InviteEmailContent::new(role, invite_url);
        self.mailer
            .send(
                &self.settings.sender(),
                to,
                &content.subject,
                &content.text,
                &content.html,
            )
            .await
    }
}
