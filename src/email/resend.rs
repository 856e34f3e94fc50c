//! Resend email transport.

use async_trait::async_trait;
use resend_rs::{types::CreateEmailBaseOptions, Resend};

use super::{MailError, Mailer};

/// [`Mailer`] backed by the Resend API.
pub struct ResendMailer {
    client: Resend,
}

impl ResendMailer {
    /// Create a mailer with the given API key.
    pub fn new(api_key: &str) -> Self {
        Self {
            client: Resend::new(api_key),
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), MailError> {
        let email = CreateEmailBaseOptions::new(from, vec![to.to_string()], subject)
            .with_text(text)
            .with_html(html);

        self.client
            .emails
            .send(email)
            .await
            .map_err(|e| MailError::SendFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailer_creation() {
        let mailer = ResendMailer::new("re_test_key");
        assert!(std::mem::size_of_val(&mailer) > 0);
    }
}
