//! Configuration for the membership core.
//!
//! Plain structs with defaults; loading values from the environment or a
//! file is the embedding application's concern.

use crate::crypto::DEFAULT_TOKEN_LENGTH;

/// Crate-wide configuration.
#[derive(Debug, Clone)]
pub struct RosterConfig {
    /// Length of generated invite tokens, in alphanumeric characters.
    ///
    /// Default is 32 (~190 bits of entropy). Minimum recommended is 32.
    pub token_length: usize,

    /// Outbound email settings. `None` means no email service is
    /// configured: invite issuance still succeeds (the token is returned
    /// for out-of-band sharing), but the direct-send operation fails.
    pub mail: Option<MailSettings>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            token_length: DEFAULT_TOKEN_LENGTH,
            mail: None,
        }
    }
}

impl RosterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mail(mail: MailSettings) -> Self {
        Self {
            mail: Some(mail),
            ..Self::default()
        }
    }
}

/// Settings for outbound invite email.
#[derive(Debug, Clone)]
pub struct MailSettings {
    /// Sender address, e.g. `team@example.com`.
    pub from_address: String,
    /// Optional display name for the sender.
    pub from_name: Option<String>,
    /// Base URL of the application, used to build redemption links.
    pub app_base_url: String,
}

impl MailSettings {
    pub fn new(from_address: impl Into<String>, app_base_url: impl Into<String>) -> Self {
        Self {
            from_address: from_address.into(),
            from_name: None,
            app_base_url: app_base_url.into(),
        }
    }

    /// RFC 5322 style sender, `Name <address>` when a name is set.
    pub fn sender(&self) -> String {
        match &self.from_name {
            Some(name) => format!("{} <{}>", name, self.from_address),
            None => self.from_address.clone(),
        }
    }

    /// Redemption URL embedding the invite token.
    pub fn invite_url(&self, token: &str) -> String {
        format!(
            "{}/invite/accept?token={}",
            self.app_base_url.trim_end_matches('/'),
            token
        )
    }
}
