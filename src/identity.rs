//! Identity provider collaborator interface.

use async_trait::async_trait;

use crate::MembershipError;

/// The authenticated identity of the current request, as verified by the
/// external identity provider. The transport layer constructs this; the
/// core only consumes it.
#[derive(Debug, Clone, PartialEq)]
pub struct Caller {
    /// Account identifier.
    pub uid: String,
    /// Verified email address.
    pub email: String,
}

impl Caller {
    pub fn new(uid: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: email.into(),
        }
    }
}

/// Requires an authenticated caller, mapping its absence to the
/// `Unauthenticated` error every operation surfaces.
pub fn require_caller(caller: Option<&Caller>) -> Result<&Caller, MembershipError> {
    caller.ok_or(MembershipError::Unauthenticated)
}

/// Resolves email addresses to account identifiers.
///
/// "Not found" is an expected outcome for invite issuance, not an error:
/// it is what routes the flow to a pending invite instead of a direct add.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Account id for an email, or `None` if no account exists.
    async fn uid_for_email(&self, email: &str) -> Result<Option<String>, MembershipError>;
}

#[async_trait]
impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
    async fn uid_for_email(&self, email: &str) -> Result<Option<String>, MembershipError> {
        (**self).uid_for_email(email).await
    }
}

#[async_trait]
impl<T: IdentityProvider + ?Sized> IdentityProvider for std::sync::Arc<T> {
    async fn uid_for_email(&self, email: &str) -> Result<Option<String>, MembershipError> {
        (**self).uid_for_email(email).await
    }
}
