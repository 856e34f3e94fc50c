//! Storage adapter contract for membership records.
//!
//! The store is the only shared mutable resource in the system. All
//! cross-record consistency comes from [`MembershipStore::commit`], an
//! atomic multi-record write: every op in a [`WriteBatch`] applies, or
//! none does. No client-side locking exists beyond that.

use async_trait::async_trait;

use crate::role::Role;
use crate::types::{Member, PendingInvite, UserProfile};
use crate::MembershipError;

/// A single keyed write or delete inside an atomic batch.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Upsert a member record under a company.
    PutMember { company_id: String, member: Member },
    /// Update an existing member's role. Fails the whole batch with
    /// `NotFound` if the member is absent at commit time.
    UpdateMemberRole {
        company_id: String,
        uid: String,
        role: Role,
    },
    /// Delete a member record. Fails the batch with `NotFound` if absent.
    DeleteMember { company_id: String, uid: String },
    /// Upsert a user profile.
    PutProfile { profile: UserProfile },
    /// Set only the role field of a profile, leaving `company_id` as is.
    /// Upserts if no profile exists yet.
    MergeProfileRole { uid: String, role: Role },
    /// Create a pending invite under its company.
    PutInvite { invite: PendingInvite },
    /// Delete a pending invite by token. Fails the batch with `NotFound`
    /// if the token is absent at commit time; this is what makes two
    /// concurrent redemptions of one token single-winner.
    DeleteInvite { token: String },
}

/// An ordered set of writes that commits all-or-nothing.
///
/// The membership-change helpers ([`set_membership`](Self::set_membership),
/// [`clear_membership`](Self::clear_membership),
/// [`change_role`](Self::change_role)) always enqueue the `Member` write
/// and the matching `UserProfile` write together, so no mutation path can
/// leave the two denormalized records observably split.
#[derive(Debug, Clone, Default)]
pub struct WriteBatch {
    ops: Vec<WriteOp>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// The ops in commit order.
    pub fn ops(&self) -> &[WriteOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Write a member record and the mirroring profile in one unit.
    pub fn set_membership(&mut self, company_id: &str, member: Member) -> &mut Self {
        self.ops.push(WriteOp::PutProfile {
            profile: UserProfile::member_of(member.uid.clone(), company_id, member.role),
        });
        self.ops.push(WriteOp::PutMember {
            company_id: company_id.to_owned(),
            member,
        });
        self
    }

    /// Delete a member record and clear (not delete) the mirroring profile.
    pub fn clear_membership(&mut self, company_id: &str, uid: &str) -> &mut Self {
        self.ops.push(WriteOp::DeleteMember {
            company_id: company_id.to_owned(),
            uid: uid.to_owned(),
        });
        self.ops.push(WriteOp::PutProfile {
            profile: UserProfile::cleared(uid),
        });
        self
    }

    /// Update a member's role and merge it into the mirroring profile.
    pub fn change_role(&mut self, company_id: &str, uid: &str, role: Role) -> &mut Self {
        self.ops.push(WriteOp::UpdateMemberRole {
            company_id: company_id.to_owned(),
            uid: uid.to_owned(),
            role,
        });
        self.ops.push(WriteOp::MergeProfileRole {
            uid: uid.to_owned(),
            role,
        });
        self
    }

    pub fn put_invite(&mut self, invite: PendingInvite) -> &mut Self {
        self.ops.push(WriteOp::PutInvite { invite });
        self
    }

    pub fn delete_invite(&mut self, token: &str) -> &mut Self {
        self.ops.push(WriteOp::DeleteInvite {
            token: token.to_owned(),
        });
        self
    }
}

/// Atomic multi-record storage for membership state.
///
/// Implementations must guarantee that [`commit`](Self::commit) applies
/// every op in the batch or none of them, and that the existence checks
/// of `UpdateMemberRole`, `DeleteMember`, and `DeleteInvite` are evaluated
/// at commit time within the same atomic unit (a transaction, or a single
/// lock in the in-memory mock).
#[async_trait]
pub trait MembershipStore: Send + Sync {
    /// Point read of a member record.
    async fn member(&self, company_id: &str, uid: &str)
        -> Result<Option<Member>, MembershipError>;

    /// Point read of a user profile.
    async fn profile(&self, uid: &str) -> Result<Option<UserProfile>, MembershipError>;

    /// Global invite lookup by token, across all companies. Token
    /// uniqueness is what makes this well-defined.
    async fn invite_by_token(&self, token: &str)
        -> Result<Option<PendingInvite>, MembershipError>;

    /// Apply a batch of writes all-or-nothing.
    async fn commit(&self, batch: WriteBatch) -> Result<(), MembershipError>;
}

// Forwarding impls so actions can share one store.

#[async_trait]
impl<T: MembershipStore + ?Sized> MembershipStore for &T {
    async fn member(
        &self,
        company_id: &str,
        uid: &str,
    ) -> Result<Option<Member>, MembershipError> {
        (**self).member(company_id, uid).await
    }

    async fn profile(&self, uid: &str) -> Result<Option<UserProfile>, MembershipError> {
        (**self).profile(uid).await
    }

    async fn invite_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PendingInvite>, MembershipError> {
        (**self).invite_by_token(token).await
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), MembershipError> {
        (**self).commit(batch).await
    }
}

#[async_trait]
impl<T: MembershipStore + ?Sized> MembershipStore for std::sync::Arc<T> {
    async fn member(
        &self,
        company_id: &str,
        uid: &str,
    ) -> Result<Option<Member>, MembershipError> {
        (**self).member(company_id, uid).await
    }

    async fn profile(&self, uid: &str) -> Result<Option<UserProfile>, MembershipError> {
        (**self).profile(uid).await
    }

    async fn invite_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PendingInvite>, MembershipError> {
        (**self).invite_by_token(token).await
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), MembershipError> {
        (**self).commit(batch).await
    }
}
