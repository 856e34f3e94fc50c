//! In-memory fakes for the storage, identity, and email collaborators.
//!
//! The mock store honors the same atomic-batch contract as a real
//! backend: a batch is validated and applied under one write lock, so a
//! failing op leaves nothing applied and concurrent commits serialize.

#![allow(clippy::significant_drop_tightening)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};

use async_trait::async_trait;

use crate::email::{MailError, Mailer};
use crate::identity::IdentityProvider;
use crate::store::{MembershipStore, WriteBatch, WriteOp};
use crate::types::{Member, PendingInvite, UserProfile};
use crate::MembershipError;

#[derive(Default)]
struct StoreState {
    /// (company_id, uid) -> member
    members: HashMap<(String, String), Member>,
    /// uid -> profile
    profiles: HashMap<String, UserProfile>,
    /// token -> invite (token uniqueness is global)
    invites: HashMap<String, PendingInvite>,
}

pub struct MockMembershipStore {
    state: RwLock<StoreState>,
}

impl MockMembershipStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
        }
    }

    /// Seeds a member and its mirroring profile, bypassing the batch path.
    pub fn seed_member(&self, company_id: &str, member: Member) {
        let mut state = self.state.write().expect("lock poisoned");
        state.profiles.insert(
            member.uid.clone(),
            UserProfile::member_of(member.uid.clone(), company_id, member.role),
        );
        state
            .members
            .insert((company_id.to_owned(), member.uid.clone()), member);
    }

    /// All pending invites under one company, for test assertions.
    pub fn pending_invites(&self, company_id: &str) -> Vec<PendingInvite> {
        let state = self.state.read().expect("lock poisoned");
        state
            .invites
            .values()
            .filter(|i| i.company_id == company_id)
            .cloned()
            .collect()
    }

    pub fn member_count(&self) -> usize {
        self.state.read().expect("lock poisoned").members.len()
    }

    pub fn invite_count(&self) -> usize {
        self.state.read().expect("lock poisoned").invites.len()
    }
}

impl Default for MockMembershipStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipStore for MockMembershipStore {
    async fn member(
        &self,
        company_id: &str,
        uid: &str,
    ) -> Result<Option<Member>, MembershipError> {
        let state = self
            .state
            .read()
            .map_err(|_| MembershipError::Internal("lock poisoned".into()))?;
        Ok(state
            .members
            .get(&(company_id.to_owned(), uid.to_owned()))
            .cloned())
    }

    async fn profile(&self, uid: &str) -> Result<Option<UserProfile>, MembershipError> {
        let state = self
            .state
            .read()
            .map_err(|_| MembershipError::Internal("lock poisoned".into()))?;
        Ok(state.profiles.get(uid).cloned())
    }

    async fn invite_by_token(
        &self,
        token: &str,
    ) -> Result<Option<PendingInvite>, MembershipError> {
        let state = self
            .state
            .read()
            .map_err(|_| MembershipError::Internal("lock poisoned".into()))?;
        Ok(state.invites.get(token).cloned())
    }

    async fn commit(&self, batch: WriteBatch) -> Result<(), MembershipError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| MembershipError::Internal("lock poisoned".into()))?;

        // Validate the whole batch before touching anything, so a failing
        // op leaves no partial mutation.
        for op in batch.ops() {
            match op {
                WriteOp::UpdateMemberRole {
                    company_id, uid, ..
                }
                | WriteOp::DeleteMember { company_id, uid } => {
                    if !state
                        .members
                        .contains_key(&(company_id.clone(), uid.clone()))
                    {
                        return Err(MembershipError::NotFound);
                    }
                }
                WriteOp::DeleteInvite { token } => {
                    if !state.invites.contains_key(token) {
                        return Err(MembershipError::NotFound);
                    }
                }
                WriteOp::PutMember { .. }
                | WriteOp::PutProfile { .. }
                | WriteOp::MergeProfileRole { .. }
                | WriteOp::PutInvite { .. } => {}
            }
        }

        for op in batch.ops() {
            match op {
                WriteOp::PutMember { company_id, member } => {
                    state
                        .members
                        .insert((company_id.clone(), member.uid.clone()), member.clone());
                }
                WriteOp::UpdateMemberRole {
                    company_id,
                    uid,
                    role,
                } => {
                    if let Some(member) =
                        state.members.get_mut(&(company_id.clone(), uid.clone()))
                    {
                        member.role = *role;
                    }
                }
                WriteOp::DeleteMember { company_id, uid } => {
                    state.members.remove(&(company_id.clone(), uid.clone()));
                }
                WriteOp::PutProfile { profile } => {
                    state.profiles.insert(profile.uid.clone(), profile.clone());
                }
                WriteOp::MergeProfileRole { uid, role } => {
                    let profile = state
                        .profiles
                        .entry(uid.clone())
                        .or_insert_with(|| UserProfile::cleared(uid.clone()));
                    profile.role = Some(*role);
                }
                WriteOp::PutInvite { invite } => {
                    state.invites.insert(invite.token.clone(), invite.clone());
                }
                WriteOp::DeleteInvite { token } => {
                    state.invites.remove(token);
                }
            }
        }

        Ok(())
    }
}

pub struct MockIdentityProvider {
    /// lowercased email -> uid
    accounts: RwLock<HashMap<String, String>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            accounts: RwLock::new(HashMap::new()),
        }
    }

    /// Registers an account so its email resolves to `uid`.
    pub fn register(&self, email: &str, uid: &str) {
        let mut accounts = self.accounts.write().expect("lock poisoned");
        accounts.insert(email.to_lowercase(), uid.to_owned());
    }
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn uid_for_email(&self, email: &str) -> Result<Option<String>, MembershipError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| MembershipError::Internal("lock poisoned".into()))?;
        Ok(accounts.get(&email.to_lowercase()).cloned())
    }
}

/// A message captured by [`MockMailer`].
#[derive(Debug, Clone)]
pub struct SentEmail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub html: String,
}

pub struct MockMailer {
    sent: Mutex<Vec<SentEmail>>,
    failing: AtomicBool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: AtomicBool::new(false),
        }
    }

    /// A mailer whose every send fails.
    pub fn failing() -> Self {
        let mailer = Self::new();
        mailer.failing.store(true, Ordering::SeqCst);
        mailer
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Everything sent so far.
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(
        &self,
        from: &str,
        to: &str,
        subject: &str,
        text: &str,
        html: &str,
    ) -> Result<(), MailError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(MailError::SendFailed("mock mailer set to fail".to_owned()));
        }

        let mut sent = self
            .sent
            .lock()
            .map_err(|_| MailError::SendFailed("lock poisoned".to_owned()))?;
        sent.push(SentEmail {
            from: from.to_owned(),
            to: to.to_owned(),
            subject: subject.to_owned(),
            text: text.to_owned(),
            html: html.to_owned(),
        });

        Ok(())
    }
}
