//! End-to-end tests for the membership and invitation lifecycle.
//!
//! These tests drive whole workflows through the action layer using the
//! in-memory mocks. Run with: `cargo test --test e2e_membership`

#![cfg(feature = "mocks")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::Utc;

use roster::{
    AcceptInviteAction, Caller, InviteMailer, InviteMemberAction, InviteMemberInput,
    InviteOutcome, MailSettings, Member, MembershipError, MembershipStore, MockIdentityProvider,
    MockMailer, MockMembershipStore, RemoveMemberAction, Role, RosterConfig, SecretString,
    SendInviteEmailAction, SendInviteEmailInput, UpdateMemberRoleAction,
};

fn seed_admin() -> (MockMembershipStore, Caller) {
    let store = MockMembershipStore::new();
    let admin = Member {
        uid: "alice".to_owned(),
        email: "alice@x.com".to_owned(),
        role: Role::Admin,
        added_at: Utc::now(),
    };
    store.seed_member("c1", admin);
    (store, Caller::new("alice", "alice@x.com"))
}

fn invite_input(email: &str, role: &str) -> InviteMemberInput {
    InviteMemberInput {
        company_id: "c1".to_owned(),
        email: email.to_owned(),
        role: role.to_owned(),
    }
}

#[tokio::test]
async fn test_invite_then_accept_flow() {
    let (store, alice) = seed_admin();
    let idp = MockIdentityProvider::new();
    let mailer = MockMailer::new();
    let settings = MailSettings::new("team@x.com", "https://app.x.com");

    // Admin invites an email with no account yet.
    let invite_action = InviteMemberAction::with_mailer(
        &store,
        &idp,
        RosterConfig::default(),
        InviteMailer::new(&mailer, settings),
    );
    let outcome = invite_action
        .execute(Some(&alice), invite_input("bob@x.com", "edit"))
        .await
        .unwrap();

    let token = match outcome {
        InviteOutcome::Invited { email, token } => {
            assert_eq!(email, "bob@x.com");
            token
        }
        InviteOutcome::Added { .. } => panic!("bob has no account yet"),
    };

    // The invite email carries the redemption URL for that token.
    let sent = mailer.sent();
    assert_eq!(sent.len(), 1);
    assert!(sent[0]
        .html
        .contains(&format!("token={}", token.expose_secret())));

    // Bob creates an account out-of-band, authenticates, and redeems.
    idp.register("bob@x.com", "bob1");
    let bob = Caller::new("bob1", "bob@x.com");
    let accept_action = AcceptInviteAction::new(&store);
    let accepted = accept_action.execute(Some(&bob), &token).await.unwrap();
    assert_eq!(accepted.company_id, "c1");
    assert_eq!(accepted.role, Role::Edit);

    // Invite consumed, member and profile in place.
    assert!(store
        .invite_by_token(token.expose_secret())
        .await
        .unwrap()
        .is_none());
    let member = store.member("c1", "bob1").await.unwrap().unwrap();
    assert_eq!(member.role, Role::Edit);
    let profile = store.profile("bob1").await.unwrap().unwrap();
    assert_eq!(profile.company_id.as_deref(), Some("c1"));
    assert_eq!(profile.role, Some(Role::Edit));
}

#[tokio::test]
async fn test_invite_existing_account_added_immediately() {
    let (store, alice) = seed_admin();
    let idp = MockIdentityProvider::new();
    idp.register("carol@x.com", "carol1");

    let invite_action =
        InviteMemberAction::<_, _, MockMailer>::new(&store, &idp, RosterConfig::default());
    let outcome = invite_action
        .execute(Some(&alice), invite_input("carol@x.com", "view"))
        .await
        .unwrap();

    match outcome {
        InviteOutcome::Added { uid, .. } => assert_eq!(uid, "carol1"),
        InviteOutcome::Invited { .. } => panic!("carol already has an account"),
    }

    // No token issued, no pending invite created.
    assert_eq!(store.invite_count(), 0);
    assert!(store.pending_invites("c1").is_empty());
}

#[tokio::test]
async fn test_member_lifecycle_keeps_profile_in_sync() {
    let (store, alice) = seed_admin();
    let idp = MockIdentityProvider::new();
    idp.register("dave@x.com", "dave1");

    // Add.
    let invite_action =
        InviteMemberAction::<_, _, MockMailer>::new(&store, &idp, RosterConfig::default());
    invite_action
        .execute(Some(&alice), invite_input("dave@x.com", "view"))
        .await
        .unwrap();

    let profile = store.profile("dave1").await.unwrap().unwrap();
    assert_eq!(profile.role, Some(Role::View));

    // Promote.
    let update_action = UpdateMemberRoleAction::new(&store);
    update_action
        .execute(Some(&alice), "c1", "dave1", "admin")
        .await
        .unwrap();

    let member = store.member("c1", "dave1").await.unwrap().unwrap();
    let profile = store.profile("dave1").await.unwrap().unwrap();
    assert_eq!(member.role, Role::Admin);
    assert_eq!(profile.role, Some(Role::Admin));
    assert_eq!(profile.company_id.as_deref(), Some("c1"));

    // Remove.
    let remove_action = RemoveMemberAction::new(&store);
    remove_action
        .execute(Some(&alice), "c1", "dave1")
        .await
        .unwrap();

    assert!(store.member("c1", "dave1").await.unwrap().is_none());
    let profile = store.profile("dave1").await.unwrap().unwrap();
    assert!(profile.company_id.is_none());
    assert!(profile.role.is_none());
}

#[tokio::test]
async fn test_non_admin_mutations_all_denied() {
    let (store, alice) = seed_admin();
    let idp = MockIdentityProvider::new();
    idp.register("eve@x.com", "eve1");

    // Make eve a plain editor.
    let invite_action =
        InviteMemberAction::<_, _, MockMailer>::new(&store, &idp, RosterConfig::default());
    invite_action
        .execute(Some(&alice), invite_input("eve@x.com", "edit"))
        .await
        .unwrap();

    let eve = Caller::new("eve1", "eve@x.com");

    let err = invite_action
        .execute(Some(&eve), invite_input("mallory@x.com", "admin"))
        .await
        .unwrap_err();
    assert!(matches!(err, MembershipError::PermissionDenied(_)));

    let err = RemoveMemberAction::new(&store)
        .execute(Some(&eve), "c1", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, MembershipError::PermissionDenied(_)));

    let err = UpdateMemberRoleAction::new(&store)
        .execute(Some(&eve), "c1", "alice", "view")
        .await
        .unwrap_err();
    assert!(matches!(err, MembershipError::PermissionDenied(_)));

    // Nothing changed: alice is still the admin, eve still an editor.
    assert_eq!(
        store.member("c1", "alice").await.unwrap().unwrap().role,
        Role::Admin
    );
    assert_eq!(
        store.member("c1", "eve1").await.unwrap().unwrap().role,
        Role::Edit
    );
    assert_eq!(store.invite_count(), 0);
}

#[tokio::test]
async fn test_admin_self_actions_rejected() {
    let (store, alice) = seed_admin();

    let err = RemoveMemberAction::new(&store)
        .execute(Some(&alice), "c1", "alice")
        .await
        .unwrap_err();
    assert!(matches!(err, MembershipError::InvalidArgument(_)));

    let err = UpdateMemberRoleAction::new(&store)
        .execute(Some(&alice), "c1", "alice", "view")
        .await
        .unwrap_err();
    assert!(matches!(err, MembershipError::InvalidArgument(_)));

    assert_eq!(
        store.member("c1", "alice").await.unwrap().unwrap().role,
        Role::Admin
    );
}

#[tokio::test]
async fn test_concurrent_redemption_single_winner() {
    let (store, alice) = seed_admin();
    let idp = MockIdentityProvider::new();

    let invite_action =
        InviteMemberAction::<_, _, MockMailer>::new(&store, &idp, RosterConfig::default());
    let outcome = invite_action
        .execute(Some(&alice), invite_input("bob@x.com", "edit"))
        .await
        .unwrap();
    let token = match outcome {
        InviteOutcome::Invited { token, .. } => token,
        InviteOutcome::Added { .. } => panic!("expected Invited"),
    };

    let bob = Caller::new("bob1", "bob@x.com");
    let accept_one = AcceptInviteAction::new(&store);
    let accept_two = AcceptInviteAction::new(&store);

    let (first, second) = tokio::join!(
        accept_one.execute(Some(&bob), &token),
        accept_two.execute(Some(&bob), &token),
    );

    // At most one redemption commits; the loser sees NotFound.
    let oks = [first.is_ok(), second.is_ok()]
        .iter()
        .filter(|ok| **ok)
        .count();
    assert_eq!(oks, 1);
    for result in [first, second] {
        if let Err(err) = result {
            assert_eq!(err, MembershipError::NotFound);
        }
    }

    // Exactly one member record for bob either way.
    assert!(store.member("c1", "bob1").await.unwrap().is_some());
    assert_eq!(store.invite_count(), 0);
}

#[tokio::test]
async fn test_mismatched_redeemer_then_legitimate_holder() {
    let (store, alice) = seed_admin();
    let idp = MockIdentityProvider::new();

    let invite_action =
        InviteMemberAction::<_, _, MockMailer>::new(&store, &idp, RosterConfig::default());
    let outcome = invite_action
        .execute(Some(&alice), invite_input("bob@x.com", "view"))
        .await
        .unwrap();
    let token = match outcome {
        InviteOutcome::Invited { token, .. } => token,
        InviteOutcome::Added { .. } => panic!("expected Invited"),
    };

    let accept_action = AcceptInviteAction::new(&store);

    // A stranger holding the token is refused and told whose it is.
    let mallory = Caller::new("m1", "mallory@x.com");
    let err = accept_action
        .execute(Some(&mallory), &token)
        .await
        .unwrap_err();
    match err {
        MembershipError::PermissionDenied(msg) => assert!(msg.contains("bob@x.com")),
        other => panic!("expected PermissionDenied, got {:?}", other),
    }

    // The invite survived; Bob can still redeem it, case differences in
    // his login email notwithstanding.
    let bob = Caller::new("bob1", "BOB@X.COM");
    let accepted = accept_action.execute(Some(&bob), &token).await.unwrap();
    assert_eq!(accepted.role, Role::View);
}

#[tokio::test]
async fn test_direct_send_operation() {
    let mailer = MockMailer::new();
    let settings = MailSettings::new("team@x.com", "https://app.x.com");
    let action = SendInviteEmailAction::new(Some(InviteMailer::new(&mailer, settings)));
    let admin = Caller::new("alice", "alice@x.com");

    action
        .execute(
            Some(&admin),
            SendInviteEmailInput {
                to: "bob@x.com".to_owned(),
                invite_url: "https://app.x.com/invite/accept?token=tok".to_owned(),
                role: "edit".to_owned(),
            },
        )
        .await
        .unwrap();
    assert_eq!(mailer.sent().len(), 1);

    // Without an email configuration the same operation hard-fails.
    let unconfigured: SendInviteEmailAction<MockMailer> = SendInviteEmailAction::new(None);
    let err = unconfigured
        .execute(
            Some(&admin),
            SendInviteEmailInput {
                to: "bob@x.com".to_owned(),
                invite_url: "https://app.x.com/invite/accept?token=tok".to_owned(),
                role: "edit".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MembershipError::FailedPrecondition(_)));
}

#[tokio::test]
async fn test_accept_with_stale_token_after_revocation_style_delete() {
    // Redeeming a token that was never issued behaves exactly like one
    // that was already consumed.
    let store = MockMembershipStore::new();
    let bob = Caller::new("bob1", "bob@x.com");
    let err = AcceptInviteAction::new(&store)
        .execute(Some(&bob), &SecretString::new("stale-token"))
        .await
        .unwrap_err();
    assert_eq!(err, MembershipError::NotFound);
}
