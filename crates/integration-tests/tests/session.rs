//! Sign-in/sign-out lifecycle and the state it leaves behind.

use inkshelf_integration_tests::{
    Call, FakeRemote, actions_over, sample_book, sample_entry, sample_user,
};
use inkshelf_storefront::models::ListKind;

#[tokio::test]
async fn sign_in_sets_the_store_user() {
    let remote = FakeRemote::new();
    let actions = actions_over(&remote);
    assert!(!actions.store().is_authenticated());

    let user = actions
        .sign_in("reader@example.com", "hunter2")
        .await
        .expect("credentials accepted");

    assert!(actions.store().is_authenticated());
    assert_eq!(
        actions.store().user().map(|u| u.id),
        Some(user.id)
    );
    assert_eq!(remote.calls(), vec![Call::SignIn]);
}

#[tokio::test]
async fn rejected_sign_in_leaves_the_store_signed_out() {
    let remote = FakeRemote::new();
    let actions = actions_over(&remote);
    remote.fail_sign_in(true);

    let result = actions.sign_in("reader@example.com", "wrong").await;

    assert!(result.is_err());
    assert!(!actions.store().is_authenticated());
}

#[tokio::test]
async fn sign_out_clears_the_user() {
    let remote = FakeRemote::new();
    let actions = actions_over(&remote);
    actions.store().set_user(Some(sample_user()));

    actions.sign_out().await.expect("remote accepted");

    assert!(!actions.store().is_authenticated());
    assert_eq!(remote.calls(), vec![Call::SignOut]);
}

#[tokio::test]
async fn sign_out_clears_the_user_even_when_the_remote_fails() {
    let remote = FakeRemote::new();
    let actions = actions_over(&remote);
    actions.store().set_user(Some(sample_user()));
    remote.fail_sign_out(true);

    let result = actions.sign_out().await;

    // The error is surfaced for logging, but the local session is over
    assert!(result.is_err());
    assert!(!actions.store().is_authenticated());
}

#[tokio::test]
async fn sign_out_without_a_session_skips_the_network() {
    let remote = FakeRemote::new();
    let actions = actions_over(&remote);

    actions.sign_out().await.expect("nothing to terminate");

    assert!(remote.calls().is_empty());
}

#[tokio::test]
async fn stale_list_entries_survive_sign_out_and_predicates_stay_safe() {
    let remote = FakeRemote::new();
    let actions = actions_over(&remote);
    let user = sample_user();
    let book = sample_book("X", 999, 1);
    actions.store().set_user(Some(user.clone()));
    actions
        .store()
        .set_entries(ListKind::Cart, vec![sample_entry(&user, book.id)]);

    actions.sign_out().await.expect("remote accepted");

    // The lists are not cleared on sign-out; they are replaced on the
    // next sign-in's refresh. Predicates must tolerate the stale rows.
    assert!(actions.store().is_in_cart(book.id));
    assert!(!actions.store().is_authenticated());
}

#[tokio::test]
async fn next_session_refresh_replaces_the_previous_users_lists() {
    let remote = FakeRemote::new();
    let actions = actions_over(&remote);
    let old_user = sample_user();
    let old_book = sample_book("Old", 999, 5);
    actions.store().set_user(Some(old_user.clone()));
    actions
        .store()
        .set_entries(ListKind::Cart, vec![sample_entry(&old_user, old_book.id)]);
    actions.sign_out().await.expect("remote accepted");

    let new_user = actions
        .sign_in("other@example.com", "hunter2")
        .await
        .expect("credentials accepted");
    let new_book = sample_book("New", 500, 1);
    remote.seed_entries(ListKind::Cart, vec![sample_entry(&new_user, new_book.id)]);

    actions.refresh_lists().await.expect("all lists fetched");

    assert!(actions.store().is_in_cart(new_book.id));
    assert!(!actions.store().is_in_cart(old_book.id));
}
