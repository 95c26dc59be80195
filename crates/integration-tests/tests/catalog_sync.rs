//! Catalog fetch semantics: wholesale replace on success, last
//! known-good state on failure.

use inkshelf_integration_tests::{FakeRemote, actions_over, sample_book};

#[tokio::test]
async fn fetch_replaces_books_wholesale_preserving_order() {
    let remote = FakeRemote::new();
    // Newest first, as the platform orders by created_at descending
    let newest = sample_book("B", 500, 1);
    let older = sample_book("A", 999, 10);
    remote.seed_books(vec![newest.clone(), older.clone()]);

    let actions = actions_over(&remote);
    let count = actions.fetch_catalog().await.expect("fetch should succeed");

    assert_eq!(count, 2);
    // Exact sequence, exact order
    assert_eq!(actions.store().books(), vec![newest, older]);
}

#[tokio::test]
async fn fetch_failure_leaves_existing_catalog_untouched() {
    let remote = FakeRemote::new();
    remote.seed_books(vec![sample_book("A", 999, 1)]);

    let actions = actions_over(&remote);
    actions.fetch_catalog().await.expect("first fetch succeeds");
    let known_good = actions.store().books();
    assert_eq!(known_good.len(), 1);

    // Backend goes away; the error is returned, not thrown past us
    remote.fail_fetch_books(true);
    let result = actions.fetch_catalog().await;

    assert!(result.is_err());
    assert_eq!(actions.store().books(), known_good);
}

#[tokio::test]
async fn fetch_failure_on_cold_store_keeps_it_empty() {
    let remote = FakeRemote::new();
    remote.fail_fetch_books(true);

    let actions = actions_over(&remote);
    let result = actions.fetch_catalog().await;

    assert!(result.is_err());
    assert!(actions.store().books().is_empty());
}

#[tokio::test]
async fn refetch_drops_books_removed_upstream() {
    let remote = FakeRemote::new();
    let keeper = sample_book("Keeper", 999, 2);
    remote.seed_books(vec![keeper.clone(), sample_book("Gone", 500, 5)]);

    let actions = actions_over(&remote);
    actions.fetch_catalog().await.expect("fetch should succeed");
    assert_eq!(actions.store().books().len(), 2);

    remote.seed_books(vec![keeper.clone()]);
    actions.fetch_catalog().await.expect("fetch should succeed");

    // Wholesale replace, not a merge
    assert_eq!(actions.store().books(), vec![keeper]);
}
