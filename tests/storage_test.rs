//! Storage contract tests against in-memory SQLite, plus one
//! end-to-end scenario through the service and session layers.

use std::time::Duration;

use chrono::Utc;
use sea_orm::{ConnectOptions, Database};
use sea_orm_migration::MigratorTrait;

use warbler::auth::Caller;
use warbler::domain::{Tweet, User, UserId, UserWithPassword};
use warbler::errors::ErrorKind;
use warbler::infra::{
    Migrator, PasswordVerifier, SqlStore, SubscriptionRepository, TweetRepository, UserRepository,
};
use warbler::services::Warbler;
use warbler::session::{MemorySessions, SessionStore};

/// Fresh store over a single-connection in-memory database. More than
/// one pooled connection would each see their own empty ":memory:" db.
async fn test_store() -> SqlStore {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);

    let db = Database::connect(opts).await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    SqlStore::new(db)
}

async fn register(store: &SqlStore, nickname: &str, password: &str) -> UserId {
    store
        .users
        .create(UserWithPassword {
            user: User {
                id: UserId::default(),
                nickname: nickname.to_string(),
                display_name: nickname.to_string(),
            },
            password: password.to_string(),
        })
        .await
        .unwrap()
}

async fn post(store: &SqlStore, author: UserId, text: &str) -> i64 {
    store
        .tweets
        .create(Tweet::new(author, Utc::now(), text.to_string()))
        .await
        .unwrap()
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_create_and_find_user() {
    let store = test_store().await;

    let id = register(&store, "alice", "secret1").await;

    let found = store.users.get_by_nickname("alice").await.unwrap();
    assert_eq!(found.id, id);
    assert_eq!(found.nickname, "alice");
    assert_eq!(found.display_name, "alice");
}

#[tokio::test]
async fn test_duplicate_nickname_is_conflict() {
    let store = test_store().await;

    register(&store, "alice", "secret1").await;

    let err = store
        .users
        .create(UserWithPassword {
            user: User {
                id: UserId::default(),
                nickname: "alice".to_string(),
                display_name: "Another Alice".to_string(),
            },
            password: "secret2".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_unknown_nickname_is_not_found() {
    let store = test_store().await;

    let err = store.users.get_by_nickname("ghost").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_get_by_ids_batches_and_skips_missing() {
    let store = test_store().await;

    let alice = register(&store, "alice", "secret1").await;
    let bob = register(&store, "bob", "secret1").await;

    let users = store
        .users
        .get_by_ids(&[alice, bob, UserId(999)])
        .await
        .unwrap();
    assert_eq!(users.len(), 2);

    let empty = store.users.get_by_ids(&[]).await.unwrap();
    assert!(empty.is_empty());
}

#[tokio::test]
async fn test_save_updates_display_name_only() {
    let store = test_store().await;

    let id = register(&store, "alice", "secret1").await;

    store
        .users
        .save(&User {
            id,
            nickname: "ignored".to_string(),
            display_name: "Alice B".to_string(),
        })
        .await
        .unwrap();

    let found = store.users.get_by_nickname("alice").await.unwrap();
    assert_eq!(found.display_name, "Alice B");
    assert_eq!(found.nickname, "alice");
}

#[tokio::test]
async fn test_password_check() {
    let store = test_store().await;

    register(&store, "alice", "secret1").await;

    assert!(store.users.password_check("alice", "secret1").await.unwrap());
    assert!(!store.users.password_check("alice", "wrong").await.unwrap());
    // Unknown nickname is false, not an error.
    assert!(!store.users.password_check("ghost", "secret1").await.unwrap());
}

// =============================================================================
// Tweets
// =============================================================================

#[tokio::test]
async fn test_tweet_roundtrip() {
    let store = test_store().await;

    let alice = register(&store, "alice", "secret1").await;
    let id = post(&store, alice, "hello").await;

    let tweet = store.tweets.by_id(id).await.unwrap();
    assert_eq!(tweet.author, alice);
    assert_eq!(tweet.text, "hello");

    let err = store.tweets.by_id(id + 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_profile_page_order_cursor_and_cap() {
    let store = test_store().await;

    let alice = register(&store, "alice", "secret1").await;
    let mut ids = Vec::new();
    for i in 0..5 {
        ids.push(post(&store, alice, &format!("tweet {}", i)).await);
    }

    // Ascending by id from the start.
    let page = store.tweets.page_for_profile(alice, 0, 30).await.unwrap();
    assert_eq!(page.len(), 5);
    assert!(page.windows(2).all(|w| w[0].id < w[1].id));
    assert_eq!(page[0].author, "alice");

    // The cursor is an exclusive lower bound.
    let rest = store
        .tweets
        .page_for_profile(alice, ids[2], 30)
        .await
        .unwrap();
    assert_eq!(rest.len(), 2);
    assert_eq!(rest[0].id, ids[3]);

    // The cap truncates.
    let capped = store.tweets.page_for_profile(alice, 0, 2).await.unwrap();
    assert_eq!(capped.len(), 2);
    assert_eq!(capped[0].id, ids[0]);
}

#[tokio::test]
async fn test_feed_contains_followed_authors_only() {
    let store = test_store().await;

    let alice = register(&store, "alice", "secret1").await;
    let bob = register(&store, "bob", "secret1").await;
    let carol = register(&store, "carol", "secret1").await;

    store.subscriptions.subscribe(alice, bob).await.unwrap();

    post(&store, bob, "from bob").await;
    post(&store, carol, "from carol").await;
    post(&store, alice, "from alice herself").await;

    let feed = store.tweets.page_for_user(alice, 0, 30).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].author, "bob");
    assert_eq!(feed[0].text, "from bob");
}

#[tokio::test]
async fn test_feed_cursor_skips_seen_tweets() {
    let store = test_store().await;

    let alice = register(&store, "alice", "secret1").await;
    let bob = register(&store, "bob", "secret1").await;
    store.subscriptions.subscribe(alice, bob).await.unwrap();

    let first = post(&store, bob, "one").await;
    post(&store, bob, "two").await;

    let page = store.tweets.page_for_user(alice, first, 30).await.unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].text, "two");
}

// =============================================================================
// Subscriptions
// =============================================================================

#[tokio::test]
async fn test_subscribe_unsubscribe_symmetry() {
    let store = test_store().await;

    let alice = register(&store, "alice", "secret1").await;
    let bob = register(&store, "bob", "secret1").await;

    store.subscriptions.subscribe(alice, bob).await.unwrap();
    assert_eq!(store.subscriptions.subs(alice).await.unwrap(), vec![bob]);
    assert_eq!(store.subscriptions.subbed(bob).await.unwrap(), vec![alice]);
    assert!(store.subscriptions.subs(bob).await.unwrap().is_empty());

    store.subscriptions.unsubscribe(alice, bob).await.unwrap();
    assert!(store.subscriptions.subs(alice).await.unwrap().is_empty());
    assert!(store.subscriptions.subbed(bob).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_duplicate_subscription_is_conflict() {
    let store = test_store().await;

    let alice = register(&store, "alice", "secret1").await;
    let bob = register(&store, "bob", "secret1").await;

    store.subscriptions.subscribe(alice, bob).await.unwrap();
    let err = store.subscriptions.subscribe(alice, bob).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_unsubscribe_missing_edge_is_noop() {
    let store = test_store().await;

    let alice = register(&store, "alice", "secret1").await;
    let bob = register(&store, "bob", "secret1").await;

    store.subscriptions.unsubscribe(alice, bob).await.unwrap();
}

// =============================================================================
// End to end
// =============================================================================

#[tokio::test]
async fn test_register_follow_post_and_read_feed() {
    let store = test_store().await;
    let svc = Warbler::new(
        store.users.clone(),
        store.users.clone(),
        store.tweets.clone(),
        store.subscriptions.clone(),
    );
    let sessions = MemorySessions::new(Duration::from_secs(3600));

    // Both users register while logged out.
    for nickname in ["alice", "bob"] {
        svc.create_user(
            Caller::anonymous(),
            UserWithPassword {
                user: User {
                    id: UserId::default(),
                    nickname: nickname.to_string(),
                    display_name: nickname.to_string(),
                },
                password: "secret1".to_string(),
            },
        )
        .await
        .unwrap();
    }

    // Alice logs in.
    svc.check_password(Caller::anonymous(), "alice", "secret1")
        .await
        .unwrap();
    let alice_id = svc.user_by_nickname("alice").await.unwrap().id;
    let token = sessions.save_id(alice_id).await.unwrap();
    let alice = Caller::user(sessions.id_for_session(&token).await.unwrap());

    svc.subscribe(alice, "bob").await.unwrap();

    // Bob logs in and posts.
    svc.check_password(Caller::anonymous(), "bob", "secret1")
        .await
        .unwrap();
    let bob_id = svc.user_by_nickname("bob").await.unwrap().id;
    let bob = Caller::user(bob_id);
    svc.tweet(bob, "hello".to_string()).await.unwrap();

    // Alice sees exactly bob's tweet in her feed.
    let feed = svc.tweet_page(alice, 0).await.unwrap();
    assert_eq!(feed.len(), 1);
    assert_eq!(feed[0].author, "bob");
    assert_eq!(feed[0].text, "hello");

    // Logout invalidates the token.
    sessions.delete(&token).await.unwrap();
    let err = sessions.id_for_session(&token).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}
