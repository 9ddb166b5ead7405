//! `PgUserCollection` behind the relationship service and user directory

use std::sync::Arc;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;

use crate::assert_edges;
use crate::common::database::{create_test_pool, db_policy, run_migrations, TestDatabase};
use crate::common::test_user;
use petalpix::backend::error::{GraphError, StoreError};
use petalpix::backend::graph::GraphPolicy;
use petalpix::backend::store::UserCollection;
use petalpix::backend::users::UserDirectory;

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn test_users_table_exists() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await.expect("Migrations should run successfully");

    let result = sqlx::query("SELECT 1 FROM users LIMIT 1").execute(&pool).await;
    assert!(result.is_ok(), "Users table should exist");
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn test_follow_then_unfollow_keeps_order() {
    let db = TestDatabase::new().await;
    let ids = db.seed(&["alice", "bob", "carol", "dave"]).await;
    let (alice, bob, carol, dave) = (&ids[0], &ids[1], &ids[2], &ids[3]);
    let graph = db.graph(db_policy());

    graph
        .follow(alice, vec![bob.clone(), carol.clone(), dave.clone()])
        .await
        .unwrap();
    let loaded = db.load(alice).await;
    assert_eq!(&loaded.following, &vec![bob.clone(), carol.clone(), dave.clone()]);
    assert_eq!(loaded.following_count, 3);

    graph.unfollow(alice, carol.as_str()).await.unwrap();

    let loaded = db.load(alice).await;
    assert_eq!(&loaded.following, &vec![bob.clone(), dave.clone()]);
    assert_eq!(loaded.following_count, 2);
    let carol_doc = db.load(carol).await;
    assert!(carol_doc.followers.is_empty());
    assert_eq!(carol_doc.followers_count, 0);
    for id in [bob, dave] {
        let doc = db.load(id).await;
        assert_eq!(&doc.followers, &vec![alice.clone()]);
        assert_eq!(doc.followers_count, 1);
    }

    let following: Vec<String> = graph
        .get_following(alice)
        .await
        .unwrap()
        .into_iter()
        .map(|user| user.id)
        .collect();
    assert_eq!(following.len(), 2);
    assert!(following.contains(bob) && following.contains(dave));

    db.cleanup(&ids).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn test_clamped_unfollow_floors_counts() {
    let db = TestDatabase::new().await;
    let ids = db.seed(&["alice", "carol"]).await;
    let graph = db.graph(GraphPolicy {
        clamp_counts: true,
        ..db_policy()
    });

    // No edge exists, so an unclamped unfollow would go to -1
    graph.unfollow(&ids[1], ids[0].as_str()).await.unwrap();

    assert_eq!(db.load(&ids[1]).await.following_count, 0);
    assert_eq!(db.load(&ids[0]).await.followers_count, 0);

    db.cleanup(&ids).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn test_unclamped_unfollow_goes_negative() {
    let db = TestDatabase::new().await;
    let ids = db.seed(&["alice", "bob"]).await;
    let graph = db.graph(db_policy());

    graph.unfollow(&ids[0], ids[1].as_str()).await.unwrap();

    assert_eq!(db.load(&ids[0]).await.following_count, -1);
    assert_eq!(db.load(&ids[1]).await.followers_count, -1);

    db.cleanup(&ids).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn test_unknown_source_rolls_back_targets() {
    let db = TestDatabase::new().await;
    let ids = db.seed(&["bob"]).await;
    let graph = db.graph(db_policy());

    let result = graph.follow(&db.id("ghost"), ids[0].as_str()).await;
    assert_matches!(result, Err(GraphError::NotFound { .. }));

    let bob = db.load(&ids[0]).await;
    assert_edges!(bob, following: [], followers: []);
    assert_eq!(bob.followers_count, 0);

    db.cleanup(&ids).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn test_duplicate_insert_is_rejected() {
    let db = TestDatabase::new().await;
    let ids = db.seed(&["alice"]).await;

    let result = db.store.insert_one(&test_user(&ids[0])).await;
    assert_matches!(result, Err(StoreError::DuplicateKey { ref id }) if id == &ids[0]);

    let users = UserDirectory::new(Arc::new(db.store.clone()), db_policy().store_timeout);
    let result = users.create(test_user(&ids[0])).await;
    assert_matches!(result, Err(GraphError::Conflict { ref id }) if id == &ids[0]);

    db.cleanup(&ids).await;
}

#[tokio::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn test_reconcile_restores_missing_follower() {
    let db = TestDatabase::new().await;
    let bob = db.seed(&["bob"]).await.remove(0);
    let alice_id = db.id("alice");
    let mut alice = test_user(&alice_id);
    alice.following = vec![bob.clone()];
    alice.following_count = 4;
    db.store.insert_one(&alice).await.unwrap();
    let graph = db.graph(db_policy());

    let report = graph.reconcile(&alice_id).await.unwrap();
    assert_eq!(report.restored_followers, vec![bob.clone()]);
    assert_eq!(report.following_count, 1);

    assert_eq!(db.load(&alice_id).await.following_count, 1);
    let bob_doc = db.load(&bob).await;
    assert_eq!(bob_doc.followers, vec![alice_id.clone()]);
    assert_eq!(bob_doc.followers_count, 1);

    db.cleanup(&[alice_id, bob]).await;
}
