//! Follow / unfollow / getFollowing over HTTP

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{get, load_user, post, seeded_store, test_app, test_app_with_policy};
use crate::{assert_edges, assert_error_body};
use petalpix::backend::graph::GraphPolicy;

#[tokio::test]
async fn test_follow_single_user() {
    let store = seeded_store(&["alice", "bob"]);
    let app = test_app(&store);

    let (status, body) = post(&app, "/v1/user/follow/alice", json!({ "followUser": "bob" })).await;
    assert_eq!(status, 200);
    assert_eq!(body, json!(["bob"]));

    assert_edges!(load_user(&store, "alice").await, following: ["bob"], followers: []);
    assert_edges!(load_user(&store, "bob").await, following: [], followers: ["alice"]);
}

#[tokio::test]
async fn test_follow_batch() {
    let store = seeded_store(&["alice", "bob", "carol"]);
    let app = test_app(&store);

    let (status, body) = post(
        &app,
        "/v1/user/follow/alice",
        json!({ "followUsers": ["bob", "carol"] }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!(["bob", "carol"]));

    assert_edges!(load_user(&store, "alice").await, following: ["bob", "carol"], followers: []);
    assert_edges!(load_user(&store, "carol").await, following: [], followers: ["alice"]);
}

#[tokio::test]
async fn test_follow_unknown_source() {
    let store = seeded_store(&["bob"]);
    let app = test_app(&store);

    let (status, body) = post(&app, "/v1/user/follow/ghost", json!({ "followUser": "bob" })).await;
    assert_eq!(status, 404);
    assert_error_body!(body, "not_found", 404);

    assert_edges!(load_user(&store, "bob").await, following: [], followers: []);
}

#[tokio::test]
async fn test_follow_rejects_bad_bodies() {
    let store = seeded_store(&["alice", "bob"]);
    let app = test_app(&store);

    for body in [
        json!({}),
        json!({ "followUsers": [] }),
        json!({ "followUser": "" }),
        json!({ "followUser": 42 }),
    ] {
        let (status, response) = post(&app, "/v1/user/follow/alice", body.clone()).await;
        assert_eq!(status, 400, "body {} accepted", body);
        assert_error_body!(response, "invalid_input_kind", 400);
    }

    assert_edges!(load_user(&store, "alice").await, following: [], followers: []);
}

#[tokio::test]
async fn test_unfollow_after_follow() {
    let store = seeded_store(&["alice", "bob", "carol"]);
    let app = test_app(&store);
    post(&app, "/v1/user/follow/alice", json!({ "followUsers": ["bob", "carol"] })).await;

    let (status, body) = post(
        &app,
        "/v1/user/unfollow/alice",
        json!({ "unfollowUsers": ["bob", "carol"] }),
    )
    .await;
    assert_eq!(status, 200);
    assert_eq!(body, json!(["bob", "carol"]));

    for id in ["alice", "bob", "carol"] {
        assert_edges!(load_user(&store, id).await, following: [], followers: []);
    }
}

#[tokio::test]
async fn test_unfollow_without_edge_goes_negative_by_default() {
    let store = seeded_store(&["alice", "bob"]);
    let app = test_app(&store);

    let (status, _) = post(&app, "/v1/user/unfollow/alice", json!({ "unfollowUser": "bob" })).await;
    assert_eq!(status, 200);

    assert_eq!(load_user(&store, "alice").await.following_count, -1);
    assert_eq!(load_user(&store, "bob").await.followers_count, -1);
}

#[tokio::test]
async fn test_unfollow_with_clamping() {
    let store = seeded_store(&["alice", "bob"]);
    let policy = GraphPolicy {
        clamp_counts: true,
        ..GraphPolicy::default()
    };
    let app = test_app_with_policy(&store, policy);

    post(&app, "/v1/user/unfollow/alice", json!({ "unfollowUser": "bob" })).await;

    assert_edges!(load_user(&store, "alice").await, following: [], followers: []);
    assert_edges!(load_user(&store, "bob").await, following: [], followers: []);
}

#[tokio::test]
async fn test_get_following() {
    let store = seeded_store(&["alice", "bob", "carol"]);
    let app = test_app(&store);

    let (status, body) = get(&app, "/v1/user/getFollowing/alice").await;
    assert_eq!(status, 200);
    assert_eq!(body, json!([]));

    post(&app, "/v1/user/follow/alice", json!({ "followUser": "carol" })).await;
    let (status, body) = get(&app, "/v1/user/getFollowing/alice").await;
    assert_eq!(status, 200);
    assert_eq!(body[0]["userId"], "carol");
    assert_eq!(body[0]["followers"], json!(["alice"]));
    assert!(body[0].get("password").is_none());

    let (status, body) = get(&app, "/v1/user/getFollowing/ghost").await;
    assert_eq!(status, 404);
    assert_error_body!(body, "not_found", 404);
}
