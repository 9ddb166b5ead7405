//! Reconcile over HTTP after a one-sided edge

use pretty_assertions::assert_eq;
use serde_json::json;

use crate::assert_edges;
use crate::common::{load_user, post, test_app, test_user};
use petalpix::backend::store::MemoryUserCollection;

#[tokio::test]
async fn test_reconcile_repairs_half_written_edge() {
    // alice's side of "alice follows bob" landed, bob's did not
    let mut alice = test_user("alice");
    alice.following = vec!["bob".into(), "deleted".into()];
    alice.following_count = 5;
    let store = MemoryUserCollection::with_users([alice, test_user("bob")]);
    let app = test_app(&store);

    let (status, body) = post(&app, "/v1/user/reconcile/alice", json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["userId"], "alice");
    assert_eq!(body["restoredFollowers"], json!(["bob"]));
    assert_eq!(body["droppedFollowing"], json!(["deleted"]));
    assert_eq!(body["followingCount"], 1);

    assert_edges!(load_user(&store, "alice").await, following: ["bob"], followers: []);
    assert_edges!(load_user(&store, "bob").await, following: [], followers: ["alice"]);

    // A second pass has nothing left to do
    let (_, body) = post(&app, "/v1/user/reconcile/alice", json!({})).await;
    assert_eq!(body["restoredFollowers"], json!([]));
    assert_eq!(body["droppedFollowing"], json!([]));
}
