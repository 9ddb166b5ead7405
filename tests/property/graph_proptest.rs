//! Property-based tests for follow/unfollow counters

use proptest::prelude::*;

use crate::common::{graph, seeded_store};
use petalpix::backend::graph::GraphPolicy;
use petalpix::backend::store::{Filter, UserCollection};

const IDS: [&str; 5] = ["alice", "bob", "carol", "dave", "erin"];

#[derive(Debug, Clone)]
enum Op {
    Follow(usize, Vec<usize>),
    Unfollow(usize, Vec<usize>),
}

fn targets() -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(0..IDS.len(), 1..4)
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..IDS.len(), targets()).prop_map(|(s, t)| Op::Follow(s, t)),
        (0..IDS.len(), targets()).prop_map(|(s, t)| Op::Unfollow(s, t)),
    ]
}

fn names(indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| IDS[i].to_string()).collect()
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn test_follow_then_unfollow_restores_everyone(source in 0..IDS.len(), target_indices in targets()) {
        let store = seeded_store(&IDS);
        let service = graph(&store, GraphPolicy::default());

        let users = runtime().block_on(async {
            service.follow(IDS[source], names(&target_indices)).await.unwrap();
            service.unfollow(IDS[source], names(&target_indices)).await.unwrap();
            store.find_many(&Filter::All).await.unwrap()
        });

        for user in users {
            prop_assert!(user.following.is_empty(), "{} following {:?}", user.id, user.following);
            prop_assert!(user.followers.is_empty(), "{} followers {:?}", user.id, user.followers);
            prop_assert_eq!(user.following_count, 0);
            prop_assert_eq!(user.followers_count, 0);
        }
    }

    #[test]
    fn test_follows_keep_counts_equal_to_list_lengths(
        follows in prop::collection::vec((0..IDS.len(), targets()), 1..8)
    ) {
        let store = seeded_store(&IDS);
        let service = graph(&store, GraphPolicy::default());

        let users = runtime().block_on(async {
            for (source, target_indices) in &follows {
                service.follow(IDS[*source], names(target_indices)).await.unwrap();
            }
            store.find_many(&Filter::All).await.unwrap()
        });

        let total_following: usize = users.iter().map(|u| u.following.len()).sum();
        let expected: usize = follows.iter().map(|(_, t)| t.len()).sum();
        prop_assert_eq!(total_following, expected);

        for user in users {
            prop_assert_eq!(user.following_count, user.following.len() as i64);
            prop_assert_eq!(user.followers_count, user.followers.len() as i64);
        }
    }

    #[test]
    fn test_clamped_counts_never_go_negative(ops in prop::collection::vec(op(), 1..12)) {
        let store = seeded_store(&IDS);
        let policy = GraphPolicy {
            dedup_targets: true,
            clamp_counts: true,
            ..GraphPolicy::default()
        };
        let service = graph(&store, policy);

        let users = runtime().block_on(async {
            for op in &ops {
                match op {
                    Op::Follow(s, t) => service.follow(IDS[*s], names(t)).await.unwrap(),
                    Op::Unfollow(s, t) => service.unfollow(IDS[*s], names(t)).await.unwrap(),
                };
            }
            store.find_many(&Filter::All).await.unwrap()
        });

        for user in users {
            prop_assert!(user.following_count >= 0, "{} following_count {}", user.id, user.following_count);
            prop_assert!(user.followers_count >= 0, "{} followers_count {}", user.id, user.followers_count);
        }
    }
}
