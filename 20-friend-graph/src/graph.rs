//! Degrees of separation over the directed friendship graph.
//!
//! Nodes are user ids and every entry `f` in a user's `friends` list is an
//! edge `user -> f`. The search is an unweighted breadth-first search, so the
//! first time the target is dequeued it has been reached by a shortest path.

use std::collections::{HashSet, VecDeque};

use tracing::debug;

use crate::model::UserId;
use crate::store::UserStore;

/// Returns the minimum number of friendship edges leading from `from` to
/// `to`, or `None` when `to` is unreachable.
///
/// `from == to` yields `Some(0)`. Friend ids that no longer exist in the
/// store are treated as nodes without outgoing edges.
pub fn degrees_of_separation(store: &UserStore, from: UserId, to: UserId) -> Option<u32> {
    let mut queue: VecDeque<(UserId, u32)> = VecDeque::new();
    // Nodes are marked when scheduled rather than when dequeued, so each one
    // enters the queue at most once.
    let mut scheduled: HashSet<UserId> = HashSet::new();

    queue.push_back((from, 0));
    scheduled.insert(from);

    while let Some((node, distance)) = queue.pop_front() {
        debug!(node, distance, "visiting user");
        if node == to {
            return Some(distance);
        }

        let Some(user) = store.get(node) else {
            continue;
        };
        for &friend in &user.friends {
            if scheduled.insert(friend) {
                queue.push_back((friend, distance + 1));
            }
        }
    }

    None
}
