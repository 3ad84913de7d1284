//! Full-subtree population used at selection time.

use crate::mirror::{Mirror, NodeId};
use crate::remote::{ListingClient, RemoteError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Enumeration {
    /// Containers visited, including `node` itself.
    pub containers: usize,
    pub leaves: usize,
    /// Containers that had to be fetched during this call.
    pub fetched: usize,
}

/// Populates `node` and every container below it. Already-populated
/// containers are walked without refetching. Uses an explicit work-list so
/// depth is bounded only by memory.
pub fn enumerate<C: ListingClient>(
    mirror: &mut Mirror<C>,
    node: NodeId,
) -> Result<Enumeration, RemoteError> {
    let mut stats = Enumeration::default();
    let mut pending = vec![node];

    while let Some(id) = pending.pop() {
        if !mirror.node(id).is_container() {
            stats.leaves += 1;
            continue;
        }
        stats.containers += 1;
        if mirror.populate(id)? {
            stats.fetched += 1;
        }
        pending.extend(mirror.children(id).iter().rev().copied());
    }

    tracing::debug!(
        path = mirror.path(node),
        containers = stats.containers,
        leaves = stats.leaves,
        fetched = stats.fetched,
        "enumerated subtree"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "tests/enumerate/enumerate_tests.rs"]
mod tests;
