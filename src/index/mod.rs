//! Hierarchical subnet aggregation index (C2).
//!
//! Maintains [`SubnetNode`]s for the eight canonical prefix lengths and
//! exposes delta application and read-only queries. Lazily populated: a
//! node exists once at least one claim has touched it.

pub mod node;
pub mod prefix;

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::address::Address;
use crate::claimant::Claimant;

pub use node::SubnetNode;
pub use prefix::CANONICAL_PREFIXES;

/// Read-only statistics for a subnet, shaped for the wire response.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// `"<address>/<prefix>"`.
    pub subnet: String,
    /// Reported owner. Empty when no claimant holds a majority (>50%).
    pub owner: String,
    /// Reported percentage. `0.0` when no claimant holds a majority.
    pub percentage: f64,
}

/// One `HashMap<Address, SubnetNode>` per canonical prefix level, each
/// guarded by its own read-write lock so readers at one level never
/// contend with writers at another. Mutations always touch all eight
/// maps together under the caller's (the Claim Store's) write lock;
/// these per-level locks exist for the index's own internal read path
/// (`subnet_stats`, `subnets_with_prefix`) that does not need a
/// claims-map-consistent snapshot.
pub struct PrefixIndex {
    levels: [RwLock<HashMap<Address, SubnetNode>>; 8],
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        PrefixIndex {
            levels: std::array::from_fn(|_| RwLock::new(HashMap::new())),
        }
    }

    fn level_for(&self, prefix_len: u8) -> Option<&RwLock<HashMap<Address, SubnetNode>>> {
        prefix::level_index(prefix_len).map(|i| &self.levels[i])
    }

    /// Apply a claim delta to every canonical level covering `address`.
    ///
    /// - `old` is `None` for a fresh claim, `Some(previous_claimant)` for
    ///   a reclaim or takeover.
    /// - If `old == Some(new)`, this is an idempotent same-owner reclaim:
    ///   a no-op at every level (no counters change), per the index-level
    ///   no-op resolution for same-owner `/128` reclaims.
    /// - Otherwise: decrement `old` (if present) and increment `new` at
    ///   every one of the eight levels, atomically from the caller's
    ///   point of view (the caller holds the store's write lock for the
    ///   whole operation).
    ///
    /// Callers must already have validated `address` and `new_claimant`;
    /// this function never fails.
    pub fn apply_delta(&self, address: Address, new: &Claimant, old: Option<&Claimant>) {
        if old == Some(new) {
            return;
        }
        for &p in &CANONICAL_PREFIXES {
            let (key, _) = prefix::subnet_key(address, p);
            let lock = self.level_for(p).expect("canonical prefix always present");
            let mut guard = lock.write();
            let node = guard.entry(key).or_insert_with(|| SubnetNode::new(p));
            if let Some(old_claimant) = old {
                node.decrement(old_claimant);
            }
            node.increment(new);
        }
    }

    /// Look up a single subnet's statistics at a canonical prefix length.
    ///
    /// Returns "no data" (empty owner, `0.0`) for a prefix length outside
    /// the canonical set or a subnet that has never been touched. Per the
    /// publication policy, the owner and percentage are only reported
    /// when the dominant claimant holds a strict majority (> 50%); the
    /// underlying node still tracks the plurality regardless.
    pub fn subnet_stats(&self, address: Address, prefix_len: u8) -> Stats {
        let subnet = format!("{}/{}", address.mask(prefix_len), prefix_len);
        let Some(lock) = self.level_for(prefix_len) else {
            return Stats {
                subnet,
                owner: String::new(),
                percentage: 0.0,
            };
        };
        let key = address.mask(prefix_len);
        let guard = lock.read();
        let Some(node) = guard.get(&key) else {
            return Stats {
                subnet,
                owner: String::new(),
                percentage: 0.0,
            };
        };
        publish(&subnet, node)
    }

    /// Statistics for every node currently existing at `prefix_len`.
    /// Returns an empty list for non-canonical lengths.
    pub fn subnets_with_prefix(&self, prefix_len: u8) -> Vec<Stats> {
        let Some(lock) = self.level_for(prefix_len) else {
            return Vec::new();
        };
        let guard = lock.read();
        guard
            .iter()
            .map(|(addr, node)| {
                let subnet = format!("{}/{}", addr, prefix_len);
                publish(&subnet, node)
            })
            .collect()
    }

    /// Borrow the node at a given subnet key, for white-box inspection
    /// (e.g. raw plurality owner regardless of the >50% publication
    /// policy). Used by tests and by any caller that needs the
    /// underlying plurality rather than the majority-gated view.
    pub fn raw_node(&self, address: Address, prefix_len: u8) -> Option<SubnetNode> {
        let lock = self.level_for(prefix_len)?;
        let key = address.mask(prefix_len);
        lock.read().get(&key).cloned()
    }
}

/// Apply the majority-owner publication policy: report the dominant
/// claimant only when its share exceeds 50%.
fn publish(subnet: &str, node: &SubnetNode) -> Stats {
    let percentage = node.dominant_percentage();
    if percentage > 50.0 {
        let owner = node
            .dominant()
            .map(|(name, _)| name.to_string())
            .unwrap_or_default();
        Stats {
            subnet: subnet.to_string(),
            owner,
            percentage,
        }
    } else {
        Stats {
            subnet: subnet.to_string(),
            owner: String::new(),
            percentage: 0.0,
        }
    }
}
