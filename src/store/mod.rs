//! Claim Store (C3): the authoritative address -> claimant mapping.
//!
//! Serializes mutations, drives the Prefix Index, and write-throughs to
//! the Durable Backend. Single source of truth for "who currently
//! claims address a".

pub mod difficulty;

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::address::Address;
use crate::backend::DurableBackend;
use crate::claimant::Claimant;
use crate::error::{BackendError, Error, Result};
use crate::index::{PrefixIndex, Stats};
use crate::pow;

/// The authoritative claim map, the hierarchical index it drives, and
/// the durable backend it write-throughs to.
///
/// A single readers-writer lock guards `claims`; writers (`process_claim`)
/// hold it for the whole operation (claims mutate, backend write, index
/// delta), which is the crate's single serialization point. Readers
/// (`get_claim`, `subnet_stats`, `all_claims`) take only the read lock
/// and may observe a snapshot that lags a concurrent write that has not
/// yet released it. `calculate_difficulty` also takes only the read
/// lock, performing up to 16 point lookups under it.
pub struct ClaimStore {
    claims: RwLock<HashMap<Address, Claimant>>,
    index: PrefixIndex,
    backend: Box<dyn DurableBackend>,
}

impl ClaimStore {
    /// Construct a store over the given backend, loading any existing
    /// state via a full scan.
    ///
    /// Per-record decode errors are logged and skipped; failure of the
    /// scan itself is fatal (`Error::BackendRead`).
    pub fn open(backend: Box<dyn DurableBackend>) -> Result<Self> {
        let store = ClaimStore {
            claims: RwLock::new(HashMap::new()),
            index: PrefixIndex::new(),
            backend,
        };
        store.load_from_backend()?;
        Ok(store)
    }

    fn load_from_backend(&self) -> Result<()> {
        let entries = self
            .backend
            .scan_all()
            .map_err(|e: BackendError| Error::BackendRead(e.to_string()))?;

        let mut claims = self.claims.write();
        for (key, value) in entries {
            let address: Address = match key.parse() {
                Ok(a) => a,
                Err(_) => {
                    log::warn!("skipping record with undecodable address key: {key}");
                    continue;
                }
            };
            let name = match String::from_utf8(value) {
                Ok(s) => s,
                Err(_) => {
                    log::warn!("skipping record with non-UTF-8 claimant for {key}");
                    continue;
                }
            };
            let claimant = match Claimant::parse(name) {
                Ok(c) => c,
                Err(e) => {
                    log::warn!("skipping record with invalid claimant for {key}: {e}");
                    continue;
                }
            };
            claims.insert(address, claimant.clone());
            self.index.apply_delta(address, &claimant, None);
        }
        Ok(())
    }

    /// Process a single (address, claimant) claim: write-through to the
    /// backend, then apply the delta to the hierarchical index.
    ///
    /// On backend-write failure, the tentative in-memory mapping is
    /// rolled back to its prior value (or removed if there was none)
    /// before the lock is released, so invariants always hold after an
    /// error.
    pub fn process_claim(&self, address: Address, claimant: Claimant) -> Result<()> {
        let mut claims = self.claims.write();
        let old = claims.get(&address).cloned();

        claims.insert(address, claimant.clone());

        if let Err(e) = self.backend.set(&address.canonical_string(), claimant.as_str().as_bytes())
        {
            match old {
                Some(prev) => {
                    claims.insert(address, prev);
                }
                None => {
                    claims.remove(&address);
                }
            }
            return Err(Error::BackendWrite(e.to_string()));
        }

        self.index.apply_delta(address, &claimant, old.as_ref());
        Ok(())
    }

    /// Snapshot read of the current claimant for `address`, if any.
    pub fn get_claim(&self, address: Address) -> Option<Claimant> {
        self.claims.read().get(&address).cloned()
    }

    /// Parse `"<address>/<prefix>"` and forward to the Prefix Index.
    /// Invalid syntax returns "no data" (empty owner, `0.0`).
    pub fn subnet_stats(&self, subnet_string: &str) -> Stats {
        match parse_subnet(subnet_string) {
            Some((address, prefix_len)) => self.index.subnet_stats(address, prefix_len),
            None => Stats {
                subnet: subnet_string.to_string(),
                owner: String::new(),
                percentage: 0.0,
            },
        }
    }

    /// Statistics for every existing node at a canonical prefix length.
    pub fn subnets_with_prefix(&self, prefix_len: u8) -> Vec<Stats> {
        self.index.subnets_with_prefix(prefix_len)
    }

    /// Raw node state for white-box inspection, bypassing the >50%
    /// publication gate: reports the dominant claimant by raw plurality
    /// even when no one holds a majority.
    pub fn raw_node(
        &self,
        address: Address,
        prefix_len: u8,
    ) -> Option<crate::index::SubnetNode> {
        self.index.raw_node(address, prefix_len)
    }

    /// Snapshot copy of the entire claim map. Used rarely; the cost of
    /// copying the whole map is accepted.
    pub fn all_claims(&self) -> HashMap<Address, Claimant> {
        self.claims.read().clone()
    }

    /// Release the backend handle. Idempotent.
    pub fn close(&self) {
        self.backend.close();
    }

    /// Compute the required proof-of-work difficulty for `address` from
    /// live claim state.
    pub fn calculate_difficulty(&self, address: Address) -> u8 {
        let claims = self.claims.read();
        difficulty::calculate(address, &claims)
    }

    /// Validate a submitted proof against the live difficulty for
    /// `target`.
    pub fn validate_pow(&self, target: Address, claimant: &Claimant, nonce: u64) -> Result<()> {
        let required = self.calculate_difficulty(target);
        let h = pow::hash(target, claimant, nonce);
        if pow::is_valid(&h, required) {
            Ok(())
        } else {
            Err(Error::InsufficientDifficulty {
                required,
                actual: pow::leading_zero_bits(&h) as u8,
            })
        }
    }
}

/// Parse `"<address>/<prefix>"`. `None` on any malformed input.
fn parse_subnet(s: &str) -> Option<(Address, u8)> {
    let (addr_part, prefix_part) = s.split_once('/')?;
    let address: Address = addr_part.parse().ok()?;
    let prefix_len: u8 = prefix_part.parse().ok()?;
    Some((address, prefix_len))
}
