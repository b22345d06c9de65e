//! Durable backend interface (C5): an opaque key-value store of
//! (IPv6 canonical string -> claimant bytes).
//!
//! Narrowly specified so an in-memory, embedded, or remote key-value
//! store can all satisfy it. The Claim Store treats the backend as a
//! write-through cache backstore; the in-memory map remains the read
//! path.

pub mod memory;
pub mod sled_backend;

use crate::error::BackendError;

/// Capability-typed handle to a durable key-value store, held as a
/// trait object so the in-memory and embedded implementations are
/// interchangeable behind a single narrow interface.
pub trait DurableBackend: Send + Sync {
    /// Point read. `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError>;

    /// Point write. Must be durable on return for crash-consistency with
    /// acknowledgements; a backend that relaxes this weakens the store's
    /// recovery guarantee accordingly.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), BackendError>;

    /// Iterate the entire contents. Used once, at startup.
    fn scan_all(&self) -> Result<Box<dyn Iterator<Item = (String, Vec<u8>)> + '_>, BackendError>;

    /// Release the backend handle. Idempotent.
    fn close(&self);
}
