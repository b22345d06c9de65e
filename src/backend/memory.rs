//! In-memory durable backend (used when `--db` is empty).
//!
//! Not actually durable across process restarts, it exists so the
//! Claim Store's write-through discipline and the startup full-scan path
//! have a zero-configuration backend to exercise, and so tests can
//! inject a backend that never fails.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::error::BackendError;

use super::DurableBackend;

/// A `BTreeMap`-backed in-memory store. Iteration order (`scan_all`) is
/// therefore deterministic, which is convenient for tests but not
/// otherwise load-bearing.
#[derive(Default)]
pub struct MemoryBackend {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DurableBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), BackendError> {
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn scan_all(&self) -> Result<Box<dyn Iterator<Item = (String, Vec<u8>)> + '_>, BackendError> {
        let snapshot: Vec<_> = self
            .data
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Ok(Box::new(snapshot.into_iter()))
    }

    fn close(&self) {
        // Nothing to release; kept for interface symmetry.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_value() {
        let backend = MemoryBackend::new();
        backend.set("2001:db8::1", b"alice").unwrap();
        assert_eq!(backend.get("2001:db8::1").unwrap(), Some(b"alice".to_vec()));
    }

    #[test]
    fn missing_key_is_none() {
        let backend = MemoryBackend::new();
        assert_eq!(backend.get("2001:db8::1").unwrap(), None);
    }

    #[test]
    fn scan_all_sees_every_write() {
        let backend = MemoryBackend::new();
        backend.set("2001:db8::1", b"alice").unwrap();
        backend.set("2001:db8::2", b"bob").unwrap();
        let mut seen: Vec<_> = backend.scan_all().unwrap().collect();
        seen.sort();
        assert_eq!(
            seen,
            vec![
                ("2001:db8::1".to_string(), b"alice".to_vec()),
                ("2001:db8::2".to_string(), b"bob".to_vec()),
            ]
        );
    }

    #[test]
    fn overwrite_replaces_value() {
        let backend = MemoryBackend::new();
        backend.set("2001:db8::1", b"alice").unwrap();
        backend.set("2001:db8::1", b"bob").unwrap();
        assert_eq!(backend.get("2001:db8::1").unwrap(), Some(b"bob".to_vec()));
    }
}
