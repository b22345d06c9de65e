//! Embedded on-disk durable backend, backed by `sled`.
//!
//! Chosen over an embedded SQL engine because it is a pure-Rust
//! key-value store whose API maps directly onto the five-operation
//! `DurableBackend` trait without an intervening SQL layer the core has
//! no use for; `flush()` on `set` satisfies the "durable on return"
//! requirement so acknowledged writes survive a crash.

use std::path::Path;

use crate::error::BackendError;

use super::DurableBackend;

/// An embedded, disk-backed key-value store.
pub struct SledBackend {
    db: sled::Db,
}

impl SledBackend {
    /// Open (creating if absent) a sled database at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let db = sled::open(path).map_err(|e| BackendError::Storage(e.to_string()))?;
        Ok(SledBackend { db })
    }
}

impl DurableBackend for SledBackend {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        self.db
            .get(key.as_bytes())
            .map(|opt| opt.map(|v| v.to_vec()))
            .map_err(|e| BackendError::Storage(e.to_string()))
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), BackendError> {
        self.db
            .insert(key.as_bytes(), value)
            .map_err(|e| BackendError::Storage(e.to_string()))?;
        // Flush before returning so an acknowledged write is durable
        // before the caller can observe success.
        self.db
            .flush()
            .map_err(|e| BackendError::Storage(e.to_string()))?;
        Ok(())
    }

    fn scan_all(&self) -> Result<Box<dyn Iterator<Item = (String, Vec<u8>)> + '_>, BackendError> {
        let iter = self.db.iter().filter_map(|entry| match entry {
            Ok((k, v)) => {
                let key = String::from_utf8(k.to_vec()).ok()?;
                Some((key, v.to_vec()))
            }
            Err(e) => {
                log::warn!("skipping undecodable record during scan: {e}");
                None
            }
        });
        Ok(Box::new(iter))
    }

    fn close(&self) {
        if let Err(e) = self.db.flush() {
            log::warn!("error flushing sled backend on close: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trips_a_value() {
        let dir = tempdir().unwrap();
        let backend = SledBackend::open(dir.path()).unwrap();
        backend.set("2001:db8::1", b"alice").unwrap();
        assert_eq!(backend.get("2001:db8::1").unwrap(), Some(b"alice".to_vec()));
    }

    #[test]
    fn survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let backend = SledBackend::open(dir.path()).unwrap();
            backend.set("2001:db8::1", b"alice").unwrap();
            backend.close();
        }
        let backend = SledBackend::open(dir.path()).unwrap();
        assert_eq!(backend.get("2001:db8::1").unwrap(), Some(b"alice".to_vec()));
    }

    #[test]
    fn scan_all_sees_every_write() {
        let dir = tempdir().unwrap();
        let backend = SledBackend::open(dir.path()).unwrap();
        backend.set("2001:db8::1", b"alice").unwrap();
        backend.set("2001:db8::2", b"bob").unwrap();
        let mut seen: Vec<_> = backend.scan_all().unwrap().collect();
        seen.sort();
        assert_eq!(seen.len(), 2);
    }
}
