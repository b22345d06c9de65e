//! SpaceNet - territory-control claim engine.
//!
//! Maintains a mapping from IPv6 addresses to claimant names and answers
//! aggregate ownership queries over every standard IPv6 prefix boundary,
//! behind a proof-of-work admission policy whose difficulty is derived
//! from live state.
//!
//! # Components
//!
//! - [`pow`]: proof-of-work hashing, difficulty checks, and the
//!   client-side nonce search utility.
//! - [`index`]: the hierarchical subnet aggregation index (per-subnet
//!   claimant counts and dominant-owner computation at the eight
//!   canonical prefix lengths).
//! - [`store`]: the Claim Store (the authoritative address-to-claimant
//!   map, the write-through durable backend, and the difficulty policy).
//! - [`backend`]: the durable backend trait and its in-memory and
//!   embedded on-disk implementations.
//! - [`admission`]: the Admission Service (validates and routes claim
//!   submissions and read queries through the store).
//! - [`api`]: the HTTP wire layer (JSON over axum).
//!
//! # Quick Start
//!
//! ```
//! use spacenet::address::Address;
//! use spacenet::admission::AdmissionService;
//! use spacenet::backend::memory::MemoryBackend;
//! use spacenet::claimant::Claimant;
//! use spacenet::store::ClaimStore;
//! use spacenet::store::difficulty::D_BASE;
//! use spacenet::pow;
//! use std::sync::Arc;
//!
//! let store = ClaimStore::open(Box::new(MemoryBackend::new())).unwrap();
//! let service = AdmissionService::new(Arc::new(store));
//!
//! let target: Address = "2001:db8::1".parse().unwrap();
//! let claimant = Claimant::parse("alice").unwrap();
//! // An untouched address starts at the base difficulty.
//! let nonce = pow::solve(target, &claimant, D_BASE, 10_000_000).unwrap();
//!
//! service.submit_claim(target, "alice", nonce).unwrap();
//! assert_eq!(service.get_ip(target).unwrap().claimant, claimant);
//! ```

pub mod address;
pub mod admission;
pub mod api;
pub mod backend;
pub mod claimant;
pub mod config;
pub mod error;
pub mod index;
pub mod pow;
pub mod store;

pub use address::Address;
pub use claimant::Claimant;
pub use error::{Error, Result};
