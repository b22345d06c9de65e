//! IPv6 address type used as the claim key throughout the engine.

use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

use ipnet::Ipv6Net;

use crate::error::AddressError;

/// A 128-bit IPv6 address.
///
/// Wraps [`std::net::Ipv6Addr`] so the crate has one canonical type for
/// both the textual form used as a durable-backend key and the fixed
/// 16-byte form the proof-of-work hash and subnet masking operate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address(Ipv6Addr);

impl Address {
    /// The fixed 16-byte network-order representation used by the PoW
    /// hash layout and by subnet masking.
    pub fn to_bytes(self) -> [u8; 16] {
        self.0.octets()
    }

    /// Build an `Address` from its 16-byte network-order representation.
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Address(Ipv6Addr::from(bytes))
    }

    /// Mask this address down to its top `prefix_len` bits, zeroing the rest.
    ///
    /// `prefix_len` must be in `0..=128`; values outside that range are
    /// clamped rather than panicking, since callers validate against the
    /// canonical prefix set before calling this. Delegates to `ipnet`'s
    /// `Ipv6Net`, the same network-prefix type the corpus uses for CIDR
    /// matching, rather than hand-rolling the shift.
    pub fn mask(self, prefix_len: u8) -> Address {
        let prefix_len = prefix_len.min(128);
        let net = Ipv6Net::new(self.0, prefix_len).expect("prefix_len clamped to 0..=128");
        Address(net.network())
    }

    /// This address's `ipnet::Ipv6Net` at `prefix_len`: the subnet key as
    /// the corpus's network-prefix type rather than an (address, length)
    /// pair.
    pub fn to_net(self, prefix_len: u8) -> Ipv6Net {
        let prefix_len = prefix_len.min(128);
        Ipv6Net::new(self.mask(prefix_len).0, prefix_len).expect("prefix_len clamped to 0..=128")
    }

    /// The canonical IPv6 textual form, used as the durable-backend key.
    pub fn canonical_string(self) -> String {
        self.0.to_string()
    }

    /// The underlying standard-library address.
    pub fn into_inner(self) -> Ipv6Addr {
        self.0
    }
}

impl From<Ipv6Addr> for Address {
    fn from(addr: Ipv6Addr) -> Self {
        Address(addr)
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Ipv6Addr>()
            .map(Address)
            .map_err(|_| AddressError::InvalidAddress(s.to_string()))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
