//! Canonical prefix lengths and subnet-key arithmetic.

use crate::address::Address;

/// The fixed, ordered set of canonical prefix lengths SpaceNet aggregates
/// over. All hierarchical aggregation operates at these and only these
/// lengths.
pub const CANONICAL_PREFIXES: [u8; 8] = [16, 32, 48, 64, 80, 96, 112, 128];

/// `true` iff `p` is one of the eight canonical prefix lengths.
pub fn is_canonical(p: u8) -> bool {
    CANONICAL_PREFIXES.contains(&p)
}

/// Array index (0..8) of a canonical prefix length, if it is one.
pub fn level_index(p: u8) -> Option<usize> {
    CANONICAL_PREFIXES.iter().position(|&c| c == p)
}

/// The subnet key for `address` at canonical prefix length `p`: the
/// address masked to its top `p` bits, paired with `p` itself.
///
/// Built from the address's `ipnet::Ipv6Net` at `p` (the corpus's
/// network-prefix type), decomposed back into the masked address and
/// length the per-level maps key on.
pub fn subnet_key(address: Address, p: u8) -> (Address, u8) {
    let net = address.to_net(p);
    (Address::from(net.network()), net.prefix_len())
}

/// The 16 addresses sharing `address`'s /124 block (its top 124 bits),
/// excluding `address` itself. Used by the difficulty policy's
/// contiguous-holdings bonus.
pub fn siblings_in_124(address: Address) -> impl Iterator<Item = Address> {
    let base = u128::from_be_bytes(address.mask(124).to_bytes());
    let excluded = u128::from_be_bytes(address.to_bytes());
    (0u128..16).filter_map(move |offset| {
        let candidate = base | offset;
        if candidate == excluded {
            None
        } else {
            Some(Address::from_bytes(candidate.to_be_bytes()))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_set_is_exactly_eight_levels() {
        assert_eq!(CANONICAL_PREFIXES.len(), 8);
        assert_eq!(CANONICAL_PREFIXES, [16, 32, 48, 64, 80, 96, 112, 128]);
    }

    #[test]
    fn non_canonical_lengths_rejected() {
        assert!(!is_canonical(0));
        assert!(!is_canonical(24));
        assert!(is_canonical(64));
        assert!(!is_canonical(100));
    }

    #[test]
    fn siblings_124_excludes_self_and_has_15_entries() {
        let a: Address = "2001:db8::1".parse().unwrap();
        let sibs: Vec<_> = siblings_in_124(a).collect();
        assert_eq!(sibs.len(), 15);
        assert!(!sibs.contains(&a));
    }

    #[test]
    fn siblings_124_share_top_124_bits() {
        let a: Address = "2001:db8::5".parse().unwrap();
        for s in siblings_in_124(a) {
            assert_eq!(s.mask(124), a.mask(124));
        }
    }
}
