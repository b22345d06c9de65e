//! Proof-of-work difficulty policy, derived from live claim state.

use std::collections::HashMap;

use crate::address::Address;
use crate::claimant::Claimant;
use crate::index::prefix::siblings_in_124;

/// Base difficulty for any address, claimed or not.
pub const D_BASE: u8 = 8;
/// Added when the target address is currently claimed by anyone.
pub const D_CLAIM_BONUS: u8 = 4;
/// Added per sibling address in the /124 block held by the current owner.
pub const D_CONTIG_BONUS_PER: u8 = 2;
/// Cap on the number of /124 siblings counted toward the contiguous bonus.
pub const D_CONTIG_CAP: u8 = 16;
/// Absolute ceiling on the computed difficulty.
pub const D_MAX: u8 = 28;

/// Compute the required difficulty for claiming `address`, given the
/// current `claims` map.
///
/// ```text
/// D(a) = D_BASE
/// if a currently claimed by C:
///     D += D_CLAIM_BONUS
///     k = siblings in a's /124 also claimed by C (a excluded)
///     D += D_CONTIG_BONUS_PER * min(k, D_CONTIG_CAP)
/// clamp D to [0, D_MAX]
/// ```
pub fn calculate(address: Address, claims: &HashMap<Address, Claimant>) -> u8 {
    let mut d: u32 = u32::from(D_BASE);

    if let Some(owner) = claims.get(&address) {
        d += u32::from(D_CLAIM_BONUS);

        let k = siblings_in_124(address)
            .filter(|sibling| claims.get(sibling) == Some(owner))
            .count() as u32;
        let k_capped = k.min(u32::from(D_CONTIG_CAP));
        d += u32::from(D_CONTIG_BONUS_PER) * k_capped;
    }

    d.min(u32::from(D_MAX)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    fn name(s: &str) -> Claimant {
        Claimant::parse(s).unwrap()
    }

    #[test]
    fn unclaimed_address_is_base_difficulty() {
        let claims = HashMap::new();
        assert_eq!(calculate(addr("2001:db8::1"), &claims), D_BASE);
    }

    #[test]
    fn claimed_address_adds_claim_bonus() {
        let mut claims = HashMap::new();
        claims.insert(addr("2001:db8::1"), name("alice"));
        assert_eq!(calculate(addr("2001:db8::1"), &claims), D_BASE + D_CLAIM_BONUS);
    }

    #[test]
    fn dense_contiguous_holdings_raise_difficulty() {
        let mut claims = HashMap::new();
        let target = addr("2001:db8::1");
        claims.insert(target, name("alice"));
        for sibling in siblings_in_124(target).take(3) {
            claims.insert(sibling, name("alice"));
        }
        let expected = D_BASE + D_CLAIM_BONUS + D_CONTIG_BONUS_PER * 3;
        assert_eq!(calculate(target, &claims), expected);
    }

    #[test]
    fn difficulty_is_capped_at_d_max() {
        let mut claims = HashMap::new();
        let target = addr("2001:db8::1");
        claims.insert(target, name("alice"));
        for sibling in siblings_in_124(target) {
            claims.insert(sibling, name("alice"));
        }
        assert_eq!(calculate(target, &claims), D_MAX);
    }

    #[test]
    fn siblings_owned_by_someone_else_do_not_count() {
        let mut claims = HashMap::new();
        let target = addr("2001:db8::1");
        claims.insert(target, name("alice"));
        let mut sibs = siblings_in_124(target);
        claims.insert(sibs.next().unwrap(), name("bob"));
        assert_eq!(calculate(target, &claims), D_BASE + D_CLAIM_BONUS);
    }

    #[test]
    fn monotonicity_adding_more_owned_siblings_never_decreases_d() {
        // Adding more of C's claims inside a's /124 never decreases D(a).
        let target = addr("2001:db8::1");
        let owner = name("alice");
        let sibs: Vec<_> = siblings_in_124(target).collect();

        let mut claims = HashMap::new();
        claims.insert(target, owner.clone());
        let mut prev = calculate(target, &claims);
        for sibling in sibs {
            claims.insert(sibling, owner.clone());
            let next = calculate(target, &claims);
            assert!(next >= prev);
            prev = next;
        }
    }
}
