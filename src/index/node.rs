//! Per-subnet aggregation record.

use ahash::AHashMap;
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

use crate::claimant::Claimant;

/// Per-subnet aggregation record: total addresses, claimed count, and the
/// per-claimant breakdown, plus the cached dominant-owner result.
///
/// Big-integer counts are mandatory: at `p = 16` a single claimant may
/// hold up to 2^112 addresses, and `total_addresses` itself is
/// `2^(128-p)`, well beyond a 64-bit counter at the shallow levels.
#[derive(Debug, Clone)]
pub struct SubnetNode {
    total_addresses: BigUint,
    claimed_count: BigUint,
    per_claimant: AHashMap<Claimant, BigUint>,
    dominant: Option<(Claimant, BigUint)>,
}

impl SubnetNode {
    /// Create an empty node for a subnet of the given canonical prefix
    /// length (`total_addresses = 2^(128-p)`).
    pub fn new(prefix_len: u8) -> Self {
        let exponent = (128u32 - u32::from(prefix_len)) as usize;
        SubnetNode {
            total_addresses: BigUint::from(1u32) << exponent,
            claimed_count: BigUint::zero(),
            per_claimant: AHashMap::new(),
            dominant: None,
        }
    }

    /// Total addresses in the subnet (exact, `2^(128-p)`).
    pub fn total_addresses(&self) -> &BigUint {
        &self.total_addresses
    }

    /// Number of addresses in this subnet currently claimed by anyone.
    pub fn claimed_count(&self) -> &BigUint {
        &self.claimed_count
    }

    /// Count held by a specific claimant, if any.
    pub fn count_for(&self, claimant: &Claimant) -> Option<&BigUint> {
        self.per_claimant.get(claimant)
    }

    /// Number of distinct claimants with a nonzero count in this subnet.
    pub fn distinct_claimants(&self) -> usize {
        self.per_claimant.len()
    }

    /// Increment `claimant`'s count by one (a newly claimed address).
    pub fn increment(&mut self, claimant: &Claimant) {
        let entry = self
            .per_claimant
            .entry(claimant.clone())
            .or_insert_with(BigUint::zero);
        *entry += 1u32;
        self.claimed_count += 1u32;
        self.recompute_dominant();
    }

    /// Decrement `claimant`'s count by one (a reclaimed-away address),
    /// removing the entry entirely if it reaches zero, per the
    /// zero-entries-are-removed invariant.
    pub fn decrement(&mut self, claimant: &Claimant) {
        if let Some(count) = self.per_claimant.get_mut(claimant) {
            *count -= 1u32;
            if count.is_zero() {
                self.per_claimant.remove(claimant);
            }
            self.claimed_count -= 1u32;
            self.recompute_dominant();
        }
    }

    /// Recompute the cached dominant claimant: highest count wins, ties
    /// broken by lexicographically smaller name.
    fn recompute_dominant(&mut self) {
        self.dominant = self
            .per_claimant
            .iter()
            .max_by(|(name_a, count_a), (name_b, count_b)| {
                count_a
                    .cmp(count_b)
                    .then_with(|| name_b.cmp(name_a)) // smaller name wins ties
            })
            .map(|(name, count)| (name.clone(), count.clone()));
    }

    /// The dominant claimant's name and count, if the subnet has any
    /// claims at all.
    pub fn dominant(&self) -> Option<(&Claimant, &BigUint)> {
        self.dominant.as_ref().map(|(name, count)| (name, count))
    }

    /// Dominant percentage as a double: `(dominant count * 100) /
    /// total_addresses`, computed via arbitrary-precision division so the
    /// denominator (up to 2^112 at p=16) never underflows to exactly
    /// zero in the arithmetic path.
    pub fn dominant_percentage(&self) -> f64 {
        match &self.dominant {
            None => 0.0,
            Some((_, count)) => big_ratio_percentage(count, &self.total_addresses),
        }
    }
}

/// `(numerator * 100) / denominator` as an `f64`, computed with enough
/// precision in the big-integer domain that the result does not
/// underflow to zero before conversion, even when `denominator` is as
/// large as 2^112.
fn big_ratio_percentage(numerator: &BigUint, denominator: &BigUint) -> f64 {
    if denominator.is_zero() {
        return 0.0;
    }
    // Scale the numerator up before dividing so the integer division
    // retains fractional precision, then convert the fixed-point result
    // to f64 and shift the decimal back. Needs headroom past 112 bits
    // (the largest total_addresses exponent, at p=16) or a single claim
    // there divides to exactly zero before it ever reaches f64.
    const SCALE_BITS: usize = 128;
    let scaled = (numerator * BigUint::from(100u32)) << SCALE_BITS;
    let fixed_point = scaled / denominator;
    let as_f64 = fixed_point.to_f64().unwrap_or(f64::INFINITY);
    as_f64 / (2f64.powi(SCALE_BITS as i32))
}
