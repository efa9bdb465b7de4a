use crate::sieve::SpfSieve;

/// Sorted divisors of n inside `[2, floor(sqrt(n))]`, together with that bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DivisorBound {
    pub divisors: Vec<u64>,
    pub limit: u64,
}

/// Every divisor of the number described by `factors`, 1 and n included, in
/// generation order.
pub fn all_divisors(factors: &[(u64, u32)]) -> Vec<u64> {
    let mut divisors = vec![1u64];
    for &(p, e) in factors {
        let base = divisors.clone();
        let mut prime_power = 1u64;
        for _ in 0..e {
            prime_power *= p;
            divisors.extend(base.iter().map(|d| d * prime_power));
        }
    }
    divisors
}

pub fn divisors_within_sqrt(n: u64, sieve: &SpfSieve) -> DivisorBound {
    let limit = n.isqrt();
    let mut divisors: Vec<u64> = all_divisors(&sieve.factorize(n))
        .into_iter()
        .filter(|&d| (2..=limit).contains(&d))
        .collect();
    divisors.sort_unstable();
    DivisorBound { divisors, limit }
}
