use crate::config::ScanConfig;
use crate::divisors::divisors_within_sqrt;
use crate::record::{Inversion, SetClass};
use crate::sieve::SpfSieve;

/// Phase A output for one n: everything that depends on n alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Metrics {
    pub n: u64,
    pub class: SetClass,
    pub d_min: Option<u64>,
    pub h_s: Option<f64>,
    pub inversion: Inversion,
    pub near_infinity: bool,
    pub prime_proxy: bool,
    pub lane: f64,
    pub depth: f64,
}

/// Keep `x` strictly inside (-1, 1).
pub fn clamp_lane(x: f64, eps: f64) -> f64 {
    if x <= -1.0 {
        -1.0 + eps
    } else if x >= 1.0 {
        1.0 - eps
    } else {
        x
    }
}

/// Mean relative gap `1 - d[i]/d[i+1]` over consecutive divisors; 0 below two divisors.
pub fn r_full(divisors: &[u64]) -> f64 {
    if divisors.len() < 2 {
        return 0.0;
    }
    let sum: f64 = divisors
        .windows(2)
        .map(|pair| 1.0 - pair[0] as f64 / pair[1] as f64)
        .sum();
    sum / (divisors.len() - 1) as f64
}

pub fn lane_from_divisors(divisors: &[u64], eps: f64) -> f64 {
    clamp_lane(2.0 * r_full(divisors) - 1.0, eps)
}

/// Log-weighted divisor density below sqrt(n), clipped to [0, 1].
pub fn depth_from_divisors(divisors: &[u64], limit: u64) -> f64 {
    // primes land here; an empty f64 sum is -0.0, which would export as "-0"
    if limit < 2 || divisors.is_empty() {
        return 0.0;
    }
    let denom = (limit as f64 + 1.0).ln();
    let sum = divisors
        .iter()
        .fold(0.0, |acc, &d| acc + (d as f64 + 1.0).ln() / denom);
    (sum / (limit - 1) as f64).clamp(0.0, 1.0)
}

/// `(class, h_s, I)` from the smallest divisor. A ratio that reaches 1
/// saturates and turns a composite into a boundary INFINITE entry.
pub fn saturation(n: u64, d_min: Option<u64>) -> (SetClass, Option<f64>, Inversion) {
    let Some(d) = d_min else {
        return (SetClass::Infinite, None, Inversion::Infinite);
    };
    let h_s = d as f64 / (n as f64).sqrt();
    if h_s >= 1.0 {
        (SetClass::Infinite, Some(1.0), Inversion::Infinite)
    } else {
        (SetClass::Finite, Some(h_s), Inversion::Finite(1.0 / (1.0 - h_s)))
    }
}

pub fn measure(n: u64, sieve: &SpfSieve, config: &ScanConfig) -> Metrics {
    let d_min = sieve.smallest_divisor(n);
    let (class, h_s, inversion) = saturation(n, d_min);

    let bound = divisors_within_sqrt(n, sieve);
    let lane = lane_from_divisors(&bound.divisors, config.lane_epsilon);
    let depth = depth_from_divisors(&bound.divisors, bound.limit);

    let near_infinity = class.is_finite()
        && h_s.is_some_and(|h| 1.0 - config.near_eps <= h && h < 1.0);

    Metrics {
        n,
        class,
        d_min,
        h_s,
        inversion,
        near_infinity,
        prime_proxy: d_min.is_none(),
        lane,
        depth,
    }
}
