use smallvec::SmallVec;

/// `(prime, exponent)` pairs in ascending prime order. A `u64` has at most
/// fifteen distinct prime factors; eight inline slots covers nearly every n.
pub type Factorization = SmallVec<[(u64, u32); 8]>;

/// Smallest-prime-factor table over `[0, n_max]`.
///
/// `spf[n] == n` exactly when n is prime; 0 and 1 map to themselves.
#[derive(Debug, Clone)]
pub struct SpfSieve {
    spf: Vec<u64>,
}

impl SpfSieve {
    pub fn new(n_max: u64) -> Self {
        let len = n_max as usize + 1;
        let mut spf: Vec<u64> = (0..len as u64).collect();

        let limit = n_max.isqrt() as usize;
        for i in 2..=limit {
            if spf[i] != i as u64 {
                continue;
            }
            for j in (i * i..len).step_by(i) {
                if spf[j] == j as u64 {
                    spf[j] = i as u64;
                }
            }
        }

        SpfSieve { spf }
    }

    pub fn spf(&self, n: u64) -> u64 {
        self.spf[n as usize]
    }

    /// Smallest proper prime divisor, or `None` for primes (and 0, 1).
    pub fn smallest_divisor(&self, n: u64) -> Option<u64> {
        if n <= 1 {
            return None;
        }
        let p = self.spf(n);
        if p == n { None } else { Some(p) }
    }

    /// Repeated division by the table entry. Empty for 0 and 1.
    pub fn factorize(&self, n: u64) -> Factorization {
        let mut factors = Factorization::new();
        if n == 0 {
            return factors;
        }
        let mut rest = n;
        while rest > 1 {
            let p = self.spf(rest);
            let mut exponent = 0;
            while rest % p == 0 {
                rest /= p;
                exponent += 1;
            }
            factors.push((p, exponent));
        }
        factors
    }
}
