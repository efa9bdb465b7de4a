//! Symbolic infinities tagged with a lane.
//!
//! `Omega(n) = <+INF, lane = a(n)>`. Dividing two of them yields a
//! finite-class object, subtracting yields a zero-class object and adding
//! yields another infinity whose lane is the clamped mean.

use crate::config::DEFAULT_LANE_EPSILON;
use crate::error::SsitError;
use crate::export::format_real;
use crate::metric::{clamp_lane, r_full};
use std::fmt;
use std::ops::{Add, Div, Sub};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteClass {
    pub lane: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZeroClass {
    pub lane: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Positive,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SymbolicInfinity {
    sign: Sign,
    lane: f64,
}

fn lane_mean(a: f64, b: f64) -> f64 {
    clamp_lane(0.5 * (a + b), DEFAULT_LANE_EPSILON)
}

fn lane_separation(a: f64, b: f64) -> f64 {
    clamp_lane((a - b).abs(), DEFAULT_LANE_EPSILON)
}

impl SymbolicInfinity {
    pub fn new(sign: Sign, lane: f64) -> Self {
        SymbolicInfinity {
            sign,
            lane: clamp_lane(lane, DEFAULT_LANE_EPSILON),
        }
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn lane(&self) -> f64 {
        self.lane
    }
}

impl Div for SymbolicInfinity {
    type Output = FiniteClass;

    fn div(self, rhs: Self) -> FiniteClass {
        FiniteClass { lane: lane_separation(self.lane, rhs.lane) }
    }
}

impl Sub for SymbolicInfinity {
    type Output = ZeroClass;

    fn sub(self, rhs: Self) -> ZeroClass {
        ZeroClass { lane: lane_separation(self.lane, rhs.lane) }
    }
}

impl Add for SymbolicInfinity {
    type Output = SymbolicInfinity;

    fn add(self, rhs: Self) -> SymbolicInfinity {
        SymbolicInfinity::new(self.sign, lane_mean(self.lane, rhs.lane))
    }
}

impl fmt::Display for SymbolicInfinity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.sign {
            Sign::Positive => '+',
            Sign::Negative => '-',
        };
        write!(f, "<{}INF, lane={}>", sign, format_real(self.lane))
    }
}

impl fmt::Display for FiniteClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<finite-class, lane={}>", format_real(self.lane))
    }
}

impl fmt::Display for ZeroClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<zero-class, lane={}>", format_real(self.lane))
    }
}

/// Divisors of n in `[2, isqrt(n)]` by trial division; no sieve needed.
pub fn trial_divisors_within_sqrt(n: u64) -> Vec<u64> {
    if n < 2 {
        return Vec::new();
    }
    (2..=n.isqrt()).filter(|d| n % d == 0).collect()
}

pub fn omega(n: u64) -> SymbolicInfinity {
    let r = r_full(&trial_divisors_within_sqrt(n));
    SymbolicInfinity::new(Sign::Positive, 2.0 * r - 1.0)
}

pub const DEFAULT_PAIRS: &str = "2310:30030,72:84,720:840,2310:97,30030:97,97:100,100:121";

/// Parse `"a:b,c:d"`. Empty pieces are skipped; both sides must be positive.
pub fn parse_pairs(text: &str) -> Result<Vec<(u64, u64)>, SsitError> {
    let mut pairs = Vec::new();
    for piece in text.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((x, y)) = piece.split_once(':') else {
            return Err(SsitError::Parse(format!(
                "pairs must be formatted like 'a:b,c:d', got '{}'",
                piece
            )));
        };
        let parse = |s: &str| -> Result<u64, SsitError> {
            let s = s.trim();
            let value: i128 = s
                .parse()
                .map_err(|_| SsitError::Parse(format!("'{}' is not an integer", s)))?;
            if value <= 0 {
                return Err(SsitError::Parse("n values must be positive integers".to_string()));
            }
            u64::try_from(value)
                .map_err(|_| SsitError::Parse(format!("'{}' does not fit in u64", s)))
        };
        pairs.push((parse(x)?, parse(y)?));
    }
    Ok(pairs)
}

/// Lines printed by the `ops` command for each pair.
pub fn describe_pair(x: u64, y: u64) -> Vec<String> {
    let ox = omega(x);
    let oy = omega(y);
    vec![
        format!("n1={} Omega1={}", x, ox),
        format!("n2={} Omega2={}", y, oy),
        format!("Omega1 / Omega2 = {}", ox / oy),
        format!("Omega1 - Omega2 = {}", ox - oy),
        format!("Omega1 + Omega2 = {}", ox + oy),
    ]
}
