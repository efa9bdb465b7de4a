use bincode::{Decode, Encode};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub enum SetClass {
    Finite,
    Infinite,
}

impl SetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetClass::Finite => "FINITE",
            SetClass::Infinite => "INFINITE",
        }
    }

    pub fn is_finite(&self) -> bool {
        matches!(self, SetClass::Finite)
    }
}

impl fmt::Display for SetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `I(n)`, kept as a tagged value so that infinite entries never leak into
/// floating-point arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Encode, Decode)]
pub enum Inversion {
    Finite(f64),
    Infinite,
}

impl Inversion {
    pub fn value(&self) -> Option<f64> {
        match self {
            Inversion::Finite(v) => Some(*v),
            Inversion::Infinite => None,
        }
    }

    pub fn is_infinite(&self) -> bool {
        matches!(self, Inversion::Infinite)
    }
}

/// SIS band from the global depth terciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Encode, Decode)]
pub enum Band {
    Thin,
    Medium,
    Thick,
}

impl Band {
    pub fn as_str(&self) -> &'static str {
        match self {
            Band::Thin => "THIN",
            Band::Medium => "MEDIUM",
            Band::Thick => "THICK",
        }
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode)]
pub enum Zone {
    Infinite,
    Stable,
    Transitional,
    Proximal,
}

impl Zone {
    pub const ALL: [Zone; 4] = [Zone::Infinite, Zone::Stable, Zone::Transitional, Zone::Proximal];

    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Infinite => "INFINITE_ZONE",
            Zone::Stable => "STABLE",
            Zone::Transitional => "TRANSITIONAL",
            Zone::Proximal => "PROXIMAL",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything derived for one integer n. Phase A fills the metric fields,
/// the curvature pass and phase B the classification, the dominance sweep
/// `dominators`.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct Record {
    pub n: u64,
    pub class: SetClass,
    pub d_min: Option<u64>,
    pub h_s: Option<f64>,
    pub inversion: Inversion,
    pub near_infinity: bool,
    pub prime_proxy: bool,
    pub lane: f64,
    pub depth: f64,
    pub band: Option<Band>,
    pub second_difference: Option<f64>,
    pub curvature: Option<f64>,
    pub shock: bool,
    pub zone: Zone,
    pub guard: bool,
    pub dominators: Option<u64>,
}

impl Record {
    pub fn is_finite(&self) -> bool {
        self.class.is_finite()
    }

    /// Infinity-likeness score used by the guard summary: large when the lane
    /// is far negative and the depth is shallow.
    pub fn infinity_score(&self) -> f64 {
        (-self.lane) * (1.0 - self.depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_names() {
        assert_eq!(SetClass::Finite.to_string(), "FINITE");
        assert_eq!(SetClass::Infinite.to_string(), "INFINITE");
        assert_eq!(Band::Medium.to_string(), "MEDIUM");
        assert_eq!(Zone::Infinite.to_string(), "INFINITE_ZONE");
        assert_eq!(Zone::Proximal.to_string(), "PROXIMAL");
    }

    #[test]
    fn test_inversion_value() {
        assert_eq!(Inversion::Finite(2.5).value(), Some(2.5));
        assert_eq!(Inversion::Infinite.value(), None);
        assert!(Inversion::Infinite.is_infinite());
    }
}
