//! Decomposed units: a conversion factor over a canonical SI signature

use serde::{Deserialize, Serialize};
use crate::{NonLinear, Signature};

/// Conversion factor to SI: either a plain multiplicative scale or a
/// non-linear converter (temperature scale, magnitude system).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Factor {
    Linear(f64),
    NonLinear(NonLinear),
}

impl Factor {
    /// Check if this factor is a plain scale
    pub fn is_linear(&self) -> bool {
        matches!(self, Factor::Linear(_))
    }

    pub fn as_linear(&self) -> Option<f64> {
        match self {
            Factor::Linear(f) => Some(*f),
            Factor::NonLinear(_) => None,
        }
    }

    /// Scale by a plain number (metric prefixes, leading numeric factors)
    pub fn scale(self, factor: f64) -> Factor {
        match self {
            Factor::Linear(f) => Factor::Linear(f * factor),
            Factor::NonLinear(n) => Factor::NonLinear(n.compose_scale(factor)),
        }
    }

    /// Convert a value expressed in this unit to linear SI
    pub fn to_si(&self, value: f64) -> f64 {
        match self {
            Factor::Linear(f) => f * value,
            Factor::NonLinear(n) => n.apply(value, false),
        }
    }

    /// Convert a linear SI value into this unit
    pub fn from_si(&self, value_si: f64) -> f64 {
        match self {
            Factor::Linear(f) => value_si / f,
            Factor::NonLinear(n) => n.apply(value_si, true),
        }
    }
}

impl From<f64> for Factor {
    fn from(f: f64) -> Self {
        Factor::Linear(f)
    }
}

impl From<NonLinear> for Factor {
    fn from(n: NonLinear) -> Self {
        Factor::NonLinear(n)
    }
}

/// One atomic token broken into its parts, e.g. `W3` is
/// `(1.0, kg1 m2 s-3, 3)`. The signature is the registry's composite SI
/// signature of the base unit, not yet raised to `power`.
#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub factor: Factor,
    pub signature: Signature,
    pub power: i32,
}

/// A full unit expression reduced to SI: `value_si = factor * value` for
/// linear units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    pub factor: Factor,
    pub signature: Signature,
}

impl Decomposition {
    pub fn new(factor: Factor, signature: Signature) -> Self {
        Decomposition { factor, signature }
    }

    /// Check if two decompositions have the same physical kind
    pub fn is_compatible(&self, other: &Decomposition) -> bool {
        self.signature == other.signature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linear_factor() {
        let km = Factor::Linear(1000.0);
        assert!(km.is_linear());
        assert_eq!(km.to_si(5.0), 5000.0);
        assert_eq!(km.from_si(5000.0), 5.0);
        assert_eq!(km.scale(2.0).as_linear(), Some(2000.0));
    }

    #[test]
    fn test_nonlinear_factor() {
        let c = Factor::from(NonLinear::celsius());
        assert!(!c.is_linear());
        assert_eq!(c.as_linear(), None);
        assert_relative_eq!(c.to_si(100.0), 373.15, max_relative = 1e-12);
        assert_relative_eq!(c.from_si(273.15), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scaling_nonlinear_keeps_kind() {
        let kc = Factor::from(NonLinear::celsius()).scale(1000.0);
        match kc {
            Factor::NonLinear(n) => {
                assert_eq!(n.prefix, 1000.0);
                assert_eq!(n.kind, NonLinear::celsius().kind);
            }
            Factor::Linear(_) => panic!("scaling must keep the converter"),
        }
    }

    #[test]
    fn test_compatible() {
        let a = Decomposition::new(Factor::Linear(1.0), "m1".parse().unwrap());
        let b = Decomposition::new(Factor::Linear(1e-10), "m1".parse().unwrap());
        let c = Decomposition::new(Factor::Linear(1.0), "s1".parse().unwrap());
        assert!(a.is_compatible(&b));
        assert!(!a.is_compatible(&c));
    }
}
