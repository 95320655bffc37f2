//! Dimensional analysis types
//!
//! The physical kind of a unit is its signature: the canonical list of
//! (base dimension, integer power) pairs, sorted by symbol, e.g.
//! `kg1 m-1 s-3` for a flux density per unit wavelength.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::ConversionError;

/// The base axes tracked by the converter.
///
/// Variant order is the canonical sort order of the symbols
/// (`K` < `cy` < `kg` < `m` < `s` < `sr`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BaseDimension {
    /// Temperature [K]
    Kelvin,
    /// Plane angle in full turns [cy]
    Cycle,
    /// Mass [kg]
    Kilogram,
    /// Length [m]
    Metre,
    /// Time [s]
    Second,
    /// Solid angle [sr]
    Steradian,
}

impl BaseDimension {
    pub const ALL: [BaseDimension; 6] = [
        BaseDimension::Kelvin,
        BaseDimension::Cycle,
        BaseDimension::Kilogram,
        BaseDimension::Metre,
        BaseDimension::Second,
        BaseDimension::Steradian,
    ];

    /// Canonical symbol used in rendered signatures
    pub fn symbol(&self) -> &'static str {
        match self {
            BaseDimension::Kelvin => "K",
            BaseDimension::Cycle => "cy",
            BaseDimension::Kilogram => "kg",
            BaseDimension::Metre => "m",
            BaseDimension::Second => "s",
            BaseDimension::Steradian => "sr",
        }
    }

    /// Look up a base dimension by its canonical symbol (case-sensitive)
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|d| d.symbol() == symbol)
    }
}

impl fmt::Display for BaseDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Canonical SI signature of a unit.
///
/// Terms are sorted by dimension, each dimension appears at most once and
/// zero powers are never stored, so two signatures describe the same
/// physical kind iff they are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Signature {
    terms: Vec<(BaseDimension, i32)>,
}

impl Signature {
    /// Signature of a pure number
    pub fn dimensionless() -> Self {
        Signature { terms: Vec::new() }
    }

    /// Build a canonical signature, merging repeated dimensions by summing
    /// their powers and dropping the ones that cancel. `None` when a merged
    /// power does not fit in an `i32`.
    pub fn try_from_terms<I>(terms: I) -> Option<Self>
    where
        I: IntoIterator<Item = (BaseDimension, i32)>,
    {
        let mut merged: BTreeMap<BaseDimension, i32> = BTreeMap::new();
        for (dim, exp) in terms {
            let slot = merged.entry(dim).or_insert(0);
            *slot = slot.checked_add(exp)?;
        }
        Some(Signature {
            terms: merged.into_iter().filter(|&(_, exp)| exp != 0).collect(),
        })
    }

    /// Canonical signature from a fixed table of small powers.
    /// Parsed input goes through `try_from_terms`.
    pub(crate) fn from_terms<I>(terms: I) -> Self
    where
        I: IntoIterator<Item = (BaseDimension, i32)>,
    {
        let mut merged: BTreeMap<BaseDimension, i32> = BTreeMap::new();
        for (dim, exp) in terms {
            let slot = merged.entry(dim).or_insert(0);
            *slot = slot.saturating_add(exp);
        }
        Signature {
            terms: merged.into_iter().filter(|&(_, exp)| exp != 0).collect(),
        }
    }

    /// A single base dimension to the first power
    pub fn base(dim: BaseDimension) -> Self {
        Self::from_terms([(dim, 1)])
    }

    pub fn terms(&self) -> &[(BaseDimension, i32)] {
        &self.terms
    }

    pub fn is_dimensionless(&self) -> bool {
        self.terms.is_empty()
    }

    /// Power of `dim` in this signature (0 when absent)
    pub fn exponent(&self, dim: BaseDimension) -> i32 {
        self.terms
            .iter()
            .find(|(d, _)| *d == dim)
            .map(|&(_, exp)| exp)
            .unwrap_or(0)
    }

    /// Multiply signatures (add powers); `None` on overflow
    pub fn multiply(&self, other: &Signature) -> Option<Signature> {
        Self::try_from_terms(self.terms.iter().chain(other.terms.iter()).copied())
    }

    /// Raise to an integer power (multiply powers); `None` on overflow
    pub fn power(&self, exp: i32) -> Option<Signature> {
        let terms = self
            .terms
            .iter()
            .map(|&(dim, e)| e.checked_mul(exp).map(|p| (dim, p)))
            .collect::<Option<Vec<_>>>()?;
        Self::try_from_terms(terms)
    }

    /// Invert (negate powers)
    pub fn invert(&self) -> Option<Signature> {
        self.power(-1)
    }

    /// Whether the exact term `dim^exp` is present
    pub fn contains(&self, dim: BaseDimension, exp: i32) -> bool {
        self.terms.contains(&(dim, exp))
    }

    /// Copy of this signature with `dim` removed entirely
    pub fn without(&self, dim: BaseDimension) -> Signature {
        Signature {
            terms: self.terms.iter().copied().filter(|(d, _)| *d != dim).collect(),
        }
    }

    /// Split two signatures into the terms only `self` has and the terms
    /// only `other` has. A term matches only when dimension and power both
    /// agree, so `m1 s-1` against `m1` leaves `("", "s-1")`.
    pub fn difference(&self, other: &Signature) -> (Signature, Signature) {
        let only = |a: &Signature, b: &Signature| Signature {
            terms: a.terms.iter().copied().filter(|t| !b.terms.contains(t)).collect(),
        };
        (only(self, other), only(other, self))
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .terms
            .iter()
            .map(|(dim, exp)| format!("{}{}", dim.symbol(), exp))
            .collect();
        write!(f, "{}", parts.join(" "))
    }
}

impl FromStr for Signature {
    type Err = ConversionError;

    /// Parse a rendered signature such as `"kg1 m2 s-3"`. A missing power
    /// means 1, so `"kg m2 s-3"` is accepted as well.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut terms = Vec::new();
        for atom in s.split_whitespace() {
            let split = atom
                .find(|c: char| c == '-' || c.is_ascii_digit())
                .unwrap_or(atom.len());
            let (symbol, exp) = atom.split_at(split);
            let dim = BaseDimension::from_symbol(symbol)
                .ok_or_else(|| ConversionError::UnknownUnit(symbol.to_string()))?;
            let exp = if exp.is_empty() {
                1
            } else {
                exp.parse::<i32>()
                    .map_err(|_| ConversionError::MalformedUnit(atom.to_string()))?
            };
            terms.push((dim, exp));
        }
        Self::try_from_terms(terms).ok_or_else(|| ConversionError::MalformedUnit(s.to_string()))
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
