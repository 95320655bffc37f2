//! Non-linear unit relations
//!
//! Temperature scales with an offset and logarithmic magnitude systems
//! cannot be written as `value * factor`. They are carried through a
//! decomposition as a `NonLinear` converter instead of a plain scale.

use serde::{Deserialize, Serialize};
use crate::constants::{AB_ZERO_FLUX, ST_ZERO_FLUX, VEGA_ZERO_FLUX};

/// The two transform families
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum NonLinearKind {
    /// Degree scale: `K = (value * prefix + zero_point) * scale`
    Affine { zero_point: f64, scale: f64 },
    /// Magnitude system: `flux = zero_flux * 10^(-(value * prefix) / 2.5)`
    LogMagnitude { zero_flux: f64 },
}

/// A non-linear converter with its accumulated linear pre-scale and
/// dimension exponent.
///
/// Values are never mutated; composing produces a new converter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NonLinear {
    pub kind: NonLinearKind,
    /// Linear pre-scale picked up from metric prefixes (`kF` has 1000)
    pub prefix: f64,
    /// Exponent bookkeeping; only 1 is ever converted
    pub power: i32,
}

impl NonLinear {
    pub fn new(kind: NonLinearKind) -> Self {
        NonLinear { kind, prefix: 1.0, power: 1 }
    }

    pub fn fahrenheit() -> Self {
        Self::new(NonLinearKind::Affine { zero_point: 459.67, scale: 5.0 / 9.0 })
    }

    pub fn celsius() -> Self {
        Self::new(NonLinearKind::Affine { zero_point: 273.15, scale: 1.0 })
    }

    /// Vega magnitudes, expressed against a flux per unit wavelength
    pub fn vega_mag() -> Self {
        Self::new(NonLinearKind::LogMagnitude { zero_flux: VEGA_ZERO_FLUX })
    }

    /// ST magnitudes, expressed against a flux per unit wavelength
    pub fn st_mag() -> Self {
        Self::new(NonLinearKind::LogMagnitude { zero_flux: ST_ZERO_FLUX })
    }

    /// AB magnitudes, expressed against a flux per unit frequency
    pub fn ab_mag() -> Self {
        Self::new(NonLinearKind::LogMagnitude { zero_flux: AB_ZERO_FLUX })
    }

    /// Multiply (or, with a reciprocal, divide) by a plain number
    pub fn compose_scale(self, factor: f64) -> Self {
        NonLinear { prefix: self.prefix * factor, ..self }
    }

    /// Raise to an integer power
    pub fn compose_power(self, exp: i32) -> Self {
        NonLinear { power: self.power * exp, ..self }
    }

    /// Forward transform maps a value in this unit to linear SI; the
    /// inverse maps a linear SI value back into this unit.
    pub fn apply(&self, value: f64, inverse: bool) -> f64 {
        match (self.kind, inverse) {
            (NonLinearKind::Affine { zero_point, scale }, false) => {
                (value * self.prefix + zero_point) * scale
            }
            (NonLinearKind::Affine { zero_point, scale }, true) => {
                (value / scale - zero_point) / self.prefix
            }
            (NonLinearKind::LogMagnitude { zero_flux }, false) => {
                zero_flux * 10f64.powf(-value * self.prefix / 2.5)
            }
            (NonLinearKind::LogMagnitude { zero_flux }, true) => {
                -2.5 * (value / zero_flux).log10() / self.prefix
            }
        }
    }
}
