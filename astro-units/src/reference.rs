//! Reference quantities
//!
//! Some conversions change the physical kind of a value and are only
//! defined against an anchor: a flux per wavelength becomes a flux per
//! frequency *at* a given wavelength, a Doppler velocity becomes a
//! wavelength *relative to* a rest wavelength. Callers pass those anchors
//! as (value, unit) pairs.

use std::fmt;
use crate::{BaseDimension, ConversionError, Signature};

/// Names of the reference quantities the transforms understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKey {
    /// Reference wavelength
    Wave,
    /// Reference frequency
    Freq,
    /// Angular diameter
    Diam,
    /// Angular radius
    Radius,
}

impl ReferenceKey {
    pub fn name(&self) -> &'static str {
        match self {
            ReferenceKey::Wave => "wave",
            ReferenceKey::Freq => "freq",
            ReferenceKey::Diam => "diam",
            ReferenceKey::Radius => "radius",
        }
    }

    /// Physical kind the transforms read this quantity as
    pub fn signature(&self) -> Signature {
        use BaseDimension::*;
        match self {
            ReferenceKey::Wave => Signature::base(Metre),
            ReferenceKey::Freq => Signature::from_terms([(Cycle, 1), (Second, -1)]),
            ReferenceKey::Diam | ReferenceKey::Radius => Signature::base(Cycle),
        }
    }
}

impl fmt::Display for ReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Caller-supplied reference quantities, each a value with its unit.
///
/// ```
/// use astro_units::References;
///
/// let refs = References::new()
///     .with_wave(2.0, "micron")
///     .with_diam(3.0, "mas");
/// assert_eq!(refs.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct References {
    entries: Vec<(ReferenceKey, f64, String)>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a reference quantity, replacing any earlier value for `key`
    pub fn with(mut self, key: ReferenceKey, value: f64, unit: impl Into<String>) -> Self {
        self.entries.retain(|(k, _, _)| *k != key);
        self.entries.push((key, value, unit.into()));
        self
    }

    pub fn with_wave(self, value: f64, unit: impl Into<String>) -> Self {
        self.with(ReferenceKey::Wave, value, unit)
    }

    pub fn with_freq(self, value: f64, unit: impl Into<String>) -> Self {
        self.with(ReferenceKey::Freq, value, unit)
    }

    pub fn with_diam(self, value: f64, unit: impl Into<String>) -> Self {
        self.with(ReferenceKey::Diam, value, unit)
    }

    pub fn with_radius(self, value: f64, unit: impl Into<String>) -> Self {
        self.with(ReferenceKey::Radius, value, unit)
    }

    pub fn get(&self, key: ReferenceKey) -> Option<(f64, &str)> {
        self.entries
            .iter()
            .find(|(k, _, _)| *k == key)
            .map(|(_, value, unit)| (*value, unit.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReferenceKey, f64, &str)> {
        self.entries.iter().map(|(k, v, u)| (*k, *v, u.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Spectral anchor for the flux and interferometry transforms
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Spectral {
    /// Wavelength [m]
    Wave(f64),
    /// Frequency [Hz]
    Freq(f64),
}

/// Reference quantities reduced to plain SI values
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SiReferences {
    /// Wavelength [m]
    pub wave: Option<f64>,
    /// Frequency [cy s-1]
    pub freq: Option<f64>,
    /// Angular diameter [cy]
    pub diam: Option<f64>,
    /// Angular radius [cy]
    pub radius: Option<f64>,
}

impl SiReferences {
    pub fn set(&mut self, key: ReferenceKey, value_si: f64) {
        let slot = match key {
            ReferenceKey::Wave => &mut self.wave,
            ReferenceKey::Freq => &mut self.freq,
            ReferenceKey::Diam => &mut self.diam,
            ReferenceKey::Radius => &mut self.radius,
        };
        *slot = Some(value_si);
    }

    pub fn get(&self, key: ReferenceKey) -> Option<f64> {
        match key {
            ReferenceKey::Wave => self.wave,
            ReferenceKey::Freq => self.freq,
            ReferenceKey::Diam => self.diam,
            ReferenceKey::Radius => self.radius,
        }
    }

    /// Reference wavelength, required by `transform`
    pub fn wave(&self, transform: &'static str) -> Result<f64, ConversionError> {
        self.wave.ok_or(ConversionError::MissingReference { transform, expected: "wave" })
    }

    /// Wavelength or frequency anchor; the wavelength wins when both are given
    pub fn spectral(&self, transform: &'static str) -> Result<Spectral, ConversionError> {
        match (self.wave, self.freq) {
            (Some(wave), _) => Ok(Spectral::Wave(wave)),
            (None, Some(freq)) => Ok(Spectral::Freq(freq)),
            (None, None) => Err(ConversionError::MissingReference { transform, expected: "wave or freq" }),
        }
    }

    /// Angular radius in cycles; a diameter wins over a radius when both are given
    pub fn angular_radius(&self, transform: &'static str) -> Result<f64, ConversionError> {
        match (self.diam, self.radius) {
            (Some(diam), _) => Ok(diam / 2.0),
            (None, Some(radius)) => Ok(radius),
            (None, None) => Err(ConversionError::MissingReference { transform, expected: "diam or radius" }),
        }
    }
}
