//! Conversion dispatcher
//!
//! Both units are reduced to a factor over a canonical signature. Equal
//! signatures only need scaling; different signatures are bridged by a
//! switchboard transform chosen from the terms the two do not share.

use tracing::debug;
use crate::reference::{References, SiReferences};
use crate::units::Registry;
use crate::{BaseDimension, ConversionError, Decomposition, Factor, Signature};

/// Pseudo-target asking for the source unit's own SI combination
pub const SI: &str = "SI";

impl Registry {
    /// Convert `value` from one unit expression to another.
    ///
    /// Reference quantities anchor the transforms that change the physical
    /// kind of a value (wavelength to velocity, F_nu to F_lambda, ...).
    ///
    /// ```
    /// use astro_units::{References, REGISTRY};
    ///
    /// let refs = References::new().with_wave(10000.0, "angstrom");
    /// let jy = REGISTRY.convert("erg/s/cm2/A", "Jy", 1e-10, &refs).unwrap();
    /// assert!((jy - 333.564095198152).abs() < 1e-9);
    /// ```
    pub fn convert(&self, from: &str, to: &str, value: f64, refs: &References) -> Result<f64, ConversionError> {
        let source = self.reduce(from)?;
        let target = if to.trim() == SI {
            Decomposition::new(Factor::Linear(1.0), source.signature.clone())
        } else {
            self.reduce(to)?
        };
        let si_refs = self.resolve_references(refs)?;
        debug!(
            from,
            to,
            source_factor = ?source.factor,
            source_signature = %source.signature,
            target_factor = ?target.factor,
            target_signature = %target.signature,
            "reduced units"
        );

        let value_si = source.factor.to_si(value);
        let converted_si = if source.signature == target.signature {
            debug!("same dimension, scaling only");
            value_si
        } else {
            self.bridge(&source.signature, &target.signature, value_si, &si_refs)?
        };
        Ok(target.factor.from_si(converted_si))
    }

    /// Check whether two unit expressions describe the same physical kind
    pub fn compatible(&self, a: &str, b: &str) -> Result<bool, ConversionError> {
        Ok(self.reduce(a)?.is_compatible(&self.reduce(b)?))
    }

    /// Reduce every reference quantity to a plain SI value
    pub fn resolve_references(&self, refs: &References) -> Result<SiReferences, ConversionError> {
        let mut si = SiReferences::default();
        for (key, value, unit) in refs.iter() {
            let reduced = self.reduce(unit)?;
            let factor = reduced
                .factor
                .as_linear()
                .ok_or_else(|| ConversionError::InvalidReference { key: key.name(), unit: unit.to_string() })?;
            let expected = key.signature();
            if reduced.signature != expected {
                debug!(
                    key = key.name(),
                    unit,
                    signature = %reduced.signature,
                    expected = %expected,
                    "reference quantity has an unexpected dimension"
                );
            }
            si.set(key, factor * value);
        }
        Ok(si)
    }

    /// Carry an SI value across a change of physical kind
    fn bridge(&self, from: &Signature, to: &Signature, value_si: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
        let unsupported = || ConversionError::UnsupportedConversion { from: from.clone(), to: to.clone() };
        let per_sr = Signature::from_terms([(BaseDimension::Steradian, -1)]);
        let none = Signature::dimensionless();

        let (mut only_from, mut only_to) = from.difference(to);
        let mut value = value_si;

        if only_to.contains(BaseDimension::Steradian, -1) {
            let entry = self.switchboard().get(&none, &per_sr).ok_or_else(unsupported)?;
            debug!(transform = entry.name, "target is per steradian");
            value = entry.apply(value, refs)?;
            only_to = only_to.without(BaseDimension::Steradian);
        }
        if only_from.contains(BaseDimension::Steradian, -1) {
            let entry = self.switchboard().get(&per_sr, &none).ok_or_else(unsupported)?;
            debug!(transform = entry.name, "source is per steradian");
            value = entry.apply(value, refs)?;
            only_from = only_from.without(BaseDimension::Steradian);
        }
        if only_from.is_dimensionless() && only_to.is_dimensionless() {
            return Ok(value);
        }

        let entry = self.switchboard().get(&only_from, &only_to).ok_or_else(unsupported)?;
        debug!(
            transform = entry.name,
            only_from = %only_from,
            only_to = %only_to,
            "cross-dimension transform"
        );
        entry.apply(value, refs)
    }
}
