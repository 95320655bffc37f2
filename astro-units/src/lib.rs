//! Astro Units - unit conversion for astronomy
//!
//! Parses compound unit expressions ("erg s-1 cm-2 A-1", "erg/s/cm2/A"),
//! reduces them to a factor over SI base dimensions and converts values
//! between them. Conversions may change scale, go through a non-linear
//! relation (temperature scales, magnitude systems) or change the physical
//! kind of a value given a reference quantity.
//!
//! Base dimensions:
//! - Temperature (K)
//! - Angle in cycles (cy)
//! - Mass (kg)
//! - Length (m)
//! - Time (s)
//! - Solid angle (sr)
//!
//! Cross-dimension transforms:
//! - Wavelength <-> Doppler velocity (needs `wave`)
//! - Wavelength <-> frequency
//! - Baseline <-> spatial frequency (needs `wave` or `freq`)
//! - F_nu <-> F_lambda, F_nu <-> nu F_nu (need `wave` or `freq`)
//! - [Q] <-> [Q] sr-1 (needs `diam` or `radius`)
//!
//! ```
//! use astro_units::{convert, References};
//!
//! let cm = convert("km", "cm", 1.0, &References::new()).unwrap();
//! assert_eq!(cm.round(), 100000.0);
//!
//! let refs = References::new().with_wave(4552.0, "A");
//! let v = convert("A", "km/s", 4553.0, &refs).unwrap();
//! assert!((v - 65.8595).abs() < 1e-3);
//! ```

pub mod constants;
mod dimension;
mod error;
mod nonlinear;
mod unit;
mod units;
mod parse;
mod reference;
mod switchboard;
mod convert;

pub use dimension::{BaseDimension, Signature};
pub use error::ConversionError;
pub use nonlinear::{NonLinear, NonLinearKind};
pub use unit::{Component, Decomposition, Factor};
pub use units::{BaseUnit, Registry, REGISTRY};
pub use reference::{ReferenceKey, References, SiReferences, Spectral};
pub use switchboard::{SwitchEntry, Switchboard, Transform};
pub use convert::SI;

/// Convert `value` between two unit expressions using the global registry
pub fn convert(from: &str, to: &str, value: f64, refs: &References) -> Result<f64, ConversionError> {
    REGISTRY.convert(from, to, value, refs)
}

/// Resolve aliases and rewrite division into negative powers
pub fn normalize(unit: &str) -> String {
    REGISTRY.normalize(unit)
}

/// Decompose one normalized token into factor, signature and power
pub fn decompose_token(token: &str) -> Result<Component, ConversionError> {
    REGISTRY.decompose_token(token)
}

/// Reduce a unit expression to a factor over SI base dimensions
pub fn reduce(unit: &str) -> Result<Decomposition, ConversionError> {
    REGISTRY.reduce(unit)
}

/// Check whether two unit expressions describe the same physical kind
pub fn compatible(a: &str, b: &str) -> Result<bool, ConversionError> {
    REGISTRY.compatible(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_free_functions_use_global_registry() {
        assert_eq!(normalize("erg/s/cm2/A"), "erg s-1 cm-2 A-1");
        assert_eq!(decompose_token("W3").unwrap().power, 3);
        assert_eq!(reduce("Jy").unwrap().signature.to_string(), "cy-1 kg1 s-2");
        assert_eq!(compatible("km/s", "pc/yr"), Ok(true));

        let refs = References::new().with_wave(10000.0, "A");
        let flambda = convert("Jy", "erg/s/cm2/A", 333.56409519815202, &refs).unwrap();
        assert_relative_eq!(flambda, 1e-10, max_relative = 1e-12);
    }

    #[test]
    fn test_decomposition_serde() {
        let d = reduce("erg s-1 cm-2 A-1").unwrap();
        let json = serde_json::to_string(&d).unwrap();
        assert!(json.contains("\"kg1 m-1 s-3\""));
        let back: Decomposition = serde_json::from_str(&json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || convert("km", "m", i as f64, &References::new())))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), Ok(i as f64 * 1000.0));
        }
    }
}
