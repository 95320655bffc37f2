//! Unit string parsing - normalize expressions like "erg/s/cm2/A" and
//! reduce them to a factor over SI base dimensions
//!
//! Grammar of one atom: an optional leading integer factor, a base name
//! (possibly prefixed, e.g. `mum`), and an optional trailing signed power.
//! `10mW`, `cm-2` and `s` are all atoms; a unit expression is a
//! whitespace-separated list of atoms, where `/` inside a group divides.

use tracing::trace;
use crate::units::Registry;
use crate::{Component, ConversionError, Decomposition, Factor, Signature};

/// One atom split into its literal parts
#[derive(Debug, Clone, Copy, PartialEq)]
struct Atom<'a> {
    /// Leading digits as written (empty when absent)
    digits: &'a str,
    factor: f64,
    base: &'a str,
    power: i32,
}

/// Split an atom into (factor, base name, power).
///
/// Returns `None` when the pattern does not apply (no base name left once
/// the factor and power are taken off, or a power that does not fit).
/// Callers then treat the whole atom as a bare base name.
fn split_atom(atom: &str) -> Option<Atom<'_>> {
    let body_end = atom.trim_end_matches(|c: char| c.is_ascii_digit()).len();
    let power_start = if body_end < atom.len() && atom[..body_end].ends_with('-') {
        body_end - 1
    } else {
        body_end
    };
    let head = &atom[..power_start];
    let digits_end = head.len() - head.trim_start_matches(|c: char| c.is_ascii_digit()).len();

    let digits = &atom[..digits_end];
    let base = &atom[digits_end..power_start];
    if base.is_empty() {
        return None;
    }

    let factor: f64 = if digits.is_empty() { 1.0 } else { digits.parse().ok()? };
    let power: i32 = match &atom[power_start..] {
        "" => 1,
        power => power.parse().ok()?,
    };
    Some(Atom { digits, factor, base, power })
}

/// Rewrite an atom that follows a `/` with its power negated
fn invert_atom(atom: &str) -> String {
    match split_atom(atom).and_then(|a| a.power.checked_neg().map(|p| (a, p))) {
        Some((a, power)) if a.factor != 1.0 => format!("{}{}{}", a.digits, a.base, power),
        Some((a, power)) => format!("{}{}", a.base, power),
        None => format!("{}-1", atom),
    }
}

impl Registry {
    /// Resolve aliases and rewrite division into negative powers.
    ///
    /// ```
    /// use astro_units::REGISTRY;
    ///
    /// assert_eq!(REGISTRY.normalize("erg/s/cm2/angstrom"), "erg s-1 cm-2 A-1");
    /// assert_eq!(REGISTRY.normalize("W/m2/micron"), "W m-2 mum-1");
    /// ```
    pub fn normalize(&self, unit: &str) -> String {
        // leading space so that a bare "mag" at the start matches " mag"
        let mut resolved = format!(" {}", unit);
        for (pattern, replacement) in self.aliases() {
            resolved = resolved.replace(pattern, replacement);
        }

        let mut tokens = Vec::new();
        for group in resolved.split_whitespace() {
            let mut parts = group.split('/');
            if let Some(head) = parts.next().filter(|head| !head.is_empty()) {
                tokens.push(head.to_string());
            }
            tokens.extend(parts.filter(|part| !part.is_empty()).map(invert_atom));
        }
        tokens.join(" ")
    }

    /// Decompose a single normalized token into its factor, the composite
    /// SI signature of its base unit, and its power.
    ///
    /// `hg3` is `(0.1, kg1, 3)`: the prefix and the gram's own scale are
    /// folded into the factor, which is not yet raised to the power.
    pub fn decompose_token(&self, token: &str) -> Result<Component, ConversionError> {
        if token.is_empty() {
            return Err(ConversionError::MalformedUnit(token.to_string()));
        }
        let (factor, base, power) = match split_atom(token) {
            Some(atom) => (atom.factor, atom.base, atom.power),
            None => (1.0, token, 1),
        };

        let (scale, unit) = self.lookup(base)?;
        Ok(Component {
            factor: unit.factor.scale(factor * scale),
            signature: unit.signature.clone(),
            power,
        })
    }

    /// Reduce a unit expression to a total factor over a canonical signature.
    ///
    /// A non-linear unit (temperature scale, magnitude) is only accepted
    /// alone and to the first power.
    pub fn reduce(&self, unit: &str) -> Result<Decomposition, ConversionError> {
        let normalized = self.normalize(unit);
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        if tokens.is_empty() {
            return Err(ConversionError::MalformedUnit(unit.to_string()));
        }

        let mut total = 1.0;
        let mut signature = Signature::dimensionless();
        let mut nonlinear = None;

        for token in &tokens {
            let component = self.decompose_token(token)?;
            trace!(
                token = *token,
                factor = ?component.factor,
                signature = %component.signature,
                power = component.power,
                "decomposed token"
            );

            match component.factor {
                Factor::Linear(f) => total *= f.powi(component.power),
                Factor::NonLinear(n) => {
                    if tokens.len() != 1 || component.power != 1 {
                        return Err(ConversionError::NonLinearCompound(unit.to_string()));
                    }
                    nonlinear = Some(n.compose_power(component.power));
                }
            }
            signature = component
                .signature
                .power(component.power)
                .and_then(|s| signature.multiply(&s))
                .ok_or_else(|| ConversionError::MalformedUnit(unit.to_string()))?;
        }

        let factor = match nonlinear {
            Some(n) => Factor::NonLinear(n),
            None => Factor::Linear(total),
        };
        Ok(Decomposition::new(factor, signature))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::units::REGISTRY;
    use crate::NonLinear;

    fn linear(unit: &str) -> (f64, String) {
        let d = REGISTRY.reduce(unit).unwrap();
        (d.factor.as_linear().unwrap(), d.signature.to_string())
    }

    #[test]
    fn test_split_atom() {
        let atom = split_atom("10mW").unwrap();
        assert_eq!((atom.factor, atom.base, atom.power), (10.0, "mW", 1));

        let atom = split_atom("cm-2").unwrap();
        assert_eq!((atom.digits, atom.base, atom.power), ("", "cm", -2));

        let atom = split_atom("s").unwrap();
        assert_eq!((atom.factor, atom.base, atom.power), (1.0, "s", 1));

        // no base name left, or a power out of range
        assert_eq!(split_atom("10"), None);
        assert_eq!(split_atom("-2"), None);
        assert_eq!(split_atom("m99999999999"), None);
    }

    #[test]
    fn test_normalize_division() {
        assert_eq!(REGISTRY.normalize("erg/s/cm2/A"), "erg s-1 cm-2 A-1");
        assert_eq!(REGISTRY.normalize("cy/d"), "cy d-1");
        assert_eq!(REGISTRY.normalize("km h-1"), "km h-1");
        assert_eq!(REGISTRY.normalize("W/10cm2"), "W 10cm-2");
        assert_eq!(REGISTRY.normalize("m/s-2"), "m s2");
    }

    #[test]
    fn test_normalize_aliases() {
        assert_eq!(REGISTRY.normalize("erg/s/cm2/angstrom"), "erg s-1 cm-2 A-1");
        assert_eq!(REGISTRY.normalize("cycles/arcsec"), "cy as-1");
        assert_eq!(REGISTRY.normalize("GHz"), "Ghz");
        assert_eq!(REGISTRY.normalize("kilowatt"), "kW");
        assert_eq!(REGISTRY.normalize("m^2 s**-1"), "m2 s-1");
        assert_eq!(REGISTRY.normalize("mag"), "vegamag");
        assert_eq!(REGISTRY.normalize("Jy/mag"), "Jy vegamag-1");
    }

    #[test]
    fn test_normalize_whitespace_and_empty_groups() {
        assert_eq!(REGISTRY.normalize("  erg   s-1 "), "erg s-1");
        assert_eq!(REGISTRY.normalize("/s"), "s-1");
        assert_eq!(REGISTRY.normalize("m/"), "m");
        assert_eq!(REGISTRY.normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for unit in ["erg/s/cm2/angstrom", "Jy", "W/m2/micron/sr", "cycles/mas", "10mW m-2 nm-1", "mag", "km/h"] {
            let once = REGISTRY.normalize(unit);
            assert_eq!(REGISTRY.normalize(&once), once, "{}", unit);
        }
    }

    #[test]
    fn test_decompose_token() {
        let cases = [
            ("m", 1.0, "m1", 1),
            ("g2", 0.001, "kg1", 2),
            ("hg3", 0.1, "kg1", 3),
            ("Mg4", 1000.0, "kg1", 4),
            ("mm", 0.001, "m1", 1),
            ("W3", 1.0, "kg1 m2 s-3", 3),
            ("s-2", 1.0, "s1", -2),
            ("10mW", 0.01, "kg1 m2 s-3", 1),
        ];
        for (token, factor, signature, power) in cases {
            let c = REGISTRY.decompose_token(token).unwrap();
            assert_relative_eq!(c.factor.as_linear().unwrap(), factor, max_relative = 1e-12);
            assert_eq!(c.signature.to_string(), signature, "{}", token);
            assert_eq!(c.power, power, "{}", token);
        }
    }

    #[test]
    fn test_decompose_token_errors() {
        assert_eq!(REGISTRY.decompose_token(""), Err(ConversionError::MalformedUnit(String::new())));
        assert_eq!(REGISTRY.decompose_token("furlong"), Err(ConversionError::UnknownUnit("furlong".to_string())));
        // permissive fallback keeps the whole token as the base name
        assert_eq!(REGISTRY.decompose_token("10"), Err(ConversionError::UnknownUnit("10".to_string())));
    }

    #[test]
    fn test_decompose_nonlinear_prefix() {
        let c = REGISTRY.decompose_token("kF").unwrap();
        assert_eq!(c.factor, Factor::NonLinear(NonLinear::fahrenheit().compose_scale(1000.0)));
        assert_eq!(c.signature.to_string(), "K1");
    }

    #[test]
    fn test_reduce_breakdown() {
        let (factor, signature) = linear("erg s-1 W2 kg2 cm-2");
        assert_relative_eq!(factor, 0.001, max_relative = 1e-12);
        assert_eq!(signature, "kg5 m4 s-9");

        let (factor, signature) = linear("erg s-1 cm-2 A-1");
        assert_relative_eq!(factor, 1e7, max_relative = 1e-12);
        assert_eq!(signature, "kg1 m-1 s-3");

        let (factor, signature) = linear("W m-3");
        assert_eq!(factor, 1.0);
        assert_eq!(signature, "kg1 m-1 s-3");

        let (factor, signature) = linear("W3");
        assert_eq!(factor, 1.0);
        assert_eq!(signature, "kg3 m6 s-9");
    }

    #[test]
    fn test_reduce_prefix_ratio() {
        let (km, km_sig) = linear("km");
        let (m, m_sig) = linear("m");
        assert_eq!(km_sig, m_sig);
        assert_eq!(km / m, 1000.0);

        // milli-arcsecond, not metre times arcsecond
        let (mas, mas_sig) = linear("mas");
        assert_eq!(mas_sig, "cy1");
        assert_relative_eq!(mas, 1e-3 / 1_296_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_reduce_cancels_dimensions() {
        let (factor, signature) = linear("cy/arcsec");
        assert_eq!(signature, "");
        assert_relative_eq!(factor, 1_296_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_reduce_matches_registry_signature() {
        for symbol in REGISTRY.symbols() {
            let d = REGISTRY.reduce(symbol).unwrap();
            assert_eq!(d.signature, REGISTRY.get(symbol).unwrap().signature, "{}", symbol);
        }
    }

    #[test]
    fn test_reduce_nonlinear() {
        let d = REGISTRY.reduce("C").unwrap();
        assert_eq!(d.factor, Factor::NonLinear(NonLinear::celsius()));
        assert_eq!(d.signature.to_string(), "K1");

        let d = REGISTRY.reduce("ABmag").unwrap();
        assert_eq!(d.signature.to_string(), "cy-1 kg1 s-2");
    }

    #[test]
    fn test_reduce_rejects_nonlinear_compounds() {
        for unit in ["vegamag m-1", "C2", "Jy/mag", "F s-1"] {
            assert_eq!(
                REGISTRY.reduce(unit),
                Err(ConversionError::NonLinearCompound(unit.to_string())),
                "{}",
                unit
            );
        }
    }

    #[test]
    fn test_reduce_errors() {
        assert_eq!(REGISTRY.reduce("   "), Err(ConversionError::MalformedUnit("   ".to_string())));
        assert_eq!(REGISTRY.reduce("erg s-1 parsnip"), Err(ConversionError::UnknownUnit("parsnip".to_string())));
    }

    #[test]
    fn test_reduce_rejects_power_overflow() {
        assert_eq!(
            REGISTRY.reduce("m2147483647 m1"),
            Err(ConversionError::MalformedUnit("m2147483647 m1".to_string()))
        );
        assert_eq!(
            REGISTRY.reduce("W1073741824"),
            Err(ConversionError::MalformedUnit("W1073741824".to_string()))
        );
        assert_eq!(
            REGISTRY.convert("W1073741824", "W", 1.0, &crate::References::new()),
            Err(ConversionError::MalformedUnit("W1073741824".to_string()))
        );
        assert_eq!(REGISTRY.reduce("m2147483647").unwrap().signature.exponent(crate::BaseDimension::Metre), i32::MAX);
    }
}
