//! Unit definitions - base units, metric prefixes and aliases
//!
//! Every base unit maps to a factor (plain scale or non-linear converter)
//! and the SI signature it stands for. Compound units such as `W` carry a
//! composite signature (`kg1 m2 s-3`).

use std::collections::HashMap;
use std::f64::consts::PI;
use std::sync::LazyLock;
use crate::constants::{AU, CAL, EV, LY, MSUN, PC, RSUN};
use crate::switchboard::Switchboard;
use crate::{BaseDimension, ConversionError, Factor, NonLinear, Signature};

/// Global unit registry
pub static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// A registered base unit
#[derive(Debug, Clone, PartialEq)]
pub struct BaseUnit {
    /// The unit token (e.g., "m", "Jy", "vegamag")
    pub symbol: &'static str,
    /// The unit name (e.g., "meter", "jansky")
    pub name: &'static str,
    /// Factor to convert to SI
    pub factor: Factor,
    /// Composite SI signature
    pub signature: Signature,
}

/// Registry of all known units, prefixes, aliases and cross-dimension
/// transforms. Immutable once built.
#[derive(Debug, Clone)]
pub struct Registry {
    units: HashMap<&'static str, BaseUnit>,
    prefixes: Vec<(&'static str, f64)>,
    aliases: Vec<(&'static str, &'static str)>,
    switchboard: Switchboard,
}

impl Registry {
    pub fn new() -> Self {
        let mut registry = Registry {
            units: HashMap::new(),
            prefixes: Vec::new(),
            aliases: Vec::new(),
            switchboard: Switchboard::new(),
        };
        registry.register_all_units();
        registry.register_prefixes();
        registry.register_aliases();
        registry
    }

    /// Get a base unit by its exact token
    pub fn get(&self, symbol: &str) -> Option<&BaseUnit> {
        self.units.get(symbol)
    }

    /// Resolve a base name, possibly carrying a metric prefix, into the
    /// prefix scale and the registered unit.
    ///
    /// Prefixes are tried longest first, so `mum` is micrometre and `dam`
    /// decametre; the bare name is only looked up when no prefix split
    /// leaves a registered remainder.
    pub fn lookup(&self, name: &str) -> Result<(f64, &BaseUnit), ConversionError> {
        for (prefix, scale) in &self.prefixes {
            if let Some(unit) = name.strip_prefix(prefix).and_then(|rest| self.units.get(rest)) {
                return Ok((*scale, unit));
            }
        }
        self.units
            .get(name)
            .map(|unit| (1.0, unit))
            .ok_or_else(|| ConversionError::UnknownUnit(name.to_string()))
    }

    /// Metric prefixes in search order
    pub fn prefixes(&self) -> &[(&'static str, f64)] {
        &self.prefixes
    }

    /// Literal (pattern, replacement) pairs in application order
    pub fn aliases(&self) -> &[(&'static str, &'static str)] {
        &self.aliases
    }

    pub fn switchboard(&self) -> &Switchboard {
        &self.switchboard
    }

    /// Get all unit symbols
    pub fn symbols(&self) -> Vec<&'static str> {
        let mut symbols: Vec<_> = self.units.keys().copied().collect();
        symbols.sort_unstable();
        symbols
    }

    fn register(&mut self, symbol: &'static str, name: &'static str, factor: impl Into<Factor>, signature: Signature) {
        self.units.insert(symbol, BaseUnit { symbol, name, factor: factor.into(), signature });
    }

    fn register_all_units(&mut self) {
        self.register_distance_units();
        self.register_mass_units();
        self.register_time_units();
        self.register_angle_units();
        self.register_force_units();
        self.register_temperature_units();
        self.register_energy_units();
        self.register_flux_units();
    }

    fn register_distance_units(&mut self) {
        let length = || Signature::base(BaseDimension::Metre);
        self.register("m", "meter", 1.0, length());
        self.register("A", "angstrom", 1e-10, length());
        self.register("AU", "astronomical unit", AU, length());
        self.register("pc", "parsec", PC, length());
        self.register("ly", "light year", LY, length());
        self.register("Rsun", "solar radius", RSUN, length());
    }

    fn register_mass_units(&mut self) {
        let mass = || Signature::base(BaseDimension::Kilogram);
        // kilogram is "k" + "g"
        self.register("g", "gram", 1e-3, mass());
        self.register("Msun", "solar mass", MSUN, mass());
    }

    fn register_time_units(&mut self) {
        use BaseDimension::*;
        let time = || Signature::base(Second);
        self.register("s", "second", 1.0, time());
        self.register("min", "minute", 60.0, time());
        self.register("h", "hour", 3600.0, time());
        self.register("d", "day", 24.0 * 3600.0, time());
        self.register("yr", "year", 365.0 * 24.0 * 3600.0, time());
        self.register("cr", "century", 100.0 * 365.0 * 24.0 * 3600.0, time());
        self.register("hz", "hertz", 1.0, Signature::from_terms([(Cycle, 1), (Second, -1)]));
    }

    fn register_angle_units(&mut self) {
        use BaseDimension::*;
        let angle = || Signature::base(Cycle);
        self.register("rad", "radian", 1.0 / (2.0 * PI), angle());
        self.register("cy", "cycle", 1.0, angle());
        self.register("deg", "degree", 1.0 / 360.0, angle());
        self.register("am", "arcminute", 1.0 / 360.0 / 60.0, angle());
        self.register("as", "arcsecond", 1.0 / 360.0 / 3600.0, angle());
        self.register("sr", "steradian", 1.0, Signature::base(Steradian));
    }

    fn register_force_units(&mut self) {
        use BaseDimension::*;
        let force = || Signature::from_terms([(Kilogram, 1), (Metre, 1), (Second, -2)]);
        self.register("N", "newton", 1.0, force());
        self.register("dy", "dyne", 1e-5, force());
    }

    fn register_temperature_units(&mut self) {
        let temperature = || Signature::base(BaseDimension::Kelvin);
        self.register("K", "kelvin", 1.0, temperature());
        self.register("F", "degree fahrenheit", NonLinear::fahrenheit(), temperature());
        self.register("C", "degree celsius", NonLinear::celsius(), temperature());
    }

    fn register_energy_units(&mut self) {
        use BaseDimension::*;
        let energy = || Signature::from_terms([(Kilogram, 1), (Metre, 2), (Second, -2)]);
        self.register("J", "joule", 1.0, energy());
        self.register("erg", "erg", 1e-7, energy());
        self.register("eV", "electron volt", EV, energy());
        self.register("cal", "calorie", CAL, energy());
        self.register("W", "watt", 1.0, Signature::from_terms([(Kilogram, 1), (Metre, 2), (Second, -3)]));
    }

    fn register_flux_units(&mut self) {
        use BaseDimension::*;
        // W m-2 Hz-1 and W m-2 m-1
        let fnu = || Signature::from_terms([(Cycle, -1), (Kilogram, 1), (Second, -2)]);
        let flambda = || Signature::from_terms([(Kilogram, 1), (Metre, -1), (Second, -3)]);
        self.register("Jy", "jansky", 1e-26, fnu());
        self.register("vegamag", "Vega magnitude", NonLinear::vega_mag(), flambda());
        self.register("STmag", "ST magnitude", NonLinear::st_mag(), flambda());
        self.register("ABmag", "AB magnitude", NonLinear::ab_mag(), fnu());
    }

    fn register_prefixes(&mut self) {
        self.prefixes = vec![
            ("n", 1e-9),
            ("mu", 1e-6),
            ("m", 1e-3),
            ("c", 1e-2),
            ("d", 1e-1),
            ("da", 1e1),
            ("h", 1e2),
            ("k", 1e3),
            ("M", 1e6),
            ("G", 1e9),
        ];
        // stable: equal lengths keep table order
        self.prefixes.sort_by_key(|(prefix, _)| std::cmp::Reverse(prefix.len()));
    }

    fn register_aliases(&mut self) {
        // Order matters: "micron" must fire before "micro", and the
        // magnitude aliases rely on the leading space or slash.
        self.aliases = vec![
            ("micron", "mum"),
            ("micro", "mu"),
            ("milli", "m"),
            ("kilo", "k"),
            ("mega", "M"),
            ("giga", "G"),
            ("nano", "n"),
            ("watt", "W"),
            ("Watt", "W"),
            ("Hz", "hz"),
            ("joule", "J"),
            ("Joule", "J"),
            ("jansky", "Jy"),
            ("Jansky", "Jy"),
            ("arcsec", "as"),
            ("arcmin", "am"),
            ("cycles", "cy"),
            ("cycle", "cy"),
            ("cyc", "cy"),
            ("angstrom", "A"),
            ("Angstrom", "A"),
            (" mag", " vegamag"),
            ("/mag", " /vegamag"),
            ("^", ""),
            ("**", ""),
        ];
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_registry() {
        let reg = Registry::new();

        assert!(reg.get("m").is_some());
        assert!(reg.get("Jy").is_some());
        assert!(reg.get("hz").is_some());

        // kilogram only exists as a prefixed gram; lookups are case-sensitive
        assert!(reg.get("kg").is_none());
        assert!(reg.get("Hz").is_none());
        assert!(reg.get("unknown_xyz").is_none());
    }

    #[test]
    fn test_prefix_search_order() {
        let reg = Registry::new();
        let order: Vec<&str> = reg.prefixes().iter().map(|(p, _)| *p).collect();
        assert_eq!(order, vec!["mu", "da", "n", "m", "c", "d", "h", "k", "M", "G"]);
    }

    #[test]
    fn test_lookup_prefixed() {
        let reg = Registry::new();

        let (scale, unit) = reg.lookup("mas").unwrap();
        assert_eq!(scale, 1e-3);
        assert_eq!(unit.symbol, "as");

        let (scale, unit) = reg.lookup("dam").unwrap();
        assert_eq!(scale, 10.0);
        assert_eq!(unit.symbol, "m");

        let (scale, unit) = reg.lookup("mum").unwrap();
        assert_eq!(scale, 1e-6);
        assert_eq!(unit.symbol, "m");
    }

    #[test]
    fn test_lookup_bare_names_that_look_prefixed() {
        let reg = Registry::new();
        for name in ["min", "h", "d", "dy", "cy", "cr", "cal", "deg", "Msun", "hz"] {
            let (scale, unit) = reg.lookup(name).unwrap();
            assert_eq!(scale, 1.0, "{} must not split into a prefix", name);
            assert_eq!(unit.symbol, name);
        }
    }

    #[test]
    fn test_lookup_unknown() {
        let reg = Registry::new();
        assert_eq!(reg.lookup("furlong"), Err(ConversionError::UnknownUnit("furlong".to_string())));
    }

    #[test]
    fn test_nonlinear_entries() {
        let reg = Registry::new();
        for symbol in ["F", "C", "vegamag", "STmag", "ABmag"] {
            assert!(!reg.get(symbol).unwrap().factor.is_linear(), "{}", symbol);
        }
        assert!(reg.get("K").unwrap().factor.is_linear());
    }

    #[test]
    fn test_global_registry() {
        assert_eq!(REGISTRY.symbols().len(), Registry::new().symbols().len());
        assert!(REGISTRY.symbols().contains(&"erg"));
        assert_eq!(REGISTRY.switchboard().len(), 12);
    }
}
