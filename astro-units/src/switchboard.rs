//! Cross-dimension transforms
//!
//! When source and target units differ in physical kind, the dispatcher
//! strips the terms both signatures share and looks up the remaining pair
//! (`only_from`, `only_to`) here. Every transform takes a value in the
//! source's linear SI units plus SI reference quantities, and returns the
//! value in the target's linear SI units.

use std::f64::consts::PI;
use std::fmt;
use crate::constants::CC;
use crate::reference::{SiReferences, Spectral};
use crate::{BaseDimension, ConversionError, Signature};

/// A physical transform between two kinds of quantity
pub type Transform = fn(f64, &SiReferences) -> Result<f64, ConversionError>;

/// A named transform registered under a signature difference
#[derive(Clone, Copy)]
pub struct SwitchEntry {
    pub name: &'static str,
    pub transform: Transform,
}

impl fmt::Debug for SwitchEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchEntry").field("name", &self.name).finish()
    }
}

impl SwitchEntry {
    pub fn apply(&self, value_si: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
        (self.transform)(value_si, refs)
    }
}

/// Registry of transforms keyed by (only-from, only-to) signature pairs
#[derive(Debug, Clone)]
pub struct Switchboard {
    entries: Vec<(Signature, Signature, SwitchEntry)>,
}

impl Switchboard {
    pub fn new() -> Self {
        use BaseDimension::*;

        let none = Signature::dimensionless;
        let length = || Signature::base(Metre);
        let per_second = || Signature::from_terms([(Second, -1)]);
        let frequency = || Signature::from_terms([(Cycle, 1), (Second, -1)]);
        // W m-2 Hz-1 and W m-2 m-1 once the shared kg1 is removed
        let fnu = || Signature::from_terms([(Cycle, -1), (Second, -2)]);
        let flambda = || Signature::from_terms([(Metre, -1), (Second, -3)]);
        let nufnu = || Signature::from_terms([(Second, -3)]);
        let per_sr = || Signature::from_terms([(Steradian, -1)]);

        let mut board = Switchboard { entries: Vec::new() };

        // Doppler shifts
        board.register(none(), per_second(), "distance_to_velocity", distance_to_velocity);
        board.register(per_second(), none(), "velocity_to_distance", velocity_to_distance);

        // wavelength <-> frequency
        board.register(length(), frequency(), "distance_to_frequency", distance_to_frequency);
        board.register(frequency(), length(), "frequency_to_distance", distance_to_frequency);

        // interferometric baselines
        board.register(length(), none(), "distance_to_spatial_frequency", distance_to_spatial_frequency);
        board.register(none(), length(), "spatial_frequency_to_distance", spatial_frequency_to_distance);

        // spectral flux densities
        board.register(fnu(), flambda(), "fnu_to_flambda", fnu_to_flambda);
        board.register(flambda(), fnu(), "flambda_to_fnu", flambda_to_fnu);
        board.register(fnu(), nufnu(), "fnu_to_nufnu", fnu_to_nufnu);
        board.register(nufnu(), fnu(), "nufnu_to_fnu", nufnu_to_fnu);

        // surface brightness
        board.register(none(), per_sr(), "per_steradian", per_steradian);
        board.register(per_sr(), none(), "times_steradian", times_steradian);

        board
    }

    fn register(&mut self, only_from: Signature, only_to: Signature, name: &'static str, transform: Transform) {
        let entry = SwitchEntry { name, transform };
        match self.entries.iter_mut().find(|(f, t, _)| *f == only_from && *t == only_to) {
            Some(slot) => slot.2 = entry,
            None => self.entries.push((only_from, only_to, entry)),
        }
    }

    /// Find the transform bridging a signature difference
    pub fn get(&self, only_from: &Signature, only_to: &Signature) -> Option<&SwitchEntry> {
        self.entries
            .iter()
            .find(|(f, t, _)| f == only_from && t == only_to)
            .map(|(_, _, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Switchboard {
    fn default() -> Self {
        Self::new()
    }
}

// ============ Doppler ============

/// Wavelength [m] to radial velocity [m s-1] against the `wave` rest wavelength
pub fn distance_to_velocity(distance: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    let wave = refs.wave("distance_to_velocity")?;
    Ok((distance - wave) / wave * CC)
}

/// Radial velocity [m s-1] to wavelength [m] against the `wave` rest wavelength
pub fn velocity_to_distance(velocity: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    let wave = refs.wave("velocity_to_distance")?;
    Ok(wave / CC * velocity + wave)
}

// ============ wavelength <-> frequency ============

/// `nu = c / lambda`; the same relation maps frequency back to wavelength
pub fn distance_to_frequency(value: f64, _refs: &SiReferences) -> Result<f64, ConversionError> {
    Ok(CC / value)
}

// ============ interferometry ============

/// Baseline [m] to spatial frequency [per cycle of angle]
pub fn distance_to_spatial_frequency(distance: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    Ok(match refs.spectral("distance_to_spatial_frequency")? {
        Spectral::Wave(wave) => 2.0 * PI * distance / wave,
        Spectral::Freq(freq) => 2.0 * PI * distance * freq / CC,
    })
}

/// Spatial frequency [per cycle of angle] to baseline [m]
pub fn spatial_frequency_to_distance(spatial: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    Ok(match refs.spectral("spatial_frequency_to_distance")? {
        Spectral::Wave(wave) => wave * spatial / (2.0 * PI),
        Spectral::Freq(freq) => CC / freq * spatial / (2.0 * PI),
    })
}

// ============ flux densities ============

/// F_nu [W m-2 Hz-1] to F_lambda [W m-2 m-1]
pub fn fnu_to_flambda(fnu: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    Ok(match refs.spectral("fnu_to_flambda")? {
        Spectral::Wave(wave) => CC / (wave * wave) * fnu,
        Spectral::Freq(freq) => freq * freq / CC * fnu,
    })
}

/// F_lambda [W m-2 m-1] to F_nu [W m-2 Hz-1]
pub fn flambda_to_fnu(flambda: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    Ok(match refs.spectral("flambda_to_fnu")? {
        Spectral::Wave(wave) => wave * wave / CC * flambda,
        Spectral::Freq(freq) => CC / (freq * freq) * flambda,
    })
}

/// F_nu [W m-2 Hz-1] to nu F_nu [W m-2]
pub fn fnu_to_nufnu(fnu: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    Ok(match refs.spectral("fnu_to_nufnu")? {
        Spectral::Wave(wave) => CC / wave * fnu,
        Spectral::Freq(freq) => freq * fnu,
    })
}

/// nu F_nu [W m-2] to F_nu [W m-2 Hz-1]
pub fn nufnu_to_fnu(nufnu: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    Ok(match refs.spectral("nufnu_to_fnu")? {
        Spectral::Wave(wave) => wave / CC * nufnu,
        Spectral::Freq(freq) => nufnu / freq,
    })
}

// ============ per steradian ============

/// Solid angle of a disk with the given angular radius (in cycles)
fn disk_area(radius: f64) -> f64 {
    let radius_rad = 2.0 * PI * radius;
    PI * radius_rad * radius_rad
}

/// [Q] to [Q] sr-1 over the disk given by `diam` or `radius`
pub fn per_steradian(value: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    let radius = refs.angular_radius("per_steradian")?;
    Ok(value / disk_area(radius))
}

/// [Q] sr-1 to [Q] over the disk given by `diam` or `radius`
pub fn times_steradian(value: f64, refs: &SiReferences) -> Result<f64, ConversionError> {
    let radius = refs.angular_radius("times_steradian")?;
    Ok(value * disk_area(radius))
}
