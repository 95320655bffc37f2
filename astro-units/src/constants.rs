//! Physical constants, all in SI units

/// Speed of light in vacuum [m s-1]
pub const CC: f64 = 299_792_458.0;

/// Astronomical unit [m] (IAU 2012)
pub const AU: f64 = 149_597_870_700.0;

/// Parsec [m]
pub const PC: f64 = 3.085_677_581_491_367e16;

/// Julian light year [m]
pub const LY: f64 = 9.460_730_472_580_8e15;

/// Solar radius [m]
pub const RSUN: f64 = 6.955e8;

/// Solar mass [kg]
pub const MSUN: f64 = 1.988_547e30;

/// Electron volt [J]
pub const EV: f64 = 1.602_176_46e-19;

/// Calorie (thermochemical) [J]
pub const CAL: f64 = 4.184;

// ============================================================================
// Magnitude zero points
// ============================================================================

/// Vega system zero-magnitude flux [W m-2 m-1]
pub const VEGA_ZERO_FLUX: f64 = 1e-9;

/// ST system zero-magnitude flux [W m-2 m-1]
pub const ST_ZERO_FLUX: f64 = 0.036_307_805_477_010_027;

/// AB system zero-magnitude flux [W m-2 Hz-1]
pub const AB_ZERO_FLUX: f64 = 3.630_780_547_701_002_4e-23;
