//! Carrier frequencies and thresholds shared by the whole crate.
//! All frequencies are expressed in MHz.

/// Speed of light in vacuum [m/s]
pub const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;

/// Hz to MHz conversion factor
pub const HZ_PER_MHZ: f64 = 1.0E6;

/// Default classification tolerance [MHz]
pub const DEFAULT_TOLERANCE_MHZ: f64 = 1.0;

/// Tolerance of the coarse dual frequency check [MHz]
pub const COARSE_TOLERANCE_MHZ: f64 = 10.0;

/// C/N0 from which a signal is considered "good" [dB-Hz]
pub const GOOD_SIGNAL_CN0_DBHZ: f64 = 20.0;

/// GPS / QZSS / SBAS L1, Galileo E1
pub const L1_MHZ: f64 = 1575.42;
/// GPS / QZSS L2
pub const L2_MHZ: f64 = 1227.6;
/// GPS / QZSS / SBAS / NavIC L5, Galileo E5a, BeiDou B2a, Glonass L5
pub const L5_MHZ: f64 = 1176.45;

/// Glonass L1 FDMA channels, lowest carrier
pub const GLONASS_L1_MIN_MHZ: f64 = 1598.0625;
/// Glonass L1 FDMA channels, highest carrier
pub const GLONASS_L1_MAX_MHZ: f64 = 1605.375;
/// Glonass L2 FDMA channels, lowest carrier
pub const GLONASS_L2_MIN_MHZ: f64 = 1242.9375;
/// Glonass L2 FDMA channels, highest carrier
pub const GLONASS_L2_MAX_MHZ: f64 = 1248.625;

/// Galileo E5b, BeiDou B2
pub const E5B_MHZ: f64 = 1207.14;
/// Galileo E5 (AltBOC, E5a + E5b)
pub const E5_MHZ: f64 = 1191.795;
/// Galileo E6, QZSS LEX
pub const E6_MHZ: f64 = 1278.75;

/// BeiDou B1
pub const B1_MHZ: f64 = 1561.098;
/// BeiDou B3
pub const B3_MHZ: f64 = 1268.52;

/// NavIC S band
pub const S_MHZ: f64 = 2492.028;
