//! Monitor configuration
use crate::{
    constants::{COARSE_TOLERANCE_MHZ, DEFAULT_TOLERANCE_MHZ, GOOD_SIGNAL_CN0_DBHZ},
    error::ConfigError,
    frequency::{is_dual_frequency_nominal, Classifier},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// [Config] tunes classification and statistics.
/// Missing fields take their default value when deserialized.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Band classification tolerance [MHz]
    pub tolerance_mhz: f64,
    /// Coarse dual frequency check tolerance [MHz]
    pub coarse_tolerance_mhz: f64,
    /// Good signal threshold [dB-Hz]
    pub good_signal_cn0: f64,
    /// Attach band matches to measurement events
    pub emit_frequency_bands: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance_mhz: DEFAULT_TOLERANCE_MHZ,
            coarse_tolerance_mhz: COARSE_TOLERANCE_MHZ,
            good_signal_cn0: GOOD_SIGNAL_CN0_DBHZ,
            emit_frequency_bands: true,
        }
    }
}

impl Config {
    /// Copies and sets classification tolerance [MHz]
    pub fn with_tolerance(&self, tolerance_mhz: f64) -> Self {
        let mut s = *self;
        s.tolerance_mhz = tolerance_mhz;
        s
    }
    /// Copies and sets coarse check tolerance [MHz]
    pub fn with_coarse_tolerance(&self, tolerance_mhz: f64) -> Self {
        let mut s = *self;
        s.coarse_tolerance_mhz = tolerance_mhz;
        s
    }
    /// Copies and sets good signal threshold [dB-Hz]
    pub fn with_good_signal_cn0(&self, cn0: f64) -> Self {
        let mut s = *self;
        s.good_signal_cn0 = cn0;
        s
    }
    /// Copies and toggles band matches in measurement events
    pub fn with_frequency_bands(&self, emit: bool) -> Self {
        let mut s = *self;
        s.emit_frequency_bands = emit;
        s
    }
    /// Checks this [Config] is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        for tolerance in [self.tolerance_mhz, self.coarse_tolerance_mhz] {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::InvalidTolerance(tolerance));
            }
        }
        if !self.good_signal_cn0.is_finite() {
            return Err(ConfigError::InvalidThreshold(self.good_signal_cn0));
        }
        Ok(())
    }
    /// Returns the [Classifier] this [Config] describes
    pub fn classifier(&self) -> Classifier {
        Classifier::new(self.tolerance_mhz)
    }
    /// Coarse dual frequency check of these frequencies [MHz],
    /// with configured coarse tolerance
    pub fn is_dual_frequency_nominal(&self, frequencies_mhz: &[f64]) -> bool {
        is_dual_frequency_nominal(frequencies_mhz, self.coarse_tolerance_mhz)
    }
}
