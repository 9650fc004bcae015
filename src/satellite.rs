//! Tracked satellites
use crate::{
    capabilities::Capabilities,
    constants::HZ_PER_MHZ,
    constellation::Constellation,
    error::ProcessingError,
    frequency::{BandMatch, Classifier},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Satellite as reported by the host platform, prior to validation.
/// Optional fields are `None` when the platform did not report them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawSatellite {
    /// Vehicle identifier, unique within its constellation
    pub svid: i32,
    /// Host constellation type code
    pub constellation_type: i32,
    /// C/N0 [dB-Hz]
    pub cn0_dbhz: Option<f64>,
    /// Elevation [°]
    pub elevation_deg: Option<f64>,
    /// Azimuth [°]
    pub azimuth_deg: Option<f64>,
    pub has_ephemeris: bool,
    pub has_almanac: bool,
    pub used_in_fix: bool,
    /// Carrier frequency [Hz]
    pub carrier_frequency_hz: Option<f64>,
}

/// One tracked satellite of the current snapshot.
/// Missing readings remain `None`: a zero C/N0
/// and no C/N0 reported at all are different things.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Satellite {
    /// Vehicle identifier, unique within its constellation
    pub svid: u16,
    /// [Constellation] this vehicle belongs to
    pub constellation: Constellation,
    /// C/N0 [dB-Hz]
    pub cn0_dbhz: Option<f64>,
    /// Elevation [°]
    pub elevation_deg: Option<f64>,
    /// Azimuth [°]
    pub azimuth_deg: Option<f64>,
    /// Ephemeris is available for this vehicle
    pub has_ephemeris: bool,
    /// Almanac is available for this vehicle
    pub has_almanac: bool,
    /// Vehicle contributed to the latest position fix
    pub used_in_fix: bool,
    /// Carrier frequency [Hz]
    pub carrier_frequency_hz: Option<f64>,
}

impl Satellite {
    /// Builds a new [Satellite] with no readings
    pub fn new(constellation: Constellation, svid: u16) -> Self {
        Self {
            svid,
            constellation,
            ..Default::default()
        }
    }
    /// Copies and sets C/N0 [dB-Hz]
    pub fn with_cn0(&self, cn0_dbhz: f64) -> Self {
        let mut s = *self;
        s.cn0_dbhz = Some(cn0_dbhz);
        s
    }
    /// Copies and sets elevation and azimuth [°]
    pub fn with_position(&self, elevation_deg: f64, azimuth_deg: f64) -> Self {
        let mut s = *self;
        s.elevation_deg = Some(elevation_deg);
        s.azimuth_deg = Some(azimuth_deg);
        s
    }
    /// Copies and sets carrier frequency [Hz]
    pub fn with_carrier_frequency_hz(&self, frequency_hz: f64) -> Self {
        let mut s = *self;
        s.carrier_frequency_hz = Some(frequency_hz);
        s
    }
    /// Copies and marks ephemeris as available
    pub fn with_ephemeris(&self) -> Self {
        let mut s = *self;
        s.has_ephemeris = true;
        s
    }
    /// Copies and marks almanac as available
    pub fn with_almanac(&self) -> Self {
        let mut s = *self;
        s.has_almanac = true;
        s
    }
    /// Copies and marks this vehicle as used in fix
    pub fn with_fix(&self) -> Self {
        let mut s = *self;
        s.used_in_fix = true;
        s
    }
    /// Returns the constellation name reported to applications
    pub fn constellation_name(&self) -> &'static str {
        self.constellation.name()
    }
    /// Returns carrier frequency in MHz
    pub fn carrier_frequency_mhz(&self) -> Option<f64> {
        self.carrier_frequency_hz.map(|f| f / HZ_PER_MHZ)
    }
    /// Identifies the band this vehicle is tracked on, using its own
    /// constellation to resolve shared frequencies.
    /// Returns None when carrier frequency is not reported.
    pub fn band_match(&self, classifier: &Classifier) -> Option<BandMatch> {
        let frequency = self.carrier_frequency_mhz()?;
        Some(classifier.classify_for(frequency, self.constellation))
    }
    /// Validates a [RawSatellite]. Readings the platform cannot report,
    /// per [Capabilities], are discarded.
    pub fn from_raw(
        raw: &RawSatellite,
        capabilities: Capabilities,
    ) -> Result<Self, ProcessingError> {
        let svid = u16::try_from(raw.svid).map_err(|_| ProcessingError::InvalidSvid(raw.svid))?;

        let cn0_dbhz = match raw.cn0_dbhz {
            Some(value) if capabilities.cn0() => {
                if !value.is_finite() || value < 0.0 {
                    return Err(ProcessingError::InvalidSignal { svid, value });
                }
                Some(value)
            },
            _ => None,
        };

        if let Some(value) = raw.elevation_deg {
            if !(-90.0..=90.0).contains(&value) {
                return Err(ProcessingError::InvalidElevation { svid, value });
            }
        }

        if let Some(value) = raw.azimuth_deg {
            if !(0.0..=360.0).contains(&value) {
                return Err(ProcessingError::InvalidAzimuth { svid, value });
            }
        }

        let carrier_frequency_hz = match raw.carrier_frequency_hz {
            Some(value) if capabilities.carrier_frequency() => {
                if !value.is_finite() || value <= 0.0 {
                    return Err(ProcessingError::InvalidCarrierFrequency { svid, value });
                }
                Some(value)
            },
            _ => None,
        };

        Ok(Self {
            svid,
            constellation: Constellation::from_code(raw.constellation_type),
            cn0_dbhz,
            elevation_deg: raw.elevation_deg,
            azimuth_deg: raw.azimuth_deg,
            has_ephemeris: raw.has_ephemeris,
            has_almanac: raw.has_almanac,
            used_in_fix: raw.used_in_fix,
            carrier_frequency_hz,
        })
    }
}
