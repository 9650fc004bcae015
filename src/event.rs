//! Notifications pushed to the application
use hifitime::Epoch;
use num_traits::FromPrimitive;

use crate::{constellation::Constellation, frequency::BandMatch, satellite::Satellite};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// State of the raw measurement subsystem, as reported by the platform
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MeasurementStatus {
    /// Raw measurements are not supported by this device
    NotSupported = 0,
    /// Raw measurements are being delivered
    Ready = 1,
    /// Location is disabled on this device
    LocationDisabled = 2,
    /// Application is not allowed to receive raw measurements
    NotAllowed = 3,
    /// Status code we do not know of
    #[default]
    Unknown = 4,
}

impl MeasurementStatus {
    /// Identifies a [MeasurementStatus] from the host status code
    pub fn from_code(code: i32) -> Self {
        Self::from_i32(code).unwrap_or_default()
    }
}

/// Satellite status payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteStatusEvent {
    /// Snapshot [Epoch]
    pub epoch: Epoch,
    pub satellites_visible: usize,
    pub satellites_used_in_fix: usize,
    /// Constellations in sight, first seen order, no duplicates
    pub supported_constellations: Vec<Constellation>,
    pub is_navic_supported: bool,
    pub satellites: Vec<Satellite>,
}

/// Measurements payload
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeasurementsEvent {
    /// Snapshot [Epoch]
    pub epoch: Epoch,
    /// Carrier frequencies [MHz], no duplicates
    pub carrier_frequencies_mhz: Vec<f64>,
    pub is_dual_frequency_supported: bool,
    /// Coarse dual frequency check, with configured coarse tolerance
    pub coarse_dual_frequency: bool,
    /// Band matches, empty when disabled by configuration
    pub frequency_bands: Vec<BandMatch>,
}

/// Notifications emitted by the [crate::monitor::Monitor]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "event", content = "payload", rename_all = "kebab-case")
)]
pub enum Event {
    SatelliteStatusChanged(SatelliteStatusEvent),
    MeasurementsChanged(MeasurementsEvent),
    ListeningStarted,
    ListeningStopped,
    #[cfg_attr(feature = "serde", serde(rename = "measurement-subsystem-status-changed"))]
    MeasurementStatusChanged(MeasurementStatus),
}

impl Event {
    /// Returns the event name, as known to applications
    pub fn name(&self) -> &'static str {
        match self {
            Self::SatelliteStatusChanged(_) => "satellite-status-changed",
            Self::MeasurementsChanged(_) => "measurements-changed",
            Self::ListeningStarted => "listening-started",
            Self::ListeningStopped => "listening-stopped",
            Self::MeasurementStatusChanged(_) => "measurement-subsystem-status-changed",
        }
    }
}
