//! Snapshot store and status assembly
use hifitime::{Duration, Epoch};
use itertools::Itertools;
use log::debug;

use crate::{
    aggregator::average_signal,
    capabilities::Capabilities,
    config::Config,
    constellation::Constellation,
    event::{MeasurementStatus, MeasurementsEvent, SatelliteStatusEvent},
    frequency::BandMatch,
    satellite::Satellite,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constellations in sight, first seen order, no duplicates
pub fn supported_constellations(satellites: &[Satellite]) -> Vec<Constellation> {
    satellites.iter().map(|sat| sat.constellation).unique().collect()
}

/// Frequencies without duplicates, first seen order
pub fn unique_frequencies(frequencies: &[f64]) -> Vec<f64> {
    frequencies
        .iter()
        .copied()
        .unique_by(|f| f.to_bits())
        .collect()
}

/// Latest satellite and measurement pushes. Both are replaced
/// independently and wholesale: one may be older than the other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    satellites: Vec<Satellite>,
    satellites_epoch: Option<Epoch>,
    frequencies_mhz: Vec<f64>,
    measurements_epoch: Option<Epoch>,
    measurement_status: Option<MeasurementStatus>,
}

impl Snapshot {
    /// Latest satellites
    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }
    /// Latest carrier frequencies [MHz], as pushed
    pub fn frequencies_mhz(&self) -> &[f64] {
        &self.frequencies_mhz
    }
    /// Latest measurement subsystem status
    pub fn measurement_status(&self) -> Option<MeasurementStatus> {
        self.measurement_status
    }
    /// Replaces the satellite snapshot
    pub fn replace_satellites(&mut self, epoch: Epoch, satellites: Vec<Satellite>) {
        debug!("{} - {} satellites", epoch, satellites.len());
        self.satellites = satellites;
        self.satellites_epoch = Some(epoch);
    }
    /// Replaces the frequency snapshot [MHz]
    pub fn replace_frequencies(&mut self, epoch: Epoch, frequencies_mhz: Vec<f64>) {
        debug!("{} - {} carrier frequencies", epoch, frequencies_mhz.len());
        self.frequencies_mhz = frequencies_mhz;
        self.measurements_epoch = Some(epoch);
    }
    /// Updates the measurement subsystem status
    pub fn set_measurement_status(&mut self, status: MeasurementStatus) {
        self.measurement_status = Some(status);
    }
    /// Returns true if nothing was pushed since last reset
    pub fn is_empty(&self) -> bool {
        self.satellites_epoch.is_none()
            && self.measurements_epoch.is_none()
            && self.measurement_status.is_none()
    }
    /// Forgets everything
    pub fn clear(&mut self) {
        *self = Self::default();
    }
    /// Returns the satellite payload for this snapshot
    pub(crate) fn satellite_event(&self, epoch: Epoch) -> SatelliteStatusEvent {
        let supported_constellations = supported_constellations(&self.satellites);
        SatelliteStatusEvent {
            epoch,
            satellites_visible: self.satellites.len(),
            satellites_used_in_fix: self.satellites.iter().filter(|sat| sat.used_in_fix).count(),
            is_navic_supported: supported_constellations.iter().any(|c| c.is_navic()),
            supported_constellations,
            satellites: self.satellites.clone(),
        }
    }
    /// Returns the measurements payload for this snapshot
    pub(crate) fn measurements_event(&self, epoch: Epoch, config: &Config) -> MeasurementsEvent {
        let classifier = config.classifier();
        let carrier_frequencies_mhz = unique_frequencies(&self.frequencies_mhz);
        let frequency_bands = if config.emit_frequency_bands {
            classifier.band_info_for_all(&carrier_frequencies_mhz)
        } else {
            Vec::new()
        };
        MeasurementsEvent {
            epoch,
            is_dual_frequency_supported: classifier
                .is_dual_frequency_supported(&carrier_frequencies_mhz),
            coarse_dual_frequency: config.is_dual_frequency_nominal(&carrier_frequencies_mhz),
            carrier_frequencies_mhz,
            frequency_bands,
        }
    }
}

/// Receiver status reported to the application.
/// Entirely derived from the latest [Snapshot].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Status {
    pub is_gnss_supported: bool,
    pub is_dual_frequency_supported: bool,
    /// Coarse dual frequency check, with configured coarse tolerance
    pub coarse_dual_frequency: bool,
    pub is_navic_supported: bool,
    pub satellites_visible: usize,
    pub satellites_used_in_fix: usize,
    /// Mean C/N0 [dB-Hz], 0 when no vehicle reports C/N0
    pub average_cn0_dbhz: f64,
    /// Constellations in sight, first seen order, no duplicates
    pub supported_constellations: Vec<Constellation>,
    /// Carrier frequencies [MHz], no duplicates
    pub carrier_frequencies_mhz: Vec<f64>,
    pub frequency_bands: Vec<BandMatch>,
    pub satellites: Vec<Satellite>,
    /// Platform reports C/N0
    pub supports_cn0: bool,
    /// Platform reports carrier frequencies
    pub supports_carrier_frequency: bool,
    /// Platform reports raw measurements
    pub supports_measurements: bool,
    pub measurement_status: Option<MeasurementStatus>,
    /// [Epoch] of the satellite snapshot
    pub satellites_epoch: Option<Epoch>,
    /// [Epoch] of the frequency snapshot
    pub measurements_epoch: Option<Epoch>,
}

impl Status {
    /// Assembles a [Status] from latest [Snapshot].
    /// Capabilities are passed through as is.
    pub fn assemble(snapshot: &Snapshot, capabilities: Capabilities, config: &Config) -> Self {
        let classifier = config.classifier();
        let supported_constellations = supported_constellations(&snapshot.satellites);
        let carrier_frequencies_mhz = unique_frequencies(&snapshot.frequencies_mhz);
        Self {
            is_gnss_supported: capabilities.gnss(),
            is_dual_frequency_supported: classifier
                .is_dual_frequency_supported(&carrier_frequencies_mhz),
            coarse_dual_frequency: config.is_dual_frequency_nominal(&carrier_frequencies_mhz),
            is_navic_supported: supported_constellations.iter().any(|c| c.is_navic()),
            satellites_visible: snapshot.satellites.len(),
            satellites_used_in_fix: snapshot
                .satellites
                .iter()
                .filter(|sat| sat.used_in_fix)
                .count(),
            average_cn0_dbhz: average_signal(&snapshot.satellites),
            supported_constellations,
            frequency_bands: classifier.band_info_for_all(&carrier_frequencies_mhz),
            carrier_frequencies_mhz,
            satellites: snapshot.satellites.clone(),
            supports_cn0: capabilities.cn0(),
            supports_carrier_frequency: capabilities.carrier_frequency(),
            supports_measurements: capabilities.measurements(),
            measurement_status: snapshot.measurement_status,
            satellites_epoch: snapshot.satellites_epoch,
            measurements_epoch: snapshot.measurements_epoch,
        }
    }
    /// Time elapsed between the satellite and frequency snapshots
    /// this [Status] combines. None unless both were pushed.
    pub fn staleness(&self) -> Option<Duration> {
        let satellites = self.satellites_epoch?;
        let measurements = self.measurements_epoch?;
        Some((satellites - measurements).abs())
    }
    /// Names of the constellations in sight
    pub fn constellation_names(&self) -> Vec<&'static str> {
        self.supported_constellations
            .iter()
            .map(|c| c.name())
            .collect()
    }
}
