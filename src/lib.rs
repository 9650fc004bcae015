#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

/*
 * GNSS receiver status: visible constellations, tracked carrier bands,
 * dual frequency capability and per vehicle telemetry.
 * This framework is shipped under the MPL-2.0 License.
 */

#[macro_use]
extern crate num_derive;

#[macro_use]
extern crate lazy_static;

pub mod aggregator;
pub mod band;
pub mod capabilities;
pub mod config;
pub mod constants;
pub mod constellation;
pub mod event;
pub mod frequency;
pub mod monitor;
pub mod satellite;
pub mod status;

mod error;

#[cfg(test)]
mod tests;

/// Package to include all basic structures
pub mod prelude {
    pub use crate::{
        aggregator::SatelliteStatistics,
        band::Band,
        capabilities::Capabilities,
        config::Config,
        constellation::Constellation,
        error::{ConfigError, Error, HardwareError, ProcessingError},
        event::{Event, MeasurementStatus, MeasurementsEvent, SatelliteStatusEvent},
        frequency::{BandMatch, Classifier, FrequencyBand, Nominal, FREQUENCY_BANDS},
        monitor::{EventSink, Hardware, Monitor, NoEvents},
        satellite::{RawSatellite, Satellite},
        status::{Snapshot, Status},
    };

    // pub re-export
    pub use hifitime::{Duration, Epoch};
}
