//! Listening session over the GNSS hardware
use std::sync::{mpsc::Sender, Mutex, MutexGuard, PoisonError};

use hifitime::Epoch;
use log::{debug, error, warn};

use crate::{
    aggregator::{statistics_with_threshold, SatelliteStatistics},
    capabilities::Capabilities,
    config::Config,
    constants::HZ_PER_MHZ,
    error::{Error, HardwareError, ProcessingError},
    event::{Event, MeasurementStatus},
    satellite::{RawSatellite, Satellite},
    status::{Snapshot, Status},
};

/// GNSS hardware, as exposed by the host platform.
pub trait Hardware {
    /// Returns true if location access was granted
    fn has_location_permission(&self) -> bool;
    /// Returns what this platform can report
    fn capabilities(&self) -> Capabilities;
    /// Registers status and measurement callbacks.
    /// Callbacks must not be delivered from within this call.
    fn register(&self) -> Result<(), HardwareError>;
    /// Unregisters status and measurement callbacks.
    /// Callbacks must not be delivered from within this call.
    fn unregister(&self) -> Result<(), HardwareError>;
}

/// Destination of [Event]s.
/// Events are emitted while the [Monitor] snapshot is locked, so they arrive
/// in snapshot replacement order. [EventSink::emit] must not block, nor call
/// back into the [Monitor].
pub trait EventSink {
    fn emit(&self, event: Event);
}

impl EventSink for Sender<Event> {
    fn emit(&self, event: Event) {
        if self.send(event).is_err() {
            debug!("event receiver has hung up");
        }
    }
}

/// Drops all [Event]s, for applications that only poll [Monitor::status]
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventSink for NoEvents {
    fn emit(&self, _: Event) {}
}

#[derive(Debug, Default)]
struct State {
    listening: bool,
    snapshot: Snapshot,
}

/// [Monitor] owns the current [Snapshot] and the listening session.
/// All methods take `&self`: share it behind an `Arc` when callbacks
/// arrive on several threads.
pub struct Monitor<H: Hardware, S: EventSink> {
    hardware: H,
    sink: S,
    config: Config,
    capabilities: Capabilities,
    state: Mutex<State>,
}

impl<H: Hardware, S: EventSink> Monitor<H, S> {
    /// Builds a new [Monitor]. Platform capabilities are probed once, here.
    pub fn new(hardware: H, sink: S, config: Config) -> Result<Self, Error> {
        config.validate()?;
        let capabilities = hardware.capabilities();
        debug!("capabilities: {:?}", capabilities);
        Ok(Self {
            hardware,
            sink,
            config,
            capabilities,
            state: Mutex::new(State::default()),
        })
    }
    /// Returns [Capabilities] probed at startup
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
    /// Returns current [Config]
    pub fn config(&self) -> &Config {
        &self.config
    }
    /// Returns the underlying [Hardware]
    pub fn hardware(&self) -> &H {
        &self.hardware
    }
    /// Returns true while listening
    pub fn is_listening(&self) -> bool {
        self.lock().listening
    }
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn check_permission(&self) -> Result<(), Error> {
        if self.hardware.has_location_permission() {
            Ok(())
        } else {
            warn!("location permission denied");
            Err(Error::PermissionDenied)
        }
    }
    /// Returns current [Status].
    /// Fails with [Error::PermissionDenied] if location access was not granted.
    pub fn status(&self) -> Result<Status, Error> {
        self.check_permission()?;
        let state = self.lock();
        Ok(Status::assemble(&state.snapshot, self.capabilities, &self.config))
    }
    /// Returns [SatelliteStatistics] of current satellite snapshot,
    /// with configured good signal threshold.
    pub fn statistics(&self) -> Result<SatelliteStatistics, Error> {
        self.check_permission()?;
        let state = self.lock();
        Ok(statistics_with_threshold(
            state.snapshot.satellites(),
            self.config.good_signal_cn0,
        ))
    }
    /// Registers to the [Hardware] and starts from an empty snapshot.
    /// Does nothing if we're already listening.
    /// Fails with [HardwareError::NotSupported] on devices without GNSS receiver.
    pub fn start_listening(&self) -> Result<(), Error> {
        self.check_permission()?;
        if !self.capabilities.gnss() {
            error!("no gnss receiver on this device");
            return Err(Error::HardwareUnavailable(HardwareError::NotSupported));
        }
        let mut state = self.lock();
        if state.listening {
            debug!("already listening");
            return Ok(());
        }
        self.hardware.register().map_err(|e| {
            error!("registration failed: {}", e);
            Error::HardwareUnavailable(e)
        })?;
        state.snapshot.clear();
        state.listening = true;
        debug!("listening started");
        self.sink.emit(Event::ListeningStarted);
        Ok(())
    }
    /// Unregisters from the [Hardware] and clears the snapshot.
    /// The snapshot is cleared even if unregistration fails.
    /// Does nothing if we're not listening.
    pub fn stop_listening(&self) -> Result<(), Error> {
        let mut state = self.lock();
        if !state.listening {
            debug!("not listening");
            return Ok(());
        }
        state.listening = false;
        state.snapshot.clear();
        let unregistered = self.hardware.unregister();
        if let Err(e) = &unregistered {
            error!("unregistration failed: {}", e);
        }
        debug!("listening stopped");
        self.sink.emit(Event::ListeningStopped);
        unregistered.map_err(Error::HardwareUnavailable)
    }
    /// Satellite status push. Malformed pushes are logged and dropped,
    /// previous snapshot is retained.
    pub fn on_satellite_status(&self, epoch: Epoch, satellites: &[RawSatellite]) {
        if let Err(e) = self.process_satellite_status(epoch, satellites) {
            error!("{} - dropped satellite status: {}", epoch, e);
        }
    }
    /// Measurement push: carrier frequencies [Hz]. Malformed pushes are logged
    /// and dropped, previous snapshot is retained.
    pub fn on_measurements(&self, epoch: Epoch, frequencies_hz: &[f64]) {
        if let Err(e) = self.process_measurements(epoch, frequencies_hz) {
            error!("{} - dropped measurements: {}", epoch, e);
        }
    }
    /// Measurement subsystem status push, from host status code
    pub fn on_measurement_status(&self, code: i32) {
        let status = MeasurementStatus::from_code(code);
        let mut state = self.lock();
        if !state.listening {
            warn!("measurement status {:?} while not listening", status);
            return;
        }
        state.snapshot.set_measurement_status(status);
        debug!("measurement status: {:?}", status);
        self.sink.emit(Event::MeasurementStatusChanged(status));
    }
    fn process_satellite_status(
        &self,
        epoch: Epoch,
        satellites: &[RawSatellite],
    ) -> Result<(), ProcessingError> {
        let satellites = satellites
            .iter()
            .map(|raw| Satellite::from_raw(raw, self.capabilities))
            .collect::<Result<Vec<_>, _>>()?;
        let mut state = self.lock();
        if !state.listening {
            warn!("{} - satellite status while not listening", epoch);
            return Ok(());
        }
        state.snapshot.replace_satellites(epoch, satellites);
        let event = state.snapshot.satellite_event(epoch);
        self.sink.emit(Event::SatelliteStatusChanged(event));
        Ok(())
    }
    fn process_measurements(
        &self,
        epoch: Epoch,
        frequencies_hz: &[f64],
    ) -> Result<(), ProcessingError> {
        if !self.capabilities.measurements() {
            warn!("{} - measurements not supported by this platform", epoch);
            return Ok(());
        }
        let frequencies_mhz = frequencies_hz
            .iter()
            .map(|f| {
                if f.is_finite() && *f > 0.0 {
                    Ok(f / HZ_PER_MHZ)
                } else {
                    Err(ProcessingError::InvalidFrequency(*f))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut state = self.lock();
        if !state.listening {
            warn!("{} - measurements while not listening", epoch);
            return Ok(());
        }
        state.snapshot.replace_frequencies(epoch, frequencies_mhz);
        let event = state.snapshot.measurements_event(epoch, &self.config);
        self.sink.emit(Event::MeasurementsChanged(event));
        Ok(())
    }
}
