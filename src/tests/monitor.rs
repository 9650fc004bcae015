use std::sync::{mpsc::channel, Arc};
use std::thread;

use crate::prelude::*;
use crate::tests::toolkit::{drain, epoch, fake_monitor, init_logger, raw_satellite, FakeHardware};

#[test]
fn permission_denied() {
    let (monitor, rx) = fake_monitor();
    monitor.hardware().deny_permission();

    assert_eq!(monitor.status(), Err(Error::PermissionDenied));
    assert_eq!(monitor.statistics(), Err(Error::PermissionDenied));
    assert_eq!(monitor.start_listening(), Err(Error::PermissionDenied));
    assert!(!monitor.is_listening());
    assert_eq!(monitor.hardware().registrations(), 0);
    assert!(drain(&rx).is_empty());

    monitor.hardware().grant_permission();
    assert!(monitor.status().is_ok());
    assert!(monitor.start_listening().is_ok());
    assert!(monitor.is_listening());
}

#[test]
fn lifecycle() {
    let (monitor, rx) = fake_monitor();
    assert!(!monitor.is_listening());

    monitor.start_listening().unwrap();
    monitor.start_listening().unwrap();
    assert!(monitor.is_listening());
    assert_eq!(monitor.hardware().registrations(), 1);

    monitor.stop_listening().unwrap();
    monitor.stop_listening().unwrap();
    assert!(!monitor.is_listening());
    assert_eq!(monitor.hardware().unregistrations(), 1);

    assert_eq!(
        drain(&rx),
        vec![Event::ListeningStarted, Event::ListeningStopped]
    );
}

#[test]
fn registration_failure() {
    let (monitor, rx) = fake_monitor();
    monitor
        .hardware()
        .registration_fails
        .store(true, std::sync::atomic::Ordering::SeqCst);

    match monitor.start_listening() {
        Err(Error::HardwareUnavailable(HardwareError::RegistrationFailed(_))) => {},
        other => panic!("expecting registration failure, got {:?}", other),
    }
    assert!(!monitor.is_listening());
    assert!(drain(&rx).is_empty());
}

#[test]
fn satellite_status() {
    let (monitor, rx) = fake_monitor();
    monitor.start_listening().unwrap();

    monitor.on_satellite_status(
        epoch(0),
        &[
            raw_satellite(1, 3, Some(25.0), true),
            raw_satellite(7, 2, Some(30.0), true),
            raw_satellite(1, 8, None, false),
            raw_satellite(6, 21, Some(12.0), false),
            raw_satellite(1, 3, Some(25.0), true),
        ],
    );

    let status = monitor.status().unwrap();
    assert!(status.is_gnss_supported);
    assert_eq!(status.satellites_visible, 5);
    assert_eq!(status.satellites_used_in_fix, 3);
    assert_eq!(
        status.supported_constellations,
        vec![Constellation::GPS, Constellation::IRNSS, Constellation::Galileo]
    );
    assert!(status.is_navic_supported);
    assert_eq!(status.average_cn0_dbhz, 23.0);
    assert_eq!(status.satellites[2].cn0_dbhz, None);
    assert_eq!(status.satellites_epoch, Some(epoch(0)));
    assert_eq!(status.measurements_epoch, None);
    assert!(!status.is_dual_frequency_supported);

    let events = drain(&rx);
    assert_eq!(events.len(), 2);
    match &events[1] {
        Event::SatelliteStatusChanged(event) => {
            assert_eq!(event.epoch, epoch(0));
            assert_eq!(event.satellites_visible, 5);
            assert_eq!(event.satellites_used_in_fix, 3);
            assert!(event.is_navic_supported);
            assert_eq!(event.supported_constellations, status.supported_constellations);
            assert_eq!(event.satellites, status.satellites);
        },
        other => panic!("unexpected event {:?}", other),
    }

    let stats = monitor.statistics().unwrap();
    assert_eq!(stats.total, 5);
    assert_eq!(stats.with_good_signal, 3);
    assert_eq!(stats.by_constellation.get(&Constellation::GPS), Some(&3));
}

#[test]
fn measurements() {
    let (monitor, rx) = fake_monitor();
    monitor.start_listening().unwrap();

    monitor.on_measurements(epoch(10), &[1575.42E6, 1575.42E6, 1227.6E6, 1561.098E6]);

    let status = monitor.status().unwrap();
    assert_eq!(status.carrier_frequencies_mhz, vec![1575.42, 1227.6, 1561.098]);
    assert!(status.is_dual_frequency_supported);
    assert_eq!(
        status
            .frequency_bands
            .iter()
            .map(|m| m.band)
            .collect::<Vec<_>>(),
        vec![Band::L1, Band::L2, Band::B1]
    );
    assert_eq!(status.measurements_epoch, Some(epoch(10)));

    let events = drain(&rx);
    match &events[1] {
        Event::MeasurementsChanged(event) => {
            assert_eq!(event.epoch, epoch(10));
            assert_eq!(event.carrier_frequencies_mhz, status.carrier_frequencies_mhz);
            assert!(event.is_dual_frequency_supported);
            assert_eq!(event.frequency_bands, status.frequency_bands);
        },
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn single_frequency_receiver() {
    let (monitor, _rx) = fake_monitor();
    monitor.start_listening().unwrap();
    monitor.on_measurements(epoch(0), &[1575.42E6, 1602.5625E6]);
    let status = monitor.status().unwrap();
    assert!(!status.is_dual_frequency_supported);
    assert_eq!(status.frequency_bands[1].constellation, Constellation::Glonass);
}

#[test]
fn malformed_pushes_are_dropped() {
    let (monitor, rx) = fake_monitor();
    monitor.start_listening().unwrap();

    monitor.on_satellite_status(epoch(0), &[raw_satellite(1, 3, Some(25.0), true)]);
    monitor.on_measurements(epoch(0), &[1176.45E6]);
    let before = monitor.status().unwrap();
    assert_eq!(drain(&rx).len(), 3);

    let mut bad = raw_satellite(3, 9, Some(40.0), true);
    bad.elevation_deg = Some(123.0);
    monitor.on_satellite_status(
        epoch(1000),
        &[raw_satellite(3, 1, Some(40.0), true), bad],
    );
    monitor.on_satellite_status(epoch(1000), &[raw_satellite(1, -4, None, false)]);
    monitor.on_measurements(epoch(1000), &[1575.42E6, f64::NAN]);
    monitor.on_measurements(epoch(1000), &[-1176.45E6]);
    monitor.on_measurements(epoch(1000), &[0.0]);

    // still listening, previous snapshot retained, nothing emitted
    assert!(monitor.is_listening());
    assert_eq!(monitor.status().unwrap(), before);
    assert!(drain(&rx).is_empty());
}

#[test]
fn independent_snapshots() {
    let (monitor, _rx) = fake_monitor();
    monitor.start_listening().unwrap();

    monitor.on_measurements(epoch(0), &[1176.45E6]);
    monitor.on_satellite_status(epoch(400), &[raw_satellite(5, 30, Some(33.0), true)]);
    monitor.on_satellite_status(epoch(900), &[raw_satellite(4, 193, Some(33.0), true)]);

    let status = monitor.status().unwrap();
    assert_eq!(status.carrier_frequencies_mhz, vec![1176.45]);
    assert!(status.is_dual_frequency_supported);
    assert_eq!(status.supported_constellations, vec![Constellation::QZSS]);
    assert_eq!(
        status.staleness().map(|dt| dt.total_nanoseconds()),
        Some(900_000_000)
    );

    monitor.on_measurements(epoch(1000), &[]);
    let status = monitor.status().unwrap();
    assert!(status.carrier_frequencies_mhz.is_empty());
    assert!(!status.is_dual_frequency_supported);
    assert_eq!(status.satellites_visible, 1);
}

#[test]
fn pushes_while_not_listening() {
    let (monitor, rx) = fake_monitor();
    monitor.on_satellite_status(epoch(0), &[raw_satellite(1, 3, Some(25.0), true)]);
    monitor.on_measurements(epoch(0), &[1176.45E6]);
    monitor.on_measurement_status(1);

    let status = monitor.status().unwrap();
    assert_eq!(status.satellites_visible, 0);
    assert!(status.carrier_frequencies_mhz.is_empty());
    assert_eq!(status.measurement_status, None);
    assert!(drain(&rx).is_empty());
}

#[test]
fn stop_clears_snapshot() {
    let (monitor, rx) = fake_monitor();
    monitor.start_listening().unwrap();
    monitor.on_satellite_status(epoch(0), &[raw_satellite(7, 2, Some(30.0), true)]);
    monitor.on_measurements(epoch(0), &[2492.028E6]);
    monitor.on_measurement_status(1);
    assert!(monitor.status().unwrap().is_navic_supported);

    monitor.stop_listening().unwrap();
    let status = monitor.status().unwrap();
    assert_eq!(status.satellites_visible, 0);
    assert!(!status.is_navic_supported);
    assert!(status.carrier_frequencies_mhz.is_empty());
    assert_eq!(status.measurement_status, None);
    assert_eq!(status.satellites_epoch, None);

    // restart begins from an empty state
    monitor.start_listening().unwrap();
    assert_eq!(monitor.status().unwrap().satellites_visible, 0);

    let events = drain(&rx);
    assert_eq!(events.first(), Some(&Event::ListeningStarted));
    assert_eq!(events.last(), Some(&Event::ListeningStarted));
    assert!(events.contains(&Event::ListeningStopped));
}

#[test]
fn unregistration_failure() {
    let (monitor, rx) = fake_monitor();
    monitor.start_listening().unwrap();
    monitor.on_satellite_status(epoch(0), &[raw_satellite(1, 3, Some(25.0), true)]);
    monitor
        .hardware()
        .unregistration_fails
        .store(true, std::sync::atomic::Ordering::SeqCst);

    match monitor.stop_listening() {
        Err(Error::HardwareUnavailable(HardwareError::UnregistrationFailed(_))) => {},
        other => panic!("expecting unregistration failure, got {:?}", other),
    }
    assert!(!monitor.is_listening());
    assert_eq!(monitor.status().unwrap().satellites_visible, 0);
    assert_eq!(drain(&rx).last(), Some(&Event::ListeningStopped));
}

#[test]
fn measurement_status() {
    let (monitor, rx) = fake_monitor();
    monitor.start_listening().unwrap();
    monitor.on_measurement_status(2);
    monitor.on_measurement_status(42);

    assert_eq!(
        monitor.status().unwrap().measurement_status,
        Some(MeasurementStatus::Unknown)
    );
    assert_eq!(
        drain(&rx),
        vec![
            Event::ListeningStarted,
            Event::MeasurementStatusChanged(MeasurementStatus::LocationDisabled),
            Event::MeasurementStatusChanged(MeasurementStatus::Unknown),
        ]
    );
}

#[test]
fn capabilities_probed_once() {
    init_logger();
    let (tx, _rx) = channel::<Event>();
    let hardware = FakeHardware::new(Capabilities::GNSS);
    let monitor = Monitor::new(hardware, tx, Config::default()).unwrap();
    assert_eq!(monitor.capabilities(), Capabilities::GNSS);

    monitor.start_listening().unwrap();
    let mut raw = raw_satellite(1, 3, Some(25.0), true);
    raw.carrier_frequency_hz = Some(1575.42E6);
    monitor.on_satellite_status(epoch(0), &[raw]);

    let status = monitor.status().unwrap();
    assert!(status.is_gnss_supported);
    assert!(!status.supports_cn0);
    assert!(!status.supports_carrier_frequency);
    assert_eq!(status.satellites[0].cn0_dbhz, None);
    assert_eq!(status.satellites[0].carrier_frequency_hz, None);
    assert_eq!(status.average_cn0_dbhz, 0.0);
}

#[test]
fn invalid_config() {
    let (tx, _rx) = channel::<Event>();
    let hardware = FakeHardware::new(Capabilities::all());
    let config = Config::default().with_tolerance(f64::NAN);
    match Monitor::new(hardware, tx, config) {
        Err(Error::Config(ConfigError::InvalidTolerance(_))) => {},
        Err(e) => panic!("unexpected error {}", e),
        Ok(_) => panic!("invalid config accepted"),
    }
}

#[test]
fn config_is_honored() {
    init_logger();
    let (tx, rx) = channel::<Event>();
    let config = Config::default()
        .with_tolerance(0.1)
        .with_good_signal_cn0(35.0)
        .with_frequency_bands(false);
    let monitor = Monitor::new(FakeHardware::new(Capabilities::all()), tx, config).unwrap();
    monitor.start_listening().unwrap();

    monitor.on_measurements(epoch(0), &[1176.0E6]);
    monitor.on_satellite_status(epoch(0), &[raw_satellite(1, 1, Some(30.0), true)]);

    let status = monitor.status().unwrap();
    assert!(!status.is_dual_frequency_supported);
    assert_eq!(status.frequency_bands[0].band, Band::Unknown);
    assert_eq!(monitor.statistics().unwrap().with_good_signal, 0);

    match &drain(&rx)[1] {
        Event::MeasurementsChanged(event) => assert!(event.frequency_bands.is_empty()),
        other => panic!("unexpected event {:?}", other),
    }
}

#[test]
fn concurrent_pushes() {
    init_logger();
    let hardware = FakeHardware::new(Capabilities::all());
    let monitor = Arc::new(Monitor::new(hardware, NoEvents, Config::default()).unwrap());
    monitor.start_listening().unwrap();

    let handles = (0..4)
        .map(|n| {
            let monitor = Arc::clone(&monitor);
            thread::spawn(move || {
                for i in 0..100 {
                    if n % 2 == 0 {
                        monitor.on_satellite_status(
                            epoch(i),
                            &[
                                raw_satellite(1, 1, Some(40.0), true),
                                raw_satellite(6, 2, Some(20.0), true),
                            ],
                        );
                    } else {
                        monitor.on_measurements(epoch(i), &[1575.42E6, 1207.14E6]);
                    }
                    let status = monitor.status().unwrap();
                    assert!(status.satellites_visible == 0 || status.satellites_visible == 2);
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    let status = monitor.status().unwrap();
    assert_eq!(status.satellites_visible, 2);
    assert_eq!(status.average_cn0_dbhz, 30.0);
    assert!(status.is_dual_frequency_supported);
}

#[test]
fn no_gnss_receiver() {
    init_logger();
    let (tx, rx) = channel::<Event>();
    let monitor = Monitor::new(FakeHardware::new(Capabilities::empty()), tx, Config::default())
        .unwrap();

    assert_eq!(
        monitor.start_listening(),
        Err(Error::HardwareUnavailable(HardwareError::NotSupported))
    );
    assert!(!monitor.is_listening());
    assert_eq!(monitor.hardware().registrations(), 0);
    assert!(drain(&rx).is_empty());

    // status remains available and reports the missing receiver
    let status = monitor.status().unwrap();
    assert!(!status.is_gnss_supported);
    assert_eq!(status.satellites_visible, 0);

    // permission is checked first
    monitor.hardware().deny_permission();
    assert_eq!(monitor.start_listening(), Err(Error::PermissionDenied));
}

#[test]
fn measurements_not_supported() {
    init_logger();
    let (tx, rx) = channel::<Event>();
    let hardware = FakeHardware::new(Capabilities::GNSS | Capabilities::CN0);
    let monitor = Monitor::new(hardware, tx, Config::default()).unwrap();
    monitor.start_listening().unwrap();

    monitor.on_measurements(epoch(0), &[1575.42E6, 1176.45E6]);
    monitor.on_satellite_status(epoch(0), &[raw_satellite(1, 3, Some(25.0), true)]);
    monitor.on_measurement_status(0);

    let status = monitor.status().unwrap();
    assert!(!status.supports_measurements);
    assert!(status.carrier_frequencies_mhz.is_empty());
    assert!(!status.is_dual_frequency_supported);
    assert_eq!(status.measurements_epoch, None);
    assert_eq!(status.satellites_visible, 1);
    assert_eq!(status.measurement_status, Some(MeasurementStatus::NotSupported));

    let events = drain(&rx);
    assert_eq!(events.len(), 3);
    assert!(events
        .iter()
        .all(|event| !matches!(event, Event::MeasurementsChanged(_))));
}

#[test]
fn coarse_tolerance_is_honored() {
    init_logger();
    for (coarse_tolerance, expected) in [(0.0, false), (10.0, true), (50.0, true)] {
        let (tx, rx) = channel::<Event>();
        let config = Config::default().with_coarse_tolerance(coarse_tolerance);
        let monitor = Monitor::new(FakeHardware::new(Capabilities::all()), tx, config).unwrap();
        monitor.start_listening().unwrap();

        // in between E5a and E5: not classified, coarsely secondary
        monitor.on_measurements(epoch(0), &[1185.0E6]);

        let status = monitor.status().unwrap();
        assert!(!status.is_dual_frequency_supported);
        assert_eq!(status.coarse_dual_frequency, expected, "tolerance {}", coarse_tolerance);

        match &drain(&rx)[1] {
            Event::MeasurementsChanged(event) => {
                assert_eq!(event.coarse_dual_frequency, expected, "tolerance {}", coarse_tolerance)
            },
            other => panic!("unexpected event {:?}", other),
        }
    }
}

#[test]
fn events_follow_snapshot_order() {
    init_logger();
    let (tx, rx) = channel::<Event>();
    let hardware = FakeHardware::new(Capabilities::all());
    let monitor = Arc::new(Monitor::new(hardware, tx, Config::default()).unwrap());
    monitor.start_listening().unwrap();

    let handles = (0..4_u64)
        .map(|n| {
            let monitor = Arc::clone(&monitor);
            thread::spawn(move || {
                for i in 0..100 {
                    monitor.on_satellite_status(
                        epoch(n * 1000 + i),
                        &[raw_satellite(1, n as i32 + 1, Some(30.0), true)],
                    );
                    monitor.on_measurements(epoch(n * 1000 + i), &[1575.42E6]);
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    let status = monitor.status().unwrap();
    let events = drain(&rx);
    assert_eq!(events.len(), 801);

    let last_satellites = events
        .iter()
        .filter_map(|event| match event {
            Event::SatelliteStatusChanged(event) => Some(event),
            _ => None,
        })
        .last()
        .unwrap();
    assert_eq!(Some(last_satellites.epoch), status.satellites_epoch);
    assert_eq!(last_satellites.satellites, status.satellites);

    let last_measurements = events
        .iter()
        .filter_map(|event| match event {
            Event::MeasurementsChanged(event) => Some(event),
            _ => None,
        })
        .last()
        .unwrap();
    assert_eq!(Some(last_measurements.epoch), status.measurements_epoch);
}
