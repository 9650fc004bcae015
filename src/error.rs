use thiserror::Error;

/// Errors reported by the [crate::monitor::Hardware] collaborator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HardwareError {
    /// GNSS hardware is not present on this device
    #[error("gnss hardware not supported")]
    NotSupported,
    /// Status or measurement callbacks could not be registered
    #[error("failed to register gnss callbacks: {0}")]
    RegistrationFailed(String),
    /// Status or measurement callbacks could not be unregistered
    #[error("failed to unregister gnss callbacks: {0}")]
    UnregistrationFailed(String),
}

/// Malformed snapshot push. The push is dropped
/// and the previous snapshot is retained.
/// Logged by the [crate::monitor::Monitor], never returned to the application.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProcessingError {
    #[error("invalid vehicle identifier {0}")]
    InvalidSvid(i32),
    #[error("invalid carrier frequency {0} Hz")]
    InvalidFrequency(f64),
    #[error("sv {svid}: invalid C/N0 {value} dB-Hz")]
    InvalidSignal { svid: u16, value: f64 },
    #[error("sv {svid}: invalid elevation {value}°")]
    InvalidElevation { svid: u16, value: f64 },
    #[error("sv {svid}: invalid azimuth {value}°")]
    InvalidAzimuth { svid: u16, value: f64 },
    #[error("sv {svid}: invalid carrier frequency {value} Hz")]
    InvalidCarrierFrequency { svid: u16, value: f64 },
}

/// Invalid [crate::config::Config]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid tolerance {0} MHz")]
    InvalidTolerance(f64),
    #[error("invalid C/N0 threshold {0} dB-Hz")]
    InvalidThreshold(f64),
}

/// Errors surfaced to the application
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Location access has not been granted
    #[error("location permission denied")]
    PermissionDenied,
    /// Hardware registration failure
    #[error("hardware unavailable: {0}")]
    HardwareUnavailable(#[from] HardwareError),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
