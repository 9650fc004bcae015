//! Platform capabilities
use bitflags::bitflags;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

bitflags! {
    /// What the platform can report. Probed once, when the
    /// [crate::monitor::Monitor] is built.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct Capabilities: u8 {
        /// GNSS receiver is present
        const GNSS = 0x01;
        /// C/N0 is reported per satellite
        const CN0 = 0x02;
        /// Carrier frequency is reported per satellite
        const CARRIER_FREQUENCY = 0x04;
        /// Raw measurements are reported
        const MEASUREMENTS = 0x08;
    }
}

impl Capabilities {
    /// Returns true if a GNSS receiver is present
    pub fn gnss(&self) -> bool {
        self.contains(Self::GNSS)
    }
    /// Returns true if C/N0 is reported
    pub fn cn0(&self) -> bool {
        self.contains(Self::CN0)
    }
    /// Returns true if carrier frequencies are reported
    pub fn carrier_frequency(&self) -> bool {
        self.contains(Self::CARRIER_FREQUENCY)
    }
    /// Returns true if raw measurements are reported
    pub fn measurements(&self) -> bool {
        self.contains(Self::MEASUREMENTS)
    }
}
