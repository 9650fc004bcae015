//! GNSS constellations
use num_traits::FromPrimitive;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Constellation parsing & identification related errors
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParsingError {
    #[error("unknown constellation \"{0}\"")]
    Unknown(String),
}

/// Describes all `GNSS` constellations a receiver may report.
/// The discriminant is the type code used by the host platform.
#[derive(
    Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, EnumIter,
)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum Constellation {
    /// Vehicle of unknown origin
    #[default]
    Unknown = 0,
    /// `GPS` american constellation
    GPS = 1,
    /// Augmentation systems (WAAS, EGNOS, MSAS, GAGAN..)
    SBAS = 2,
    /// `Glonass` russian constellation
    Glonass = 3,
    /// `QZSS` japanese constellation
    QZSS = 4,
    /// `BeiDou` chinese constellation
    BeiDou = 5,
    /// `Galileo` european constellation
    Galileo = 6,
    /// `IRNSS` constellation, renamed "NavIC"
    IRNSS = 7,
}

impl std::fmt::Display for Constellation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Constellation {
    /// Identifies a [Constellation] from the host type code.
    /// Codes we do not know of resolve to [Constellation::Unknown].
    /// ```
    /// use gnss_status::prelude::Constellation;
    ///
    /// assert_eq!(Constellation::from_code(3), Constellation::Glonass);
    /// assert_eq!(Constellation::from_code(42), Constellation::Unknown);
    /// ```
    pub fn from_code(code: i32) -> Self {
        Self::from_i32(code).unwrap_or_default()
    }
    /// Returns the host type code
    pub fn code(&self) -> u8 {
        *self as u8
    }
    /// Returns the name reported to applications
    pub fn name(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::GPS => "GPS",
            Self::SBAS => "SBAS",
            Self::Glonass => "GLONASS",
            Self::QZSS => "QZSS",
            Self::BeiDou => "BEIDOU",
            Self::Galileo => "GALILEO",
            Self::IRNSS => "IRNSS",
        }
    }
    /// Returns true if Self is the indian regional system
    pub fn is_navic(&self) -> bool {
        *self == Self::IRNSS
    }
    /// Returns true if Self is an augmentation system
    pub fn is_sbas(&self) -> bool {
        *self == Self::SBAS
    }
}

impl std::str::FromStr for Constellation {
    type Err = ParsingError;
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let s = string.trim().to_lowercase();
        match s.as_str() {
            "g" | "gps" => Ok(Self::GPS),
            "c" | "bds" | "beidou" => Ok(Self::BeiDou),
            "e" | "gal" | "galileo" => Ok(Self::Galileo),
            "r" | "glo" | "glonass" => Ok(Self::Glonass),
            "j" | "qzss" => Ok(Self::QZSS),
            "i" | "irnss" | "navic" => Ok(Self::IRNSS),
            "s" | "sbas" => Ok(Self::SBAS),
            "unknown" => Ok(Self::Unknown),
            _ if s.contains("navic") | s.contains("irnss") => Ok(Self::IRNSS),
            _ if s.contains("sbas") => Ok(Self::SBAS),
            _ => Err(ParsingError::Unknown(string.to_string())),
        }
    }
}

/// Returns the type code to name mapping, sorted by code.
/// ```
/// use gnss_status::constellation::constellation_codes;
///
/// let codes = constellation_codes();
/// assert_eq!(codes.len(), 8);
/// assert_eq!(codes[0], (0, "UNKNOWN"));
/// assert_eq!(codes[7], (7, "IRNSS"));
/// ```
pub fn constellation_codes() -> Vec<(u8, &'static str)> {
    Constellation::iter().map(|c| (c.code(), c.name())).collect()
}
