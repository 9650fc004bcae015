//! Signal bands
use std::str::FromStr;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParsingError {
    /// Unable to parse Band from given string content
    #[error("unable to parse band from content \"{0}\"")]
    Unknown(String),
}

/// Signal band a carrier frequency is identified as.
/// Labels follow each constellation's own naming.
#[derive(Debug, Default, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Band {
    /// L1 (GPS, QZSS, SBAS, Glonass)
    L1,
    /// L2 (GPS, QZSS, Glonass)
    L2,
    /// L5 (GPS, QZSS, SBAS, NavIC, Glonass)
    L5,
    /// E1: GAL
    E1,
    /// E5a: GAL
    E5a,
    /// E5b: GAL
    E5b,
    /// E5: GAL E5a + E5b
    E5,
    /// E6: GAL
    E6,
    /// B1: BeiDou 1
    B1,
    /// B2a: BeiDou 2a
    B2a,
    /// B2: BeiDou 2
    B2,
    /// B3: BeiDou 3
    B3,
    /// LEX: QZSS
    LEX,
    /// S: NavIC
    S,
    /// Frequency we could not identify
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "UNKNOWN"))]
    Unknown,
}

impl Band {
    /// Returns the label reported to applications
    pub fn label(&self) -> &'static str {
        match self {
            Self::L1 => "L1",
            Self::L2 => "L2",
            Self::L5 => "L5",
            Self::E1 => "E1",
            Self::E5a => "E5a",
            Self::E5b => "E5b",
            Self::E5 => "E5",
            Self::E6 => "E6",
            Self::B1 => "B1",
            Self::B2a => "B2a",
            Self::B2 => "B2",
            Self::B3 => "B3",
            Self::LEX => "LEX",
            Self::S => "S",
            Self::Unknown => "UNKNOWN",
        }
    }
    /// Returns true if this band was identified
    pub fn is_known(&self) -> bool {
        *self != Self::Unknown
    }
}

impl std::fmt::Display for Band {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Band {
    type Err = ParsingError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L1" => Ok(Self::L1),
            "L2" => Ok(Self::L2),
            "L5" => Ok(Self::L5),
            "E1" => Ok(Self::E1),
            "E5a" | "E5A" => Ok(Self::E5a),
            "E5b" | "E5B" => Ok(Self::E5b),
            "E5" => Ok(Self::E5),
            "E6" => Ok(Self::E6),
            "B1" => Ok(Self::B1),
            "B2a" | "B2A" => Ok(Self::B2a),
            "B2" => Ok(Self::B2),
            "B3" => Ok(Self::B3),
            "LEX" | "L6" => Ok(Self::LEX),
            "S" => Ok(Self::S),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(ParsingError::Unknown(s.to_string())),
        }
    }
}
