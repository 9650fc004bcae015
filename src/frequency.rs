//! Carrier frequency classification and dual frequency capability.
//!
//! Classification is a linear scan of [FREQUENCY_BANDS]: first match wins.
//! Several constellations share the same nominal carrier (1575.42 MHz is
//! GPS L1, Galileo E1, QZSS L1 and SBAS L1), so a bare frequency resolves
//! to the first entry in table order. When the emitting constellation is known,
//! use [Classifier::classify_for] to prefer that constellation's entries.
use crate::{band::Band, constants::*, constellation::Constellation};
use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Carrier description of a [FrequencyBand]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Nominal {
    /// Single carrier frequency [MHz]
    Single(f64),
    /// Frequency division bands (Glonass FDMA) spread
    /// over several channels [MHz]
    Range { min: f64, max: f64 },
}

/// Static description of a signal band
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FrequencyBand {
    /// Carrier frequency or FDMA range
    pub nominal: Nominal,
    /// Constellation transmitting this band
    pub constellation: Constellation,
    /// Band label
    pub band: Band,
    /// True for secondary bands: tracking them next to
    /// the primary band means multi frequency capability.
    pub dual_frequency: bool,
}

impl FrequencyBand {
    const fn single(
        frequency: f64,
        constellation: Constellation,
        band: Band,
        dual_frequency: bool,
    ) -> Self {
        Self {
            nominal: Nominal::Single(frequency),
            constellation,
            band,
            dual_frequency,
        }
    }
    const fn range(
        min: f64,
        max: f64,
        constellation: Constellation,
        band: Band,
        dual_frequency: bool,
    ) -> Self {
        Self {
            nominal: Nominal::Range { min, max },
            constellation,
            band,
            dual_frequency,
        }
    }
    /// Returns true if given frequency [MHz] belongs to this band,
    /// within given tolerance [MHz].
    pub fn matches(&self, frequency_mhz: f64, tolerance: f64) -> bool {
        match self.nominal {
            Nominal::Single(nominal) => (frequency_mhz - nominal).abs() <= tolerance,
            Nominal::Range { min, max } => {
                frequency_mhz >= min - tolerance && frequency_mhz <= max + tolerance
            },
        }
    }
    /// Returns the central frequency of this band [MHz]
    pub fn center_mhz(&self) -> f64 {
        match self.nominal {
            Nominal::Single(nominal) => nominal,
            Nominal::Range { min, max } => (min + max) / 2.0,
        }
    }
    /// Returns the carrier wavelength at band center [m]
    pub fn wavelength_m(&self) -> f64 {
        SPEED_OF_LIGHT_M_S / (self.center_mhz() * HZ_PER_MHZ)
    }
}

/// Known signal bands. Table order is the tie break priority
/// when a frequency is shared by several constellations.
pub const FREQUENCY_BANDS: [FrequencyBand; 23] = [
    // GPS
    FrequencyBand::single(L1_MHZ, Constellation::GPS, Band::L1, false),
    FrequencyBand::single(L2_MHZ, Constellation::GPS, Band::L2, true),
    FrequencyBand::single(L5_MHZ, Constellation::GPS, Band::L5, true),
    // Glonass
    FrequencyBand::range(
        GLONASS_L1_MIN_MHZ,
        GLONASS_L1_MAX_MHZ,
        Constellation::Glonass,
        Band::L1,
        false,
    ),
    FrequencyBand::range(
        GLONASS_L2_MIN_MHZ,
        GLONASS_L2_MAX_MHZ,
        Constellation::Glonass,
        Band::L2,
        true,
    ),
    FrequencyBand::single(L5_MHZ, Constellation::Glonass, Band::L5, true),
    // Galileo
    FrequencyBand::single(L1_MHZ, Constellation::Galileo, Band::E1, false),
    FrequencyBand::single(L5_MHZ, Constellation::Galileo, Band::E5a, true),
    FrequencyBand::single(E5B_MHZ, Constellation::Galileo, Band::E5b, true),
    FrequencyBand::single(E5_MHZ, Constellation::Galileo, Band::E5, true),
    FrequencyBand::single(E6_MHZ, Constellation::Galileo, Band::E6, true),
    // BeiDou
    FrequencyBand::single(B1_MHZ, Constellation::BeiDou, Band::B1, false),
    FrequencyBand::single(L5_MHZ, Constellation::BeiDou, Band::B2a, true),
    FrequencyBand::single(E5B_MHZ, Constellation::BeiDou, Band::B2, true),
    FrequencyBand::single(B3_MHZ, Constellation::BeiDou, Band::B3, true),
    // QZSS
    FrequencyBand::single(L1_MHZ, Constellation::QZSS, Band::L1, false),
    FrequencyBand::single(L2_MHZ, Constellation::QZSS, Band::L2, true),
    FrequencyBand::single(L5_MHZ, Constellation::QZSS, Band::L5, true),
    FrequencyBand::single(E6_MHZ, Constellation::QZSS, Band::LEX, true),
    // NavIC
    FrequencyBand::single(L5_MHZ, Constellation::IRNSS, Band::L5, true),
    FrequencyBand::single(S_MHZ, Constellation::IRNSS, Band::S, true),
    // SBAS
    FrequencyBand::single(L1_MHZ, Constellation::SBAS, Band::L1, false),
    FrequencyBand::single(L5_MHZ, Constellation::SBAS, Band::L5, true),
];

lazy_static! {
    /// Flat list of secondary band centers, used by the coarse check
    pub static ref DUAL_FREQUENCY_NOMINALS: Vec<f64> = FREQUENCY_BANDS
        .iter()
        .filter(|entry| entry.dual_frequency)
        .map(|entry| entry.center_mhz())
        .unique_by(|f| f.to_bits())
        .collect();
}

/// Classification result for one observed frequency
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BandMatch {
    /// Observed frequency [MHz]
    pub frequency_mhz: f64,
    /// Matched constellation, [Constellation::Unknown] when unidentified
    pub constellation: Constellation,
    /// Matched band, [Band::Unknown] when unidentified
    pub band: Band,
    /// Dual frequency flag of the matched band
    pub dual_frequency: bool,
}

impl BandMatch {
    fn unknown(frequency_mhz: f64) -> Self {
        Self {
            frequency_mhz,
            constellation: Constellation::Unknown,
            band: Band::Unknown,
            dual_frequency: false,
        }
    }
    fn from_entry(frequency_mhz: f64, entry: &FrequencyBand) -> Self {
        Self {
            frequency_mhz,
            constellation: entry.constellation,
            band: entry.band,
            dual_frequency: entry.dual_frequency,
        }
    }
    /// Returns true if the frequency was identified
    pub fn is_known(&self) -> bool {
        self.band.is_known()
    }
}

/// [Classifier] identifies carrier frequencies against [FREQUENCY_BANDS].
/// Classification never fails: unidentified frequencies
/// resolve to an unknown [BandMatch].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classifier {
    /// Matching tolerance [MHz]
    pub tolerance: f64,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOLERANCE_MHZ)
    }
}

impl Classifier {
    /// Builds a [Classifier] with desired tolerance [MHz]
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }
    /// Classifies a bare frequency [MHz], first table match wins.
    /// ```
    /// use gnss_status::prelude::*;
    ///
    /// let classifier = Classifier::default();
    /// let l5 = classifier.classify(1176.45);
    /// assert_eq!(l5.constellation, Constellation::GPS);
    /// assert_eq!(l5.band, Band::L5);
    /// assert!(l5.dual_frequency);
    ///
    /// let unknown = classifier.classify(9999.0);
    /// assert_eq!(unknown.band, Band::Unknown);
    /// ```
    pub fn classify(&self, frequency_mhz: f64) -> BandMatch {
        FREQUENCY_BANDS
            .iter()
            .find(|entry| entry.matches(frequency_mhz, self.tolerance))
            .map(|entry| BandMatch::from_entry(frequency_mhz, entry))
            .unwrap_or_else(|| BandMatch::unknown(frequency_mhz))
    }
    /// Classifies a frequency [MHz] emitted by a known constellation.
    /// Entries of that constellation are scanned first, then we fall back
    /// to the table order, like [Self::classify].
    pub fn classify_for(&self, frequency_mhz: f64, constellation: Constellation) -> BandMatch {
        FREQUENCY_BANDS
            .iter()
            .filter(|entry| entry.constellation == constellation)
            .find(|entry| entry.matches(frequency_mhz, self.tolerance))
            .map(|entry| BandMatch::from_entry(frequency_mhz, entry))
            .unwrap_or_else(|| self.classify(frequency_mhz))
    }
    /// Returns true if at least one frequency [MHz] is a secondary band.
    /// Returns false on empty list.
    pub fn is_dual_frequency_supported(&self, frequencies_mhz: &[f64]) -> bool {
        frequencies_mhz
            .iter()
            .any(|f| self.classify(*f).dual_frequency)
    }
    /// Classifies all frequencies [MHz], preserving order and duplicates.
    pub fn band_info_for_all(&self, frequencies_mhz: &[f64]) -> Vec<BandMatch> {
        frequencies_mhz.iter().map(|f| self.classify(*f)).collect()
    }
}

/// Classifies a bare frequency [MHz] with default 1 MHz tolerance.
pub fn classify(frequency_mhz: f64) -> BandMatch {
    Classifier::default().classify(frequency_mhz)
}

/// Returns true if at least one frequency [MHz] is a secondary band,
/// with default 1 MHz tolerance.
pub fn is_dual_frequency_supported(frequencies_mhz: &[f64]) -> bool {
    Classifier::default().is_dual_frequency_supported(frequencies_mhz)
}

/// Classifies all frequencies [MHz] with default 1 MHz tolerance,
/// preserving order and duplicates.
pub fn band_info_for_all(frequencies_mhz: &[f64]) -> Vec<BandMatch> {
    Classifier::default().band_info_for_all(frequencies_mhz)
}

/// Coarse dual frequency check: compares frequencies [MHz] to
/// [DUAL_FREQUENCY_NOMINALS] without classification.
/// Typically used with [COARSE_TOLERANCE_MHZ]. Agrees with
/// [is_dual_frequency_supported] within 1 MHz of any band, but may report
/// frequencies that lie in between bands as secondary.
pub fn is_dual_frequency_nominal(frequencies_mhz: &[f64], tolerance: f64) -> bool {
    frequencies_mhz.iter().any(|f| {
        DUAL_FREQUENCY_NOMINALS
            .iter()
            .any(|nominal| (f - nominal).abs() <= tolerance)
    })
}
