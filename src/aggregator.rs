//! Snapshot reductions: filtered views and statistics.
//! None of these modify the input snapshot.
use std::collections::BTreeMap;

use itertools::{Itertools, MinMaxResult};

use crate::{constants::GOOD_SIGNAL_CN0_DBHZ, constellation::Constellation, satellite::Satellite};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Summary of a satellite snapshot
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SatelliteStatistics {
    /// Total number of vehicles
    pub total: usize,
    /// Vehicles used in fix
    pub used_in_fix: usize,
    /// Vehicles with ephemeris
    pub with_ephemeris: usize,
    /// Vehicles with almanac
    pub with_almanac: usize,
    /// Vehicles with C/N0 above the good signal threshold
    pub with_good_signal: usize,
    /// Number of vehicles per constellation
    pub by_constellation: BTreeMap<Constellation, usize>,
    /// Mean C/N0 [dB-Hz], 0 when no vehicle reports C/N0
    pub average_signal_strength: f64,
    /// Strongest C/N0 [dB-Hz], 0 when no vehicle reports C/N0
    pub strongest_signal: f64,
    /// Weakest C/N0 [dB-Hz], 0 when no vehicle reports C/N0
    pub weakest_signal: f64,
}

/// Returns vehicles of given [Constellation]
pub fn filter_by_constellation(
    satellites: &[Satellite],
    constellation: Constellation,
) -> Vec<Satellite> {
    satellites
        .iter()
        .filter(|sat| sat.constellation == constellation)
        .copied()
        .collect()
}

/// Returns vehicles used in fix
pub fn filter_used_in_fix(satellites: &[Satellite]) -> Vec<Satellite> {
    satellites
        .iter()
        .filter(|sat| sat.used_in_fix)
        .copied()
        .collect()
}

/// Returns vehicles reporting C/N0 >= `min_cn0` [dB-Hz].
/// Vehicles not reporting C/N0 are always excluded.
pub fn filter_by_min_signal(satellites: &[Satellite], min_cn0: f64) -> Vec<Satellite> {
    satellites
        .iter()
        .filter(|sat| sat.cn0_dbhz.is_some_and(|cn0| cn0 >= min_cn0))
        .copied()
        .collect()
}

/// Buckets vehicles per [Constellation], preserving snapshot order
pub fn group_by_constellation(satellites: &[Satellite]) -> BTreeMap<Constellation, Vec<Satellite>> {
    let mut groups = BTreeMap::<Constellation, Vec<Satellite>>::new();
    for sat in satellites {
        groups.entry(sat.constellation).or_default().push(*sat);
    }
    groups
}

/// Returns the `n` strongest vehicles, by decreasing C/N0.
/// Vehicles not reporting C/N0 are excluded.
pub fn strongest(satellites: &[Satellite], n: usize) -> Vec<Satellite> {
    satellites
        .iter()
        .filter(|sat| sat.cn0_dbhz.is_some())
        .sorted_by(|a, b| {
            let (a, b) = (a.cn0_dbhz.unwrap_or_default(), b.cn0_dbhz.unwrap_or_default());
            b.total_cmp(&a)
        })
        .take(n)
        .copied()
        .collect()
}

/// Mean C/N0 [dB-Hz] over vehicles that report it.
/// Returns 0 when none does.
pub fn average_signal(satellites: &[Satellite]) -> f64 {
    let (sum, count) = satellites
        .iter()
        .filter_map(|sat| sat.cn0_dbhz)
        .fold((0.0_f64, 0_usize), |(sum, count), cn0| (sum + cn0, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Computes [SatelliteStatistics] with the default 20 dB-Hz
/// good signal threshold.
pub fn statistics(satellites: &[Satellite]) -> SatelliteStatistics {
    statistics_with_threshold(satellites, GOOD_SIGNAL_CN0_DBHZ)
}

/// Computes [SatelliteStatistics] with desired good signal threshold [dB-Hz].
pub fn statistics_with_threshold(satellites: &[Satellite], good_cn0: f64) -> SatelliteStatistics {
    let (weakest_signal, strongest_signal) = match satellites
        .iter()
        .filter_map(|sat| sat.cn0_dbhz)
        .minmax_by(|a, b| a.total_cmp(b))
    {
        MinMaxResult::NoElements => (0.0, 0.0),
        MinMaxResult::OneElement(cn0) => (cn0, cn0),
        MinMaxResult::MinMax(min, max) => (min, max),
    };

    let by_constellation = satellites
        .iter()
        .map(|sat| sat.constellation)
        .counts()
        .into_iter()
        .collect::<BTreeMap<_, _>>();

    SatelliteStatistics {
        total: satellites.len(),
        used_in_fix: satellites.iter().filter(|sat| sat.used_in_fix).count(),
        with_ephemeris: satellites.iter().filter(|sat| sat.has_ephemeris).count(),
        with_almanac: satellites.iter().filter(|sat| sat.has_almanac).count(),
        with_good_signal: filter_by_min_signal(satellites, good_cn0).len(),
        by_constellation,
        average_signal_strength: average_signal(satellites),
        strongest_signal,
        weakest_signal,
    }
}
