//! Site horizon obstruction profile.
//!
//! Ground sites rarely see down to the mathematical horizon: tree lines,
//! ridges and buildings block the sky up to some altitude that varies with
//! azimuth. The profile is measured as sparse `(azimuth, altitude)` samples
//! and interpolated here into a continuous periodic function. It is built once
//! per run and shared by reference across every scoring call.

use itertools::Itertools;
use serde::Deserialize;

use crate::constants::Degree;
use crate::errors::NightwatchError;

/// One measured obstruction point of the site surroundings.
///
/// `azimuth` is taken modulo 360°; `altitude` is the highest obstructed
/// altitude in that direction (zero or negative means open sky down to the
/// horizon there).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HorizonSample {
    pub azimuth: Degree,
    pub altitude: Degree,
}

/// Continuous obstruction-altitude function over the full azimuth circle.
///
/// Piecewise-linear between angle-ordered samples, with the azimuth axis
/// wrapped so that queries near the 0°/360° seam interpolate across it.
/// Invariant: [`limit_at`](HorizonProfile::limit_at) evaluates identically at
/// `az` and `az + 360°`.
#[derive(Debug, Clone, PartialEq)]
pub struct HorizonProfile {
    /// Sample azimuths sorted ascending, with the last sample duplicated at
    /// `az - 360` in front and the first duplicated at `az + 360` at the back.
    azimuths: Vec<Degree>,
    altitudes: Vec<Degree>,
}

impl HorizonProfile {
    /// Build the interpolated profile from sparse obstruction samples.
    ///
    /// Arguments
    /// ---------------
    /// * `samples`: unordered measured points, at least 2 of them.
    ///
    /// Return
    /// ----------
    /// * The profile, or [`NightwatchError::DegenerateHorizonProfile`] when
    ///   fewer than 2 samples are supplied (a single point cannot describe a
    ///   direction-dependent obstruction).
    pub fn new(samples: &[HorizonSample]) -> Result<HorizonProfile, NightwatchError> {
        if samples.len() < 2 {
            return Err(NightwatchError::DegenerateHorizonProfile(samples.len()));
        }

        let ordered: Vec<(Degree, Degree)> = samples
            .iter()
            .map(|s| (s.azimuth.rem_euclid(360.0), s.altitude))
            .sorted_by(|a, b| a.0.total_cmp(&b.0))
            .collect();

        let n = ordered.len();
        let mut azimuths = Vec::with_capacity(n + 2);
        let mut altitudes = Vec::with_capacity(n + 2);

        // Wrap the circular axis: the segment between the last and first
        // samples must be reachable from both sides of the seam.
        azimuths.push(ordered[n - 1].0 - 360.0);
        altitudes.push(ordered[n - 1].1);
        for &(az, alt) in &ordered {
            azimuths.push(az);
            altitudes.push(alt);
        }
        azimuths.push(ordered[0].0 + 360.0);
        altitudes.push(ordered[0].1);

        Ok(HorizonProfile {
            azimuths,
            altitudes,
        })
    }

    /// Interpolated obstruction altitude in the given direction, degrees.
    pub fn limit_at(&self, azimuth: Degree) -> Degree {
        let az = azimuth.rem_euclid(360.0);

        // az lies in [0, 360), the wrapped endpoints sit strictly outside
        // that range, so i is always a valid interior segment index.
        let i = self.azimuths.partition_point(|&a| a <= az);
        let (az0, az1) = (self.azimuths[i - 1], self.azimuths[i]);
        let (alt0, alt1) = (self.altitudes[i - 1], self.altitudes[i]);

        if az1 == az0 {
            return alt0;
        }
        alt0 + (alt1 - alt0) * (az - az0) / (az1 - az0)
    }

    /// Whether a direction at `altitude`/`azimuth` clears the obstruction.
    ///
    /// True iff `altitude` strictly exceeds the interpolated obstruction
    /// altitude. Directions where the profile sits at or below 0° are clear
    /// for any position above the horizon.
    pub fn is_above(&self, altitude: Degree, azimuth: Degree) -> bool {
        altitude > self.limit_at(azimuth)
    }
}
