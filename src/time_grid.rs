//! Night-restricted observation time grid.
//!
//! For every calendar day of a range, the builder locates the astronomical
//! night at the site (sun altitude below the darkness threshold) and emits
//! uniformly spaced UTC timestamps inside it. Twilight boundaries have no
//! closed form with a generic ephemeris, so they are found by a bounded
//! Brent search over sun altitude, bracketed between the local solar noon
//! and midnight extrema.

use std::cell::RefCell;

use hifitime::{Duration, Epoch};
use roots::{find_root_brent, SimpleConvergency};
use tracing::debug;

use crate::constants::{Degree, DEFAULT_DARKNESS_THRESHOLD, MJD, SECONDS_PER_DAY};
use crate::ephemeris::{Ephemeris, Target};
use crate::errors::NightwatchError;
use crate::site::Site;

/// Time-accuracy of the twilight boundary search, in days (~86 µs).
const TWILIGHT_EPS: f64 = 1e-9;

/// Iteration cap for the boundary search; Brent needs about 30 iterations at
/// [`TWILIGHT_EPS`] over a half-day bracket, pathological latitude/threshold
/// combinations terminate here instead of looping.
const TWILIGHT_MAX_ITER: usize = 100;

/// Parameters of one sampling grid.
///
/// `start`/`end` are calendar dates: the time-of-day component is ignored and
/// the range is half-open, so `start == end` spans zero days. Thresholds are
/// explicit configuration, never global state.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGridSpec {
    pub start: Epoch,
    pub end: Epoch,
    pub step: Duration,
    /// Restrict samples to astronomical night (the default). When false the
    /// whole range is sampled uniformly, for trajectory previews.
    pub night_only: bool,
    /// Sun altitude defining darkness, degrees.
    pub darkness_threshold: Degree,
}

impl TimeGridSpec {
    /// Night-only grid with the default −12° darkness threshold.
    pub fn new(start: Epoch, end: Epoch, step: Duration) -> Self {
        TimeGridSpec {
            start,
            end,
            step,
            night_only: true,
            darkness_threshold: DEFAULT_DARKNESS_THRESHOLD,
        }
    }

    /// Uniform grid over the full range, ignoring darkness.
    pub fn uniform(start: Epoch, end: Epoch, step: Duration) -> Self {
        TimeGridSpec {
            night_only: false,
            ..TimeGridSpec::new(start, end, step)
        }
    }

    pub fn with_darkness_threshold(mut self, threshold: Degree) -> Self {
        self.darkness_threshold = threshold;
        self
    }

    /// Build the ordered sample sequence for this spec.
    ///
    /// Arguments
    /// ---------------
    /// * `site`: the observing site the darkness predicate is evaluated at.
    /// * `ephemeris`: engine providing sun altitudes.
    ///
    /// Return
    /// ----------
    /// * Strictly increasing UTC epochs, each inside astronomical night when
    ///   `night_only` is set. Empty when no night occurs in the range (polar
    ///   day); that is not an error.
    ///
    /// Errors
    /// ----------
    /// * [`NightwatchError::InvalidDateRange`] when `end` is before `start`.
    /// * [`NightwatchError::InvalidTimeStep`] when `step` is not positive.
    /// * [`NightwatchError::TwilightSearch`] when the boundary search fails.
    /// * Ephemeris failures are propagated untouched.
    pub fn build(
        &self,
        site: &Site,
        ephemeris: &dyn Ephemeris,
    ) -> Result<Vec<Epoch>, NightwatchError> {
        if self.step <= Duration::ZERO {
            return Err(NightwatchError::InvalidTimeStep(self.step));
        }
        let start_day = floor_day(self.start);
        let end_day = floor_day(self.end);
        if end_day < start_day {
            return Err(NightwatchError::InvalidDateRange {
                start: self.start,
                end: self.end,
            });
        }

        if !self.night_only {
            let mut grid = Vec::new();
            emit_samples(&mut grid, start_day, end_day, self.step);
            return Ok(grid);
        }

        let sun_altitude = |mjd: MJD| -> Result<Degree, NightwatchError> {
            Ok(ephemeris
                .position(Epoch::from_mjd_utc(mjd), site, &Target::Sun)?
                .altitude)
        };

        let mut grid = Vec::new();
        let days = (end_day - start_day) as i64;
        for k in 0..days {
            // One "night" spans from a local solar noon to the next one, so it
            // is never split across two emitted chunks.
            let noon = start_day + k as f64 + 0.5 - site.signed_longitude() / 360.0;
            let midnight = noon + 0.5;
            let next_noon = noon + 1.0;

            let at_noon = sun_altitude(noon)? - self.darkness_threshold;
            let at_midnight = sun_altitude(midnight)? - self.darkness_threshold;

            let (night_start, night_end) = if at_midnight >= 0.0 {
                // Polar day: the sun never gets below the threshold.
                debug!(day = k, "no astronomical night, skipping day");
                continue;
            } else if at_noon < 0.0 {
                // Polar night: the whole solar day is dark.
                (noon, next_noon)
            } else {
                let dusk = self.twilight_crossing(noon, midnight, site, ephemeris)?;
                let dawn = self.twilight_crossing(midnight, next_noon, site, ephemeris)?;
                (dusk, dawn)
            };
            debug!(
                day = k,
                night_start_mjd = night_start,
                night_end_mjd = night_end,
                "resolved night interval"
            );

            emit_samples(&mut grid, night_start, night_end, self.step);
        }

        debug!(samples = grid.len(), days, "built night time grid");
        Ok(grid)
    }

    /// Locate the instant where the sun crosses the darkness threshold inside
    /// `[lo, hi]` (MJD). The bracket endpoints must have opposite signs, which
    /// the caller guarantees by seeding from the diurnal extrema.
    fn twilight_crossing(
        &self,
        lo: MJD,
        hi: MJD,
        site: &Site,
        ephemeris: &dyn Ephemeris,
    ) -> Result<MJD, NightwatchError> {
        // The root-search closure cannot propagate errors itself; the first
        // ephemeris failure is parked here and re-raised after the search.
        let failure: RefCell<Option<NightwatchError>> = RefCell::new(None);
        let f = |mjd: f64| -> f64 {
            match ephemeris.position(Epoch::from_mjd_utc(mjd), site, &Target::Sun) {
                Ok(pos) => pos.altitude - self.darkness_threshold,
                Err(err) => {
                    failure.borrow_mut().get_or_insert(err);
                    f64::NAN
                }
            }
        };

        let mut convergency = SimpleConvergency {
            eps: TWILIGHT_EPS,
            max_iter: TWILIGHT_MAX_ITER,
        };
        let root = find_root_brent(lo, hi, &f, &mut convergency);
        drop(f);

        if let Some(err) = failure.into_inner() {
            return Err(err);
        }
        Ok(root?)
    }
}

/// Calendar day of an epoch as an integral MJD. The conversion can land a
/// few nanoseconds below an exact midnight, so flooring is biased by ~86 µs.
fn floor_day(epoch: Epoch) -> MJD {
    (epoch.to_mjd_utc_days() + 1e-9).floor()
}

/// Append samples spaced `step` apart over `[start, end)` (MJD bounds).
///
/// The count is fixed up front from the interval length, so a step that
/// divides the interval exactly never emits a sample at the end instant, no
/// matter how the MJD/epoch conversions round.
fn emit_samples(grid: &mut Vec<Epoch>, start: MJD, end: MJD, step: Duration) {
    let total_seconds = (end - start) * SECONDS_PER_DAY;
    if total_seconds <= 0.0 {
        return;
    }
    let count = (total_seconds / step.to_seconds()).ceil() as u64;

    let mut t = Epoch::from_mjd_utc(start);
    for _ in 0..count {
        grid.push(t);
        t += step;
    }
}
