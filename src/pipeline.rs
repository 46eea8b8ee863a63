//! Full visibility pipeline.
//!
//! Ties the components together along the data flow: time grid → per-epoch
//! sky conditions → per-source positions and scores → report. The grid and
//! the sun/moon series are computed once and shared read-only across all
//! sources, which keeps the sampling identical for every source and makes
//! the per-source loop trivially parallelizable by a caller.

use hifitime::Epoch;
use tracing::debug;

use crate::catalog::Source;
use crate::constants::Degree;
use crate::ephemeris::{separation, Ephemeris, HorizontalCoord, Target};
use crate::errors::NightwatchError;
use crate::horizon::HorizonProfile;
use crate::report::VisibilityReport;
use crate::scoring::VisibilityScorer;
use crate::site::Site;

/// Sun, moon and phase state at one grid sample, shared by all sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyConditions {
    pub sun_altitude: Degree,
    pub moon: HorizontalCoord,
    pub moon_phase: f64,
}

/// Evaluate the per-epoch sky conditions for a whole grid.
///
/// Arguments
/// ---------------
/// * `grid`: night time grid (one entry per sample).
/// * `site`: the observing site.
/// * `ephemeris`: position/phase provider.
///
/// Return
/// ----------
/// * One [`SkyConditions`] per grid sample, in grid order.
pub fn sky_conditions(
    grid: &[Epoch],
    site: &Site,
    ephemeris: &dyn Ephemeris,
) -> Result<Vec<SkyConditions>, NightwatchError> {
    grid.iter()
        .map(|&epoch| {
            Ok(SkyConditions {
                sun_altitude: ephemeris.position(epoch, site, &Target::Sun)?.altitude,
                moon: ephemeris.position(epoch, site, &Target::Moon)?,
                moon_phase: ephemeris.moon_phase(epoch)?,
            })
        })
        .collect()
}

/// Score every source over every grid sample and collect the report.
///
/// Sources are processed independently against shared read-only inputs, in
/// catalog order. If the ephemeris fails partway through, the error is
/// propagated; series appended for earlier sources remain valid and callers
/// collecting per-source results independently may still use them.
///
/// Arguments
/// ---------------
/// * `sources`: catalog of candidate targets.
/// * `site`: the observing site.
/// * `horizon`: obstruction profile, built once for the run.
/// * `grid`: night time grid shared by all sources.
/// * `ephemeris`: position/phase provider.
/// * `scorer`: gating and weighting configuration.
///
/// Return
/// ----------
/// * A [`VisibilityReport`] with one ordered series per source.
pub fn observe_sources(
    sources: &[Source],
    site: &Site,
    horizon: &HorizonProfile,
    grid: &[Epoch],
    ephemeris: &dyn Ephemeris,
    scorer: &VisibilityScorer,
) -> Result<VisibilityReport, NightwatchError> {
    let sky = sky_conditions(grid, site, ephemeris)?;

    let mut report = VisibilityReport::new();
    for source in sources {
        let target = Target::Equatorial {
            ra: source.ra,
            dec: source.dec,
        };
        for (&epoch, conditions) in grid.iter().zip(&sky) {
            let position = ephemeris.position(epoch, site, &target)?;
            let moon_separation = separation(&position, &conditions.moon);
            let score = scorer.score(
                position.altitude,
                position.azimuth,
                conditions.sun_altitude,
                conditions.moon.altitude,
                conditions.moon_phase,
                moon_separation,
                horizon,
            );
            report.append(&source.name, epoch, position.altitude, position.azimuth, score);
        }
        debug!(source = %source.name, samples = grid.len(), "scored source");
    }
    Ok(report)
}
