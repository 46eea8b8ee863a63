//! Per-sample visibility scoring.
//!
//! The score folds every observability condition into one bounded number:
//! hard gates (darkness, horizon clearance, moon below the horizon, moon
//! separation) zero it outright, then two continuous weights rank the
//! surviving samples by source altitude and residual moonlight.

use crate::constants::{Degree, DEFAULT_DARKNESS_THRESHOLD, DEFAULT_MIN_MOON_SEPARATION};
use crate::horizon::HorizonProfile;

/// Gated multiplicative scorer producing values in `[0, 1]`.
///
/// Thresholds are explicit per-instance configuration rather than process-wide
/// constants, so two scorers with different darkness or moon policies can
/// coexist in one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityScorer {
    /// Sun altitude below which the sky counts as dark (degrees).
    darkness_threshold: Degree,
    /// Minimum tolerated source-moon separation (degrees).
    min_moon_separation: Degree,
}

impl Default for VisibilityScorer {
    fn default() -> Self {
        VisibilityScorer {
            darkness_threshold: DEFAULT_DARKNESS_THRESHOLD,
            min_moon_separation: DEFAULT_MIN_MOON_SEPARATION,
        }
    }
}

impl VisibilityScorer {
    pub fn new(darkness_threshold: Degree, min_moon_separation: Degree) -> Self {
        VisibilityScorer {
            darkness_threshold,
            min_moon_separation,
        }
    }

    /// Score one source at one grid sample.
    ///
    /// Arguments
    /// ---------------
    /// * `source_altitude`, `source_azimuth`: topocentric source position (degrees).
    /// * `sun_altitude`: topocentric sun altitude (degrees).
    /// * `moon_altitude`: topocentric moon altitude (degrees).
    /// * `moon_phase`: illuminated lunar fraction in `[0, 1]`, 0 = new moon.
    /// * `moon_separation`: source-moon angular distance (degrees).
    /// * `horizon`: the site obstruction profile.
    ///
    /// Return
    /// ----------
    /// * Score in `[0, 1]`. Exactly 0 when any gate fails: sky not dark, source
    ///   behind the obstruction profile, moon up, or moon too close. Otherwise
    ///   `(1 - moon_phase) * cos(moon_altitude) * sin(source_altitude)`,
    ///   clamped non-negative.
    ///
    /// Pure and allocation-free: this runs once per (source, sample) pair.
    pub fn score(
        &self,
        source_altitude: Degree,
        source_azimuth: Degree,
        sun_altitude: Degree,
        moon_altitude: Degree,
        moon_phase: f64,
        moon_separation: Degree,
        horizon: &HorizonProfile,
    ) -> f64 {
        if sun_altitude >= self.darkness_threshold {
            return 0.0;
        }
        if !horizon.is_above(source_altitude, source_azimuth) {
            return 0.0;
        }
        if moon_altitude >= 0.0 {
            return 0.0;
        }
        if moon_separation <= self.min_moon_separation {
            return 0.0;
        }

        let moon_dimming = (1.0 - moon_phase) * moon_altitude.to_radians().cos();
        let altitude_weight = source_altitude.to_radians().sin();

        (moon_dimming * altitude_weight).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod scoring_test {
    use super::*;
    use crate::horizon::HorizonSample;
    use approx::assert_relative_eq;

    fn flat_horizon(altitude: Degree) -> HorizonProfile {
        HorizonProfile::new(&[
            HorizonSample {
                azimuth: 0.0,
                altitude,
            },
            HorizonSample {
                azimuth: 180.0,
                altitude,
            },
        ])
        .unwrap()
    }

    /// Inputs that pass every gate and give a comfortably positive score.
    fn favorable(horizon: &HorizonProfile, scorer: &VisibilityScorer) -> f64 {
        scorer.score(45.0, 180.0, -20.0, -5.0, 0.0, 90.0, horizon)
    }

    #[test]
    fn test_favorable_conditions_score() {
        let horizon = flat_horizon(10.0);
        let scorer = VisibilityScorer::default();
        let expected = 45.0_f64.to_radians().sin() * 5.0_f64.to_radians().cos();
        assert_relative_eq!(favorable(&horizon, &scorer), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_each_gate_zeroes_the_score() {
        let horizon = flat_horizon(10.0);
        let scorer = VisibilityScorer::default();
        assert!(favorable(&horizon, &scorer) > 0.5);

        // Darkness gate: sun at 0 degrees
        assert_eq!(
            scorer.score(45.0, 180.0, 0.0, -5.0, 0.0, 90.0, &horizon),
            0.0
        );
        // Darkness gate: sun exactly at the threshold is not dark
        assert_eq!(
            scorer.score(45.0, 180.0, -12.0, -5.0, 0.0, 90.0, &horizon),
            0.0
        );
        // Horizon gate: source below the tree line
        assert_eq!(
            scorer.score(5.0, 180.0, -20.0, -5.0, 0.0, 90.0, &horizon),
            0.0
        );
        // Moon-altitude gate: moon up
        assert_eq!(
            scorer.score(45.0, 180.0, -20.0, 30.0, 0.0, 90.0, &horizon),
            0.0
        );
        // Moon-separation gate: source hugging the moon
        assert_eq!(
            scorer.score(45.0, 180.0, -20.0, -5.0, 0.0, 5.0, &horizon),
            0.0
        );
        // Moon-separation gate: exactly at the minimum fails too
        assert_eq!(
            scorer.score(45.0, 180.0, -20.0, -5.0, 0.0, 10.0, &horizon),
            0.0
        );
    }

    #[test]
    fn test_full_moon_dims_to_zero() {
        let horizon = flat_horizon(0.0);
        let scorer = VisibilityScorer::default();
        let score = scorer.score(45.0, 180.0, -20.0, -5.0, 1.0, 90.0, &horizon);
        assert_eq!(score, 0.0);

        let half = scorer.score(45.0, 180.0, -20.0, -5.0, 0.5, 90.0, &horizon);
        let dark = scorer.score(45.0, 180.0, -20.0, -5.0, 0.0, 90.0, &horizon);
        assert!(half > 0.0 && half < dark);
    }

    #[test]
    fn test_monotone_in_source_altitude() {
        let horizon = flat_horizon(0.0);
        let scorer = VisibilityScorer::default();
        let mut last = -1.0;
        for alt in (1..=90).map(f64::from) {
            let score = scorer.score(alt, 180.0, -20.0, -5.0, 0.2, 90.0, &horizon);
            assert!(
                score >= last,
                "score decreased at altitude {alt}: {score} < {last}"
            );
            last = score;
        }
    }

    #[test]
    fn test_score_is_bounded() {
        let horizon = flat_horizon(-5.0);
        let scorer = VisibilityScorer::new(-6.0, 0.0);
        for alt in [-10.0, 0.1, 30.0, 89.9, 90.0] {
            for phase in [0.0, 0.3, 1.0] {
                let score = scorer.score(alt, 10.0, -7.0, -40.0, phase, 50.0, &horizon);
                assert!((0.0..=1.0).contains(&score), "score out of bounds: {score}");
            }
        }
    }

    #[test]
    fn test_custom_thresholds() {
        let horizon = flat_horizon(0.0);
        // A permissive scorer: civil darkness, no moon-distance requirement.
        let scorer = VisibilityScorer::new(-6.0, 0.0);
        assert!(scorer.score(45.0, 180.0, -7.0, -5.0, 0.0, 1.0, &horizon) > 0.0);

        // A strict one refuses the same sky.
        let strict = VisibilityScorer::new(-18.0, 30.0);
        assert_eq!(strict.score(45.0, 180.0, -7.0, -5.0, 0.0, 1.0, &horizon), 0.0);
    }
}
