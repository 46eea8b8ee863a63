use hifitime::{Epoch, Unit};
use itertools::Itertools;

use nightwatch::{AnalyticEphemeris, Ephemeris, Site, Target, TimeGridSpec};

#[test]
fn test_summer_night_grid_near_krakow() {
    let site = Site::new(50.0, 20.0, 200.0).unwrap();
    let ephemeris = AnalyticEphemeris::new();

    let spec = TimeGridSpec::new(
        Epoch::from_gregorian_utc_at_midnight(2018, 6, 26),
        Epoch::from_gregorian_utc_at_midnight(2018, 6, 27),
        Unit::Minute * 10,
    );
    let grid = spec.build(&site, &ephemeris).unwrap();

    // Short midsummer night at 50N, but the sun does dip below -12 degrees.
    assert!(!grid.is_empty(), "expected a non-empty midsummer night grid");
    assert!(grid.len() < 60, "night unexpectedly long: {} samples", grid.len());

    for (a, b) in grid.iter().tuple_windows() {
        assert!(a < b, "grid not strictly increasing: {a} >= {b}");
    }

    for &epoch in &grid {
        let sun = ephemeris.position(epoch, &site, &Target::Sun).unwrap();
        assert!(
            sun.altitude < -12.0 + 1e-5,
            "sample at {epoch} outside darkness: sun altitude {}",
            sun.altitude
        );
    }
}

#[test]
fn test_far_north_summer_has_no_night() {
    let site = Site::new(69.0, 18.9, 10.0).unwrap();
    let ephemeris = AnalyticEphemeris::new();

    let spec = TimeGridSpec::new(
        Epoch::from_gregorian_utc_at_midnight(2018, 6, 20),
        Epoch::from_gregorian_utc_at_midnight(2018, 6, 23),
        Unit::Minute * 1,
    );
    let grid = spec.build(&site, &ephemeris).unwrap();
    assert!(grid.is_empty(), "midnight sun should leave no dark samples");
}

#[test]
fn test_zero_day_range_far_north() {
    let site = Site::new(69.0, 18.9, 10.0).unwrap();
    let ephemeris = AnalyticEphemeris::new();

    let start = Epoch::from_gregorian_utc_at_midnight(2018, 6, 21);
    let spec = TimeGridSpec::new(start, start, Unit::Second * 60);
    let grid = spec.build(&site, &ephemeris).unwrap();
    assert!(grid.is_empty());
}

#[test]
fn test_winter_night_is_much_longer_than_summer() {
    let site = Site::new(50.0, 20.0, 200.0).unwrap();
    let ephemeris = AnalyticEphemeris::new();
    let step = Unit::Minute * 10;

    let summer = TimeGridSpec::new(
        Epoch::from_gregorian_utc_at_midnight(2018, 6, 26),
        Epoch::from_gregorian_utc_at_midnight(2018, 6, 27),
        step,
    )
    .build(&site, &ephemeris)
    .unwrap();

    let winter = TimeGridSpec::new(
        Epoch::from_gregorian_utc_at_midnight(2018, 12, 20),
        Epoch::from_gregorian_utc_at_midnight(2018, 12, 21),
        step,
    )
    .build(&site, &ephemeris)
    .unwrap();

    assert!(
        winter.len() > 2 * summer.len(),
        "winter {} vs summer {}",
        winter.len(),
        summer.len()
    );
}
