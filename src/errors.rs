use hifitime::{Duration, Epoch};
use thiserror::Error;

/// Errors produced by the nightwatch pipeline.
///
/// All variants are fatal to the run that produced them: the computation is
/// deterministic, so retrying with unchanged inputs would reproduce the same
/// failure. Retry policy, if any, belongs to the caller.
#[derive(Error, Debug)]
pub enum NightwatchError {
    #[error("Invalid date range: end {end} is before start {start}")]
    InvalidDateRange { start: Epoch, end: Epoch },

    #[error("Invalid sampling step: {0} (must be strictly positive)")]
    InvalidTimeStep(Duration),

    #[error("Degenerate horizon profile: got {0} samples, at least 2 required")]
    DegenerateHorizonProfile(usize),

    #[error("Ephemeris could not resolve a position: {0}")]
    EphemerisUnavailable(String),

    #[error("Twilight boundary search failed: {0}")]
    TwilightSearch(#[from] roots::SearchError),

    #[error("Invalid site coordinates: {0}")]
    InvalidSite(String),

    #[error("Malformed catalog data: {0}")]
    CatalogFormat(#[from] csv::Error),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),
}

impl PartialEq for NightwatchError {
    fn eq(&self, other: &Self) -> bool {
        use NightwatchError::*;
        match (self, other) {
            (
                InvalidDateRange { start: a, end: b },
                InvalidDateRange { start: c, end: d },
            ) => a == c && b == d,
            (InvalidTimeStep(a), InvalidTimeStep(b)) => a == b,
            (DegenerateHorizonProfile(a), DegenerateHorizonProfile(b)) => a == b,
            (EphemerisUnavailable(a), EphemerisUnavailable(b)) => a == b,
            (InvalidSite(a), InvalidSite(b)) => a == b,

            // Underlying errors are not comparable: equal if same variant
            (TwilightSearch(_), TwilightSearch(_)) => true,
            (CatalogFormat(_), CatalogFormat(_)) => true,
            (IoError(_), IoError(_)) => true,

            _ => false,
        }
    }
}
