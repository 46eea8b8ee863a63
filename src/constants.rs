//! # Constants and type definitions for nightwatch
//!
//! This module centralizes the **physical constants**, **conversion factors**, and **common type
//! definitions** used throughout the `nightwatch` library.
//!
//! ## Overview
//!
//! - Time and angle constants shared by the ephemeris and grid modules
//! - Unit type aliases used across the crate
//! - Default observability thresholds
//!
//! The thresholds are defaults only: they are carried as explicit configuration on
//! [`VisibilityScorer`](crate::scoring::VisibilityScorer) and
//! [`TimeGridSpec`](crate::time_grid::TimeGridSpec), never read as process-wide state.

// -------------------------------------------------------------------------------------------------
// Physical constants and unit conversions
// -------------------------------------------------------------------------------------------------

/// 2π, useful for trigonometric conversions
pub const DPI: f64 = 2. * std::f64::consts::PI;

/// Number of seconds in a Julian day
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// MJD epoch of J2000.0 (2000-01-01 12:00:00 TT)
pub const T2000: f64 = 51544.5;

/// Number of days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36525.0;

// -------------------------------------------------------------------------------------------------
// Type aliases
// -------------------------------------------------------------------------------------------------

/// Angle in degrees
pub type Degree = f64;
/// Angle in radians
pub type Radian = f64;
/// Distance in meters
pub type Meter = f64;
/// Modified Julian Date (days)
pub type MJD = f64;

// -------------------------------------------------------------------------------------------------
// Default observability thresholds
// -------------------------------------------------------------------------------------------------

/// Sun altitude below which astronomical darkness is assumed (degrees).
pub const DEFAULT_DARKNESS_THRESHOLD: Degree = -12.0;

/// Minimum angular separation from the moon for a source to stay observable (degrees).
pub const DEFAULT_MIN_MOON_SEPARATION: Degree = 10.0;
