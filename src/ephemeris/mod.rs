//! # Ephemeris capability
//!
//! The visibility pipeline never computes celestial mechanics inline: it asks an
//! [`Ephemeris`] for topocentric sun/moon/source positions, the lunar illuminated
//! fraction and angular separations. Any conforming engine may be substituted —
//! tests use fixed stubs, production code uses the built-in
//! [`AnalyticEphemeris`](crate::ephemeris::analytic::AnalyticEphemeris).
//!
//! ## Conventions
//!
//! - Altitude: degrees above the local horizon, negative below.
//! - Azimuth: degrees from North, increasing eastwards, in `[0, 360)`.
//! - Moon phase: illuminated disk fraction in `[0, 1]`, 0 = new moon.

pub mod analytic;

pub use analytic::AnalyticEphemeris;

use hifitime::Epoch;
use nalgebra::Vector3;

use crate::constants::Degree;
use crate::errors::NightwatchError;
use crate::site::Site;

/// Body or fixed direction whose topocentric position is requested.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Sun,
    Moon,
    /// Fixed equatorial direction (ICRS right ascension / declination, degrees).
    Equatorial { ra: Degree, dec: Degree },
}

/// Topocentric horizontal coordinates at one instant.
///
/// Ephemeral by design: recomputed per query, never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalCoord {
    /// Degrees above the horizon, negative below.
    pub altitude: Degree,
    /// Degrees from North, eastwards, in `[0, 360)`.
    pub azimuth: Degree,
}

/// Capability interface for celestial-mechanics arithmetic.
///
/// Implementations must be deterministic for a given `(epoch, site, target)`:
/// the pipeline relies on it for idempotent reports.
pub trait Ephemeris {
    /// Topocentric altitude/azimuth of `target` at `epoch` as seen from `site`.
    ///
    /// Errors
    /// ----------
    /// * [`NightwatchError::EphemerisUnavailable`] when the engine cannot
    ///   resolve the position; propagated, never retried.
    fn position(
        &self,
        epoch: Epoch,
        site: &Site,
        target: &Target,
    ) -> Result<HorizontalCoord, NightwatchError>;

    /// Illuminated fraction of the lunar disk at `epoch`, in `[0, 1]`.
    fn moon_phase(&self, epoch: Epoch) -> Result<f64, NightwatchError>;
}

/// Angular separation between two horizontal coordinates, in degrees.
///
/// Both coordinates must refer to the same instant and site. The angle comes
/// from the cross/dot `atan2` form, which stays well conditioned near 0° and
/// 180° where a plain `acos` of the dot product loses precision.
pub fn separation(a: &HorizontalCoord, b: &HorizontalCoord) -> Degree {
    let va = unit_vector(a);
    let vb = unit_vector(b);
    va.cross(&vb).norm().atan2(va.dot(&vb)).to_degrees()
}

/// Unit direction vector in the local East-North-Up frame.
fn unit_vector(coord: &HorizontalCoord) -> Vector3<f64> {
    let alt = coord.altitude.to_radians();
    let az = coord.azimuth.to_radians();
    Vector3::new(
        alt.cos() * az.sin(),
        alt.cos() * az.cos(),
        alt.sin(),
    )
}
