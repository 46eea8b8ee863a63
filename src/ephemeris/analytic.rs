//! Built-in low-precision analytic ephemeris.
//!
//! Solar and lunar positions follow the truncated series of Meeus,
//! *Astronomical Algorithms* (2nd ed., ch. 25 and 47): equation of center for
//! the sun, principal periodic terms for the moon. Sidereal time uses the
//! IAU 1982 GMST polynomial. Accuracy is a few tenths of a degree, which is
//! ample for ranking observability; refraction and topocentric parallax are
//! deliberately not modeled.

use hifitime::Epoch;

use crate::constants::{Radian, DAYS_PER_CENTURY, DPI, MJD, T2000};
use crate::errors::NightwatchError;
use crate::site::Site;

use super::{Ephemeris, HorizontalCoord, Target};

/// Deterministic, dependency-free ephemeris engine.
///
/// Stateless: every query is a pure function of the epoch and site, so the
/// engine can be shared freely across threads and runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticEphemeris;

impl AnalyticEphemeris {
    pub fn new() -> Self {
        AnalyticEphemeris
    }
}

impl Ephemeris for AnalyticEphemeris {
    fn position(
        &self,
        epoch: Epoch,
        site: &Site,
        target: &Target,
    ) -> Result<HorizontalCoord, NightwatchError> {
        let mjd = epoch.to_mjd_utc_days();
        let (ra, dec) = match target {
            Target::Sun => sun_equatorial(mjd),
            Target::Moon => moon_equatorial(mjd),
            Target::Equatorial { ra, dec } => (ra.to_radians(), dec.to_radians()),
        };
        Ok(equatorial_to_horizontal(ra, dec, mjd, site))
    }

    fn moon_phase(&self, epoch: Epoch) -> Result<f64, NightwatchError> {
        let mjd = epoch.to_mjd_utc_days();
        let (ra_sun, dec_sun) = sun_equatorial(mjd);
        let (ra_moon, dec_moon) = moon_equatorial(mjd);

        // Geocentric sun-moon elongation, then illuminated fraction.
        // psi = 0 at new moon, pi at full moon.
        let cos_psi = dec_sun.sin() * dec_moon.sin()
            + dec_sun.cos() * dec_moon.cos() * (ra_sun - ra_moon).cos();
        Ok(((1.0 - cos_psi.clamp(-1.0, 1.0)) / 2.0).clamp(0.0, 1.0))
    }
}

/// Compute the Greenwich Mean Sidereal Time (GMST) in radians
/// for a given Modified Julian Date.
///
/// IAU 1982 polynomial for mean sidereal time at 0h, plus the fractional-day
/// term scaled by the sidereal/solar day ratio. The UT1−UTC offset (< 0.9 s,
/// i.e. < 0.004° of rotation) is ignored at this precision level.
///
/// Arguments
/// ---------------
/// * `mjd`: Modified Julian Date (UTC).
///
/// Return
/// ----------
/// * GMST angle in radians, normalized to `[0, 2π)`.
pub fn gmst(mjd: MJD) -> Radian {
    // Polynomial coefficients for GMST at 0h UT1 (in seconds)
    const C0: f64 = 24110.54841;
    const C1: f64 = 8640184.812866;
    const C2: f64 = 9.3104e-2;
    const C3: f64 = -6.2e-6;

    // Ratio of sidereal day to solar day
    const RAP: f64 = 1.00273790934;

    let day = mjd.floor();
    let t = (day - T2000) / DAYS_PER_CENTURY;

    // GMST at 0h, converted from seconds of time to radians
    let gmst0 = (((C3 * t + C2) * t + C1) * t + C0) * DPI / 86400.0;

    // Earth rotation during the fraction of the day, sidereal rate
    let angle = gmst0 + mjd.fract() * DPI * RAP;

    angle.rem_euclid(DPI)
}

/// Julian centuries since J2000.0 for a given MJD.
fn centuries(mjd: MJD) -> f64 {
    (mjd - T2000) / DAYS_PER_CENTURY
}

/// Mean obliquity of the ecliptic (IAU 1980, linear term), radians.
fn mean_obliquity(t: f64) -> Radian {
    (23.439291 - 0.0130042 * t).to_radians()
}

/// Geocentric equatorial coordinates of the sun, radians (RA, Dec).
///
/// Meeus ch. 25: mean longitude plus equation of center, zero ecliptic
/// latitude. Accurate to about 0.01°.
fn sun_equatorial(mjd: MJD) -> (Radian, Radian) {
    let t = centuries(mjd);

    // Mean longitude and mean anomaly (degrees)
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();

    // Equation of center (degrees)
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    let lambda = (l0 + c).to_radians();
    let eps = mean_obliquity(t);

    let ra = (eps.cos() * lambda.sin()).atan2(lambda.cos());
    let dec = (eps.sin() * lambda.sin()).asin();
    (ra.rem_euclid(DPI), dec)
}

/// Geocentric equatorial coordinates of the moon, radians (RA, Dec).
///
/// Meeus ch. 47 restricted to the principal periodic terms (evection,
/// variation, annual equation, largest latitude terms). Worst-case error is a
/// few tenths of a degree in longitude.
fn moon_equatorial(mjd: MJD) -> (Radian, Radian) {
    let t = centuries(mjd);

    // Fundamental arguments (degrees)
    let lp = 218.3164477 + 481267.88123421 * t; // mean longitude
    let d = (297.8501921 + 445267.1114034 * t).to_radians(); // mean elongation
    let m = (357.5291092 + 35999.0502909 * t).to_radians(); // sun mean anomaly
    let mp = (134.9633964 + 477198.8675055 * t).to_radians(); // moon mean anomaly
    let f = (93.2720950 + 483202.0175233 * t).to_radians(); // argument of latitude

    // Ecliptic longitude and latitude (degrees)
    let lon = lp
        + 6.288774 * mp.sin()
        + 1.274027 * (2.0 * d - mp).sin()
        + 0.658314 * (2.0 * d).sin()
        + 0.213618 * (2.0 * mp).sin()
        - 0.185116 * m.sin()
        - 0.114332 * (2.0 * f).sin();
    let lat = 5.128122 * f.sin()
        + 0.280602 * (mp + f).sin()
        + 0.277693 * (mp - f).sin();

    let lambda = lon.to_radians();
    let beta = lat.to_radians();
    let eps = mean_obliquity(t);

    let ra = (lambda.sin() * eps.cos() - beta.tan() * eps.sin()).atan2(lambda.cos());
    let dec = (beta.sin() * eps.cos() + beta.cos() * eps.sin() * lambda.sin()).asin();
    (ra.rem_euclid(DPI), dec)
}

/// Convert geocentric equatorial coordinates to topocentric horizontal ones.
///
/// Hour angle from local sidereal time, then the standard spherical triangle.
/// Azimuth is returned from North, eastwards, in `[0, 360)`.
fn equatorial_to_horizontal(ra: Radian, dec: Radian, mjd: MJD, site: &Site) -> HorizontalCoord {
    let lst = gmst(mjd) + site.longitude.to_radians();
    let h = lst - ra;
    let phi = site.latitude.to_radians();

    let sin_alt = phi.sin() * dec.sin() + phi.cos() * dec.cos() * h.cos();
    let altitude = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();

    // Meeus measures azimuth from South, westwards; shift to North-based.
    let az_south = h.sin().atan2(h.cos() * phi.sin() - dec.tan() * phi.cos());
    let azimuth = (az_south.to_degrees() + 180.0).rem_euclid(360.0);

    HorizontalCoord { altitude, azimuth }
}
