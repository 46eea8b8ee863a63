//! Observing site geometry.
//!
//! A [`Site`] holds the geodetic coordinates of the ground station the whole
//! pipeline is computed for. It is supplied once, validated on construction and
//! shared read-only across every grid and scoring call.

use crate::constants::{Degree, Meter};
use crate::errors::NightwatchError;

/// Geodetic coordinates of a fixed observing site.
///
/// Units
/// -----
/// * `latitude`: degrees, positive north, in `[-90, 90]`.
/// * `longitude`: degrees east of Greenwich, normalized to `[0, 360)`.
/// * `height`: meters above sea level. Carried for ephemeris engines that model
///   topocentric effects; the built-in analytic engine treats the site as
///   geocentric (see crate non-goals on parallax/refraction).
#[derive(Debug, Clone, PartialEq)]
pub struct Site {
    pub latitude: Degree,
    pub longitude: Degree,
    pub height: Meter,
}

impl Site {
    /// Build a validated site.
    ///
    /// Arguments
    /// ---------------
    /// * `latitude`: geodetic latitude in degrees, `[-90, 90]`.
    /// * `longitude`: geodetic longitude in degrees east, any value (normalized).
    /// * `height`: elevation above sea level in meters.
    ///
    /// Return
    /// ----------
    /// * The validated `Site`, or [`NightwatchError::InvalidSite`] when the
    ///   latitude is out of range or any coordinate is not finite.
    pub fn new(latitude: Degree, longitude: Degree, height: Meter) -> Result<Site, NightwatchError> {
        if !latitude.is_finite() || !longitude.is_finite() || !height.is_finite() {
            return Err(NightwatchError::InvalidSite(format!(
                "non-finite coordinate: lat={latitude}, lon={longitude}, height={height}"
            )));
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(NightwatchError::InvalidSite(format!(
                "latitude {latitude} out of range [-90, 90]"
            )));
        }
        Ok(Site {
            latitude,
            longitude: longitude.rem_euclid(360.0),
            height,
        })
    }

    /// Longitude folded into `(-180, 180]`, used to locate the local solar noon.
    pub(crate) fn signed_longitude(&self) -> Degree {
        if self.longitude > 180.0 {
            self.longitude - 360.0
        } else {
            self.longitude
        }
    }
}

#[cfg(test)]
mod site_test {
    use super::*;

    #[test]
    fn test_site_constructor() {
        let site = Site::new(50.0, 20.0, 200.0).unwrap();
        assert_eq!(site.latitude, 50.0);
        assert_eq!(site.longitude, 20.0);
        assert_eq!(site.height, 200.0);

        let site = Site::new(-30.2446, -70.74942, 2647.0).unwrap();
        assert!((site.longitude - 289.25058).abs() < 1e-9);
        assert!((site.signed_longitude() + 70.74942).abs() < 1e-9);
    }

    #[test]
    fn test_site_rejects_bad_latitude() {
        assert!(matches!(
            Site::new(91.0, 0.0, 0.0),
            Err(NightwatchError::InvalidSite(_))
        ));
        assert!(matches!(
            Site::new(f64::NAN, 0.0, 0.0),
            Err(NightwatchError::InvalidSite(_))
        ));
    }
}
