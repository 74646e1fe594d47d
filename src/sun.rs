//! Sun direction model.
//!
//! Conventions:
//! - Azimuth: degrees from north, clockwise (0=N, 90=E, 180=S, 270=W).
//! - Altitude: degrees above the horizon (0=horizon, 90=zenith).
//! - Scene axes: +X = east, +Y = north, +Z = up. Angles in the scene are
//!   measured counter-clockwise from +X, so every azimuth goes through
//!   [`remap_azimuth`] before any trigonometry.
use crate::error::{Result, ShadowError};
use crate::geom::point::Point;
use serde::{Deserialize, Serialize};

/// Default distance of the sun marker from the origin.
pub const SUN_DISTANCE: f64 = 50.0;

/// Sun position as seen from the ground.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunAngle {
    /// Degrees from north, clockwise. Any real value, wrapped modulo 360.
    pub azimuth: f64,
    /// Degrees above the horizon.
    pub altitude: f64,
}

impl SunAngle {
    /// Creates a sun angle usable for shadow projection (altitude in (0, 90]).
    pub fn new(azimuth: f64, altitude: f64) -> Result<Self> {
        let sun = Self { azimuth, altitude };
        sun.validate()?;
        Ok(sun)
    }

    /// Checks that a finite shadow can be derived from this angle.
    pub fn validate(&self) -> Result<()> {
        if !self.azimuth.is_finite() {
            return Err(ShadowError::azimuth(self.azimuth));
        }
        if !(self.altitude > 0. && self.altitude <= 90.) {
            return Err(ShadowError::altitude(self.altitude));
        }
        Ok(())
    }

    /// Returns true if the sun is above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }

    pub fn direction(&self) -> (f64, f64) {
        sun_direction(self.azimuth)
    }

    pub fn position(&self, distance: f64) -> Point {
        sun_position_3d(self.azimuth, self.altitude, distance)
    }

    /// Calculates the sun angle from solar time using the Spencer declination.
    ///
    /// - `latitude`: in degrees (positive north)
    /// - `day_of_year`: 1-365
    /// - `hour`: solar time in hours (0-24)
    ///
    /// The result is not validated: at night the altitude is negative.
    pub fn from_solar_time(latitude: f64, day_of_year: u16, hour: f64) -> Self {
        let lat = latitude.to_radians();

        // Day angle
        let gamma = 2.0 * std::f64::consts::PI * (day_of_year as f64 - 1.0) / 365.0;

        let declination = 0.006918 - 0.399912 * gamma.cos() + 0.070257 * gamma.sin()
            - 0.006758 * (2.0 * gamma).cos()
            + 0.000907 * (2.0 * gamma).sin()
            - 0.002697 * (3.0 * gamma).cos()
            + 0.00148 * (3.0 * gamma).sin();

        // 15 degrees per hour from solar noon
        let hour_angle = (hour - 12.0) * 15.0_f64.to_radians();

        let sin_alt =
            lat.sin() * declination.sin() + lat.cos() * declination.cos() * hour_angle.cos();
        let altitude = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();

        let cos_azimuth = (declination.sin() * lat.cos()
            - declination.cos() * lat.sin() * hour_angle.cos())
            / altitude.to_radians().cos().max(1e-10);

        let mut azimuth = cos_azimuth.clamp(-1.0, 1.0).acos().to_degrees();
        if hour_angle > 0.0 {
            azimuth = 360.0 - azimuth;
        }

        Self { azimuth, altitude }
    }
}

/// Converts a compass azimuth (degrees) into a scene angle (radians),
/// counter-clockwise from east: `radians((450 - azimuth) mod 360)`.
pub fn remap_azimuth(azimuth_deg: f64) -> f64 {
    (450.0 - azimuth_deg).rem_euclid(360.0).to_radians()
}

/// Unit vector `(cos(az'), sin(az'))` pointing from the ground towards the sun.
pub fn sun_direction(azimuth_deg: f64) -> (f64, f64) {
    let az = remap_azimuth(azimuth_deg);
    (az.cos(), az.sin())
}

/// Point on a sphere of radius `distance` around the origin, in the sun's direction.
///
/// Total over all inputs; altitude is not validated here.
pub fn sun_position_3d(azimuth_deg: f64, altitude_deg: f64, distance: f64) -> Point {
    let az = remap_azimuth(azimuth_deg);
    let alt = altitude_deg.to_radians();
    Point::new(
        distance * alt.cos() * az.cos(),
        distance * alt.cos() * az.sin(),
        distance * alt.sin(),
    )
}

/// Ground distance the top of an object of `height` projects to.
///
/// Fails with `InvalidSunAngle` when `altitude_deg` is outside (0, 90].
/// At exactly 90 degrees the length is 0.
pub fn shadow_length(height: f64, altitude_deg: f64) -> Result<f64> {
    if !(altitude_deg > 0. && altitude_deg <= 90.) {
        return Err(ShadowError::altitude(altitude_deg));
    }
    if altitude_deg == 90. {
        return Ok(0.);
    }
    Ok(height / altitude_deg.to_radians().tan())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-9;

    #[test]
    fn test_remap_cardinal_directions() {
        // North -> +Y
        let (dx, dy) = sun_direction(0.);
        assert!(dx.abs() < TOL && (dy - 1.).abs() < TOL);
        // East -> +X
        let (dx, dy) = sun_direction(90.);
        assert!((dx - 1.).abs() < TOL && dy.abs() < TOL);
        // South -> -Y
        let (dx, dy) = sun_direction(180.);
        assert!(dx.abs() < TOL && (dy + 1.).abs() < TOL);
        // West -> -X
        let (dx, dy) = sun_direction(270.);
        assert!((dx + 1.).abs() < TOL && dy.abs() < TOL);
    }

    #[test]
    fn test_remap_value() {
        assert!((remap_azimuth(135.) - 315f64.to_radians()).abs() < TOL);
        assert!((remap_azimuth(-45.) - 135f64.to_radians()).abs() < TOL);
        assert!((remap_azimuth(450.) - 0.).abs() < TOL);
    }

    #[test]
    fn test_direction_periodic() {
        for az in [-720.5, -90., 0., 12.3, 135., 359.9, 1000.] {
            let (a, b) = sun_direction(az);
            let (c, d) = sun_direction(az + 360.);
            assert!((a - c).abs() < TOL && (b - d).abs() < TOL, "az = {az}");
        }
    }

    #[test]
    fn test_direction_is_unit() {
        for az in [0., 33., 135., 271.] {
            let (dx, dy) = sun_direction(az);
            assert!(((dx * dx + dy * dy).sqrt() - 1.).abs() < TOL);
        }
    }

    #[test]
    fn test_position_magnitude() {
        for (az, alt, d) in [(135., 45., 50.), (0., 90., 10.), (200., 1., 3.), (10., 30., 0.)] {
            let p = sun_position_3d(az, alt, d);
            let r = (p.x * p.x + p.y * p.y + p.z * p.z).sqrt();
            assert!((r - d).abs() < TOL);
        }
    }

    #[test]
    fn test_position_matches_direction() {
        let p = sun_position_3d(135., 45., SUN_DISTANCE);
        let (dx, dy) = sun_direction(135.);
        let horizontal = SUN_DISTANCE * 45f64.to_radians().cos();
        assert!((p.x - horizontal * dx).abs() < TOL);
        assert!((p.y - horizontal * dy).abs() < TOL);
        assert!(p.z > 0.);
    }

    #[test]
    fn test_shadow_length() -> Result<()> {
        assert!((shadow_length(10., 45.)? - 10.).abs() < TOL);
        assert_eq!(shadow_length(10., 90.)?, 0.);
        assert_eq!(shadow_length(0., 30.)?, 0.);
        assert!(matches!(shadow_length(10., 0.), Err(ShadowError::InvalidSunAngle { .. })));
        assert!(matches!(shadow_length(10., -5.), Err(ShadowError::InvalidSunAngle { .. })));
        assert!(shadow_length(10., 90.5).is_err());
        assert!(shadow_length(10., f64::NAN).is_err());
        Ok(())
    }

    #[test]
    fn test_validate() {
        assert!(SunAngle::new(135., 45.).is_ok());
        assert!(SunAngle::new(-30., 90.).is_ok());
        assert!(SunAngle::new(135., 0.).is_err());
        assert!(SunAngle::new(f64::INFINITY, 10.).is_err());
    }

    #[test]
    fn test_validate_names_the_bad_angle() {
        let azimuth = SunAngle::new(f64::NAN, 45.).err().map(|e| e.to_string());
        assert_eq!(azimuth.as_deref(), Some("Invalid sun angle: azimuth NaN deg is not finite"));
        let altitude = SunAngle::new(135., 95.).err().map(|e| e.to_string());
        assert_eq!(altitude.as_deref(), Some("Invalid sun angle: altitude 95 deg is outside (0, 90]"));
    }

    #[test]
    fn test_solar_noon_equator_equinox() {
        // March equinox ~ day 80
        let sun = SunAngle::from_solar_time(0.0, 80, 12.0);
        assert!(sun.altitude > 80.0);
        assert!(sun.is_above_horizon());
    }

    #[test]
    fn test_solar_midnight_winter() {
        let sun = SunAngle::from_solar_time(45.0, 355, 0.0);
        assert!(!sun.is_above_horizon());
        assert!(sun.validate().is_err());
    }

    #[test]
    fn test_morning_sun_in_the_east() {
        let sun = SunAngle::from_solar_time(45.0, 172, 8.0);
        assert!(sun.is_above_horizon());
        assert!(sun.azimuth > 0. && sun.azimuth < 180.);
        let afternoon = SunAngle::from_solar_time(45.0, 172, 16.0);
        assert!(afternoon.azimuth > 180. && afternoon.azimuth < 360.);
    }
}
