//! Core coordinate utilities
//!
//! Converts geographic latitude/longitude into the two shapes the planet can take:
//! - the flat equirectangular map, where both axes are angles in radians
//! - the unit globe
//!
//! Both forms use the same angle convention so that a point's map position and globe
//! position line up while the surface morphs between them. Longitude is the azimuth
//! around +Y (0° faces +Z) and latitude the elevation above the XZ plane.

use bevy::math::{DVec3, Vec3};
use std::f64::consts::PI;

/// Geographic point in degrees, as read from a record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn to_plane(&self) -> Vec3 {
        to_plane(self.latitude, self.longitude)
    }

    pub fn to_sphere(&self) -> Vec3 {
        to_sphere(self.latitude, self.longitude)
    }
}

fn plane_radians(latitude: f64, longitude: f64) -> DVec3 {
    DVec3::new(longitude * (PI / 180.0), latitude * (PI / 180.0), 0.0)
}

/// Flat map position: x is longitude and y latitude, both in radians; z is always 0.
pub fn to_plane(latitude: f64, longitude: f64) -> Vec3 {
    plane_radians(latitude, longitude).as_vec3()
}

/// Unit globe position for the same point.
///
/// The radian-scaled latitude is the elevation and the radian-scaled longitude the
/// azimuth, so `(0, 0)` lands on `+Z`, the point the flat map's origin faces.
pub fn to_sphere(latitude: f64, longitude: f64) -> Vec3 {
    // f64 keeps the pole residual well below f32 resolution
    let p = plane_radians(latitude, longitude);
    let (az, el) = (p.x, p.y);
    DVec3::new(el.cos() * az.sin(), el.sin(), el.cos() * az.cos()).as_vec3()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_to_plane_scales_degrees_to_radians() {
        let p = to_plane(90.0, -180.0);
        assert!((p.x + std::f32::consts::PI).abs() < EPSILON);
        assert!((p.y - std::f32::consts::FRAC_PI_2).abs() < EPSILON);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn test_origin_maps_to_plane_origin_and_forward() {
        let flat = to_plane(0.0, 0.0);
        let globe = to_sphere(0.0, 0.0);
        assert!(flat.length() < EPSILON);
        assert!((globe - Vec3::Z).length() < EPSILON);
    }

    #[test]
    fn test_to_sphere_cardinal_points() {
        assert!((to_sphere(90.0, 0.0) - Vec3::Y).length() < EPSILON);
        assert!((to_sphere(-90.0, 0.0) - Vec3::NEG_Y).length() < EPSILON);
        assert!((to_sphere(0.0, 90.0) - Vec3::X).length() < EPSILON);
        assert!((to_sphere(0.0, -90.0) - Vec3::NEG_X).length() < EPSILON);
        assert!((to_sphere(0.0, 180.0) - Vec3::NEG_Z).length() < EPSILON);
    }

    #[test]
    fn test_to_sphere_is_unit_length() {
        let mut lat = -90.0;
        while lat <= 90.0 {
            let mut lon = -180.0;
            while lon <= 180.0 {
                let p = to_sphere(lat, lon);
                assert!(
                    (p.length() - 1.0).abs() < EPSILON,
                    "({lat}, {lon}) -> {p:?} has length {}",
                    p.length()
                );
                lon += 7.5;
            }
            lat += 7.5;
        }
    }

    #[test]
    fn test_geo_point_matches_free_functions() {
        let point = GeoPoint::new(35.6762, 139.6503);
        assert_eq!(point.to_plane(), to_plane(35.6762, 139.6503));
        assert_eq!(point.to_sphere(), to_sphere(35.6762, 139.6503));
    }
}
