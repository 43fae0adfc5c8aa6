//! Geographic coordinates on the globe.
//!
//! Bevy world units are kilometers, Y is up, latitude is measured from the
//! XZ plane and longitude 0 points along +Z (+90 along +X).

use bevy::math::Vec3;
use std::f32::consts::TAU;

pub const EARTH_RADIUS_KM: f32 = 6371.0;

/// A point on the sphere, stored in radians.
///
/// Values are kept as given; nothing here wraps or clamps longitudes or
/// latitudes outside the usual ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<Vec3> for Coordinates {
    fn from(value: Vec3) -> Self {
        let n = value.normalize();
        let latitude = (n.y as f64).clamp(-1.0, 1.0).asin();
        let longitude = (n.x as f64).atan2(n.z as f64);
        Coordinates {
            latitude,
            longitude,
        }
    }
}

impl Coordinates {
    pub fn from_degrees(latitude: f64, longitude: f64) -> Self {
        Coordinates {
            latitude: latitude.to_radians(),
            longitude: longitude.to_radians(),
        }
    }

    pub fn as_degrees(&self) -> (f64, f64) {
        (self.latitude.to_degrees(), self.longitude.to_degrees())
    }

    /// Unit vector pointing at this location.
    pub fn direction(&self) -> Vec3 {
        let lat = self.latitude;
        let lon = self.longitude;
        let mut r = lat.cos();
        // Snap the residual radius at the poles so f32 quantization of 90 deg
        // does not leave a tiny horizontal component.
        if (std::f64::consts::FRAC_PI_2 - lat.abs()).abs() < 1e-7 {
            r = 0.0;
        }
        Vec3::new((lon.sin() * r) as f32, lat.sin() as f32, (lon.cos() * r) as f32)
    }

    pub fn point_on_sphere(&self) -> Vec3 {
        self.direction() * EARTH_RADIUS_KM
    }

    /// Equirectangular texture coordinates: lon -180 at u=0, lat 90 at v=0.
    pub fn uv_equirectangular(&self) -> (f32, f32) {
        let (lat, lon) = self.as_degrees();
        let u = ((lon + 180.0) / 360.0).clamp(0.0, 1.0);
        let v = ((90.0 - lat) / 180.0).clamp(0.0, 1.0);
        (u as f32, v as f32)
    }
}

/// Points of a circle of `radius_km` (arc length) centred on `center`,
/// lying on a sphere of `sphere_radius_km`.
pub fn surface_circle(
    center: Coordinates,
    radius_km: f32,
    sphere_radius_km: f32,
    segments: u32,
) -> Vec<Vec3> {
    let up = center.direction();
    let right = if up.y.abs() < 0.9 {
        up.cross(Vec3::Y).normalize()
    } else {
        up.cross(Vec3::X).normalize()
    };
    let forward = right.cross(up);
    let angular = radius_km / EARTH_RADIUS_KM;
    let segments = segments.max(3);

    (0..segments)
        .map(|i| {
            let bearing = i as f32 / segments as f32 * TAU;
            let tangent = right * bearing.cos() + forward * bearing.sin();
            (up * angular.cos() + tangent * angular.sin()) * sphere_radius_km
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn prime_meridian_equator_points_along_z() {
        let point = Coordinates::from_degrees(0.0, 0.0).point_on_sphere();
        assert_relative_eq!(point.z, EARTH_RADIUS_KM, epsilon = 1e-3);
        assert_relative_eq!(point.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(point.y, 0.0, epsilon = 1e-3);
    }

    #[test]
    fn east_ninety_points_along_x() {
        let coords = Coordinates::from(Vec3::X);
        let (lat, lon) = coords.as_degrees();
        assert_relative_eq!(lat, 0.0, epsilon = 1e-6);
        assert_relative_eq!(lon, 90.0, epsilon = 1e-6);
    }

    #[test]
    fn north_pole_has_no_horizontal_component() {
        let point = Coordinates::from_degrees(90.0, 45.0).point_on_sphere();
        assert_relative_eq!(point.y, EARTH_RADIUS_KM, epsilon = 1e-3);
        assert!(point.x.abs() < 1e-3);
        assert!(point.z.abs() < 1e-3);
    }

    #[test]
    fn roundtrip_through_sphere() {
        for (lat, lon) in [(0.0, 0.0), (45.0, 90.0), (-33.9, 151.2), (51.5, -0.1), (-60.0, -179.5)] {
            let point = Coordinates::from_degrees(lat, lon).point_on_sphere();
            let (rlat, rlon) = Coordinates::from(point).as_degrees();
            assert_relative_eq!(rlat, lat, epsilon = 1e-3);
            assert_relative_eq!(rlon, lon, epsilon = 1e-3);
        }
    }

    #[test]
    fn out_of_range_values_are_kept() {
        let coords = Coordinates::from_degrees(10.0, 370.0);
        let (_, lon) = coords.as_degrees();
        assert_relative_eq!(lon, 370.0, epsilon = 1e-9);
        // Still lands on the sphere, same spot as 10 deg east.
        let a = coords.point_on_sphere();
        let b = Coordinates::from_degrees(10.0, 10.0).point_on_sphere();
        assert!(a.distance(b) < 1e-2);
    }

    #[test]
    fn uv_corners() {
        let (u, v) = Coordinates::from_degrees(90.0, -180.0).uv_equirectangular();
        assert_relative_eq!(u, 0.0);
        assert_relative_eq!(v, 0.0);
        let (u, v) = Coordinates::from_degrees(0.0, 0.0).uv_equirectangular();
        assert_relative_eq!(u, 0.5);
        assert_relative_eq!(v, 0.5);
    }

    #[test]
    fn surface_circle_is_equidistant_from_center() {
        let center = Coordinates::from_degrees(20.0, 0.0);
        let c = center.point_on_sphere();
        let points = surface_circle(center, 60.0, EARTH_RADIUS_KM, 48);
        assert_eq!(points.len(), 48);
        for p in &points {
            assert_relative_eq!(p.length(), EARTH_RADIUS_KM, epsilon = 1e-2);
            // Chord for a 60 km arc is marginally shorter than 60 km.
            let chord = p.distance(c);
            assert!((chord - 60.0).abs() < 0.05, "chord {}", chord);
        }
    }

    #[test]
    fn surface_circle_near_pole_is_finite() {
        let points = surface_circle(Coordinates::from_degrees(89.99, 0.0), 60.0, EARTH_RADIUS_KM, 16);
        assert!(points.iter().all(|p| p.is_finite()));
    }
}
