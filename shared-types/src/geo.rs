use serde::{Deserialize, Serialize};

/// A WGS84 point. Both fields must be finite and in range; use
/// [`Coordinate::is_valid`] before trusting externally supplied values.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

/// Center of campus, used as the initial viewport and as the routing start
/// when the device position is unavailable.
pub const CAMPUS_CENTER: Coordinate = Coordinate {
    lat: 13.0290,
    lng: 80.0189,
};

pub const DEFAULT_ZOOM: f64 = 16.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Human-readable label for a selected location. Four decimal places,
    /// which callers rely on when echoing a selection back to the user.
    pub fn label(&self) -> String {
        format!("Location: {:.4}, {:.4}", self.lat, self.lng)
    }
}

pub fn haversine_distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        // Half-up to one decimal; `{:.1}` alone rounds ties to even.
        format!("{:.1} km", (meters / 100.0).round() / 10.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MapBounds {
    pub north_east: Coordinate,
    pub south_west: Coordinate,
}

impl MapBounds {
    /// Smallest bounds containing every point, or `None` for an empty slice.
    pub fn around(points: &[Coordinate]) -> Option<MapBounds> {
        let first = points.first()?;
        let mut bounds = MapBounds {
            north_east: *first,
            south_west: *first,
        };
        for p in &points[1..] {
            bounds.north_east.lat = bounds.north_east.lat.max(p.lat);
            bounds.north_east.lng = bounds.north_east.lng.max(p.lng);
            bounds.south_west.lat = bounds.south_west.lat.min(p.lat);
            bounds.south_west.lng = bounds.south_west.lng.min(p.lng);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity_checks_range_and_finiteness() {
        assert!(Coordinate::new(13.0290, 80.0189).is_valid());
        assert!(Coordinate::new(-90.0, 180.0).is_valid());
        assert!(!Coordinate::new(90.5, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, -180.5).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn label_uses_four_decimal_places() {
        let label = Coordinate::new(13.030, 80.020).label();
        assert!(label.contains("13.0300"), "{label}");
        assert!(label.contains("80.0200"), "{label}");
    }

    #[test]
    fn haversine_is_zero_for_same_point_and_sane_for_campus() {
        let a = CAMPUS_CENTER;
        assert_eq!(haversine_distance_m(a, a), 0.0);
        // Library to main gate is a few hundred meters, not kilometers.
        let gate = Coordinate::new(13.028330, 80.022170);
        let d = haversine_distance_m(a, gate);
        assert!(d > 100.0 && d < 1000.0, "{d}");
    }

    #[test]
    fn distance_formatting_switches_units() {
        assert_eq!(format_distance(850.4), "850 m");
        assert_eq!(format_distance(1000.0), "1.0 km");
        assert_eq!(format_distance(1240.0), "1.2 km");
    }

    #[test]
    fn km_rounding_is_half_up_not_half_even() {
        assert_eq!(format_distance(1250.0), "1.3 km");
        assert_eq!(format_distance(1050.0), "1.1 km");
        assert_eq!(format_distance(2450.0), "2.5 km");
    }

    #[test]
    fn bounds_around_points() {
        assert_eq!(MapBounds::around(&[]), None);
        let bounds = MapBounds::around(&[
            Coordinate::new(13.02, 80.02),
            Coordinate::new(13.04, 80.01),
            Coordinate::new(13.03, 80.03),
        ])
        .unwrap();
        assert_eq!(bounds.north_east, Coordinate::new(13.04, 80.03));
        assert_eq!(bounds.south_west, Coordinate::new(13.02, 80.01));
    }
}
