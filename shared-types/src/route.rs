use serde::{Deserialize, Serialize};

use crate::geo::{format_distance, Coordinate, MapBounds};

/// A resolved walking path between two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutePath {
    pub points: Vec<Coordinate>,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl RoutePath {
    /// Viewport bounds covering the whole path.
    pub fn bounds(&self) -> Option<MapBounds> {
        MapBounds::around(&self.points)
    }

    pub fn summary(&self) -> String {
        let minutes = (self.duration_seconds / 60.0).ceil() as i64;
        format!(
            "{} · about {} min walk",
            format_distance(self.distance_meters),
            minutes.max(1)
        )
    }
}

/// Routing-service result. `NoRoute` is a normal outcome, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RouteOutcome {
    Found(RoutePath),
    NoRoute,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> RoutePath {
        RoutePath {
            points: vec![
                Coordinate::new(13.0290, 80.0189),
                Coordinate::new(13.0295, 80.0194),
                Coordinate::new(13.0301, 80.0178),
            ],
            distance_meters: 420.0,
            duration_seconds: 300.0,
        }
    }

    #[test]
    fn bounds_cover_all_points() {
        let bounds = path().bounds().unwrap();
        assert_eq!(bounds.north_east.lat, 13.0301);
        assert_eq!(bounds.north_east.lng, 80.0194);
        assert_eq!(bounds.south_west.lat, 13.0290);
        assert_eq!(bounds.south_west.lng, 80.0178);
    }

    #[test]
    fn empty_path_has_no_bounds() {
        let empty = RoutePath {
            points: vec![],
            distance_meters: 0.0,
            duration_seconds: 0.0,
        };
        assert_eq!(empty.bounds(), None);
    }

    #[test]
    fn summary_reads_naturally() {
        assert_eq!(path().summary(), "420 m · about 5 min walk");
    }
}
