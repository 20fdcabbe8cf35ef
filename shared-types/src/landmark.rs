use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A named, static campus point used for place-to-place navigation.
/// Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub id: String,
    pub name: String,
    pub location: Coordinate,
}

impl Landmark {
    pub fn new(id: &str, name: &str, lat: f64, lng: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            location: Coordinate::new(lat, lng),
        }
    }
}
