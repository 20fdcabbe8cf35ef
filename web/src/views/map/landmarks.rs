use std::sync::LazyLock;

use shared_types::{Coordinate, Landmark};
use thiserror::Error;

/// Static campus registry used to populate the origin/destination pickers.
/// Built once; never mutated.
pub static CAMPUS_LANDMARKS: LazyLock<Vec<Landmark>> = LazyLock::new(|| {
    vec![
        Landmark::new("sec_entrance", "SEC Entrance", 13.028745803845151, 80.01927249219128),
        Landmark::new("majestorium_5f", "Majestorium – 5th Floor", 13.02862824322087, 80.01945235419636),
        Landmark::new("library_2f", "Library – 2nd Floor", 13.02862824322087, 80.01945235419636),
        Landmark::new("principal_office_gf", "Principal Office – Ground Floor", 13.028734713222605, 80.01895147266319),
        Landmark::new("gg_restaurant", "GG Restaurant", 13.029036377978906, 80.01923151097492),
        Landmark::new("tree_canteen", "Tree Canteen", 13.029453247667139, 80.01849086050677),
        Landmark::new("bus_parking", "Saveetha Bus Parking", 13.028333711026946, 80.01990977297376),
        Landmark::new("car_parking", "Saveetha Car Parking", 13.028169673278674, 80.02154718875157),
        Landmark::new("sec_main_gate", "SEC Main Gate", 13.028329610084558, 80.02217016442025),
        Landmark::new("amaravathi_guest_house", "Amaravathi Guest House", 13.027693963183662, 80.01761570714555),
        Landmark::new("saveetha_water_park", "Saveetha Water Park", 13.028916044151842, 80.01743049816385),
        Landmark::new("sec_boys_hostel", "SEC Boys Hostel", 13.027878506004047, 80.01748521899962),
        Landmark::new("sec_girls_hostel", "SEC Girls Hostel", 13.027816991748088, 80.01833549660147),
        Landmark::new("lines_lattice_3f", "Lines and Lattice – 3rd Floor", 13.028657685280937, 80.01942991332209),
        Landmark::new("seb_exam_halls", "SEB Exam Halls", 13.029153898167321, 80.01849544981135),
        Landmark::new("sec_playground", "SEC Playground", 13.030577274431968, 80.01432675931453),
        Landmark::new("simats_cricket_ground", "SIMATS Cricket Ground", 13.029505208860899, 80.0130985365768),
        Landmark::new("s11_cricket_club", "S11 Cricket Club", 13.028828397397904, 80.01468800129621),
        Landmark::new("simats_eng_admission", "SIMATS Engineering Admission", 13.026436974110247, 80.01702478621507),
        Landmark::new("simats_engineering", "SIMATS Engineering", 13.02609167821632, 80.01645922854611),
        Landmark::new("rectangular_block", "Rectangular Block", 13.026627988634534, 80.01546384704633),
        Landmark::new("allied_health_sciences", "Saveetha Allied Health and Sciences", 13.025445165434741, 80.01728871313202),
        Landmark::new("mbbs_block", "MBBS", 13.024637022109198, 80.01728871312699),
        Landmark::new("saveetha_hospitals", "Saveetha Hospitals", 13.0244606995804, 80.015720233188),
        Landmark::new("scon", "SCON", 13.025827195925494, 80.01430256862264),
        Landmark::new("nalli_arangam", "Nalli Arangam", 13.025614140544539, 80.01427994631588),
        Landmark::new("murugan_temple", "Murugan Temple", 13.023197051096997, 80.01633857622892),
        Landmark::new("saveetha_bus_stop", "Saveetha Bus Stop", 13.022484409290369, 80.01670053312948),
        Landmark::new("scad", "Saveetha College of Architecture and Design (SCAD)", 13.028106847586649, 80.01535588677628),
        Landmark::new("sec_petrol_bunk", "SEC Petrol Bunk", 13.027327272910135, 80.01724940909843),
        Landmark::new("royal_breeze", "Royal Breeze", 13.027566902608491, 80.02247826900265),
    ]
});

pub fn landmark_by_id(id: &str) -> Option<&'static Landmark> {
    CAMPUS_LANDMARKS.iter().find(|landmark| landmark.id == id)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("Select both origin and destination places")]
    MissingSelection,
    #[error("Origin and destination are the same. Choose different places.")]
    IdenticalSelection,
    #[error("Unknown campus place: {0}")]
    UnknownPlace(String),
}

/// Validates a landmark pair and resolves it to route endpoints. All
/// rejections happen here, before any routing-service call is made.
pub fn resolve_route_endpoints(
    from_id: &str,
    to_id: &str,
) -> Result<(Coordinate, Coordinate), NavigationError> {
    if from_id.is_empty() || to_id.is_empty() {
        return Err(NavigationError::MissingSelection);
    }
    if from_id == to_id {
        return Err(NavigationError::IdenticalSelection);
    }
    let from = landmark_by_id(from_id)
        .ok_or_else(|| NavigationError::UnknownPlace(from_id.to_string()))?;
    let to =
        landmark_by_id(to_id).ok_or_else(|| NavigationError::UnknownPlace(to_id.to_string()))?;
    Ok((from.location, to.location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_ids_are_unique_and_coordinates_valid() {
        let mut ids: Vec<&str> = CAMPUS_LANDMARKS.iter().map(|l| l.id.as_str()).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
        assert!(CAMPUS_LANDMARKS.iter().all(|l| l.location.is_valid()));
    }

    #[test]
    fn missing_selection_is_rejected() {
        assert_eq!(
            resolve_route_endpoints("", "library_2f"),
            Err(NavigationError::MissingSelection)
        );
        assert_eq!(
            resolve_route_endpoints("library_2f", ""),
            Err(NavigationError::MissingSelection)
        );
    }

    #[test]
    fn identical_selection_is_rejected_before_any_lookup() {
        assert_eq!(
            resolve_route_endpoints("library_2f", "library_2f"),
            Err(NavigationError::IdenticalSelection)
        );
        // Even an id the registry does not know is rejected as identical
        // first; no routing call could ever be issued for it.
        assert_eq!(
            resolve_route_endpoints("nowhere", "nowhere"),
            Err(NavigationError::IdenticalSelection)
        );
    }

    #[test]
    fn unknown_place_is_named_in_the_error() {
        assert_eq!(
            resolve_route_endpoints("library_2f", "atlantis"),
            Err(NavigationError::UnknownPlace("atlantis".to_string()))
        );
    }

    #[test]
    fn valid_pair_resolves_to_both_coordinates() {
        let (from, to) = resolve_route_endpoints("library_2f", "sec_main_gate").unwrap();
        assert_eq!(from, landmark_by_id("library_2f").unwrap().location);
        assert_eq!(to, landmark_by_id("sec_main_gate").unwrap().location);
    }
}
