pub mod campus_map;
pub mod feed;
pub mod geolocate;
pub mod gesture;
pub mod issue_marker;
pub mod landmarks;
pub mod listeners;
pub mod marker;
pub mod navigation_panel;
pub mod route_session;

pub use campus_map::{CampusMap, Viewer};
