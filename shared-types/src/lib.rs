pub mod geo;
pub mod issue;
pub mod landmark;
pub mod route;

pub use geo::{haversine_distance_m, Coordinate, MapBounds, CAMPUS_CENTER, DEFAULT_ZOOM};
pub use issue::{Issue, IssueCategory, IssuePriority, IssueStatus, NewIssue};
pub use landmark::Landmark;
pub use route::{RouteOutcome, RoutePath};
