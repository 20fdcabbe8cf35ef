use leptos::prelude::*;
use leptos::server;
use shared_types::{Coordinate, Issue, NewIssue, RouteOutcome};

#[cfg(feature = "ssr")]
use crate::db::repository::{delete_issue_by_id, insert_issue, list_issues_with_location as query_issues};

pub const DEFAULT_OSRM_BASE_URL: &str = "https://router.project-osrm.org";

/// OSRM request URL for a walking route. Coordinates are `lng,lat` per the
/// OSRM convention; geometry comes back as GeoJSON so it can be drawn
/// directly as a polyline.
pub fn osrm_route_url(base_url: &str, start: Coordinate, end: Coordinate) -> String {
    format!(
        "{}/route/v1/foot/{},{};{},{}?overview=full&geometries=geojson&alternatives=false",
        base_url.trim_end_matches('/'),
        start.lng,
        start.lat,
        end.lng,
        end.lat
    )
}

#[cfg(feature = "ssr")]
mod osrm {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct OsrmResponse {
        pub code: String,
        #[serde(default)]
        pub routes: Vec<OsrmRoute>,
    }

    #[derive(Deserialize)]
    pub struct OsrmRoute {
        pub geometry: OsrmGeometry,
        pub distance: f64,
        pub duration: f64,
    }

    #[derive(Deserialize)]
    pub struct OsrmGeometry {
        /// GeoJSON LineString positions, `[lng, lat]`.
        pub coordinates: Vec<[f64; 2]>,
    }
}

#[server]
pub async fn list_issues_with_location() -> Result<Vec<Issue>, ServerFnError> {
    match query_issues().await {
        Ok(issues) => Ok(issues),
        Err(e) => Err(ServerFnError::new(format!("Database error: {}", e))),
    }
}

#[server]
pub async fn create_issue(new_issue: NewIssue) -> Result<Issue, ServerFnError> {
    if new_issue.title.trim().is_empty() {
        return Err(ServerFnError::new("Issue title is required"));
    }
    if let Some(location) = &new_issue.location {
        if !location.is_valid() {
            return Err(ServerFnError::new("Issue location is out of range"));
        }
    }

    match insert_issue(new_issue).await {
        Ok(issue) => Ok(issue),
        Err(e) => Err(ServerFnError::new(format!("Database error: {}", e))),
    }
}

#[server]
pub async fn delete_issue(id: String) -> Result<(), ServerFnError> {
    match delete_issue_by_id(&id).await {
        Ok(0) => Err(ServerFnError::new("Issue not found")),
        Ok(_) => Ok(()),
        Err(e) => Err(ServerFnError::new(format!("Database error: {}", e))),
    }
}

/// Walking route between two points via the external routing service.
/// "No route" is reported as a normal outcome so callers can keep the map
/// in its prior state without treating it as a failure.
#[server]
pub async fn fetch_walking_route(
    start: Coordinate,
    end: Coordinate,
) -> Result<RouteOutcome, ServerFnError> {
    use shared_types::RoutePath;

    if !start.is_valid() || !end.is_valid() {
        return Err(ServerFnError::new("Route endpoints are out of range"));
    }

    let base_url =
        std::env::var("OSRM_BASE_URL").unwrap_or_else(|_| DEFAULT_OSRM_BASE_URL.to_string());
    let url = osrm_route_url(&base_url, start, end);

    let response = reqwest::get(&url)
        .await
        .map_err(|e| ServerFnError::new(format!("Routing service unreachable: {}", e)))?;

    let body: osrm::OsrmResponse = response
        .json()
        .await
        .map_err(|e| ServerFnError::new(format!("Routing service response invalid: {}", e)))?;

    if body.code != "Ok" {
        tracing::warn!(code = %body.code, "routing service returned no route");
        return Ok(RouteOutcome::NoRoute);
    }

    let Some(route) = body.routes.into_iter().next() else {
        return Ok(RouteOutcome::NoRoute);
    };

    let points = route
        .geometry
        .coordinates
        .into_iter()
        .map(|[lng, lat]| Coordinate::new(lat, lng))
        .collect::<Vec<_>>();

    if points.is_empty() {
        return Ok(RouteOutcome::NoRoute);
    }

    Ok(RouteOutcome::Found(RoutePath {
        points,
        distance_meters: route.distance,
        duration_seconds: route.duration,
    }))
}
