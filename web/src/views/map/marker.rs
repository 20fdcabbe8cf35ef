use shared_types::{Coordinate, Issue, IssueStatus};

/// Everything the map widget needs to draw one issue marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerVisual {
    pub position: Coordinate,
    pub icon_url: String,
    pub icon_size: (f64, f64),
    pub icon_anchor: (f64, f64),
}

/// Status glyph shown inside a category badge.
pub fn status_glyph(status: IssueStatus) -> &'static str {
    match status {
        IssueStatus::Pending => "🔴",
        IssueStatus::InProgress => "🟡",
        IssueStatus::Resolved => "🟢",
        IssueStatus::Closed => "⚪",
    }
}

/// Free-text classification keywords, matched case-insensitively as
/// substrings. The first row that matches wins, so row order is part of the
/// rendering contract: "Broken Ramp" is a ramp issue, not a damage issue.
const TYPE_GLYPHS: &[(&[&str], &str)] = &[
    (&["lift", "elevator"], "♿"),
    (&["ramp"], "🛣️"),
    (&["noise"], "🔊"),
    (&["broken", "repair", "damage"], "🚧"),
    (&["clean", "hygiene"], "🧼"),
    (&["safety", "danger"], "⚠️"),
    (&["parking"], "🅿️"),
];

const GENERIC_PIN: &str = "📍";

pub fn glyph_for_type(issue_type: Option<&str>) -> &'static str {
    let Some(issue_type) = issue_type else {
        return GENERIC_PIN;
    };
    let lowered = issue_type.to_lowercase();
    for (keywords, glyph) in TYPE_GLYPHS {
        if keywords.iter().any(|kw| lowered.contains(kw)) {
            return glyph;
        }
    }
    GENERIC_PIN
}

/// Projects an issue to a renderable marker. Issues without a recorded
/// location yield `None` and are simply not drawn.
pub fn project_marker(issue: &Issue) -> Option<MarkerVisual> {
    let position = issue.location?;

    let icon_url = match &issue.category {
        Some(category) => badge_icon(&category.color, status_glyph(issue.status)),
        None => glyph_icon(glyph_for_type(issue.issue_type.as_deref())),
    };

    Some(MarkerVisual {
        position,
        icon_url,
        icon_size: (32.0, 32.0),
        icon_anchor: (16.0, 16.0),
    })
}

/// Preview marker for a location the user just picked for a new report.
pub fn pending_marker_icon() -> String {
    glyph_icon("🟣")
}

/// Colored circular badge with a status glyph, as an SVG data URL.
fn badge_icon(color: &str, glyph: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='32' height='32' viewBox='0 0 32 32'>\
         <circle cx='16' cy='16' r='14' fill='{color}' stroke='#ffffff' stroke-width='3'/>\
         <text x='16' y='21' text-anchor='middle' font-size='13'>{glyph}</text>\
         </svg>"
    );
    format!("data:image/svg+xml,{}", urlencoding::encode(&svg))
}

/// Bare emoji glyph marker, as an SVG data URL.
fn glyph_icon(glyph: &str) -> String {
    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='32' height='32' viewBox='0 0 32 32'>\
         <text x='16' y='25' text-anchor='middle' font-size='26'>{glyph}</text>\
         </svg>"
    );
    format!("data:image/svg+xml,{}", urlencoding::encode(&svg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{IssueCategory, IssuePriority};

    fn issue_at(lat: f64, lng: f64) -> Issue {
        Issue {
            id: "a1".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            category: None,
            issue_type: None,
            status: IssueStatus::Pending,
            priority: IssuePriority::Medium,
            location: Some(Coordinate::new(lat, lng)),
            location_name: None,
            image_url: None,
            reporter_name: None,
            reporter_contact: None,
            created_at: "2025-08-01T00:00:00+00:00".to_string(),
            updated_at: "2025-08-01T00:00:00+00:00".to_string(),
        }
    }

    fn encoded(glyph: &str) -> String {
        urlencoding::encode(glyph).into_owned()
    }

    #[test]
    fn located_issue_projects_to_exactly_one_marker() {
        let issue = issue_at(13.029, 80.019);
        let visual = project_marker(&issue).unwrap();
        assert_eq!(visual.position, Coordinate::new(13.029, 80.019));
    }

    #[test]
    fn issue_without_location_projects_to_none() {
        let mut issue = issue_at(13.029, 80.019);
        issue.location = None;
        assert_eq!(project_marker(&issue), None);
    }

    #[test]
    fn category_badge_carries_color_and_status_glyph() {
        let mut issue = issue_at(13.029, 80.019);
        issue.category = Some(IssueCategory {
            id: "c1".to_string(),
            name: "Electrical".to_string(),
            color: "#EF4444".to_string(),
            icon: String::new(),
        });

        let url = project_marker(&issue).unwrap().icon_url;
        assert!(url.contains(&encoded("#EF4444")), "{url}");
        assert!(url.contains(&encoded("🔴")), "{url}");
    }

    #[test]
    fn status_change_swaps_glyph_without_new_marker() {
        let mut issue = issue_at(13.029, 80.019);
        issue.category = Some(IssueCategory {
            id: "c1".to_string(),
            name: "Electrical".to_string(),
            color: "#EF4444".to_string(),
            icon: String::new(),
        });

        let pending = project_marker(&issue).unwrap();
        issue.status = IssueStatus::Resolved;
        let resolved = project_marker(&issue).unwrap();

        assert_eq!(pending.position, resolved.position);
        assert!(pending.icon_url.contains(&encoded("🔴")));
        assert!(resolved.icon_url.contains(&encoded("🟢")));
    }

    #[test]
    fn keyword_table_is_matched_in_declared_order() {
        // "ramp" precedes the damage row, so a broken ramp is a ramp issue.
        assert_eq!(glyph_for_type(Some("Broken Ramp")), "🛣️");
        // Without a ramp mention the damage row matches.
        assert_eq!(glyph_for_type(Some("Broken Window")), "🚧");
    }

    #[test]
    fn keyword_matching_is_case_insensitive_substring() {
        assert_eq!(glyph_for_type(Some("ELEVATOR stuck")), "♿");
        assert_eq!(glyph_for_type(Some("lift out of order")), "♿");
        assert_eq!(glyph_for_type(Some("Noisy construction noise")), "🔊");
        assert_eq!(glyph_for_type(Some("unsafe, danger zone")), "⚠️");
        assert_eq!(glyph_for_type(Some("Parking overflow")), "🅿️");
        assert_eq!(glyph_for_type(Some("hygiene concern")), "🧼");
    }

    #[test]
    fn unmatched_or_missing_type_gets_generic_pin() {
        assert_eq!(glyph_for_type(Some("wifi outage")), "📍");
        assert_eq!(glyph_for_type(None), "📍");
    }
}
