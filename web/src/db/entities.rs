#[cfg(feature = "ssr")]
use chrono::{DateTime, Utc};
#[cfg(feature = "ssr")]
use shared_types::{Coordinate, Issue, IssueCategory, IssuePriority, IssueStatus};

/// Flat issue row as selected from `issues` joined with `issue_categories`.
#[cfg(feature = "ssr")]
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct IssueRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub issue_type: Option<String>,
    pub status: String,
    pub priority: String,
    pub location_lat: Option<f64>,
    pub location_lng: Option<f64>,
    pub location_name: Option<String>,
    pub image_url: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_id: Option<String>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub category_icon: Option<String>,
}

#[cfg(feature = "ssr")]
impl From<IssueRow> for Issue {
    fn from(row: IssueRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(IssueCategory {
                id,
                name,
                color: row.category_color.unwrap_or_else(|| "#3B82F6".to_string()),
                icon: row.category_icon.unwrap_or_default(),
            }),
            _ => None,
        };

        let location = match (row.location_lat, row.location_lng) {
            (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
            _ => None,
        };

        Issue {
            id: row.id,
            title: row.title,
            description: row.description,
            category,
            issue_type: row.issue_type,
            status: IssueStatus::parse(&row.status).unwrap_or(IssueStatus::Pending),
            priority: IssuePriority::parse(&row.priority).unwrap_or(IssuePriority::Medium),
            location,
            location_name: row.location_name,
            image_url: row.image_url,
            reporter_name: row.reporter_name,
            reporter_contact: row.reporter_contact,
            created_at: row.created_at.to_rfc3339(),
            updated_at: row.updated_at.to_rfc3339(),
        }
    }
}
