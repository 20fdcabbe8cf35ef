#[cfg(feature = "ssr")]
use shared_types::{Issue, NewIssue};

#[cfg(feature = "ssr")]
use super::entities::IssueRow;
#[cfg(feature = "ssr")]
use super::pool::get_pool;

#[cfg(feature = "ssr")]
const ISSUE_COLUMNS: &str = "
    i.id,
    i.title,
    i.description,
    i.issue_type,
    i.status,
    i.priority,
    i.location_lat,
    i.location_lng,
    i.location_name,
    i.image_url,
    i.reporter_name,
    i.reporter_contact,
    i.created_at,
    i.updated_at,
    c.id AS category_id,
    c.name AS category_name,
    c.color AS category_color,
    c.icon AS category_icon
";

/// Issues with both coordinates present, ready for map rendering.
#[cfg(feature = "ssr")]
pub async fn list_issues_with_location() -> Result<Vec<Issue>, sqlx::Error> {
    let sql = format!(
        "SELECT {ISSUE_COLUMNS}
         FROM issues i
         LEFT JOIN issue_categories c ON c.id = i.category_id
         WHERE i.location_lat IS NOT NULL
           AND i.location_lng IS NOT NULL
         ORDER BY i.created_at"
    );

    let rows = sqlx::query_as::<_, IssueRow>(&sql)
        .fetch_all(get_pool())
        .await?;

    Ok(rows.into_iter().map(Issue::from).collect())
}

#[cfg(feature = "ssr")]
pub async fn insert_issue(new_issue: NewIssue) -> Result<Issue, sqlx::Error> {
    let sql = format!(
        "WITH inserted AS (
             INSERT INTO issues (
                 title, description, category_id, issue_type, priority,
                 location_lat, location_lng, location_name, image_url,
                 reporter_name, reporter_contact
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             RETURNING *
         )
         SELECT {}
         FROM inserted i
         LEFT JOIN issue_categories c ON c.id = i.category_id",
        ISSUE_COLUMNS
    );

    let (lat, lng) = match new_issue.location {
        Some(c) => (Some(c.lat), Some(c.lng)),
        None => (None, None),
    };

    let row = sqlx::query_as::<_, IssueRow>(&sql)
        .bind(new_issue.title)
        .bind(new_issue.description)
        .bind(new_issue.category_id)
        .bind(new_issue.issue_type)
        .bind(new_issue.priority.as_str())
        .bind(lat)
        .bind(lng)
        .bind(new_issue.location_name)
        .bind(new_issue.image_url)
        .bind(new_issue.reporter_name)
        .bind(new_issue.reporter_contact)
        .fetch_one(get_pool())
        .await?;

    Ok(Issue::from(row))
}

#[cfg(feature = "ssr")]
pub async fn delete_issue_by_id(id: &str) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM issues WHERE id = $1")
        .bind(id)
        .execute(get_pool())
        .await?;

    Ok(result.rows_affected())
}
