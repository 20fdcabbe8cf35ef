use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStatus {
    Pending,
    InProgress,
    Resolved,
    Closed,
}

impl IssueStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueStatus::Pending => "pending",
            IssueStatus::InProgress => "in_progress",
            IssueStatus::Resolved => "resolved",
            IssueStatus::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(IssueStatus::Pending),
            "in_progress" => Some(IssueStatus::InProgress),
            "resolved" => Some(IssueStatus::Resolved),
            "closed" => Some(IssueStatus::Closed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssuePriority {
    Low,
    Medium,
    High,
    Critical,
}

impl IssuePriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuePriority::Low => "low",
            IssuePriority::Medium => "medium",
            IssuePriority::High => "high",
            IssuePriority::Critical => "critical",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(IssuePriority::Low),
            "medium" => Some(IssuePriority::Medium),
            "high" => Some(IssuePriority::High),
            "critical" => Some(IssuePriority::Critical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueCategory {
    pub id: String,
    pub name: String,
    pub color: String,
    pub icon: String,
}

/// An issue record as served by the store. The map only ever holds a
/// read-through cache of these; the store owns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Set when the issue was filed against a managed category.
    pub category: Option<IssueCategory>,
    /// Free-text classification used when no category applies.
    pub issue_type: Option<String>,
    pub status: IssueStatus,
    pub priority: IssuePriority,
    pub location: Option<Coordinate>,
    pub location_name: Option<String>,
    pub image_url: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
    /// RFC 3339 timestamps. `updated_at` is the store's own write clock and
    /// decides last-write-wins when feed events arrive out of order.
    pub created_at: String,
    pub updated_at: String,
}

/// Fields accepted by the store when creating an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    pub description: String,
    pub category_id: Option<String>,
    pub issue_type: Option<String>,
    pub priority: IssuePriority,
    pub location: Option<Coordinate>,
    pub location_name: Option<String>,
    pub image_url: Option<String>,
    pub reporter_name: Option<String>,
    pub reporter_contact: Option<String>,
}
