use std::collections::HashMap;

use shared_types::Issue;

/// One change delivered by the store's feed.
#[derive(Debug, Clone, PartialEq)]
pub enum IssueEvent {
    Inserted(Issue),
    Updated(Issue),
    Deleted(String),
}

/// Read-through cache of the visible issue set, keyed by id. Event delivery
/// order is not trusted: upserts apply last-write-wins by the record's own
/// `updated_at`, so duplicates and reordering converge to the same state.
#[derive(Debug, Clone, Default)]
pub struct IssueFeed {
    issues: HashMap<String, Issue>,
}

impl IssueFeed {
    pub fn apply(&mut self, event: IssueEvent) {
        match event {
            IssueEvent::Inserted(issue) | IssueEvent::Updated(issue) => {
                match self.issues.get(&issue.id) {
                    Some(existing) if existing.updated_at > issue.updated_at => {}
                    _ => {
                        self.issues.insert(issue.id.clone(), issue);
                    }
                }
            }
            IssueEvent::Deleted(id) => {
                self.issues.remove(&id);
            }
        }
    }

    /// Issues that can be rendered: both coordinates present. Sorted by id
    /// so successive renders are deterministic.
    pub fn visible(&self) -> Vec<Issue> {
        let mut visible: Vec<Issue> = self
            .issues
            .values()
            .filter(|issue| issue.location.is_some())
            .cloned()
            .collect();
        visible.sort_by(|a, b| a.id.cmp(&b.id));
        visible
    }

    pub fn snapshot(&self) -> Vec<Issue> {
        self.issues.values().cloned().collect()
    }

    /// Turns two store snapshots into feed events. This is the subscription
    /// transport: each poll is diffed against the cache and applied through
    /// the same event path a push feed would use.
    pub fn diff_snapshot(&self, fresh: &[Issue]) -> Vec<IssueEvent> {
        let mut events = Vec::new();
        let fresh_ids: HashMap<&str, &Issue> =
            fresh.iter().map(|issue| (issue.id.as_str(), issue)).collect();

        for issue in fresh {
            match self.issues.get(&issue.id) {
                None => events.push(IssueEvent::Inserted(issue.clone())),
                Some(existing) if existing != issue => {
                    events.push(IssueEvent::Updated(issue.clone()))
                }
                Some(_) => {}
            }
        }
        for id in self.issues.keys() {
            if !fresh_ids.contains_key(id.as_str()) {
                events.push(IssueEvent::Deleted(id.clone()));
            }
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::map::marker::project_marker;
    use shared_types::{Coordinate, IssuePriority, IssueStatus};

    fn issue(id: &str, updated_at: &str) -> Issue {
        Issue {
            id: id.to_string(),
            title: format!("Issue {id}"),
            description: String::new(),
            category: None,
            issue_type: Some("noise".to_string()),
            status: IssueStatus::Pending,
            priority: IssuePriority::Medium,
            location: Some(Coordinate::new(13.029, 80.019)),
            location_name: None,
            image_url: None,
            reporter_name: None,
            reporter_contact: None,
            created_at: "2025-08-01T00:00:00+00:00".to_string(),
            updated_at: updated_at.to_string(),
        }
    }

    #[test]
    fn out_of_order_updates_converge_to_last_write() {
        let newer = {
            let mut i = issue("a1", "2025-08-01T12:00:00+00:00");
            i.status = IssueStatus::Resolved;
            i
        };
        let older = issue("a1", "2025-08-01T10:00:00+00:00");

        let mut ab = IssueFeed::default();
        ab.apply(IssueEvent::Updated(older.clone()));
        ab.apply(IssueEvent::Updated(newer.clone()));

        let mut ba = IssueFeed::default();
        ba.apply(IssueEvent::Updated(newer.clone()));
        ba.apply(IssueEvent::Updated(older));

        assert_eq!(ab.visible(), ba.visible());
        assert_eq!(ab.visible()[0].status, IssueStatus::Resolved);
    }

    #[test]
    fn duplicate_delivery_is_idempotent() {
        let mut feed = IssueFeed::default();
        let record = issue("a1", "2025-08-01T10:00:00+00:00");
        feed.apply(IssueEvent::Inserted(record.clone()));
        feed.apply(IssueEvent::Inserted(record));
        assert_eq!(feed.visible().len(), 1);
    }

    #[test]
    fn unlocated_issues_are_cached_but_never_visible() {
        let mut feed = IssueFeed::default();
        let mut unlocated = issue("a1", "2025-08-01T10:00:00+00:00");
        unlocated.location = None;
        feed.apply(IssueEvent::Inserted(unlocated));
        assert!(feed.visible().is_empty());
        assert_eq!(feed.snapshot().len(), 1);
    }

    #[test]
    fn delete_removes_the_record() {
        let mut feed = IssueFeed::default();
        feed.apply(IssueEvent::Inserted(issue("a1", "2025-08-01T10:00:00+00:00")));
        feed.apply(IssueEvent::Deleted("a1".to_string()));
        assert!(feed.visible().is_empty());
    }

    #[test]
    fn snapshot_diff_detects_insert_update_delete() {
        let mut feed = IssueFeed::default();
        feed.apply(IssueEvent::Inserted(issue("a1", "2025-08-01T10:00:00+00:00")));
        feed.apply(IssueEvent::Inserted(issue("a2", "2025-08-01T10:00:00+00:00")));

        let mut changed = issue("a2", "2025-08-01T11:00:00+00:00");
        changed.status = IssueStatus::InProgress;
        let fresh = vec![changed.clone(), issue("a3", "2025-08-01T11:00:00+00:00")];

        let mut events = feed.diff_snapshot(&fresh);
        events.sort_by_key(|e| match e {
            IssueEvent::Inserted(i) => (0, i.id.clone()),
            IssueEvent::Updated(i) => (1, i.id.clone()),
            IssueEvent::Deleted(id) => (2, id.clone()),
        });

        assert_eq!(
            events,
            vec![
                IssueEvent::Inserted(issue("a3", "2025-08-01T11:00:00+00:00")),
                IssueEvent::Updated(changed),
                IssueEvent::Deleted("a1".to_string()),
            ]
        );
    }

    #[test]
    fn status_update_replaces_glyph_without_second_marker() {
        let mut feed = IssueFeed::default();
        let mut pending = issue("a1", "2025-08-01T10:00:00+00:00");
        pending.category = Some(shared_types::IssueCategory {
            id: "c1".to_string(),
            name: "General".to_string(),
            color: "#EF4444".to_string(),
            icon: String::new(),
        });
        feed.apply(IssueEvent::Inserted(pending.clone()));

        let markers: Vec<_> = feed.visible().iter().filter_map(project_marker).collect();
        assert_eq!(markers.len(), 1);
        assert!(markers[0]
            .icon_url
            .contains(&urlencoding::encode("🔴").into_owned()));

        let mut resolved = pending;
        resolved.status = IssueStatus::Resolved;
        resolved.updated_at = "2025-08-01T12:00:00+00:00".to_string();
        feed.apply(IssueEvent::Updated(resolved));

        let markers: Vec<_> = feed.visible().iter().filter_map(project_marker).collect();
        assert_eq!(markers.len(), 1);
        assert!(markers[0]
            .icon_url
            .contains(&urlencoding::encode("🟢").into_owned()));
    }
}
