//! Purge report types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Outcome of one resource type's pass.
#[derive(Debug, Clone, Serialize)]
pub struct TypeReport {
    pub name: String,
    pub priority: u32,

    /// Resources the listing returned.
    pub listed: usize,
    /// Listed but not owned by the target project.
    pub skipped: usize,
    pub deleted: usize,
    pub would_delete: usize,
    /// Deletes that surfaced not-found: something else removed the
    /// resource first. Expected on re-runs.
    pub already_gone: usize,
    pub failed: usize,

    /// Why the whole pass was abandoned, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prerequisite_failure: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_failure: Option<String>,

    /// One description per deleted or would-delete resource, in order.
    pub lines: Vec<String>,
    /// One entry per failed delete, with the underlying error.
    pub failures: Vec<String>,
}

impl TypeReport {
    pub fn new(name: &str, priority: u32) -> Self {
        Self {
            name: name.to_string(),
            priority,
            listed: 0,
            skipped: 0,
            deleted: 0,
            would_delete: 0,
            already_gone: 0,
            failed: 0,
            prerequisite_failure: None,
            list_failure: None,
            lines: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// Whether the pass was abandoned before any delete was attempted.
    pub fn abandoned(&self) -> bool {
        self.prerequisite_failure.is_some() || self.list_failure.is_some()
    }
}

/// The full outcome of one sweep, in priority order.
#[derive(Debug, Clone, Serialize)]
pub struct PurgeReport {
    pub project_id: String,
    pub dry_run: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub types: Vec<TypeReport>,
}

impl PurgeReport {
    pub fn new(project_id: &str, dry_run: bool) -> Self {
        let now = Utc::now();
        Self {
            project_id: project_id.to_string(),
            dry_run,
            started_at: now,
            finished_at: now,
            types: Vec::new(),
        }
    }

    pub fn type_report(&self, name: &str) -> Option<&TypeReport> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn total_deleted(&self) -> usize {
        self.types.iter().map(|t| t.deleted).sum()
    }

    pub fn total_would_delete(&self) -> usize {
        self.types.iter().map(|t| t.would_delete).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.types.iter().map(|t| t.failed).sum()
    }

    pub fn abandoned_types(&self) -> usize {
        self.types.iter().filter(|t| t.abandoned()).count()
    }

    /// All description lines across types, in deletion order.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.types.iter().flat_map(|t| t.lines.iter().map(String::as_str))
    }
}
