use serde::Serialize;

/// The resolved identity of the project being purged.
///
/// Constructed once per run, before any resource handler exists. When
/// `elevated` is true the caller was granted a membership role it did not
/// previously hold and a revert is owed after the sweep (see
/// [`crate::scope::handler::release`]).
#[derive(Debug, Clone, Serialize)]
pub struct ProjectScope {
    pub project_id: String,
    pub project_name: String,
    pub elevated: bool,
}
