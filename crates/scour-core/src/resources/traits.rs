//! Resource type handler trait definition.

use tracing::warn;

use crate::cloud::errors::CloudError;
use crate::cloud::types::Resource;
use crate::poll::{PollError, Poller};

/// Trait defining the interface for resource type handlers.
///
/// Each purgable category of cloud object (volume snapshot, router
/// interface, container, ...) implements this trait. A handler is bound to
/// one authenticated session plus the target project id and carries no
/// other state.
pub trait ResourceType: Send + Sync {
    /// Canonical name, used in report lines and logs (e.g. "Snapshot").
    fn name(&self) -> &'static str;

    /// Position in the global deletion order, ascending. Every type must
    /// sort after the types whose resources can reference its own.
    fn priority(&self) -> u32;

    /// The project this handler purges.
    fn project_id(&self) -> &str;

    /// Block until this type's resources are safe to delete.
    ///
    /// Default: no prerequisite. Overrides poll another listing until it
    /// empties out, e.g. volumes wait for their snapshots to be gone.
    fn check_prerequisite(&self, _poller: &Poller) -> Result<(), PollError> {
        Ok(())
    }

    /// All resources of this type visible to the bound session.
    fn list(&self) -> Result<Vec<Resource>, CloudError>;

    /// Whether a listed resource belongs to the purge.
    ///
    /// The default compares the record's ownership key to the target
    /// project. A record with no ownership key is deleted anyway, with a
    /// warning, since ownership cannot be verified either way.
    fn should_delete(&self, resource: &Resource) -> bool {
        match resource.owner_project() {
            Some(owner) => owner == self.project_id(),
            None => {
                warn!(
                    event = "core.resources.owner_unknown",
                    resource_type = self.name(),
                    resource = %resource,
                    "Can't determine owner of resource"
                );
                true
            }
        }
    }

    /// Ask the cloud to remove one resource. Not idempotent: a repeat call
    /// surfaces the cloud's not-found error, which callers tolerate as
    /// "already gone".
    fn delete(&self, resource: &Resource) -> Result<(), CloudError>;

    /// Human-readable identifier for report lines and dry-run output.
    fn describe(&self, resource: &Resource) -> String;
}
