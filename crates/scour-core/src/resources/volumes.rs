//! Block storage resources: snapshots, then the volumes they were taken
//! from. The volume service refuses to delete a volume that still has
//! snapshots, hence the prerequisite.

use std::sync::Arc;

use crate::cloud::errors::CloudError;
use crate::cloud::traits::CloudSession;
use crate::cloud::types::Resource;
use crate::poll::{PollError, Poller};
use crate::resources::shared;
use crate::resources::traits::ResourceType;

/// The volume service reports ownership under its own vendor-prefixed key,
/// not `project_id`/`tenant_id`.
const VOLUME_OWNER_ATTR: &str = "os-vol-tenant-attr:tenant_id";

pub struct Snapshots {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl Snapshots {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for Snapshots {
    fn name(&self) -> &'static str {
        "Snapshot"
    }

    fn priority(&self) -> u32 {
        10
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        self.session.list_volume_snapshots()
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session
            .delete_volume_snapshot(shared::require_id(resource)?)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!("Snapshot ({})", resource)
    }
}

pub struct Volumes {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl Volumes {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for Volumes {
    fn name(&self) -> &'static str {
        "Volume"
    }

    fn priority(&self) -> u32 {
        15
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn check_prerequisite(&self, poller: &Poller) -> Result<(), PollError> {
        poller.wait_until("volume snapshots empty", || {
            Ok(self.session.list_volume_snapshots()?.is_empty())
        })
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        self.session.list_volumes()
    }

    fn should_delete(&self, resource: &Resource) -> bool {
        resource.str_field(VOLUME_OWNER_ATTR) == Some(&self.project_id)
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session.delete_volume(shared::require_id(resource)?)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!("Volume ({})", resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::poll::CancelToken;
    use std::time::Duration;

    fn fast_poller() -> Poller {
        Poller::new(
            Duration::from_millis(30),
            Duration::from_millis(5),
            CancelToken::new(),
        )
    }

    #[test]
    fn test_volume_ownership_uses_vendor_attribute() {
        let cloud = Arc::new(crate::cloud::testing::FakeCloud::new("p-1"));
        let handler = Volumes::new(cloud, "p-1");

        let mine = crate::cloud::testing::FakeCloud::resource(&[
            ("id", "v-1"),
            (VOLUME_OWNER_ATTR, "p-1"),
        ]);
        let foreign = crate::cloud::testing::FakeCloud::resource(&[
            ("id", "v-2"),
            (VOLUME_OWNER_ATTR, "p-9"),
        ]);
        // A volume that reports no vendor attribute cannot be verified as
        // ours; unlike the default policy, it is retained.
        let unowned = crate::cloud::testing::FakeCloud::resource(&[
            ("id", "v-3"),
            ("project_id", "p-1"),
        ]);

        assert!(handler.should_delete(&mine));
        assert!(!handler.should_delete(&foreign));
        assert!(!handler.should_delete(&unowned));
    }

    #[test]
    fn test_volume_prerequisite_waits_for_snapshots() {
        let cloud = Arc::new(crate::cloud::testing::FakeCloud::new("p-1"));
        cloud.add("snapshots", &[("id", "snap-1"), ("project_id", "p-1")]);

        let handler = Volumes::new(cloud.clone(), "p-1");
        let result = handler.check_prerequisite(&fast_poller());
        assert!(matches!(result, Err(PollError::Timeout { .. })));

        cloud.delete_volume_snapshot("snap-1").expect("clear snapshot");
        assert!(handler.check_prerequisite(&fast_poller()).is_ok());
    }
}
