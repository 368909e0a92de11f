//! Object storage resources: objects first, then their containers.
//!
//! Objects wait for the project's images to be gone because image data can
//! be backed by the object store; deleting the backing object first leaves
//! an image the image service can no longer remove.

use std::sync::Arc;

use crate::cloud::errors::CloudError;
use crate::cloud::traits::CloudSession;
use crate::cloud::types::Resource;
use crate::poll::{PollError, Poller};
use crate::resources::shared;
use crate::resources::traits::ResourceType;

/// Key an object is tagged with during listing so the delete call knows
/// which container it lives in.
const CONTAINER_KEY: &str = "container_name";

pub struct Objects {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl Objects {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for Objects {
    fn name(&self) -> &'static str {
        "Object"
    }

    fn priority(&self) -> u32 {
        100
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn check_prerequisite(&self, poller: &Poller) -> Result<(), PollError> {
        poller.wait_until("owned image list empty", || {
            Ok(shared::images_owned_by(self.session.as_ref(), &self.project_id)?.is_empty())
        })
    }

    /// Nested listing: every object of every container, each tagged with
    /// its container since the delete call needs both keys.
    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        let mut objects = Vec::new();
        for container in self.session.list_containers()? {
            let container_name = shared::require_field(&container, "name")?;
            for mut object in self.session.list_objects(container_name)? {
                object.set_field(CONTAINER_KEY, container_name);
                objects.push(object);
            }
        }
        Ok(objects)
    }

    // The account's containers are the project's containers; ownership is
    // established by the listing itself.
    fn should_delete(&self, _resource: &Resource) -> bool {
        true
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        let container = shared::require_field(resource, CONTAINER_KEY)?;
        let name = shared::require_field(resource, "name")?;
        self.session.delete_object(container, name)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!(
            "Object '{}' from Container '{}'",
            resource.name().unwrap_or("?"),
            resource.str_field(CONTAINER_KEY).unwrap_or("?")
        )
    }
}

pub struct Containers {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl Containers {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for Containers {
    fn name(&self) -> &'static str {
        "Container"
    }

    fn priority(&self) -> u32 {
        101
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        self.session.list_containers()
    }

    fn should_delete(&self, _resource: &Resource) -> bool {
        true
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session
            .delete_container(shared::require_field(resource, "name")?)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!("Container (name='{}')", resource.name().unwrap_or("?"))
    }
}
