//! Image resources.

use std::sync::Arc;

use crate::cloud::errors::CloudError;
use crate::cloud::traits::CloudSession;
use crate::cloud::types::Resource;
use crate::resources::shared;
use crate::resources::traits::ResourceType;

pub struct Images {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl Images {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for Images {
    fn name(&self) -> &'static str {
        "Image"
    }

    fn priority(&self) -> u32 {
        30
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        shared::images_owned_by(self.session.as_ref(), &self.project_id)
    }

    // Image ownership lives under `owner`, not the usual project keys.
    fn should_delete(&self, resource: &Resource) -> bool {
        resource.str_field("owner") == Some(&self.project_id)
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session.delete_image(shared::require_id(resource)?)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!("Image ({})", resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::testing::FakeCloud;

    #[test]
    fn test_images_list_only_owned() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.add("images", &[("id", "img-1"), ("name", "base"), ("owner", "p-1")]);
        cloud.add("images", &[("id", "img-2"), ("name", "ubuntu"), ("owner", "admin")]);

        let handler = Images::new(cloud, "p-1");
        let listed = handler.list().expect("list");
        assert_eq!(listed.len(), 1);
        assert!(handler.should_delete(&listed[0]));
        assert_eq!(handler.describe(&listed[0]), "Image (id='img-1', name='base')");
    }

    #[test]
    fn test_images_should_delete_rejects_foreign_owner() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        let handler = Images::new(cloud, "p-1");
        let foreign = FakeCloud::resource(&[("id", "img-2"), ("owner", "admin")]);
        assert!(!handler.should_delete(&foreign));
    }
}
