//! Compute resources. Servers go first: floating IPs and router interfaces
//! both wait for the project's server listing to empty.

use std::sync::Arc;

use crate::cloud::errors::CloudError;
use crate::cloud::traits::CloudSession;
use crate::cloud::types::Resource;
use crate::resources::shared;
use crate::resources::traits::ResourceType;

pub struct Servers {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl Servers {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for Servers {
    fn name(&self) -> &'static str {
        "VM"
    }

    fn priority(&self) -> u32 {
        5
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        self.session.list_servers()
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session.delete_server(shared::require_id(resource)?)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!("VM ({})", resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::testing::FakeCloud;

    #[test]
    fn test_servers_delete_by_id() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.add("servers", &[("id", "s-1"), ("name", "web"), ("project_id", "p-1")]);

        let handler = Servers::new(cloud.clone(), "p-1");
        let listed = handler.list().expect("list");
        assert_eq!(listed.len(), 1);
        assert_eq!(handler.describe(&listed[0]), "VM (id='s-1', name='web')");

        handler.delete(&listed[0]).expect("delete");
        assert_eq!(cloud.calls_matching("delete servers"), vec!["delete servers s-1"]);
        assert!(handler.list().expect("relist").is_empty());
    }
}
