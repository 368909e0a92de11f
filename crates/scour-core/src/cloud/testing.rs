//! Scripted in-memory cloud for unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::cloud::errors::CloudError;
use crate::cloud::traits::CloudSession;
use crate::cloud::types::Resource;

/// An in-memory [`CloudSession`] that records every call it receives.
///
/// Deletes actually remove entries, so prerequisite predicates observe the
/// sweep's own progress the way a real cloud would.
#[derive(Default)]
pub struct FakeCloud {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    project_id: String,
    user_id: String,
    projects: Vec<Resource>,
    roles_held: HashSet<(String, String, String)>,
    revoked: Vec<(String, String, String)>,
    collections: HashMap<&'static str, Vec<Resource>>,
    objects: HashMap<String, Vec<Resource>>,
    fail_deletes: HashSet<String>,
    fail_lists: HashSet<&'static str>,
    grant_fails: bool,
    calls: Vec<String>,
}

fn transport(what: &str) -> CloudError {
    CloudError::Transport {
        message: format!("injected failure: {}", what),
    }
}

impl FakeCloud {
    pub fn new(project_id: &str) -> Self {
        let cloud = Self::default();
        {
            let mut state = cloud.state.lock().unwrap();
            state.project_id = project_id.to_string();
            state.user_id = "user-1".to_string();
        }
        cloud
    }

    pub fn resource(fields: &[(&str, &str)]) -> Resource {
        let mut r = Resource::new();
        for (key, value) in fields {
            r.set_field(key, value);
        }
        r
    }

    pub fn add(&self, class: &'static str, fields: &[(&str, &str)]) {
        let r = Self::resource(fields);
        self.state
            .lock()
            .unwrap()
            .collections
            .entry(class)
            .or_default()
            .push(r);
    }

    pub fn add_object(&self, container: &str, fields: &[(&str, &str)]) {
        let r = Self::resource(fields);
        self.state
            .lock()
            .unwrap()
            .objects
            .entry(container.to_string())
            .or_default()
            .push(r);
    }

    pub fn add_project(&self, id: &str, name: &str) {
        let r = Self::resource(&[("id", id), ("name", name)]);
        self.state.lock().unwrap().projects.push(r);
    }

    pub fn hold_role(&self, user_id: &str, project_id: &str, role: &str) {
        self.state.lock().unwrap().roles_held.insert((
            user_id.to_string(),
            project_id.to_string(),
            role.to_string(),
        ));
    }

    pub fn fail_delete(&self, id: &str) {
        self.state.lock().unwrap().fail_deletes.insert(id.to_string());
    }

    pub fn fail_list(&self, class: &'static str) {
        self.state.lock().unwrap().fail_lists.insert(class);
    }

    pub fn fail_grants(&self) {
        self.state.lock().unwrap().grant_fails = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn revoked(&self) -> Vec<(String, String, String)> {
        self.state.lock().unwrap().revoked.clone()
    }

    /// Calls whose entries start with the given prefix, in order.
    pub fn calls_matching(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    fn list(&self, class: &'static str) -> Result<Vec<Resource>, CloudError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("list {}", class));
        if state.fail_lists.contains(class) {
            return Err(transport(class));
        }
        Ok(state.collections.get(class).cloned().unwrap_or_default())
    }

    fn delete(&self, class: &'static str, id: &str) -> Result<(), CloudError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("delete {} {}", class, id));
        if state.fail_deletes.contains(id) {
            return Err(CloudError::Api {
                status: 500,
                message: format!("injected delete failure for '{}'", id),
            });
        }
        let entries = state.collections.entry(class).or_default();
        let before = entries.len();
        entries.retain(|r| r.id() != Some(id) && r.name() != Some(id));
        if entries.len() == before {
            return Err(CloudError::NotFound {
                what: format!("{} '{}'", class, id),
            });
        }
        Ok(())
    }
}

impl CloudSession for FakeCloud {
    fn current_project_id(&self) -> Result<String, CloudError> {
        Ok(self.state.lock().unwrap().project_id.clone())
    }

    fn current_user_id(&self) -> Result<String, CloudError> {
        Ok(self.state.lock().unwrap().user_id.clone())
    }

    fn find_project(&self, name_or_id: &str) -> Result<Option<Resource>, CloudError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .projects
            .iter()
            .find(|p| p.id() == Some(name_or_id) || p.name() == Some(name_or_id))
            .cloned())
    }

    fn grant_role(
        &self,
        user_id: &str,
        project_id: &str,
        role: &str,
    ) -> Result<bool, CloudError> {
        let mut state = self.state.lock().unwrap();
        if state.grant_fails {
            return Err(CloudError::Unauthorized {
                message: "operator credentials required".to_string(),
            });
        }
        let key = (
            user_id.to_string(),
            project_id.to_string(),
            role.to_string(),
        );
        Ok(state.roles_held.insert(key))
    }

    fn revoke_role(&self, user_id: &str, project_id: &str, role: &str) -> Result<(), CloudError> {
        let mut state = self.state.lock().unwrap();
        let key = (
            user_id.to_string(),
            project_id.to_string(),
            role.to_string(),
        );
        state.roles_held.remove(&key);
        state.revoked.push(key);
        Ok(())
    }

    fn list_servers(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("servers")
    }

    fn delete_server(&self, id: &str) -> Result<(), CloudError> {
        self.delete("servers", id)
    }

    fn list_volume_snapshots(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("snapshots")
    }

    fn delete_volume_snapshot(&self, id: &str) -> Result<(), CloudError> {
        self.delete("snapshots", id)
    }

    fn list_volumes(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("volumes")
    }

    fn delete_volume(&self, id: &str) -> Result<(), CloudError> {
        self.delete("volumes", id)
    }

    fn list_floating_ips(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("floating_ips")
    }

    fn delete_floating_ip(&self, id: &str) -> Result<(), CloudError> {
        self.delete("floating_ips", id)
    }

    fn list_ports(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("ports")
    }

    fn delete_port(&self, id: &str) -> Result<(), CloudError> {
        self.delete("ports", id)
    }

    fn remove_router_interface(&self, router_id: &str, port_id: &str) -> Result<(), CloudError> {
        {
            let mut state = self.state.lock().unwrap();
            state
                .calls
                .push(format!("remove_router_interface {} {}", router_id, port_id));
        }
        self.delete("ports", port_id)
    }

    fn list_routers(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("routers")
    }

    fn delete_router(&self, id: &str) -> Result<(), CloudError> {
        self.delete("routers", id)
    }

    fn list_networks(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("networks")
    }

    fn delete_network(&self, id: &str) -> Result<(), CloudError> {
        self.delete("networks", id)
    }

    fn list_security_groups(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("security_groups")
    }

    fn delete_security_group(&self, id: &str) -> Result<(), CloudError> {
        self.delete("security_groups", id)
    }

    fn list_images(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("images")
    }

    fn delete_image(&self, id: &str) -> Result<(), CloudError> {
        self.delete("images", id)
    }

    fn list_containers(&self) -> Result<Vec<Resource>, CloudError> {
        self.list("containers")
    }

    fn list_objects(&self, container: &str) -> Result<Vec<Resource>, CloudError> {
        let state = self.state.lock().unwrap();
        Ok(state.objects.get(container).cloned().unwrap_or_default())
    }

    fn delete_object(&self, container: &str, name: &str) -> Result<(), CloudError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(format!("delete object {}/{}", container, name));
        let entries = state.objects.entry(container.to_string()).or_default();
        let before = entries.len();
        entries.retain(|r| r.name() != Some(name));
        if entries.len() == before {
            return Err(CloudError::NotFound {
                what: format!("object '{}/{}'", container, name),
            });
        }
        Ok(())
    }

    fn delete_container(&self, name: &str) -> Result<(), CloudError> {
        self.delete("containers", name)
    }
}
