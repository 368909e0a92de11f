//! Network resources.
//!
//! The network service enforces most of the dependency order this module
//! encodes: a port cannot go while a server uses it, a network cannot go
//! while non-DHCP ports reference it, a router interface must be detached
//! through its router rather than deleted as a plain port.

use std::sync::Arc;

use crate::cloud::errors::CloudError;
use crate::cloud::traits::CloudSession;
use crate::cloud::types::Resource;
use crate::poll::{PollError, Poller};
use crate::resources::shared;
use crate::resources::traits::ResourceType;

/// Security group every project carries; the network service refuses to
/// delete it.
const DEFAULT_SECURITY_GROUP: &str = "default";

pub struct FloatingIps {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl FloatingIps {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for FloatingIps {
    fn name(&self) -> &'static str {
        "Floating IP"
    }

    fn priority(&self) -> u32 {
        9
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    // A floating IP cannot be released while attached to a server.
    fn check_prerequisite(&self, poller: &Poller) -> Result<(), PollError> {
        poller.wait_until("server list empty", || {
            Ok(self.session.list_servers()?.is_empty())
        })
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        self.session.list_floating_ips()
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session.delete_floating_ip(shared::require_id(resource)?)
    }

    fn describe(&self, resource: &Resource) -> String {
        match resource.id() {
            Some(id) => format!("Floating IP (id='{}')", id),
            None => format!("Floating IP ({})", resource),
        }
    }
}

pub struct RouterInterfaces {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl RouterInterfaces {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for RouterInterfaces {
    fn name(&self) -> &'static str {
        "Router Interface"
    }

    fn priority(&self) -> u32 {
        15
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn check_prerequisite(&self, poller: &Poller) -> Result<(), PollError> {
        poller.wait_until("server list empty", || {
            Ok(self.session.list_servers()?.is_empty())
        })
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        Ok(self
            .session
            .list_ports()?
            .into_iter()
            .filter(|port| {
                port.str_field("device_owner") == Some(shared::ROUTER_INTERFACE_DEVICE_OWNER)
            })
            .collect())
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        let router_id = shared::require_field(resource, "device_id")?;
        let port_id = shared::require_id(resource)?;
        self.session.remove_router_interface(router_id, port_id)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!(
            "Router Interface (id='{}', router_id='{}')",
            resource.id().unwrap_or("?"),
            resource.str_field("device_id").unwrap_or("?")
        )
    }
}

pub struct Routers {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl Routers {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for Routers {
    fn name(&self) -> &'static str {
        "Router"
    }

    fn priority(&self) -> u32 {
        16
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        self.session.list_routers()
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session.delete_router(shared::require_id(resource)?)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!("Router ({})", resource)
    }
}

pub struct Ports {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl Ports {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for Ports {
    fn name(&self) -> &'static str {
        "Port"
    }

    fn priority(&self) -> u32 {
        17
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        shared::non_dhcp_ports(self.session.as_ref(), &self.project_id)
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session.delete_port(shared::require_id(resource)?)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!(
            "Port (id='{}', network_id='{}')",
            resource.id().unwrap_or("?"),
            resource.str_field("network_id").unwrap_or("?")
        )
    }
}

pub struct Networks {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl Networks {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for Networks {
    fn name(&self) -> &'static str {
        "Network"
    }

    fn priority(&self) -> u32 {
        18
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn check_prerequisite(&self, poller: &Poller) -> Result<(), PollError> {
        poller.wait_until("non-DHCP port list empty", || {
            Ok(shared::non_dhcp_ports(self.session.as_ref(), &self.project_id)?.is_empty())
        })
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        self.session.list_networks()
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session.delete_network(shared::require_id(resource)?)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!("Network ({})", resource)
    }
}

pub struct SecurityGroups {
    session: Arc<dyn CloudSession>,
    project_id: String,
}

impl SecurityGroups {
    pub fn new(session: Arc<dyn CloudSession>, project_id: &str) -> Self {
        Self {
            session,
            project_id: project_id.to_string(),
        }
    }
}

impl ResourceType for SecurityGroups {
    fn name(&self) -> &'static str {
        "Security Group"
    }

    fn priority(&self) -> u32 {
        18
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn list(&self) -> Result<Vec<Resource>, CloudError> {
        Ok(self
            .session
            .list_security_groups()?
            .into_iter()
            .filter(|group| group.name() != Some(DEFAULT_SECURITY_GROUP))
            .collect())
    }

    // The listing is already scoped to the project's groups.
    fn should_delete(&self, _resource: &Resource) -> bool {
        true
    }

    fn delete(&self, resource: &Resource) -> Result<(), CloudError> {
        self.session
            .delete_security_group(shared::require_id(resource)?)
    }

    fn describe(&self, resource: &Resource) -> String {
        format!("Security Group ({})", resource)
    }
}
