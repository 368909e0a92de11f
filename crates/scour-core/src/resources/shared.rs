//! Listing logic shared by several handlers.
//!
//! Standalone functions rather than handler state: the network handlers and
//! the object-storage handlers compose these into both `list` and
//! `check_prerequisite`.

use crate::cloud::errors::CloudError;
use crate::cloud::traits::CloudSession;
use crate::cloud::types::Resource;

/// Device owner the network service assigns to its own DHCP ports. Those
/// ports disappear with their network and must not be deleted directly.
const DHCP_DEVICE_OWNER: &str = "network:dhcp";

/// Device owner marking a port as a router interface.
pub const ROUTER_INTERFACE_DEVICE_OWNER: &str = "network:router_interface";

/// Ports owned by the project, excluding the DHCP ports the network
/// service manages itself.
pub fn non_dhcp_ports(
    session: &dyn CloudSession,
    project_id: &str,
) -> Result<Vec<Resource>, CloudError> {
    Ok(session
        .list_ports()?
        .into_iter()
        .filter(|port| port.owner_project() == Some(project_id))
        .filter(|port| port.str_field("device_owner") != Some(DHCP_DEVICE_OWNER))
        .collect())
}

/// Images whose `owner` attribute names the project. Image listings are
/// global on public clouds, so the owner filter happens here.
pub fn images_owned_by(
    session: &dyn CloudSession,
    project_id: &str,
) -> Result<Vec<Resource>, CloudError> {
    Ok(session
        .list_images()?
        .into_iter()
        .filter(|image| image.str_field("owner") == Some(project_id))
        .collect())
}

/// Read a field a delete call cannot do without.
pub fn require_field<'a>(resource: &'a Resource, key: &str) -> Result<&'a str, CloudError> {
    resource.str_field(key).ok_or_else(|| CloudError::Decode {
        message: format!("resource record has no '{}' field: {}", key, resource),
    })
}

pub fn require_id(resource: &Resource) -> Result<&str, CloudError> {
    require_field(resource, "id")
}
