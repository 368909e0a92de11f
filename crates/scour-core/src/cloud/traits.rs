//! Cloud session trait definition.

use crate::cloud::errors::CloudError;
use crate::cloud::types::Resource;

/// Trait defining the interface to an authenticated cloud session.
///
/// The purge pipeline needs exactly two capabilities per resource class -
/// list everything the session can see and delete one object by id - plus
/// a handful of identity operations for resolving the target project. All
/// calls are synchronous; retries, if any, belong to the implementation.
///
/// Implemented by [`crate::cloud::rest::RestSession`] for real clouds and
/// by scripted fakes in tests.
pub trait CloudSession: Send + Sync {
    // Identity

    /// The project this session authenticates as.
    fn current_project_id(&self) -> Result<String, CloudError>;

    /// The user this session authenticates as.
    fn current_user_id(&self) -> Result<String, CloudError>;

    /// Look up a project by id or name. `Ok(None)` when nothing matches.
    fn find_project(&self, name_or_id: &str) -> Result<Option<Resource>, CloudError>;

    /// Grant `role` to `user_id` on `project_id`.
    ///
    /// Returns true if the assignment was newly created, false if the user
    /// already held the role.
    fn grant_role(&self, user_id: &str, project_id: &str, role: &str)
    -> Result<bool, CloudError>;

    /// Remove a role assignment created by [`CloudSession::grant_role`].
    fn revoke_role(&self, user_id: &str, project_id: &str, role: &str)
    -> Result<(), CloudError>;

    // Compute
    fn list_servers(&self) -> Result<Vec<Resource>, CloudError>;
    fn delete_server(&self, id: &str) -> Result<(), CloudError>;

    // Block storage
    fn list_volume_snapshots(&self) -> Result<Vec<Resource>, CloudError>;
    fn delete_volume_snapshot(&self, id: &str) -> Result<(), CloudError>;
    fn list_volumes(&self) -> Result<Vec<Resource>, CloudError>;
    fn delete_volume(&self, id: &str) -> Result<(), CloudError>;

    // Network
    fn list_floating_ips(&self) -> Result<Vec<Resource>, CloudError>;
    fn delete_floating_ip(&self, id: &str) -> Result<(), CloudError>;
    fn list_ports(&self) -> Result<Vec<Resource>, CloudError>;
    fn delete_port(&self, id: &str) -> Result<(), CloudError>;
    /// Detach a router interface port from its router. The port itself is
    /// deleted by the network service as part of the detach.
    fn remove_router_interface(&self, router_id: &str, port_id: &str)
    -> Result<(), CloudError>;
    fn list_routers(&self) -> Result<Vec<Resource>, CloudError>;
    fn delete_router(&self, id: &str) -> Result<(), CloudError>;
    fn list_networks(&self) -> Result<Vec<Resource>, CloudError>;
    fn delete_network(&self, id: &str) -> Result<(), CloudError>;
    fn list_security_groups(&self) -> Result<Vec<Resource>, CloudError>;
    fn delete_security_group(&self, id: &str) -> Result<(), CloudError>;

    // Image
    fn list_images(&self) -> Result<Vec<Resource>, CloudError>;
    fn delete_image(&self, id: &str) -> Result<(), CloudError>;

    // Object storage
    fn list_containers(&self) -> Result<Vec<Resource>, CloudError>;
    fn list_objects(&self, container: &str) -> Result<Vec<Resource>, CloudError>;
    fn delete_object(&self, container: &str, name: &str) -> Result<(), CloudError>;
    fn delete_container(&self, name: &str) -> Result<(), CloudError>;
}
