//! Resource type discovery.
//!
//! An explicit constructor table instead of runtime plugin scanning: the
//! active handler set is deterministic and inspectable, and a new resource
//! type becomes active by adding one line here.

use std::sync::Arc;

use tracing::debug;

use crate::cloud::traits::CloudSession;
use crate::resources::compute::Servers;
use crate::resources::images::Images;
use crate::resources::network::{
    FloatingIps, Networks, Ports, RouterInterfaces, Routers, SecurityGroups,
};
use crate::resources::storage::{Containers, Objects};
use crate::resources::traits::ResourceType;
use crate::resources::volumes::{Snapshots, Volumes};

type HandlerCtor = fn(Arc<dyn CloudSession>, &str) -> Box<dyn ResourceType>;

/// Every known resource type.
const HANDLER_CTORS: &[HandlerCtor] = &[
    |session, project| Box::new(Servers::new(session, project)),
    |session, project| Box::new(FloatingIps::new(session, project)),
    |session, project| Box::new(Snapshots::new(session, project)),
    |session, project| Box::new(Volumes::new(session, project)),
    |session, project| Box::new(RouterInterfaces::new(session, project)),
    |session, project| Box::new(Routers::new(session, project)),
    |session, project| Box::new(Ports::new(session, project)),
    |session, project| Box::new(Networks::new(session, project)),
    |session, project| Box::new(SecurityGroups::new(session, project)),
    |session, project| Box::new(Images::new(session, project)),
    |session, project| Box::new(Objects::new(session, project)),
    |session, project| Box::new(Containers::new(session, project)),
];

/// Instantiate one handler per known resource type, each bound to the
/// shared session and the target project.
pub fn discover(
    session: &Arc<dyn CloudSession>,
    project_id: &str,
) -> Vec<Box<dyn ResourceType>> {
    let handlers: Vec<_> = HANDLER_CTORS
        .iter()
        .map(|ctor| ctor(Arc::clone(session), project_id))
        .collect();

    debug!(
        event = "core.resources.discovered",
        count = handlers.len(),
        project_id = project_id
    );
    handlers
}
