//! Target project resolution.
//!
//! Two modes: purge the project the caller already authenticates as, or
//! purge an arbitrary project by id or name. The second mode requires
//! operator credentials and may grant the caller a temporary membership
//! role on the target; that grant is recorded on the scope and reverted by
//! [`release`] once the sweep is done.

use tracing::{debug, info, warn};

use crate::cloud::traits::CloudSession;
use crate::scope::errors::ScopeError;
use crate::scope::types::ProjectScope;

/// Role granted to reach a foreign project.
pub const ELEVATION_ROLE: &str = "member";

/// Resolve the caller's own project. Never elevates.
pub fn resolve_own(session: &dyn CloudSession) -> Result<ProjectScope, ScopeError> {
    let project_id = session.current_project_id()?;

    // Cosmetic: prefer the project's display name when readable.
    let project_name = match session.find_project(&project_id) {
        Ok(Some(project)) => project.name().unwrap_or(&project_id).to_string(),
        Ok(None) => project_id.clone(),
        Err(e) => {
            debug!(event = "core.scope.name_lookup_failed", error = %e);
            project_id.clone()
        }
    };

    info!(
        event = "core.scope.resolved_own",
        project_id = %project_id
    );

    Ok(ProjectScope {
        project_id,
        project_name,
        elevated: false,
    })
}

/// Resolve a foreign project by id or name, elevating if needed.
///
/// The returned scope records whether a role was actually granted; when the
/// caller already held [`ELEVATION_ROLE`] on the target nothing is owed.
pub fn resolve_project(
    session: &dyn CloudSession,
    identifier: &str,
) -> Result<ProjectScope, ScopeError> {
    let project = session
        .find_project(identifier)?
        .ok_or_else(|| ScopeError::ProjectNotFound {
            identifier: identifier.to_string(),
        })?;

    let project_id = project.id().ok_or(ScopeError::MalformedProject)?.to_string();
    let project_name = project.name().unwrap_or(&project_id).to_string();

    let user_id = session.current_user_id()?;
    let elevated = session.grant_role(&user_id, &project_id, ELEVATION_ROLE)?;

    info!(
        event = "core.scope.resolved_project",
        project_id = %project_id,
        project_name = %project_name,
        elevated = elevated
    );

    Ok(ProjectScope {
        project_id,
        project_name,
        elevated,
    })
}

/// Revert the elevation recorded on a scope.
///
/// No-op for scopes that never elevated. A revoke that fails is logged and
/// surfaced so the operator knows a residual role assignment is left
/// behind, but callers typically run this after the sweep and should not
/// treat it as fatal.
pub fn release(session: &dyn CloudSession, scope: &ProjectScope) -> Result<(), ScopeError> {
    if !scope.elevated {
        return Ok(());
    }

    let user_id = session.current_user_id()?;
    match session.revoke_role(&user_id, &scope.project_id, ELEVATION_ROLE) {
        Ok(()) => {
            info!(
                event = "core.scope.role_revoked",
                project_id = %scope.project_id
            );
            Ok(())
        }
        Err(e) => {
            warn!(
                event = "core.scope.role_revoke_failed",
                project_id = %scope.project_id,
                error = %e
            );
            Err(e.into())
        }
    }
}
