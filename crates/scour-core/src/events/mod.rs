use tracing::{error, info, warn};

pub fn log_app_startup() {
    info!(
        event = "core.app.startup_completed",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_purge_target(project_id: &str, project_name: &str, dry_run: bool) {
    // Always visible: the operator should see which project is about to
    // lose its resources, even without --verbose.
    warn!(
        event = "core.app.purge_target_resolved",
        project_id = project_id,
        project_name = project_name,
        dry_run = dry_run,
        "Going to list and/or delete resources from project"
    );
}

pub fn log_app_error(error: &dyn std::error::Error) {
    error!(
        event = "core.app.error_occurred",
        error = %error,
        error_type = std::any::type_name_of_val(error)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_events() {
        // Event functions must not panic
        log_app_startup();
        log_purge_target("p-1", "demo", true);

        let test_error = std::io::Error::other("test");
        log_app_error(&test_error);
    }
}
