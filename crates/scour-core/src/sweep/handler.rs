//! The purge orchestrator.
//!
//! Drives every discovered handler through prerequisite, list, filter and
//! delete, strictly one priority tier after another. Everything that goes
//! wrong below the setup phase is recorded in the report instead of
//! raised; only an operator interrupt stops the sweep mid-flight.

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::poll::{PollError, Poller};
use crate::resources::traits::ResourceType;
use crate::sweep::errors::SweepError;
use crate::sweep::types::{PurgeReport, TypeReport};

/// Run one sweep over the given handlers.
///
/// Handlers are processed in ascending priority order; no delete for a
/// later tier is issued before the earlier tier's pass has fully
/// completed. With `dry_run` the plan is recorded and no delete call is
/// made.
pub fn run_sweep(
    project_id: &str,
    mut handlers: Vec<Box<dyn ResourceType>>,
    poller: &Poller,
    dry_run: bool,
) -> Result<PurgeReport, SweepError> {
    handlers.sort_by_key(|h| (h.priority(), h.name()));

    info!(
        event = "core.sweep.started",
        project_id = project_id,
        dry_run = dry_run,
        types = handlers.len()
    );

    let mut report = PurgeReport::new(project_id, dry_run);

    for handler in &handlers {
        if poller.cancel_token().is_cancelled() {
            return Err(interrupted(report));
        }

        let mut pass = TypeReport::new(handler.name(), handler.priority());
        debug!(
            event = "core.sweep.type_started",
            resource_type = handler.name(),
            priority = handler.priority()
        );

        match handler.check_prerequisite(poller) {
            Ok(()) => {}
            Err(PollError::Interrupted { .. }) => {
                report.types.push(pass);
                return Err(interrupted(report));
            }
            Err(e) => {
                // This type is skipped for the run, not retried; later
                // types still get their pass.
                warn!(
                    event = "core.sweep.prerequisite_failed",
                    resource_type = handler.name(),
                    error = %e
                );
                pass.prerequisite_failure = Some(e.to_string());
                report.types.push(pass);
                continue;
            }
        }

        let resources = match handler.list() {
            Ok(resources) => resources,
            Err(e) => {
                error!(
                    event = "core.sweep.list_failed",
                    resource_type = handler.name(),
                    error = %e
                );
                pass.list_failure = Some(e.to_string());
                report.types.push(pass);
                continue;
            }
        };
        pass.listed = resources.len();

        for resource in &resources {
            if poller.cancel_token().is_cancelled() {
                report.types.push(pass);
                return Err(interrupted(report));
            }

            if !handler.should_delete(resource) {
                debug!(
                    event = "core.sweep.resource_skipped",
                    resource_type = handler.name(),
                    resource = %resource
                );
                pass.skipped += 1;
                continue;
            }

            let line = handler.describe(resource);

            if dry_run {
                info!(event = "core.sweep.would_delete", resource = %line);
                pass.would_delete += 1;
                pass.lines.push(line);
                continue;
            }

            info!(event = "core.sweep.deleting", resource = %line);
            match handler.delete(resource) {
                Ok(()) => {
                    pass.deleted += 1;
                    pass.lines.push(line);
                }
                Err(e) if e.is_not_found() => {
                    // Someone else won the race; the goal state holds.
                    warn!(
                        event = "core.sweep.already_gone",
                        resource = %line
                    );
                    pass.already_gone += 1;
                }
                Err(e) => {
                    error!(
                        event = "core.sweep.delete_failed",
                        resource = %line,
                        error = %e
                    );
                    pass.failed += 1;
                    pass.failures.push(format!("{}: {}", line, e));
                }
            }
        }

        report.types.push(pass);
    }

    report.finished_at = Utc::now();
    info!(
        event = "core.sweep.completed",
        deleted = report.total_deleted(),
        would_delete = report.total_would_delete(),
        failed = report.total_failed(),
        abandoned_types = report.abandoned_types()
    );
    Ok(report)
}

fn interrupted(mut report: PurgeReport) -> SweepError {
    report.finished_at = Utc::now();
    warn!(
        event = "core.sweep.interrupted",
        deleted_so_far = report.total_deleted()
    );
    SweepError::Interrupted {
        partial: Box::new(report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloud::testing::FakeCloud;
    use crate::cloud::traits::CloudSession;
    use crate::poll::CancelToken;
    use crate::resources::registry;
    use std::sync::Arc;
    use std::time::Duration;

    fn fast_poller() -> Poller {
        Poller::new(
            Duration::from_millis(30),
            Duration::from_millis(5),
            CancelToken::new(),
        )
    }

    fn discover(cloud: &Arc<FakeCloud>) -> Vec<Box<dyn ResourceType>> {
        let session: Arc<dyn CloudSession> = cloud.clone();
        registry::discover(&session, "p-1")
    }

    fn position(calls: &[String], entry: &str) -> usize {
        calls
            .iter()
            .position(|c| c == entry)
            .unwrap_or_else(|| panic!("call '{}' not found in {:?}", entry, calls))
    }

    #[test]
    fn test_snapshot_deleted_before_volume_prerequisite_clears() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.add("snapshots", &[("id", "snap-1"), ("project_id", "p-1")]);
        cloud.add(
            "volumes",
            &[("id", "vol-1"), ("os-vol-tenant-attr:tenant_id", "p-1")],
        );

        let report =
            run_sweep("p-1", discover(&cloud), &fast_poller(), false).expect("sweep");

        let calls = cloud.calls();
        assert!(
            position(&calls, "delete snapshots snap-1")
                < position(&calls, "delete volumes vol-1")
        );
        assert_eq!(report.type_report("Snapshot").expect("snapshot").deleted, 1);
        assert_eq!(report.type_report("Volume").expect("volume").deleted, 1);
        assert_eq!(report.total_failed(), 0);
    }

    #[test]
    fn test_tiers_ordered_regardless_of_discovery_order() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.add("servers", &[("id", "s-1"), ("project_id", "p-1")]);
        cloud.add("snapshots", &[("id", "snap-1"), ("project_id", "p-1")]);
        cloud.add("images", &[("id", "img-1"), ("owner", "p-1")]);

        let mut handlers = discover(&cloud);
        handlers.reverse();

        run_sweep("p-1", handlers, &fast_poller(), false).expect("sweep");

        let calls = cloud.calls();
        let server = position(&calls, "delete servers s-1");
        let snapshot = position(&calls, "delete snapshots snap-1");
        let image = position(&calls, "delete images img-1");
        assert!(server < snapshot);
        assert!(snapshot < image);
    }

    #[test]
    fn test_lingering_port_blocks_networks_only() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.add(
            "ports",
            &[("id", "port-1"), ("project_id", "p-1"), ("device_owner", "compute:nova")],
        );
        cloud.fail_delete("port-1");
        cloud.add("networks", &[("id", "net-1"), ("project_id", "p-1")]);
        cloud.add("networks", &[("id", "net-2"), ("project_id", "p-1")]);
        cloud.add("containers", &[("name", "backups")]);

        let report =
            run_sweep("p-1", discover(&cloud), &fast_poller(), false).expect("sweep");

        let ports = report.type_report("Port").expect("port");
        assert_eq!(ports.failed, 1);

        let networks = report.type_report("Network").expect("network");
        assert!(networks.prerequisite_failure.is_some());
        assert_eq!(networks.deleted, 0);
        assert!(cloud.calls_matching("delete networks").is_empty());

        // Later tiers still ran.
        assert_eq!(report.type_report("Container").expect("container").deleted, 1);
    }

    #[test]
    fn test_dry_run_is_idempotent_and_deletes_nothing() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.add("servers", &[("id", "s-1"), ("name", "web"), ("project_id", "p-1")]);
        cloud.add("routers", &[("id", "r-1"), ("name", "gw"), ("project_id", "p-1")]);
        cloud.add("security_groups", &[("id", "sg-1"), ("name", "web")]);
        cloud.add("containers", &[("name", "backups")]);
        cloud.add_object("backups", &[("name", "db.dump")]);

        let first =
            run_sweep("p-1", discover(&cloud), &fast_poller(), true).expect("first run");
        let second =
            run_sweep("p-1", discover(&cloud), &fast_poller(), true).expect("second run");

        let first_lines: Vec<_> = first.lines().collect();
        let second_lines: Vec<_> = second.lines().collect();
        assert_eq!(first_lines, second_lines);
        assert!(first.total_would_delete() > 0);
        assert_eq!(first.total_deleted(), 0);

        assert!(cloud.calls_matching("delete").is_empty());
        assert!(cloud.calls_matching("remove_router_interface").is_empty());
    }

    #[test]
    fn test_delete_failure_does_not_stop_type_or_later_types() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.add("servers", &[("id", "s-1"), ("project_id", "p-1")]);
        cloud.add("servers", &[("id", "s-2"), ("project_id", "p-1")]);
        cloud.fail_delete("s-1");
        cloud.add("snapshots", &[("id", "snap-1"), ("project_id", "p-1")]);

        let report =
            run_sweep("p-1", discover(&cloud), &fast_poller(), false).expect("sweep");

        let servers = report.type_report("VM").expect("vm");
        assert_eq!(servers.failed, 1);
        assert_eq!(servers.deleted, 1);
        assert_eq!(cloud.calls_matching("delete servers").len(), 2);

        assert_eq!(report.type_report("Snapshot").expect("snapshot").deleted, 1);
    }

    #[test]
    fn test_not_found_on_delete_counts_as_already_gone() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        // Two listing entries with the same id: the first delete removes
        // both from the fake, so the second surfaces not-found.
        cloud.add("containers", &[("name", "dup")]);
        cloud.add("containers", &[("name", "dup")]);

        let report =
            run_sweep("p-1", discover(&cloud), &fast_poller(), false).expect("sweep");

        let containers = report.type_report("Container").expect("container");
        assert_eq!(containers.listed, 2);
        assert_eq!(containers.deleted, 1);
        assert_eq!(containers.already_gone, 1);
        assert_eq!(containers.failed, 0);
    }

    #[test]
    fn test_list_failure_abandons_type_only() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.fail_list("routers");
        cloud.add("networks", &[("id", "net-1"), ("project_id", "p-1")]);

        let report =
            run_sweep("p-1", discover(&cloud), &fast_poller(), false).expect("sweep");

        let routers = report.type_report("Router").expect("router");
        assert!(routers.list_failure.is_some());
        assert!(routers.abandoned());

        assert_eq!(report.type_report("Network").expect("network").deleted, 1);
    }

    #[test]
    fn test_foreign_resources_are_skipped_silently() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.add("servers", &[("id", "theirs"), ("project_id", "p-2")]);
        cloud.add("servers", &[("id", "ours"), ("project_id", "p-1")]);

        let report =
            run_sweep("p-1", discover(&cloud), &fast_poller(), false).expect("sweep");

        let servers = report.type_report("VM").expect("vm");
        assert_eq!(servers.listed, 2);
        assert_eq!(servers.skipped, 1);
        assert_eq!(servers.deleted, 1);
        assert!(cloud.calls_matching("delete servers theirs").is_empty());
    }

    #[test]
    fn test_cancelled_token_interrupts_before_any_call() {
        let cloud = Arc::new(FakeCloud::new("p-1"));
        cloud.add("servers", &[("id", "s-1"), ("project_id", "p-1")]);

        let cancel = CancelToken::new();
        cancel.cancel();
        let poller = Poller::new(
            Duration::from_millis(30),
            Duration::from_millis(5),
            cancel,
        );

        let result = run_sweep("p-1", discover(&cloud), &poller, false);
        assert!(matches!(result, Err(SweepError::Interrupted { .. })));
        assert!(cloud.calls_matching("delete").is_empty());
    }
}
