use std::sync::Arc;

use clap::ArgMatches;
use tracing::{error, warn};

use scour_core::cloud::RestSession;
use scour_core::poll::{CancelToken, Poller};
use scour_core::sweep::SweepError;
use scour_core::{CloudSession, config, events, resources, scope_ops, sweep_ops};

use crate::report;

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_app_startup();

    let dry_run = matches.get_flag("dry-run");
    let json = matches.get_flag("json");
    let keep_role = matches.get_flag("keep-role");

    let mut config = config::load()?;
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config.poll.timeout_secs = *timeout;
    }
    if let Some(interval) = matches.get_one::<u64>("interval") {
        config.poll.interval_secs = *interval;
    }
    config::validate_credentials(&config)?;

    let cancel = CancelToken::new();
    register_signal_handlers(&cancel)?;

    // The operator session resolves the target and, for foreign projects,
    // handles the role grant; the sweep itself runs through a session
    // scoped to the target so every listing is project-bound.
    let operator = RestSession::connect(config.auth.clone())?;

    let scope = match matches.get_one::<String>("purge-project") {
        Some(identifier) => scope_ops::resolve_project(&operator, identifier)?,
        None => scope_ops::resolve_own(&operator)?,
    };
    events::log_purge_target(&scope.project_id, &scope.project_name, dry_run);

    let session: Arc<dyn CloudSession> = Arc::new(operator.rescope(&scope.project_id)?);
    let handlers = resources::discover(&session, &scope.project_id);
    let poller = Poller::from_config(&config.poll, cancel);

    let result = sweep_ops::run_sweep(&scope.project_id, handlers, &poller, dry_run);

    // Revert the elevation whatever the sweep did; a stuck revoke is
    // reported but must not mask the sweep outcome.
    if scope.elevated {
        if keep_role {
            warn!(
                event = "cli.role_kept",
                project_id = %scope.project_id,
                "Leaving granted role in place as requested"
            );
        } else if let Err(e) = scope_ops::release(&operator, &scope) {
            error!(event = "cli.role_revoke_failed", error = %e);
        }
    }

    match result {
        Ok(sweep_report) => {
            report::print(&sweep_report, json);
            Ok(())
        }
        Err(SweepError::Interrupted { partial }) => {
            report::print(&partial, json);
            Err("Sweep interrupted by operator".into())
        }
    }
}

fn register_signal_handlers(cancel: &CancelToken) -> Result<(), std::io::Error> {
    signal_hook::flag::register(signal_hook::consts::SIGINT, cancel.flag())?;
    signal_hook::flag::register(signal_hook::consts::SIGTERM, cancel.flag())?;
    Ok(())
}
