use clap::{Arg, ArgAction, ArgGroup, Command};

pub fn build_cli() -> Command {
    Command::new("scour")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Purge every resource an OpenStack project owns")
        .long_about("Scour discovers everything a project owns - servers, volumes, snapshots, images, networks, routers, ports, security groups, containers and objects - and deletes it in an order that never trips over cross-service dependencies. Individual failures are reported at the end instead of aborting the sweep, so a partially-failed run can simply be run again.")
        .arg(
            Arg::new("purge-project")
                .long("purge-project")
                .value_name("ID_OR_NAME")
                .help("Id or name of the project to purge. Requires operator credentials.")
        )
        .arg(
            Arg::new("purge-own-project")
                .long("purge-own-project")
                .help("Purge the project used to authenticate. Useful without operator credentials.")
                .action(ArgAction::SetTrue)
        )
        .group(
            ArgGroup::new("target")
                .args(["purge-project", "purge-own-project"])
                .required(true)
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("List the project's resources without deleting anything")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the final report as JSON instead of text")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("keep-role")
                .long("keep-role")
                .help("Keep the role granted to reach a foreign project instead of revoking it after the sweep")
                .action(ArgAction::SetTrue)
        )
        .arg(
            Arg::new("timeout")
                .long("timeout")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64))
                .help("Prerequisite wait timeout in seconds (overrides config)")
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..))
                .help("Sleep between prerequisite checks in seconds (overrides config)")
        )
}
