use scour_core::init_logging;

mod app;
mod commands;
mod report;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let app = app::build_cli();
    let matches = app.get_matches();

    // Extract verbose flag before initializing logging
    let verbose = matches.get_flag("verbose");
    init_logging(verbose);

    commands::run_command(&matches)?;

    Ok(())
}
