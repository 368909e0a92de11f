//! Final report rendering.

use scour_core::{PurgeReport, TypeReport};

/// Print the sweep report to stdout: one line per deleted or would-delete
/// resource, then failures, then a per-type summary.
pub fn print(report: &PurgeReport, json: bool) {
    if json {
        let rendered =
            serde_json::to_string_pretty(report).expect("purge report serializes to JSON");
        println!("{}", rendered);
        return;
    }

    let verb = if report.dry_run { "Would delete" } else { "Deleted" };
    for line in report.lines() {
        println!("{}: {}", verb, line);
    }

    for pass in &report.types {
        for failure in &pass.failures {
            println!("Failed: {}", failure);
        }
    }

    println!();
    for pass in &report.types {
        if let Some(line) = summarize(pass, report.dry_run) {
            println!("{}", line);
        }
    }
    println!(
        "Total: deleted={} would_delete={} failed={} abandoned_types={}",
        report.total_deleted(),
        report.total_would_delete(),
        report.total_failed(),
        report.abandoned_types()
    );
}

/// One summary line per type that had anything to say; quiet types are
/// omitted to keep the trailer short.
fn summarize(pass: &TypeReport, dry_run: bool) -> Option<String> {
    if let Some(reason) = &pass.prerequisite_failure {
        return Some(format!("{}: failed_prerequisite=1 ({})", pass.name, reason));
    }
    if let Some(reason) = &pass.list_failure {
        return Some(format!("{}: failed_listing=1 ({})", pass.name, reason));
    }

    let touched = if dry_run { pass.would_delete } else { pass.deleted };
    if touched == 0 && pass.failed == 0 && pass.already_gone == 0 {
        return None;
    }

    let mut line = format!(
        "{}: {}={}",
        pass.name,
        if dry_run { "would_delete" } else { "deleted" },
        touched
    );
    if pass.failed > 0 {
        line.push_str(&format!(" failed={}", pass.failed));
    }
    if pass.already_gone > 0 {
        line.push_str(&format!(" already_gone={}", pass.already_gone));
    }
    if pass.skipped > 0 {
        line.push_str(&format!(" skipped={}", pass.skipped));
    }
    Some(line)
}
