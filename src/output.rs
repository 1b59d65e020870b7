//! User-facing console output.
//! Colored prefixes only when stdout is a TTY; plain text otherwise so scripts can parse it.

use owo_colors::OwoColorize;

use crate::fs_ops::{BatchReport, ItemOutcome};
use crate::manifest::ManifestReport;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {msg}");
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {msg}");
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {msg}");
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {msg}");
    }
}

/// One-line summary of a batch plus one warning per failed item.
pub fn print_batch_summary(verb: &str, report: &BatchReport) {
    let line = batch_summary_line(verb, report);
    if report.failed() == 0 {
        print_success(&line);
    } else {
        print_warn(&line);
    }
    for item in report.failures() {
        if let ItemOutcome::Failed { error } = &item.outcome {
            print_warn(&format!("{}: {}", item.name, error));
        }
    }
}

pub fn batch_summary_line(verb: &str, report: &BatchReport) -> String {
    let mut line = format!("{verb} {} of {} file(s)", report.done(), report.len());
    if report.planned() > 0 {
        line.push_str(&format!(", {} planned (dry-run)", report.planned()));
    }
    if report.skipped() > 0 {
        line.push_str(&format!(", {} skipped", report.skipped()));
    }
    if report.failed() > 0 {
        line.push_str(&format!(", {} failed", report.failed()));
    }
    line
}

pub fn print_manifest_summary(report: &ManifestReport, dry_run: bool) {
    if dry_run {
        print_info(&format!(
            "dry-run: would write {} row(s) to {}",
            report.rows,
            report.path.display()
        ));
        return;
    }
    let created = if report.header_written { " (created with header)" } else { "" };
    print_success(&format!(
        "wrote {} row(s) to {}{}",
        report.rows,
        report.path.display(),
        created
    ));
}
