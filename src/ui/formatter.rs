//! Pure formatting functions for UI output.
//!
//! Status lines go to stderr so that stdout carries nothing but the step
//! outputs. Each `display_*` function has a `format_*` counterpart returning
//! the styled line.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::changelog::ChangelogReport;

/// Number of changelog lines shown in the summary
const SUMMARY_LINES: usize = 10;

pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{}", format_success(message));
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{}", format_status(message));
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{}", format_boundary_warning(warning));
}

/// Summary of a changelog pass: entry count, bump type and the first lines.
pub fn format_changelog_summary(report: &ChangelogReport) -> Vec<String> {
    let mut lines = vec![format!(
        "{} ({} entries, {} bump)",
        style("Changelog").bold(),
        report.shas.len(),
        style(report.bump).cyan()
    )];

    let entries: Vec<&str> = report
        .changes
        .lines()
        .filter(|line| line.starts_with("- "))
        .collect();
    for entry in entries.iter().take(SUMMARY_LINES) {
        lines.push(format!("  {}", entry));
    }
    if entries.len() > SUMMARY_LINES {
        lines.push(format!("  ... and {} more", entries.len() - SUMMARY_LINES));
    }

    lines
}

pub fn display_changelog_summary(report: &ChangelogReport) {
    for line in format_changelog_summary(report) {
        eprintln!("{}", line);
    }
}

/// Display the proposed tag change (or initial tag).
///
/// # Arguments
/// * `old_tag` - Previous tag (None if this is the initial tag)
/// * `new_tag` - The new tag being proposed
pub fn display_proposed_tag(old_tag: Option<&str>, new_tag: &str) {
    match old_tag {
        Some(old) => {
            eprintln!("\n{}", style("Proposed Tag Change:").bold());
            eprintln!("  From: {}", style(old).red());
            eprintln!("  To:   {}", style(new_tag).green());
        }
        None => {
            eprintln!("\n{}", style("Initial Tag:").bold());
            eprintln!("  New tag: {}", style(new_tag).green());
        }
    }
}

/// Display manual push instruction for a tag.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    eprintln!(
        "\n{} To push this tag later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}
