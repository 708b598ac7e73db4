//! Output formatting and styling module.
//!
//! All console output of a run goes through [`OutputFormatter`]: colored
//! status lines, the move progress bar and the closing summary table.
//! Warnings and errors are always shown; everything else is dropped in quiet
//! mode.

use crate::album_organizer::{MoveReport, PlannedMove};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::BTreeMap;

/// Manages all CLI output with consistent styling.
///
/// - Success messages (green with ✓)
/// - Error messages (red with ✗, on stderr)
/// - Warning messages (yellow with ⚠, on stderr)
/// - Info messages (cyan)
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter {
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    /// Prints a success message in green with a checkmark.
    pub fn success(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", "✓".green(), message);
        }
    }

    /// Prints an error message in red with an X mark. Never silenced.
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a warning message in yellow. Never silenced.
    pub fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Prints an info message in cyan.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{}", message.cyan());
        }
    }

    /// Prints a regular message without styling.
    pub fn plain(&self, message: &str) {
        if !self.quiet {
            println!("{}", message);
        }
    }

    /// Prints a section header.
    pub fn header(&self, header: &str) {
        if !self.quiet {
            println!("\n{}", header.bold());
        }
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(&self, message: &str) {
        if !self.quiet {
            println!("{}", format!("[DRY RUN] {}", message).yellow());
        }
    }

    /// Prints one planned move as `old name → new location`.
    pub fn planned_move(&self, planned: &PlannedMove, relative_destination: &str) {
        if self.quiet {
            return;
        }
        if planned.is_noop() {
            println!("  {} {}", "=".dimmed(), planned.original_name.dimmed());
        } else {
            println!(
                "  {} {} {}",
                planned.original_name,
                "→".cyan(),
                relative_destination.green()
            );
        }
    }

    /// Creates the progress bar shown while tracks are moved.
    ///
    /// Hidden in quiet mode.
    pub fn create_progress_bar(&self, total: u64) -> ProgressBar {
        if self.quiet {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        pb.set_style(style);
        pb
    }

    /// Prints the per-directory summary of a finished run.
    pub fn summary_table(&self, report: &MoveReport) {
        if self.quiet {
            return;
        }
        self.header("SUMMARY");

        let mut rows: BTreeMap<&str, usize> = report
            .per_directory
            .iter()
            .map(|(dir, count)| (dir.as_str(), *count))
            .collect();
        if report.renamed > 0 {
            rows.insert(".", report.renamed);
        }

        let width = rows
            .keys()
            .map(|name| name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Directory".len());

        println!(
            "{:<width$} | {}",
            "Directory".bold(),
            "Tracks".bold(),
            width = width
        );
        println!("{}", "-".repeat(width + 10));

        for (dir, count) in &rows {
            println!(
                "{:<width$} | {} {}",
                dir,
                count.to_string().green(),
                track_word(*count),
                width = width
            );
        }

        println!("{}", "-".repeat(width + 10));
        let total = report.total_changed();
        println!(
            "{:<width$} | {} {}",
            "Total".bold(),
            total.to_string().green().bold(),
            track_word(total),
            width = width
        );
        if report.unchanged > 0 {
            println!(
                "{} already in place",
                format!("{} {}", report.unchanged, track_word(report.unchanged)).dimmed()
            );
        }
    }
}

fn track_word(count: usize) -> &'static str {
    if count == 1 { "track" } else { "tracks" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_word() {
        assert_eq!(track_word(0), "tracks");
        assert_eq!(track_word(1), "track");
        assert_eq!(track_word(2), "tracks");
    }

    #[test]
    fn test_quiet_progress_bar_is_hidden() {
        let output = OutputFormatter::new(true);
        assert!(output.is_quiet());
        assert!(output.create_progress_bar(10).is_hidden());
    }
}
