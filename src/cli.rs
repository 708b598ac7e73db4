//! Command-line interface module for discsort.
//!
//! This module handles:
//! - Argument parsing
//! - Configuration loading
//! - Running the pipeline: list, detect discs, provision directories, move
//! - Reporting progress, warnings and the final summary

use crate::album_organizer::{
    self, MoveReport, PlannedMove, ProvisionWarning, plan_moves, provision_disc_dirs,
};
use crate::config::Config;
use crate::output::OutputFormatter;
use crate::scanner::{detect_discs, list_files};
use crate::track_name::TrackNamer;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Convert an exported audio album to a structure and format suitable for a
/// media server.
///
/// Tracks named `<disc>-<track> <title>` are moved into `Disc NN` folders as
/// `<track> - <title>`; tracks named `<track> <title>` are renamed in place to
/// `<track> - <title>`.
#[derive(Parser, Debug, Clone)]
#[command(name = "discsort", author, version, about)]
pub struct Args {
    /// Path to the directory containing the audio files.
    #[arg(short, long, default_value = ".")]
    pub path: PathBuf,

    /// Show what would be renamed without touching any file.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Configuration file (defaults to ./.discsortrc.toml, then
    /// ~/.config/discsort/config.toml).
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Only print warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,
}

/// What a run did (or, for a dry run, would do).
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Disc directory names in numeric disc order. Empty for single-disc albums.
    pub disc_dirs: Vec<String>,
    /// Disc directories that could not be created.
    pub warnings: Vec<ProvisionWarning>,
    /// One entry per listed file.
    pub plan: Vec<PlannedMove>,
    /// Files that were skipped because their names are not valid UTF-8.
    pub skipped: Vec<PathBuf>,
    /// `None` for dry runs.
    pub report: Option<MoveReport>,
}

/// Runs discsort with parsed arguments.
///
/// Directory creation failures are reported as warnings and do not stop the
/// run. Configuration, listing and rename failures are returned as errors;
/// after a rename failure, tracks already handled stay where they were moved.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use discsort::cli::{Args, run_cli};
///
/// let args = Args::parse_from(["discsort", "--path", "/music/Album", "--dry-run"]);
/// match run_cli(&args) {
///     Ok(summary) => println!("{} discs", summary.disc_dirs.len()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(args: &Args) -> Result<RunSummary, String> {
    let output = OutputFormatter::new(args.quiet);

    let config = Config::load(args.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;

    organize_album(&args.path, &config, args.dry_run, &output)
}

/// Organizes the album in `base_path` with an already loaded configuration.
pub fn organize_album(
    base_path: &Path,
    config: &Config,
    dry_run: bool,
    output: &OutputFormatter,
) -> Result<RunSummary, String> {
    let filters = config
        .compile()
        .map_err(|e| format!("Error compiling configuration: {}", e))?;
    let namer = TrackNamer::new(&config.layout);

    if dry_run {
        output.dry_run_notice(&format!("Analyzing contents of: {}", base_path.display()));
    } else {
        output.info(&format!("Organizing contents of: {}", base_path.display()));
    }

    let listing = list_files(base_path, &filters).map_err(|e| e.to_string())?;
    for path in &listing.skipped {
        output.warning(&format!(
            "Skipping {}: file name is not valid UTF-8",
            path.display()
        ));
    }

    if listing.files.is_empty() {
        output.plain("No files found to organize.");
        return Ok(RunSummary {
            skipped: listing.skipped,
            report: (!dry_run).then(MoveReport::default),
            ..Default::default()
        });
    }

    let discs = detect_discs(&listing.files);
    if discs.is_empty() {
        output.plain("Single-disc album detected.");
    } else {
        output.plain(&format!("Multi-disc album detected: {} discs.", discs.len()));
    }

    let provisioned = provision_disc_dirs(base_path, &discs, &namer, dry_run);
    for warning in &provisioned.warnings {
        output.warning(&warning.to_string());
    }
    for dir in &provisioned.created {
        output.success(&format!("Created {}/", dir.display()));
    }

    let disc_dirs: Vec<String> = provisioned
        .directories
        .iter()
        .map(|(_, dir)| dir.to_string())
        .collect();

    let plan = plan_moves(base_path, &listing.files, &provisioned.directories, &namer);

    if dry_run {
        for dir in &disc_dirs {
            output.dry_run_notice(&format!("Would create {}/", dir));
        }
        output.header("Tracks would be organized as follows:");
        for planned in &plan {
            output.planned_move(planned, &relative_display(base_path, &planned.destination));
        }
        output.success("Dry run complete. No files were modified.");

        return Ok(RunSummary {
            disc_dirs,
            warnings: provisioned.warnings,
            plan,
            skipped: listing.skipped,
            report: None,
        });
    }

    let pb = output.create_progress_bar(plan.len() as u64);
    let result = album_organizer::execute_moves(&plan, |planned| {
        pb.set_message(planned.new_name.clone());
        pb.inc(1);
    });

    let report = match result {
        Ok(report) => {
            pb.finish_and_clear();
            report
        }
        Err(e) => {
            pb.abandon();
            return Err(format!(
                "{}\nFiles processed before this error keep their new names.",
                e
            ));
        }
    };

    output.summary_table(&report);
    output.success("Organization complete!");

    Ok(RunSummary {
        disc_dirs,
        warnings: provisioned.warnings,
        plan,
        skipped: listing.skipped,
        report: Some(report),
    })
}

/// `destination` relative to `base_path`, for display.
fn relative_display(base_path: &Path, destination: &Path) -> String {
    destination
        .strip_prefix(base_path)
        .unwrap_or(destination)
        .display()
        .to_string()
}
