//! discsort - prepares exported audio albums for media servers
//!
//! This library lists the tracks of an album directory, detects whether the
//! album spans several discs, creates one `Disc NN` directory per disc, and
//! renames every track to `<track> - <title>`, moving multi-disc tracks into
//! their disc directory. Naming and file filtering can be tuned through an
//! optional TOML configuration file.

pub mod album_organizer;
pub mod cli;
pub mod config;
pub mod output;
pub mod scanner;
pub mod track_name;

pub use album_organizer::{
    DiscDirectories, MoveReport, OrganizeError, OrganizeResult, PlannedMove, ProvisionWarning,
};
pub use config::{CompiledFilters, Config, ConfigError, LayoutRules};
pub use track_name::{DiscId, TrackNamer};

pub use cli::{Args, RunSummary, run_cli};
