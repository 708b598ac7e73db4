//! Disc directory provisioning and track renaming.
//!
//! Provisioning failures are recoverable: they come back as
//! [`ProvisionWarning`]s next to the disc mapping and the batch carries on.
//! Rename failures are terminal: [`execute_moves`] stops at the first one and
//! returns an [`OrganizeError`], leaving files already moved where they are.

use crate::track_name::{self, DiscId, TrackNamer};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that abort an organization run.
#[derive(Debug)]
pub enum OrganizeError {
    /// The album directory could not be listed.
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Renaming or moving a track failed.
    FileMoveFailed {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// Something already sits at the destination of a track.
    DestinationExists { source: PathBuf, destination: PathBuf },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadDirFailed { path, source } => {
                write!(f, "Failed to read directory {}: {}", path.display(), source)
            }
            Self::FileMoveFailed {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::DestinationExists {
                source,
                destination,
            } => {
                write!(
                    f,
                    "Cannot move {}: {} already exists",
                    source.display(),
                    destination.display()
                )
            }
        }
    }
}

impl std::error::Error for OrganizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ReadDirFailed { source, .. } => Some(source),
            Self::FileMoveFailed { source_error, .. } => Some(source_error),
            Self::DestinationExists { .. } => None,
        }
    }
}

/// Result type for organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// A disc directory that could not be created. The run continues.
#[derive(Debug)]
pub struct ProvisionWarning {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl std::fmt::Display for ProvisionWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Creation of the directory '{}' failed: {}",
            self.path.display(),
            self.source
        )
    }
}

/// Disc identifier to disc directory name, e.g. `"1"` to `"Disc 01"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscDirectories {
    dirs: BTreeMap<DiscId, String>,
}

impl DiscDirectories {
    /// Directory name for `disc`, if the disc was provisioned.
    pub fn get(&self, disc: &DiscId) -> Option<&str> {
        self.dirs.get(disc).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Mappings in numeric disc order.
    pub fn iter(&self) -> impl Iterator<Item = (&DiscId, &str)> {
        self.dirs.iter().map(|(disc, dir)| (disc, dir.as_str()))
    }
}

/// Output of [`provision_disc_dirs`].
#[derive(Debug, Default)]
pub struct Provisioned {
    pub directories: DiscDirectories,
    /// Directories actually created by this run.
    pub created: Vec<PathBuf>,
    pub warnings: Vec<ProvisionWarning>,
}

/// Creates one directory per disc under `base_path`.
///
/// Every disc ends up in the mapping, even when creating its directory failed
/// (for instance because it already exists). With `dry_run` nothing is
/// created and the mapping is still returned.
pub fn provision_disc_dirs(
    base_path: &Path,
    discs: &BTreeSet<DiscId>,
    namer: &TrackNamer,
    dry_run: bool,
) -> Provisioned {
    let mut provisioned = Provisioned::default();

    for disc in discs {
        let dir_name = namer.disc_dir_name(disc);
        let dir_path = base_path.join(&dir_name);

        if !dry_run {
            match fs::create_dir(&dir_path) {
                Ok(()) => provisioned.created.push(dir_path),
                Err(e) => provisioned.warnings.push(ProvisionWarning {
                    path: dir_path,
                    source: e,
                }),
            }
        }

        provisioned.directories.dirs.insert(disc.clone(), dir_name);
    }

    provisioned
}

/// What happens to a single track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedMove {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// File name of the track before the run.
    pub original_name: String,
    /// File name at the destination.
    pub new_name: String,
    /// Disc the track belongs to, for multi-disc albums.
    pub disc: Option<DiscId>,
}

impl PlannedMove {
    /// True when the track keeps both its name and its location.
    pub fn is_noop(&self) -> bool {
        self.source == self.destination
    }
}

/// Computes the destination of every file.
///
/// A `<disc>-<track> <title>` name moves into its disc directory as
/// `<track> - <title>`; any other name is renamed in place, inserting the
/// separator after a leading track number when there is one. A disc that is
/// missing from `directories` falls back to an in-place rename.
pub fn plan_moves<S: AsRef<str>>(
    base_path: &Path,
    files: &[S],
    directories: &DiscDirectories,
    namer: &TrackNamer,
) -> Vec<PlannedMove> {
    files
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let source = base_path.join(name);

            let disc_dir = track_name::disc_id(name)
                .and_then(|disc| directories.get(&disc).map(|dir| (disc, dir)));

            match disc_dir {
                Some((disc, dir)) => {
                    let new_name = namer.multi_disc_name(name);
                    PlannedMove {
                        destination: base_path.join(dir).join(&new_name),
                        source,
                        original_name: name.to_string(),
                        new_name,
                        disc: Some(disc),
                    }
                }
                None => {
                    let new_name = namer.single_disc_name(name);
                    PlannedMove {
                        destination: base_path.join(&new_name),
                        source,
                        original_name: name.to_string(),
                        new_name,
                        disc: None,
                    }
                }
            }
        })
        .collect()
}

/// Tally of a completed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MoveReport {
    /// Tracks renamed in place.
    pub renamed: usize,
    /// Tracks moved into a disc directory.
    pub moved: usize,
    /// Tracks whose name and location were already right.
    pub unchanged: usize,
    /// Tracks per disc directory.
    pub per_directory: BTreeMap<String, usize>,
}

impl MoveReport {
    fn record(&mut self, planned: &PlannedMove) {
        if planned.is_noop() {
            self.unchanged += 1;
            return;
        }

        match planned.destination.parent().and_then(Path::file_name) {
            Some(dir) if planned.disc.is_some() => {
                self.moved += 1;
                *self
                    .per_directory
                    .entry(dir.to_string_lossy().into_owned())
                    .or_insert(0) += 1;
            }
            _ => self.renamed += 1,
        }
    }

    /// Tracks that changed name or location.
    pub fn total_changed(&self) -> usize {
        self.renamed + self.moved
    }
}

/// Renames or moves a single track.
///
/// Refuses to replace an existing entry at the destination, since a plain
/// rename would silently overwrite it on Unix.
pub fn move_track(planned: &PlannedMove) -> OrganizeResult<()> {
    if planned.is_noop() {
        return Ok(());
    }

    if fs::symlink_metadata(&planned.destination).is_ok() {
        return Err(OrganizeError::DestinationExists {
            source: planned.source.clone(),
            destination: planned.destination.clone(),
        });
    }

    fs::rename(&planned.source, &planned.destination).map_err(|e| {
        OrganizeError::FileMoveFailed {
            source: planned.source.clone(),
            destination: planned.destination.clone(),
            source_error: e,
        }
    })
}

/// Executes `plan` in order, calling `on_done` after each track.
///
/// Stops at the first failure. Tracks handled before it stay where they were
/// moved.
pub fn execute_moves<F>(plan: &[PlannedMove], mut on_done: F) -> OrganizeResult<MoveReport>
where
    F: FnMut(&PlannedMove),
{
    let mut report = MoveReport::default();

    for planned in plan {
        move_track(planned)?;
        report.record(planned);
        on_done(planned);
    }

    Ok(report)
}
