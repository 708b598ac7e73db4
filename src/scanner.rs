//! Album directory scanning: listing the track files and finding out whether
//! the album spans several discs.

use crate::album_organizer::{OrganizeError, OrganizeResult};
use crate::config::CompiledFilters;
use crate::track_name::{self, DiscId};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of listing an album directory.
#[derive(Debug, Default)]
pub struct Listing {
    /// Names of the files (and non-directory symlinks) directly inside the
    /// directory, sorted.
    pub files: Vec<String>,
    /// Entries whose names are not valid UTF-8 and were left untouched.
    pub skipped: Vec<PathBuf>,
}

/// Lists the regular files directly inside `dir`.
///
/// Subdirectories (including disc directories from an earlier run) are not
/// descended into, and files rejected by `filters` are left out. An
/// unreadable or missing directory is fatal.
pub fn list_files(dir: &Path, filters: &CompiledFilters) -> OrganizeResult<Listing> {
    let entries = fs::read_dir(dir).map_err(|e| OrganizeError::ReadDirFailed {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut listing = Listing::default();

    for entry in entries {
        let entry = entry.map_err(|e| OrganizeError::ReadDirFailed {
            path: dir.to_path_buf(),
            source: e,
        })?;

        // file_type() does not follow symlinks. A link to a directory is skipped
        // like a directory; any other link, dangling ones included, is renamed.
        let is_file = match entry.file_type() {
            Ok(ft) if ft.is_file() => true,
            Ok(ft) if ft.is_symlink() => !entry.path().is_dir(),
            _ => false,
        };
        if !is_file {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => {
                if filters.should_include(&name) {
                    listing.files.push(name);
                }
            }
            Err(_) => listing.skipped.push(entry.path()),
        }
    }

    listing.files.sort();
    Ok(listing)
}

/// Collects the distinct disc numbers used by `<disc>-<track>` file names.
///
/// An empty set means the album is a single disc.
pub fn detect_discs<S: AsRef<str>>(files: &[S]) -> BTreeSet<DiscId> {
    files
        .iter()
        .filter_map(|name| track_name::disc_id(name.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_detect_discs_multi_disc() {
        let files = ["1-01 Intro.mp3", "1-02 Song.mp3", "2-01 Outro.mp3"];
        let discs: Vec<_> = detect_discs(&files)
            .into_iter()
            .map(|d| d.as_str().to_string())
            .collect();

        assert_eq!(discs, vec!["1", "2"]);
    }

    #[test]
    fn test_detect_discs_single_disc() {
        let files = ["01 Intro.mp3", "02 Song.mp3", "cover.jpg"];
        assert!(detect_discs(&files).is_empty());
    }

    #[test]
    fn test_detect_discs_empty_input() {
        let files: [&str; 0] = [];
        assert!(detect_discs(&files).is_empty());
    }

    #[test]
    fn test_detect_discs_keeps_distinct_spellings() {
        let files = ["1-01 A.mp3", "01-02 B.mp3", "10-01 C.mp3", "2-01 D.mp3"];
        let discs: Vec<_> = detect_discs(&files)
            .into_iter()
            .map(|d| d.as_str().to_string())
            .collect();

        assert_eq!(discs, vec!["01", "1", "2", "10"]);
    }

    #[test]
    fn test_list_files_skips_directories() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("02 Song.mp3"), "b").expect("Failed to write file");
        fs::write(base_path.join("01 Intro.mp3"), "a").expect("Failed to write file");
        fs::create_dir(base_path.join("Disc 01")).expect("Failed to create directory");
        fs::write(base_path.join("Disc 01").join("03 Nested.mp3"), "c")
            .expect("Failed to write nested file");

        let listing = list_files(base_path, &CompiledFilters::default()).unwrap();

        assert_eq!(listing.files, vec!["01 Intro.mp3", "02 Song.mp3"]);
        assert!(listing.skipped.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_list_files_symlinks() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("target.mp3"), "t").expect("Failed to write file");
        fs::create_dir(base_path.join("Scans")).expect("Failed to create directory");
        symlink(base_path.join("target.mp3"), base_path.join("01 Linked.mp3"))
            .expect("Failed to create symlink");
        symlink(base_path.join("gone.mp3"), base_path.join("02 Dangling.mp3"))
            .expect("Failed to create symlink");
        symlink(base_path.join("Scans"), base_path.join("03 Folder Link"))
            .expect("Failed to create symlink");

        let listing = list_files(base_path, &CompiledFilters::default()).unwrap();

        assert_eq!(
            listing.files,
            vec!["01 Linked.mp3", "02 Dangling.mp3", "target.mp3"]
        );
    }

    #[test]
    fn test_list_files_applies_filters() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        fs::write(base_path.join("01 Intro.mp3"), "a").expect("Failed to write file");
        fs::write(base_path.join(".hidden"), "h").expect("Failed to write file");

        let listing = list_files(base_path, &CompiledFilters::default()).unwrap();
        assert_eq!(listing.files, vec!["01 Intro.mp3"]);
    }

    #[test]
    fn test_list_files_missing_directory() {
        let result = list_files(
            Path::new("/non/existent/album"),
            &CompiledFilters::default(),
        );
        assert!(matches!(result, Err(OrganizeError::ReadDirFailed { .. })));
    }

    #[test]
    fn test_list_files_on_a_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let file_path = temp_dir.path().join("01 Intro.mp3");
        fs::write(&file_path, "a").expect("Failed to write file");

        let result = list_files(&file_path, &CompiledFilters::default());
        assert!(result.is_err());
    }
}
