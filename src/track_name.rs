//! File name rules for exported album tracks.
//!
//! Every pattern used to recognise or rewrite a track name lives here, so the
//! disc scan and the renamer always agree on what a disc-prefixed name is.
//!
//! # Examples
//!
//! ```
//! use discsort::track_name::{TrackNamer, disc_id};
//!
//! assert_eq!(disc_id("1-05 Track Title.mp3").map(|d| d.as_str().to_string()), Some("1".to_string()));
//!
//! let namer = TrackNamer::default();
//! assert_eq!(namer.multi_disc_name("1-05 Track Title.mp3"), "05 - Track Title.mp3");
//! assert_eq!(namer.single_disc_name("05 Track Title.mp3"), "05 - Track Title.mp3");
//! ```

use crate::config::LayoutRules;
use regex::{Captures, Regex};
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

// ASCII digits only, the same set `DiscId` accepts.

/// `<disc>-<track>...`, capturing the disc number.
static DISC_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)-[0-9]+.*").expect("valid disc prefix pattern"));

/// `<disc>-<track> <title>`, capturing track and title.
static MULTI_DISC_TRACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+-([0-9]+)\s(.*)").expect("valid multi-disc pattern"));

/// `<track> <title>`, capturing track and title.
static SINGLE_DISC_TRACK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\s(.*)").expect("valid single-disc pattern"));

/// A disc number as written in a file name.
///
/// The original digits are kept (`"1"` and `"01"` are different identifiers),
/// but ordering is numeric so that disc 2 sorts before disc 10.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiscId(String);

impl DiscId {
    /// Wraps a digit string. Returns `None` if it is empty or has non-digits.
    pub fn new(digits: &str) -> Option<Self> {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(digits.to_string()))
        } else {
            None
        }
    }

    /// The digits exactly as they appeared in the file name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The digits without leading zeros (`"0"` for an all-zero id).
    pub fn significant_digits(&self) -> &str {
        let trimmed = self.0.trim_start_matches('0');
        if trimmed.is_empty() { "0" } else { trimmed }
    }

    /// The numeric value left-padded with zeros to at least `width` digits.
    ///
    /// Works on the digit string, so ids of any length are handled.
    pub fn padded(&self, width: usize) -> String {
        format!("{:0>width$}", self.significant_digits(), width = width)
    }
}

impl Ord for DiscId {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.significant_digits(), other.significant_digits());
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for DiscId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for DiscId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts the disc identifier from a `<disc>-<track>` file name.
///
/// Returns `None` for names without the disc prefix (single-disc tracks,
/// artwork, playlists, and so on).
pub fn disc_id(file_name: &str) -> Option<DiscId> {
    DISC_PREFIX_RE
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| DiscId::new(m.as_str()))
}

/// Builds new track and directory names from the configured layout.
#[derive(Debug, Clone)]
pub struct TrackNamer {
    separator: String,
    disc_dir_prefix: String,
    disc_number_width: usize,
    already_separated: Regex,
}

impl TrackNamer {
    /// Creates a namer for the given layout.
    ///
    /// The separator is escaped before being embedded in a pattern, so any
    /// text is accepted.
    pub fn new(layout: &LayoutRules) -> Self {
        let already_separated = Regex::new(&format!(r"^[0-9]+{}", regex::escape(&layout.separator)))
            .expect("escaped separator is always a valid pattern");

        Self {
            separator: layout.separator.clone(),
            disc_dir_prefix: layout.disc_dir_prefix.clone(),
            disc_number_width: layout.disc_number_width,
            already_separated,
        }
    }

    /// Name of the directory holding the tracks of `disc`, e.g. `Disc 01`.
    pub fn disc_dir_name(&self, disc: &DiscId) -> String {
        format!(
            "{}{}",
            self.disc_dir_prefix,
            disc.padded(self.disc_number_width)
        )
    }

    /// Drops the disc prefix and separates track number from title.
    ///
    /// `1-05 Title.mp3` becomes `05 - Title.mp3`. Names without whitespace
    /// after the track number are returned unchanged.
    pub fn multi_disc_name(&self, file_name: &str) -> String {
        self.separate(&MULTI_DISC_TRACK_RE, file_name)
    }

    /// Separates track number from title: `05 Title.mp3` becomes
    /// `05 - Title.mp3`.
    ///
    /// Names that already carry the separator are left alone so a second run
    /// does not produce `05 - - Title.mp3`.
    pub fn single_disc_name(&self, file_name: &str) -> String {
        if self.already_separated.is_match(file_name) {
            return file_name.to_string();
        }

        self.separate(&SINGLE_DISC_TRACK_RE, file_name)
    }

    /// Rewrites the match of `pattern` to `<number><separator><title>`.
    ///
    /// `.` stops at a newline, so anything after the match is carried over
    /// as-is rather than dropped.
    fn separate(&self, pattern: &Regex, file_name: &str) -> String {
        pattern
            .replace(file_name, |caps: &Captures| {
                format!("{}{}{}", &caps[1], self.separator, &caps[2])
            })
            .into_owned()
    }
}

impl Default for TrackNamer {
    fn default() -> Self {
        Self::new(&LayoutRules::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(digits: &str) -> DiscId {
        DiscId::new(digits).unwrap()
    }

    #[test]
    fn test_disc_id_from_prefixed_name() {
        assert_eq!(disc_id("1-05 Track Title.mp3"), Some(id("1")));
        assert_eq!(disc_id("12-01 Outro.flac"), Some(id("12")));
        assert_eq!(disc_id("02-3.mp3"), Some(id("02")));
    }

    #[test]
    fn test_disc_id_absent_for_single_disc_names() {
        assert_eq!(disc_id("05 Track Title.mp3"), None);
        assert_eq!(disc_id("05 - Track Title.mp3"), None);
        assert_eq!(disc_id("cover.jpg"), None);
        assert_eq!(disc_id("A-01 Side A.mp3"), None);
        assert_eq!(disc_id("1- 01 Spaced.mp3"), None);
    }

    #[test]
    fn test_disc_id_rejects_non_digits() {
        assert!(DiscId::new("").is_none());
        assert!(DiscId::new("1a").is_none());
        assert!(DiscId::new("007").is_some());
    }

    #[test]
    fn test_disc_id_numeric_ordering() {
        let mut ids = vec![id("10"), id("2"), id("1"), id("01")];
        ids.sort();
        let ordered: Vec<_> = ids.iter().map(DiscId::as_str).collect();
        assert_eq!(ordered, vec!["01", "1", "2", "10"]);
    }

    #[test]
    fn test_disc_dir_name_is_zero_padded() {
        let namer = TrackNamer::default();
        assert_eq!(namer.disc_dir_name(&id("1")), "Disc 01");
        assert_eq!(namer.disc_dir_name(&id("12")), "Disc 12");
        assert_eq!(namer.disc_dir_name(&id("007")), "Disc 07");
        assert_eq!(namer.disc_dir_name(&id("0")), "Disc 00");
        assert_eq!(namer.disc_dir_name(&id("123")), "Disc 123");
    }

    #[test]
    fn test_disc_dir_name_handles_huge_numbers() {
        let namer = TrackNamer::default();
        let huge = "98765432109876543210987654321";
        assert_eq!(namer.disc_dir_name(&id(huge)), format!("Disc {}", huge));
    }

    #[test]
    fn test_multi_disc_name_drops_disc_prefix() {
        let namer = TrackNamer::default();
        assert_eq!(namer.multi_disc_name("1-01 Intro.mp3"), "01 - Intro.mp3");
        assert_eq!(
            namer.multi_disc_name("2-11 Song With  Spaces.m4a"),
            "11 - Song With  Spaces.m4a"
        );
    }

    #[test]
    fn test_multi_disc_name_without_title_is_unchanged() {
        let namer = TrackNamer::default();
        assert_eq!(namer.multi_disc_name("1-01.mp3"), "1-01.mp3");
    }

    #[test]
    fn test_single_disc_name_inserts_separator() {
        let namer = TrackNamer::default();
        assert_eq!(namer.single_disc_name("01 Intro.mp3"), "01 - Intro.mp3");
        assert_eq!(namer.single_disc_name("7 Seven.mp3"), "7 - Seven.mp3");
    }

    #[test]
    fn test_single_disc_name_is_idempotent() {
        let namer = TrackNamer::default();
        let once = namer.single_disc_name("05 Track Title.mp3");
        assert_eq!(once, "05 - Track Title.mp3");
        assert_eq!(namer.single_disc_name(&once), "05 - Track Title.mp3");
    }

    #[test]
    fn test_single_disc_name_leaves_other_files_alone() {
        let namer = TrackNamer::default();
        assert_eq!(namer.single_disc_name("cover.jpg"), "cover.jpg");
        assert_eq!(namer.single_disc_name("05.mp3"), "05.mp3");
    }

    #[test]
    fn test_names_with_newlines_keep_their_tail() {
        let namer = TrackNamer::default();
        assert_eq!(
            namer.single_disc_name("01 Intro\nPart.mp3"),
            "01 - Intro\nPart.mp3"
        );
        assert_eq!(
            namer.multi_disc_name("1-01 Intro\nPart.mp3"),
            "01 - Intro\nPart.mp3"
        );
    }

    #[test]
    fn test_non_ascii_digits_are_not_disc_numbers() {
        // Arabic-Indic one: not a disc prefix, and not renamed as a track.
        let name = "\u{0661}-01 Intro.mp3";
        assert_eq!(disc_id(name), None);
        assert_eq!(TrackNamer::default().single_disc_name(name), name);
        assert_eq!(
            TrackNamer::default().single_disc_name("\u{0661} Intro.mp3"),
            "\u{0661} Intro.mp3"
        );
    }

    #[test]
    fn test_custom_layout() {
        let layout = LayoutRules {
            disc_dir_prefix: "CD".to_string(),
            disc_number_width: 3,
            separator: ". ".to_string(),
        };
        let namer = TrackNamer::new(&layout);

        assert_eq!(namer.disc_dir_name(&id("2")), "CD002");
        assert_eq!(namer.multi_disc_name("2-04 Song.mp3"), "04. Song.mp3");
        assert_eq!(namer.single_disc_name("04 Song.mp3"), "04. Song.mp3");
        assert_eq!(namer.single_disc_name("04. Song.mp3"), "04. Song.mp3");
    }
}
