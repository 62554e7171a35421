//! Release version identifiers.
//!
//! Release notes are named `v<major>.<minor>.<patch>`. Names that don't fit
//! are still indexed: unparsable segments count as `0` and a warning is
//! logged, so a stray file never breaks the build or disappears silently.

use std::cmp::Ordering;

use crate::navigation::NavigationEntry;

/// Reason a release-note name is not a well-formed version.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum MalformedVersion {
    /// Wrong number of dot-separated segments.
    #[error("expected 3 segments, found {0}")]
    SegmentCount(usize),
    /// A segment is not a non-negative integer.
    #[error("segment {0:?} is not a non-negative integer")]
    Segment(String),
}

/// Parse `v<major>.<minor>.<patch>` (leading `v` optional).
///
/// # Errors
///
/// Returns [`MalformedVersion`] if the name does not have exactly three
/// numeric segments.
pub fn parse_version(name: &str) -> Result<[u64; 3], MalformedVersion> {
    let segments: Vec<&str> = strip_v(name).split('.').collect();
    if segments.len() != 3 {
        return Err(MalformedVersion::SegmentCount(segments.len()));
    }

    let mut parts = [0; 3];
    for (part, segment) in parts.iter_mut().zip(&segments) {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedVersion::Segment((*segment).to_owned()));
        }
        *part = segment
            .parse()
            .map_err(|_| MalformedVersion::Segment((*segment).to_owned()))?;
    }
    Ok(parts)
}

/// Best-effort parse: the first three segments, `0` for anything unparsable.
fn parse_version_lenient(name: &str) -> [u64; 3] {
    let mut parts = [0; 3];
    for (part, segment) in parts.iter_mut().zip(strip_v(name).split('.')) {
        *part = segment.parse().unwrap_or(0);
    }
    parts
}

fn strip_v(name: &str) -> &str {
    name.strip_prefix(['v', 'V']).unwrap_or(name)
}

/// A discovered release-note document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseVersion {
    /// Major version.
    pub major: u64,
    /// Minor version.
    pub minor: u64,
    /// Patch version.
    pub patch: u64,
    /// Filename stem, including the leading `v`.
    pub display_name: String,
    /// Route of the rendered document.
    pub document_path: String,
}

impl ReleaseVersion {
    /// Build from a filename stem and the locale's release-notes route prefix.
    #[must_use]
    pub fn new(display_name: &str, link_prefix: &str) -> Self {
        let [major, minor, patch] = match parse_version(display_name) {
            Ok(parts) => parts,
            Err(e) => {
                tracing::warn!(
                    name = display_name,
                    error = %e,
                    "Malformed release version, ordering unparsable segments as 0"
                );
                parse_version_lenient(display_name)
            }
        };

        Self {
            major,
            minor,
            patch,
            display_name: display_name.to_owned(),
            document_path: NavigationEntry::under(link_prefix, display_name).link,
        }
    }

    /// Compare by `(major, minor, patch)` only.
    #[must_use]
    pub fn cmp_version(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }

    /// Navigation entry for this release.
    #[must_use]
    pub fn to_entry(&self) -> NavigationEntry {
        NavigationEntry::new(&self.display_name, &self.document_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_well_formed() {
        assert_eq!(parse_version("v1.5.10"), Ok([1, 5, 10]));
        assert_eq!(parse_version("V0.0.0"), Ok([0, 0, 0]));
        assert_eq!(parse_version("2.3.4"), Ok([2, 3, 4]));
    }

    #[test]
    fn test_parse_wrong_segment_count() {
        assert_eq!(parse_version("v1.2"), Err(MalformedVersion::SegmentCount(2)));
        assert_eq!(
            parse_version("v1.2.3.4"),
            Err(MalformedVersion::SegmentCount(4))
        );
    }

    #[test]
    fn test_parse_non_numeric_segment() {
        assert_eq!(
            parse_version("v1.2.3-beta"),
            Err(MalformedVersion::Segment("3-beta".to_owned()))
        );
        assert_eq!(
            parse_version("v1.+2.3"),
            Err(MalformedVersion::Segment("+2".to_owned()))
        );
    }

    #[test]
    fn test_new_well_formed() {
        let version = ReleaseVersion::new("v1.5.2", "/release-notes");

        assert_eq!((version.major, version.minor, version.patch), (1, 5, 2));
        assert_eq!(version.display_name, "v1.5.2");
        assert_eq!(version.document_path, "/release-notes/v1.5.2");
    }

    #[test]
    fn test_new_malformed_uses_zero_segments() {
        let version = ReleaseVersion::new("v2.x.1", "/release-notes");
        assert_eq!((version.major, version.minor, version.patch), (2, 0, 1));

        let version = ReleaseVersion::new("changelog", "/release-notes");
        assert_eq!((version.major, version.minor, version.patch), (0, 0, 0));
        assert_eq!(version.document_path, "/release-notes/changelog");
    }

    #[test]
    fn test_cmp_version_is_numeric() {
        let a = ReleaseVersion::new("v1.5.10", "/r");
        let b = ReleaseVersion::new("v1.5.2", "/r");
        let c = ReleaseVersion::new("v10.0.0", "/r");

        assert_eq!(a.cmp_version(&b), Ordering::Greater);
        assert_eq!(c.cmp_version(&a), Ordering::Greater);
        assert_eq!(
            a.cmp_version(&ReleaseVersion::new("v1.5.10", "/other")),
            Ordering::Equal
        );
    }
}
