//! Release-note discovery and ordering.
//!
//! Each locale has one release-notes directory whose documents are named
//! after the version they describe. Indexing runs in three steps:
//!
//! 1. **discover** - list document stems in the directory
//! 2. **order** - sort by descending version, numerically per segment
//! 3. **project** - map each version to a [`NavigationEntry`]

use std::fs;
use std::path::PathBuf;

use docnav_config::{Config, LocaleConfig};

use crate::navigation::NavigationEntry;
use crate::version::ReleaseVersion;

/// Error returned when a release-notes directory cannot be indexed.
///
/// Always fatal: an empty release-notes menu is worse than a failed build.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The configured directory does not exist.
    #[error("Release notes directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    /// The directory could not be read.
    #[error("Failed to read release notes directory {}: {source}", path.display())]
    Io {
        /// Directory being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Where a locale's release notes live and how they are linked.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseNoteSource {
    /// Directory containing the release-note documents.
    pub dir: PathBuf,
    /// Route prefix of the rendered documents (e.g. "/zh/release-notes").
    pub link_prefix: String,
    /// Document extension, without the dot.
    pub extension: String,
}

impl ReleaseNoteSource {
    /// Resolve the source of a configured locale.
    #[must_use]
    pub fn for_locale(config: &Config, locale: &LocaleConfig) -> Self {
        Self {
            dir: config.release_notes_dir(locale),
            link_prefix: locale.release_notes_prefix(),
            extension: config.docs_resolved.extension.clone(),
        }
    }
}

/// Indexes the release notes of one locale.
#[derive(Clone, Debug)]
pub struct ReleaseNoteIndexer {
    source: ReleaseNoteSource,
}

impl ReleaseNoteIndexer {
    /// Create an indexer for `source`.
    #[must_use]
    pub fn new(source: ReleaseNoteSource) -> Self {
        Self { source }
    }

    /// Discover, order, and project the release notes.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the directory is missing or unreadable.
    pub fn index(&self) -> Result<ReleaseIndex, IndexError> {
        let stems = self.discover()?;
        let versions = stems
            .iter()
            .map(|stem| ReleaseVersion::new(stem, &self.source.link_prefix))
            .collect();
        let index = ReleaseIndex::from_versions(&self.source.link_prefix, versions);

        tracing::debug!(
            dir = %self.source.dir.display(),
            count = index.len(),
            latest = index.latest().map(|v| v.display_name.as_str()),
            "Indexed release notes"
        );
        Ok(index)
    }

    /// List document stems in the release-notes directory.
    ///
    /// Keeps regular files with the configured extension and skips hidden
    /// files. Stems are returned in lexical order, which is the order equal
    /// versions keep after sorting.
    ///
    /// # Errors
    ///
    /// Returns [`IndexError`] if the directory is missing or unreadable.
    pub fn discover(&self) -> Result<Vec<String>, IndexError> {
        let dir = &self.source.dir;
        let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => IndexError::MissingDirectory(dir.clone()),
            _ => IndexError::Io {
                path: dir.clone(),
                source: e,
            },
        })?;

        let mut stems = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| IndexError::Io {
                path: dir.clone(),
                source: e,
            })?;
            let path = entry.path();

            if entry.file_name().to_string_lossy().starts_with('.') || !path.is_file() {
                continue;
            }
            if !path
                .extension()
                .is_some_and(|ext| ext == self.source.extension.as_str())
            {
                continue;
            }
            if let Some(stem) = path.file_stem() {
                stems.push(stem.to_string_lossy().into_owned());
            }
        }

        stems.sort();
        Ok(stems)
    }
}

/// Ordered release notes of one locale, most recent first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReleaseIndex {
    link_prefix: String,
    versions: Vec<ReleaseVersion>,
    entries: Vec<NavigationEntry>,
}

impl ReleaseIndex {
    /// Order `versions` (descending, stable) and project them to entries.
    #[must_use]
    pub fn from_versions(link_prefix: &str, mut versions: Vec<ReleaseVersion>) -> Self {
        versions.sort_by(|a, b| b.cmp_version(a));
        let entries = versions.iter().map(ReleaseVersion::to_entry).collect();
        Self {
            link_prefix: link_prefix.trim_end_matches('/').to_owned(),
            versions,
            entries,
        }
    }

    /// Versions, most recent first.
    #[must_use]
    pub fn versions(&self) -> &[ReleaseVersion] {
        &self.versions
    }

    /// Navigation entries, most recent first.
    #[must_use]
    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    /// Most recent version, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&ReleaseVersion> {
        self.versions.first()
    }

    /// Number of release notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Whether there are no release notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Bare release-notes index route (e.g. "/release-notes/").
    #[must_use]
    pub fn index_route(&self) -> String {
        format!("{}/", self.link_prefix)
    }

    /// Top menu entry: the latest release, or the index route if there is none.
    #[must_use]
    pub fn menu_entry(&self, text: &str) -> NavigationEntry {
        let link = self
            .entries
            .first()
            .map_or_else(|| self.index_route(), |entry| entry.link.clone());
        NavigationEntry::new(text, link)
    }
}
