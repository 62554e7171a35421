//! `docnav releases` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{Config, ROOT_LOCALE};
use docnav_site::{ReleaseIndex, ReleaseNoteIndexer, ReleaseNoteSource, parse_version};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the releases command.
#[derive(Args)]
pub(crate) struct ReleasesArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Locale key to list.
    #[arg(short, long, default_value = ROOT_LOCALE)]
    locale: String,
}

impl ReleasesArgs {
    /// Execute the releases command.
    ///
    /// # Errors
    ///
    /// Returns an error if the locale is unknown or its release-notes
    /// directory cannot be read.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        let locale = config.locale(&self.locale).ok_or_else(|| {
            let known: Vec<&str> = config.locales.iter().map(|l| l.key.as_str()).collect();
            CliError::Validation(format!(
                "Unknown locale {:?} (configured: {})",
                self.locale,
                known.join(", ")
            ))
        })?;

        let source = ReleaseNoteSource::for_locale(&config, locale);
        output.highlight(&format!(
            "Release notes for {} ({})",
            locale.key,
            source.dir.display()
        ));

        let index = ReleaseNoteIndexer::new(source).index()?;
        if index.is_empty() {
            output.warning(&format!(
                "No release notes found; menu links to {}",
                index.index_route()
            ));
            return Ok(());
        }

        for name in malformed(&index) {
            output.warning(&format!("{name}: not a v<major>.<minor>.<patch> name"));
        }
        for line in listing(&index) {
            output.result(&line);
        }
        Ok(())
    }
}

/// `text<TAB>link` per entry, most recent first.
fn listing(index: &ReleaseIndex) -> Vec<String> {
    index
        .entries()
        .iter()
        .map(|entry| format!("{}\t{}", entry.text, entry.link))
        .collect()
}

/// Names that were ordered with unparsable segments.
fn malformed(index: &ReleaseIndex) -> Vec<&str> {
    index
        .versions()
        .iter()
        .filter(|v| parse_version(&v.display_name).is_err())
        .map(|v| v.display_name.as_str())
        .collect()
}
