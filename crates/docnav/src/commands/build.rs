//! `docnav build` command implementation.

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_site::{SiteConfig, SiteConfigBuilder};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output file for the site config (overrides config).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, a release-notes directory is
    /// missing, or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            output: self.output,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source: {}",
            config.docs_resolved.source_dir.display()
        ));
        output.info(&format!("Output: {}", config.output_path.display()));

        let site = SiteConfigBuilder::new(&config).build()?;
        site.write(&config.output_path)?;

        for line in summarize(&site) {
            output.info(&line);
        }
        output.success(&format!(
            "Site config written to {}",
            config.output_path.display()
        ));
        Ok(())
    }
}

/// One summary line per locale.
fn summarize(site: &SiteConfig) -> Vec<String> {
    site.locales
        .iter()
        .map(|locale| {
            let navigation = &locale.theme_config.navigation;
            format!(
                "  {} ({}): {} nav entries, {} sidebar sections, {} links",
                locale.key,
                locale.link,
                navigation.nav.len(),
                navigation.sidebar.len(),
                navigation.links().len()
            )
        })
        .collect()
}
