//! `docnav redirect` command implementation.
//!
//! Runs the locale redirector against an in-memory session so the configured
//! rules can be checked without a browser.

use std::path::PathBuf;

use clap::Args;
use docnav_config::Config;
use docnav_redirect::{
    FixedLanguage, LocaleRedirector, MemorySession, Phase, RecordingRouter, RedirectRules,
    RedirectState,
};
use docnav_site::SiteConfigBuilder;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the redirect command.
#[derive(Args)]
pub(crate) struct RedirectArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page path being loaded.
    #[arg(short, long, default_value = "/")]
    path: String,

    /// Browser language (omit to simulate a browser that reports none).
    #[arg(short, long, env = "DOCNAV_LANG")]
    lang: Option<String>,

    /// Start with the session flag already set.
    #[arg(long)]
    redirected: bool,
}

/// Result of one simulated page load.
#[derive(Debug, PartialEq, Eq)]
struct Simulation {
    phase: Phase,
    visits: Vec<String>,
    flag_set: bool,
}

impl RedirectArgs {
    /// Execute the redirect command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Config::load(self.config.as_deref(), None)?;

        if !config.redirect.enabled {
            output.warning("Redirect hook is disabled in config; simulating anyway");
        }

        output.highlight(&format!(
            "{} (lang: {}, {})",
            self.path,
            self.lang.as_deref().unwrap_or("none"),
            session_label(self.redirected)
        ));

        let rules = SiteConfigBuilder::new(&config).redirect_rules();
        let simulation = simulate(rules, &self.path, self.lang, self.redirected);

        output.result(&simulation.phase.to_string());
        for visit in &simulation.visits {
            output.info(&format!("Navigated to {visit}"));
        }
        output.info(&format!(
            "Session flag: {}",
            if simulation.flag_set { "set" } else { "unset" }
        ));
        Ok(())
    }
}

fn session_label(redirected: bool) -> &'static str {
    if redirected {
        "session already redirected"
    } else {
        "fresh session"
    }
}

/// Mount `path` once in a fresh (or already-redirected) session.
fn simulate(rules: RedirectRules, path: &str, lang: Option<String>, redirected: bool) -> Simulation {
    let mut session = MemorySession::new();
    if redirected {
        session = session.with_item(rules.storage_key.clone(), "true");
    }
    let mut state = RedirectState::new(session, rules.storage_key.clone());
    let mut router = RecordingRouter::new();
    let probe = FixedLanguage::from(lang);

    let phase = LocaleRedirector::new(rules).on_mounted(path, &probe, &mut state, &mut router);

    Simulation {
        phase,
        visits: router.visits().to_vec(),
        flag_set: state.is_set(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_redirect::{RedirectTarget, SkipReason};
    use pretty_assertions::assert_eq;

    fn rules() -> RedirectRules {
        RedirectRules {
            targets: vec![RedirectTarget::new("zh", "/zh/")],
            ..RedirectRules::default()
        }
    }

    #[test]
    fn test_simulate_fresh_chinese_session() {
        let simulation = simulate(rules(), "/", Some("zh-CN".to_owned()), false);

        assert_eq!(
            simulation,
            Simulation {
                phase: Phase::Redirected {
                    path: "/zh/".to_owned()
                },
                visits: vec!["/zh/".to_owned()],
                flag_set: true,
            }
        );
    }

    #[test]
    fn test_simulate_already_redirected() {
        let simulation = simulate(rules(), "/", Some("zh-CN".to_owned()), true);

        assert_eq!(simulation.phase, Phase::Skipped(SkipReason::AlreadyRedirected));
        assert!(simulation.visits.is_empty());
    }

    #[test]
    fn test_simulate_without_language() {
        let simulation = simulate(rules(), "/", None, false);

        assert_eq!(simulation.phase, Phase::Skipped(SkipReason::NoLanguage));
        assert!(!simulation.flag_set);
    }
}
