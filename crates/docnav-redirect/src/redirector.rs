//! Locale redirect state machine.
//!
//! Runs once per page mount, after the page content is ready:
//!
//! ```text
//! Idle ──(root path)──> Checked ──(flag unset, language matches)──> Redirected
//!   │                      │
//!   └──> NotApplicable     └──(flag set | no language | no match)──> Skipped
//! ```
//!
//! Only the `Redirected` transition writes the session flag, so a visitor
//! whose language matched nothing is checked again on the next root visit.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env::{LanguageProbe, Router, SessionStorage};
use crate::state::RedirectState;

/// A non-default locale reachable by redirect.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectTarget {
    /// Language prefix, matched case-insensitively (e.g. "zh").
    pub code: String,
    /// Landing route of the locale (e.g. "/zh/").
    pub path: String,
}

impl RedirectTarget {
    /// Create a target.
    pub fn new(code: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            path: path.into(),
        }
    }

    /// Whether `language` begins with this target's code, ignoring case.
    #[must_use]
    pub fn matches(&self, language: &str) -> bool {
        language
            .to_lowercase()
            .starts_with(&self.code.to_lowercase())
    }
}

/// Redirect rules, embedded in the site config as the startup hook payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRules {
    /// Session storage key of the flag.
    pub storage_key: String,
    /// Paths treated as the root landing page.
    pub root_paths: Vec<String>,
    /// Candidate locales, checked in order.
    pub targets: Vec<RedirectTarget>,
}

impl Default for RedirectRules {
    fn default() -> Self {
        Self {
            storage_key: "lang-redirected".to_owned(),
            root_paths: vec!["/".to_owned(), "/index.html".to_owned()],
            targets: Vec::new(),
        }
    }
}

/// Why the redirector stopped without navigating.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The session flag was already set.
    AlreadyRedirected,
    /// The host reported no usable language.
    NoLanguage,
    /// The reported language matched no target.
    Unsupported(String),
}

/// State of the redirector for one page mount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Entered on every page mount.
    Idle,
    /// On the root landing page; about to decide.
    Checked,
    /// Not the root landing page.
    NotApplicable,
    /// Decided not to navigate.
    Skipped(SkipReason),
    /// Set the flag and navigated to `path`.
    Redirected {
        /// Target route.
        path: String,
    },
}

impl Phase {
    /// Whether no further transition is possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Idle | Self::Checked)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Checked => write!(f, "checked"),
            Self::NotApplicable => write!(f, "not applicable (not a root path)"),
            Self::Skipped(SkipReason::AlreadyRedirected) => {
                write!(f, "skipped (already redirected this session)")
            }
            Self::Skipped(SkipReason::NoLanguage) => write!(f, "skipped (no preferred language)"),
            Self::Skipped(SkipReason::Unsupported(lang)) => {
                write!(f, "skipped (no locale for {lang:?})")
            }
            Self::Redirected { path } => write!(f, "redirected to {path}"),
        }
    }
}

/// Redirects first-time root visitors to their language's landing page.
#[derive(Clone, Debug)]
pub struct LocaleRedirector {
    rules: RedirectRules,
}

impl LocaleRedirector {
    /// Create a redirector.
    #[must_use]
    pub fn new(rules: RedirectRules) -> Self {
        Self { rules }
    }

    /// Rules in use.
    #[must_use]
    pub fn rules(&self) -> &RedirectRules {
        &self.rules
    }

    /// Run the machine for one page mount and return its terminal phase.
    ///
    /// Navigates at most once.
    pub fn on_mounted<P, S, R>(
        &self,
        pathname: &str,
        probe: &P,
        state: &mut RedirectState<S>,
        router: &mut R,
    ) -> Phase
    where
        P: LanguageProbe + ?Sized,
        S: SessionStorage,
        R: Router + ?Sized,
    {
        let mut phase = Phase::Idle;
        while !phase.is_terminal() {
            phase = self.advance(phase, pathname, probe, state, router);
            tracing::debug!(pathname, %phase, "Locale redirect transition");
        }
        phase
    }

    fn advance<P, S, R>(
        &self,
        phase: Phase,
        pathname: &str,
        probe: &P,
        state: &mut RedirectState<S>,
        router: &mut R,
    ) -> Phase
    where
        P: LanguageProbe + ?Sized,
        S: SessionStorage,
        R: Router + ?Sized,
    {
        match phase {
            Phase::Idle => {
                if self.is_root_path(pathname) {
                    Phase::Checked
                } else {
                    Phase::NotApplicable
                }
            }
            Phase::Checked => self.decide(probe, state, router),
            terminal => terminal,
        }
    }

    fn decide<P, S, R>(&self, probe: &P, state: &mut RedirectState<S>, router: &mut R) -> Phase
    where
        P: LanguageProbe + ?Sized,
        S: SessionStorage,
        R: Router + ?Sized,
    {
        if state.is_set() {
            return Phase::Skipped(SkipReason::AlreadyRedirected);
        }

        let Some(language) = probe
            .preferred_language()
            .filter(|lang| !lang.trim().is_empty())
        else {
            return Phase::Skipped(SkipReason::NoLanguage);
        };

        match self.rules.targets.iter().find(|t| t.matches(&language)) {
            Some(target) => {
                state.set();
                router.go(&target.path);
                Phase::Redirected {
                    path: target.path.clone(),
                }
            }
            None => Phase::Skipped(SkipReason::Unsupported(language)),
        }
    }

    fn is_root_path(&self, pathname: &str) -> bool {
        self.rules.root_paths.iter().any(|root| root == pathname)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedLanguage, MemorySession, RecordingRouter};
    use pretty_assertions::assert_eq;

    const KEY: &str = "lang-redirected";

    fn redirector() -> LocaleRedirector {
        LocaleRedirector::new(RedirectRules {
            targets: vec![RedirectTarget::new("zh", "/zh/")],
            ..RedirectRules::default()
        })
    }

    /// Mount `pathname` once and return the phase, the navigations, and whether the flag is set.
    fn mount(
        redirector: &LocaleRedirector,
        pathname: &str,
        probe: &FixedLanguage,
        session: MemorySession,
    ) -> (Phase, Vec<String>, bool) {
        let mut state = RedirectState::new(session, KEY);
        let mut router = RecordingRouter::new();
        let phase = redirector.on_mounted(pathname, probe, &mut state, &mut router);
        (phase, router.visits().to_vec(), state.is_set())
    }

    #[test]
    fn test_fresh_session_chinese_redirects_once() {
        let (phase, visits, flag) = mount(
            &redirector(),
            "/",
            &FixedLanguage::new("zh-CN"),
            MemorySession::new(),
        );

        assert_eq!(
            phase,
            Phase::Redirected {
                path: "/zh/".to_owned()
            }
        );
        assert_eq!(visits, vec!["/zh/"]);
        assert!(flag);
    }

    #[test]
    fn test_fresh_session_english_does_not_redirect() {
        let (phase, visits, flag) = mount(
            &redirector(),
            "/",
            &FixedLanguage::new("en-US"),
            MemorySession::new(),
        );

        assert_eq!(
            phase,
            Phase::Skipped(SkipReason::Unsupported("en-US".to_owned()))
        );
        assert!(visits.is_empty());
        assert!(!flag);
    }

    #[test]
    fn test_flag_already_set_prevents_loop() {
        let session = MemorySession::new().with_item(KEY, "true");
        let (phase, visits, flag) =
            mount(&redirector(), "/", &FixedLanguage::new("zh-CN"), session);

        assert_eq!(phase, Phase::Skipped(SkipReason::AlreadyRedirected));
        assert!(visits.is_empty());
        assert!(flag);
    }

    #[test]
    fn test_non_root_path_never_activates() {
        for session in [MemorySession::new(), MemorySession::new().with_item(KEY, "true")] {
            let had_flag = session.get_item(KEY).is_some();
            let (phase, visits, flag) = mount(
                &redirector(),
                "/guide/installation",
                &FixedLanguage::new("zh-CN"),
                session,
            );

            assert_eq!(phase, Phase::NotApplicable);
            assert!(visits.is_empty());
            assert_eq!(flag, had_flag);
        }
    }

    #[test]
    fn test_index_html_is_root() {
        let (phase, visits, _) = mount(
            &redirector(),
            "/index.html",
            &FixedLanguage::new("zh-TW"),
            MemorySession::new(),
        );

        assert!(matches!(phase, Phase::Redirected { .. }));
        assert_eq!(visits, vec!["/zh/"]);
    }

    #[test]
    fn test_language_match_ignores_case() {
        let (phase, _, flag) = mount(
            &redirector(),
            "/",
            &FixedLanguage::new("ZH-hans"),
            MemorySession::new(),
        );

        assert!(matches!(phase, Phase::Redirected { .. }));
        assert!(flag);
    }

    #[test]
    fn test_missing_language_skips_silently() {
        for probe in [FixedLanguage::none(), FixedLanguage::new(""), FixedLanguage::new("  ")] {
            let (phase, visits, flag) = mount(&redirector(), "/", &probe, MemorySession::new());

            assert_eq!(phase, Phase::Skipped(SkipReason::NoLanguage));
            assert!(visits.is_empty());
            assert!(!flag);
        }
    }

    #[test]
    fn test_second_mount_in_same_session_is_skipped() {
        let redirector = redirector();
        let probe = FixedLanguage::new("zh-CN");
        let mut state = RedirectState::new(MemorySession::new(), KEY);
        let mut router = RecordingRouter::new();

        let first = redirector.on_mounted("/", &probe, &mut state, &mut router);
        let second = redirector.on_mounted("/", &probe, &mut state, &mut router);

        assert!(matches!(first, Phase::Redirected { .. }));
        assert_eq!(second, Phase::Skipped(SkipReason::AlreadyRedirected));
        assert_eq!(router.visits(), ["/zh/"]);
    }

    #[test]
    fn test_first_matching_target_wins() {
        let redirector = LocaleRedirector::new(RedirectRules {
            targets: vec![
                RedirectTarget::new("pt-br", "/pt-br/"),
                RedirectTarget::new("pt", "/pt/"),
            ],
            ..RedirectRules::default()
        });

        let (phase, _, _) = mount(
            &redirector,
            "/",
            &FixedLanguage::new("pt-BR"),
            MemorySession::new(),
        );
        assert_eq!(
            phase,
            Phase::Redirected {
                path: "/pt-br/".to_owned()
            }
        );

        let (phase, _, _) = mount(
            &redirector,
            "/",
            &FixedLanguage::new("pt-PT"),
            MemorySession::new(),
        );
        assert_eq!(
            phase,
            Phase::Redirected {
                path: "/pt/".to_owned()
            }
        );
    }

    #[test]
    fn test_rules_serialize_camel_case() {
        let json = serde_json::to_value(redirector().rules()).unwrap();

        assert_eq!(json["storageKey"], "lang-redirected");
        assert_eq!(json["rootPaths"][1], "/index.html");
        assert_eq!(json["targets"][0]["code"], "zh");
        assert_eq!(json["targets"][0]["path"], "/zh/");
    }
}
