//! One-time browser-language redirect for docnav sites.
//!
//! On the root landing page, a visitor whose preferred language matches a
//! non-default locale is sent to that locale's landing page, at most once per
//! browser session.
//!
//! # Architecture
//!
//! - [`LocaleRedirector`] is the state machine, driven by [`RedirectRules`]
//! - [`RedirectState`] wraps the session flag that prevents redirect loops
//! - [`LanguageProbe`], [`SessionStorage`] and [`Router`] are the host
//!   capabilities, injected by the caller
//! - [`MemorySession`], [`FixedLanguage`] and [`RecordingRouter`] are
//!   in-memory hosts for tests and simulation
//!
//! # Example
//!
//! ```
//! use docnav_redirect::{
//!     FixedLanguage, LocaleRedirector, MemorySession, Phase, RecordingRouter, RedirectRules,
//!     RedirectState, RedirectTarget,
//! };
//!
//! let redirector = LocaleRedirector::new(RedirectRules {
//!     targets: vec![RedirectTarget::new("zh", "/zh/")],
//!     ..RedirectRules::default()
//! });
//! let mut state = RedirectState::new(MemorySession::new(), "lang-redirected");
//! let mut router = RecordingRouter::new();
//!
//! let phase = redirector.on_mounted("/", &FixedLanguage::new("zh-CN"), &mut state, &mut router);
//!
//! assert_eq!(phase, Phase::Redirected { path: "/zh/".to_owned() });
//! assert!(state.is_set());
//! ```

mod env;
mod memory;
mod redirector;
mod state;

pub use env::{LanguageProbe, Router, SessionStorage};
pub use memory::{FixedLanguage, MemorySession, RecordingRouter};
pub use redirector::{LocaleRedirector, Phase, RedirectRules, RedirectTarget, SkipReason};
pub use state::RedirectState;
