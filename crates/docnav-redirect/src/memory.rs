//! In-memory host capabilities.
//!
//! Used by tests and by the CLI's redirect simulation.

use std::collections::HashMap;

use crate::env::{LanguageProbe, Router, SessionStorage};

/// Session storage backed by a `HashMap`.
#[derive(Debug, Default, Clone)]
pub struct MemorySession {
    items: HashMap<String, String>,
}

impl MemorySession {
    /// Create an empty (fresh) session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate an item.
    #[must_use]
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }
}

impl SessionStorage for MemorySession {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.get(key).cloned()
    }

    fn set_item(&mut self, key: &str, value: &str) {
        self.items.insert(key.to_owned(), value.to_owned());
    }
}

/// Language probe returning a fixed value.
#[derive(Debug, Default, Clone)]
pub struct FixedLanguage(Option<String>);

impl FixedLanguage {
    /// Probe reporting `lang`.
    #[must_use]
    pub fn new(lang: impl Into<String>) -> Self {
        Self(Some(lang.into()))
    }

    /// Probe reporting no language.
    #[must_use]
    pub fn none() -> Self {
        Self(None)
    }
}

impl From<Option<String>> for FixedLanguage {
    fn from(lang: Option<String>) -> Self {
        Self(lang)
    }
}

impl LanguageProbe for FixedLanguage {
    fn preferred_language(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Router that records navigations instead of performing them.
#[derive(Debug, Default, Clone)]
pub struct RecordingRouter {
    visits: Vec<String>,
}

impl RecordingRouter {
    /// Create a router with no recorded navigations.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths navigated to, in order.
    #[must_use]
    pub fn visits(&self) -> &[String] {
        &self.visits
    }
}

impl Router for RecordingRouter {
    fn go(&mut self, path: &str) {
        self.visits.push(path.to_owned());
    }
}
