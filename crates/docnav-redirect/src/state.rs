//! The per-session "already redirected" flag.

use crate::env::SessionStorage;

/// Value written under the flag key.
const FLAG_VALUE: &str = "true";

/// Session flag recording that a redirect decision was made.
///
/// Absent at session start and written at most once. Any stored value counts
/// as set. Nothing in this crate clears it.
#[derive(Debug)]
pub struct RedirectState<S> {
    storage: S,
    key: String,
}

impl<S: SessionStorage> RedirectState<S> {
    /// Wrap `storage`, keeping the flag under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Storage key of the flag.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the flag is set for this session.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.storage.get_item(&self.key).is_some()
    }

    /// Set the flag.
    pub fn set(&mut self) {
        self.storage.set_item(&self.key, FLAG_VALUE);
    }

    /// Borrow the underlying storage.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Return the underlying storage.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }
}
