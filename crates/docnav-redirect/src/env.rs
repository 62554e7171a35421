//! Host capabilities used by the redirector.
//!
//! The redirector never touches a browser directly. The host page supplies
//! the preferred language, session-scoped storage, and in-app navigation
//! through these traits.

/// Reports the visitor's preferred language.
pub trait LanguageProbe {
    /// Best-effort language tag (e.g. "zh-CN"), or `None` if unavailable.
    fn preferred_language(&self) -> Option<String>;
}

/// Session-scoped key/value storage.
pub trait SessionStorage {
    /// Read a value.
    fn get_item(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set_item(&mut self, key: &str, value: &str);
}

/// Client-side in-app navigation.
pub trait Router {
    /// Navigate to `path` without a full page load.
    fn go(&mut self, path: &str);
}

impl<T: LanguageProbe + ?Sized> LanguageProbe for &T {
    fn preferred_language(&self) -> Option<String> {
        (**self).preferred_language()
    }
}

impl<T: SessionStorage + ?Sized> SessionStorage for &mut T {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) {
        (**self).set_item(key, value);
    }
}

impl<T: Router + ?Sized> Router for &mut T {
    fn go(&mut self, path: &str) {
        (**self).go(path);
    }
}
