//! Release-note indexing and site navigation config for docnav.
//!
//! This crate provides:
//! - [`ReleaseNoteIndexer`] for discovering and ordering versioned release notes
//! - [`LocaleNavigationTree`] for per-locale top navigation and sidebars
//! - [`SiteConfigBuilder`] for assembling and writing the [`SiteConfig`] document
//!
//! # Example
//!
//! ```ignore
//! use docnav_config::Config;
//! use docnav_site::SiteConfigBuilder;
//!
//! let config = Config::load(None, None)?;
//! let site = SiteConfigBuilder::new(&config).build()?;
//! site.write(&config.output_path)?;
//! ```

mod builder;
mod navigation;
mod release;
mod version;

pub use builder::{
    BuildError, LabelText, LocaleSite, LocaleThemeConfig, SearchConfig, SiteConfig,
    SiteConfigBuilder, SocialLinkEntry, StartupHook, ThemeConfig,
};
pub use navigation::{LocaleNavigationTree, NavigationEntry, SidebarItem};
pub use release::{IndexError, ReleaseIndex, ReleaseNoteIndexer, ReleaseNoteSource};
pub use version::{MalformedVersion, ReleaseVersion, parse_version};
