//! Site configuration builder.
//!
//! Turns a loaded [`Config`] into the locale-keyed [`SiteConfig`] document
//! consumed by the site framework, and writes it as JSON.

use std::fs;
use std::path::{Path, PathBuf};

use docnav_config::{Config, LocaleConfig, SocialLink};
use docnav_redirect::{RedirectRules, RedirectTarget};
use serde::{Serialize, Serializer};

use crate::navigation::LocaleNavigationTree;
use crate::release::{IndexError, ReleaseNoteIndexer, ReleaseNoteSource};

/// Error returned by the site config builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Release-notes indexing failed.
    #[error(transparent)]
    Index(#[from] IndexError),
    /// The site config could not be serialized.
    #[error("Failed to serialize site config: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The site config could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Io {
        /// Output path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Generated site configuration.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Whether pages show a "last updated" timestamp.
    pub last_updated: bool,
    /// Whether the site framework ignores dead links.
    pub ignore_dead_links: bool,
    /// Per-locale settings, in configuration order.
    #[serde(serialize_with = "serialize_locales")]
    pub locales: Vec<LocaleSite>,
    /// Theme settings shared by all locales.
    pub theme_config: ThemeConfig,
    /// Hooks run by the theme when a page mounts.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub startup_hooks: Vec<StartupHook>,
}

impl SiteConfig {
    /// Find a locale by key.
    #[must_use]
    pub fn locale(&self, key: &str) -> Option<&LocaleSite> {
        self.locales.iter().find(|locale| locale.key == key)
    }

    /// Write the config as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] if serialization or writing fails.
    pub fn write(&self, path: &Path) -> Result<(), BuildError> {
        let io_err = |source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        fs::write(path, json).map_err(io_err)?;

        tracing::info!(path = %path.display(), "Wrote site config");
        Ok(())
    }
}

/// Serialize locales as a map keyed by locale key, keeping their order.
fn serialize_locales<S: Serializer>(locales: &[LocaleSite], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(locales.iter().map(|locale| (&locale.key, locale)))
}

/// Settings of one locale.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleSite {
    /// Locale key (map key in the output).
    #[serde(skip)]
    pub key: String,
    /// Name shown in the language switcher.
    pub label: String,
    /// Language tag.
    pub lang: String,
    /// Landing route.
    pub link: String,
    /// Locale-specific theme settings.
    pub theme_config: LocaleThemeConfig,
}

/// Locale-specific theme settings.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleThemeConfig {
    /// Top navigation and sidebars.
    #[serde(flatten)]
    pub navigation: LocaleNavigationTree,
    /// "Last updated" label override.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<LabelText>,
}

/// A translatable label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LabelText {
    /// Label text.
    pub text: String,
}

/// Theme settings shared by all locales.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Social/repository links.
    pub social_links: Vec<SocialLinkEntry>,
    /// Search provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,
}

/// A social/repository link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SocialLinkEntry {
    /// Icon name.
    pub icon: String,
    /// Target URL.
    pub link: String,
}

impl From<&SocialLink> for SocialLinkEntry {
    fn from(social: &SocialLink) -> Self {
        Self {
            icon: social.icon.clone(),
            link: social.link.clone(),
        }
    }
}

/// Search provider settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchConfig {
    /// Provider name.
    pub provider: String,
}

/// A hook the theme runs when a page mounts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StartupHook {
    /// Redirect first-time root visitors to their language's locale.
    LocaleRedirect(RedirectRules),
}

/// Builds a [`SiteConfig`] from configuration and the release-notes directories.
pub struct SiteConfigBuilder<'a> {
    config: &'a Config,
}

impl<'a> SiteConfigBuilder<'a> {
    /// Create a builder.
    #[must_use]
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Index every locale's release notes and assemble the site config.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Index`] if any locale's release-notes directory
    /// is missing or unreadable.
    pub fn build(&self) -> Result<SiteConfig, BuildError> {
        let locales = self
            .config
            .locales
            .iter()
            .map(|locale| self.build_locale(locale))
            .collect::<Result<Vec<_>, _>>()?;

        let site = &self.config.site;
        let mut startup_hooks = Vec::new();
        if self.config.redirect.enabled {
            startup_hooks.push(StartupHook::LocaleRedirect(self.redirect_rules()));
        }

        Ok(SiteConfig {
            title: site.title.clone(),
            description: site.description.clone(),
            last_updated: site.last_updated,
            ignore_dead_links: site.ignore_dead_links,
            locales,
            theme_config: ThemeConfig {
                social_links: self
                    .config
                    .social_links
                    .iter()
                    .map(SocialLinkEntry::from)
                    .collect(),
                search: site.search.as_ref().map(|provider| SearchConfig {
                    provider: provider.clone(),
                }),
            },
            startup_hooks,
        })
    }

    /// Redirect rules: every non-root locale, in configuration order.
    #[must_use]
    pub fn redirect_rules(&self) -> RedirectRules {
        let redirect = &self.config.redirect;
        RedirectRules {
            storage_key: redirect.storage_key.clone(),
            root_paths: redirect.root_paths.clone(),
            targets: self
                .config
                .locales
                .iter()
                .filter_map(|locale| {
                    locale
                        .redirect_code()
                        .map(|code| RedirectTarget::new(code, locale.root_path()))
                })
                .collect(),
        }
    }

    fn build_locale(&self, locale: &LocaleConfig) -> Result<LocaleSite, BuildError> {
        let source = ReleaseNoteSource::for_locale(self.config, locale);
        let releases = ReleaseNoteIndexer::new(source).index()?;
        let navigation = LocaleNavigationTree::build(locale, &releases);

        tracing::info!(
            locale = %locale.key,
            release_notes = releases.len(),
            latest = releases.latest().map(|v| v.display_name.as_str()),
            "Built locale navigation"
        );

        Ok(LocaleSite {
            key: locale.key.clone(),
            label: locale.label.clone(),
            lang: locale.lang.clone(),
            link: locale.root_path(),
            theme_config: LocaleThemeConfig {
                navigation,
                last_updated: locale
                    .last_updated_text
                    .as_ref()
                    .map(|text| LabelText { text: text.clone() }),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_config::{CliSettings, LinkConfig};
    use pretty_assertions::assert_eq;

    const CONFIG: &str = r#"
[site]
title = "gcop-rs"
description = "AI-powered Git commit message generator"
last_updated = true
ignore_dead_links = true
search = "local"

[[social_links]]
icon = "github"
link = "https://github.com/Undertone0809/gcop-rs"

[[locales]]
key = "root"
label = "English"
lang = "en"
nav = [{ text = "Guide", link = "/guide/installation" }]

[[locales.sidebar]]
prefix = "/guide/"

[[locales.sidebar.groups]]
text = "Getting Started"
items = [{ text = "Installation", link = "/guide/installation" }]

[[locales]]
key = "zh"
label = "简体中文"
lang = "zh-CN"
last_updated_text = "最后更新于"
nav = [{ text = "指南", link = "/zh/guide/installation" }]

[locales.release_notes]
text = "发布说明"
"#;

    /// Write a project with `docnav.toml` and release notes; return its directory.
    fn project(config: &str, en: &[&str], zh: &[&str]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("docnav.toml"), config).unwrap();
        for (sub, names) in [("docs/release-notes", en), ("docs/zh/release-notes", zh)] {
            let notes = dir.path().join(sub);
            fs::create_dir_all(&notes).unwrap();
            for name in names {
                fs::write(notes.join(format!("{name}.md")), "# Notes\n").unwrap();
            }
        }
        dir
    }

    fn load(dir: &tempfile::TempDir) -> Config {
        Config::load(Some(&dir.path().join("docnav.toml")), None).unwrap()
    }

    #[test]
    fn test_build_site_config() {
        let dir = project(CONFIG, &["v1.0.0", "v1.1.0"], &["v1.0.0"]);
        let config = load(&dir);

        let site = SiteConfigBuilder::new(&config).build().unwrap();

        assert_eq!(site.title, "gcop-rs");
        assert_eq!(site.locales.len(), 2);

        let root = site.locale("root").unwrap();
        assert_eq!(root.link, "/");
        assert_eq!(
            root.theme_config.navigation.nav[1].link,
            "/release-notes/v1.1.0"
        );

        let zh = site.locale("zh").unwrap();
        assert_eq!(zh.link, "/zh/");
        assert_eq!(zh.theme_config.navigation.nav[1].text, "发布说明");
        assert_eq!(
            zh.theme_config.navigation.nav[1].link,
            "/zh/release-notes/v1.0.0"
        );
        assert_eq!(
            zh.theme_config.last_updated,
            Some(LabelText {
                text: "最后更新于".to_owned()
            })
        );
    }

    #[test]
    fn test_build_empty_release_notes_uses_index_route() {
        let dir = project(CONFIG, &["v0.1.0"], &[]);
        let config = load(&dir);

        let site = SiteConfigBuilder::new(&config).build().unwrap();

        let zh = site.locale("zh").unwrap();
        assert_eq!(zh.theme_config.navigation.nav[1].link, "/zh/release-notes/");
    }

    #[test]
    fn test_build_missing_release_notes_dir_fails() {
        let dir = project(CONFIG, &[], &[]);
        fs::remove_dir(dir.path().join("docs/zh/release-notes")).unwrap();
        let config = load(&dir);

        let err = SiteConfigBuilder::new(&config).build().unwrap_err();

        assert!(matches!(
            err,
            BuildError::Index(IndexError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_redirect_rules_from_locales() {
        let dir = project(CONFIG, &[], &[]);
        let config = load(&dir);

        let rules = SiteConfigBuilder::new(&config).redirect_rules();

        assert_eq!(rules.storage_key, "lang-redirected");
        assert_eq!(rules.root_paths, vec!["/", "/index.html"]);
        assert_eq!(rules.targets, vec![RedirectTarget::new("zh", "/zh/")]);
    }

    #[test]
    fn test_redirect_disabled_omits_hook() {
        let config = format!("[redirect]\nenabled = false\n{CONFIG}");
        let dir = project(&config, &[], &[]);
        let config = load(&dir);

        let site = SiteConfigBuilder::new(&config).build().unwrap();
        let json = serde_json::to_value(&site).unwrap();

        assert!(site.startup_hooks.is_empty());
        assert!(json.get("startupHooks").is_none());
    }

    #[test]
    fn test_serialized_shape() {
        let dir = project(CONFIG, &["v1.0.0"], &["v1.0.0"]);
        let config = load(&dir);
        let site = SiteConfigBuilder::new(&config).build().unwrap();

        let json = serde_json::to_value(&site).unwrap();

        assert_eq!(json["title"], "gcop-rs");
        assert_eq!(json["lastUpdated"], true);
        assert_eq!(json["ignoreDeadLinks"], true);
        assert_eq!(json["locales"]["zh"]["lang"], "zh-CN");
        assert_eq!(json["locales"]["zh"]["themeConfig"]["lastUpdated"]["text"], "最后更新于");
        assert!(json["locales"]["root"]["themeConfig"].get("lastUpdated").is_none());
        assert_eq!(
            json["locales"]["root"]["themeConfig"]["sidebar"]["/release-notes/"][0]["items"][0]
                ["link"],
            "/release-notes/v1.0.0"
        );
        assert_eq!(json["themeConfig"]["socialLinks"][0]["icon"], "github");
        assert_eq!(json["themeConfig"]["search"]["provider"], "local");
        assert_eq!(json["startupHooks"][0]["kind"], "locale-redirect");
        assert_eq!(json["startupHooks"][0]["storageKey"], "lang-redirected");
        assert_eq!(json["startupHooks"][0]["targets"][0]["path"], "/zh/");
    }

    #[test]
    fn test_locales_keep_configuration_order() {
        let dir = project(CONFIG, &[], &[]);
        let mut config = load(&dir);
        config.locales.reverse();

        let site = SiteConfigBuilder::new(&config).build().unwrap();
        let json = serde_json::to_string(&site).unwrap();

        let zh = json.find("\"zh\":").unwrap();
        let root = json.find("\"root\":").unwrap();
        assert!(zh < root);
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = project(CONFIG, &["v1.0.0"], &[]);
        let output = dir.path().join("out/nested/site.json");
        let settings = CliSettings {
            output: Some(output.clone()),
            ..CliSettings::default()
        };
        let config =
            Config::load(Some(&dir.path().join("docnav.toml")), Some(&settings)).unwrap();

        let site = SiteConfigBuilder::new(&config).build().unwrap();
        site.write(&config.output_path).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(written["locales"]["root"]["link"], "/");
    }

    #[test]
    fn test_every_link_is_well_formed() {
        let dir = project(CONFIG, &["v2.0.0", "v1.5.10", "v1.5.2"], &["v2.0.0"]);
        let mut config = load(&dir);
        config.locales[0].nav.push(LinkConfig {
            text: "Changelog".to_owned(),
            link: "/release-notes/".to_owned(),
        });

        let site = SiteConfigBuilder::new(&config).build().unwrap();

        for locale in &site.locales {
            for link in locale.theme_config.navigation.links() {
                assert!(link.starts_with('/'), "{link}");
                assert!(!link.contains("//"), "{link}");
            }
        }
    }
}
