//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.description`
//! - `social_links[].link`

mod expand;

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override the generated site config path.
    pub output: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Key of the default locale, served from `/`.
pub const ROOT_LOCALE: &str = "root";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site-wide settings.
    pub site: SiteInfo,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Build output configuration (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Static social/repository links, passed through unvalidated.
    pub social_links: Vec<SocialLink>,
    /// Browser-language redirect settings.
    pub redirect: RedirectConfig,
    /// Supported locales, in display order.
    pub locales: Vec<LocaleConfig>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved path of the generated site config (set after loading).
    #[serde(skip)]
    pub output_path: PathBuf,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site-wide settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteInfo {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Whether pages show a "last updated" timestamp.
    pub last_updated: bool,
    /// Whether the site framework should ignore dead links.
    pub ignore_dead_links: bool,
    /// Search provider name, passed through to the site framework.
    pub search: Option<String>,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            description: String::new(),
            last_updated: false,
            ignore_dead_links: false,
            search: None,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    extension: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Root directory of the documentation sources.
    pub source_dir: PathBuf,
    /// Recognized document extension, without the leading dot.
    pub extension: String,
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output: Option<String>,
}

/// A social or repository link shown in the top navigation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SocialLink {
    /// Icon name understood by the site theme (e.g. "github").
    pub icon: String,
    /// Target URL.
    pub link: String,
}

/// Browser-language redirect configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Whether the redirect startup hook is emitted.
    pub enabled: bool,
    /// Session storage key of the "already redirected" flag.
    pub storage_key: String,
    /// Paths treated as the root landing page.
    pub root_paths: Vec<String>,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            storage_key: "lang-redirected".to_owned(),
            root_paths: vec!["/".to_owned(), "/index.html".to_owned()],
        }
    }
}

/// A `{text, link}` pair as written in TOML.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LinkConfig {
    /// Display label.
    pub text: String,
    /// Route.
    pub link: String,
}

/// A sidebar item as written in TOML: either a link or a nested group.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SidebarItemConfig {
    /// Group of items with a heading.
    Group {
        /// Group heading.
        text: String,
        /// Items in the group.
        items: Vec<SidebarItemConfig>,
        /// Whether the group starts collapsed.
        #[serde(default)]
        collapsed: Option<bool>,
    },
    /// Single link.
    Link(LinkConfig),
}

/// Sidebar shown for every route under `prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SidebarSectionConfig {
    /// Route prefix (e.g. "/guide/").
    pub prefix: String,
    /// Top-level sidebar items.
    #[serde(default)]
    pub groups: Vec<SidebarItemConfig>,
}

/// Release-notes settings of a locale. Missing values default per locale key.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReleaseNotesConfig {
    dir: Option<String>,
    prefix: Option<String>,
    text: Option<String>,
}

/// A supported locale.
#[derive(Debug, Deserialize)]
pub struct LocaleConfig {
    /// Locale key: `root` for the default locale, otherwise its route segment.
    pub key: String,
    /// Name shown in the language switcher.
    pub label: String,
    /// Language tag (e.g. "zh-CN").
    pub lang: String,
    /// Browser-language prefix that redirects to this locale.
    /// Defaults to the primary subtag of `lang`. Ignored for the root locale.
    #[serde(default)]
    pub redirect_code: Option<String>,
    /// Label of the "last updated" timestamp.
    #[serde(default)]
    pub last_updated_text: Option<String>,
    /// Top navigation entries, before the release-notes entry.
    #[serde(default)]
    pub nav: Vec<LinkConfig>,
    /// Sidebar sections.
    #[serde(default)]
    pub sidebar: Vec<SidebarSectionConfig>,
    /// Release-notes settings.
    #[serde(default)]
    pub release_notes: ReleaseNotesConfig,
}

impl LocaleConfig {
    /// Create a locale with default navigation settings.
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            lang: lang.into(),
            redirect_code: None,
            last_updated_text: None,
            nav: Vec::new(),
            sidebar: Vec::new(),
            release_notes: ReleaseNotesConfig::default(),
        }
    }

    /// Whether this is the default locale.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.key == ROOT_LOCALE
    }

    /// Landing route of the locale (`/` or `/<key>/`).
    #[must_use]
    pub fn root_path(&self) -> String {
        if self.is_root() {
            "/".to_owned()
        } else {
            format!("/{}/", self.key)
        }
    }

    /// Release-notes directory, relative to the docs source directory.
    #[must_use]
    pub fn release_notes_dir(&self) -> PathBuf {
        match &self.release_notes.dir {
            Some(dir) => PathBuf::from(dir),
            None if self.is_root() => PathBuf::from("release-notes"),
            None => Path::new(&self.key).join("release-notes"),
        }
    }

    /// Route prefix of release-note pages, without a trailing slash.
    #[must_use]
    pub fn release_notes_prefix(&self) -> String {
        let prefix = match &self.release_notes.prefix {
            Some(prefix) => prefix.clone(),
            None if self.is_root() => "/release-notes".to_owned(),
            None => format!("/{}/release-notes", self.key),
        };
        prefix.trim_end_matches('/').to_owned()
    }

    /// Label of the release-notes menu entry and sidebar group.
    #[must_use]
    pub fn release_notes_text(&self) -> &str {
        self.release_notes.text.as_deref().unwrap_or("Release Notes")
    }

    /// Browser-language prefix that selects this locale, if any.
    #[must_use]
    pub fn redirect_code(&self) -> Option<String> {
        if self.is_root() {
            return None;
        }
        let code = match &self.redirect_code {
            Some(code) => code.clone(),
            None => self
                .lang
                .split(['-', '_'])
                .next()
                .unwrap_or_default()
                .to_owned(),
        };
        (!code.is_empty()).then(|| code.to_lowercase())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.title`").
        field: String,
        /// Error message (e.g., "${`SITE_TITLE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a route to be absolute and free of empty segments.
fn require_route(value: &str, field: &str) -> Result<(), ConfigError> {
    if !value.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must start with '/', got {value:?}"
        )));
    }
    if value.contains("//") {
        return Err(ConfigError::Validation(format!(
            "{field} must not contain '//', got {value:?}"
        )));
    }
    Ok(())
}

fn validate_sidebar_items(items: &[SidebarItemConfig], field: &str) -> Result<(), ConfigError> {
    for item in items {
        match item {
            SidebarItemConfig::Group { text, items, .. } => {
                require_non_empty(text, &format!("{field}.text"))?;
                validate_sidebar_items(items, &format!("{field}.items"))?;
            }
            SidebarItemConfig::Link(link) => {
                require_non_empty(&link.text, &format!("{field}.text"))?;
                require_route(&link.link, &format!("{field}.link"))?;
            }
        }
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output) = &settings.output {
            self.output_path.clone_from(output);
        }
    }

    /// Find a locale by key.
    #[must_use]
    pub fn locale(&self, key: &str) -> Option<&LocaleConfig> {
        self.locales.iter().find(|locale| locale.key == key)
    }

    /// Absolute release-notes directory of a locale.
    #[must_use]
    pub fn release_notes_dir(&self, locale: &LocaleConfig) -> PathBuf {
        self.docs_resolved
            .source_dir
            .join(locale.release_notes_dir())
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteInfo::default(),
            docs: DocsConfigRaw::default(),
            build: BuildConfigRaw::default(),
            social_links: Vec::new(),
            redirect: RedirectConfig::default(),
            locales: vec![LocaleConfig::new(ROOT_LOCALE, "English", "en")],
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
                extension: "md".to_owned(),
            },
            output_path: base.join(".docnav/site.json"),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        self.validate_docs()?;
        self.validate_redirect()?;
        self.validate_locales()?;
        Ok(())
    }

    fn validate_docs(&self) -> Result<(), ConfigError> {
        let extension = &self.docs_resolved.extension;
        require_non_empty(extension, "docs.extension")?;
        if extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "docs.extension must not start with '.', got {extension:?}"
            )));
        }
        Ok(())
    }

    fn validate_redirect(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.redirect.storage_key, "redirect.storage_key")?;
        if self.redirect.root_paths.is_empty() {
            return Err(ConfigError::Validation(
                "redirect.root_paths must list at least one path".to_owned(),
            ));
        }
        for path in &self.redirect.root_paths {
            require_route(path, "redirect.root_paths")?;
        }
        Ok(())
    }

    fn validate_locales(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for locale in &self.locales {
            let field = format!("locales.{}", locale.key);
            require_non_empty(&locale.key, "locales.key")?;
            if locale.key.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "{field}: key must be a single route segment"
                )));
            }
            if !seen.insert(locale.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "{field}: duplicate locale key"
                )));
            }
            require_non_empty(&locale.label, &format!("{field}.label"))?;
            require_non_empty(&locale.lang, &format!("{field}.lang"))?;
            require_route(
                &locale.release_notes_prefix(),
                &format!("{field}.release_notes.prefix"),
            )?;
            for entry in &locale.nav {
                require_non_empty(&entry.text, &format!("{field}.nav.text"))?;
                require_route(&entry.link, &format!("{field}.nav.link"))?;
            }
            for section in &locale.sidebar {
                require_route(&section.prefix, &format!("{field}.sidebar.prefix"))?;
                validate_sidebar_items(&section.groups, &format!("{field}.sidebar"))?;
            }
        }

        if !seen.contains(ROOT_LOCALE) {
            return Err(ConfigError::Validation(format!(
                "a locale with key \"{ROOT_LOCALE}\" is required"
            )));
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        self.site.description = expand::expand_env(&self.site.description, "site.description")?;

        for social in &mut self.social_links {
            social.link = expand::expand_env(&social.link, "social_links.link")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            source_dir: resolve(self.docs.source_dir.as_deref(), "docs"),
            extension: self
                .docs
                .extension
                .clone()
                .unwrap_or_else(|| "md".to_owned()),
        };
        self.output_path = resolve(self.build.output.as_deref(), ".docnav/site.json");
    }
}
