//! Navigation tree types.
//!
//! Each locale gets a top navigation bar and a sidebar map from route prefix
//! to sidebar items. Release notes are appended to both from the locale's
//! [`ReleaseIndex`].

use std::collections::BTreeMap;

use docnav_config::{LocaleConfig, SidebarItemConfig};
use serde::Serialize;

use crate::release::ReleaseIndex;

/// A display label paired with a route.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavigationEntry {
    /// Display label.
    pub text: String,
    /// Route.
    pub link: String,
}

impl NavigationEntry {
    /// Create an entry.
    pub fn new(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: link.into(),
        }
    }

    /// Entry for `segment` under the route `prefix`, labelled with the segment.
    ///
    /// Joins with exactly one `/` regardless of slashes on either side.
    #[must_use]
    pub fn under(prefix: &str, segment: &str) -> Self {
        let link = format!(
            "{}/{}",
            prefix.trim_end_matches('/'),
            segment.trim_start_matches('/')
        );
        Self::new(segment, link)
    }
}

/// A sidebar item: a link or a titled group of items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Single link.
    Link(NavigationEntry),
    /// Group of items with a heading.
    Group {
        /// Group heading.
        text: String,
        /// Items in the group.
        items: Vec<SidebarItem>,
        /// Whether the group starts collapsed.
        #[serde(skip_serializing_if = "Option::is_none")]
        collapsed: Option<bool>,
    },
}

impl SidebarItem {
    fn collect_links<'a>(&'a self, links: &mut Vec<&'a str>) {
        match self {
            Self::Link(entry) => links.push(&entry.link),
            Self::Group { items, .. } => {
                for item in items {
                    item.collect_links(links);
                }
            }
        }
    }
}

impl From<&SidebarItemConfig> for SidebarItem {
    fn from(item: &SidebarItemConfig) -> Self {
        match item {
            SidebarItemConfig::Group {
                text,
                items,
                collapsed,
            } => Self::Group {
                text: text.clone(),
                items: items.iter().map(Self::from).collect(),
                collapsed: *collapsed,
            },
            SidebarItemConfig::Link(link) => {
                Self::Link(NavigationEntry::new(&link.text, &link.link))
            }
        }
    }
}

/// Top navigation and sidebar of one locale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LocaleNavigationTree {
    /// Top navigation bar.
    pub nav: Vec<NavigationEntry>,
    /// Route prefix to sidebar items.
    pub sidebar: BTreeMap<String, Vec<SidebarItem>>,
}

impl LocaleNavigationTree {
    /// Build the tree for `locale`, adding its release notes.
    ///
    /// The top navigation ends with a release-notes entry pointing at the
    /// latest release (or the release-notes index when there is none). The
    /// release-notes route prefix gets a sidebar group listing every release.
    #[must_use]
    pub fn build(locale: &LocaleConfig, releases: &ReleaseIndex) -> Self {
        let label = locale.release_notes_text();

        let mut nav: Vec<NavigationEntry> = locale
            .nav
            .iter()
            .map(|entry| NavigationEntry::new(&entry.text, &entry.link))
            .collect();
        nav.push(releases.menu_entry(label));

        let mut sidebar: BTreeMap<String, Vec<SidebarItem>> = BTreeMap::new();
        for section in &locale.sidebar {
            sidebar
                .entry(section.prefix.clone())
                .or_default()
                .extend(section.groups.iter().map(SidebarItem::from));
        }
        sidebar
            .entry(releases.index_route())
            .or_default()
            .push(SidebarItem::Group {
                text: label.to_owned(),
                items: releases
                    .entries()
                    .iter()
                    .cloned()
                    .map(SidebarItem::Link)
                    .collect(),
                collapsed: None,
            });

        Self { nav, sidebar }
    }

    /// Every link in the tree: top navigation first, then sidebars by prefix.
    #[must_use]
    pub fn links(&self) -> Vec<&str> {
        let mut links: Vec<&str> = self.nav.iter().map(|entry| entry.link.as_str()).collect();
        for items in self.sidebar.values() {
            for item in items {
                item.collect_links(&mut links);
            }
        }
        links
    }
}
