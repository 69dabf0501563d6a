//! Authenticated shell: section selection plus sidebar and mobile menu state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Feed,
    Communities,
    Messages,
    Videocalls,
    Forums,
    Privacy,
    Profile,
}

/// Sidebar entries in display order. Profile is reached from the user card.
pub const NAVIGATION: [Section; 6] = [
    Section::Feed,
    Section::Communities,
    Section::Messages,
    Section::Videocalls,
    Section::Forums,
    Section::Privacy,
];

impl Section {
    pub fn all() -> &'static [Self] {
        &[
            Self::Feed,
            Self::Communities,
            Self::Messages,
            Self::Videocalls,
            Self::Forums,
            Self::Privacy,
            Self::Profile,
        ]
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Communities => "communities",
            Self::Messages => "messages",
            Self::Videocalls => "videocalls",
            Self::Forums => "forums",
            Self::Privacy => "privacy",
            Self::Profile => "profile",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Feed => "Feed",
            Self::Communities => "Communities",
            Self::Messages => "Messages",
            Self::Videocalls => "Video Calls",
            Self::Forums => "Forums",
            Self::Privacy => "Privacy Dashboard",
            Self::Profile => "Profile",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|v| v.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown section '{s}'"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Shell {
    active: Section,
    sidebar_collapsed: bool,
    mobile_menu_open: bool,
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> Section {
        self.active
    }

    pub fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar_collapsed
    }

    pub fn is_mobile_menu_open(&self) -> bool {
        self.mobile_menu_open
    }

    pub fn navigate(&mut self, section: Section) {
        self.active = section;
        self.mobile_menu_open = false;
    }

    pub fn toggle_sidebar(&mut self) {
        self.sidebar_collapsed = !self.sidebar_collapsed;
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.mobile_menu_open = !self.mobile_menu_open;
    }

    pub fn close_mobile_menu(&mut self) {
        self.mobile_menu_open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_feed_with_menus_closed() {
        let s = Shell::new();
        assert_eq!(s.active(), Section::Feed);
        assert!(!s.is_sidebar_collapsed());
        assert!(!s.is_mobile_menu_open());
    }

    #[test]
    fn navigation_closes_mobile_menu() {
        let mut s = Shell::new();
        s.toggle_mobile_menu();
        assert!(s.is_mobile_menu_open());
        s.navigate(Section::Forums);
        assert_eq!(s.active(), Section::Forums);
        assert!(!s.is_mobile_menu_open());
    }

    #[test]
    fn sidebar_lists_everything_but_profile() {
        assert_eq!(NAVIGATION.len(), 6);
        assert!(!NAVIGATION.contains(&Section::Profile));
        assert_eq!(Section::Videocalls.label(), "Video Calls");
    }

    #[test]
    fn sections_parse_from_keys() {
        for s in Section::all() {
            assert_eq!(s.key().parse::<Section>().unwrap(), *s);
        }
    }
}
