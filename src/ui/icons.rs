//! Icon set used by themes.
//!
//! Themes name icons by string key (`"check"`, `"chevron-down"`, ...). Keys are
//! resolved to [`Icon`] once, while the theme is deserialized, so an unknown
//! key fails theme loading instead of rendering as a blank.

use crate::domain::PickerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A glyph the renderer can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Icon {
    Check,
    Plus,
    Cross,
    ChevronDown,
    ChevronUp,
    Tag,
    Folder,
    Star,
    Trophy,
    Heart,
    Dot,
}

/// Every icon with its theme key.
const ICON_KEYS: &[(Icon, &str)] = &[
    (Icon::Check, "check"),
    (Icon::Plus, "plus"),
    (Icon::Cross, "cross"),
    (Icon::ChevronDown, "chevron-down"),
    (Icon::ChevronUp, "chevron-up"),
    (Icon::Tag, "tag"),
    (Icon::Folder, "folder"),
    (Icon::Star, "star"),
    (Icon::Trophy, "trophy"),
    (Icon::Heart, "heart"),
    (Icon::Dot, "dot"),
];

impl Icon {
    /// The terminal glyph for this icon.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Check => "✓",
            Self::Plus => "+",
            Self::Cross => "✕",
            Self::ChevronDown => "▾",
            Self::ChevronUp => "▴",
            Self::Tag => "#",
            Self::Folder => "▸",
            Self::Star => "★",
            Self::Trophy => "♛",
            Self::Heart => "♥",
            Self::Dot => "•",
        }
    }

    /// The key themes use for this icon.
    #[must_use]
    pub fn key(self) -> &'static str {
        ICON_KEYS
            .iter()
            .find(|(icon, _)| *icon == self)
            .map_or("dot", |(_, key)| key)
    }
}

impl FromStr for Icon {
    type Err = PickerError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let key = key.trim().to_ascii_lowercase().replace('_', "-");
        ICON_KEYS
            .iter()
            .find(|(_, name)| *name == key)
            .map(|(icon, _)| *icon)
            .ok_or_else(|| PickerError::Theme(format!("unknown icon: {key}")))
    }
}

impl TryFrom<String> for Icon {
    type Error = PickerError;

    fn try_from(key: String) -> Result<Self, Self::Error> {
        key.parse()
    }
}

impl From<Icon> for String {
    fn from(icon: Icon) -> Self {
        icon.key().to_string()
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_round_trips() {
        for (icon, key) in ICON_KEYS {
            assert_eq!(key.parse::<Icon>().unwrap(), *icon);
            assert_eq!(icon.key(), *key);
        }
    }

    #[test]
    fn keys_are_forgiving_about_case_and_underscores() {
        assert_eq!("Chevron_Down".parse::<Icon>().unwrap(), Icon::ChevronDown);
        assert!("sparkles".parse::<Icon>().is_err());
    }

    #[test]
    fn deserializes_from_toml_string() {
        #[derive(Deserialize)]
        struct Holder {
            icon: Icon,
        }

        let holder: Holder = toml::from_str(r#"icon = "trophy""#).unwrap();
        assert_eq!(holder.icon, Icon::Trophy);
        assert!(toml::from_str::<Holder>(r#"icon = "rocket""#).is_err());
    }
}
