//! Theme management and ANSI escape sequence generation.
//!
//! Themes are TOML documents with a colour palette and an icon table. Built-in
//! themes are compiled in and looked up by name; custom themes are loaded from
//! a file path.
//!
//! # Built-in Themes
//!
//! - `catppuccin-mocha`: Dark theme with warm tones (default)
//! - `catppuccin-latte`: Light theme with soft pastels
//! - `terracotta`: Earthy dark theme in clay and sage
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! highlight_fg = "#1e1e2e"
//! highlight_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! input_fg = "#cdd6f4"
//! placeholder_fg = "#6c7086"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! group_fg = "#89b4fa"
//! tag_fg = "#1e1e2e"
//! tag_bg = "#a6e3a1"
//! create_fg = "#a6e3a1"
//! disabled_fg = "#585b70"
//! hint_fg = "#89b4fa"
//!
//! [icons]
//! selected = "check"
//! create = "plus"
//! ```
//!
//! # Example
//!
//! ```rust
//! use artisan_combobox::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! let styled = format!("{}Bold{}", Theme::bold(), Theme::reset());
//! assert!(styled.ends_with("\u{1b}[0m"));
//! assert!(Theme::fg(&theme.colors.header_fg).starts_with("\u{1b}[38;2;"));
//! ```

use crate::domain::error::{PickerError, Result};
use crate::ui::icons::Icon;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "catppuccin-mocha";

/// Built-in themes: `(name, TOML source)`.
const BUILTIN_THEMES: &[(&str, &str)] = &[
    ("catppuccin-mocha", include_str!("../../themes/catppuccin-mocha.toml")),
    ("catppuccin-latte", include_str!("../../themes/catppuccin-latte.toml")),
    ("terracotta", include_str!("../../themes/terracotta.toml")),
];

/// Colour scheme and icon set for rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
    #[serde(default)]
    pub icons: ThemeIcons,
}

/// Colour definitions, as hex strings (`"#cdd6f4"`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Title text.
    pub header_fg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_bg: Option<String>,

    /// Highlighted entry foreground.
    pub highlight_fg: String,
    /// Highlighted entry background.
    pub highlight_bg: String,

    pub text_normal: String,
    /// Descriptions, footer and other secondary text.
    pub text_dim: String,
    pub border: String,

    pub input_fg: String,
    pub placeholder_fg: String,

    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Group header text.
    pub group_fg: String,
    /// Selected value chips.
    pub tag_fg: String,
    pub tag_bg: String,
    /// The create entry.
    pub create_fg: String,
    /// Disabled options and the disabled input.
    pub disabled_fg: String,
    /// "Type N more characters" and "No results".
    pub hint_fg: String,
}

impl Default for ThemeColors {
    /// Catppuccin Mocha palette.
    fn default() -> Self {
        Self {
            header_fg: "#cba6f7".to_string(),
            header_bg: None,
            highlight_fg: "#1e1e2e".to_string(),
            highlight_bg: "#f5c2e7".to_string(),
            text_normal: "#cdd6f4".to_string(),
            text_dim: "#6c7086".to_string(),
            border: "#45475a".to_string(),
            input_fg: "#cdd6f4".to_string(),
            placeholder_fg: "#6c7086".to_string(),
            match_highlight_fg: "#1e1e2e".to_string(),
            match_highlight_bg: "#f9e2af".to_string(),
            group_fg: "#89b4fa".to_string(),
            tag_fg: "#1e1e2e".to_string(),
            tag_bg: "#a6e3a1".to_string(),
            create_fg: "#a6e3a1".to_string(),
            disabled_fg: "#585b70".to_string(),
            hint_fg: "#89b4fa".to_string(),
        }
    }
}

/// Icon assignment for each role the renderer draws.
///
/// Each field is optional in TOML and falls back to the default icon.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeIcons {
    /// Marks options already in the selection.
    pub selected: Icon,
    /// Prefixes the create entry.
    pub create: Icon,
    /// Clear button and tag close action.
    pub clear: Icon,
    /// Caret while the dropdown is open.
    pub expanded: Icon,
    /// Caret while the dropdown is closed.
    pub collapsed: Icon,
    /// Prefixes selected value chips.
    pub tag: Icon,
    /// Prefixes group headers.
    pub group: Icon,
    /// Prefixes the highlighted entry.
    pub pointer: Icon,
}

impl Default for ThemeIcons {
    fn default() -> Self {
        Self {
            selected: Icon::Check,
            create: Icon::Plus,
            clear: Icon::Cross,
            expanded: Icon::ChevronUp,
            collapsed: Icon::ChevronDown,
            tag: Icon::Tag,
            group: Icon::Folder,
            pointer: Icon::Dot,
        }
    }
}

impl Theme {
    /// Names of all built-in themes.
    pub fn builtin_names() -> impl Iterator<Item = &'static str> {
        BUILTIN_THEMES.iter().map(|(name, _)| *name)
    }

    /// Loads a built-in theme by name, `None` if the name is unknown.
    ///
    /// # Example
    ///
    /// ```rust
    /// use artisan_combobox::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("terracotta").unwrap();
    /// assert_eq!(theme.name, "terracotta");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let (_, source) = BUILTIN_THEMES.iter().find(|(builtin, _)| *builtin == name)?;

        match toml::from_str(source) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::error!(theme = %name, error = %e, "built-in theme failed to parse");
                None
            }
        }
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PickerError::Theme`] if the file cannot be read, is not valid
    /// TOML, or names an unknown icon.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| PickerError::Theme(format!("failed to read theme file: {e}")))?;

        toml::from_str(&contents).map_err(|e| PickerError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Converts a hex colour to RGB; white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// ANSI 24-bit foreground escape for a hex colour.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background escape for a hex colour.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// The built-in `catppuccin-mocha` theme.
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| Self {
            name: DEFAULT_THEME.to_string(),
            colors: ThemeColors::default(),
            icons: ThemeIcons::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn all_builtin_themes_parse() {
        for name in Theme::builtin_names() {
            let theme = Theme::from_name(name).unwrap_or_else(|| panic!("{name} should parse"));
            assert_eq!(theme.name, name);
        }
    }

    #[test]
    fn terracotta_overrides_icons() {
        let theme = Theme::from_name("terracotta").unwrap();
        assert_eq!(theme.icons.selected, Icon::Heart);
        assert_eq!(theme.icons.group, Icon::Star);
        assert_eq!(theme.icons.create, Icon::Plus);
    }

    #[test]
    fn file_theme_with_unknown_icon_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        let source = Theme::from_name("catppuccin-latte")
            .map(|theme| toml::to_string(&theme).unwrap())
            .unwrap();
        write!(file, "{}", source.replace("\"check\"", "\"rocket\"")).unwrap();

        let err = Theme::from_file(file.path()).unwrap_err();
        assert!(matches!(err, PickerError::Theme(_)));
    }

    #[test]
    fn file_theme_loads() {
        let mut file = NamedTempFile::new().unwrap();
        let source = toml::to_string(&Theme::default()).unwrap();
        write!(file, "{source}").unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, DEFAULT_THEME);
        assert_eq!(theme.icons, ThemeIcons::default());
    }

    #[test]
    fn hex_colours_become_truecolor_escapes() {
        assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
        assert_eq!(Theme::bg("0000ff"), "\u{1b}[48;2;0;0;255m");
        assert_eq!(Theme::fg("nope"), "\u{1b}[38;2;255;255;255m");
    }
}
