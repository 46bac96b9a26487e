//! Sandbox path helpers.

use std::path::PathBuf;

/// Host mount point inside the sandbox.
const HOST_ROOT: &str = "/host";

/// Directory holding the catalogue store and trace files.
///
/// `/host` maps to the directory Zellij was started from, usually the home
/// directory, so this is normally `~/.local/share/zellij/artisan-combobox`.
///
/// ```
/// use artisan_combobox::infrastructure::get_data_dir;
///
/// assert_eq!(
///     get_data_dir().to_str(),
///     Some("/host/.local/share/zellij/artisan-combobox")
/// );
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from(HOST_ROOT)
        .join(".local/share/zellij")
        .join("artisan-combobox")
}

/// Rewrites a `~`-prefixed path from the plugin configuration to its sandbox location.
///
/// ```
/// use artisan_combobox::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/clay.toml"), "/host/themes/clay.toml");
/// assert_eq!(expand_tilde("/etc/clay.toml"), "/etc/clay.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    match path.strip_prefix('~') {
        Some("") => HOST_ROOT.to_string(),
        Some(rest) if rest.starts_with('/') => format!("{HOST_ROOT}{rest}"),
        _ => path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_forms() {
        assert_eq!(expand_tilde("~"), "/host");
        assert_eq!(expand_tilde("~/a"), "/host/a");
        assert_eq!(expand_tilde("~other/a"), "~other/a");
        assert_eq!(expand_tilde("relative/a"), "relative/a");
    }
}
