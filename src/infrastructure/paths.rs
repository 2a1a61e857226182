//! Path handling for the Zellij plugin sandbox.
//!
//! Inside the sandbox the host filesystem is mounted under `/host`, which
//! usually points at the directory Zellij was started from.

use std::path::PathBuf;

/// Returns the directory MovieFinder writes its span file to.
///
/// ```
/// use moviefinder::infrastructure::get_data_dir;
///
/// assert_eq!(get_data_dir().to_str(), Some("/host/.local/share/zellij/moviefinder"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    PathBuf::from("/host/.local/share/zellij").join("moviefinder")
}

/// Maps a `~`-prefixed path onto the `/host` mount.
///
/// Used for the `theme_file` configuration key, which users write relative to
/// their home directory.
///
/// ```
/// use moviefinder::infrastructure::expand_tilde;
///
/// assert_eq!(expand_tilde("~/themes/dune.toml"), "/host/themes/dune.toml");
/// assert_eq!(expand_tilde("~"), "/host");
/// assert_eq!(expand_tilde("/etc/theme.toml"), "/etc/theme.toml");
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    if path.starts_with("~/") {
        path.replacen('~', "/host", 1)
    } else if path == "~" {
        "/host".to_string()
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_only_expands_as_a_prefix() {
        assert_eq!(expand_tilde("~user/theme.toml"), "~user/theme.toml");
        assert_eq!(expand_tilde("themes/~/x.toml"), "themes/~/x.toml");
    }
}
