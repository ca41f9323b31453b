//! `.gtestgen.toml` loading.
//!
//! Every key is optional; values found in the file are layered over the
//! defaults and relative paths are resolved against the file's directory.
//! Unknown keys are reported with a typo suggestion but never rejected.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::types::DEFAULT_APP_GROUP;

/// Config file name looked up in the working directory.
pub const CONFIG_FILE: &str = ".gtestgen.toml";

/// Default project-relative root of the tests folder.
pub const DEFAULT_TEST_ROOT_MARKER: &str = "source/test";

/// Known keys in `.gtestgen.toml` for config validation.
const KNOWN_CONFIG_KEYS: &[&str] =
    &["app_group", "source_path", "test_path", "project_path", "test_root_marker", "force"];

/// Run settings. Command-line flags are applied on top by the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Fixture folder under the tests root, and the filter name in the project.
    pub app_group: String,
    /// Folder searched for `<Class>.h`.
    pub source_path: Option<PathBuf>,
    /// Tests root holding `<app_group>/` and `UnitTests/`.
    pub test_path: Option<PathBuf>,
    /// `.vcxproj` to register the new files in; `.filters` sits beside it.
    pub project_path: Option<PathBuf>,
    pub test_root_marker: String,
    /// Overwrite existing tests without asking.
    pub force: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_group: DEFAULT_APP_GROUP.to_string(),
            source_path: None,
            test_path: None,
            project_path: None,
            test_root_marker: DEFAULT_TEST_ROOT_MARKER.to_string(),
            force: false,
        }
    }
}

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Closest known key within edit distance 3.
fn suggest_key(key: &str) -> Option<&'static str> {
    KNOWN_CONFIG_KEYS
        .iter()
        .copied()
        .min_by_key(|k| edit_distance(key, k))
        .filter(|k| edit_distance(key, k) <= 3)
}

/// Load `.gtestgen.toml` from `dir`, or defaults when it is absent or broken.
pub fn load_config(dir: &Path) -> Config {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Config::default();
    }
    match load_config_file(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Could not read {CONFIG_FILE}, using defaults");
            Config::default()
        }
    }
}

/// Load an explicitly named config file. Failing to read it is an error;
/// failing to parse it falls back to defaults with a warning.
pub fn load_config_file(path: &Path) -> Result<Config> {
    debug!(path = %path.display(), "Loading config");
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(parse_config(&content, base))
}

/// Layer the keys of `content` over [`Config::default`].
pub fn parse_config(content: &str, base: &Path) -> Config {
    let mut config = Config::default();

    let table = match content.parse::<toml::Table>() {
        Ok(t) => t,
        Err(e) => {
            warn!(error = %e, "Failed to parse {CONFIG_FILE}");
            return config;
        }
    };

    // Warn on unknown keys
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        match suggest_key(key) {
            Some(suggestion) => warn!(
                key = key.as_str(),
                suggestion,
                "Unknown key in {CONFIG_FILE}, did you mean '{suggestion}'?"
            ),
            None => warn!(
                key = key.as_str(),
                "Unknown key in {CONFIG_FILE} (known keys: {})",
                KNOWN_CONFIG_KEYS.join(", ")
            ),
        }
    }

    let string = |key: &str| table.get(key).and_then(|v| v.as_str()).map(str::to_string);
    let path = |key: &str| string(key).map(|p| base.join(p));

    if let Some(group) = string("app_group").filter(|g| !g.is_empty()) {
        config.app_group = group;
    }
    if let Some(marker) = string("test_root_marker").filter(|m| !m.is_empty()) {
        config.test_root_marker = marker;
    }
    config.source_path = path("source_path");
    config.test_path = path("test_path");
    config.project_path = path("project_path");
    if let Some(force) = table.get("force").and_then(|v| v.as_bool()) {
        config.force = force;
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = parse_config("", Path::new("/repo"));
        assert_eq!(config, Config::default());
        assert_eq!(config.app_group, "GeneratedTests");
        assert_eq!(config.test_root_marker, "source/test");
    }

    #[test]
    fn test_known_keys_override_defaults() {
        let config = parse_config(
            "app_group = \"Framework\"\nsource_path = \"source/app\"\ntest_path = \"/abs/source/test\"\nproject_path = \"build/Tests.vcxproj\"\nforce = true\n",
            Path::new("/repo"),
        );
        assert_eq!(config.app_group, "Framework");
        assert_eq!(config.source_path, Some(PathBuf::from("/repo/source/app")));
        assert_eq!(config.test_path, Some(PathBuf::from("/abs/source/test")));
        assert_eq!(config.project_path, Some(PathBuf::from("/repo/build/Tests.vcxproj")));
        assert!(config.force);
    }

    #[test]
    fn test_wrong_types_and_unknown_keys_are_ignored() {
        let config = parse_config("force = \"yes\"\napp_grup = \"X\"\n", Path::new("/repo"));
        assert!(!config.force);
        assert_eq!(config.app_group, "GeneratedTests");
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let config = parse_config("app_group = ", Path::new("/repo"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_typo_suggestion() {
        assert_eq!(suggest_key("app_grup"), Some("app_group"));
        assert_eq!(suggest_key("projectpath"), Some("project_path"));
        assert_eq!(suggest_key("completely_unrelated"), None);
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let err = load_config_file(Path::new("/definitely/not/here/.gtestgen.toml")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }), "got: {err}");
    }
}
