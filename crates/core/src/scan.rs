use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::UNIT_TESTS_DIR;

/// Directory names never descended into.
const SKIP_DIRS: &[&str] = &[".git", ".vs", "node_modules", "x64", "Win32"];

// ---------------------------------------------------------------------------
// Directory walk
// ---------------------------------------------------------------------------

/// All regular files under `root`, sorted. Hidden entries and [`SKIP_DIRS`]
/// are left out; `.gitignore` rules are not applied.
pub fn walk_files(root: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .filter_entry(|entry| {
            if entry.file_type().is_some_and(|ft| ft.is_dir()) {
                let name = entry.file_name().to_string_lossy();
                return !SKIP_DIRS.contains(&name.as_ref());
            }
            true
        })
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .map(|entry| entry.into_path())
        .collect();
    files.sort();
    debug!(root = %root.display(), files = files.len(), "Walked directory");
    files
}

fn file_name_of(path: &Path) -> &str {
    path.file_name().and_then(|n| n.to_str()).unwrap_or("")
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// First file under `source_root` named exactly `<class_name>.h`.
pub fn find_header(source_root: &Path, class_name: &str) -> Result<PathBuf> {
    let wanted = format!("{class_name}.h");
    walk_files(source_root).into_iter().find(|p| file_name_of(p) == wanted).ok_or_else(|| {
        Error::HeaderNotFound {
            class_name: class_name.to_string(),
            root: source_root.to_path_buf(),
        }
    })
}

/// Previously generated files for `class_name` under `test_root`: fixture
/// files inside an `<app_group>` folder and unit-test files anywhere.
pub fn existing_tests(test_root: &Path, class_name: &str, app_group: &str) -> Vec<PathBuf> {
    if !test_root.exists() {
        return Vec::new();
    }
    let fixture_stem = format!("{class_name}Test");
    let unit_stem = format!("{class_name}{UNIT_TESTS_DIR}");

    walk_files(test_root)
        .into_iter()
        .filter(|p| {
            let stem = p.file_stem().and_then(|s| s.to_str()).unwrap_or("");
            let parent = p.parent().map(file_name_of).unwrap_or("");
            (stem == fixture_stem && parent == app_group) || stem == unit_stem
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_walk_skips_hidden_and_build_dirs() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "a/Widget.h");
        touch(tmp.path(), ".git/config");
        touch(tmp.path(), "x64/Debug/Widget.obj");
        let files = walk_files(tmp.path());
        assert_eq!(files, vec![tmp.path().join("a/Widget.h")]);
    }

    #[test]
    fn test_find_header_matches_exact_name() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "app/MyWidget.h");
        touch(tmp.path(), "core/Widget.h");
        let found = find_header(tmp.path(), "Widget").unwrap();
        assert_eq!(found, tmp.path().join("core/Widget.h"));
    }

    #[test]
    fn test_find_header_missing() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "core/Gadget.h");
        let err = find_header(tmp.path(), "Widget").unwrap_err();
        assert!(matches!(err, Error::HeaderNotFound { .. }), "got: {err}");
    }

    #[test]
    fn test_existing_tests() {
        let tmp = TempDir::new().unwrap();
        touch(tmp.path(), "Core/WidgetTest.h");
        touch(tmp.path(), "Core/WidgetTest.cpp");
        touch(tmp.path(), "Other/WidgetTest.h");
        touch(tmp.path(), "UnitTests/WidgetUnitTests.cpp");
        touch(tmp.path(), "UnitTests/GadgetUnitTests.cpp");
        let found = existing_tests(tmp.path(), "Widget", "Core");
        assert_eq!(
            found,
            vec![
                tmp.path().join("Core/WidgetTest.cpp"),
                tmp.path().join("Core/WidgetTest.h"),
                tmp.path().join("UnitTests/WidgetUnitTests.cpp"),
            ]
        );
    }

    #[test]
    fn test_existing_tests_on_missing_root() {
        assert!(existing_tests(Path::new("/no/such/tests"), "Widget", "Core").is_empty());
    }
}
