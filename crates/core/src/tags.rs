//! Project entry tags: the include path of each generated file relative to
//! the project file, and the `.vcxproj` / `.vcxproj.filters` elements that
//! register it.

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{FileSet, TaggedFile, UNIT_TESTS_DIR};

/// Indent unit used inside multi-line tags (Visual Studio writes two spaces).
pub const TAG_INDENT: &str = "  ";

/// Build a [`TaggedFile`] for every generated file in `files`.
///
/// `test_root` is the absolute tests folder; `marker` names the
/// project-relative root inside it (e.g. `source/test`). Files without a
/// name are skipped.
pub fn tag_files(
    test_root: &str,
    marker: &str,
    app_group: &str,
    files: &FileSet,
) -> Result<Vec<TaggedFile>> {
    let (relative, sep) = project_relative(test_root, marker).ok_or_else(|| {
        Error::TestRootNotFound { path: test_root.to_string(), marker: marker.to_string() }
    })?;
    debug!(relative = relative, separator = %sep, "Resolved project-relative test root");

    let sep_str = sep.to_string();
    let mut tagged = Vec::with_capacity(3);
    for (role, file) in files.files() {
        if file.file_name.is_empty() {
            debug!(?role, "Skipping unnamed entry");
            continue;
        }

        let folder = if role.is_unit_tests() { UNIT_TESTS_DIR } else { app_group };
        let mut parts: Vec<&str> = vec!["..", ".."];
        parts.extend(relative.split(sep).filter(|p| !p.is_empty()));
        parts.push(folder);
        parts.push(&file.file_name);
        let include_path = parts.join(sep_str.as_str());

        let element = if role.is_header() { "ClInclude" } else { "ClCompile" };
        tagged.push(TaggedFile {
            role,
            file_name: file.file_name.clone(),
            include_tag: format!("<{element} Include=\"{include_path}\" />"),
            filter_tag: format!(
                "<{element} Include=\"{include_path}\">\n{TAG_INDENT}<Filter>{app_group}</Filter>\n</{element}>"
            ),
            include_path,
        });
    }
    Ok(tagged)
}

/// Suffix of `test_root` starting at `marker` (whole path components only,
/// either separator accepted), plus the separator the path uses there.
pub fn project_relative<'a>(test_root: &'a str, marker: &str) -> Option<(&'a str, char)> {
    let parts: Vec<String> =
        marker.split(['/', '\\']).filter(|p| !p.is_empty()).map(regex::escape).collect();
    if parts.is_empty() {
        return None;
    }
    let pattern = format!(r"(?:^|[\\/])({})(?:[\\/]|$)", parts.join(r"[\\/]"));
    let re = Regex::new(&pattern).ok()?;
    let start = re.captures(test_root)?.get(1)?.start();

    let relative = test_root[start..].trim_end_matches(['/', '\\']);
    let sep = relative
        .chars()
        .chain(test_root.chars())
        .find(|c| *c == '/' || *c == '\\')
        .unwrap_or('/');
    Some((relative, sep))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose;

    #[test]
    fn test_unix_include_paths() {
        let set = compose("Widget", "Core", vec![]);
        let tagged = tag_files("/home/dev/proj/source/test", "source/test", "Core", &set).unwrap();
        let paths: Vec<&str> = tagged.iter().map(|t| t.include_path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "../../source/test/Core/WidgetTest.h",
                "../../source/test/Core/WidgetTest.cpp",
                "../../source/test/UnitTests/WidgetUnitTests.cpp",
            ]
        );
    }

    #[test]
    fn test_windows_separator_is_kept() {
        let set = compose("Widget", "Core", vec![]);
        let tagged = tag_files(r"C:\work\proj\source\test\", "source/test", "Core", &set).unwrap();
        assert_eq!(tagged[0].include_path, r"..\..\source\test\Core\WidgetTest.h");
        assert_eq!(tagged[0].include_tag, r#"<ClInclude Include="..\..\source\test\Core\WidgetTest.h" />"#);
    }

    #[test]
    fn test_element_kind_follows_role() {
        let set = compose("Widget", "Core", vec![]);
        let tagged = tag_files("/p/source/test", "source/test", "Core", &set).unwrap();
        assert!(tagged[0].include_tag.starts_with("<ClInclude "));
        assert!(tagged[1].include_tag.starts_with("<ClCompile "));
        assert!(tagged[2].include_tag.starts_with("<ClCompile "));
        assert_eq!(
            tagged[1].filter_tag,
            "<ClCompile Include=\"../../source/test/Core/WidgetTest.cpp\">\n  <Filter>Core</Filter>\n</ClCompile>"
        );
    }

    #[test]
    fn test_deeper_test_root_keeps_suffix() {
        let (rel, sep) = project_relative("/x/source/test/integration", "source/test").unwrap();
        assert_eq!(rel, "source/test/integration");
        assert_eq!(sep, '/');
    }

    #[test]
    fn test_marker_must_be_whole_components() {
        assert!(project_relative("/x/mysource/test", "source/test").is_none());
    }

    #[test]
    fn test_missing_marker_is_an_error() {
        let set = compose("Widget", "Core", vec![]);
        let err = tag_files("/home/dev/tests", "source/test", "Core", &set).unwrap_err();
        assert!(matches!(err, Error::TestRootNotFound { .. }), "got: {err}");
    }

    #[test]
    fn test_unnamed_entries_are_skipped() {
        let mut set = compose("Widget", "Core", vec![]);
        set.fixture_source.file_name.clear();
        let tagged = tag_files("/p/source/test", "source/test", "Core", &set).unwrap();
        assert_eq!(tagged.len(), 2);
    }
}
