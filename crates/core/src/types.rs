//! Core types shared across gtestgen: extracted method records, generated
//! files and the file set returned by the generation phase, tagged files
//! handed to the splicer, and the region/document labels used in reports.

use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Placeholder rendered wherever extraction could not determine a value.
pub const NOT_FOUND: &str = "not found";

/// Default application group: fixture folder and project filter name.
pub const DEFAULT_APP_GROUP: &str = "GeneratedTests";

/// Folder (and include-path segment) that holds every unit-test source.
pub const UNIT_TESTS_DIR: &str = "UnitTests";

// ---------------------------------------------------------------------------
// Extraction output
// ---------------------------------------------------------------------------

/// One documented declaration recognized in a header.
///
/// Either field is `None` when its sub-pattern did not match; the renderer
/// decides what placeholder to show. Records are never mutated after
/// extraction, display names live alongside them (see [`crate::overload`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodRecord {
    pub name: Option<String>,
    pub signature: Option<String>,
}

impl MethodRecord {
    pub fn name_or_placeholder(&self) -> &str {
        self.name.as_deref().unwrap_or(NOT_FOUND)
    }

    pub fn signature_or_placeholder(&self) -> &str {
        self.signature.as_deref().unwrap_or(NOT_FOUND)
    }
}

// ---------------------------------------------------------------------------
// Generation output
// ---------------------------------------------------------------------------

/// Which of the three scaffold files a [`GeneratedFile`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    FixtureHeader,
    FixtureSource,
    UnitTests,
}

impl FileRole {
    /// File name for this role, derived from the class name alone.
    pub fn file_name(self, class_name: &str) -> String {
        match self {
            FileRole::FixtureHeader => format!("{class_name}Test.h"),
            FileRole::FixtureSource => format!("{class_name}Test.cpp"),
            FileRole::UnitTests => format!("{class_name}UnitTests.cpp"),
        }
    }

    pub fn is_header(self) -> bool {
        matches!(self, FileRole::FixtureHeader)
    }

    pub fn is_unit_tests(self) -> bool {
        matches!(self, FileRole::UnitTests)
    }
}

/// A rendered file, not yet written anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedFile {
    pub file_name: String,
    pub file_text: String,
}

/// Everything the generation phase hands back: the three scaffold files plus
/// the method records they were rendered from, in header order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileSet {
    pub fixture_header: GeneratedFile,
    pub fixture_source: GeneratedFile,
    pub unit_tests: GeneratedFile,
    pub methods: Vec<MethodRecord>,
}

impl FileSet {
    /// The three files with their roles, in header/source/tests order.
    pub fn files(&self) -> [(FileRole, &GeneratedFile); 3] {
        [
            (FileRole::FixtureHeader, &self.fixture_header),
            (FileRole::FixtureSource, &self.fixture_source),
            (FileRole::UnitTests, &self.unit_tests),
        ]
    }
}

// ---------------------------------------------------------------------------
// Splice input / reporting
// ---------------------------------------------------------------------------

/// A generated file plus the two markup fragments that register it in the
/// project document and its filter companion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedFile {
    pub role: FileRole,
    pub file_name: String,
    pub include_path: String,
    pub include_tag: String,
    pub filter_tag: String,
}

/// What a discovered `<ItemGroup>` region holds, judged by its first child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Sources,
    Headers,
    FilterDeclarations,
    Other,
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RegionKind::Sources => "ClCompile",
            RegionKind::Headers => "ClInclude",
            RegionKind::FilterDeclarations => "Filter",
            RegionKind::Other => "other",
        };
        f.write_str(label)
    }
}

/// Which of the two project documents a splice report refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Project,
    Filters,
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Project => f.write_str("project file"),
            DocumentKind::Filters => f.write_str("filters file"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_names_follow_class_name() {
        assert_eq!(FileRole::FixtureHeader.file_name("Widget"), "WidgetTest.h");
        assert_eq!(FileRole::FixtureSource.file_name("Widget"), "WidgetTest.cpp");
        assert_eq!(FileRole::UnitTests.file_name("Widget"), "WidgetUnitTests.cpp");
    }

    #[test]
    fn test_placeholders_for_missing_fields() {
        let rec = MethodRecord { name: None, signature: Some("void Run()".into()) };
        assert_eq!(rec.name_or_placeholder(), "not found");
        assert_eq!(rec.signature_or_placeholder(), "void Run()");
    }
}
