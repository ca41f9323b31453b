//! gtestgen-core: GoogleTest scaffolding for documented C++ classes.
//!
//! Reads a class header, picks out the `@return`-documented public methods,
//! renders a fixture header/source pair plus a `TEST_F` stub file, and
//! registers the new files in a Visual Studio project and its filters file.
//!
//! # Modules
//!
//! - [`extract`]: Method signature extraction from header text
//! - [`overload`]: Constructor/destructor labels and overload numbering
//! - [`compose`]: Fixture and unit-test file rendering
//! - [`tags`]: Include paths and `.vcxproj` entry tags per generated file
//! - [`splice`]: In-place insertion into `.vcxproj` / `.vcxproj.filters`
//! - [`scan`]: Directory walk, header lookup, existing-test detection
//! - [`config`]: `.gtestgen.toml` loading
//! - [`types`]: Records, files, and labels shared across modules
//! - [`error`]: Error type

pub mod compose;
pub mod config;
pub mod error;
pub mod extract;
pub mod overload;
pub mod scan;
pub mod splice;
pub mod tags;
pub mod types;

use tracing::info;

pub use config::{load_config, load_config_file, Config};
pub use error::{Error, Result};
pub use splice::{splice_project, SpliceOutcome, SplicedDocuments};
pub use tags::tag_files;
pub use types::{FileRole, FileSet, GeneratedFile, MethodRecord, TaggedFile};

/// Run the whole generation phase for one class.
///
/// The header is cut at its first `private:` marker, documented methods are
/// extracted from what remains, and the three scaffold files are rendered.
pub fn generate(class_name: &str, header_text: &str, app_group: &str) -> FileSet {
    let methods = extract::extract_methods(extract::public_section(header_text));
    info!(class = class_name, methods = methods.len(), "Generating test scaffold");
    compose::compose(class_name, app_group, methods)
}

/// Tag the generated files and splice them into the project and filters
/// documents in one step.
pub fn register_files(
    files: &FileSet,
    project: &str,
    filters: &str,
    test_root: &str,
    config: &Config,
) -> Result<SpliceOutcome> {
    let tagged = tag_files(test_root, &config.test_root_marker, &config.app_group, files)?;
    splice_project(project, filters, &tagged, &config.app_group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_deterministic() {
        let header = "/**\n * @return r\n */\nint Compute(int x);\n";
        assert_eq!(generate("Widget", header, "Core"), generate("Widget", header, "Core"));
    }

    #[test]
    fn test_generate_ignores_private_section() {
        let header = "public:\n/**\n * @return r\n */\nint A();\nprivate:\n/**\n * @return r\n */\nint B();\n";
        let set = generate("Widget", header, "Core");
        assert_eq!(set.methods.len(), 1);
        assert!(!set.unit_tests.file_text.contains("TEST_F ( WidgetTest, B )"));
    }
}
