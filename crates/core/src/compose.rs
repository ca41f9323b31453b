//! GoogleTest scaffold rendering: fixture header, fixture source, and one
//! `TEST_F` stub per extracted method.

use tracing::debug;

use crate::overload::display_names;
use crate::types::{FileRole, FileSet, GeneratedFile, MethodRecord};

/// Namespace every generated file wraps its contents in.
const TEST_NAMESPACE: &str = "Test";

/// Render the three scaffold files for `class_name`.
///
/// `app_group` only affects the unit-test file's include of the fixture
/// header, which lives in the sibling `../<app_group>/` folder.
pub fn compose(class_name: &str, app_group: &str, methods: Vec<MethodRecord>) -> FileSet {
    let fixture = fixture_name(class_name);
    debug!(class = class_name, methods = methods.len(), "Composing test scaffold");

    FileSet {
        fixture_header: GeneratedFile {
            file_name: FileRole::FixtureHeader.file_name(class_name),
            file_text: render_fixture_header(class_name, &fixture),
        },
        fixture_source: GeneratedFile {
            file_name: FileRole::FixtureSource.file_name(class_name),
            file_text: render_fixture_source(class_name, &fixture),
        },
        unit_tests: GeneratedFile {
            file_name: FileRole::UnitTests.file_name(class_name),
            file_text: render_unit_tests(class_name, app_group, &fixture, &methods),
        },
        methods,
    }
}

pub fn fixture_name(class_name: &str) -> String {
    format!("{class_name}Test")
}

/// `DataStore` -> `DATA_STORE_H`.
pub fn include_guard(class_name: &str) -> String {
    format!("{}_H", split_words(class_name).join("_").to_uppercase())
}

/// Split an identifier into words at case, digit and punctuation boundaries
/// (`HTTPServer2` -> `HTTP`, `Server`, `2`).
pub fn split_words(ident: &str) -> Vec<String> {
    let chars: Vec<char> = ident.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if i > 0 && !current.is_empty() {
            let prev = chars[i - 1];
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && chars.get(i + 1).is_some_and(|n| n.is_lowercase()))
                || (prev.is_alphabetic() && c.is_ascii_digit())
                || (prev.is_ascii_digit() && c.is_alphabetic());
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn render_fixture_header(class_name: &str, fixture: &str) -> String {
    let guard = include_guard(class_name);
    format!(
        "#ifndef {guard}
#define {guard}

#include \"gtest/gtest.h\"

namespace {TEST_NAMESPACE}
{{
  class {fixture} : public testing::Test
  {{
  public:
    {fixture}();

    virtual ~{fixture}();

  protected:
    virtual void SetUp() override;
    virtual void TearDown() override;
  }};
}}

#endif //{guard}
"
    )
}

fn render_fixture_source(class_name: &str, fixture: &str) -> String {
    format!(
        "#include \"{class_name}Test.h\"

namespace {TEST_NAMESPACE}
{{
  {fixture}::{fixture}() {{

  }}

  {fixture}::~{fixture}() {{

  }}

  void {fixture}::SetUp() {{

  }}

  void {fixture}::TearDown() {{

  }}
}}
"
    )
}

fn render_unit_tests(
    class_name: &str,
    app_group: &str,
    fixture: &str,
    methods: &[MethodRecord],
) -> String {
    let mut lines: Vec<String> = vec![
        format!("#include \"../{app_group}/{fixture}.h\""),
        format!("#include \"{class_name}.h\""),
        "#include \"gtest/gtest.h\"".to_string(),
        String::new(),
        format!("namespace {TEST_NAMESPACE}"),
        "{".to_string(),
    ];

    let names = display_names(class_name, methods);
    for (method, name) in methods.iter().zip(&names) {
        let stub = [
            "/**".to_string(),
            "* description of test...".to_string(),
            "*/".to_string(),
            format!("// {}", method.signature_or_placeholder()),
            format!("TEST_F ( {fixture}, {name} )"),
            "{".to_string(),
            String::new(),
            "}".to_string(),
            String::new(),
        ];
        lines.extend(stub.into_iter().map(|l| if l.is_empty() { l } else { format!("\t{l}") }));
    }

    lines.push("}".to_string());
    let mut out = lines.join("\n");
    out.push('\n');
    out
}
