//! Text-level splicing of generated entries into a `.vcxproj` and its
//! `.vcxproj.filters` companion.
//!
//! The documents are never parsed into a tree. Each `<ItemGroup>` span is
//! located and labelled by the element name of its first child
//! (`ClCompile`, `ClInclude`, `Filter`), and new entries go in on the line
//! before the closing `</ItemGroup>` of the first group with the wanted
//! label. Every other byte of the document is left as it was, line endings
//! included.
//!
//! Both documents are planned before either is touched: a structural
//! problem in the filters file means the project file is not changed
//! either.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::tags::TAG_INDENT;
use crate::types::{DocumentKind, RegionKind, TaggedFile};

static GROUP_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<ItemGroup(?:\s[^>]*)?>").unwrap());

static FIRST_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z_][\w.:-]*)").unwrap());

const GROUP_CLOSE: &str = "</ItemGroup>";

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Replacement texts for both documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplicedDocuments {
    pub project: String,
    pub filters: String,
}

/// Result of a splice that did not hit a structural error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpliceOutcome {
    Applied(SplicedDocuments),
    /// The guard file name already occurs in `document`; nothing was changed.
    AlreadyPresent { document: DocumentKind, file_name: String },
}

// ---------------------------------------------------------------------------
// Region discovery
// ---------------------------------------------------------------------------

/// One `<ItemGroup ...>` … `</ItemGroup>` span, as byte offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub kind: RegionKind,
    /// Offset of `<ItemGroup`.
    pub start: usize,
    /// Offset just past the opening tag.
    pub body_start: usize,
    /// Offset of `</ItemGroup>`.
    pub close_start: usize,
}

/// Locate and label every item group in `text`, in document order.
/// Self-closing groups are ignored; an opener without a closer is an error.
pub fn find_regions(text: &str, document: DocumentKind) -> Result<Vec<Region>> {
    let mut regions = Vec::new();
    let mut pos = 0;

    while let Some(open) = GROUP_OPEN.find_at(text, pos) {
        if open.as_str().ends_with("/>") {
            pos = open.end();
            continue;
        }
        let close_start = text[open.end()..]
            .find(GROUP_CLOSE)
            .map(|i| open.end() + i)
            .filter(|&close| !GROUP_OPEN.is_match(&text[open.end()..close]))
            .ok_or(Error::UnclosedRegion { document, offset: open.start() })?;
        let body = &text[open.end()..close_start];

        let kind = match FIRST_ELEMENT.captures(body).and_then(|c| c.get(1)).map(|m| m.as_str()) {
            Some("ClCompile") => RegionKind::Sources,
            Some("ClInclude") => RegionKind::Headers,
            Some("Filter") => RegionKind::FilterDeclarations,
            _ => RegionKind::Other,
        };
        regions.push(Region { kind, start: open.start(), body_start: open.end(), close_start });
        pos = close_start + GROUP_CLOSE.len();
    }

    debug!(%document, regions = regions.len(), "Located item groups");
    Ok(regions)
}

// ---------------------------------------------------------------------------
// Splice entry point
// ---------------------------------------------------------------------------

/// Insert `tagged` entries into both documents.
///
/// Returns [`SpliceOutcome::AlreadyPresent`] without changes when the fixture
/// header's file name already occurs in either document. A missing
/// `<Filter Include="<app_group>">` declaration is added to the filters file.
pub fn splice_project(
    project: &str,
    filters: &str,
    tagged: &[TaggedFile],
    app_group: &str,
) -> Result<SpliceOutcome> {
    let Some(guard) = tagged.iter().find(|t| t.role.is_header()).or_else(|| tagged.first()) else {
        debug!("No tagged files, documents unchanged");
        return Ok(SpliceOutcome::Applied(SplicedDocuments {
            project: project.to_string(),
            filters: filters.to_string(),
        }));
    };

    for (document, text) in [(DocumentKind::Project, project), (DocumentKind::Filters, filters)] {
        if text.contains(&guard.file_name) {
            info!(%document, file = guard.file_name.as_str(), "Entries already present");
            return Ok(SpliceOutcome::AlreadyPresent {
                document,
                file_name: guard.file_name.clone(),
            });
        }
    }

    let project_edits = plan(project, DocumentKind::Project, tagged, None)?;
    let declaration =
        (!has_filter_declaration(filters, app_group)).then(|| filter_declaration(app_group));
    let filter_edits = plan(filters, DocumentKind::Filters, tagged, declaration.as_deref())?;

    info!(
        files = tagged.len(),
        new_filter = declaration.is_some(),
        "Spliced entries into project and filters"
    );
    Ok(SpliceOutcome::Applied(SplicedDocuments {
        project: apply(project, project_edits),
        filters: apply(filters, filter_edits),
    }))
}

/// `<Filter Include="<app_group>">` element with a fresh unique identifier.
pub fn filter_declaration(app_group: &str) -> String {
    format!(
        "<Filter Include=\"{app_group}\">\n{TAG_INDENT}<UniqueIdentifier>{{{}}}</UniqueIdentifier>\n</Filter>",
        Uuid::new_v4()
    )
}

fn has_filter_declaration(filters: &str, app_group: &str) -> bool {
    filters.contains(&format!("<Filter Include=\"{app_group}\""))
}

// ---------------------------------------------------------------------------
// Planning and applying insertions
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Insertion {
    offset: usize,
    text: String,
}

fn plan(
    text: &str,
    document: DocumentKind,
    tagged: &[TaggedFile],
    declaration: Option<&str>,
) -> Result<Vec<Insertion>> {
    let regions = find_regions(text, document)?;
    let target = |kind: RegionKind| {
        regions
            .iter()
            .find(|r| r.kind == kind)
            .ok_or(Error::MissingRegion { document, kind })
    };
    let fragment = |t: &TaggedFile| match document {
        DocumentKind::Project => t.include_tag.clone(),
        DocumentKind::Filters => t.filter_tag.clone(),
    };
    let eol = if text.contains("\r\n") { "\r\n" } else { "\n" };

    let sources: Vec<String> =
        tagged.iter().filter(|t| !t.role.is_header()).map(fragment).collect();
    let headers: Vec<String> = tagged.iter().filter(|t| t.role.is_header()).map(fragment).collect();

    let mut edits = Vec::new();
    if !sources.is_empty() {
        edits.push(insertion(text, target(RegionKind::Sources)?, &sources, eol));
    }
    if !headers.is_empty() {
        edits.push(insertion(text, target(RegionKind::Headers)?, &headers, eol));
    }
    if let Some(decl) = declaration {
        let decl = [decl.to_string()];
        edits.push(insertion(text, target(RegionKind::FilterDeclarations)?, &decl, eol));
    }
    Ok(edits)
}

fn insertion(text: &str, region: &Region, fragments: &[String], eol: &str) -> Insertion {
    let line_start = text[..region.close_start].rfind('\n').map_or(0, |i| i + 1);
    let lead = &text[line_start..region.close_start];
    let own_line = line_start >= region.body_start && lead.trim().is_empty();

    let closing_indent = if own_line { lead } else { leading_ws(&text[line_start..]) };
    let body_end = if own_line { line_start } else { region.close_start };
    let child_indent = last_line_indent(&text[region.body_start..body_end])
        .map(str::to_string)
        .unwrap_or_else(|| format!("{closing_indent}{}", indent_unit(closing_indent)));

    let mut out = String::new();
    let lines = fragments.iter().flat_map(|f| f.lines());
    if own_line {
        for line in lines {
            out.push_str(&child_indent);
            out.push_str(line);
            out.push_str(eol);
        }
        Insertion { offset: line_start, text: out }
    } else {
        for line in lines {
            out.push_str(eol);
            out.push_str(&child_indent);
            out.push_str(line);
        }
        out.push_str(eol);
        out.push_str(closing_indent);
        Insertion { offset: region.close_start, text: out }
    }
}

/// Apply insertions back to front so earlier offsets stay valid.
fn apply(text: &str, mut edits: Vec<Insertion>) -> String {
    edits.sort_by(|a, b| b.offset.cmp(&a.offset));
    let mut out = text.to_string();
    for edit in edits {
        out.insert_str(edit.offset, &edit.text);
    }
    out
}

fn leading_ws(line: &str) -> &str {
    let end = line.find(|c: char| c != ' ' && c != '\t').unwrap_or(line.len());
    &line[..end]
}

/// Indentation of the last non-blank line in `body` that starts a line of
/// its own (the part sharing the opener's line is ignored).
fn last_line_indent(body: &str) -> Option<&str> {
    let (_, rest) = body.split_once('\n')?;
    rest.lines().rev().find(|l| !l.trim().is_empty()).map(leading_ws)
}

fn indent_unit(indent: &str) -> &'static str {
    if indent.contains('\t') {
        "\t"
    } else {
        TAG_INDENT
    }
}
