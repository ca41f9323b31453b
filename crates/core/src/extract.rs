//! Method extraction: documented public declarations from a C++ header.
//!
//! A declaration is recognized only when its doc block carries an `@return`
//! line. The match runs from that marker to the first `)` after it, which is
//! normally the end of the parameter list. Everything after `private:` is cut
//! off before matching.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::types::MethodRecord;

/// Access-boundary marker; nothing after its first occurrence is scanned.
pub const PRIVATE_MARKER: &str = "private:";

static RETURN_DOC_TO_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*[ \t]*@return\b.*?\)").unwrap());

/// Name = word run right before `(`, with an optional leading `~`.
static DECL_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(~?\w+)\s*\(").unwrap());

/// Fallback when the match never left the doc block: first line after the
/// `@return` line, minus its leading comment decoration.
static LENIENT_SIGNATURE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\W*(\w.*)").unwrap());

/// Everything before the first `private:` marker (the whole text if absent).
pub fn public_section(header: &str) -> &str {
    match header.find(PRIVATE_MARKER) {
        Some(end) => &header[..end],
        None => header,
    }
}

/// Extract one [`MethodRecord`] per `@return`-documented declaration, in
/// header order. Never fails; unmatched fields come back as `None`.
pub fn extract_methods(header: &str) -> Vec<MethodRecord> {
    let methods: Vec<MethodRecord> =
        RETURN_DOC_TO_DECL.find_iter(header).map(|m| parse_block(m.as_str())).collect();
    debug!(methods = methods.len(), "Extracted documented declarations");
    methods
}

fn parse_block(block: &str) -> MethodRecord {
    let (signature, decl) = match block.find("*/") {
        Some(close) => {
            let decl = &block[close + 2..];
            (first_text_line(decl), decl)
        }
        None => (lenient_signature(block), block),
    };
    let name = DECL_NAME.captures(decl).map(|c| c[1].to_string());

    if name.is_none() || signature.is_none() {
        debug!(
            name = name.is_some(),
            signature = signature.is_some(),
            "Partial match in documented block"
        );
    }

    MethodRecord { name, signature }
}

fn first_text_line(text: &str) -> Option<String> {
    text.lines().map(str::trim).find(|l| !l.is_empty()).map(str::to_string)
}

fn lenient_signature(block: &str) -> Option<String> {
    LENIENT_SIGNATURE
        .captures(block)
        .map(|c| c[1].trim().to_string())
        .filter(|s| !s.is_empty())
}
