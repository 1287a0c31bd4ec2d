//! Slug inference — guess the name of the declaration a comment documents.
//!
//! Best-effort textual heuristic over the first non-blank line after the
//! comment. Rules are tagged and ordered by precedence; the first (most
//! specific) rule whose pattern matches supplies the slug.

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

static RE_PROTOTYPE_MEMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+\.prototype\.(\w+)").unwrap());

static RE_ASSIGNED_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z_$][\w$]*)\s*[:=]\s*function\b").unwrap());

static RE_FUNCTION_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bfunction\s+([A-Za-z_$][\w$]*)\s*\(").unwrap());

/// Recognition rules, highest precedence first.
static RULES: [(&str, &LazyLock<Regex>); 3] = [
    ("prototype-member", &RE_PROTOTYPE_MEMBER),
    ("assigned-function", &RE_ASSIGNED_FUNCTION),
    ("function-declaration", &RE_FUNCTION_DECL),
];

/// Infer a slug from the code following a comment that ends at byte
/// offset `end`. Returns `None` when no rule matches.
pub fn infer_slug(source: &str, end: usize) -> Option<String> {
    let line = declaration_line(source, end)?;
    for (name, rule) in &RULES {
        if let Some(caps) = rule.captures(line) {
            trace!("slug rule {name} matched: {}", &caps[1]);
            return Some(caps[1].trim().to_string());
        }
    }
    None
}

/// The logical line of code a comment documents: the remainder of the line
/// containing `end`, or, when that is blank, the next non-blank line.
fn declaration_line(source: &str, end: usize) -> Option<&str> {
    let rest = source.get(end..)?;
    rest.lines().map(str::trim).find(|line| !line.is_empty())
}
