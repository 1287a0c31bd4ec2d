//! Comment Scanner — extracts documentation comments from one source file.
//!
//! A documentation comment is a block comment whose text begins with an
//! extra `*` (i.e. `/** ... */`). Decoration is stripped per line, a slug is
//! inferred from the following declaration, and the result is ordered by
//! source position.

use anyhow::Result;
use regex::Regex;
use std::sync::LazyLock;

use crate::model::Comment;
use crate::{lexer, slug};

static RE_DECORATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\s*\* ?").unwrap());

/// Scan a file's source text into its documentation comments, ordered by
/// ascending start offset. A lexer failure aborts the whole file.
pub fn scan_source(source: &str) -> Result<Vec<Comment>> {
    let mut comments = Vec::new();
    lexer::scan_comments(source, |is_block, text, start, end| {
        if !is_block || !text.starts_with('*') {
            return;
        }
        comments.push(Comment {
            text: strip_decoration(text),
            start,
            slug: slug::infer_slug(source, end),
        });
    })?;
    order_comments(&mut comments);
    Ok(comments)
}

/// Remove the leading `*` marker from every line of a comment body,
/// including a single space following it.
pub fn strip_decoration(text: &str) -> String {
    RE_DECORATION.replace_all(text, "").into_owned()
}

/// Final ordering invariant: ascending start offset, stable for ties.
fn order_comments(comments: &mut [Comment]) {
    comments.sort_by_key(|c| c.start);
}
