//! Data model for extracted documentation — format-agnostic.

use std::path::PathBuf;

use crate::hooks::Hooks;

/// A single documentation comment extracted from a source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Comment body with per-line `*` decoration stripped.
    pub text: String,
    /// Byte offset of the comment's opening delimiter in its source file.
    /// Used only for ordering.
    pub start: usize,
    /// Identifier inferred from the declaration following the comment.
    /// Absent when no recognition rule matched — no heading is emitted.
    pub slug: Option<String>,
}

/// One documented source file: base name (extension stripped) plus its
/// comments in ascending source order. Only built for files that produced
/// at least one comment.
#[derive(Debug)]
pub struct Document {
    pub name: String,
    pub comments: Vec<Comment>,
}

/// Outcome of a pipeline run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// Files whose content reached the scanner.
    pub attempted: usize,
    /// Files whose artifacts were written successfully.
    pub written: usize,
}

/// Resolved run configuration, built once in `main` and owned by the pipeline.
#[derive(Debug)]
pub struct Config {
    pub output_dir: PathBuf,
    /// Stylesheet to copy to `<output>/style.css` and link from HTML pages.
    pub stylesheet: Option<PathBuf>,
    pub hooks: Hooks,
}
