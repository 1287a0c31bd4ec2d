//! HTML output — markdown conversion and the page envelope.
//!
//! The converter handles the block structure the assembler emits (headings,
//! paragraphs, fenced code) plus inline code spans. Pure text-to-text.

use regex::Regex;
use std::sync::LazyLock;

static RE_CODE_SPAN: LazyLock<Regex> = LazyLock::new(|| Regex::new("`([^`]+)`").unwrap());

/// Convert a markdown body into an HTML fragment.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    let mut paragraph: Vec<String> = Vec::new();
    let mut in_code = false;

    for line in markdown.lines() {
        if line.trim_start().starts_with("```") {
            if in_code {
                out.push_str("</code></pre>\n");
            } else {
                flush_paragraph(&mut out, &mut paragraph);
                out.push_str("<pre><code>");
            }
            in_code = !in_code;
            continue;
        }
        if in_code {
            out.push_str(&html_escape(line));
            out.push('\n');
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush_paragraph(&mut out, &mut paragraph);
            continue;
        }
        if let Some((level, text)) = heading(trimmed) {
            flush_paragraph(&mut out, &mut paragraph);
            out.push_str(&format!("<h{level}>{}</h{level}>\n", inline(text)));
            continue;
        }
        paragraph.push(inline(trimmed));
    }
    if in_code {
        out.push_str("</code></pre>\n");
    }
    flush_paragraph(&mut out, &mut paragraph);
    out
}

/// Wrap a converted fragment in a standalone page.
pub fn render_page(title: &str, body: &str, stylesheet: bool) -> String {
    let mut out = String::new();
    out.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    out.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    if stylesheet {
        out.push_str("<link rel=\"stylesheet\" href=\"style.css\">\n");
    }
    out.push_str("</head>\n<body>\n");
    out.push_str(body);
    out.push_str("</body>\n</html>\n");
    out
}

fn heading(line: &str) -> Option<(usize, &str)> {
    let hashes = line.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    line[hashes..].strip_prefix(' ').map(|t| (hashes, t.trim()))
}

fn flush_paragraph(out: &mut String, paragraph: &mut Vec<String>) {
    if paragraph.is_empty() {
        return;
    }
    out.push_str("<p>");
    out.push_str(&paragraph.join("\n"));
    out.push_str("</p>\n");
    paragraph.clear();
}

fn inline(text: &str) -> String {
    RE_CODE_SPAN
        .replace_all(&html_escape(text), "<code>$1</code>")
        .into_owned()
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
