//! JavaScript comment tokenizer.
//!
//! Stand-in for a full language parser: walks the source tracking strings,
//! template literals, and comments, and invokes a callback for every comment
//! with `(is_block, text, start, end)`. `text` excludes the delimiters;
//! `start`/`end` are byte offsets of the comment including them.
//!
//! Fails on unterminated block comments and string literals, which is the
//! per-file "syntax error" path — callers drop the file and keep going.
//!
//! Regex literals are not recognized: a quote inside one (`var re = /"/;`)
//! reads as a string opener and fails the file.

use anyhow::{bail, Result};

/// Scan `src` and report every comment to `on_comment`.
pub fn scan_comments<F>(src: &str, mut on_comment: F) -> Result<()>
where
    F: FnMut(bool, &str, usize, usize),
{
    let b = src.as_bytes();
    let len = b.len();
    let mut i = 0;

    while i < len {
        match b[i] {
            b'/' if i + 1 < len && b[i + 1] == b'/' => {
                let start = i;
                i += 2;
                while i < len && b[i] != b'\n' {
                    i += 1;
                }
                on_comment(false, &src[start + 2..i], start, i);
            }
            b'/' if i + 1 < len && b[i + 1] == b'*' => {
                let start = i;
                let mut j = i + 2;
                loop {
                    if j + 1 >= len {
                        bail!("unterminated block comment at offset {start}");
                    }
                    if b[j] == b'*' && b[j + 1] == b'/' {
                        break;
                    }
                    j += 1;
                }
                let end = j + 2;
                on_comment(true, &src[start + 2..j], start, end);
                i = end;
            }
            q @ (b'\'' | b'"' | b'`') => {
                i = skip_string(b, i, q)?;
            }
            _ => i += 1,
        }
    }
    Ok(())
}

/// Advance past a string literal opened at `start`, returning the offset
/// after the closing quote. Newlines terminate only quoted strings, not
/// template literals.
fn skip_string(b: &[u8], start: usize, quote: u8) -> Result<usize> {
    let mut i = start + 1;
    while i < b.len() {
        match b[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => break,
            c if c == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }
    bail!("unterminated string literal at offset {start}");
}
