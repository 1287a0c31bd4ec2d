//! Document Assembler — composes the markdown body for one file and builds
//! the artifact pair (markdown verbatim, converted HTML in a page envelope).

use anyhow::Result;

use crate::html;
use crate::model::{Config, Document};

/// Both artifacts for one document, ready to write.
#[derive(Debug)]
pub struct Artifacts {
    pub markdown: String,
    pub html: String,
}

/// Compose the structured-text body: a top-level heading with the file's
/// base name, then each comment (slug sub-heading when present) separated
/// by blank lines.
pub fn compose_body(doc: &Document) -> String {
    let mut parts: Vec<String> = Vec::new();
    for comment in &doc.comments {
        let mut part = String::new();
        if let Some(ref slug) = comment.slug {
            part.push_str(&format!("## {}\n", slug));
        }
        part.push_str(&comment.text);
        parts.push(part);
    }
    format!("# {}\n{}", doc.name, parts.join("\n\n"))
}

/// Build both artifacts, running the configured hooks: `before` on the
/// markdown body, `after` on the converted HTML fragment.
pub async fn assemble(doc: &Document, config: &Config) -> Result<Artifacts> {
    let body = config.hooks.apply_before(compose_body(doc)).await?;
    let fragment = config
        .hooks
        .apply_after(html::markdown_to_html(&body))
        .await?;
    let page = html::render_page(&doc.name, &fragment, config.stylesheet.is_some());
    Ok(Artifacts {
        markdown: body,
        html: page,
    })
}
