//! Pre/post-processing hooks.
//!
//! Each hook is an external filter executable resolved from a configured
//! path at startup: the text goes to its stdin, the transformed text comes
//! back on stdout. Unconfigured hooks are the identity transform.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// A resolved filter executable.
#[derive(Debug, Clone)]
pub struct FilterCommand {
    path: PathBuf,
}

impl FilterCommand {
    /// Resolve a hook path. Fails fast when the path is not a file so a
    /// misconfigured run aborts before any work starts.
    pub fn resolve(path: &Path) -> Result<Self> {
        if !path.is_file() {
            bail!("hook is not a file: {}", path.display());
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Run the filter over `text`, returning its stdout.
    pub async fn apply(&self, text: &str) -> Result<String> {
        let mut child = Command::new(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to run hook {}", self.path.display()))?;

        let mut stdin = child.stdin.take().context("hook stdin unavailable")?;
        let input = text.as_bytes().to_vec();
        // Feed stdin from a task so a large document cannot deadlock against
        // the child filling its stdout pipe.
        let writer = tokio::spawn(async move {
            stdin.write_all(&input).await?;
            stdin.shutdown().await
        });

        let output = child
            .wait_with_output()
            .await
            .with_context(|| format!("hook {} failed", self.path.display()))?;
        writer.await.context("hook stdin writer panicked")??;

        if !output.status.success() {
            bail!("hook {} exited with {}", self.path.display(), output.status);
        }
        String::from_utf8(output.stdout)
            .with_context(|| format!("hook {} produced non-UTF-8 output", self.path.display()))
    }
}

/// The configured hook pair. `before` transforms the composed markdown body;
/// `after` transforms the converted HTML fragment.
#[derive(Debug, Default)]
pub struct Hooks {
    pub before: Option<FilterCommand>,
    pub after: Option<FilterCommand>,
}

impl Hooks {
    pub async fn apply_before(&self, text: String) -> Result<String> {
        match &self.before {
            Some(filter) => filter.apply(&text).await,
            None => Ok(text),
        }
    }

    pub async fn apply_after(&self, text: String) -> Result<String> {
        match &self.after {
            Some(filter) => filter.apply(&text).await,
            None => Ok(text),
        }
    }
}
