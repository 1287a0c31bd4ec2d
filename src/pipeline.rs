//! Pipeline Coordinator — drives directory expansion, concurrent reads,
//! scanning, and writes through an event channel.
//!
//! All queues and counters live on the coordinator; reads, listings, and
//! writes run as spawned tasks that report back over an mpsc channel, so
//! every state mutation happens on the coordinator's single logical thread.
//! The run is finished exactly when a turn observes every queue and counter
//! empty at once — the check repeats on every event, so completions racing
//! newly-enqueued expansion results cannot end the run early.

use std::collections::VecDeque;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use crate::assemble::{self, Artifacts};
use crate::model::{Config, Document, RunStats};
use crate::scanner;

/// Extension recognized when expanding directories. Files named explicitly
/// on the command line are read regardless of extension.
const SOURCE_EXTENSION: &str = "js";

enum Event {
    ReadDone(PathBuf, Vec<u8>),
    IsDirectory(PathBuf),
    ReadFailed(PathBuf, std::io::Error),
    DirListed(Vec<PathBuf>),
    DirFailed(PathBuf, std::io::Error),
    WriteDone(PathBuf, bool),
    /// Self-wakeup when buffers remain after a turn.
    Tick,
}

pub struct Pipeline {
    config: Config,
    pending_paths: VecDeque<PathBuf>,
    reads_in_flight: usize,
    listings_in_flight: usize,
    pending_buffers: VecDeque<(PathBuf, Vec<u8>)>,
    writes_in_flight: usize,
    stats: RunStats,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
}

impl Pipeline {
    pub fn new(config: Config) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            config,
            pending_paths: VecDeque::new(),
            reads_in_flight: 0,
            listings_in_flight: 0,
            pending_buffers: VecDeque::new(),
            writes_in_flight: 0,
            stats: RunStats::default(),
            tx,
            rx,
        }
    }

    /// Drive the pipeline over the given input paths until every queue and
    /// counter drains, then finalize and report the run statistics.
    pub async fn run(mut self, inputs: Vec<PathBuf>) -> Result<RunStats> {
        self.pending_paths.extend(inputs);
        self.dispatch_reads();

        while !self.idle() {
            let event = match self.rx.recv().await {
                Some(event) => event,
                None => break,
            };
            self.handle_event(event)?;
            if let Some((path, bytes)) = self.pending_buffers.pop_front() {
                self.process_buffer(path, bytes).await;
            }
            if !self.pending_buffers.is_empty() {
                let _ = self.tx.send(Event::Tick);
            }
            self.dispatch_reads();
        }

        self.finalize().await;
        Ok(self.stats)
    }

    /// True when no work is queued or in flight anywhere in the pipeline.
    fn idle(&self) -> bool {
        self.pending_paths.is_empty()
            && self.reads_in_flight == 0
            && self.listings_in_flight == 0
            && self.pending_buffers.is_empty()
            && self.writes_in_flight == 0
    }

    /// Start an asynchronous read for every queued path. A path that turns
    /// out to be a directory is reported back for expansion instead.
    fn dispatch_reads(&mut self) {
        while let Some(path) = self.pending_paths.pop_front() {
            self.reads_in_flight += 1;
            let tx = self.tx.clone();
            tokio::spawn(async move {
                let event = match tokio::fs::read(&path).await {
                    Ok(bytes) => Event::ReadDone(path, bytes),
                    Err(e) if e.kind() == ErrorKind::IsADirectory => Event::IsDirectory(path),
                    Err(e) => Event::ReadFailed(path, e),
                };
                let _ = tx.send(event);
            });
        }
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::ReadDone(path, bytes) => {
                self.reads_in_flight -= 1;
                self.pending_buffers.push_back((path, bytes));
            }
            Event::IsDirectory(path) => {
                self.reads_in_flight -= 1;
                self.expand_directory(path);
            }
            Event::ReadFailed(path, e) => {
                self.reads_in_flight -= 1;
                return Err(e).with_context(|| format!("failed to read {}", path.display()));
            }
            Event::DirListed(entries) => {
                self.listings_in_flight -= 1;
                self.pending_paths.extend(entries);
            }
            Event::DirFailed(path, e) => {
                self.listings_in_flight -= 1;
                return Err(e)
                    .with_context(|| format!("failed to list directory {}", path.display()));
            }
            Event::WriteDone(path, ok) => {
                self.writes_in_flight -= 1;
                if ok {
                    self.stats.written += 1;
                    info!("wrote docs for {}", path.display());
                }
            }
            Event::Tick => {}
        }
        Ok(())
    }

    /// List a directory in the background, keeping only recognized source
    /// files. Entries come back as pending paths, one expansion level per
    /// turn.
    fn expand_directory(&mut self, path: PathBuf) {
        self.listings_in_flight += 1;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let event = match list_source_files(&path).await {
                Ok(entries) => Event::DirListed(entries),
                Err(e) => Event::DirFailed(path, e),
            };
            let _ = tx.send(event);
        });
    }

    /// Scan one buffer and, when it yields comments, assemble its artifacts
    /// and start the write. Per-file failures are logged and skipped; the
    /// run continues.
    async fn process_buffer(&mut self, path: PathBuf, bytes: Vec<u8>) {
        self.stats.attempted += 1;
        let source = String::from_utf8_lossy(&bytes);
        let comments = match scanner::scan_source(&source) {
            Ok(comments) => comments,
            Err(e) => {
                error!("failed to parse {}: {:#}", path.display(), e);
                return;
            }
        };
        if comments.is_empty() {
            return;
        }
        let doc = Document {
            name: base_name(&path),
            comments,
        };
        let assembled = assemble::assemble(&doc, &self.config).await;
        match assembled {
            Ok(artifacts) => self.spawn_write(path, doc.name, artifacts),
            Err(e) => error!("failed to assemble {}: {:#}", path.display(), e),
        }
    }

    fn spawn_write(&mut self, source: PathBuf, name: String, artifacts: Artifacts) {
        self.writes_in_flight += 1;
        let out_dir = self.config.output_dir.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let ok = match write_artifacts(&out_dir, &name, &artifacts).await {
                Ok(()) => true,
                Err(e) => {
                    error!("failed to write docs for {}: {:#}", source.display(), e);
                    false
                }
            };
            let _ = tx.send(Event::WriteDone(source, ok));
        });
    }

    /// Copy the configured stylesheet into the output directory once the
    /// pipeline has drained.
    async fn finalize(&self) {
        let Some(ref css) = self.config.stylesheet else {
            return;
        };
        let dest = self.config.output_dir.join("style.css");
        let copy = async {
            tokio::fs::create_dir_all(&self.config.output_dir).await?;
            tokio::fs::copy(css, &dest).await
        };
        if let Err(e) = copy.await {
            error!("failed to copy stylesheet {}: {}", css.display(), e);
        }
    }
}

async fn list_source_files(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(SOURCE_EXTENSION) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

async fn write_artifacts(out_dir: &Path, name: &str, artifacts: &Artifacts) -> Result<()> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("failed to create output directory {}", out_dir.display()))?;
    let md_path = out_dir.join(format!("{name}.md"));
    tokio::fs::write(&md_path, &artifacts.markdown)
        .await
        .with_context(|| format!("failed to write {}", md_path.display()))?;
    let html_path = out_dir.join(format!("{name}.html"));
    tokio::fs::write(&html_path, &artifacts.html)
        .await
        .with_context(|| format!("failed to write {}", html_path.display()))?;
    Ok(())
}

/// Output base name: file name with its extension removed.
fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
