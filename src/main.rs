//! minidoc — generate documentation from `/** ... */` comments in
//! JavaScript source files.
//!
//! Walks the given files and directories, extracts documentation-style
//! block comments, infers a heading for each from the declaration that
//! follows, and writes one markdown and one HTML page per documented file.

mod assemble;
mod hooks;
mod html;
mod lexer;
mod model;
mod pipeline;
mod scanner;
mod slug;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hooks::{FilterCommand, Hooks};
use model::Config;
use pipeline::Pipeline;

#[derive(Parser)]
#[command(
    name = "minidoc",
    about = "Generate documentation from /** ... */ comments in JavaScript files"
)]
struct Cli {
    /// Input files or directories (directories are scanned for .js files)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output directory
    #[arg(short = 'o', long, default_value = "doc")]
    output: PathBuf,

    /// Pre-processing filter executable, applied to each markdown body
    /// (stdin → stdout)
    #[arg(long)]
    before: Option<PathBuf>,

    /// Post-processing filter executable, applied to each converted HTML
    /// fragment (stdin → stdout)
    #[arg(long)]
    after: Option<PathBuf>,

    /// Stylesheet copied to <output>/style.css and linked from every page
    #[arg(long)]
    css: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let hooks = Hooks {
        before: cli.before.as_deref().map(FilterCommand::resolve).transpose()?,
        after: cli.after.as_deref().map(FilterCommand::resolve).transpose()?,
    };
    let config = Config {
        output_dir: cli.output,
        stylesheet: cli.css,
        hooks,
    };

    let stats = Pipeline::new(config).run(cli.paths).await?;
    println!("{} of {} files documented", stats.written, stats.attempted);
    Ok(())
}
