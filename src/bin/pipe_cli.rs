//! class-observer CLI with render and simulate modes
//!
//! 1. render   - Read a JSON element tree from stdin, output the stylesheet
//!               the engine synthesizes for it
//! 2. simulate - Read a JSON document with a tree plus change batches from
//!               stdin, run the batches through the engine in order, output
//!               the final stylesheet

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use class_observer::{ChangeRecord, Element, Observer, StyleTable};
use serde::Deserialize;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "class-observer-cli")]
#[command(about = "Atomic CSS synthesis from observed class usage", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a stylesheet for a JSON element tree
    Render {
        /// Path to a JSON style table (props/media/pseudo mappings)
        #[arg(long, value_name = "PATH")]
        styles: Option<PathBuf>,

        /// Suppress the generated-file header comment
        #[arg(long)]
        no_header: bool,
    },

    /// Replay change batches against a tree and print the final stylesheet
    Simulate {
        /// Path to a JSON style table (props/media/pseudo mappings)
        #[arg(long, value_name = "PATH")]
        styles: Option<PathBuf>,

        /// Suppress the generated-file header comment
        #[arg(long)]
        no_header: bool,
    },
}

/// Input document for simulate mode
#[derive(Debug, Deserialize)]
struct SimulationDoc {
    tree: Element,
    #[serde(default)]
    batches: Vec<Vec<RecordDoc>>,
}

/// JSON form of one change record
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
enum RecordDoc {
    Attribute {
        current: String,
        #[serde(default)]
        previous: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ChildList {
        #[serde(default)]
        added: Vec<Element>,
        #[serde(default)]
        removed: Vec<Element>,
    },
}

impl From<RecordDoc> for ChangeRecord<Element> {
    fn from(doc: RecordDoc) -> Self {
        match doc {
            RecordDoc::Attribute { current, previous } => ChangeRecord::Attribute {
                current,
                previous,
            },
            RecordDoc::ChildList { added, removed } => ChangeRecord::ChildList { added, removed },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render { styles, no_header } => handle_render(styles, no_header),
        Commands::Simulate { styles, no_header } => handle_simulate(styles, no_header),
    }
}

fn load_styles(path: Option<PathBuf>) -> Result<StyleTable> {
    match path {
        Some(path) => StyleTable::from_json_file(&path)
            .with_context(|| format!("Failed to load style table {:?}", path)),
        None => Ok(StyleTable::default()),
    }
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read from stdin")?;
    Ok(input)
}

fn write_stylesheet(css: &str, no_header: bool) -> Result<()> {
    let mut stdout = io::stdout();

    if !no_header {
        let header = format!(
            "/* Generated by class-observer-cli v{} at {} */\n",
            env!("CARGO_PKG_VERSION"),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
        stdout
            .write_all(header.as_bytes())
            .context("Failed to write stylesheet header to stdout")?;
    }

    stdout
        .write_all(css.as_bytes())
        .context("Failed to write stylesheet to stdout")?;
    if !css.is_empty() {
        stdout.write_all(b"\n").context("Failed to flush stylesheet")?;
    }
    Ok(())
}

/// Render mode: tree in, stylesheet out
fn handle_render(styles: Option<PathBuf>, no_header: bool) -> Result<()> {
    let input = read_stdin()?;
    if input.trim().is_empty() {
        return write_stylesheet("", no_header);
    }

    let tree: Element = serde_json::from_str(&input).context("Failed to parse element tree")?;
    let styles = load_styles(styles)?;

    let mut observer = Observer::new(tree, styles.into_config());
    observer.start().context("Failed to start observer")?;

    write_stylesheet(&observer.to_css(), no_header)
}

/// Simulate mode: tree plus batches in, final stylesheet out
fn handle_simulate(styles: Option<PathBuf>, no_header: bool) -> Result<()> {
    let input = read_stdin()?;
    if input.trim().is_empty() {
        return write_stylesheet("", no_header);
    }

    let doc: SimulationDoc =
        serde_json::from_str(&input).context("Failed to parse simulation document")?;
    let styles = load_styles(styles)?;

    let mut observer = Observer::new(doc.tree, styles.into_config());
    observer.start().context("Failed to start observer")?;

    for (index, batch) in doc.batches.into_iter().enumerate() {
        let records: Vec<ChangeRecord<Element>> =
            batch.into_iter().map(ChangeRecord::from).collect();
        observer
            .process_batch(&records)
            .with_context(|| format!("Failed to apply batch {}", index))?;
    }

    write_stylesheet(&observer.to_css(), no_header)
}
