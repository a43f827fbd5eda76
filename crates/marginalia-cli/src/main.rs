//! Marginalia CLI
//!
//! Command-line interface for Marginalia - reader annotations and
//! cross-document links for a static documentation set.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use marginalia_core::{Config, DocumentCatalog, FileStorage, StoragePort};

mod commands;
mod output;
mod prompt;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "marginalia")]
#[command(about = "Marginalia - notes and cross-links for your documentation")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a specific config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage notes on a document
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },
    /// Manage cross-document links
    Link {
        #[command(subcommand)]
        command: LinkCommands,
    },
    /// List catalog documents
    Docs,
    /// Show storage status
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum NoteCommands {
    /// Add a note to a document
    #[command(alias = "create")]
    Add {
        /// Document slug
        slug: String,
        /// Note content
        content: String,
        /// Tags to attach
        #[arg(short, long)]
        tag: Vec<String>,
    },
    /// List notes on a document
    #[command(alias = "ls")]
    List {
        /// Document slug
        slug: String,
    },
    /// Replace a note's content and tags
    Edit {
        /// Document slug
        slug: String,
        /// Note ID
        id: String,
        /// New content
        content: String,
        /// Tags to attach (replaces existing tags)
        #[arg(short, long)]
        tag: Vec<String>,
    },
    /// Delete a note
    #[command(alias = "rm")]
    Delete {
        /// Document slug
        slug: String,
        /// Note ID
        id: String,
    },
    /// Delete every note on a document
    Clear {
        /// Document slug
        slug: String,
    },
    /// Export a document's notes to a JSON file
    Export {
        /// Document slug
        slug: String,
        /// Output path (defaults to notes-<slug>-<date>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Merge notes from an exported JSON file
    Import {
        /// Document slug
        slug: String,
        /// Exported JSON file
        file: PathBuf,
    },
    /// Show note counts for every document
    Stats,
}

#[derive(Subcommand)]
enum LinkCommands {
    /// Link one document to another
    #[command(alias = "create")]
    Add {
        /// Source document slug
        from: String,
        /// Target document slug
        to: String,
        /// Why the documents are related
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List all links
    #[command(alias = "ls")]
    List,
    /// Replace a link's description
    Update {
        /// Link ID
        id: String,
        /// New description (empty clears it)
        description: String,
    },
    /// Delete a link
    #[command(alias = "rm")]
    Delete {
        /// Link ID
        id: String,
    },
    /// Links going out of a document
    Outgoing {
        /// Document slug
        slug: String,
    },
    /// Links coming into a document
    Incoming {
        /// Document slug
        slug: String,
    },
    /// Documents linked in both directions
    Mutual {
        /// Document slug
        slug: String,
    },
    /// Check whether two documents are connected in either direction
    Connected {
        /// First document slug
        a: String,
        /// Second document slug
        b: String,
    },
    /// Print the full link graph
    Graph,
    /// Export all links to a JSON file
    Export {
        /// Output path (defaults to doc-links-<date>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Merge links from an exported JSON file
    Import {
        /// Exported JSON file
        file: PathBuf,
    },
    /// Delete every link
    Clear,
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, catalog_path)
        key: String,
        /// Configuration value
        value: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    // Config commands work without opening storage
    if let Commands::Config { command } = &cli.command {
        return commands::config::handle(command.clone(), cli.config.as_ref(), &output);
    }

    let config = match &cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    let storage: Arc<dyn StoragePort> = Arc::new(
        FileStorage::open(config.data_dir.clone()).context("Failed to open data directory")?,
    );
    let catalog = load_catalog(&config);

    match cli.command {
        Commands::Note { command } => handle_note_command(command, storage, &catalog, &output),
        Commands::Link { command } => handle_link_command(command, storage, &catalog, &output),
        Commands::Docs => commands::docs::list(&catalog, &output),
        Commands::Status => commands::status::show(&config, storage, &catalog, &output),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

/// Load the document catalog when configured. The catalog only decorates
/// output, so a missing or broken catalog degrades to slugs-only display
/// instead of failing the command.
fn load_catalog(config: &Config) -> DocumentCatalog {
    let Some(path) = &config.catalog_path else {
        return DocumentCatalog::default();
    };
    match DocumentCatalog::load_from_path(path) {
        Ok(catalog) => catalog,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "could not load catalog");
            DocumentCatalog::default()
        }
    }
}

fn handle_note_command(
    command: NoteCommands,
    storage: Arc<dyn StoragePort>,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    match command {
        NoteCommands::Add { slug, content, tag } => {
            commands::note::add(storage, slug, content, tag, output)
        }
        NoteCommands::List { slug } => commands::note::list(storage, slug, catalog, output),
        NoteCommands::Edit {
            slug,
            id,
            content,
            tag,
        } => commands::note::edit(storage, slug, id, content, tag, output),
        NoteCommands::Delete { slug, id } => commands::note::delete(storage, slug, id, output),
        NoteCommands::Clear { slug } => commands::note::clear(storage, slug, output),
        NoteCommands::Export { slug, out } => commands::note::export(storage, slug, out, output),
        NoteCommands::Import { slug, file } => commands::note::import(storage, slug, file, output),
        NoteCommands::Stats => commands::note::stats(storage, catalog, output),
    }
}

fn handle_link_command(
    command: LinkCommands,
    storage: Arc<dyn StoragePort>,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    match command {
        LinkCommands::Add {
            from,
            to,
            description,
        } => commands::link::add(storage, from, to, description, catalog, output),
        LinkCommands::List => commands::link::list(storage, catalog, output),
        LinkCommands::Update { id, description } => {
            commands::link::update(storage, id, description, output)
        }
        LinkCommands::Delete { id } => commands::link::delete(storage, id, catalog, output),
        LinkCommands::Outgoing { slug } => {
            commands::link::outgoing(storage, slug, catalog, output)
        }
        LinkCommands::Incoming { slug } => {
            commands::link::incoming(storage, slug, catalog, output)
        }
        LinkCommands::Mutual { slug } => commands::link::mutual(storage, slug, catalog, output),
        LinkCommands::Connected { a, b } => commands::link::connected(storage, a, b, output),
        LinkCommands::Graph => commands::link::graph(storage, output),
        LinkCommands::Export { out } => commands::link::export(storage, out, output),
        LinkCommands::Import { file } => commands::link::import(storage, file, output),
        LinkCommands::Clear => commands::link::clear(storage, output),
    }
}
