//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use std::collections::BTreeMap;

use marginalia_core::{DocumentCatalog, ImportReport, Link, LinkGraph, Note};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a single note in full
    pub fn print_note(&self, note: &Note) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", note.id);
                println!("Created: {}", note.created_at.format("%Y-%m-%d %H:%M"));
                if note.updated_at != note.created_at {
                    println!("Updated: {}", note.updated_at.format("%Y-%m-%d %H:%M"));
                }
                if !note.tags.is_empty() {
                    println!("Tags:    {}", note.tags.join(", "));
                }
                println!();
                println!("{}", note.content);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(note).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", note.id);
            }
        }
    }

    /// Print a document's notes
    pub fn print_notes(&self, slug: &str, catalog: &DocumentCatalog, notes: &[Note]) {
        match self.format {
            OutputFormat::Human => {
                println!("Notes for: {} ({})", catalog.display_title(slug), slug);
                println!();

                if notes.is_empty() {
                    println!("No notes on this document.");
                    return;
                }

                for note in notes {
                    let tags = if note.tags.is_empty() {
                        String::new()
                    } else {
                        format!("  [{}]", note.tags.join(", "))
                    };
                    println!(
                        "{} | {}{}",
                        note.id,
                        truncate_line(&note.content, 60),
                        tags
                    );
                }
                println!("\n{} note(s)", notes.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(notes).unwrap());
            }
            OutputFormat::Quiet => {
                for note in notes {
                    println!("{}", note.id);
                }
            }
        }
    }

    /// Print a single link with catalog decoration
    pub fn print_link(&self, link: &Link, catalog: &DocumentCatalog) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:      {}", link.id);
                println!(
                    "From:    {} ({})",
                    catalog.display_title(&link.from_slug),
                    link.from_slug
                );
                println!(
                    "To:      {} ({})",
                    catalog.display_title(&link.to_slug),
                    link.to_slug
                );
                if let Some(ref desc) = link.description {
                    println!("Why:     {}", desc);
                }
                println!("Created: {}", link.created_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(link).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", link.id);
            }
        }
    }

    /// Print a list of links
    pub fn print_links(&self, links: &[Link], catalog: &DocumentCatalog) {
        match self.format {
            OutputFormat::Human => {
                if links.is_empty() {
                    println!("No links found.");
                    return;
                }
                for link in links {
                    let desc = link
                        .description
                        .as_deref()
                        .map(|d| format!(" | {}", truncate_line(d, 40)))
                        .unwrap_or_default();
                    println!(
                        "{} | {} -> {}{}",
                        link.id,
                        truncate(&catalog.display_title(&link.from_slug), 30),
                        truncate(&catalog.display_title(&link.to_slug), 30),
                        desc
                    );
                }
                println!("\n{} link(s)", links.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(links).unwrap());
            }
            OutputFormat::Quiet => {
                for link in links {
                    println!("{}", link.id);
                }
            }
        }
    }

    /// Print the link graph
    pub fn print_graph(&self, graph: &LinkGraph) {
        match self.format {
            OutputFormat::Human => {
                println!("{} node(s), {} edge(s)", graph.nodes.len(), graph.edges.len());
                for edge in &graph.edges {
                    println!("{} -> {}", edge.source, edge.target);
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(graph).unwrap());
            }
            OutputFormat::Quiet => {
                for node in &graph.nodes {
                    println!("{}", node);
                }
            }
        }
    }

    /// Print per-document note counts
    pub fn print_note_stats(&self, counts: &BTreeMap<String, usize>, catalog: &DocumentCatalog) {
        match self.format {
            OutputFormat::Human => {
                if counts.is_empty() {
                    println!("No notes stored.");
                    return;
                }
                for (slug, count) in counts {
                    println!(
                        "{} ({}) - {} note(s)",
                        catalog.display_title(slug),
                        slug,
                        count
                    );
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(counts).unwrap());
            }
            OutputFormat::Quiet => {
                for (slug, count) in counts {
                    println!("{} {}", slug, count);
                }
            }
        }
    }

    /// Print the outcome of a merge-import
    pub fn print_import_report(&self, report: &ImportReport) {
        match self.format {
            OutputFormat::Human => {
                println!(
                    "Imported {} record(s), skipped {} already present.",
                    report.imported, report.skipped
                );
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(report).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{} {}", report.imported, report.skipped);
            }
        }
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

/// Truncate to first line and max length
fn truncate_line(s: &str, max_len: usize) -> String {
    let first_line = s.lines().next().unwrap_or("");
    truncate(first_line, max_len)
}
