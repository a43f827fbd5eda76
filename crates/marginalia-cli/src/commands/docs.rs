//! Docs command handler
//!
//! Lists the catalog: the documents notes and links can be attached to.

use anyhow::Result;

use marginalia_core::DocumentCatalog;

use crate::output::{Output, OutputFormat};

/// List catalog documents, grouped by chapter
pub fn list(catalog: &DocumentCatalog, output: &Output) -> Result<()> {
    match output.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(catalog.entries()).unwrap());
        }
        OutputFormat::Quiet => {
            for entry in catalog.entries() {
                println!("{}", entry.slug);
            }
        }
        OutputFormat::Human => {
            if catalog.is_empty() {
                println!("No catalog configured. Set catalog_path in the config.");
                return Ok(());
            }

            let mut current_chapter = None;
            for entry in catalog.entries() {
                if current_chapter != Some(&entry.chapter) {
                    println!("{}", entry.chapter);
                    current_chapter = Some(&entry.chapter);
                }
                println!("  {}  {}", entry.slug, entry.title);
            }
            println!("\n{} document(s)", catalog.len());
        }
    }

    Ok(())
}
