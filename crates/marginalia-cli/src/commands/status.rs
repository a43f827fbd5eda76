//! Status command handler

use std::sync::Arc;

use anyhow::Result;

use marginalia_core::{Config, DocumentCatalog, LinkStore, NoteStore, StoragePort};

use crate::output::{Output, OutputFormat};

/// Show storage status
pub fn show(
    config: &Config,
    storage: Arc<dyn StoragePort>,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    let note_counts = NoteStore::note_counts(storage.as_ref())?;
    let total_notes: usize = note_counts.values().sum();
    let link_count = LinkStore::open(storage).len();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "catalog_path": config.catalog_path,
                    "catalog_documents": catalog.len(),
                    "counts": {
                        "documents_with_notes": note_counts.len(),
                        "notes": total_notes,
                        "links": link_count
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("Marginalia Status");
            println!("=================");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            println!();
            println!("Catalog:");
            match &config.catalog_path {
                Some(path) => {
                    println!("  Path:      {}", path.display());
                    println!("  Documents: {}", catalog.len());
                }
                None => println!("  (not configured)"),
            }
            println!();
            println!("Contents:");
            println!("  Documents with notes: {}", note_counts.len());
            println!("  Notes: {}", total_notes);
            println!("  Links: {}", link_count);
        }
    }

    Ok(())
}
