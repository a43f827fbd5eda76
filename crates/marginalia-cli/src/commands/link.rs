//! Link command handlers

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use marginalia_core::{DocumentCatalog, LinkStore, StoragePort};

use super::store_err;
use crate::output::Output;
use crate::prompt::confirm;

/// Link one document to another
pub fn add(
    storage: Arc<dyn StoragePort>,
    from: String,
    to: String,
    description: Option<String>,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    let mut store = LinkStore::open(storage);
    let link = store.add_link(&from, &to, description).map_err(store_err)?;

    output.success(&format!("Created link {}", link.id));
    output.print_link(&link, catalog);
    Ok(())
}

/// List all links
pub fn list(
    storage: Arc<dyn StoragePort>,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    let store = LinkStore::open(storage);
    output.print_links(store.links(), catalog);
    Ok(())
}

/// Replace a link's description
pub fn update(
    storage: Arc<dyn StoragePort>,
    id: String,
    description: String,
    output: &Output,
) -> Result<()> {
    let mut store = LinkStore::open(storage);

    let description = if description.is_empty() {
        None
    } else {
        Some(description)
    };
    let changed = store.update_link(&id, description).map_err(store_err)?;

    if changed {
        output.success(&format!("Updated link {}", id));
    } else {
        output.message(&format!("No link {}; nothing changed.", id));
    }
    Ok(())
}

/// Delete a link
pub fn delete(
    storage: Arc<dyn StoragePort>,
    id: String,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    let mut store = LinkStore::open(storage);

    if output.should_prompt() {
        if let Some(link) = store.get_link(&id) {
            println!(
                "Delete link: {} -> {}",
                catalog.display_title(&link.from_slug),
                catalog.display_title(&link.to_slug)
            );
            if !confirm("Are you sure?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    let removed = store.delete_link(&id).map_err(store_err)?;
    if removed {
        output.success(&format!("Deleted link {}", id));
    } else {
        output.message(&format!("No link {}; nothing changed.", id));
    }
    Ok(())
}

/// Links going out of a document
pub fn outgoing(
    storage: Arc<dyn StoragePort>,
    slug: String,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    let store = LinkStore::open(storage);
    output.print_links(&store.outgoing_links(&slug), catalog);
    Ok(())
}

/// Links coming into a document
pub fn incoming(
    storage: Arc<dyn StoragePort>,
    slug: String,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    let store = LinkStore::open(storage);
    output.print_links(&store.incoming_links(&slug), catalog);
    Ok(())
}

/// Documents linked in both directions
pub fn mutual(
    storage: Arc<dyn StoragePort>,
    slug: String,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    let store = LinkStore::open(storage);
    output.print_links(&store.bidirectional_links(&slug), catalog);
    Ok(())
}

/// Check whether two documents are connected in either direction
pub fn connected(
    storage: Arc<dyn StoragePort>,
    a: String,
    b: String,
    output: &Output,
) -> Result<()> {
    let store = LinkStore::open(storage);
    let connected = store.are_connected(&a, &b);

    match output.format {
        crate::output::OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({"a": a, "b": b, "connected": connected})
            );
        }
        _ => {
            if connected {
                println!("{} and {} are connected", a, b);
            } else {
                println!("{} and {} are not connected", a, b);
            }
        }
    }
    Ok(())
}

/// Print the full link graph
pub fn graph(storage: Arc<dyn StoragePort>, output: &Output) -> Result<()> {
    let store = LinkStore::open(storage);
    output.print_graph(&store.graph());
    Ok(())
}

/// Export all links to a JSON file
pub fn export(
    storage: Arc<dyn StoragePort>,
    out: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = LinkStore::open(storage);
    let snapshot = store.export().map_err(store_err)?;

    let path = out.unwrap_or_else(|| {
        PathBuf::from(format!("doc-links-{}.json", Utc::now().format("%Y-%m-%d")))
    });
    std::fs::write(&path, snapshot)
        .with_context(|| format!("Failed to write export file: {:?}", path))?;

    output.success(&format!(
        "Exported {} link(s) to {}",
        store.len(),
        path.display()
    ));
    Ok(())
}

/// Merge links from an exported JSON file
pub fn import(storage: Arc<dyn StoragePort>, file: PathBuf, output: &Output) -> Result<()> {
    let payload = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read import file: {:?}", file))?;

    let mut store = LinkStore::open(storage);
    let report = store.import_merge(&payload).map_err(store_err)?;

    output.print_import_report(&report);
    Ok(())
}

/// Delete every link
pub fn clear(storage: Arc<dyn StoragePort>, output: &Output) -> Result<()> {
    let mut store = LinkStore::open(storage);

    if store.is_empty() {
        output.message("No links stored.");
        return Ok(());
    }

    if output.should_prompt() {
        println!("Delete all {} link(s).", store.len());
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.clear().map_err(store_err)?;
    output.success("Cleared all links");
    Ok(())
}
