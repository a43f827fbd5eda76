//! Note command handlers
//!
//! Each command opens the NoteStore for one document slug, mutates or reads
//! it, and formats the result. The slug is taken as given - the store never
//! validates it against the catalog.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use marginalia_core::{DocumentCatalog, NoteStore, StoragePort};

use super::store_err;
use crate::output::Output;
use crate::prompt::confirm;

/// Add a note to a document
pub fn add(
    storage: Arc<dyn StoragePort>,
    slug: String,
    content: String,
    tags: Vec<String>,
    output: &Output,
) -> Result<()> {
    let mut store = NoteStore::open(storage, &slug);
    let note = store.add_note(&content, tags).map_err(store_err)?;

    output.success(&format!("Added note {} to {}", note.id, slug));
    output.print_note(&note);
    Ok(())
}

/// List all notes on a document
pub fn list(
    storage: Arc<dyn StoragePort>,
    slug: String,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    let store = NoteStore::open(storage, &slug);
    output.print_notes(&slug, catalog, store.notes());
    Ok(())
}

/// Replace a note's content and tags
pub fn edit(
    storage: Arc<dyn StoragePort>,
    slug: String,
    id: String,
    content: String,
    tags: Vec<String>,
    output: &Output,
) -> Result<()> {
    let mut store = NoteStore::open(storage, &slug);
    let changed = store.update_note(&id, &content, tags).map_err(store_err)?;

    if changed {
        output.success(&format!("Updated note {}", id));
    } else {
        output.message(&format!("No note {} on {}; nothing changed.", id, slug));
    }
    Ok(())
}

/// Delete a note from a document
pub fn delete(
    storage: Arc<dyn StoragePort>,
    slug: String,
    id: String,
    output: &Output,
) -> Result<()> {
    let mut store = NoteStore::open(storage, &slug);

    if output.should_prompt() {
        if let Some(note) = store.get_note(&id) {
            let preview: String = note.content.chars().take(50).collect();
            println!("Delete note: {} - {}", id, preview.replace('\n', " "));
            if !confirm("Are you sure?")? {
                println!("Cancelled.");
                return Ok(());
            }
        }
    }

    let removed = store.delete_note(&id).map_err(store_err)?;
    if removed {
        output.success(&format!("Deleted note {}", id));
    } else {
        output.message(&format!("No note {} on {}; nothing changed.", id, slug));
    }
    Ok(())
}

/// Delete every note on a document
pub fn clear(storage: Arc<dyn StoragePort>, slug: String, output: &Output) -> Result<()> {
    let mut store = NoteStore::open(storage, &slug);

    if store.is_empty() {
        output.message(&format!("No notes on {}.", slug));
        return Ok(());
    }

    if output.should_prompt() {
        println!("Delete all {} note(s) on {}.", store.len(), slug);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.clear().map_err(store_err)?;
    output.success(&format!("Cleared notes on {}", slug));
    Ok(())
}

/// Export a document's notes to a JSON file
pub fn export(
    storage: Arc<dyn StoragePort>,
    slug: String,
    out: Option<PathBuf>,
    output: &Output,
) -> Result<()> {
    let store = NoteStore::open(storage, &slug);
    let snapshot = store.export().map_err(store_err)?;

    let path = out.unwrap_or_else(|| {
        PathBuf::from(format!("notes-{}-{}.json", slug, Utc::now().format("%Y-%m-%d")))
    });
    std::fs::write(&path, snapshot)
        .with_context(|| format!("Failed to write export file: {:?}", path))?;

    output.success(&format!(
        "Exported {} note(s) to {}",
        store.len(),
        path.display()
    ));
    Ok(())
}

/// Merge notes from an exported JSON file
pub fn import(
    storage: Arc<dyn StoragePort>,
    slug: String,
    file: PathBuf,
    output: &Output,
) -> Result<()> {
    let payload = std::fs::read_to_string(&file)
        .with_context(|| format!("Failed to read import file: {:?}", file))?;

    let mut store = NoteStore::open(storage, &slug);
    let report = store.import_merge(&payload).map_err(store_err)?;

    output.print_import_report(&report);
    Ok(())
}

/// Show note counts for every document with stored notes
pub fn stats(
    storage: Arc<dyn StoragePort>,
    catalog: &DocumentCatalog,
    output: &Output,
) -> Result<()> {
    let counts = NoteStore::note_counts(storage.as_ref()).map_err(store_err)?;
    output.print_note_stats(&counts, catalog);
    Ok(())
}
