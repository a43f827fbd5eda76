//! Per-document note store
//!
//! One `NoteStore` owns the ordered annotation list of exactly one document,
//! persisted in full under `notes-<slug>` after every mutation. Notes keep
//! their insertion order; nothing is ever sorted.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::Utc;

use crate::error::{StoreError, StoreResult};
use crate::models::Note;
use crate::persist::{self, ImportReport};
use crate::storage::StoragePort;

/// Key prefix for per-document note collections
pub const NOTES_KEY_PREFIX: &str = "notes-";

/// Storage key for a document's note collection
pub fn notes_key(slug: &str) -> String {
    format!("{NOTES_KEY_PREFIX}{slug}")
}

/// CRUD over the annotations of one document
pub struct NoteStore {
    storage: Arc<dyn StoragePort>,
    slug: String,
    key: String,
    notes: Vec<Note>,
}

impl NoteStore {
    /// Open the note store for one document, loading whatever is persisted.
    ///
    /// Loading happens here, before any mutation is possible, so a fresh
    /// store can never rewrite a collection it has not read. A missing key,
    /// corrupt data, or a failed read all start the store empty (the latter
    /// two are logged).
    pub fn open(storage: Arc<dyn StoragePort>, slug: impl Into<String>) -> Self {
        let slug = slug.into();
        let key = notes_key(&slug);
        let notes = persist::load_collection(storage.as_ref(), &key);
        Self {
            storage,
            slug,
            key,
            notes,
        }
    }

    /// The document this store is scoped to
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// All notes, in insertion order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Find a note by id
    pub fn get_note(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Add a note. Content is trimmed; content that trims to empty is
    /// rejected before anything is assigned or stored.
    pub fn add_note(&mut self, content: &str, tags: Vec<String>) -> StoreResult<Note> {
        let content = content.trim();
        if content.is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let note = Note::new(content, tags);
        self.notes.push(note.clone());
        self.persist()?;
        Ok(note)
    }

    /// Replace a note's content and tags, advancing `updatedAt` and leaving
    /// `id` and `createdAt` untouched. Unknown ids are a silent no-op
    /// (`Ok(false)`).
    pub fn update_note(&mut self, id: &str, content: &str, tags: Vec<String>) -> StoreResult<bool> {
        let content = content.trim();
        if content.is_empty() {
            return Err(StoreError::EmptyContent);
        }
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };
        note.content = content.to_string();
        note.tags = tags;
        note.updated_at = Utc::now();
        self.persist()?;
        Ok(true)
    }

    /// Remove a note by id. Deleting an id that is already gone is an
    /// idempotent no-op (`Ok(false)`).
    pub fn delete_note(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = self.notes.len() != before;
        self.persist()?;
        Ok(removed)
    }

    /// Drop every note for this document
    pub fn clear(&mut self) -> StoreResult<()> {
        self.notes.clear();
        self.persist()
    }

    /// Serialized snapshot of the full collection. Pure read; the snapshot
    /// round-trips through [`NoteStore::import_merge`].
    pub fn export(&self) -> StoreResult<String> {
        persist::export_snapshot(&self.notes)
    }

    /// Merge an exported snapshot into this store.
    ///
    /// Records whose id already exists locally are silently skipped, never
    /// overwritten; new ids are appended in payload order. A payload that is
    /// not an array of note-shaped records rejects the whole import.
    pub fn import_merge(&mut self, payload: &str) -> StoreResult<ImportReport> {
        let incoming: Vec<Note> = persist::parse_snapshot(payload)?;

        let mut seen: HashSet<String> = self.notes.iter().map(|n| n.id.clone()).collect();
        let mut imported = 0;
        let mut skipped = 0;
        for note in incoming {
            if seen.insert(note.id.clone()) {
                self.notes.push(note);
                imported += 1;
            } else {
                skipped += 1;
            }
        }
        self.persist()?;
        Ok(ImportReport { imported, skipped })
    }

    /// Note counts for every document with a stored collection, keyed by
    /// slug. Collections that fail to parse count as empty (and are logged
    /// by the loader).
    pub fn note_counts(storage: &dyn StoragePort) -> StoreResult<BTreeMap<String, usize>> {
        let mut counts = BTreeMap::new();
        for key in storage.keys()? {
            let Some(slug) = key.strip_prefix(NOTES_KEY_PREFIX) else {
                continue;
            };
            let notes: Vec<Note> = persist::load_collection(storage, &key);
            counts.insert(slug.to_string(), notes.len());
        }
        Ok(counts)
    }

    /// Rewrite the whole collection. The in-memory state is already mutated
    /// when this runs; on failure the caller gets the error while the
    /// mutation stays visible in memory (optimistic policy).
    fn persist(&self) -> StoreResult<()> {
        persist::persist_collection(self.storage.as_ref(), &self.key, &self.notes)
    }
}
