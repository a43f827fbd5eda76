//! Document catalog
//!
//! The static list of documents a reader can annotate and cross-link,
//! loaded from a TOML file of `[[documents]]` tables. The catalog only
//! decorates store output with titles and chapter labels and supplies
//! link-candidate lists; the stores never validate slugs against it, so an
//! edge may reference a document the catalog no longer knows.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One catalog document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Document identifier, the unit of addressing for notes and links
    pub slug: String,
    /// Display title
    pub title: String,
    /// Chapter heading the document belongs to
    pub chapter: String,
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    documents: Vec<CatalogEntry>,
}

/// Read-only document listing
#[derive(Debug, Clone, Default)]
pub struct DocumentCatalog {
    entries: Vec<CatalogEntry>,
    by_slug: HashMap<String, usize>,
}

impl DocumentCatalog {
    /// Build a catalog from entries, keeping their order for display
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        let by_slug = entries
            .iter()
            .enumerate()
            .map(|(i, e)| (e.slug.clone(), i))
            .collect();
        Self { entries, by_slug }
    }

    /// Load a catalog from a TOML file
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {:?}", path))?;
        Self::load_from_str(&content)
    }

    /// Parse a catalog from TOML content
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let file: CatalogFile =
            toml::from_str(toml_content).context("Failed to parse catalog TOML")?;
        Ok(Self::new(file.documents))
    }

    /// All documents, in catalog order
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a document by slug
    pub fn lookup(&self, slug: &str) -> Option<&CatalogEntry> {
        self.by_slug.get(slug).map(|&i| &self.entries[i])
    }

    /// Display title for a slug; unknown slugs fall back to the slug itself
    pub fn display_title(&self, slug: &str) -> String {
        self.lookup(slug)
            .map(|e| e.title.clone())
            .unwrap_or_else(|| slug.to_string())
    }

    /// Documents that may be offered as link targets from `current`.
    ///
    /// The current document is excluded here. This is the only place
    /// self-loops are filtered; the store itself stays permissive.
    pub fn candidates(&self, current: &str) -> Vec<&CatalogEntry> {
        self.entries.iter().filter(|e| e.slug != current).collect()
    }
}
