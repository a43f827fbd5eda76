//! Data models for Marginalia
//!
//! Defines the two persisted record types: `Note` annotations scoped to one
//! document, and `Link` edges between documents. Field names are part of the
//! export contract (snapshots must round-trip through import and stay
//! readable by older export files), so the serialized form keeps the
//! camelCase names those files carry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id;

/// A free-text annotation attached to one document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique identifier, timestamp-based
    pub id: String,
    /// Annotation text, trimmed, never empty
    pub content: String,
    /// When this note was created
    pub created_at: DateTime<Utc>,
    /// When this note was last edited; equals `created_at` until then
    pub updated_at: DateTime<Utc>,
    /// Labels shown alongside the note, in the order the reader gave them
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Note {
    /// Create a new note. Content is trimmed; both timestamps start equal.
    pub fn new(content: impl Into<String>, tags: Vec<String>) -> Self {
        let content = content.into();
        let now = Utc::now();
        Self {
            id: id::next_id(),
            content: content.trim().to_string(),
            created_at: now,
            updated_at: now,
            tags,
        }
    }
}

/// A directed "see also" edge between two documents
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    /// Unique identifier, timestamp-based
    pub id: String,
    /// Source document slug
    pub from_slug: String,
    /// Target document slug
    pub to_slug: String,
    /// Free text describing the relationship
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When this edge was created
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Create a new edge between two document slugs
    pub fn new(
        from_slug: impl Into<String>,
        to_slug: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id: id::next_id(),
            from_slug: from_slug.into(),
            to_slug: to_slug.into(),
            description,
            created_at: Utc::now(),
        }
    }

    /// True when this edge connects exactly the given ordered pair
    pub fn matches_pair(&self, from: &str, to: &str) -> bool {
        self.from_slug == from && self.to_slug == to
    }
}
