//! Marginalia Core Library
//!
//! Marginalia is the annotation layer of a static documentation reader:
//! free-text notes attached to individual documents, and a directed
//! "see also" graph between documents. This crate owns the data model,
//! the two stores, and their persistence.
//!
//! # Architecture
//!
//! - Each document's notes live in their own collection under the key
//!   `notes-<slug>`; every cross-document link shares one global collection
//!   under `doc-links`.
//! - Every mutation rewrites its whole collection through a pluggable
//!   [`storage::StoragePort`]. There is no partial persistence and no
//!   cross-key transaction.
//! - Adjacency and graph queries are recomputed from the edge list on every
//!   call. Nothing is indexed, which is fine at catalog scale (tens to low
//!   hundreds of documents).
//!
//! Concurrent writers are not coordinated: two processes mutating the same
//! key race on the full-collection rewrite and the last writer wins. The
//! stores are built for a single reader on a single device.
//!
//! # Quick Start
//!
//! ```text
//! let storage: Arc<dyn StoragePort> = Arc::new(FileStorage::open(dir)?);
//!
//! let mut notes = NoteStore::open(storage.clone(), "5-1");
//! notes.add_note("layered styles trade latency for isolation", vec![])?;
//!
//! let mut links = LinkStore::open(storage);
//! links.add_link("5-1", "5-9", Some("layered vs SOA".into()))?;
//! let related = links.outgoing_links("5-1");
//! ```
//!
//! # Modules
//!
//! - `notes`: per-document annotation store
//! - `links`: global link store and graph queries
//! - `models`: the persisted record types
//! - `storage`: storage port, file and in-memory backends
//! - `catalog`: read-only document listing used for display
//! - `config`: application configuration

pub mod catalog;
pub mod config;
pub mod error;
pub mod id;
pub mod links;
pub mod models;
pub mod notes;
mod persist;
pub mod storage;

pub use catalog::{CatalogEntry, DocumentCatalog};
pub use config::Config;
pub use error::{StoreError, StoreResult};
pub use links::{GraphEdge, LinkGraph, LinkStore, LINKS_KEY};
pub use models::{Link, Note};
pub use notes::{notes_key, NoteStore, NOTES_KEY_PREFIX};
pub use persist::ImportReport;
pub use storage::{FileStorage, MemoryStorage, StorageError, StoragePort};
