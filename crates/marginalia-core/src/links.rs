//! Global link store and graph queries
//!
//! A single `LinkStore` owns every directed edge between documents,
//! persisted in full under one fixed key. Adjacency queries filter the edge
//! list on demand each call; nothing is indexed or cached, which holds up
//! fine at catalog scale.
//!
//! The one structural invariant: at most one edge per ordered
//! `(fromSlug, toSlug)` pair. "Bidirectional" is a derived property, two
//! independent edges in opposite directions, never a stored flag.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::models::Link;
use crate::persist::{self, ImportReport};
use crate::storage::StoragePort;

/// Storage key for the global edge collection
pub const LINKS_KEY: &str = "doc-links";

/// Node and edge lists shaped for graph-visualization consumers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkGraph {
    /// Every slug referenced by at least one edge, in first-appearance order
    pub nodes: Vec<String>,
    /// Every edge, in insertion order
    pub edges: Vec<GraphEdge>,
}

/// One edge of the exported graph
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub id: String,
}

/// CRUD and graph queries over the global directed-edge collection
pub struct LinkStore {
    storage: Arc<dyn StoragePort>,
    links: Vec<Link>,
}

impl LinkStore {
    /// Open the global link store, loading whatever is persisted. Same
    /// contract as [`crate::NoteStore::open`]: loading happens before any
    /// mutation is possible, and unreadable data starts the store empty.
    pub fn open(storage: Arc<dyn StoragePort>) -> Self {
        let links = persist::load_collection(storage.as_ref(), LINKS_KEY);
        Self { storage, links }
    }

    /// All edges, in insertion order
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Find an edge by id
    pub fn get_link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id == id)
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Add an edge. At most one edge may exist per ordered `(from, to)`
    /// pair; a duplicate is rejected without mutating anything. The slugs
    /// are opaque here - they are never checked against the catalog.
    pub fn add_link(
        &mut self,
        from: &str,
        to: &str,
        description: Option<String>,
    ) -> StoreResult<Link> {
        if self.links.iter().any(|l| l.matches_pair(from, to)) {
            return Err(StoreError::DuplicateLink {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        let link = Link::new(from, to, description);
        self.links.push(link.clone());
        self.persist()?;
        Ok(link)
    }

    /// Replace an edge's description, leaving `id` and `createdAt`
    /// untouched. Unknown ids are a silent no-op (`Ok(false)`).
    pub fn update_link(&mut self, id: &str, description: Option<String>) -> StoreResult<bool> {
        let Some(link) = self.links.iter_mut().find(|l| l.id == id) else {
            return Ok(false);
        };
        link.description = description;
        self.persist()?;
        Ok(true)
    }

    /// Remove an edge by id; idempotent (`Ok(false)` when already gone)
    pub fn delete_link(&mut self, id: &str) -> StoreResult<bool> {
        let before = self.links.len();
        self.links.retain(|l| l.id != id);
        let removed = self.links.len() != before;
        self.persist()?;
        Ok(removed)
    }

    /// Edges leaving `slug`, in insertion order
    pub fn outgoing_links(&self, slug: &str) -> Vec<Link> {
        self.links
            .iter()
            .filter(|l| l.from_slug == slug)
            .cloned()
            .collect()
    }

    /// Edges arriving at `slug`, in insertion order
    pub fn incoming_links(&self, slug: &str) -> Vec<Link> {
        self.links
            .iter()
            .filter(|l| l.to_slug == slug)
            .cloned()
            .collect()
    }

    /// Edges `(slug -> X)` whose reverse `(X -> slug)` also exists.
    /// O(outgoing x incoming) per call.
    pub fn bidirectional_links(&self, slug: &str) -> Vec<Link> {
        let incoming = self.incoming_links(slug);
        self.outgoing_links(slug)
            .into_iter()
            .filter(|out| incoming.iter().any(|inc| inc.from_slug == out.to_slug))
            .collect()
    }

    /// True when an edge exists between the two documents in either
    /// direction. Does not imply bidirectionality.
    pub fn are_connected(&self, a: &str, b: &str) -> bool {
        self.links
            .iter()
            .any(|l| l.matches_pair(a, b) || l.matches_pair(b, a))
    }

    /// Full node and edge sets for visualization. Nodes are the slugs
    /// actually referenced by edges, not the whole catalog.
    pub fn graph(&self) -> LinkGraph {
        let mut nodes: Vec<String> = Vec::new();
        let mut edges = Vec::with_capacity(self.links.len());
        for link in &self.links {
            for slug in [&link.from_slug, &link.to_slug] {
                if !nodes.iter().any(|n| n == slug) {
                    nodes.push(slug.clone());
                }
            }
            edges.push(GraphEdge {
                source: link.from_slug.clone(),
                target: link.to_slug.clone(),
                id: link.id.clone(),
            });
        }
        LinkGraph { nodes, edges }
    }

    /// Drop every edge
    pub fn clear(&mut self) -> StoreResult<()> {
        self.links.clear();
        self.persist()
    }

    /// Serialized snapshot of the full collection. Pure read; round-trips
    /// through [`LinkStore::import_merge`].
    pub fn export(&self) -> StoreResult<String> {
        persist::export_snapshot(&self.links)
    }

    /// Merge an exported snapshot into this store.
    ///
    /// An edge is skipped when its id is already present or when its ordered
    /// pair already exists under any id (including earlier records of the
    /// same payload), so the one-edge-per-pair invariant survives imports.
    /// A payload that is not an array of link-shaped records rejects the
    /// whole import.
    pub fn import_merge(&mut self, payload: &str) -> StoreResult<ImportReport> {
        let incoming: Vec<Link> = persist::parse_snapshot(payload)?;

        let mut ids: HashSet<String> = self.links.iter().map(|l| l.id.clone()).collect();
        let mut pairs: HashSet<(String, String)> = self
            .links
            .iter()
            .map(|l| (l.from_slug.clone(), l.to_slug.clone()))
            .collect();

        let mut imported = 0;
        let mut skipped = 0;
        for link in incoming {
            let pair = (link.from_slug.clone(), link.to_slug.clone());
            if ids.contains(&link.id) || pairs.contains(&pair) {
                skipped += 1;
                continue;
            }
            ids.insert(link.id.clone());
            pairs.insert(pair);
            self.links.push(link);
            imported += 1;
        }
        self.persist()?;
        Ok(ImportReport { imported, skipped })
    }

    fn persist(&self) -> StoreResult<()> {
        persist::persist_collection(self.storage.as_ref(), LINKS_KEY, &self.links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn memory_store() -> LinkStore {
        LinkStore::open(Arc::new(MemoryStorage::new()))
    }

    #[test]
    fn test_add_link() {
        let mut store = memory_store();
        let link = store
            .add_link("5-1", "5-9", Some("layered vs SOA".to_string()))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get_link(&link.id).unwrap().from_slug, "5-1");
    }

    #[test]
    fn test_duplicate_pair_is_rejected_and_original_kept() {
        let mut store = memory_store();
        store
            .add_link("5-1", "5-9", Some("layered vs SOA".to_string()))
            .unwrap();

        let err = store
            .add_link("5-1", "5-9", Some("a different description".to_string()))
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateLink { .. }));

        assert_eq!(store.len(), 1);
        assert_eq!(
            store.links()[0].description.as_deref(),
            Some("layered vs SOA")
        );
    }

    #[test]
    fn test_reverse_direction_is_not_a_duplicate() {
        let mut store = memory_store();
        store.add_link("a", "b", None).unwrap();
        store.add_link("b", "a", None).unwrap();
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_self_loop_is_permitted_at_store_level() {
        // Candidate filtering in the catalog keeps these out of the UI, but
        // the store itself does not forbid them.
        let mut store = memory_store();
        store.add_link("a", "a", None).unwrap();
        assert_eq!(store.len(), 1);
        assert!(store.are_connected("a", "a"));
    }

    #[test]
    fn test_update_link_replaces_only_description() {
        let mut store = memory_store();
        let link = store.add_link("a", "b", None).unwrap();

        assert!(store
            .update_link(&link.id, Some("added later".to_string()))
            .unwrap());

        let updated = store.get_link(&link.id).unwrap();
        assert_eq!(updated.description.as_deref(), Some("added later"));
        assert_eq!(updated.id, link.id);
        assert_eq!(updated.created_at, link.created_at);
        assert_eq!(updated.from_slug, "a");
        assert_eq!(updated.to_slug, "b");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = memory_store();
        assert!(!store.update_link("99999", Some("x".to_string())).unwrap());
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = memory_store();
        let link = store.add_link("a", "b", None).unwrap();

        assert!(store.delete_link(&link.id).unwrap());
        assert!(!store.delete_link(&link.id).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn test_outgoing_incoming_partition() {
        let mut store = memory_store();
        store.add_link("a", "b", None).unwrap();
        store.add_link("a", "c", None).unwrap();
        store.add_link("c", "a", None).unwrap();

        let outgoing = store.outgoing_links("a");
        assert_eq!(outgoing.len(), 2);
        assert!(outgoing.iter().all(|l| l.from_slug == "a"));

        let incoming = store.incoming_links("a");
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].from_slug, "c");

        // The edge (a -> b) appears nowhere else
        assert!(store.outgoing_links("b").is_empty());
        assert_eq!(store.incoming_links("b").len(), 1);
        assert!(store
            .incoming_links("c")
            .iter()
            .all(|l| l.matches_pair("a", "c")));
    }

    #[test]
    fn test_queries_preserve_insertion_order() {
        let mut store = memory_store();
        store.add_link("a", "b", None).unwrap();
        store.add_link("a", "d", None).unwrap();
        store.add_link("a", "c", None).unwrap();

        let outgoing = store.outgoing_links("a");
        let targets: Vec<&str> = outgoing.iter().map(|l| l.to_slug.as_str()).collect();
        assert_eq!(targets, vec!["b", "d", "c"]);
    }

    #[test]
    fn test_bidirectional_requires_both_directions() {
        let mut store = memory_store();
        store.add_link("a", "b", None).unwrap();
        store.add_link("b", "a", None).unwrap();
        store.add_link("a", "c", None).unwrap();

        let mutual = store.bidirectional_links("a");
        assert_eq!(mutual.len(), 1);
        assert!(mutual[0].matches_pair("a", "b"));

        // Symmetric view from the other endpoint
        let mutual_b = store.bidirectional_links("b");
        assert_eq!(mutual_b.len(), 1);
        assert!(mutual_b[0].matches_pair("b", "a"));

        // One-directional neighbors never show up
        assert!(store.bidirectional_links("c").is_empty());
    }

    #[test]
    fn test_bidirectional_is_subset_of_outgoing() {
        let mut store = memory_store();
        store.add_link("a", "b", None).unwrap();
        store.add_link("b", "a", None).unwrap();
        store.add_link("c", "a", None).unwrap();

        let outgoing = store.outgoing_links("a");
        for link in store.bidirectional_links("a") {
            assert!(outgoing.contains(&link));
        }
    }

    #[test]
    fn test_are_connected_either_direction() {
        let mut store = memory_store();
        store.add_link("a", "b", None).unwrap();

        assert!(store.are_connected("a", "b"));
        assert!(store.are_connected("b", "a"));
        assert!(!store.are_connected("a", "c"));
    }

    #[test]
    fn test_graph_nodes_and_edges() {
        let mut store = memory_store();
        store.add_link("a", "b", None).unwrap();
        store.add_link("b", "c", None).unwrap();
        store.add_link("a", "c", None).unwrap();

        let graph = store.graph();
        assert_eq!(graph.nodes, vec!["a", "b", "c"]);
        assert_eq!(graph.edges.len(), 3);
        assert_eq!(graph.edges[0].source, "a");
        assert_eq!(graph.edges[0].target, "b");
    }

    #[test]
    fn test_graph_only_includes_referenced_nodes() {
        let mut store = memory_store();
        store.add_link("5-1", "5-9", None).unwrap();

        let graph = store.graph();
        assert_eq!(graph.nodes, vec!["5-1", "5-9"]);
    }

    #[test]
    fn test_graph_of_empty_store() {
        let store = memory_store();
        let graph = store.graph();
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_links_persist_across_reopen() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let mut store = LinkStore::open(storage.clone());
            store
                .add_link("2-2", "3-1", Some("lifecycle feeds process models".to_string()))
                .unwrap();
        }

        let store = LinkStore::open(storage);
        assert_eq!(store.len(), 1);
        assert_eq!(store.links()[0].to_slug, "3-1");
    }

    #[test]
    fn test_corrupt_persisted_data_starts_empty() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(LINKS_KEY, "not json at all").unwrap();

        let store = LinkStore::open(storage);
        assert!(store.is_empty());
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut store = memory_store();
        store.add_link("a", "b", Some("why".to_string())).unwrap();
        store.add_link("b", "a", None).unwrap();
        let snapshot = store.export().unwrap();

        let mut restored = LinkStore::open(Arc::new(MemoryStorage::new()));
        let report = restored.import_merge(&snapshot).unwrap();

        assert_eq!(report.imported, 2);
        assert_eq!(restored.links(), store.links());
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let mut store = memory_store();
        store.add_link("a", "b", None).unwrap();
        let snapshot = store.export().unwrap();

        let report = store.import_merge(&snapshot).unwrap();
        assert_eq!(report.imported, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_import_skips_duplicate_pair_under_different_id() {
        let mut store = memory_store();
        store.add_link("a", "b", Some("local".to_string())).unwrap();

        // Same ordered pair, fresh id: still a duplicate
        let foreign = Link::new("a", "b", Some("foreign".to_string()));
        let payload = serde_json::to_string(&vec![foreign]).unwrap();

        let report = store.import_merge(&payload).unwrap();
        assert_eq!(report.imported, 0);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.len(), 1);
        assert_eq!(store.links()[0].description.as_deref(), Some("local"));
    }

    #[test]
    fn test_import_deduplicates_within_payload() {
        let mut store = memory_store();
        let first = Link::new("a", "b", None);
        let second = Link::new("a", "b", None);
        let payload = serde_json::to_string(&vec![first, second]).unwrap();

        let report = store.import_merge(&payload).unwrap();
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_import_rejects_non_array_payload() {
        let mut store = memory_store();
        store.add_link("a", "b", None).unwrap();

        let err = store.import_merge(r#"{"edges": []}"#).unwrap_err();
        assert!(matches!(err, StoreError::ImportFormat(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_capacity_error_keeps_in_memory_state() {
        let storage = Arc::new(MemoryStorage::with_capacity_limit(32));
        let mut store = LinkStore::open(storage);

        let err = store
            .add_link("5-1", "5-9", Some("far too long to fit in the cap".to_string()))
            .unwrap_err();
        assert!(err.is_capacity());
        assert_eq!(store.len(), 1);
    }
}
