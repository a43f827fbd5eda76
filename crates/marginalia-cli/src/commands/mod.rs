//! Command handlers

pub mod config;
pub mod docs;
pub mod link;
pub mod note;
pub mod status;

use marginalia_core::StoreError;

/// Convert a store error for CLI reporting, attaching the recovery
/// suggestion when the failure is user-actionable (capacity exhaustion,
/// permissions). The store has already applied the mutation in memory;
/// for a one-shot process the durable copy is what counts, so this is
/// reported as a failure rather than a warning.
pub(crate) fn store_err(err: StoreError) -> anyhow::Error {
    match err.recovery_suggestion() {
        Some(hint) => anyhow::Error::new(err).context(hint),
        None => anyhow::Error::new(err),
    }
}
