//! Timestamp-based record identifiers
//!
//! Ids are millisecond UNIX timestamps rendered as decimal strings, the same
//! identifier space found in previously exported snapshots. A process-wide
//! high-water mark bumps the value when two ids land in the same millisecond,
//! keeping ids unique and strictly increasing within one session.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

static LAST: AtomicI64 = AtomicI64::new(0);

/// Generate the next record identifier
pub fn next_id() -> String {
    let now = Utc::now().timestamp_millis();
    let mut prev = LAST.load(Ordering::Relaxed);
    loop {
        let candidate = now.max(prev + 1);
        match LAST.compare_exchange_weak(prev, candidate, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return candidate.to_string(),
            Err(observed) => prev = observed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_ids_increase_within_a_session() {
        let a: i64 = next_id().parse().unwrap();
        let b: i64 = next_id().parse().unwrap();
        assert!(b > a);
    }

    #[test]
    fn test_ids_are_decimal_timestamps() {
        let id = next_id();
        let value: i64 = id.parse().unwrap();
        // Sanity: some time after 2020, long before the year 10000
        assert!(value > 1_577_836_800_000);
        assert!(value < 253_402_300_800_000);
    }
}
