//! Latest-wins admission for in-flight host queries.
//!
//! The hosts list refetches on every navigation change, and responses can
//! land out of order. The gate stamps each issued request with a
//! generation and admits only responses from the newest one; re-issuing
//! the key already in flight reuses the generation, so an unchanged view
//! never duplicates a request.

use crate::query::QueryKey;
use tracing::debug;

/// Ticket stamped onto an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
    fresh: bool,
}

impl Ticket {
    /// Whether this issuance started a new request (the key changed).
    ///
    /// A stale `false` means the in-flight request already covers the key;
    /// the caller should wait for it instead of fetching again.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Latest-wins gate over a stream of keyed requests.
#[derive(Debug, Default)]
pub struct QueryGate {
    key: Option<QueryKey>,
    generation: u64,
}

impl QueryGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for a request.
    ///
    /// A changed key bumps the generation, superseding every ticket issued
    /// before; an unchanged key reuses the current one.
    pub fn issue(&mut self, key: &QueryKey) -> Ticket {
        let fresh = self.key.as_ref() != Some(key);
        if fresh {
            self.generation += 1;
            self.key = Some(*key);
            debug!(generation = self.generation, key = %key, "superseding in-flight query");
        }
        Ticket {
            generation: self.generation,
            fresh,
        }
    }

    /// Whether a response bearing this ticket is still current.
    pub fn admit(&self, ticket: Ticket) -> bool {
        ticket.generation == self.generation
    }

    /// Key of the current generation, if any request was issued.
    pub fn current_key(&self) -> Option<&QueryKey> {
        self.key.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::HostFilters;

    fn key(query: &str) -> QueryKey {
        QueryKey::list(&HostFilters::from_query_string(query), None)
    }

    #[test]
    fn test_first_issue_is_fresh() {
        let mut gate = QueryGate::new();
        let ticket = gate.issue(&key("team_id=1"));
        assert!(ticket.is_fresh());
        assert!(gate.admit(ticket));
    }

    #[test]
    fn test_same_key_is_deduplicated() {
        let mut gate = QueryGate::new();
        let first = gate.issue(&key("team_id=1"));
        let second = gate.issue(&key("team_id=1"));
        assert!(!second.is_fresh());
        assert_eq!(first.generation(), second.generation());
        assert!(gate.admit(first));
        assert!(gate.admit(second));
    }

    #[test]
    fn test_changed_key_supersedes_older_tickets() {
        let mut gate = QueryGate::new();
        let old = gate.issue(&key("team_id=1"));
        let new = gate.issue(&key("team_id=2"));
        assert!(new.is_fresh());
        assert!(!gate.admit(old), "superseded response must be dropped");
        assert!(gate.admit(new));
    }

    #[test]
    fn test_flapping_back_to_old_key_still_invalidates() {
        // A response from generation 1 must not be admitted just because the
        // view returned to the same filter tuple later.
        let mut gate = QueryGate::new();
        let first = gate.issue(&key("team_id=1"));
        gate.issue(&key("team_id=2"));
        let third = gate.issue(&key("team_id=1"));
        assert!(third.is_fresh());
        assert!(!gate.admit(first));
        assert!(gate.admit(third));
    }

    #[test]
    fn test_current_key_tracks_latest() {
        let mut gate = QueryGate::new();
        assert_eq!(gate.current_key(), None);
        let k = key("status=online");
        gate.issue(&k);
        assert_eq!(gate.current_key(), Some(&k));
    }
}
