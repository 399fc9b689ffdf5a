//! Ordered failover across candidate database hosts.

use std::sync::Arc;

use crate::credentials::Credentials;

use super::probe::ConnectivityProbe;

/// Picks the first reachable host from an ordered candidate list.
///
/// Probing is sequential and stops at the first success, so the same
/// environment always yields the same host.
pub struct HostResolver {
    probe: Arc<dyn ConnectivityProbe>,
}

impl HostResolver {
    pub fn new(probe: Arc<dyn ConnectivityProbe>) -> Self {
        Self { probe }
    }

    /// Returns `None` when every candidate fails (including an empty list).
    pub async fn resolve(&self, candidates: &[String], credentials: &Credentials) -> Option<String> {
        for host in candidates {
            if self.probe.probe(host, credentials).await {
                tracing::info!(host = %host, "Selected database host");
                return Some(host.clone());
            }
        }
        tracing::error!(
            candidates = candidates.len(),
            "Could not connect to any of the candidate database hosts",
        );
        None
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup::test_helpers::{hosts, test_credentials, RecordingProbe};

    #[tokio::test]
    async fn first_reachable_wins_and_later_hosts_are_skipped() {
        let probe = Arc::new(RecordingProbe::reachable(&["b", "c"]));
        let resolver = HostResolver::new(probe.clone());

        let host = resolver
            .resolve(&hosts(&["a", "b", "c"]), &test_credentials())
            .await;

        assert_eq!(host.as_deref(), Some("b"));
        assert_eq!(probe.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn first_candidate_is_preferred_when_all_are_up() {
        let probe = Arc::new(RecordingProbe::reachable(&["a", "b"]));
        let resolver = HostResolver::new(probe.clone());

        let host = resolver.resolve(&hosts(&["a", "b"]), &test_credentials()).await;

        assert_eq!(host.as_deref(), Some("a"));
        assert_eq!(probe.calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn exhaustion_returns_none_after_trying_everything_once() {
        let probe = Arc::new(RecordingProbe::reachable(&[]));
        let resolver = HostResolver::new(probe.clone());

        let host = resolver.resolve(&hosts(&["a", "b"]), &test_credentials()).await;

        assert!(host.is_none());
        assert_eq!(probe.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn empty_candidate_list_resolves_to_none() {
        let probe = Arc::new(RecordingProbe::reachable(&["a"]));
        let resolver = HostResolver::new(probe.clone());

        assert!(resolver.resolve(&[], &test_credentials()).await.is_none());
        assert!(probe.calls().is_empty());
    }
}
