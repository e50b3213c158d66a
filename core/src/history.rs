//! Optimistic transaction history.
//!
//! A submitted transaction is inserted locally as `Pending` immediately
//! and reconciled against the indexer as it catches up. The merge rule is
//! single and canonical: the server wins once it reports a settled
//! status; a local entry is never downgraded or dropped just because a
//! page of server history has not caught up to it yet.

use {
    serde::{Deserialize, Serialize},
    std::collections::{HashMap, HashSet},
};

/// Lifecycle of a portal transaction as the indexer reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TxStatus {
    Pending,
    Completed,
    Failed,
}

impl TxStatus {
    /// A settled status will never change again server-side.
    pub fn is_settled(&self) -> bool {
        !matches!(self, TxStatus::Pending)
    }
}

/// Which portal operation produced the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TxKind {
    Migrate,
    Bridge,
    Stake,
    Unstake,
    Claim,
}

/// One row of the transaction history view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Transaction hash / indexer id.
    pub id: String,
    pub kind: TxKind,
    /// Amount in base units.
    pub amount: u128,
    pub status: TxStatus,
    /// Unix timestamp (seconds) of local submission or server record.
    pub submitted_at: i64,
}

/// Merge a page of server-confirmed history into the local view.
///
/// Rules, in order:
/// - a server entry with a settled status replaces the local entry of
///   the same id;
/// - a server entry still pending (or absent from the page) never
///   downgrades or drops the local entry;
/// - server entries with no local counterpart are appended.
///
/// The result is ordered by submission time descending with an id
/// tiebreak, so repeated merges are deterministic.
pub fn merge_history(local: &[HistoryEntry], server: &[HistoryEntry]) -> Vec<HistoryEntry> {
    let server_by_id: HashMap<&str, &HistoryEntry> =
        server.iter().map(|entry| (entry.id.as_str(), entry)).collect();
    let local_ids: HashSet<&str> = local.iter().map(|entry| entry.id.as_str()).collect();

    let mut merged: Vec<HistoryEntry> = Vec::with_capacity(local.len() + server.len());
    for entry in local {
        match server_by_id.get(entry.id.as_str()) {
            // The indexer settled this transaction; its record is authoritative.
            Some(remote) if remote.status.is_settled() => merged.push((*remote).clone()),
            // Still pending server-side, or not yet indexed: keep the local view.
            _ => merged.push(entry.clone()),
        }
    }
    for remote in server {
        if !local_ids.contains(remote.id.as_str()) {
            merged.push(remote.clone());
        }
    }

    merged.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then_with(|| a.id.cmp(&b.id))
    });
    merged
}

/// Single-writer store backing the history view.
#[derive(Debug, Clone, Default, Serialize)]
pub struct HistoryState {
    entries: Vec<HistoryEntry>,
}

impl HistoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Insert an optimistic `Pending` entry at submission time.
    /// A duplicate id is ignored; the existing entry stands.
    pub fn insert_pending(&mut self, entry: HistoryEntry) {
        if self.entries.iter().any(|existing| existing.id == entry.id) {
            return;
        }
        self.entries.push(HistoryEntry {
            status: TxStatus::Pending,
            ..entry
        });
        self.entries.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| a.id.cmp(&b.id))
        });
    }

    /// Reconcile a page of server-confirmed history into the store.
    pub fn apply_server_page(&mut self, server: &[HistoryEntry]) {
        self.entries = merge_history(&self.entries, server);
    }

    /// Ids still awaiting confirmation; drives the reconciliation poll.
    pub fn pending_ids(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.status == TxStatus::Pending)
            .map(|entry| entry.id.as_str())
            .collect()
    }

    pub fn has_pending(&self) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.status == TxStatus::Pending)
    }
}
