//! Review-progress bookkeeping: which photos were reviewed, what was
//! decided, and where the user left off.

use crate::events::{EventLog, StoreEvent};
use crate::store::ProgressStore;
use cull_core::{
    format_rfc3339, ProgressSnapshot, ProgressSummary, ReviewAction, ReviewStatistics,
};
use std::collections::{HashMap, HashSet};
use time::OffsetDateTime;

/// The review ledger. Persists locally after every change and reconciles
/// against a remote snapshot at startup (whole-snapshot last-write-wins).
pub struct ReviewLedger {
    reviewed: HashSet<String>,
    actions: HashMap<String, ReviewAction>,
    cursor: usize,
    last_updated: OffsetDateTime,
    events: EventLog,
}

impl Default for ReviewLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl ReviewLedger {
    /// An empty ledger. `last_updated` starts at the epoch so a fresh
    /// install always loses reconciliation to any real remote snapshot.
    pub fn new() -> Self {
        Self {
            reviewed: HashSet::new(),
            actions: HashMap::new(),
            cursor: 0,
            last_updated: OffsetDateTime::UNIX_EPOCH,
            events: EventLog::default(),
        }
    }

    /// Load local state once, then reconcile against the remote copy if one
    /// is readable. Read failures degrade to an empty ledger / no remote.
    pub fn load(store: &ProgressStore) -> Self {
        let mut ledger = Self::new();

        match store.read_local() {
            Ok(Some(snap)) => ledger.apply_snapshot(&snap),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("failed to read local progress: {e}");
                ledger.events.record(StoreEvent::LocalReadFailed(e.to_string()));
            }
        }

        if store.sync_container.is_none() {
            ledger.events.record(StoreEvent::RemoteUnavailable);
            return ledger;
        }
        match store.read_remote() {
            Ok(Some(remote)) => {
                ledger.reconcile(&remote);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("failed to read remote progress: {e}");
                ledger.events.record(StoreEvent::RemoteReadFailed(e.to_string()));
            }
        }
        ledger
    }

    // ── Review records ──

    /// Insert or overwrite the record for `id`. Last write wins; repeating
    /// the same action is idempotent apart from the updated timestamp.
    pub fn mark_reviewed(&mut self, id: &str, action: ReviewAction) {
        self.reviewed.insert(id.to_string());
        self.actions.insert(id.to_string(), action);
        self.touch();
    }

    /// Delete the record for `id` if present; no-op otherwise.
    pub fn remove_review(&mut self, id: &str) {
        let had_set = self.reviewed.remove(id);
        let had_action = self.actions.remove(id).is_some();
        if had_set || had_action {
            self.touch();
        }
    }

    pub fn is_reviewed(&self, id: &str) -> bool {
        self.reviewed.contains(id)
    }

    pub fn action_for(&self, id: &str) -> Option<ReviewAction> {
        self.actions.get(id).copied()
    }

    pub fn reviewed_count(&self) -> usize {
        self.reviewed.len()
    }

    /// Clear everything and reset the cursor.
    pub fn reset(&mut self) {
        self.reviewed.clear();
        self.actions.clear();
        self.cursor = 0;
        self.touch();
    }

    // ── Cursor ──

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, index: usize) {
        if self.cursor != index {
            self.cursor = index;
            self.touch();
        }
    }

    // ── Derived views ──

    pub fn statistics(&self) -> ReviewStatistics {
        let total = self.reviewed.len();
        let deleted = self
            .actions
            .values()
            .filter(|a| **a == ReviewAction::Delete)
            .count();
        let kept = self
            .actions
            .values()
            .filter(|a| **a == ReviewAction::Keep)
            .count();
        ReviewStatistics {
            total_reviewed: total,
            deleted_count: deleted,
            kept_count: kept,
            deletion_rate: if total > 0 {
                deleted as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// How far the user is through a photo set of size `total`.
    pub fn progress(&self, total: usize) -> ProgressSummary {
        let reviewed = self.reviewed.len();
        ProgressSummary {
            reviewed,
            total,
            percentage: reviewed as f64 / total.max(1) as f64 * 100.0,
        }
    }

    pub fn last_updated(&self) -> OffsetDateTime {
        self.last_updated
    }

    // ── Snapshots and persistence ──

    pub fn snapshot(&self) -> ProgressSnapshot {
        let mut reviewed: Vec<String> = self.reviewed.iter().cloned().collect();
        reviewed.sort_unstable();
        ProgressSnapshot {
            reviewed_photos: reviewed,
            photo_actions: self.actions.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            last_reviewed_index: self.cursor,
            last_updated: format_rfc3339(self.last_updated),
        }
    }

    fn apply_snapshot(&mut self, snap: &ProgressSnapshot) {
        self.reviewed = snap.reviewed_photos.iter().cloned().collect();
        self.actions = snap
            .photo_actions
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        self.cursor = snap.last_reviewed_index;
        self.last_updated = snap.last_updated_time();
    }

    /// Whole-snapshot last-write-wins: the remote replaces the entire local
    /// ledger, action map, and cursor iff it is strictly newer. Returns
    /// whether the remote was applied.
    pub fn reconcile(&mut self, remote: &ProgressSnapshot) -> bool {
        if remote.last_updated_time() > self.last_updated {
            self.apply_snapshot(remote);
            self.events.record(StoreEvent::RemoteApplied);
            true
        } else {
            self.events.record(StoreEvent::RemoteIgnored);
            false
        }
    }

    /// Write the snapshot locally, then best-effort to the remote store.
    /// Every failure is absorbed into the event log; nothing is surfaced.
    pub fn persist(&mut self, store: &ProgressStore) {
        let snap = self.snapshot();
        match store.write_local(&snap) {
            Ok(()) => self.events.record(StoreEvent::LocalSaved),
            Err(e) => {
                tracing::warn!("failed to write local progress: {e}");
                self.events.record(StoreEvent::LocalSaveFailed(e.to_string()));
            }
        }
        match store.write_remote(&snap) {
            Ok(true) => self.events.record(StoreEvent::RemoteSynced),
            Ok(false) => self.events.record(StoreEvent::RemoteUnavailable),
            Err(e) => {
                tracing::warn!("failed to sync progress to remote store: {e}");
                self.events.record(StoreEvent::RemoteWriteFailed(e.to_string()));
            }
        }
    }

    // ── Event log ──

    pub fn events(&self) -> &[StoreEvent] {
        self.events.events()
    }

    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        self.events.drain()
    }

    fn touch(&mut self) {
        self.last_updated = OffsetDateTime::now_utc();
    }
}
