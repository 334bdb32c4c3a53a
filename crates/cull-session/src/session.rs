//! The review session controller: orchestrates cursor movement, dispatches
//! mutations to the media library, and updates the ledger and undo history
//! on confirmed changes.

use crate::feedback::{Feedback, FeedbackTone};
use crate::library::{DecodedImage, MediaError, MediaLibrary};
use crate::undo::{ActionLogEntry, UndoStack};
use cull_core::{
    apply_sort, AccessLevel, MediaItem, ProgressSummary, ReviewAction, ReviewStatistics, SortMode,
};
use cull_ledger::{ProgressStore, ReviewLedger, StoreEvent};
use std::time::Duration;
use thiserror::Error;
use time::OffsetDateTime;

/// Controller states. `Feedback` reports a live transient message; it never
/// gates anything — only `AwaitingMutation` blocks decisions and undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingMutation,
    Feedback,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("a mutation is already in flight")]
    MutationInFlight,
    #[error("no photo at the current position")]
    NoCurrentItem,
    #[error("nothing to undo")]
    NothingToUndo,
}

/// What happened to a decision. A rejected mutation changes no state and
/// shows no feedback; the outcome is still reported so hosts and tests can
/// observe the swallow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionOutcome {
    Applied,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    /// A `Keep` was rolled back: favorite flag cleared, record removed.
    FavoriteCleared,
    /// The collaborator rejected the rollback; the entry stays consumed.
    UndoFailed,
    /// Deletions cannot be rolled back; informational only.
    DeleteIrreversible,
}

/// One review session. Owns the ledger, undo history, and the current
/// sorted queue; initialized at session start, flushed at session end.
pub struct ReviewSession<L> {
    library: L,
    ledger: ReviewLedger,
    store: ProgressStore,
    undo: UndoStack,
    photos: Vec<MediaItem>,
    queue: Vec<MediaItem>,
    sort_mode: SortMode,
    cursor: usize,
    in_flight: bool,
    feedback: Option<Feedback>,
    feedback_ttl: Duration,
    access: AccessLevel,
}

impl<L: MediaLibrary> ReviewSession<L> {
    pub fn new(library: L, ledger: ReviewLedger, store: ProgressStore, feedback_ttl: Duration) -> Self {
        Self {
            library,
            ledger,
            store,
            undo: UndoStack::new(),
            photos: Vec::new(),
            queue: Vec::new(),
            sort_mode: SortMode::default(),
            cursor: 0,
            in_flight: false,
            feedback: None,
            feedback_ttl,
            access: AccessLevel::Undetermined,
        }
    }

    // ── Lifecycle ──

    /// Check authorization and, when readable, load the photo set and
    /// restore the saved cursor. Without access this is a no-op: "needs
    /// access" is a persistent state the host resolves via
    /// [`request_access`](Self::request_access), not an error.
    pub async fn start(&mut self) -> Result<(), MediaError> {
        self.access = self.library.authorization();
        if self.access.can_read() {
            self.reload().await?;
        }
        Ok(())
    }

    /// Prompt for access and reload the photo set if it was granted.
    pub async fn request_access(&mut self) -> Result<AccessLevel, MediaError> {
        self.access = self.library.request_access().await;
        if self.access.can_read() {
            self.reload().await?;
        }
        Ok(self.access)
    }

    /// Flush progress to storage. Call at session end.
    pub fn finish(&mut self) {
        self.ledger.set_cursor(self.cursor);
        self.ledger.persist(&self.store);
    }

    async fn reload(&mut self) -> Result<(), MediaError> {
        self.photos = self.library.fetch_all().await?;
        self.queue = apply_sort(&self.photos, self.sort_mode);
        self.cursor = if self.queue.is_empty() {
            0
        } else {
            self.ledger.cursor().min(self.queue.len() - 1)
        };
        Ok(())
    }

    // ── Decisions ──

    /// Apply a keep/delete decision to the photo at the cursor. At most one
    /// mutation may be in flight; the session enforces this itself.
    pub async fn decide(&mut self, action: ReviewAction) -> Result<DecisionOutcome, SessionError> {
        if self.in_flight {
            return Err(SessionError::MutationInFlight);
        }
        let item = self
            .queue
            .get(self.cursor)
            .cloned()
            .ok_or(SessionError::NoCurrentItem)?;

        self.in_flight = true;
        let result = match action {
            ReviewAction::Delete => self.library.delete(&item).await,
            ReviewAction::Keep => self.library.toggle_favorite(&item).await,
        };
        self.in_flight = false;

        match result {
            Err(e) => {
                // Rejected mutations change nothing and show nothing.
                tracing::debug!("mutation rejected for {}: {e}", item.id);
                Ok(DecisionOutcome::Rejected)
            }
            Ok(()) => {
                self.undo.push(ActionLogEntry {
                    action,
                    item: item.clone(),
                    cursor: self.cursor,
                    timestamp: OffsetDateTime::now_utc(),
                });
                self.ledger.mark_reviewed(&item.id, action);
                match action {
                    ReviewAction::Delete => self.remove_item(&item.id),
                    ReviewAction::Keep => self.flip_favorite(&item.id),
                }
                self.advance_cursor();
                self.ledger.set_cursor(self.cursor);
                self.ledger.persist(&self.store);
                match action {
                    ReviewAction::Delete => {
                        self.show_feedback("Photo deleted", FeedbackTone::Negative)
                    }
                    ReviewAction::Keep => {
                        self.show_feedback("Marked as favorite", FeedbackTone::Positive)
                    }
                }
                Ok(DecisionOutcome::Applied)
            }
        }
    }

    /// Undo the most recent action. Deletions are irreversible: the entry
    /// is consumed and only a notification is surfaced.
    pub async fn undo(&mut self) -> Result<UndoOutcome, SessionError> {
        if self.in_flight {
            return Err(SessionError::MutationInFlight);
        }
        let entry = self.undo.pop_last().ok_or(SessionError::NothingToUndo)?;

        match entry.action {
            ReviewAction::Delete => {
                self.show_feedback("Deletion cannot be undone", FeedbackTone::Warning);
                Ok(UndoOutcome::DeleteIrreversible)
            }
            ReviewAction::Keep => {
                self.in_flight = true;
                let result = self.library.toggle_favorite(&entry.item).await;
                self.in_flight = false;

                match result {
                    Ok(()) => {
                        self.flip_favorite(&entry.item.id);
                        self.ledger.remove_review(&entry.item.id);
                        self.ledger.persist(&self.store);
                        self.show_feedback("Favorite removed", FeedbackTone::Info);
                        Ok(UndoOutcome::FavoriteCleared)
                    }
                    Err(e) => {
                        // The entry stays consumed; no retry.
                        tracing::debug!("undo rejected for {}: {e}", entry.item.id);
                        self.show_feedback("Undo failed", FeedbackTone::Warning);
                        Ok(UndoOutcome::UndoFailed)
                    }
                }
            }
        }
    }

    /// Clear all review progress and start over from the first photo.
    pub fn reset_progress(&mut self) {
        self.ledger.reset();
        self.cursor = 0;
        self.ledger.persist(&self.store);
    }

    // ── Queue and cursor ──

    /// Switch the queue ordering. Always resets the cursor to the start.
    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.sort_mode = mode;
        self.queue = apply_sort(&self.photos, mode);
        self.cursor = 0;
    }

    /// Mirror a confirmed favorite toggle into the local snapshots, the way
    /// the collaborator itself now sees the item.
    fn flip_favorite(&mut self, id: &str) {
        for item in self.photos.iter_mut().chain(self.queue.iter_mut()) {
            if item.id == id {
                item.favorite = !item.favorite;
            }
        }
    }

    fn remove_item(&mut self, id: &str) {
        self.photos.retain(|p| p.id != id);
        self.queue.retain(|p| p.id != id);
        if self.cursor >= self.queue.len() && self.cursor > 0 {
            self.cursor = self.queue.len().saturating_sub(1);
        }
    }

    fn advance_cursor(&mut self) {
        if self.queue.is_empty() {
            self.cursor = 0;
        } else if self.cursor + 1 < self.queue.len() {
            self.cursor += 1;
        } else {
            self.cursor = 0;
        }
    }

    // ── Observers ──

    pub fn state(&self) -> SessionState {
        if self.in_flight {
            SessionState::AwaitingMutation
        } else if self.feedback().is_some() {
            SessionState::Feedback
        } else {
            SessionState::Idle
        }
    }

    pub fn current(&self) -> Option<&MediaItem> {
        self.queue.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn queue(&self) -> &[MediaItem] {
        &self.queue
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    pub fn access(&self) -> AccessLevel {
        self.access
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// The live transient message, if any. Expired messages read as `None`.
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref().filter(|f| f.is_visible())
    }

    pub fn statistics(&self) -> ReviewStatistics {
        self.ledger.statistics()
    }

    pub fn progress(&self) -> ProgressSummary {
        self.ledger.progress(self.photos.len())
    }

    pub fn ledger(&self) -> &ReviewLedger {
        &self.ledger
    }

    /// Drain the absorbed persistence/sync outcomes recorded so far.
    pub fn take_store_events(&mut self) -> Vec<StoreEvent> {
        self.ledger.take_events()
    }

    /// Fetch a decoded image for the photo at the cursor.
    pub async fn load_current_image(
        &self,
        target_size: (u32, u32),
    ) -> Result<Option<DecodedImage>, MediaError> {
        match self.current() {
            Some(item) => self.library.load_image(item, target_size).await,
            None => Ok(None),
        }
    }

    fn show_feedback(&mut self, message: &str, tone: FeedbackTone) {
        self.feedback = Some(Feedback::new(message, tone, self.feedback_ttl));
    }
}
