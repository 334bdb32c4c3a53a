//! Ordering pipeline: raw photo set + sort mode → review queue.

use crate::types::MediaItem;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

/// How the review queue is ordered. Exactly one mode is active at a time;
/// callers reset the navigation cursor whenever the mode changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortMode {
    /// Uniform shuffle of the full photo set.
    Random,
    /// Newest first; items without a capture time sort last.
    #[default]
    Chronological,
    /// Only favorites, keeping their incoming order. A filter rather than a
    /// true order: the collaborator already returns items newest-first.
    FavoritesOnly,
}

/// Apply a sort mode to the raw photo set, yielding the review queue.
/// Deterministic except under [`SortMode::Random`]. Empty in, empty out.
pub fn apply_sort(items: &[MediaItem], mode: SortMode) -> Vec<MediaItem> {
    match mode {
        SortMode::Random => {
            let mut shuffled = items.to_vec();
            shuffled.shuffle(&mut rand::thread_rng());
            shuffled
        }
        SortMode::Chronological => {
            let mut sorted = items.to_vec();
            // Stable sort; None < Some(_), so undated items end up last.
            sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            sorted
        }
        SortMode::FavoritesOnly => items.iter().filter(|i| i.favorite).cloned().collect(),
    }
}
