use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Stable identifier assigned to a media item by the library collaborator.
pub type MediaItemId = String;

/// Snapshot of one photo as reported by the media library.
///
/// The core never mutates an item directly; deletions and favorite toggles
/// go through the collaborator, which hands back fresh snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaItem {
    pub id: MediaItemId,
    /// Capture time. Items without one sort last under chronological order.
    pub created_at: Option<OffsetDateTime>,
    pub favorite: bool,
    pub location: Option<GeoPoint>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// The decision taken on a reviewed photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
    Keep,
    Delete,
}

impl ReviewAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewAction::Keep => "keep",
            ReviewAction::Delete => "delete",
        }
    }

    /// Parse the persisted string form. Unknown values are dropped rather
    /// than failing the whole snapshot.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "keep" => Some(ReviewAction::Keep),
            "delete" => Some(ReviewAction::Delete),
            _ => None,
        }
    }
}

/// Authorization state reported by the media library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Granted,
    Limited,
    Denied,
    Undetermined,
}

impl AccessLevel {
    /// Whether the photo set can be enumerated at all.
    pub fn can_read(&self) -> bool {
        matches!(self, AccessLevel::Granted | AccessLevel::Limited)
    }
}

/// Serialized review progress. The local progress file and the remote sync
/// snapshot share this schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSnapshot {
    pub reviewed_photos: Vec<String>,
    pub photo_actions: BTreeMap<String, ReviewAction>,
    pub last_reviewed_index: usize,
    /// RFC 3339 timestamp of the last local edit.
    pub last_updated: String,
}

impl ProgressSnapshot {
    /// Parse `last_updated`; malformed timestamps compare as the epoch so a
    /// corrupt remote snapshot can never win reconciliation.
    pub fn last_updated_time(&self) -> OffsetDateTime {
        parse_rfc3339(&self.last_updated)
    }
}

/// Aggregate counts over the review ledger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReviewStatistics {
    pub total_reviewed: usize,
    pub deleted_count: usize,
    pub kept_count: usize,
    /// `deleted / total`, or 0.0 for an empty ledger.
    pub deletion_rate: f64,
}

/// How far the user is through the current photo set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub reviewed: usize,
    pub total: usize,
    pub percentage: f64,
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .expect("RFC3339 formatting should not fail")
}

pub fn format_rfc3339(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339)
        .expect("RFC3339 formatting should not fail")
}

/// Lenient parse: anything unreadable becomes the epoch.
pub fn parse_rfc3339(s: &str) -> OffsetDateTime {
    OffsetDateTime::parse(s, &Rfc3339).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_action_string_forms() {
        assert_eq!(ReviewAction::Keep.as_str(), "keep");
        assert_eq!(ReviewAction::Delete.as_str(), "delete");
        assert_eq!(ReviewAction::parse("keep"), Some(ReviewAction::Keep));
        assert_eq!(ReviewAction::parse("delete"), Some(ReviewAction::Delete));
        assert_eq!(ReviewAction::parse("archived"), None);
    }

    #[test]
    fn review_action_serde_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReviewAction::Delete).unwrap(),
            "\"delete\""
        );
        let parsed: ReviewAction = serde_json::from_str("\"keep\"").unwrap();
        assert_eq!(parsed, ReviewAction::Keep);
    }

    #[test]
    fn snapshot_uses_camel_case_field_names() {
        let snap = ProgressSnapshot {
            reviewed_photos: vec!["a".into()],
            photo_actions: [("a".to_string(), ReviewAction::Keep)].into_iter().collect(),
            last_reviewed_index: 3,
            last_updated: "2026-08-01T10:00:00Z".into(),
        };
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["reviewedPhotos"][0], "a");
        assert_eq!(json["photoActions"]["a"], "keep");
        assert_eq!(json["lastReviewedIndex"], 3);
        assert_eq!(json["lastUpdated"], "2026-08-01T10:00:00Z");
    }

    #[test]
    fn snapshot_roundtrips() {
        let snap = ProgressSnapshot {
            reviewed_photos: vec!["a".into(), "b".into()],
            photo_actions: [
                ("a".to_string(), ReviewAction::Keep),
                ("b".to_string(), ReviewAction::Delete),
            ]
            .into_iter()
            .collect(),
            last_reviewed_index: 1,
            last_updated: now_rfc3339(),
        };
        let json = serde_json::to_string(&snap).unwrap();
        let restored: ProgressSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, snap);
    }

    #[test]
    fn malformed_last_updated_parses_as_epoch() {
        let snap = ProgressSnapshot {
            reviewed_photos: Vec::new(),
            photo_actions: BTreeMap::new(),
            last_reviewed_index: 0,
            last_updated: "not-a-timestamp".into(),
        };
        assert_eq!(snap.last_updated_time(), OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn rfc3339_roundtrip_preserves_ordering() {
        let earlier = parse_rfc3339("2026-08-01T10:00:00Z");
        let later = parse_rfc3339("2026-08-01T10:00:01Z");
        assert!(later > earlier);
        assert_eq!(format_rfc3339(earlier), "2026-08-01T10:00:00Z");
    }

    #[test]
    fn access_levels_that_allow_reading() {
        assert!(AccessLevel::Granted.can_read());
        assert!(AccessLevel::Limited.can_read());
        assert!(!AccessLevel::Denied.can_read());
        assert!(!AccessLevel::Undetermined.can_read());
    }
}
