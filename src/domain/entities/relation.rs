use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user's relationship to one book: liked, bookmarked, rated.
/// Unique per (user, book); created lazily on first interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserBookRelation {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub is_liked: bool,
    pub is_bookmarked: bool,
    pub rate: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied on relation upsert.
///
/// `None` leaves a field untouched. For `rate` the outer option tracks
/// whether the field was supplied at all, so `Some(None)` clears an existing
/// rating while `None` keeps it.
#[derive(Debug, Clone, Default)]
pub struct RelationPatch {
    pub is_liked: Option<bool>,
    pub is_bookmarked: Option<bool>,
    pub rate: Option<Option<i16>>,
}

impl RelationPatch {
    /// The rate the relation will carry after applying this patch on top of
    /// `current`.
    pub fn rate_after(&self, current: Option<i16>) -> Option<i16> {
        match self.rate {
            Some(new_rate) => new_rate,
            None => current,
        }
    }
}

/// Outcome of a relation upsert. `previous_rate` is the rate the row carried
/// before this write (always `None` for a fresh row); the caller compares it
/// against the persisted rate to decide whether the book's stored rating
/// must be recomputed.
#[derive(Debug, Clone)]
pub struct RelationUpsert {
    pub relation: UserBookRelation,
    pub previous_rate: Option<i16>,
    pub created: bool,
}

impl RelationUpsert {
    /// True when this write changed the effective rating input: a new row,
    /// or an existing row whose rate differs from before.
    pub fn rate_changed(&self) -> bool {
        self.created || self.previous_rate != self.relation.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upsert(created: bool, previous: Option<i16>, current: Option<i16>) -> RelationUpsert {
        RelationUpsert {
            relation: UserBookRelation {
                id: 1,
                user_id: 1,
                book_id: 1,
                is_liked: false,
                is_bookmarked: false,
                rate: current,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            previous_rate: previous,
            created,
        }
    }

    #[test]
    fn test_fresh_row_counts_as_rate_change() {
        assert!(upsert(true, None, None).rate_changed());
        assert!(upsert(true, None, Some(5)).rate_changed());
    }

    #[test]
    fn test_same_rate_is_not_a_change() {
        assert!(!upsert(false, Some(4), Some(4)).rate_changed());
        assert!(!upsert(false, None, None).rate_changed());
    }

    #[test]
    fn test_rate_transitions_are_changes() {
        assert!(upsert(false, Some(4), Some(5)).rate_changed());
        assert!(upsert(false, None, Some(3)).rate_changed());
        assert!(upsert(false, Some(3), None).rate_changed());
    }

    #[test]
    fn test_patch_rate_after() {
        let keep = RelationPatch::default();
        assert_eq!(keep.rate_after(Some(4)), Some(4));

        let clear = RelationPatch {
            rate: Some(None),
            ..Default::default()
        };
        assert_eq!(clear.rate_after(Some(4)), None);

        let set = RelationPatch {
            rate: Some(Some(2)),
            ..Default::default()
        };
        assert_eq!(set.rate_after(None), Some(2));
    }
}
