use async_trait::async_trait;

use crate::domain::entities::{RelationPatch, RelationUpsert};
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationRepository: Send + Sync {
    /// Get-or-create the (user, book) row, apply the patch, and report the
    /// rate the row carried before the write. Runs in one transaction.
    async fn upsert(
        &self,
        user_id: i32,
        book_id: i32,
        patch: RelationPatch,
    ) -> AppResult<RelationUpsert>;

    /// All non-null rates currently attached to the book.
    async fn rates_for_book(&self, book_id: i32) -> AppResult<Vec<i16>>;
}
