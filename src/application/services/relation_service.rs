use std::sync::Arc;

use crate::domain::entities::{RelationPatch, User, UserBookRelation};
use crate::domain::repositories::{BookRepository, RelationRepository};
use crate::domain::services::RatingAggregator;
use crate::log_debug;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

/// Maintains per-user book relations and keeps the derived rating in step.
pub struct RelationService {
    books: Arc<dyn BookRepository>,
    relations: Arc<dyn RelationRepository>,
    aggregator: RatingAggregator,
}

impl RelationService {
    pub fn new(books: Arc<dyn BookRepository>, relations: Arc<dyn RelationRepository>) -> Self {
        let aggregator = RatingAggregator::new(Arc::clone(&books), Arc::clone(&relations));
        Self {
            books,
            relations,
            aggregator,
        }
    }

    /// Upsert the caller's relation to a book and recompute the book's
    /// stored rating when the write changed its rate. Like/bookmark-only
    /// changes skip recomputation; that is an optimization, recomputing
    /// would land on the same value.
    pub async fn set_relation(
        &self,
        current_user: &User,
        book_id: i32,
        patch: RelationPatch,
    ) -> AppResult<UserBookRelation> {
        if let Some(Some(rate)) = patch.rate {
            Validator::validate_rate(rate)?;
        }

        if self.books.find_by_id(book_id).await?.is_none() {
            return Err(AppError::NotFound(format!(
                "Book with id {} not found",
                book_id
            )));
        }

        let outcome = self
            .relations
            .upsert(current_user.id, book_id, patch)
            .await?;

        if outcome.rate_changed() {
            self.aggregator.recompute(book_id).await?;
        } else {
            log_debug!(
                "Relation write for book {} left the rate at {:?}, skipping recompute",
                book_id,
                outcome.relation.rate
            );
        }

        Ok(outcome.relation)
    }
}
