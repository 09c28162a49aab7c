use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::repositories::{BookRepository, RelationRepository};
use crate::log_debug;
use crate::shared::errors::AppResult;

/// Maintains the derived `rating` column on books.
///
/// Recomputation always reads the full persisted relation set, so calling it
/// redundantly is harmless: the same relations produce the same stored value.
#[derive(Clone)]
pub struct RatingAggregator {
    books: Arc<dyn BookRepository>,
    relations: Arc<dyn RelationRepository>,
}

impl RatingAggregator {
    pub fn new(books: Arc<dyn BookRepository>, relations: Arc<dyn RelationRepository>) -> Self {
        Self { books, relations }
    }

    /// Recompute the book's mean rating from its relations and persist it.
    /// Books without any rated relation store no rating at all.
    pub async fn recompute(&self, book_id: i32) -> AppResult<Option<Decimal>> {
        let rates = self.relations.rates_for_book(book_id).await?;
        let rating = mean_rate(&rates);

        self.books.set_rating(book_id, rating).await?;
        log_debug!(
            "Recomputed rating for book {}: {:?} ({} rated relations)",
            book_id,
            rating,
            rates.len()
        );

        Ok(rating)
    }
}

/// Arithmetic mean of the given rates at two decimal places, `None` when
/// there is nothing to average.
pub fn mean_rate(rates: &[i16]) -> Option<Decimal> {
    if rates.is_empty() {
        return None;
    }

    let sum: i64 = rates.iter().map(|rate| i64::from(*rate)).sum();
    let mut mean = Decimal::from(sum) / Decimal::from(rates.len() as i64);
    mean.rescale(2);
    Some(mean)
}
