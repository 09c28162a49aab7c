use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::entities::{Book, BookUpdate, BookView, NewBook};
use crate::domain::value_objects::BookQuery;
use crate::shared::errors::AppResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn create(&self, book: NewBook) -> AppResult<Book>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    /// Full update; returns the updated row. NotFound when the id is gone.
    async fn update(&self, id: i32, changes: BookUpdate) -> AppResult<Book>;

    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Overwrite the stored rating. Only the rating aggregator calls this.
    async fn set_rating(&self, id: i32, rating: Option<Decimal>) -> AppResult<()>;

    /// Annotated listing: filtered, searched and ordered per the query.
    async fn list_views(&self, query: &BookQuery) -> AppResult<Vec<BookView>>;

    /// Annotated detail for a single book.
    async fn find_view(&self, id: i32) -> AppResult<Option<BookView>>;
}
