use rust_decimal::Decimal;
use std::sync::Arc;

use crate::domain::entities::{Book, BookUpdate, BookView, NewBook, User};
use crate::domain::repositories::BookRepository;
use crate::domain::value_objects::BookQuery;
use crate::log_info;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;

pub struct BookService {
    books: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookRepository>) -> Self {
        Self { books }
    }

    pub async fn list_books(&self, query: BookQuery) -> AppResult<Vec<BookView>> {
        self.books.list_views(&query).await
    }

    pub async fn get_book(&self, id: i32) -> AppResult<BookView> {
        self.books
            .find_view(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Create a book owned by the caller.
    pub async fn create_book(
        &self,
        current_user: &User,
        name: String,
        price: Decimal,
        author_name: String,
        discount: Option<Decimal>,
    ) -> AppResult<BookView> {
        Validator::validate_book_name(&name)?;
        Validator::validate_author_name(&author_name)?;
        Validator::validate_price(price)?;

        let discount = discount.unwrap_or(Decimal::ZERO);
        Validator::validate_discount(discount)?;

        let book = self
            .books
            .create(NewBook {
                name,
                price: two_decimals(price),
                author_name,
                owner_id: Some(current_user.id),
                discount: two_decimals(discount),
            })
            .await?;

        log_info!("User {} created book {}", current_user.id, book.id);
        self.get_book(book.id).await
    }

    /// Full update; only the owner or staff may write.
    pub async fn update_book(
        &self,
        current_user: &User,
        id: i32,
        name: String,
        price: Decimal,
        author_name: String,
        discount: Option<Decimal>,
    ) -> AppResult<BookView> {
        let book = self.require_writable(current_user, id).await?;

        Validator::validate_book_name(&name)?;
        Validator::validate_author_name(&author_name)?;
        Validator::validate_price(price)?;
        if let Some(discount) = discount {
            Validator::validate_discount(discount)?;
        }

        self.books
            .update(
                book.id,
                BookUpdate {
                    name,
                    price: two_decimals(price),
                    author_name,
                    discount: discount.map(two_decimals),
                },
            )
            .await?;

        self.get_book(id).await
    }

    pub async fn delete_book(&self, current_user: &User, id: i32) -> AppResult<()> {
        let book = self.require_writable(current_user, id).await?;
        self.books.delete(book.id).await?;
        log_info!("User {} deleted book {}", current_user.id, id);
        Ok(())
    }

    /// Load the book and enforce "owner or staff may write" before any
    /// mutation happens.
    async fn require_writable(&self, current_user: &User, id: i32) -> AppResult<Book> {
        let book = self
            .books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if !current_user.can_modify(book.owner_id) {
            return Err(AppError::Forbidden(
                "Only the owner or staff may modify this book".to_string(),
            ));
        }

        Ok(book)
    }
}

fn two_decimals(mut value: Decimal) -> Decimal {
    value.rescale(2);
    value
}
