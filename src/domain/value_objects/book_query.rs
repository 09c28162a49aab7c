use rust_decimal::Decimal;
use std::cmp::Ordering;

use crate::domain::entities::Book;
use crate::shared::errors::{AppError, AppResult};

/// Fields the caller may order a listing by. The identifier is always the
/// stable tiebreak, and the default order on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderField {
    #[default]
    Id,
    Price,
    AuthorName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BookOrdering {
    pub field: OrderField,
    pub descending: bool,
}

impl BookOrdering {
    /// Parse an `ordering` query parameter: `price`, `-price`,
    /// `author_name`, `-author_name`. Anything else is a client error.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let (field_name, descending) = match raw.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (raw, false),
        };

        let field = match field_name {
            "price" => OrderField::Price,
            "author_name" => OrderField::AuthorName,
            _ => {
                return Err(AppError::ValidationError(format!(
                    "Cannot order by '{}'",
                    field_name
                )))
            }
        };

        Ok(Self { field, descending })
    }
}

/// Listing parameters: exact price filter, free-text search over name and
/// author, and ordering. The `matches`/`sort` helpers define the reference
/// semantics; the SQL repository mirrors them in the database.
#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    pub price: Option<Decimal>,
    pub search: Option<String>,
    pub ordering: BookOrdering,
}

impl BookQuery {
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(price) = self.price {
            if book.price != price {
                return false;
            }
        }
        if let Some(ref search) = self.search {
            let needle = search.to_lowercase();
            if !book.name.to_lowercase().contains(&needle)
                && !book.author_name.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }

    pub fn sort(&self, books: &mut [Book]) {
        let ordering = self.ordering;
        books.sort_by(|a, b| {
            let by_field = match ordering.field {
                OrderField::Id => Ordering::Equal,
                OrderField::Price => a.price.cmp(&b.price),
                OrderField::AuthorName => a.author_name.cmp(&b.author_name),
            };
            let by_field = if ordering.descending {
                by_field.reverse()
            } else {
                by_field
            };
            // Stable tiebreak on the identifier
            by_field.then(a.id.cmp(&b.id))
        });
    }
}
