use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A book as stored in the catalog.
///
/// `rating` is derived state: it always holds the mean of the non-null rates
/// of the book's relations (two decimal places), or `None` when nothing has
/// been rated yet. It is maintained by the rating aggregator and never
/// written directly by CRUD operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    pub owner_id: Option<i32>,
    pub discount: Decimal,
    pub rating: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields accepted when creating a book. The owner is always the
/// authenticated caller, never client-supplied.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    pub owner_id: Option<i32>,
    pub discount: Decimal,
}

/// Fields accepted on a full book update. `discount` keeps its stored value
/// when not supplied.
#[derive(Debug, Clone)]
pub struct BookUpdate {
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    pub discount: Option<Decimal>,
}

/// One entry of a book's reader roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reader {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}

/// Read model served by list/detail endpoints: a book plus its computed
/// aggregate fields. Built by the annotation step, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookView {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    pub likes_count: i64,
    pub rating: Option<Decimal>,
    pub discounted_price: Decimal,
    pub owner_name: Option<String>,
    pub readers: Vec<Reader>,
}
