pub mod book_query;

pub use book_query::{BookOrdering, BookQuery, OrderField};
