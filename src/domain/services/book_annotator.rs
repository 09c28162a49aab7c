use rust_decimal::Decimal;

use crate::domain::entities::{Book, BookView, Reader};

/// One relation row joined with its user, reduced to what annotation needs.
#[derive(Debug, Clone)]
pub struct AnnotationRow {
    pub book_id: i32,
    pub is_liked: bool,
    pub reader: Reader,
}

/// Merge book rows with their relation rows into served views.
///
/// `books` arrives already filtered and ordered (the caller owns those
/// semantics); each entry carries the owner's username when the book has an
/// owner. Likes are counted per book, the reader roster is the distinct set
/// of related users ordered by id, and the discounted price is plain decimal
/// subtraction at price precision.
pub fn annotate(books: Vec<(Book, Option<String>)>, relations: &[AnnotationRow]) -> Vec<BookView> {
    books
        .into_iter()
        .map(|(book, owner_name)| {
            let likes_count = relations
                .iter()
                .filter(|row| row.book_id == book.id && row.is_liked)
                .count() as i64;

            let mut readers: Vec<Reader> = relations
                .iter()
                .filter(|row| row.book_id == book.id)
                .map(|row| row.reader.clone())
                .collect();
            readers.sort_by_key(|reader| reader.id);
            readers.dedup_by_key(|reader| reader.id);

            let mut discounted_price = book.price - book.discount;
            discounted_price.rescale(2);

            BookView {
                id: book.id,
                name: book.name,
                price: two_decimals(book.price),
                author_name: book.author_name,
                likes_count,
                rating: book.rating.map(two_decimals),
                discounted_price,
                owner_name,
                readers,
            }
        })
        .collect()
}

fn two_decimals(mut value: Decimal) -> Decimal {
    value.rescale(2);
    value
}
