/// In-memory repository implementations backing the API integration tests.
///
/// They reuse the same annotation and query helpers as the SQL
/// implementations, so filtering, ordering and aggregation semantics match
/// what the database-backed repositories produce.
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;

use bookshelf::domain::entities::{
    Book, BookUpdate, BookView, NewBook, Reader, RelationPatch, RelationUpsert, User,
    UserBookRelation,
};
use bookshelf::domain::repositories::{BookRepository, RelationRepository, UserRepository};
use bookshelf::domain::services::book_annotator::{annotate, AnnotationRow};
use bookshelf::domain::value_objects::BookQuery;
use bookshelf::shared::errors::{AppError, AppResult};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<i32, User>,
    books: BTreeMap<i32, Book>,
    relations: Vec<UserBookRelation>,
    next_user_id: i32,
    next_book_id: i32,
    next_relation_id: i32,
}

impl MemoryStore {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("store poisoned")
    }

    pub fn add_user(&self, username: &str, first_name: &str, last_name: &str, is_staff: bool) -> User {
        let mut inner = self.lock();
        inner.next_user_id += 1;
        let user = User {
            id: inner.next_user_id,
            username: username.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            is_staff,
            created_at: Utc::now(),
        };
        inner.users.insert(user.id, user.clone());
        user
    }

    pub fn add_book(
        &self,
        name: &str,
        price: &str,
        author_name: &str,
        owner_id: Option<i32>,
        discount: &str,
    ) -> Book {
        let mut inner = self.lock();
        inner.next_book_id += 1;
        let mut price: Decimal = price.parse().expect("bad price literal");
        price.rescale(2);
        let mut discount: Decimal = discount.parse().expect("bad discount literal");
        discount.rescale(2);
        let book = Book {
            id: inner.next_book_id,
            name: name.to_string(),
            price,
            author_name: author_name.to_string(),
            owner_id,
            discount,
            rating: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        inner.books.insert(book.id, book.clone());
        book
    }

    pub fn add_relation(
        &self,
        user_id: i32,
        book_id: i32,
        is_liked: bool,
        rate: Option<i16>,
    ) -> UserBookRelation {
        let mut inner = self.lock();
        inner.next_relation_id += 1;
        let relation = UserBookRelation {
            id: inner.next_relation_id,
            user_id,
            book_id,
            is_liked,
            is_bookmarked: false,
            rate,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        inner.relations.push(relation.clone());
        relation
    }

    pub fn book(&self, id: i32) -> Option<Book> {
        self.lock().books.get(&id).cloned()
    }

    pub fn relation(&self, user_id: i32, book_id: i32) -> Option<UserBookRelation> {
        self.lock()
            .relations
            .iter()
            .find(|r| r.user_id == user_id && r.book_id == book_id)
            .cloned()
    }
}

fn views(inner: &Inner, books: Vec<Book>) -> Vec<BookView> {
    let with_owner = books
        .into_iter()
        .map(|book| {
            let owner_name = book
                .owner_id
                .and_then(|id| inner.users.get(&id))
                .map(|user| user.username.clone());
            (book, owner_name)
        })
        .collect();

    let rows: Vec<AnnotationRow> = inner
        .relations
        .iter()
        .filter_map(|relation| {
            inner.users.get(&relation.user_id).map(|user| AnnotationRow {
                book_id: relation.book_id,
                is_liked: relation.is_liked,
                reader: Reader {
                    id: user.id,
                    first_name: user.first_name.clone(),
                    last_name: user.last_name.clone(),
                },
            })
        })
        .collect();

    annotate(with_owner, &rows)
}

pub struct MemoryBookRepository(pub Arc<MemoryStore>);

#[async_trait]
impl BookRepository for MemoryBookRepository {
    async fn create(&self, book: NewBook) -> AppResult<Book> {
        let mut inner = self.0.lock();
        inner.next_book_id += 1;
        let created = Book {
            id: inner.next_book_id,
            name: book.name,
            price: book.price,
            author_name: book.author_name,
            owner_id: book.owner_id,
            discount: book.discount,
            rating: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        inner.books.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        Ok(self.0.lock().books.get(&id).cloned())
    }

    async fn update(&self, id: i32, changes: BookUpdate) -> AppResult<Book> {
        let mut inner = self.0.lock();
        let book = inner
            .books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        book.name = changes.name;
        book.price = changes.price;
        book.author_name = changes.author_name;
        if let Some(discount) = changes.discount {
            book.discount = discount;
        }
        book.updated_at = Utc::now();
        Ok(book.clone())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let mut inner = self.0.lock();
        if inner.books.remove(&id).is_none() {
            return Err(AppError::NotFound(format!("Book with id {} not found", id)));
        }
        // matches ON DELETE CASCADE on the relations table
        inner.relations.retain(|relation| relation.book_id != id);
        Ok(())
    }

    async fn set_rating(&self, id: i32, rating: Option<Decimal>) -> AppResult<()> {
        let mut inner = self.0.lock();
        let book = inner
            .books
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;
        book.rating = rating;
        Ok(())
    }

    async fn list_views(&self, query: &BookQuery) -> AppResult<Vec<BookView>> {
        let inner = self.0.lock();
        let mut books: Vec<Book> = inner
            .books
            .values()
            .filter(|book| query.matches(book))
            .cloned()
            .collect();
        query.sort(&mut books);
        Ok(views(&inner, books))
    }

    async fn find_view(&self, id: i32) -> AppResult<Option<BookView>> {
        let inner = self.0.lock();
        let book = match inner.books.get(&id) {
            Some(book) => book.clone(),
            None => return Ok(None),
        };
        Ok(views(&inner, vec![book]).into_iter().next())
    }
}

pub struct MemoryRelationRepository(pub Arc<MemoryStore>);

#[async_trait]
impl RelationRepository for MemoryRelationRepository {
    async fn upsert(
        &self,
        user_id: i32,
        book_id: i32,
        patch: RelationPatch,
    ) -> AppResult<RelationUpsert> {
        let mut inner = self.0.lock();

        if let Some(relation) = inner
            .relations
            .iter_mut()
            .find(|r| r.user_id == user_id && r.book_id == book_id)
        {
            let previous_rate = relation.rate;
            if let Some(is_liked) = patch.is_liked {
                relation.is_liked = is_liked;
            }
            if let Some(is_bookmarked) = patch.is_bookmarked {
                relation.is_bookmarked = is_bookmarked;
            }
            relation.rate = patch.rate_after(previous_rate);
            relation.updated_at = Utc::now();
            return Ok(RelationUpsert {
                relation: relation.clone(),
                previous_rate,
                created: false,
            });
        }

        inner.next_relation_id += 1;
        let relation = UserBookRelation {
            id: inner.next_relation_id,
            user_id,
            book_id,
            is_liked: patch.is_liked.unwrap_or(false),
            is_bookmarked: patch.is_bookmarked.unwrap_or(false),
            rate: patch.rate_after(None),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        inner.relations.push(relation.clone());
        Ok(RelationUpsert {
            relation,
            previous_rate: None,
            created: true,
        })
    }

    async fn rates_for_book(&self, book_id: i32) -> AppResult<Vec<i16>> {
        Ok(self
            .0
            .lock()
            .relations
            .iter()
            .filter(|relation| relation.book_id == book_id)
            .filter_map(|relation| relation.rate)
            .collect())
    }
}

pub struct MemoryUserRepository(pub Arc<MemoryStore>);

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_id(&self, id: i32) -> AppResult<Option<User>> {
        Ok(self.0.lock().users.get(&id).cloned())
    }
}
