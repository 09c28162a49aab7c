use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use rust_decimal::Decimal;
use tokio::task;

use crate::domain::entities::{Book, BookUpdate, BookView, NewBook, Reader};
use crate::domain::repositories::BookRepository;
use crate::domain::services::book_annotator::{annotate, AnnotationRow};
use crate::domain::value_objects::{BookQuery, OrderField};
use crate::infrastructure::database::models::{BookChangeset, BookModel, NewBookModel};
use crate::schema::{books, user_book_relations, users};
use crate::shared::database::{Database, DbConnection};
use crate::shared::errors::{AppError, AppResult};

pub struct BookRepositoryImpl {
    db: Arc<Database>,
}

impl BookRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Relation rows joined with their users for the given books, ordered so
    /// the reader roster comes out by user id.
    fn load_annotation_rows(
        conn: &mut DbConnection,
        book_ids: &[i32],
    ) -> AppResult<Vec<AnnotationRow>> {
        let rows: Vec<(i32, bool, i32, String, String)> = user_book_relations::table
            .inner_join(users::table)
            .filter(user_book_relations::book_id.eq_any(book_ids.to_vec()))
            .order((user_book_relations::book_id.asc(), users::id.asc()))
            .select((
                user_book_relations::book_id,
                user_book_relations::is_liked,
                users::id,
                users::first_name,
                users::last_name,
            ))
            .load(conn)?;

        Ok(rows
            .into_iter()
            .map(|(book_id, is_liked, id, first_name, last_name)| AnnotationRow {
                book_id,
                is_liked,
                reader: Reader {
                    id,
                    first_name,
                    last_name,
                },
            })
            .collect())
    }

    fn views_for(
        conn: &mut DbConnection,
        rows: Vec<(BookModel, Option<String>)>,
    ) -> AppResult<Vec<BookView>> {
        let book_ids: Vec<i32> = rows.iter().map(|(book, _)| book.id).collect();
        let relations = Self::load_annotation_rows(conn, &book_ids)?;

        let books = rows
            .into_iter()
            .map(|(model, owner_name)| (Book::from(model), owner_name))
            .collect();
        Ok(annotate(books, &relations))
    }
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn create(&self, book: NewBook) -> AppResult<Book> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<BookModel> {
            let mut conn = db.get_connection()?;
            let row = diesel::insert_into(books::table)
                .values(NewBookModel {
                    name: book.name,
                    price: book.price,
                    author_name: book.author_name,
                    owner_id: book.owner_id,
                    discount: book.discount,
                })
                .get_result::<BookModel>(&mut conn)?;
            Ok(row)
        })
        .await??;

        Ok(model.into())
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<Option<BookModel>> {
            let mut conn = db.get_connection()?;
            let row = books::table
                .find(id)
                .first::<BookModel>(&mut conn)
                .optional()?;
            Ok(row)
        })
        .await??;

        Ok(model.map(Book::from))
    }

    async fn update(&self, id: i32, changes: BookUpdate) -> AppResult<Book> {
        let db = Arc::clone(&self.db);

        let model = task::spawn_blocking(move || -> AppResult<BookModel> {
            let mut conn = db.get_connection()?;
            let row = diesel::update(books::table.find(id))
                .set(BookChangeset {
                    name: changes.name,
                    price: changes.price,
                    author_name: changes.author_name,
                    discount: changes.discount,
                    updated_at: Utc::now(),
                })
                .get_result::<BookModel>(&mut conn)
                .map_err(|e| match e {
                    diesel::result::Error::NotFound => {
                        AppError::NotFound(format!("Book with id {} not found", id))
                    }
                    other => other.into(),
                })?;
            Ok(row)
        })
        .await??;

        Ok(model.into())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            let n = diesel::delete(books::table.find(id)).execute(&mut conn)?;
            if n == 0 {
                return Err(AppError::NotFound(format!("Book with id {} not found", id)));
            }
            Ok(())
        })
        .await?
    }

    async fn set_rating(&self, id: i32, rating: Option<Decimal>) -> AppResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<()> {
            let mut conn = db.get_connection()?;
            let n = diesel::update(books::table.find(id))
                .set(books::rating.eq(rating))
                .execute(&mut conn)?;
            if n == 0 {
                return Err(AppError::NotFound(format!("Book with id {} not found", id)));
            }
            Ok(())
        })
        .await?
    }

    async fn list_views(&self, query: &BookQuery) -> AppResult<Vec<BookView>> {
        let db = Arc::clone(&self.db);
        let query = query.clone();

        task::spawn_blocking(move || -> AppResult<Vec<BookView>> {
            let mut conn = db.get_connection()?;

            let mut q = books::table
                .left_join(users::table)
                .select((books::all_columns, users::username.nullable()))
                .into_boxed();

            if let Some(price) = query.price {
                q = q.filter(books::price.eq(price));
            }
            if let Some(ref search) = query.search {
                let pattern = format!("%{}%", search);
                q = q.filter(
                    books::name
                        .ilike(pattern.clone())
                        .or(books::author_name.ilike(pattern)),
                );
            }

            q = match (query.ordering.field, query.ordering.descending) {
                (OrderField::Id, false) => q.order(books::id.asc()),
                (OrderField::Id, true) => q.order(books::id.desc()),
                (OrderField::Price, false) => q.order(books::price.asc()),
                (OrderField::Price, true) => q.order(books::price.desc()),
                (OrderField::AuthorName, false) => q.order(books::author_name.asc()),
                (OrderField::AuthorName, true) => q.order(books::author_name.desc()),
            };
            // Stable tiebreak on the identifier
            q = q.then_order_by(books::id.asc());

            let rows: Vec<(BookModel, Option<String>)> = q.load(&mut conn)?;
            Self::views_for(&mut conn, rows)
        })
        .await?
    }

    async fn find_view(&self, id: i32) -> AppResult<Option<BookView>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> AppResult<Option<BookView>> {
            let mut conn = db.get_connection()?;

            let row: Option<(BookModel, Option<String>)> = books::table
                .left_join(users::table)
                .filter(books::id.eq(id))
                .select((books::all_columns, users::username.nullable()))
                .first(&mut conn)
                .optional()?;

            match row {
                Some(row) => Ok(Self::views_for(&mut conn, vec![row])?.into_iter().next()),
                None => Ok(None),
            }
        })
        .await?
    }
}
