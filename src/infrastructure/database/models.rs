use crate::schema::{books, user_book_relations, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;

use crate::domain::entities::{Book, User, UserBookRelation};

// ============= BOOK MODELS =============

// For reading from database
#[derive(Queryable, Identifiable, Debug, Clone)]
#[diesel(table_name = books)]
pub struct BookModel {
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

// For inserting new books
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = books)]
pub struct NewBookModel {
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    pub owner_id: Option<i32>,
    pub discount: Decimal,
}

// For updating existing books (excludes id, owner and derived rating)
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = books)]
pub struct BookChangeset {
    pub name: String,
    pub price: Decimal,
    pub author_name: String,
    pub discount: Option<Decimal>,
    pub updated_at: DateTime<Utc>,
}

impl From<BookModel> for Book {
    fn from(model: BookModel) -> Self {
        Book {
            id: model.id,
            name: model.name,
            price: model.price,
            author_name: model.author_name,
            owner_id: model.owner_id,
            discount: model.discount,
            rating: model.rating,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

// ============= USER MODEL =============

#[derive(Queryable, Identifiable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct UserModel {
    pub id: i32,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            username: model.username,
            first_name: model.first_name,
            last_name: model.last_name,
            is_staff: model.is_staff,
            created_at: model.created_at,
        }
    }
}

// ============= USER-BOOK RELATION MODELS =============

#[derive(Queryable, Identifiable, Associations, Debug, Clone)]
#[diesel(belongs_to(UserModel, foreign_key = user_id))]
#[diesel(belongs_to(BookModel, foreign_key = book_id))]
#[diesel(table_name = user_book_relations)]
pub struct RelationModel {
    pub id: i32,
    pub user_id: i32,
    pub book_id: i32,
    pub is_liked: bool,
    pub is_bookmarked: bool,
    pub rate: Option<i16>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// For inserting new relations; relies on UNIQUE (user_id, book_id) in DB
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = user_book_relations)]
pub struct NewRelationModel {
    pub user_id: i32,
    pub book_id: i32,
    pub is_liked: bool,
    pub is_bookmarked: bool,
    pub rate: Option<i16>,
}

impl From<RelationModel> for UserBookRelation {
    fn from(model: RelationModel) -> Self {
        UserBookRelation {
            id: model.id,
            user_id: model.user_id,
            book_id: model.book_id,
            is_liked: model.is_liked,
            is_bookmarked: model.is_bookmarked,
            rate: model.rate,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
