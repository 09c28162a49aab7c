pub mod auth;
pub mod dto;
pub mod handlers;

use axum::routing::{get, patch};
use axum::Router;
use std::sync::Arc;

use crate::application::services::{BookService, RelationService};
use crate::domain::repositories::{BookRepository, RelationRepository, UserRepository};
use crate::infrastructure::database::repositories::{
    BookRepositoryImpl, RelationRepositoryImpl, UserRepositoryImpl,
};
use crate::shared::database::Database;

#[derive(Clone)]
pub struct AppState {
    pub books: Arc<BookService>,
    pub relations: Arc<RelationService>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        book_repo: Arc<dyn BookRepository>,
        relation_repo: Arc<dyn RelationRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            books: Arc::new(BookService::new(Arc::clone(&book_repo))),
            relations: Arc::new(RelationService::new(book_repo, relation_repo)),
            users: user_repo,
        }
    }

    pub fn from_database(db: Arc<Database>) -> Self {
        Self::new(
            Arc::new(BookRepositoryImpl::new(Arc::clone(&db))),
            Arc::new(RelationRepositoryImpl::new(Arc::clone(&db))),
            Arc::new(UserRepositoryImpl::new(db)),
        )
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/books/{id}",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .route("/books/{id}/relation", patch(handlers::set_relation))
        .with_state(state)
}
