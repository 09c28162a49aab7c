pub mod book_service;
pub mod relation_service;

pub use book_service::BookService;
pub use relation_service::RelationService;
