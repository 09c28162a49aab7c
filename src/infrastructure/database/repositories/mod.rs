pub mod book_repository_impl;
pub mod relation_repository_impl;
pub mod user_repository_impl;

pub use book_repository_impl::BookRepositoryImpl;
pub use relation_repository_impl::RelationRepositoryImpl;
pub use user_repository_impl::UserRepositoryImpl;
