pub mod book;
pub mod relation;
pub mod user;

pub use book::{Book, BookUpdate, BookView, NewBook, Reader};
pub use relation::{RelationPatch, RelationUpsert, UserBookRelation};
pub use user::User;
