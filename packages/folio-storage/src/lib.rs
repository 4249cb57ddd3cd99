pub mod collections;
pub mod db;
pub mod memory;
pub mod schema;
pub mod store;

mod error;

pub use error::Error;
pub use store::{BoxFuture, CollectionKind, DocumentKey, DocumentStore};

pub type Result<T, E = Error> = std::result::Result<T, E>;
