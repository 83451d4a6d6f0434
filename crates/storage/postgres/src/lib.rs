mod error;
pub use error::PostgresStorageError;

mod postgres;
pub use postgres::PostgresStorage;
