use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum PostgresStorageError {
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}
