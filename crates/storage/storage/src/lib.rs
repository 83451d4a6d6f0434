pub mod storage;
pub use storage::{Storage, StorageError};

pub mod statement;
pub use statement::{Argument, Dialect, Statement};

pub mod writer;
pub use writer::{
    chunk_size, BulkWriter, WriteError, DEFAULT_MAX_PLACEHOLDERS, PLACEHOLDERS_PER_TOKEN_TRANSFER,
};
