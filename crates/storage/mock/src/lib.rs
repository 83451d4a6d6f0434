mod mock;
pub use mock::{MockStorage, MockStorageError};
