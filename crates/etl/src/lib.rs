mod error;
pub use error::ETLError;

mod etl;
pub use etl::{ETLStats, ETLWorker};
