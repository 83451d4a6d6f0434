mod error;
pub use error::ProviderError;

mod provider;
pub use provider::{chain_events, Provider, STDIN_SOURCE};
