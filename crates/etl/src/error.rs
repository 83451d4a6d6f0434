use provider::ProviderError;
use storage::WriteError;

#[derive(Debug, thiserror::Error)]
pub enum ETLError {
    #[error("failed to receive chain event")]
    Provider(#[from] ProviderError),
    #[error("invalid token transfer writer configuration")]
    Config(#[source] WriteError),
    #[error("failed to persist token transfers of block {block_number}")]
    Write {
        block_number: u64,
        #[source]
        source: WriteError,
    },
}
