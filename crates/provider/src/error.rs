#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("failed to read chain events")]
    Io(#[from] std::io::Error),
    #[error("invalid chain event on line {line}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
