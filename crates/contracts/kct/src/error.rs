#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("transfer log carries {available} words, at least 4 are required")]
    MissingWords { available: usize },
    #[error("log data length {len} is not a multiple of 32 bytes")]
    UnalignedData { len: usize },
    #[error("transaction index {transaction_index} or log index {log_index} exceeds the per-block bounds")]
    IndexOutOfBounds {
        transaction_index: u64,
        log_index: u64,
    },
    #[error("transaction log id overflows at block {block_number}")]
    LogIdOverflow { block_number: u64 },
}
