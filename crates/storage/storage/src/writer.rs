use std::{collections::HashSet, sync::Arc};

use tracing::{debug, error};
use types::{TokenTransfer, TokenTransferRow, TOKEN_TRANSFER_COLUMNS};

use crate::statement::Statement;
use crate::storage::{Storage, StorageError};

/// Bound parameters contributed by one token transfer row
pub const PLACEHOLDERS_PER_TOKEN_TRANSFER: usize = TOKEN_TRANSFER_COLUMNS.len();

/// Placeholder budget of one statement when none is configured
pub const DEFAULT_MAX_PLACEHOLDERS: usize = 65535;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("placeholder budget {max_placeholders} cannot fit a single token transfer")]
    InvalidPlaceholderBudget { max_placeholders: usize },
    #[error("failed to insert {count} token transfers")]
    Chunk {
        count: usize,
        #[source]
        source: StorageError,
    },
}

impl WriteError {
    /// Number of transfers in the chunk that failed, if any chunk was attempted
    pub fn failed_count(&self) -> Option<usize> {
        match self {
            WriteError::Chunk { count, .. } => Some(*count),
            WriteError::InvalidPlaceholderBudget { .. } => None,
        }
    }
}

/// Rows per statement for a placeholder budget.
pub fn chunk_size(max_placeholders: usize) -> Result<usize, WriteError> {
    match max_placeholders / PLACEHOLDERS_PER_TOKEN_TRANSFER {
        0 => Err(WriteError::InvalidPlaceholderBudget { max_placeholders }),
        size => Ok(size),
    }
}

/// Writes token transfers in chunks that stay under the placeholder budget of one statement.
pub struct BulkWriter {
    storage: Arc<dyn Storage>,
    chunk_size: usize,
}

impl BulkWriter {
    pub fn new(storage: Arc<dyn Storage>, max_placeholders: usize) -> Result<Self, WriteError> {
        let chunk_size = chunk_size(max_placeholders)?;
        debug!(max_placeholders, chunk_size, "Created bulk writer");
        Ok(Self {
            storage,
            chunk_size,
        })
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Builds the upsert statement for one chunk in the dialect of the underlying storage.
    /// A `transaction_log_id` repeated within the chunk keeps only its first record, since
    /// Postgres refuses to update one row twice in a single statement.
    pub fn statement(&self, transfers: &[TokenTransfer]) -> Statement {
        let mut seen = HashSet::with_capacity(transfers.len());
        let rows: Vec<TokenTransferRow> = transfers
            .iter()
            .filter(|transfer| seen.insert(transfer.transaction_log_id))
            .map(TokenTransferRow::from)
            .collect();
        Statement::upsert_token_transfers(
            self.storage.dialect(),
            &self.storage.token_transfers_table(),
            &rows,
        )
    }

    /// Persists all transfers chunk by chunk, in order. The first failing chunk stops the
    /// operation; chunks written before it stay committed and later chunks are never sent.
    pub async fn insert_token_transfers(
        &self,
        transfers: &[TokenTransfer],
    ) -> Result<(), WriteError> {
        for chunk in transfers.chunks(self.chunk_size) {
            if let Err(source) = self.bulk_insert_token_transfers(chunk).await {
                error!(
                    err = %source,
                    num_token_transfers = chunk.len(),
                    "Failed to insert token transfers"
                );
                return Err(WriteError::Chunk {
                    count: chunk.len(),
                    source,
                });
            }
        }
        Ok(())
    }

    async fn bulk_insert_token_transfers(
        &self,
        transfers: &[TokenTransfer],
    ) -> Result<u64, StorageError> {
        if transfers.is_empty() {
            debug!("The token transfer list is empty");
            return Ok(0);
        }
        let statement = self.statement(transfers);
        let rows_affected = self.storage.execute(&statement).await?;
        debug!(
            num_token_transfers = transfers.len(),
            rows_affected, "Inserted token transfers"
        );
        Ok(rows_affected)
    }
}
