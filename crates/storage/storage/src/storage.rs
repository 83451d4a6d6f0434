use std::error::Error;

use async_trait::async_trait;
use types::{TokenTransferRow, B256};

use crate::statement::{Dialect, Statement};

/// Error returned across the storage boundary. Each backend converts its own error type into it.
pub type StorageError = Box<dyn Error + Send + Sync>;

#[async_trait]
pub trait Storage: Send + Sync {
    fn dialect(&self) -> Dialect;

    fn tables_prefix(&self) -> &str;

    fn token_transfers_table(&self) -> String {
        format!("{}_kct_transfers", self.tables_prefix())
    }

    /// Creates the token transfers table and its indexes if they are missing.
    async fn prepare_db(&self) -> Result<(), StorageError>;

    /// Runs one parameterized statement and returns the number of affected rows.
    async fn execute(&self, statement: &Statement) -> Result<u64, StorageError>;

    async fn get_token_transfer(
        &self,
        transaction_log_id: i64,
    ) -> Result<Option<TokenTransferRow>, StorageError>;

    async fn get_transaction_token_transfers(
        &self,
        tx_hash: B256,
    ) -> Result<Vec<TokenTransferRow>, StorageError>;

    async fn count_token_transfers(&self) -> Result<i64, StorageError>;
}
