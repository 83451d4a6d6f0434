use std::collections::BTreeMap;

use async_trait::async_trait;
use storage::{
    Argument, Dialect, Statement, Storage, StorageError, PLACEHOLDERS_PER_TOKEN_TRANSFER,
};
use tokio::sync::Mutex;
use types::{TokenTransferRow, B256};

#[derive(thiserror::Error, Debug)]
pub enum MockStorageError {
    #[error("injected failure on statement {call}")]
    InjectedFailure { call: usize },
    #[error("statement has {placeholders} placeholders but {args} arguments")]
    PlaceholderMismatch { placeholders: usize, args: usize },
    #[error("arguments do not match the token transfer row layout")]
    UnexpectedArguments,
}

/// In-memory storage. Records every statement it receives and applies upserts with
/// first-write-wins semantics on `transaction_log_id`.
#[derive(Debug, Default)]
pub struct MockStorage {
    pub tables_prefix: String,
    /// 1-based index of the statement that fails
    fail_on_call: Option<usize>,
    statements: Mutex<Vec<Statement>>,
    rows: Mutex<BTreeMap<i64, TokenTransferRow>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self {
            tables_prefix: "etl".to_string(),
            ..Default::default()
        }
    }

    pub fn failing_on_call(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::new()
        }
    }

    /// Every statement passed to `execute`, including the failed one
    pub async fn statements(&self) -> Vec<Statement> {
        self.statements.lock().await.clone()
    }

    pub async fn rows(&self) -> Vec<TokenTransferRow> {
        self.rows.lock().await.values().cloned().collect()
    }
}

fn row_from_arguments(args: &[Argument]) -> Result<TokenTransferRow, MockStorageError> {
    match args {
        [
            Argument::Int(transaction_log_id),
            Argument::Bytes(from_addr),
            Argument::Bytes(to_addr),
            Argument::Text(value),
            Argument::Bytes(contract_address),
            Argument::Bytes(transaction_hash),
            Argument::Int(timestamp),
        ] => Ok(TokenTransferRow {
            transaction_log_id: *transaction_log_id,
            from_addr: from_addr.clone(),
            to_addr: to_addr.clone(),
            value: value.clone(),
            contract_address: contract_address.clone(),
            transaction_hash: transaction_hash.clone(),
            timestamp: *timestamp,
        }),
        _ => Err(MockStorageError::UnexpectedArguments),
    }
}

#[async_trait]
impl Storage for MockStorage {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn tables_prefix(&self) -> &str {
        &self.tables_prefix
    }

    async fn prepare_db(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, StorageError> {
        let call = {
            let mut statements = self.statements.lock().await;
            statements.push(statement.clone());
            statements.len()
        };
        if self.fail_on_call == Some(call) {
            return Err(MockStorageError::InjectedFailure { call }.into());
        }

        let placeholders = statement.sql.matches('?').count();
        if placeholders != statement.args.len() {
            return Err(MockStorageError::PlaceholderMismatch {
                placeholders,
                args: statement.args.len(),
            }
            .into());
        }

        let new_rows = statement
            .args
            .chunks(PLACEHOLDERS_PER_TOKEN_TRANSFER)
            .map(row_from_arguments)
            .collect::<Result<Vec<_>, _>>()?;

        let mut rows = self.rows.lock().await;
        let mut affected = 0;
        for row in new_rows {
            rows.entry(row.transaction_log_id).or_insert_with(|| {
                affected += 1;
                row
            });
        }
        Ok(affected)
    }

    async fn get_token_transfer(
        &self,
        transaction_log_id: i64,
    ) -> Result<Option<TokenTransferRow>, StorageError> {
        Ok(self.rows.lock().await.get(&transaction_log_id).cloned())
    }

    async fn get_transaction_token_transfers(
        &self,
        tx_hash: B256,
    ) -> Result<Vec<TokenTransferRow>, StorageError> {
        Ok(self
            .rows
            .lock()
            .await
            .values()
            .filter(|row| row.transaction_hash == tx_hash.as_slice())
            .cloned()
            .collect())
    }

    async fn count_token_transfers(&self) -> Result<i64, StorageError> {
        Ok(self.rows.lock().await.len() as i64)
    }
}
