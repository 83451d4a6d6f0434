use std::time::Duration;

use async_trait::async_trait;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Sqlite, SqlitePool};
use storage::{Argument, Dialect, Statement, Storage, StorageError};
use tracing::{debug, info};
use types::{TokenTransferRow, B256, TOKEN_TRANSFER_COLUMNS};

#[derive(thiserror::Error, Debug)]
pub enum Sqlite3StorageError {
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}

#[derive(Debug, Clone)]
pub struct Sqlite3Storage {
    pub db_url: String,
    pub tables_prefix: String,
    pool: SqlitePool,
}

impl Sqlite3Storage {
    /// Creates the database file if it does not exist and connects to it.
    pub async fn new(db_url: String, tables_prefix: String) -> Result<Self, Sqlite3StorageError> {
        if !Sqlite::database_exists(&db_url).await.unwrap_or(false) {
            debug!("Creating database {}", &db_url);
            Sqlite::create_database(&db_url).await?;
        } else {
            debug!("Database already exists");
        }

        // every connection to an in-memory database opens a fresh one
        let max_connections = if db_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect(&db_url)
            .await?;
        info!("Connected to database at path {}", &db_url);

        Ok(Self {
            db_url,
            tables_prefix,
            pool,
        })
    }

    async fn migrate_db(&self) -> Result<(), Sqlite3StorageError> {
        debug!("Migrating database");
        let table = self.token_transfers_table();
        let result = sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {table} (
        transaction_log_id INTEGER PRIMARY KEY NOT NULL,
        from_addr BLOB NOT NULL,
        to_addr BLOB NOT NULL,
        value TEXT NOT NULL,
        contract_address BLOB NOT NULL,
        transaction_hash BLOB NOT NULL,
        timestamp INTEGER NOT NULL
        )
        ;"
        ))
        .execute(&self.pool)
        .await?;
        debug!("Create {} table result: {:?}", table, result);

        for column in ["from_addr", "to_addr", "contract_address", "transaction_hash"] {
            sqlx::query(&format!(
                "CREATE INDEX IF NOT EXISTS idx_{table}_{column} ON {table} ({column});"
            ))
            .execute(&self.pool)
            .await?;
        }
        Ok(())
    }

    fn select_token_transfers(&self) -> String {
        format!(
            "SELECT {} FROM {}",
            TOKEN_TRANSFER_COLUMNS.join(", "),
            self.token_transfers_table()
        )
    }
}

#[async_trait]
impl Storage for Sqlite3Storage {
    fn dialect(&self) -> Dialect {
        Dialect::Sqlite
    }

    fn tables_prefix(&self) -> &str {
        &self.tables_prefix
    }

    async fn prepare_db(&self) -> Result<(), StorageError> {
        self.migrate_db().await?;
        Ok(())
    }

    async fn execute(&self, statement: &Statement) -> Result<u64, StorageError> {
        let mut query = sqlx::query(&statement.sql);
        for arg in &statement.args {
            query = match arg {
                Argument::Int(value) => query.bind(*value),
                Argument::Text(value) => query.bind(value.as_str()),
                Argument::Bytes(value) => query.bind(value.as_slice()),
            };
        }
        let result = query
            .execute(&self.pool)
            .await
            .map_err(Sqlite3StorageError::from)?;
        Ok(result.rows_affected())
    }

    async fn get_token_transfer(
        &self,
        transaction_log_id: i64,
    ) -> Result<Option<TokenTransferRow>, StorageError> {
        let query = format!(
            "{} WHERE transaction_log_id = ?",
            self.select_token_transfers()
        );
        let row = sqlx::query_as::<_, TokenTransferRow>(&query)
            .bind(transaction_log_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Sqlite3StorageError::from)?;
        Ok(row)
    }

    async fn get_transaction_token_transfers(
        &self,
        tx_hash: B256,
    ) -> Result<Vec<TokenTransferRow>, StorageError> {
        let query = format!(
            "{} WHERE transaction_hash = ? ORDER BY transaction_log_id",
            self.select_token_transfers()
        );
        let rows = sqlx::query_as::<_, TokenTransferRow>(&query)
            .bind(tx_hash.to_vec())
            .fetch_all(&self.pool)
            .await
            .map_err(Sqlite3StorageError::from)?;
        Ok(rows)
    }

    async fn count_token_transfers(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>(&format!(
            "SELECT COUNT(*) FROM {}",
            self.token_transfers_table()
        ))
        .fetch_one(&self.pool)
        .await
        .map_err(Sqlite3StorageError::from)?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use storage::BulkWriter;
    use types::{Address, TokenTransfer, U256};

    async fn memory_storage() -> Arc<Sqlite3Storage> {
        let storage = Sqlite3Storage::new("sqlite::memory:".to_string(), "etl".to_string())
            .await
            .unwrap();
        storage.prepare_db().await.unwrap();
        Arc::new(storage)
    }

    fn transfer(transaction_log_id: i64, value: u64) -> TokenTransfer {
        TokenTransfer {
            contract_address: Address::repeat_byte(0xcc),
            from: Address::repeat_byte(0xaa),
            to: Address::repeat_byte(0xbb),
            value: U256::from(value),
            transaction_log_id,
            transaction_hash: B256::repeat_byte((transaction_log_id % 2) as u8),
            timestamp: 1000 + transaction_log_id,
        }
    }

    #[tokio::test]
    async fn test_prepare_db_twice() {
        let storage = memory_storage().await;
        storage.prepare_db().await.unwrap();
        assert_eq!(storage.count_token_transfers().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let storage = memory_storage().await;
        let writer = BulkWriter::new(storage.clone(), 32766).unwrap();

        writer
            .insert_token_transfers(&[transfer(1, 100), transfer(2, 0)])
            .await
            .unwrap();

        let row = storage.get_token_transfer(1).await.unwrap().unwrap();
        assert_eq!(row, TokenTransferRow::from(&transfer(1, 100)));
        assert_eq!(row.value, "0x64");

        let row = storage.get_token_transfer(2).await.unwrap().unwrap();
        assert_eq!(row.value, "0x0");

        assert!(storage.get_token_transfer(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_is_idempotent() {
        let storage = memory_storage().await;
        let writer = BulkWriter::new(storage.clone(), 32766).unwrap();

        writer
            .insert_token_transfers(&[transfer(1, 100), transfer(2, 200)])
            .await
            .unwrap();
        writer
            .insert_token_transfers(&[transfer(1, 5), transfer(2, 6), transfer(3, 7)])
            .await
            .unwrap();

        assert_eq!(storage.count_token_transfers().await.unwrap(), 3);
        let row = storage.get_token_transfer(1).await.unwrap().unwrap();
        assert_eq!(row.value, "0x64");
        let row = storage.get_token_transfer(2).await.unwrap().unwrap();
        assert_eq!(row.value, "0xc8");
    }

    #[tokio::test]
    async fn test_insert_in_several_chunks() {
        let storage = memory_storage().await;
        let writer = BulkWriter::new(storage.clone(), 21).unwrap();
        assert_eq!(writer.chunk_size(), 3);

        let transfers: Vec<TokenTransfer> = (0..10).map(|i| transfer(i, i as u64)).collect();
        writer.insert_token_transfers(&transfers).await.unwrap();

        assert_eq!(storage.count_token_transfers().await.unwrap(), 10);
        let rows = storage
            .get_transaction_token_transfers(B256::repeat_byte(1))
            .await
            .unwrap();
        let ids: Vec<i64> = rows.iter().map(|row| row.transaction_log_id).collect();
        assert_eq!(ids, vec![1, 3, 5, 7, 9]);
    }

    #[tokio::test]
    async fn test_failed_chunk_reports_count() {
        let storage = Sqlite3Storage::new("sqlite::memory:".to_string(), "etl".to_string())
            .await
            .unwrap();
        // no table, so the first chunk fails
        let writer = BulkWriter::new(Arc::new(storage), 70).unwrap();

        let transfers: Vec<TokenTransfer> = (0..4).map(|i| transfer(i, 1)).collect();
        let err = writer.insert_token_transfers(&transfers).await.unwrap_err();
        assert_eq!(err.failed_count(), Some(4));
    }
}
