use std::sync::Arc;

use anyhow::anyhow;
use mock_storage::MockStorage;
use postgres_storage::PostgresStorage;
use sqlite3_storage::Sqlite3Storage;
use storage::Storage;

use crate::Args;

#[derive(clap::ValueEnum, Clone, Default, Debug)]
pub enum StorageType {
    #[default]
    Sqlite3Storage,
    PostgresStorage,
    MockStorage,
}

impl Args {
    /// Connects to the chosen storage and makes sure the token transfers table exists.
    pub async fn choose_storage(&self) -> anyhow::Result<Arc<dyn Storage>> {
        let storage: Arc<dyn Storage> = match self.storage {
            StorageType::MockStorage => Arc::new(MockStorage::new()),
            StorageType::Sqlite3Storage => Arc::new(
                Sqlite3Storage::new(self.storage_url.clone(), self.tables_prefix.clone()).await?,
            ),
            StorageType::PostgresStorage => Arc::new(
                PostgresStorage::new(self.storage_url.clone(), self.tables_prefix.clone()).await?,
            ),
        };
        storage.prepare_db().await.map_err(|err| anyhow!(err))?;
        Ok(storage)
    }
}
