use std::sync::Arc;

use config::Config;
use futures::stream::{Stream, StreamExt};
use kct::decode_chain_event;
use provider::ProviderError;
use storage::{BulkWriter, Storage};
use tracing::{error, info};
use types::ChainEvent;

use crate::error::ETLError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ETLStats {
    pub processed_events: u64,
    pub persisted_transfers: u64,
    pub skipped_logs: u64,
}

/// Decodes chain events into token transfers and persists them, one event at a time.
pub struct ETLWorker {
    pub config: Config,
    writer: BulkWriter,
    last_processed_block: Option<u64>,
    stats: ETLStats,
}

impl ETLWorker {
    pub fn new(config: Config, storage: Arc<dyn Storage>) -> Result<Self, ETLError> {
        let writer = BulkWriter::new(storage, config.max_placeholders).map_err(ETLError::Config)?;
        Ok(ETLWorker {
            config,
            writer,
            last_processed_block: None,
            stats: ETLStats::default(),
        })
    }

    /// Block number of the last event whose transfers were fully persisted.
    /// A failed event never moves it, so a restart can resume from here.
    pub fn last_processed_block(&self) -> Option<u64> {
        self.last_processed_block
    }

    pub fn stats(&self) -> &ETLStats {
        &self.stats
    }

    /// Processes events in arrival order and stops at the first failure.
    pub async fn run<S>(&mut self, mut events: S) -> Result<(), ETLError>
    where
        S: Stream<Item = Result<ChainEvent, ProviderError>> + Unpin,
    {
        info!("ETLWorker is running");
        while let Some(event) = events.next().await {
            let event = event.map_err(|err| {
                error!(
                    last_processed_block = ?self.last_processed_block,
                    "Failed to receive chain event: {}", err
                );
                err
            })?;
            self.process_event(&event).await?;
        }
        info!(
            last_processed_block = ?self.last_processed_block,
            processed_events = self.stats.processed_events,
            persisted_transfers = self.stats.persisted_transfers,
            skipped_logs = self.stats.skipped_logs,
            "Chain event stream is finished"
        );
        Ok(())
    }

    pub async fn process_event(&mut self, event: &ChainEvent) -> Result<usize, ETLError> {
        let block_number = event.block.number;
        let decoded = decode_chain_event(event);

        self.writer
            .insert_token_transfers(&decoded.transfers)
            .await
            .map_err(|source| ETLError::Write {
                block_number,
                source,
            })?;

        self.last_processed_block = Some(block_number);
        self.stats.processed_events += 1;
        self.stats.persisted_transfers += decoded.transfers.len() as u64;
        self.stats.skipped_logs += decoded.anomalies.len() as u64;
        info!(
            block_number,
            transfers = decoded.transfers.len(),
            skipped = decoded.anomalies.len(),
            "Imported chain event"
        );
        Ok(decoded.transfers.len())
    }
}
