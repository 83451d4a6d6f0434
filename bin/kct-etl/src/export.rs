use std::sync::Arc;

use clap::Parser;
use config::Config;
use etl::ETLWorker;
use provider::{Provider, STDIN_SOURCE};
use storage::Storage;
use tracing::error;

#[derive(Parser, Debug)]
pub struct ExportArgs {
    #[clap(short, long, env = "CHAIN_EVENTS", default_value = STDIN_SOURCE)]
    /// Newline-delimited JSON file with chain events, `-` reads from stdin
    input: String,
}

impl ExportArgs {
    pub async fn exec(&self, config: Config, storage: Arc<dyn Storage>) -> anyhow::Result<()> {
        let provider = Provider::new(self.input.clone());
        let events = provider.subscribe_chain_events().await?;

        let mut worker = ETLWorker::new(config, storage)?;
        if let Err(err) = worker.run(events).await {
            error!(
                last_processed_block = ?worker.last_processed_block(),
                "Export stopped: {}", err
            );
            return Err(err.into());
        }
        Ok(())
    }
}
