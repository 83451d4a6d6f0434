use std::sync::Arc;

use anyhow::{anyhow, bail};
use clap::Parser;
use storage::Storage;
use types::B256;

#[derive(Parser, Debug)]
pub struct ViewArgs {
    #[clap(flatten)]
    group: TransferGroup,
}

#[derive(Debug, clap::Args)]
#[group(required = true, multiple = false)]
pub struct TransferGroup {
    #[clap(short = 'l', long)]
    /// Transaction log id of a single transfer
    log_id: Option<i64>,
    #[clap(short = 'x', long)]
    /// Hash of a transaction whose transfers are printed
    tx_hash: Option<B256>,
}

impl ViewArgs {
    pub async fn exec(&self, storage: Arc<dyn Storage>) -> anyhow::Result<()> {
        let rows = match (self.group.log_id, self.group.tx_hash) {
            (Some(log_id), None) => storage
                .get_token_transfer(log_id)
                .await
                .map_err(|err| anyhow!(err))?
                .into_iter()
                .collect(),
            (None, Some(tx_hash)) => storage
                .get_transaction_token_transfers(tx_hash)
                .await
                .map_err(|err| anyhow!(err))?,
            _ => bail!("exactly one of --log-id or --tx-hash is required"),
        };
        println!("Requested token transfers:\n{}", serde_json::to_string_pretty(&rows)?);
        Ok(())
    }
}
