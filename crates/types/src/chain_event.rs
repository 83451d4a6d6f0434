use base_primitives::{Bytes, FixedBytes, B256};
use serde::{Deserialize, Serialize};

/// 20-byte account or contract identifier.
pub type Address = FixedBytes<20>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub number: u64,
    /// Block creation time in Unix seconds
    pub timestamp: i64,
}

/// A log entry emitted during contract execution, already decoded by the upstream source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    #[serde(default)]
    pub data: Bytes,
    pub block_number: u64,
    pub transaction_index: u64,
    pub log_index: u64,
    pub transaction_hash: B256,
}

/// ChainEvent bundles one finalized block with the logs emitted by its transactions, in log order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEvent {
    pub block: BlockHeader,
    #[serde(default)]
    pub logs: Vec<Log>,
}
