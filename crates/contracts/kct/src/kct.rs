use tracing::{debug, warn};
use types::{Address, ChainEvent, Log, TokenTransfer, B256, U256};

use crate::constants::{
    ADDRESS_SIZE, MAX_TX_COUNT_PER_BLOCK, MAX_TX_LOG_COUNT_PER_TX, TRANSFER_EVENT_SIGNATURE,
    WORD_SIZE,
};
use crate::error::DecodeError;

/// Participants and amount of a transfer event.
///
/// Two encodings exist on chain:
///   topics = [signature], data = from ++ to ++ value
///   topics = [signature, from, to], data = value
/// Both are read through the same positional scheme over topics followed by data words:
/// position 1 is `from`, 2 is `to`, 3 is `value`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferFields {
    pub from: Address,
    pub to: Address,
    pub value: U256,
}

impl TransferFields {
    pub fn parse(topics: &[B256], data: &[u8]) -> Result<Self, DecodeError> {
        if data.len() % WORD_SIZE != 0 {
            return Err(DecodeError::UnalignedData { len: data.len() });
        }
        let available = topics.len() + data.len() / WORD_SIZE;
        let missing = || DecodeError::MissingWords { available };

        let from = word_at(topics, data, 1).ok_or_else(missing)?;
        let to = word_at(topics, data, 2).ok_or_else(missing)?;
        let value = word_at(topics, data, 3).ok_or_else(missing)?;

        Ok(TransferFields {
            from: word_to_address(from),
            to: word_to_address(to),
            value: U256::from_be_slice(value),
        })
    }
}

/// Resolves a position in topics followed by data words without building the joined list.
fn word_at<'a>(topics: &'a [B256], data: &'a [u8], position: usize) -> Option<&'a [u8]> {
    match topics.get(position) {
        Some(topic) => Some(topic.as_slice()),
        None => {
            let offset = (position - topics.len()) * WORD_SIZE;
            data.get(offset..offset + WORD_SIZE)
        }
    }
}

/// Keeps the low-order 20 bytes of a 32-byte word.
pub fn word_to_address(word: &[u8]) -> Address {
    Address::from_slice(&word[WORD_SIZE - ADDRESS_SIZE..])
}

/// Global position of a log: `block * K1 + tx_index * K2 + log_index`.
/// Indexes beyond the per-block bounds would collide with a neighbour and are rejected.
pub fn transaction_log_id(
    block_number: u64,
    transaction_index: u64,
    log_index: u64,
) -> Result<i64, DecodeError> {
    let out_of_bounds = || DecodeError::IndexOutOfBounds {
        transaction_index,
        log_index,
    };
    let tx_index = i64::try_from(transaction_index)
        .ok()
        .filter(|index| *index < MAX_TX_COUNT_PER_BLOCK)
        .ok_or_else(out_of_bounds)?;
    let log_index = i64::try_from(log_index)
        .ok()
        .filter(|index| *index < MAX_TX_LOG_COUNT_PER_TX)
        .ok_or_else(out_of_bounds)?;

    i64::try_from(block_number)
        .ok()
        .and_then(|number| number.checked_mul(MAX_TX_COUNT_PER_BLOCK * MAX_TX_LOG_COUNT_PER_TX))
        .and_then(|id| id.checked_add(tx_index * MAX_TX_LOG_COUNT_PER_TX + log_index))
        .ok_or(DecodeError::LogIdOverflow { block_number })
}

pub fn is_token_transfer(log: &Log) -> bool {
    log.topics.first() == Some(&TRANSFER_EVENT_SIGNATURE)
}

/// Converts a transfer log into a KCT transfer stamped with the block timestamp.
pub fn transform_log_to_token_transfer(
    log: &Log,
    timestamp: i64,
) -> Result<TokenTransfer, DecodeError> {
    let fields = TransferFields::parse(&log.topics, &log.data)?;
    let transaction_log_id =
        transaction_log_id(log.block_number, log.transaction_index, log.log_index)?;

    Ok(TokenTransfer {
        contract_address: log.address,
        from: fields.from,
        to: fields.to,
        value: fields.value,
        transaction_log_id,
        transaction_hash: log.transaction_hash,
        timestamp,
    })
}

/// A transfer log that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeAnomaly {
    pub transaction_hash: B256,
    pub log_index: u64,
    pub error: DecodeError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedEvent {
    /// Transfers in log order
    pub transfers: Vec<TokenTransfer>,
    pub anomalies: Vec<DecodeAnomaly>,
}

/// Decodes every transfer log of the event. Malformed transfer logs are skipped and reported
/// as anomalies, other logs are ignored.
pub fn decode_chain_event(event: &ChainEvent) -> DecodedEvent {
    let mut decoded = DecodedEvent::default();
    for log in event.logs.iter().filter(|log| is_token_transfer(log)) {
        match transform_log_to_token_transfer(log, event.block.timestamp) {
            Ok(transfer) => decoded.transfers.push(transfer),
            Err(error) => {
                warn!(
                    block_number = log.block_number,
                    tx_hash = %log.transaction_hash,
                    log_index = log.log_index,
                    %error,
                    "Skipping malformed transfer log"
                );
                decoded.anomalies.push(DecodeAnomaly {
                    transaction_hash: log.transaction_hash,
                    log_index: log.log_index,
                    error,
                });
            }
        }
    }
    debug!(
        block_number = event.block.number,
        logs = event.logs.len(),
        transfers = decoded.transfers.len(),
        "Decoded chain event"
    );
    decoded
}

pub fn transform_logs_to_token_transfers(event: &ChainEvent) -> Vec<TokenTransfer> {
    decode_chain_event(event).transfers
}
