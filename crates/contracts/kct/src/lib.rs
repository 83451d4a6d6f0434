pub mod constants;
pub use constants::{MAX_TX_COUNT_PER_BLOCK, MAX_TX_LOG_COUNT_PER_TX, TRANSFER_EVENT_SIGNATURE};

pub mod error;
pub use error::DecodeError;

pub mod kct;
pub use kct::{
    decode_chain_event, is_token_transfer, transaction_log_id, transform_log_to_token_transfer,
    transform_logs_to_token_transfers, DecodeAnomaly, DecodedEvent, TransferFields,
};
