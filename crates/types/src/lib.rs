pub mod chain_event;
pub use chain_event::{Address, BlockHeader, ChainEvent, Log};

pub mod token_transfer;
pub use token_transfer::{TokenTransfer, TokenTransferRow, TOKEN_TRANSFER_COLUMNS};

pub mod quantity;
pub use quantity::to_hex_quantity;

pub use base_primitives::{Bytes, B256, U256};
