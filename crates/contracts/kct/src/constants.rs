use types::B256;

/// Topic 0 of `Transfer(address,address,uint256)`
pub const TRANSFER_EVENT_SIGNATURE: B256 = B256::new([
    0xdd, 0xf2, 0x52, 0xad, 0x1b, 0xe2, 0xc8, 0x9b, 0x69, 0xc2, 0xb0, 0x68, 0xfc, 0x37, 0x8d, 0xaa,
    0x95, 0x2b, 0xa7, 0xf1, 0x63, 0xc4, 0xa1, 0x16, 0x28, 0xf5, 0x5a, 0x4d, 0xf5, 0x23, 0xb3, 0xef,
]);

/// Upper bound on transactions in one block
pub const MAX_TX_COUNT_PER_BLOCK: i64 = 1_000_000;
/// Upper bound on logs emitted by one transaction
pub const MAX_TX_LOG_COUNT_PER_TX: i64 = 100_000;

pub const WORD_SIZE: usize = 32;
pub const ADDRESS_SIZE: usize = 20;
