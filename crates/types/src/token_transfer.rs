use base_primitives::{hex::ToHexExt, B256, U256};
use serde::{Serialize, Serializer};
use sqlx::FromRow;

use crate::{quantity::to_hex_quantity, Address};

/// Column order of a persisted token transfer. Every row binds one placeholder per column.
pub const TOKEN_TRANSFER_COLUMNS: [&str; 7] = [
    "transaction_log_id",
    "from_addr",
    "to_addr",
    "value",
    "contract_address",
    "transaction_hash",
    "timestamp",
];

/// A decoded KCT transfer. Built from one log entry and its block timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransfer {
    pub contract_address: Address,
    pub from: Address,
    pub to: Address,
    pub value: U256,
    /// Position of the log on chain, also the dedup key in storage
    pub transaction_log_id: i64,
    pub transaction_hash: B256,
    pub timestamp: i64,
}

impl TokenTransfer {
    pub fn value_hex(&self) -> String {
        to_hex_quantity(&self.value)
    }
}

/// Stored shape of a token transfer, keyed by `transaction_log_id`.
#[derive(Debug, FromRow, Clone, PartialEq, Eq, Serialize)]
pub struct TokenTransferRow {
    pub transaction_log_id: i64,
    #[serde(serialize_with = "serialize_hex")]
    pub from_addr: Vec<u8>,
    #[serde(serialize_with = "serialize_hex")]
    pub to_addr: Vec<u8>,
    pub value: String,
    #[serde(serialize_with = "serialize_hex")]
    pub contract_address: Vec<u8>,
    #[serde(serialize_with = "serialize_hex")]
    pub transaction_hash: Vec<u8>,
    pub timestamp: i64,
}

impl From<&TokenTransfer> for TokenTransferRow {
    fn from(transfer: &TokenTransfer) -> Self {
        TokenTransferRow {
            transaction_log_id: transfer.transaction_log_id,
            from_addr: transfer.from.to_vec(),
            to_addr: transfer.to.to_vec(),
            value: transfer.value_hex(),
            contract_address: transfer.contract_address.to_vec(),
            transaction_hash: transfer.transaction_hash.to_vec(),
            timestamp: transfer.timestamp,
        }
    }
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{}", bytes.encode_hex()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_transfer() -> TokenTransfer {
        TokenTransfer {
            contract_address: Address::repeat_byte(0xcc),
            from: Address::repeat_byte(0xaa),
            to: Address::repeat_byte(0xbb),
            value: U256::from(255u64),
            transaction_log_id: 100_000_200_003,
            transaction_hash: B256::repeat_byte(0x11),
            timestamp: 1000,
        }
    }

    #[test]
    fn test_row_from_transfer() {
        let row = TokenTransferRow::from(&sample_transfer());

        assert_eq!(row.transaction_log_id, 100_000_200_003);
        assert_eq!(row.from_addr, vec![0xaa; 20]);
        assert_eq!(row.to_addr, vec![0xbb; 20]);
        assert_eq!(row.value, "0xff");
        assert_eq!(row.contract_address, vec![0xcc; 20]);
        assert_eq!(row.transaction_hash, vec![0x11; 32]);
        assert_eq!(row.timestamp, 1000);
    }

    #[test]
    fn test_row_serializes_bytes_as_hex() {
        let row = TokenTransferRow::from(&sample_transfer());
        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["from_addr"], format!("0x{}", "aa".repeat(20)));
        assert_eq!(json["value"], "0xff");
        assert_eq!(json["timestamp"], 1000);
    }
}
