use base_primitives::U256;

/// Formats an unsigned integer as a `0x`-prefixed lowercase hex quantity without leading zeros.
/// Zero is rendered as `0x0`.
pub fn to_hex_quantity(value: &U256) -> String {
    format!("{value:#x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(to_hex_quantity(&U256::ZERO), "0x0");
    }

    #[test]
    fn test_small_values() {
        assert_eq!(to_hex_quantity(&U256::from(100u64)), "0x64");
        assert_eq!(to_hex_quantity(&U256::from(1u64)), "0x1");
        assert_eq!(to_hex_quantity(&U256::from(0x1000u64)), "0x1000");
    }

    #[test]
    fn test_max_value_is_lowercase() {
        let hex = to_hex_quantity(&U256::MAX);
        assert_eq!(hex, format!("0x{}", "f".repeat(64)));
    }

    #[test]
    fn test_round_trip() {
        let values = [
            U256::ZERO,
            U256::from(100u64),
            U256::from(u64::MAX),
            U256::from(u64::MAX) * U256::from(u64::MAX),
            U256::MAX,
        ];
        for value in values {
            let hex = to_hex_quantity(&value);
            assert!(hex.starts_with("0x"));
            assert_eq!(hex, hex.to_lowercase());
            assert_eq!(U256::from_str_radix(&hex[2..], 16).unwrap(), value);
        }
    }
}
