use types::{TokenTransferRow, TOKEN_TRANSFER_COLUMNS};

/// SQL flavour of a backend. Decides placeholder syntax, the conflict clause and the bind limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    Postgres,
}

impl Dialect {
    /// Largest number of bound parameters the engine accepts in one statement
    pub fn max_placeholders(&self) -> usize {
        match self {
            Dialect::Sqlite => 32766,
            Dialect::Postgres => 65535,
        }
    }

    fn placeholder(&self, position: usize) -> String {
        match self {
            Dialect::Sqlite => "?".to_string(),
            Dialect::Postgres => format!("${position}"),
        }
    }

    /// Conflict on the log id updates the key to itself, keeping the stored row untouched.
    fn on_conflict(&self, table: &str) -> String {
        match self {
            Dialect::Sqlite => {
                "ON CONFLICT (transaction_log_id) DO UPDATE SET transaction_log_id = transaction_log_id"
                    .to_string()
            }
            Dialect::Postgres => format!(
                "ON CONFLICT (transaction_log_id) DO UPDATE SET transaction_log_id = {table}.transaction_log_id"
            ),
        }
    }
}

/// A value bound to one placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Int(i64),
    Text(String),
    Bytes(Vec<u8>),
}

/// Statement text together with its flat, ordered argument list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Statement {
    pub sql: String,
    pub args: Vec<Argument>,
}

impl Statement {
    /// Multi-row idempotent insert of `rows` into `table`. Arguments are laid out row-major in
    /// `TOKEN_TRANSFER_COLUMNS` order.
    pub fn upsert_token_transfers(
        dialect: Dialect,
        table: &str,
        rows: &[TokenTransferRow],
    ) -> Statement {
        let columns = TOKEN_TRANSFER_COLUMNS.len();
        let mut values = Vec::with_capacity(rows.len());
        let mut args = Vec::with_capacity(rows.len() * columns);

        for (i, row) in rows.iter().enumerate() {
            let placeholders: Vec<String> = (1..=columns)
                .map(|column| dialect.placeholder(i * columns + column))
                .collect();
            values.push(format!("({})", placeholders.join(",")));

            args.push(Argument::Int(row.transaction_log_id));
            args.push(Argument::Bytes(row.from_addr.clone()));
            args.push(Argument::Bytes(row.to_addr.clone()));
            args.push(Argument::Text(row.value.clone()));
            args.push(Argument::Bytes(row.contract_address.clone()));
            args.push(Argument::Bytes(row.transaction_hash.clone()));
            args.push(Argument::Int(row.timestamp));
        }

        let sql = format!(
            "INSERT INTO {table} ({}) VALUES {} {}",
            TOKEN_TRANSFER_COLUMNS.join(", "),
            values.join(","),
            dialect.on_conflict(table)
        );

        Statement { sql, args }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(transaction_log_id: i64) -> TokenTransferRow {
        TokenTransferRow {
            transaction_log_id,
            from_addr: vec![0xaa; 20],
            to_addr: vec![0xbb; 20],
            value: "0x64".to_string(),
            contract_address: vec![0xcc; 20],
            transaction_hash: vec![0x11; 32],
            timestamp: 1000,
        }
    }

    #[test]
    fn test_sqlite_upsert() {
        let statement = Statement::upsert_token_transfers(
            Dialect::Sqlite,
            "etl_kct_transfers",
            &[row(1), row(2)],
        );

        assert_eq!(
            statement.sql,
            "INSERT INTO etl_kct_transfers (transaction_log_id, from_addr, to_addr, value, contract_address, transaction_hash, timestamp) \
             VALUES (?,?,?,?,?,?,?),(?,?,?,?,?,?,?) \
             ON CONFLICT (transaction_log_id) DO UPDATE SET transaction_log_id = transaction_log_id"
        );
        assert_eq!(statement.args.len(), 14);
    }

    #[test]
    fn test_postgres_upsert_numbers_placeholders_across_rows() {
        let statement = Statement::upsert_token_transfers(
            Dialect::Postgres,
            "etl_kct_transfers",
            &[row(1), row(2)],
        );

        assert!(statement
            .sql
            .contains("VALUES ($1,$2,$3,$4,$5,$6,$7),($8,$9,$10,$11,$12,$13,$14)"));
        assert!(statement.sql.ends_with(
            "ON CONFLICT (transaction_log_id) DO UPDATE SET transaction_log_id = etl_kct_transfers.transaction_log_id"
        ));
    }

    #[test]
    fn test_arguments_are_row_major() {
        let statement = Statement::upsert_token_transfers(
            Dialect::Sqlite,
            "etl_kct_transfers",
            &[row(1), row(2)],
        );

        assert_eq!(
            statement.args[..7],
            [
                Argument::Int(1),
                Argument::Bytes(vec![0xaa; 20]),
                Argument::Bytes(vec![0xbb; 20]),
                Argument::Text("0x64".to_string()),
                Argument::Bytes(vec![0xcc; 20]),
                Argument::Bytes(vec![0x11; 32]),
                Argument::Int(1000),
            ]
        );
        assert_eq!(statement.args[7], Argument::Int(2));
    }

    #[test]
    fn test_dialect_limits() {
        assert_eq!(Dialect::Sqlite.max_placeholders(), 32766);
        assert_eq!(Dialect::Postgres.max_placeholders(), 65535);
    }
}
