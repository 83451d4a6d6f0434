#[derive(Debug, Clone)]
pub struct Config {
    /// URL or DSN of the database where token transfers are saved
    pub storage_url: String,

    /// Prefix for the tables in the database
    pub tables_prefix: String,

    /// Maximum number of bound parameters in one insert statement
    pub max_placeholders: usize,
}
