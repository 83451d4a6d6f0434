use config::Config;
use storage::Dialect;

use crate::Args;

impl Args {
    pub fn load_config(&self, dialect: Dialect) -> Config {
        Config {
            storage_url: self.storage_url.clone(),
            tables_prefix: self.tables_prefix.clone(),
            max_placeholders: self.max_placeholders.min(dialect.max_placeholders()),
        }
    }
}
