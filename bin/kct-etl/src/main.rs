mod logging;
use logging::init_logging;

mod app_config;
mod app_storage;
use app_storage::StorageType;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use storage::{Storage, DEFAULT_MAX_PLACEHOLDERS};

mod view;
use view::ViewArgs;

mod export;
use export::ExportArgs;

/// Commands for kct-etl application
#[derive(Debug, Parser)]
#[clap(name = "kct-etl", author, version, about)]
pub(crate) struct Args {
    /// Storage type which is used for saving the token transfers
    #[clap(long, env, default_value_t, value_enum)]
    pub storage: StorageType,

    #[clap(short = 'u', long, env, default_value = "sqlite://kct-etl.db")]
    /// SQLite3 URL or Postgres DSN of the database where token transfers are saved
    pub storage_url: String,

    #[clap(short, long, env, default_value = "etl")]
    /// Prefix for the tables in the database
    /// This is useful when running multiple instances of the ETL
    pub tables_prefix: String,

    #[clap(short, long, env, default_value_t = DEFAULT_MAX_PLACEHOLDERS)]
    /// Maximum number of bound parameters in one insert statement
    /// Capped by the limit of the chosen storage
    pub max_placeholders: usize,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
#[command(subcommand_help_heading = "KCT transfers ETL (Extract, Transform, Load) tool")]
pub enum Commands {
    /// Export token transfers from chain events to storage
    #[command(subcommand_help_heading = "Export data")]
    Export(ExportArgs),

    /// View token transfers from storage
    #[command(subcommand_help_heading = "View data")]
    View(ViewArgs),
}

impl Args {
    pub(crate) async fn exec(&self) -> anyhow::Result<()> {
        let storage = self.choose_storage().await?;
        let config = self.load_config(storage.dialect());

        match &self.command {
            Commands::Export(export_args) => export_args.exec(config, storage).await,
            Commands::View(view_args) => view_args.exec(storage).await,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let cmd = Args::parse();
    cmd.exec().await
}
