use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use minimart_infra::config::{DEFAULT_LEDGER_PATH, DEFAULT_LOG_FILTER, DEFAULT_STORE_PATH};
use minimart_infra::{Config, InventoryService};
use minimart_inventory::DEFAULT_LOW_STOCK_THRESHOLD;
use minimart_shell::Shell;

/// Inventory tracker for a small shop, driven by a text menu.
#[derive(Parser, Debug)]
#[command(name = "minimart")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the product store (CSV)
    #[arg(long, default_value = DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Path to the append-only movement ledger (CSV)
    #[arg(long, default_value = DEFAULT_LEDGER_PATH)]
    ledger: PathBuf,

    /// Products at or below this quantity appear in the low-stock report
    #[arg(long, default_value_t = DEFAULT_LOW_STOCK_THRESHOLD)]
    low_stock_threshold: u64,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = DEFAULT_LOG_FILTER)]
    log_filter: String,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config {
            store_path: args.store,
            ledger_path: args.ledger,
            low_stock_threshold: args.low_stock_threshold,
            log_filter: args.log_filter,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = Config::from(Args::parse());
    minimart_observability::init(&config.log_filter);

    tracing::info!(
        store = %config.store_path.display(),
        ledger = %config.ledger_path.display(),
        "starting minimart"
    );

    let service = InventoryService::open(config.store(), config.ledger()).with_context(|| {
        format!(
            "failed to load inventory from {}",
            config.store_path.display()
        )
    })?;

    let mut shell = Shell::new(
        service,
        io::stdin().lock(),
        io::stdout().lock(),
        config.low_stock_threshold,
    );
    shell.run().context("interactive session ended with an error")?;

    Ok(())
}
