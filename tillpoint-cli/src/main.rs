use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tillpoint_catalog::InventoryLedger;
use tillpoint_core::Operator;
use tillpoint_order::OrderItemManager;
use tillpoint_shared::{OrderItemSelection, SelectedConfig};
use tillpoint_store::app_config::Config;
use tillpoint_store::catalog_file::{load_catalog, save_catalog};
use tillpoint_store::InMemoryItemRepository;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(name = "tillpoint")]
#[command(about = "Price selections and evaluate inventory against a catalog file")]
struct Cli {
    /// Catalog JSON file (falls back to `catalog.path` in the config)
    #[arg(long, env = "TILLPOINT_CATALOG")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Unit price and tax for a list of selections
    Quote(QuoteArgs),
    /// Inventory after taking one order item, without committing
    Preview(PreviewArgs),
    /// Apply an inventory operation, optionally writing the catalog back
    Adjust(AdjustArgs),
}

#[derive(Args, Debug)]
struct QuoteArgs {
    #[arg(long)]
    item: Uuid,
    /// JSON file with `[{"label": .., "value": ..}, ..]`
    #[arg(long)]
    selections: PathBuf,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    /// JSON file with one order item selection
    #[arg(long)]
    selection: PathBuf,
}

#[derive(Args, Debug)]
struct AdjustArgs {
    #[arg(long)]
    item: Uuid,
    /// JSON file with a list of order item selections
    #[arg(long)]
    selections: PathBuf,
    /// `increment` or `decrement`
    #[arg(long, default_value = "decrement")]
    op: String,
    #[arg(long)]
    commit: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::load().context("Failed to load config")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let catalog_path = cli
        .catalog
        .or_else(|| config.catalog.path.clone())
        .context("No catalog file given (use --catalog or catalog.path)")?;
    let items = load_catalog(&catalog_path)?;
    tracing::info!("Serving {} items from {}", items.len(), catalog_path.display());

    let repo = Arc::new(InMemoryItemRepository::with_items(items));
    let manager = OrderItemManager::new(repo.clone())
        .with_default_tax_rate(config.engine.default_tax_rate)
        .with_ledger(InventoryLedger::with_preview_key(config.engine.preview_key.clone()));

    match cli.command {
        Command::Quote(args) => {
            let selections: Vec<SelectedConfig> = read_json(&args.selections)?;
            let quote = manager.quote(args.item, &selections).await?;
            print_json(&quote)?;
        }
        Command::Preview(args) => {
            let selection: OrderItemSelection = read_json(&args.selection)?;
            let amounts = manager.preview(&selection).await?;
            print_json(&amounts)?;
        }
        Command::Adjust(args) => {
            let op: Operator = args.op.parse()?;
            let selections: Vec<OrderItemSelection> = read_json(&args.selections)?;
            let amounts = manager.adjust(args.item, &selections, op, args.commit).await?;
            if args.commit {
                save_catalog(&catalog_path, &repo.snapshot().await)?;
            }
            print_json(&amounts)?;
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed JSON in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
