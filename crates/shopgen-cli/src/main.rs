mod registry;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use registry::{RunContext, RunInputs, init_run_logging, start_run};
use shopgen_generate::{GenerateOptions, GenerationEngine, GenerationError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
enum CliError {
    #[error("registry error: {0}")]
    Registry(#[from] registry::RegistryError),
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

#[derive(Parser, Debug)]
#[command(name = "shopgen", version, about = "Fake e-commerce order dataset generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the orders and order items tables.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Seller table (needs a `seller_id` column).
    #[arg(long, default_value = "sellers_table.csv")]
    sellers: PathBuf,
    /// Product table (needs `product_id`, `seller_id`, `discount_price`).
    #[arg(long, default_value = "products_table.csv")]
    products: PathBuf,
    /// Output directory for runs.
    #[arg(long, default_value = "runs")]
    out: PathBuf,
    /// Seed for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
    }
}

fn run_generate(args: GenerateArgs) -> Result<(), CliError> {
    let GenerateArgs {
        sellers,
        products,
        out,
        seed,
    } = args;

    let run_id = Uuid::new_v4().to_string();
    let started_at = chrono::Utc::now();
    let run_ctx = RunContext {
        run_id: run_id.clone(),
        started_at,
        seed,
        out_dir: out,
        inputs: RunInputs {
            sellers: sellers.clone(),
            products: products.clone(),
        },
    };

    let run_paths = start_run(&run_ctx)?;
    init_run_logging(&run_paths.logs_path)?;

    tracing::info!(
        event = "run_started",
        run_id = %run_id,
        config = %run_paths.config_path.display()
    );

    let timer = Instant::now();
    let options = GenerateOptions {
        out_dir: run_paths.run_root.clone(),
        sellers_path: sellers,
        products_path: products,
        seed,
        reference_time: Some(started_at),
        run_id: Some(run_id),
        ..GenerateOptions::default()
    };

    let result = GenerationEngine::new(options).run()?;

    tracing::info!(
        event = "run_finished",
        status = "success",
        seed = result.report.seed,
        orders = result.report.table("orders").map(|t| t.rows_generated).unwrap_or(0),
        order_items = result
            .report
            .table("order_items")
            .map(|t| t.rows_generated)
            .unwrap_or(0),
        run_dir = %result.run_dir.display(),
        duration_ms = timer.elapsed().as_millis() as u64
    );

    Ok(())
}
