use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::{SubsecRound, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use crate::catalog::{ProductCatalog, read_products, read_sellers};
use crate::errors::GenerationError;
use crate::generators::hash_seed;
use crate::generators::order_items::OrderItemGenerator;
use crate::generators::orders::OrderGenerator;
use crate::model::{GenerateOptions, GenerationReport, TableReport};
use crate::output::csv::{write_order_items_csv, write_orders_csv};
use crate::records::SellerId;

pub const ORDERS_FILE: &str = "orders.csv";
pub const ORDER_ITEMS_FILE: &str = "order_items.csv";
pub const REPORT_FILE: &str = "generation_report.json";

/// Result of a generation run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub run_dir: PathBuf,
    pub report: GenerationReport,
}

/// Entry point for generating the order and order-item tables.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    options: GenerateOptions,
}

impl GenerationEngine {
    pub fn new(options: GenerateOptions) -> Self {
        Self { options }
    }

    pub fn run(&self) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let run_id = self
            .options
            .run_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let seed = self.options.seed.unwrap_or_else(|| rand::rng().random());
        let reference_time = self
            .options
            .reference_time
            .unwrap_or_else(Utc::now)
            .trunc_subsecs(0);
        let run_dir = self.options.out_dir.clone();
        std::fs::create_dir_all(&run_dir)?;

        let mut report = GenerationReport::new(run_id.clone(), seed, reference_time);

        info!(
            run_id = %run_id,
            seed,
            orders = self.options.order_count,
            out_dir = %run_dir.display(),
            "generation started"
        );

        let outcome = self.generate(&run_dir, seed, &mut report);
        report.duration_ms = start.elapsed().as_millis() as u64;

        let report_path = run_dir.join(REPORT_FILE);
        match outcome {
            Ok(()) => {
                std::fs::write(&report_path, serde_json::to_vec_pretty(&report)?)?;
                info!(
                    run_id = %run_id,
                    tables = report.tables.len(),
                    skipped_orders = report.skipped_orders,
                    duration_ms = report.duration_ms,
                    bytes_written = report.bytes_written,
                    "generation completed"
                );
                Ok(GenerationResult { run_dir, report })
            }
            Err(err) => {
                warn!(run_id = %run_id, error = %err, "generation failed");
                report.error = Some(err.to_string());
                let written = serde_json::to_vec_pretty(&report)
                    .map_err(GenerationError::from)
                    .and_then(|bytes| std::fs::write(&report_path, bytes).map_err(GenerationError::from));
                if let Err(write_err) = written {
                    warn!(
                        run_id = %run_id,
                        path = %report_path.display(),
                        error = %write_err,
                        "failed to write generation report"
                    );
                }
                Err(err)
            }
        }
    }

    fn generate(
        &self,
        run_dir: &Path,
        seed: u64,
        report: &mut GenerationReport,
    ) -> Result<(), GenerationError> {
        let sellers = read_sellers(&self.options.sellers_path)?;
        let products = read_products(&self.options.products_path)?;
        report.sellers_read = sellers.len() as u64;
        report.products_read = products.len() as u64;
        info!(
            sellers = sellers.len(),
            products = products.len(),
            "inputs loaded"
        );

        let seller_ids: Vec<SellerId> = sellers.iter().map(|seller| seller.seller_id).collect();
        let order_generator = OrderGenerator::new(report.reference_time)?;
        let mut order_rng = ChaCha8Rng::seed_from_u64(hash_seed(seed, "orders"));
        let orders =
            order_generator.generate(self.options.order_count, &seller_ids, &mut order_rng)?;
        for order in &orders {
            report.record_status(order.status.as_str());
        }
        info!(orders = orders.len(), "orders generated");

        let catalog = ProductCatalog::new(&products)?;
        info!(
            products = catalog.product_count(),
            sellers_with_products = catalog.seller_count(),
            "catalog indexed"
        );
        let item_generator = OrderItemGenerator::new(catalog);
        let mut item_rng = ChaCha8Rng::seed_from_u64(hash_seed(seed, "order_items"));
        let items = item_generator.generate(&orders, &mut item_rng)?;
        report.skipped_orders = items.skipped_orders;
        report.skipped_sellers = items.skipped_sellers.len() as u64;
        info!(
            order_items = items.items.len(),
            skipped_orders = items.skipped_orders,
            skipped_sellers = items.skipped_sellers.len(),
            "order items generated"
        );

        let orders_path = run_dir.join(ORDERS_FILE);
        let bytes_written = write_orders_csv(&orders_path, &orders)?;
        report.record_table(TableReport {
            table: "orders".to_string(),
            path: orders_path,
            rows_generated: orders.len() as u64,
            bytes_written,
        });

        let items_path = run_dir.join(ORDER_ITEMS_FILE);
        let bytes_written = write_order_items_csv(&items_path, &items.items)?;
        report.record_table(TableReport {
            table: "order_items".to_string(),
            path: items_path,
            rows_generated: items.items.len() as u64,
            bytes_written,
        });
        info!(bytes_written = report.bytes_written, "tables written");

        Ok(())
    }
}
