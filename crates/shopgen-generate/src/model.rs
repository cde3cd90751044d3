use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::generators::orders::ORDER_COUNT;

/// Options for the generation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Directory where the tables and the report are written.
    pub out_dir: PathBuf,
    /// Seller input table.
    pub sellers_path: PathBuf,
    /// Product input table.
    pub products_path: PathBuf,
    /// Number of orders to generate.
    pub order_count: u64,
    /// Run seed; a random one is drawn and reported when absent.
    pub seed: Option<u64>,
    /// Upper bound of the `created_at` window; defaults to the run start.
    pub reference_time: Option<DateTime<Utc>>,
    /// Run identifier; a new one is assigned when absent.
    pub run_id: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("out"),
            sellers_path: PathBuf::from("sellers_table.csv"),
            products_path: PathBuf::from("products_table.csv"),
            order_count: ORDER_COUNT,
            seed: None,
            reference_time: None,
            run_id: None,
        }
    }
}

/// Summary of a generated table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableReport {
    pub table: String,
    pub path: PathBuf,
    pub rows_generated: u64,
    pub bytes_written: u64,
}

/// Report for a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub run_id: String,
    pub seed: u64,
    pub reference_time: DateTime<Utc>,
    pub sellers_read: u64,
    pub products_read: u64,
    pub tables: Vec<TableReport>,
    pub status_counts: BTreeMap<String, u64>,
    /// Orders that produced no items because their seller owns no products.
    pub skipped_orders: u64,
    pub skipped_sellers: u64,
    pub bytes_written: u64,
    pub duration_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl GenerationReport {
    pub fn new(run_id: String, seed: u64, reference_time: DateTime<Utc>) -> Self {
        Self {
            run_id,
            seed,
            reference_time,
            sellers_read: 0,
            products_read: 0,
            tables: Vec::new(),
            status_counts: BTreeMap::new(),
            skipped_orders: 0,
            skipped_sellers: 0,
            bytes_written: 0,
            duration_ms: 0,
            error: None,
        }
    }

    pub fn record_status(&mut self, status: &str) {
        *self.status_counts.entry(status.to_string()).or_insert(0) += 1;
    }

    pub fn record_table(&mut self, table: TableReport) {
        self.bytes_written += table.bytes_written;
        self.tables.push(table);
    }

    pub fn table(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|table| table.table == name)
    }
}
