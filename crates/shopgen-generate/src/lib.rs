//! Batch generator for a fake e-commerce dataset.
//!
//! Orders are drawn against a seller list, then order items are drawn from
//! each order's seller catalog so every line item references a product owned
//! by the order's seller. Both tables are written as CSV.

pub mod catalog;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod records;

pub use catalog::{ProductCatalog, read_products, read_sellers};
pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use generators::order_items::{OrderItemGenerator, OrderItemsOutcome};
pub use generators::orders::OrderGenerator;
pub use model::{GenerateOptions, GenerationReport, TableReport};
pub use records::{Order, OrderItem, OrderStatus, ProductRecord, SellerRecord};
