use thiserror::Error;

use crate::records::{ProductId, SellerId};

/// Errors emitted by the generation engine.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("seller table is empty; orders need at least one seller")]
    NoSellers,
    #[error("product {product_id} appears more than once in the catalog")]
    DuplicateProduct { product_id: ProductId },
    /// Seller index lists a product the price index lacks. `ProductCatalog::new`
    /// fills both from the same rows, so this marks a broken catalog.
    #[error("product {product_id} of seller {seller_id} has no price in the catalog")]
    UnknownProduct {
        product_id: ProductId,
        seller_id: SellerId,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}
