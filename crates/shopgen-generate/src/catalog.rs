use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::errors::GenerationError;
use crate::records::{ProductId, ProductRecord, SellerId, SellerRecord};

/// Read the seller table. Only `seller_id` is consumed.
pub fn read_sellers(path: &Path) -> Result<Vec<SellerRecord>, GenerationError> {
    read_table(path)
}

/// Read the product table. Only `product_id`, `seller_id` and
/// `discount_price` are consumed.
pub fn read_products(path: &Path) -> Result<Vec<ProductRecord>, GenerationError> {
    read_table(path)
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, GenerationError> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader.deserialize().collect::<Result<Vec<T>, _>>()?;
    Ok(rows)
}

/// Seller and price indexes over the product table.
#[derive(Debug, Clone, Default)]
pub struct ProductCatalog {
    by_seller: HashMap<SellerId, Vec<ProductId>>,
    prices: HashMap<ProductId, f64>,
}

impl ProductCatalog {
    /// Index products by owning seller (catalog order kept) and by id.
    pub fn new(products: &[ProductRecord]) -> Result<Self, GenerationError> {
        let mut catalog = Self::default();
        for product in products {
            match catalog.prices.entry(product.product_id) {
                Entry::Occupied(_) => {
                    return Err(GenerationError::DuplicateProduct {
                        product_id: product.product_id,
                    });
                }
                Entry::Vacant(slot) => {
                    slot.insert(product.discount_price);
                }
            }
            catalog
                .by_seller
                .entry(product.seller_id)
                .or_default()
                .push(product.product_id);
        }
        Ok(catalog)
    }

    /// Products owned by `seller_id`; empty for sellers missing from the catalog.
    pub fn products_for(&self, seller_id: SellerId) -> &[ProductId] {
        self.by_seller
            .get(&seller_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn unit_price(&self, product_id: ProductId) -> Option<f64> {
        self.prices.get(&product_id).copied()
    }

    pub fn product_count(&self) -> usize {
        self.prices.len()
    }

    pub fn seller_count(&self) -> usize {
        self.by_seller.len()
    }
}
