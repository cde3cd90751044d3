use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use rand::Rng;
use rand::RngCore;
use rand::seq::index;

use crate::catalog::ProductCatalog;
use crate::errors::GenerationError;
use crate::generators::round_to_cents;
use crate::records::{Order, OrderItem, ProductId, SellerId};

const MIN_ITEMS: usize = 2;
const MAX_ITEMS: usize = 4;
const MAX_QUANTITY: u32 = 5;

/// Result of an item generation pass.
#[derive(Debug, Clone, Default)]
pub struct OrderItemsOutcome {
    pub items: Vec<OrderItem>,
    /// Orders whose seller owns no products.
    pub skipped_orders: u64,
    /// Distinct sellers behind the skipped orders.
    pub skipped_sellers: BTreeSet<SellerId>,
}

/// Draws line items for orders from their seller's products.
#[derive(Debug, Clone)]
pub struct OrderItemGenerator {
    catalog: ProductCatalog,
}

struct PendingItem {
    order_id: u64,
    product_id: ProductId,
    quantity: u32,
    unit_price: f64,
    subtotal: f64,
    created_at: NaiveDateTime,
}

impl OrderItemGenerator {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self { catalog }
    }

    /// Generate items for `orders` in input order. Item ids are assigned
    /// once every order has been processed.
    pub fn generate(
        &self,
        orders: &[Order],
        rng: &mut dyn RngCore,
    ) -> Result<OrderItemsOutcome, GenerationError> {
        let mut pending = Vec::new();
        let mut outcome = OrderItemsOutcome::default();

        for order in orders {
            let products = self.catalog.products_for(order.seller_id);
            if products.is_empty() {
                outcome.skipped_orders += 1;
                outcome.skipped_sellers.insert(order.seller_id);
                continue;
            }

            for product_id in choose_products(products, rng) {
                // both catalog indexes are filled from the same rows
                let unit_price = self.catalog.unit_price(product_id).ok_or_else(|| {
                    GenerationError::UnknownProduct {
                        product_id,
                        seller_id: order.seller_id,
                    }
                })?;
                let quantity = rng.random_range(1..=MAX_QUANTITY);
                pending.push(PendingItem {
                    order_id: order.order_id,
                    product_id,
                    quantity,
                    unit_price,
                    subtotal: round_to_cents(quantity as f64 * unit_price),
                    created_at: order.order_date,
                });
            }
        }

        outcome.items = pending
            .into_iter()
            .zip(1_u64..)
            .map(|(item, order_item_id)| OrderItem {
                order_item_id,
                order_id: item.order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
                subtotal: item.subtotal,
                created_at: item.created_at,
            })
            .collect();

        Ok(outcome)
    }
}

/// A single product is always chosen alone; otherwise 2..=min(4, n)
/// distinct products are sampled without replacement.
fn choose_products(products: &[ProductId], rng: &mut dyn RngCore) -> Vec<ProductId> {
    if products.len() == 1 {
        return products.to_vec();
    }

    let upper = MAX_ITEMS.min(products.len());
    let amount = rng.random_range(MIN_ITEMS..=upper);
    index::sample(rng, products.len(), amount)
        .iter()
        .map(|idx| products[idx])
        .collect()
}
