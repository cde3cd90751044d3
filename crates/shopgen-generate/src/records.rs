use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type SellerId = i64;
pub type ProductId = i64;

/// Row of the seller input table. Other columns are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SellerRecord {
    pub seller_id: SellerId,
}

/// Row of the product input table. Other columns are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product_id: ProductId,
    pub seller_id: SellerId,
    pub discount_price: f64,
}

/// Lifecycle status assigned to a generated order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Placed,
    Paid,
    Shipped,
    Delivered,
    Cancelled,
    Returned,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 6] = [
        OrderStatus::Placed,
        OrderStatus::Paid,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Returned,
    ];

    /// Draw weight of each status, in percent. Aligned with [`OrderStatus::ALL`].
    pub const WEIGHTS: [u32; 6] = [10, 65, 5, 5, 10, 5];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Placed => "PLACED",
            OrderStatus::Paid => "PAID",
            OrderStatus::Shipped => "SHIPPED",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Returned => "RETURNED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generated order. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: u64,
    #[serde(with = "timestamp_format")]
    pub order_date: NaiveDateTime,
    pub seller_id: SellerId,
    pub status: OrderStatus,
    pub total_amount: f64,
    #[serde(with = "timestamp_format")]
    pub created_at: NaiveDateTime,
}

impl Order {
    pub const COLUMNS: [&'static str; 6] = [
        "order_id",
        "order_date",
        "seller_id",
        "status",
        "total_amount",
        "created_at",
    ];
}

/// Generated order line. Field order is the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub order_item_id: u64,
    pub order_id: u64,
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: f64,
    pub subtotal: f64,
    #[serde(with = "timestamp_format")]
    pub created_at: NaiveDateTime,
}

impl OrderItem {
    pub const COLUMNS: [&'static str; 7] = [
        "order_item_id",
        "order_id",
        "product_id",
        "quantity",
        "unit_price",
        "subtotal",
        "created_at",
    ];
}

/// `YYYY-MM-DD HH:MM:SS` timestamps, as the output tables carry them.
pub mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_weights_cover_every_status() {
        assert_eq!(OrderStatus::ALL.len(), OrderStatus::WEIGHTS.len());
        assert_eq!(OrderStatus::WEIGHTS.iter().sum::<u32>(), 100);
    }

    #[test]
    fn status_serializes_upper_case() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).expect("serialize status");
        assert_eq!(json, "\"CANCELLED\"");
        assert_eq!(OrderStatus::Paid.to_string(), "PAID");
    }
}
