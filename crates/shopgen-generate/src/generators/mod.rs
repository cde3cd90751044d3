//! Row generators for the order and order-item tables.

pub mod order_items;
pub mod orders;

/// Round to two decimal places from the exact binary value, ties to even.
/// `0.125` becomes `0.12` and `2.675` (stored just below) becomes `2.67`.
pub fn round_to_cents(value: f64) -> f64 {
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Derive a per-step seed from the run seed.
pub fn hash_seed(seed: u64, key: &str) -> u64 {
    let mut hash = seed ^ 0xcbf29ce484222325;
    for byte in key.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}
