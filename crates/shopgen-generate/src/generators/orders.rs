use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, SubsecRound, Utc};
use fake::Fake;
use fake::faker::chrono::en::DateTimeBetween;
use rand::Rng;
use rand::RngCore;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use crate::errors::GenerationError;
use crate::generators::round_to_cents;
use crate::records::{Order, OrderStatus, SellerId};

/// Number of orders a run produces.
pub const ORDER_COUNT: u64 = 3_000_000;

const WINDOW_START: (i32, u32, u32) = (2025, 8, 1);
const WINDOW_END: (i32, u32, u32) = (2025, 10, 31);
const SECONDS_PER_DAY: i64 = 86_400;
const AMOUNT_MIN: f64 = 50_000.0;
const AMOUNT_MAX: f64 = 50_000_000.0;
const CREATED_AT_LOOKBACK_DAYS: i64 = 365;

/// Draws orders against a seller list.
#[derive(Debug, Clone)]
pub struct OrderGenerator {
    window_start: NaiveDateTime,
    window_days: i64,
    statuses: WeightedIndex<u32>,
    created_after: DateTime<Utc>,
    created_before: DateTime<Utc>,
}

impl OrderGenerator {
    /// `now` bounds the `created_at` window, which spans the year before it.
    pub fn new(now: DateTime<Utc>) -> Result<Self, GenerationError> {
        let start = window_date(WINDOW_START)?;
        let end = window_date(WINDOW_END)?;
        let statuses = WeightedIndex::new(OrderStatus::WEIGHTS)
            .map_err(|err| GenerationError::InvalidConfig(format!("status weights: {err}")))?;
        let created_after = now
            .checked_sub_signed(Duration::days(CREATED_AT_LOOKBACK_DAYS))
            .ok_or_else(|| {
                GenerationError::InvalidConfig(format!("no year before reference time {now}"))
            })?;

        Ok(Self {
            window_start: start.and_time(NaiveTime::default()),
            window_days: (end - start).num_days(),
            statuses,
            created_after,
            created_before: now,
        })
    }

    /// First and last instant an `order_date` can take.
    pub fn order_window(&self) -> (NaiveDateTime, NaiveDateTime) {
        let last = self.window_start
            + Duration::days(self.window_days)
            + Duration::seconds(SECONDS_PER_DAY - 1);
        (self.window_start, last)
    }

    /// Produce `count` orders with ids `1..=count`.
    pub fn generate(
        &self,
        count: u64,
        seller_ids: &[SellerId],
        rng: &mut dyn RngCore,
    ) -> Result<Vec<Order>, GenerationError> {
        if seller_ids.is_empty() {
            return Err(GenerationError::NoSellers);
        }

        let mut orders = Vec::with_capacity(count as usize);
        for order_id in 1..=count {
            let order_date = self.order_date(rng);
            let seller_id = seller_ids[rng.random_range(0..seller_ids.len())];
            let status = OrderStatus::ALL[self.statuses.sample(rng)];
            let total_amount = round_to_cents(rng.random_range(AMOUNT_MIN..AMOUNT_MAX));
            let created_at = self.created_at(rng);

            orders.push(Order {
                order_id,
                order_date,
                seller_id,
                status,
                total_amount,
                created_at,
            });
        }
        Ok(orders)
    }

    /// Day and second of day are independent uniform draws.
    fn order_date(&self, rng: &mut dyn RngCore) -> NaiveDateTime {
        let day = rng.random_range(0..=self.window_days);
        let second = rng.random_range(0..SECONDS_PER_DAY);
        self.window_start + Duration::days(day) + Duration::seconds(second)
    }

    fn created_at(&self, rng: &mut dyn RngCore) -> NaiveDateTime {
        let value: DateTime<Utc> =
            DateTimeBetween(self.created_after, self.created_before).fake_with_rng(rng);
        value.naive_utc().trunc_subsecs(0)
    }
}

fn window_date((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, GenerationError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        GenerationError::InvalidConfig(format!("invalid window date {year}-{month}-{day}"))
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    fn reference_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 15, 12, 0, 0)
            .single()
            .expect("valid reference time")
    }

    fn generator() -> OrderGenerator {
        OrderGenerator::new(reference_time()).expect("order generator")
    }

    #[test]
    fn order_ids_are_dense() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let orders = generator()
            .generate(500, &[1, 2, 3], &mut rng)
            .expect("generate orders");

        let ids: Vec<u64> = orders.iter().map(|order| order.order_id).collect();
        assert_eq!(ids, (1..=500).collect::<Vec<_>>());
    }

    #[test]
    fn order_dates_stay_inside_window() {
        let generator = generator();
        let (first, last) = generator.order_window();
        assert_eq!(first.to_string(), "2025-08-01 00:00:00");
        assert_eq!(last.to_string(), "2025-10-31 23:59:59");

        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let orders = generator
            .generate(5_000, &[1], &mut rng)
            .expect("generate orders");
        for order in &orders {
            assert!(order.order_date >= first && order.order_date <= last);
            assert_eq!(order.order_date, order.order_date.trunc_subsecs(0));
        }
    }

    #[test]
    fn amounts_and_creation_times_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let orders = generator()
            .generate(2_000, &[1], &mut rng)
            .expect("generate orders");
        let now = reference_time().naive_utc();
        let year_ago = now - Duration::days(365);

        for order in &orders {
            assert!(order.total_amount >= AMOUNT_MIN && order.total_amount <= AMOUNT_MAX);
            assert_eq!(order.total_amount, round_to_cents(order.total_amount));
            assert!(order.created_at >= year_ago && order.created_at <= now);
        }
    }

    #[test]
    fn creation_window_is_365_days() {
        let generator = generator();
        assert_eq!(generator.created_before, reference_time());
        assert_eq!(
            generator.created_before - generator.created_after,
            Duration::days(365)
        );
        // leap day inside the window: twelve months would be 366 days
        let leap = OrderGenerator::new(
            Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0)
                .single()
                .expect("valid reference time"),
        )
        .expect("order generator");
        assert_eq!(
            leap.created_after,
            Utc.with_ymd_and_hms(2023, 3, 11, 0, 0, 0)
                .single()
                .expect("valid lower bound")
        );
    }

    #[test]
    fn sellers_drawn_from_supplied_list() {
        let sellers = [11, 22, 33];
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let orders = generator()
            .generate(1_000, &sellers, &mut rng)
            .expect("generate orders");

        assert!(orders.iter().all(|order| sellers.contains(&order.seller_id)));
        for seller in sellers {
            assert!(orders.iter().any(|order| order.seller_id == seller));
        }
    }

    #[test]
    fn status_distribution_matches_weights() {
        let count = 100_000;
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let orders = generator()
            .generate(count, &[1, 2], &mut rng)
            .expect("generate orders");

        let mut counts: BTreeMap<OrderStatus, u64> = BTreeMap::new();
        for order in &orders {
            *counts.entry(order.status).or_insert(0) += 1;
        }
        for (status, weight) in OrderStatus::ALL.iter().zip(OrderStatus::WEIGHTS) {
            let observed = counts.get(status).copied().unwrap_or(0) as f64 / count as f64;
            let expected = weight as f64 / 100.0;
            assert!(
                (observed - expected).abs() < 0.01,
                "{status}: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn same_seed_same_orders() {
        let generator = generator();
        let a = generator
            .generate(200, &[1, 2, 3], &mut ChaCha8Rng::seed_from_u64(9))
            .expect("generate a");
        let b = generator
            .generate(200, &[1, 2, 3], &mut ChaCha8Rng::seed_from_u64(9))
            .expect("generate b");
        assert_eq!(a, b);
    }

    #[test]
    fn zero_orders_is_empty() {
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let orders = generator().generate(0, &[1], &mut rng).expect("generate");
        assert!(orders.is_empty());
    }

    #[test]
    fn empty_seller_list_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let err = generator()
            .generate(10, &[], &mut rng)
            .expect_err("no sellers");
        assert!(matches!(err, GenerationError::NoSellers));
    }
}
