use chrono::{DateTime, Utc};

use crate::{
    health::classify_health,
    model::{HealthStatus, Plant},
    schedule::days_until_watering,
};

// ==================== Dashboard Statistics ====================

/// Summary counts shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CareStats {
    /// Number of plants
    pub total: usize,
    /// Plants whose watering is due today or overdue
    pub due_for_water: usize,
    /// Plants classified `Healthy`
    pub healthy: usize,
    /// Plants classified `NeedsAttention` or `Critical`
    pub needing_attention: usize,
    /// `healthy / total` as a percentage, rounded half up; 0 when empty
    pub percent_healthy: u8,
}

/// Reduce a plant collection into dashboard statistics.
///
/// Health is derived from each plant's watering state at `now`, not read
/// from the stored field, so every plant lands in exactly one of `healthy`
/// and `needing_attention`.
pub fn aggregate(plants: &[Plant], now: DateTime<Utc>) -> CareStats {
    let mut stats = CareStats {
        total: plants.len(),
        ..CareStats::default()
    };

    for plant in plants {
        if days_until_watering(plant.last_watered, plant.watering_interval_days, now) == 0 {
            stats.due_for_water += 1;
        }
        match classify_health(plant, now) {
            HealthStatus::Healthy => stats.healthy += 1,
            HealthStatus::NeedsAttention | HealthStatus::Critical => stats.needing_attention += 1,
        }
    }

    stats.percent_healthy = rounded_percent(stats.healthy, stats.total);
    stats
}

/// `part / whole * 100`, rounded half up, in integer arithmetic so ties like
/// 12.5% always round to 13.
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let part = part.min(whole) as u64;
    let whole = whole as u64;
    let percent = (200 * part + whole) / (2 * whole);
    u8::try_from(percent).unwrap_or(100)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::model::{PlantDraft, PlantType};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    fn plant(id: u64, interval: u32, watered_days_ago: Option<i64>) -> Plant {
        let mut draft = PlantDraft::new(format!("Plant {id}"), PlantType::Ficus, interval);
        draft.last_watered = watered_days_ago.map(|d| now() - Duration::days(d));
        Plant::from_draft(id, draft)
    }

    #[test]
    fn test_empty_collection() {
        let stats = aggregate(&[], now());
        assert_eq!(stats, CareStats::default());
        assert_eq!(stats.percent_healthy, 0);
    }

    #[test]
    fn test_mixed_collection() {
        // healthy, needs-attention, critical, healthy
        let plants = vec![
            plant(1, 7, Some(3)),
            plant(2, 7, Some(7)),
            plant(3, 7, Some(10)),
            plant(4, 14, Some(1)),
        ];

        let stats = aggregate(&plants, now());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.healthy, 2);
        assert_eq!(stats.needing_attention, 2);
        assert_eq!(stats.due_for_water, 2);
        assert_eq!(stats.percent_healthy, 50);
    }

    #[test]
    fn test_stored_health_field_is_ignored() {
        let mut p = plant(1, 7, Some(10));
        p.health = HealthStatus::Healthy;

        let stats = aggregate(&[p], now());

        assert_eq!(stats.healthy, 0);
        assert_eq!(stats.needing_attention, 1);
    }

    #[test]
    fn test_never_watered_counts_as_due() {
        let stats = aggregate(&[plant(1, 7, None)], now());
        assert_eq!(stats.due_for_water, 1);
        assert_eq!(stats.needing_attention, 1);
    }

    #[test]
    fn test_rounding_half_up_boundary() {
        // 1/8 = 12.5%
        assert_eq!(rounded_percent(1, 8), 13);
        // 3/8 = 37.5%
        assert_eq!(rounded_percent(3, 8), 38);
        // 1/3 = 33.33%
        assert_eq!(rounded_percent(1, 3), 33);
        // 2/3 = 66.67%
        assert_eq!(rounded_percent(2, 3), 67);
        assert_eq!(rounded_percent(0, 5), 0);
        assert_eq!(rounded_percent(5, 5), 100);
    }

    #[test]
    fn test_rounding_through_aggregate() {
        let mut plants = vec![plant(1, 7, Some(1))];
        plants.extend((2..=8).map(|id| plant(id, 7, Some(9))));

        let stats = aggregate(&plants, now());

        assert_eq!(stats.healthy, 1);
        assert_eq!(stats.percent_healthy, 13);
    }

    #[cfg(test)]
    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        fn arb_plants() -> impl Strategy<Value = Vec<Plant>> {
            prop::collection::vec((1u32..30, prop::option::of(0i64..60)), 0..40).prop_map(
                |specs| {
                    specs
                        .into_iter()
                        .enumerate()
                        .map(|(i, (interval, ago))| plant(i as u64, interval, ago))
                        .collect()
                },
            )
        }

        proptest! {
            #[test]
            fn health_buckets_partition_total(plants in arb_plants()) {
                let stats = aggregate(&plants, now());
                prop_assert_eq!(stats.healthy + stats.needing_attention, stats.total);
                prop_assert!(stats.due_for_water <= stats.needing_attention);
            }

            #[test]
            fn percent_is_bounded(plants in arb_plants()) {
                let stats = aggregate(&plants, now());
                prop_assert!(stats.percent_healthy <= 100);
                if stats.total == 0 {
                    prop_assert_eq!(stats.percent_healthy, 0);
                }
            }

            #[test]
            fn rounded_percent_matches_float_rounding(part in 0usize..500, whole in 1usize..500) {
                let part = part.min(whole);
                let expected = ((part as f64 / whole as f64) * 100.0 + 0.5).floor();
                // ties are exact in integer arithmetic; float may land a hair off
                let got = f64::from(rounded_percent(part, whole));
                prop_assert!((got - expected).abs() <= 1.0);
            }
        }
    }
}
