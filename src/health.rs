//! Health status derivation.
//!
//! Status is a pure function of last-watered, interval and now. The only
//! exception is [`apply_watering`], which assigns `Healthy` directly.

use chrono::{DateTime, Utc};

use crate::model::{HealthStatus, Plant};
use crate::schedule::{days_until_watering, elapsed_days};

/// Days past the due date, or `None` when the plant was never watered.
///
/// Unlike [`days_until_watering`] this is not clamped, so it is the only way
/// to tell "due today" from "overdue".
pub fn days_overdue(plant: &Plant, now: DateTime<Utc>) -> Option<i64> {
    plant
        .last_watered
        .map(|last| elapsed_days(last, now) - i64::from(plant.watering_interval_days))
}

/// Classify a plant's health.
///
/// - `Critical`: more days have elapsed than the interval allows.
/// - `NeedsAttention`: watering is due today (or the plant was never watered).
/// - `Healthy`: otherwise.
pub fn classify_health(plant: &Plant, now: DateTime<Utc>) -> HealthStatus {
    if days_overdue(plant, now).is_some_and(|overdue| overdue > 0) {
        return HealthStatus::Critical;
    }
    if days_until_watering(plant.last_watered, plant.watering_interval_days, now) == 0 {
        return HealthStatus::NeedsAttention;
    }
    HealthStatus::Healthy
}

/// Record a watering at `now` and mark the plant healthy.
pub fn apply_watering(plant: &mut Plant, now: DateTime<Utc>) {
    plant.last_watered = Some(now);
    plant.health = HealthStatus::Healthy;
}

/// Recompute the stored status of every plant. Returns how many changed.
pub fn refresh_health(plants: &mut [Plant], now: DateTime<Utc>) -> usize {
    let mut changed = 0;
    for plant in plants.iter_mut() {
        let status = classify_health(plant, now);
        if plant.health != status {
            plant.health = status;
            changed += 1;
        }
    }
    changed
}
