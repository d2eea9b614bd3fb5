use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::{Plant, PlantId};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Days the calendar's "coming up" section reaches by default.
pub const DEFAULT_CALENDAR_WINDOW_DAYS: i64 = 7;

/// Whole days elapsed between `since` and `now`, floored.
///
/// A `since` slightly in the future counts as -1.
pub fn elapsed_days(since: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - since).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Days left before the next watering is due, clamped at zero.
///
/// A plant that was never watered is due now.
pub fn days_until_watering(
    last_watered: Option<DateTime<Utc>>,
    interval_days: u32,
    now: DateTime<Utc>,
) -> i64 {
    match last_watered {
        None => 0,
        Some(last) => (i64::from(interval_days) - elapsed_days(last, now)).max(0),
    }
}

/// Same arithmetic for fertilizing; `None` when the plant has no
/// fertilizing interval configured.
pub fn days_until_fertilizing(plant: &Plant, now: DateTime<Utc>) -> Option<i64> {
    plant
        .fertilizing_interval_days
        .map(|interval| days_until_watering(plant.last_fertilized, interval, now))
}

/// Calendar date of the next watering.
pub fn next_watering_date(plant: &Plant, now: DateTime<Utc>) -> NaiveDate {
    let days = days_until_watering(plant.last_watered, plant.watering_interval_days, now);
    (now + Duration::days(days)).date_naive()
}

/// Display bucket for a days-until-watering count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WateringUrgency {
    /// Water today.
    Urgent,
    /// Water tomorrow.
    Tomorrow,
    /// Due in two or three days.
    Warning,
    /// More than three days left.
    Normal,
}

impl WateringUrgency {
    pub fn from_days(days: i64) -> Self {
        match days {
            i64::MIN..=0 => WateringUrgency::Urgent,
            1 => WateringUrgency::Tomorrow,
            2..=3 => WateringUrgency::Warning,
            _ => WateringUrgency::Normal,
        }
    }
}

/// A plant paired with its watering countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledWatering<'a> {
    pub plant: &'a Plant,
    pub days_remaining: i64,
    pub due_date: NaiveDate,
}

impl ScheduledWatering<'_> {
    pub fn plant_id(&self) -> PlantId {
        self.plant.id
    }

    pub fn urgency(&self) -> WateringUrgency {
        WateringUrgency::from_days(self.days_remaining)
    }
}

/// Every plant with its countdown, soonest first. Ties keep input order.
pub fn upcoming_care(plants: &[Plant], now: DateTime<Utc>) -> Vec<ScheduledWatering<'_>> {
    let mut upcoming: Vec<_> = plants
        .iter()
        .map(|plant| {
            let days_remaining =
                days_until_watering(plant.last_watered, plant.watering_interval_days, now);
            ScheduledWatering {
                plant,
                days_remaining,
                due_date: (now + Duration::days(days_remaining)).date_naive(),
            }
        })
        .collect();
    upcoming.sort_by_key(|entry| entry.days_remaining);
    upcoming
}

/// Plants whose watering is due today, in input order.
pub fn plants_due_today(plants: &[Plant], now: DateTime<Utc>) -> Vec<&Plant> {
    plants
        .iter()
        .filter(|p| days_until_watering(p.last_watered, p.watering_interval_days, now) == 0)
        .collect()
}

/// Watering calendar split into today / coming up / later.
#[derive(Debug, Clone, Default)]
pub struct CareCalendar<'a> {
    pub today: Vec<ScheduledWatering<'a>>,
    pub coming_up: Vec<ScheduledWatering<'a>>,
    pub later: Vec<ScheduledWatering<'a>>,
}

impl CareCalendar<'_> {
    pub fn len(&self) -> usize {
        self.today.len() + self.coming_up.len() + self.later.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build the calendar; `window_days` bounds the "coming up" section.
pub fn care_calendar(plants: &[Plant], now: DateTime<Utc>, window_days: i64) -> CareCalendar<'_> {
    let mut calendar = CareCalendar::default();
    for entry in upcoming_care(plants, now) {
        match entry.days_remaining {
            0 => calendar.today.push(entry),
            d if d <= window_days => calendar.coming_up.push(entry),
            _ => calendar.later.push(entry),
        }
    }
    calendar
}
