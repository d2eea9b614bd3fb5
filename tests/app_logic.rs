//! Integration tests for the care workflow using a mock clock.
//!
//! These tests drive a `CareStore` the way the CLI does and check watering,
//! health, statistics and cascade behavior at fixed points in time.

use chrono::{DateTime, Duration, TimeZone, Utc};
use plant_diary::{
    ActionKind, CareAction, CareStore, Clock, HealthStatus, MockClock, NewCareAction, Plant,
    PlantDraft, PlantType, StorageKeys, aggregate, classify_health, days_until_watering,
    plants_due_today,
};

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 9, 30, 0).unwrap()
}

fn plant_watered(id: u64, interval: u32, days_ago: i64, now: DateTime<Utc>) -> Plant {
    let mut draft = PlantDraft::new(format!("Plant {id}"), PlantType::Philodendron, interval);
    draft.last_watered = Some(now - Duration::days(days_ago));
    let mut plant = Plant::from_draft(id, draft);
    plant.health = classify_health(&plant, now);
    plant
}

fn action(id: u64, plant_id: u64, kind: ActionKind, at: DateTime<Utc>) -> CareAction {
    CareAction {
        id,
        plant_id,
        kind,
        timestamp: at,
        quantity: None,
        notes: None,
    }
}

// ==================== Schedule Scenarios ====================

#[test]
fn test_watered_three_days_ago() {
    let plant = plant_watered(1, 7, 3, start());

    assert_eq!(days_until_watering(plant.last_watered, 7, start()), 4);
    assert_eq!(plant.health, HealthStatus::Healthy);
}

#[test]
fn test_watered_exactly_one_interval_ago() {
    let plant = plant_watered(1, 7, 7, start());

    assert_eq!(days_until_watering(plant.last_watered, 7, start()), 0);
    assert_eq!(plant.health, HealthStatus::NeedsAttention);
}

#[test]
fn test_overdue_is_clamped_but_critical() {
    let plant = plant_watered(1, 7, 10, start());

    assert_eq!(days_until_watering(plant.last_watered, 7, start()), 0);
    assert_eq!(plant.health, HealthStatus::Critical);
}

// ==================== Watering Transition ====================

#[test]
fn test_watering_overdue_plant_resets_schedule() {
    let clock = MockClock::new(start());
    let mut care = CareStore::from_parts(
        vec![plant_watered(7, 7, 10, start())],
        Vec::new(),
        StorageKeys::default(),
    );
    assert_eq!(care.plant(7).unwrap().health, HealthStatus::Critical);

    assert!(care.water_plant(7, &clock));

    let plant = care.plant(7).unwrap();
    assert_eq!(plant.health, HealthStatus::Healthy);
    assert_eq!(days_until_watering(plant.last_watered, 7, clock.now_utc()), 7);
}

#[test]
fn test_plant_drifts_into_attention_as_days_pass() {
    let clock = MockClock::new(start());
    let mut care = CareStore::new();
    let mut draft = PlantDraft::new("Calathea", PlantType::Calathea, 4);
    draft.last_watered = Some(clock.now_utc());
    let id = care.add_plant(draft, &clock).unwrap();

    let status_after = |days: i64| {
        let at = start() + Duration::days(days);
        classify_health(care.plant(id).unwrap(), at)
    };

    assert_eq!(status_after(0), HealthStatus::Healthy);
    assert_eq!(status_after(3), HealthStatus::Healthy);
    assert_eq!(status_after(4), HealthStatus::NeedsAttention);
    assert_eq!(status_after(5), HealthStatus::Critical);
}

#[test]
fn test_logged_watering_clears_due_list() {
    let clock = MockClock::new(start());
    let mut care = CareStore::from_parts(
        vec![plant_watered(1, 7, 7, start()), plant_watered(2, 7, 2, start())],
        Vec::new(),
        StorageKeys::default(),
    );
    let due: Vec<u64> = plants_due_today(care.plants(), clock.now_utc())
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(due, vec![1]);

    clock.advance(Duration::minutes(5));
    care.record_action(NewCareAction::new(1, ActionKind::Watering), &clock);

    assert!(plants_due_today(care.plants(), clock.now_utc()).is_empty());
    assert_eq!(care.history_for(1).len(), 1);
    let logged = care.history().latest(1, ActionKind::Watering).unwrap();
    assert_eq!(logged.timestamp, clock.now_utc());
    assert!(care.history().latest(2, ActionKind::Watering).is_none());
}

// ==================== Cascade Delete ====================

#[test]
fn test_delete_plant_42_purges_only_its_history() {
    let now = start();
    let plants = vec![plant_watered(42, 7, 1, now), plant_watered(43, 7, 1, now)];
    let history = vec![
        action(100, 42, ActionKind::Watering, now - Duration::days(3)),
        action(101, 43, ActionKind::Watering, now - Duration::days(3)),
        action(102, 42, ActionKind::Pruning, now - Duration::days(2)),
        action(103, 99, ActionKind::Inspection, now - Duration::days(1)),
    ];
    let mut care = CareStore::from_parts(plants, history, StorageKeys::default());

    assert!(care.delete_plant(42).is_some());

    let remaining: Vec<u64> = care.history().entries().iter().map(|a| a.id).collect();
    assert_eq!(remaining, vec![101, 103]);
    assert!(care.plant(42).is_none());
    assert!(care.plant(43).is_some());
}

// ==================== Statistics ====================

#[test]
fn test_aggregate_mixed_collection() {
    let now = start();
    let plants = vec![
        plant_watered(1, 7, 2, now),
        plant_watered(2, 7, 7, now),
        plant_watered(3, 7, 12, now),
        plant_watered(4, 14, 1, now),
    ];
    let statuses: Vec<HealthStatus> = plants.iter().map(|p| p.health).collect();
    assert_eq!(
        statuses,
        vec![
            HealthStatus::Healthy,
            HealthStatus::NeedsAttention,
            HealthStatus::Critical,
            HealthStatus::Healthy,
        ]
    );

    let stats = aggregate(&plants, now);

    assert_eq!(stats.total, 4);
    assert_eq!(stats.healthy, 2);
    assert_eq!(stats.needing_attention, 2);
    assert_eq!(stats.due_for_water, 2);
    assert_eq!(stats.percent_healthy, 50);
}

#[test]
fn test_stats_follow_the_clock() {
    let clock = MockClock::new(start());
    let mut care = CareStore::new();
    care.seed_samples(&clock).unwrap();

    assert_eq!(care.stats(clock.now_utc()).percent_healthy, 75);

    // Four days later the Monstera is due, the Ficus and Pothos are overdue
    // and only the Snake Plant is still fine.
    clock.advance(Duration::days(4));
    let stats = care.stats(clock.now_utc());
    assert_eq!(stats.healthy, 1);
    assert_eq!(stats.needing_attention, 3);
    assert_eq!(stats.percent_healthy, 25);
}
