//! Plant Diary Library
//!
//! Core of the plant diary: the plant collection and care-history ledger,
//! watering schedule, health classification, dashboard statistics and the
//! persistence adapter, exposed for the CLI and for testing.

pub mod analytics;
pub mod catalog;
pub mod config;
pub mod format;
pub mod health;
pub mod ids;
pub mod ledger;
pub mod model;
pub mod persistence;
pub mod samples;
pub mod schedule;
pub mod search;
pub mod store;
pub mod traits;
pub mod validation;

// Re-export commonly used types
pub use analytics::{CareStats, aggregate, rounded_percent};
pub use catalog::{Ailment, AilmentKind, Severity};
pub use config::AppConfig;
pub use format::{Locale, action_label, health_label, relative_date, watering_label};
pub use health::{apply_watering, classify_health, days_overdue, refresh_health};
pub use ids::IdGenerator;
pub use ledger::CareHistory;
pub use model::{
    ActionId, ActionKind, CareAction, HealthStatus, HumidityLevel, LightLevel, NewCareAction, Plant,
    PlantDraft, PlantId, PlantType,
};
pub use persistence::{
    FileStore, PersistenceError, Preferences, StorageKeys, View, export_history_csv,
};
pub use samples::sample_plants;
pub use schedule::{
    CareCalendar, ScheduledWatering, WateringUrgency, care_calendar, days_until_watering,
    plants_due_today, upcoming_care,
};
pub use search::filter_plants;
pub use store::{CareError, CareStore};
pub use traits::{Clock, KeyValueStore, MemoryStore, MockClock, StoreError, SystemClock};
pub use validation::{ValidationErrors, ValidationIssue, validate_plant};
