//! The diary's in-memory state: plants, care history and id allocation.
//!
//! Every mutation goes through `&mut CareStore` and marks the store dirty;
//! nothing is written back until [`CareStore::save`] is called.

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info};

use crate::analytics::{CareStats, aggregate};
use crate::health::{apply_watering, classify_health, refresh_health};
use crate::ids::IdGenerator;
use crate::ledger::CareHistory;
use crate::model::{ActionId, ActionKind, CareAction, NewCareAction, Plant, PlantDraft, PlantId};
use crate::persistence::{StorageKeys, load_history, load_plants, save_history, save_plants};
use crate::samples::sample_plants;
use crate::schedule::{CareCalendar, care_calendar};
use crate::search::filter_plants;
use crate::traits::{Clock, KeyValueStore};
use crate::validation::{ValidationErrors, validate_plant};

/// Errors surfaced by store operations that refer to a plant by id.
#[derive(Debug, Error)]
pub enum CareError {
    #[error("no plant with id {0}")]
    UnknownPlant(PlantId),
    #[error("no care action with id {0}")]
    UnknownAction(ActionId),
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
}

#[derive(Debug, Clone, Default)]
pub struct CareStore {
    plants: Vec<Plant>,
    history: CareHistory,
    ids: IdGenerator,
    keys: StorageKeys,
    dirty: bool,
}

impl CareStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty store persisting under custom keys.
    pub fn with_keys(keys: StorageKeys) -> Self {
        Self {
            keys,
            ..Self::default()
        }
    }

    /// Build a store from already loaded collections. Ids continue above
    /// the largest existing plant or action id.
    pub fn from_parts(plants: Vec<Plant>, history: Vec<CareAction>, keys: StorageKeys) -> Self {
        let ids = IdGenerator::seeded(
            plants
                .iter()
                .map(|p| p.id)
                .chain(history.iter().map(|a| a.id)),
        );
        Self {
            plants,
            history: CareHistory::from_entries(history),
            ids,
            keys,
            dirty: false,
        }
    }

    /// Load both collections and refresh every plant's health against the
    /// clock. Failures degrade to empty collections.
    pub fn load(store: &dyn KeyValueStore, keys: StorageKeys, clock: &dyn Clock) -> Self {
        let plants = load_plants(store, &keys);
        let history = load_history(store, &keys);
        let mut care = Self::from_parts(plants, history, keys);

        let changed = refresh_health(&mut care.plants, clock.now_utc());
        if changed > 0 {
            debug!("Health changed for {} plants since last save", changed);
            care.dirty = true;
        }
        info!(
            "Loaded {} plants and {} care actions",
            care.plants.len(),
            care.history.len()
        );
        care
    }

    /// Write both collections. The store stays dirty if either write fails.
    pub fn save(&mut self, store: &dyn KeyValueStore) -> bool {
        let plants_ok = save_plants(store, &self.keys, &self.plants);
        let history_ok = save_history(store, &self.keys, self.history.entries());
        let ok = plants_ok && history_ok;
        if ok {
            self.dirty = false;
            debug!("Saved {} plants and {} care actions", self.plants.len(), self.history.len());
        }
        ok
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    // ==================== Plants ====================

    pub fn add_plant(
        &mut self,
        draft: PlantDraft,
        clock: &dyn Clock,
    ) -> Result<PlantId, ValidationErrors> {
        validate_plant(&draft)?;

        let id = self.ids.next_id(clock);
        let mut plant = Plant::from_draft(id, draft);
        plant.health = classify_health(&plant, clock.now_utc());
        info!("Added plant {} ({})", plant.name, id);

        self.plants.push(plant);
        self.dirty = true;
        Ok(id)
    }

    /// Replace a plant's editable fields. Health is recomputed from the new
    /// values. Returns `Ok(false)` when the id is unknown.
    pub fn edit_plant(
        &mut self,
        id: PlantId,
        draft: PlantDraft,
        clock: &dyn Clock,
    ) -> Result<bool, ValidationErrors> {
        validate_plant(&draft)?;

        let Some(slot) = self.plants.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        let mut plant = Plant::from_draft(id, draft);
        plant.health = classify_health(&plant, clock.now_utc());
        *slot = plant;
        info!("Updated plant {}", id);

        self.dirty = true;
        Ok(true)
    }

    /// Water a plant now without writing a ledger entry.
    pub fn water_plant(&mut self, id: PlantId, clock: &dyn Clock) -> bool {
        let Some(plant) = self.plant_mut(id) else {
            return false;
        };
        apply_watering(plant, clock.now_utc());
        info!("Watered plant {}", id);

        self.dirty = true;
        true
    }

    /// Remove a plant together with its care history.
    pub fn delete_plant(&mut self, id: PlantId) -> Option<Plant> {
        let index = self.plants.iter().position(|p| p.id == id)?;
        let plant = self.plants.remove(index);
        let purged = self.history.purge_for_plant(id);
        info!("Deleted plant {} and {} care actions", id, purged);

        self.dirty = true;
        Some(plant)
    }

    /// Add every sample plant, returning the new ids.
    pub fn seed_samples(&mut self, clock: &dyn Clock) -> Result<Vec<PlantId>, ValidationErrors> {
        sample_plants(clock.now_utc())
            .into_iter()
            .map(|draft| self.add_plant(draft, clock))
            .collect()
    }

    // ==================== Care history ====================

    /// Append a care action.
    ///
    /// A watering action waters the plant now, whatever date the entry
    /// carries. A fertilization or inspection updates the matching
    /// last-date field, which only ever moves forward.
    pub fn record_action(&mut self, action: NewCareAction, clock: &dyn Clock) -> ActionId {
        let now = clock.now_utc();
        let timestamp = action.timestamp.unwrap_or(now);

        let id = self.history.add_action(
            action.plant_id,
            action.kind,
            timestamp,
            action.quantity,
            action.notes,
            &mut self.ids,
            clock,
        );
        info!("Recorded {} for plant {} ({})", action.kind, action.plant_id, id);

        if let Some(plant) = self.plant_mut(action.plant_id) {
            match action.kind {
                ActionKind::Watering => apply_watering(plant, now),
                ActionKind::Fertilization => {
                    if is_newer(plant.last_fertilized, timestamp) {
                        plant.last_fertilized = Some(timestamp);
                    }
                }
                ActionKind::Inspection => {
                    if is_newer(plant.last_inspected, timestamp) {
                        plant.last_inspected = Some(timestamp);
                    }
                }
                _ => {}
            }
        }

        self.dirty = true;
        id
    }

    /// Record an action for a plant that must exist.
    pub fn record_action_checked(
        &mut self,
        action: NewCareAction,
        clock: &dyn Clock,
    ) -> Result<ActionId, CareError> {
        if self.plant(action.plant_id).is_none() {
            return Err(CareError::UnknownPlant(action.plant_id));
        }
        Ok(self.record_action(action, clock))
    }

    pub fn remove_action(&mut self, id: ActionId) -> bool {
        let removed = self.history.remove_action(id);
        if removed {
            info!("Removed care action {}", id);
            self.dirty = true;
        }
        removed
    }

    // ==================== Read views ====================

    pub fn plants(&self) -> &[Plant] {
        &self.plants
    }

    pub fn plant(&self, id: PlantId) -> Option<&Plant> {
        self.plants.iter().find(|p| p.id == id)
    }

    fn plant_mut(&mut self, id: PlantId) -> Option<&mut Plant> {
        self.plants.iter_mut().find(|p| p.id == id)
    }

    pub fn history(&self) -> &CareHistory {
        &self.history
    }

    /// A plant's care history, newest first.
    pub fn history_for(&self, id: PlantId) -> Vec<&CareAction> {
        self.history.for_plant(id)
    }

    pub fn search(&self, query: &str) -> Vec<&Plant> {
        filter_plants(&self.plants, query)
    }

    pub fn stats(&self, now: DateTime<Utc>) -> CareStats {
        aggregate(&self.plants, now)
    }

    pub fn calendar(&self, now: DateTime<Utc>, window_days: i64) -> CareCalendar<'_> {
        care_calendar(&self.plants, now, window_days)
    }
}

fn is_newer(current: Option<DateTime<Utc>>, candidate: DateTime<Utc>) -> bool {
    current.is_none_or(|current| candidate >= current)
}
