//! Append-only care history.
//!
//! Entries reference plants by id only. The ledger never touches plant
//! records: recording a watering here does not water the plant, the
//! [`CareStore`](crate::store::CareStore) coordinates that.

use chrono::{DateTime, Utc};

use crate::ids::IdGenerator;
use crate::model::{ActionId, ActionKind, CareAction, PlantId};
use crate::traits::Clock;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CareHistory {
    entries: Vec<CareAction>,
}

impl CareHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<CareAction>) -> Self {
        Self { entries }
    }

    /// Append a new entry and return its id.
    pub fn add_action(
        &mut self,
        plant_id: PlantId,
        kind: ActionKind,
        timestamp: DateTime<Utc>,
        quantity: Option<String>,
        notes: Option<String>,
        ids: &mut IdGenerator,
        clock: &dyn Clock,
    ) -> ActionId {
        let id = ids.next_id(clock);
        self.entries.push(CareAction {
            id,
            plant_id,
            kind,
            timestamp,
            quantity,
            notes,
        });
        id
    }

    /// Delete the entry with `id`. Unknown ids are a no-op.
    pub fn remove_action(&mut self, id: ActionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Delete every entry for `plant_id`, returning how many were removed.
    pub fn purge_for_plant(&mut self, plant_id: PlantId) -> usize {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.plant_id != plant_id);
        before - self.entries.len()
    }

    /// Entries in append order.
    pub fn entries(&self) -> &[CareAction] {
        &self.entries
    }

    pub fn get(&self, id: ActionId) -> Option<&CareAction> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Entries for one plant, newest first. Equal timestamps keep append order.
    pub fn for_plant(&self, plant_id: PlantId) -> Vec<&CareAction> {
        let mut found: Vec<_> = self
            .entries
            .iter()
            .filter(|entry| entry.plant_id == plant_id)
            .collect();
        found.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        found
    }

    /// Most recent entry of `kind` for a plant.
    pub fn latest(&self, plant_id: PlantId, kind: ActionKind) -> Option<&CareAction> {
        self.entries
            .iter()
            .filter(|entry| entry.plant_id == plant_id && entry.kind == kind)
            .max_by_key(|entry| entry.timestamp)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;
    use crate::traits::MockClock;

    fn clock() -> MockClock {
        MockClock::new(Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap())
    }

    fn ledger_with(entries: &[(PlantId, ActionKind, i64)]) -> (CareHistory, Vec<ActionId>) {
        let clock = clock();
        let mut ids = IdGenerator::new();
        let mut history = CareHistory::new();
        let added = entries
            .iter()
            .map(|&(plant_id, kind, days_ago)| {
                history.add_action(
                    plant_id,
                    kind,
                    clock.now_utc() - Duration::days(days_ago),
                    None,
                    None,
                    &mut ids,
                    &clock,
                )
            })
            .collect();
        (history, added)
    }

    #[test]
    fn test_add_appends_in_order_with_unique_ids() {
        let (history, ids) = ledger_with(&[
            (1, ActionKind::Watering, 0),
            (1, ActionKind::Pruning, 5),
            (2, ActionKind::Watering, 1),
        ]);

        assert_eq!(history.len(), 3);
        assert!(ids[0] < ids[1] && ids[1] < ids[2]);
        let order: Vec<ActionId> = history.entries().iter().map(|e| e.id).collect();
        assert_eq!(order, ids);
    }

    #[test]
    fn test_remove_action() {
        let (mut history, ids) =
            ledger_with(&[(1, ActionKind::Watering, 0), (1, ActionKind::Pruning, 1)]);

        assert!(history.remove_action(ids[0]));
        assert_eq!(history.len(), 1);
        assert!(history.get(ids[0]).is_none());
        assert!(history.get(ids[1]).is_some());
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let (mut history, _) = ledger_with(&[(1, ActionKind::Watering, 0)]);

        assert!(!history.remove_action(999));
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_purge_for_plant_leaves_others() {
        let (mut history, _) = ledger_with(&[
            (42, ActionKind::Watering, 0),
            (7, ActionKind::Watering, 0),
            (42, ActionKind::Repotting, 3),
            (8, ActionKind::Inspection, 2),
        ]);

        assert_eq!(history.purge_for_plant(42), 2);
        assert!(history.entries().iter().all(|e| e.plant_id != 42));
        assert_eq!(history.len(), 2);
        assert_eq!(history.purge_for_plant(42), 0);
    }

    #[test]
    fn test_for_plant_is_newest_first() {
        let (history, ids) = ledger_with(&[
            (1, ActionKind::Watering, 10),
            (1, ActionKind::Fertilization, 2),
            (2, ActionKind::Watering, 0),
            (1, ActionKind::Pruning, 5),
        ]);

        let found: Vec<ActionId> = history.for_plant(1).iter().map(|e| e.id).collect();
        assert_eq!(found, vec![ids[1], ids[3], ids[0]]);
    }

    #[test]
    fn test_latest_by_kind() {
        let (history, ids) = ledger_with(&[
            (1, ActionKind::Watering, 10),
            (1, ActionKind::Watering, 2),
            (1, ActionKind::Pruning, 1),
        ]);

        assert_eq!(history.latest(1, ActionKind::Watering).map(|e| e.id), Some(ids[1]));
        assert!(history.latest(1, ActionKind::Treatment).is_none());
    }
}
