//! Case-insensitive substring search over plants.

use crate::model::Plant;

/// Whether `plant` matches an already trimmed and lower-cased `needle`.
fn matches_needle(plant: &Plant, needle: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(needle);

    contains(&plant.name)
        || plant.scientific_name.as_deref().is_some_and(contains)
        || contains(plant.plant_type.as_str())
        || plant.location.as_deref().is_some_and(contains)
}

/// Plants whose name, scientific name, type or location contain `query`.
///
/// Order is preserved; a blank query returns every plant.
pub fn filter_plants<'a>(plants: &'a [Plant], query: &str) -> Vec<&'a Plant> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return plants.iter().collect();
    }
    plants
        .iter()
        .filter(|plant| matches_needle(plant, &needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PlantDraft, PlantType};

    fn plant(
        id: u64,
        name: &str,
        scientific: Option<&str>,
        kind: PlantType,
        location: Option<&str>,
    ) -> Plant {
        let mut draft = PlantDraft::new(name, kind, 7);
        draft.scientific_name = scientific.map(str::to_string);
        draft.location = location.map(str::to_string);
        Plant::from_draft(id, draft)
    }

    fn collection() -> Vec<Plant> {
        vec![
            plant(
                1,
                "Monstera Deliciosa",
                Some("Monstera deliciosa"),
                PlantType::Monstera,
                Some("Living Room"),
            ),
            plant(2, "Fiddle Leaf", Some("Ficus lyrata"), PlantType::Ficus, Some("Bedroom")),
            plant(
                3,
                "Sansa",
                Some("Sansevieria trifasciata"),
                PlantType::SnakePlant,
                Some("Office"),
            ),
            plant(4, "Golden Pothos", None, PlantType::Pothos, None),
        ]
    }

    fn ids(found: &[&Plant]) -> Vec<u64> {
        found.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_blank_query_returns_everything_in_order() {
        let plants = collection();
        assert_eq!(ids(&filter_plants(&plants, "")), vec![1, 2, 3, 4]);
        assert_eq!(ids(&filter_plants(&plants, "   ")), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_matches_name_case_insensitively() {
        let plants = collection();
        assert_eq!(ids(&filter_plants(&plants, "POTHOS")), vec![4]);
    }

    #[test]
    fn test_matches_scientific_name() {
        let plants = collection();
        assert_eq!(ids(&filter_plants(&plants, "lyrata")), vec![2]);
    }

    #[test]
    fn test_matches_type_spelling() {
        let plants = collection();
        assert_eq!(ids(&filter_plants(&plants, "snake")), vec![3]);
    }

    #[test]
    fn test_matches_location_and_trims_query() {
        let plants = collection();
        assert_eq!(ids(&filter_plants(&plants, "  room ")), vec![1, 2]);
    }

    #[test]
    fn test_no_fuzzy_matching() {
        let plants = collection();
        assert!(filter_plants(&plants, "monstra").is_empty());
        assert!(filter_plants(&plants, "golden leaf").is_empty());
    }

    #[cfg(test)]
    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        proptest! {
            #[test]
            fn filter_is_idempotent(query in "[a-zA-Z ]{0,6}") {
                let plants = collection();
                let once: Vec<Plant> =
                    filter_plants(&plants, &query).into_iter().cloned().collect();
                let twice: Vec<Plant> =
                    filter_plants(&once, &query).into_iter().cloned().collect();
                prop_assert_eq!(once, twice);
            }

            #[test]
            fn filter_preserves_relative_order(query in "[a-z]{0,3}") {
                let plants = collection();
                let found = ids(&filter_plants(&plants, &query));
                let mut sorted = found.clone();
                sorted.sort_unstable();
                prop_assert_eq!(found, sorted);
            }
        }
    }
}
