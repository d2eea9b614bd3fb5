//! Starter plants for an empty diary.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use crate::model::{LightLevel, PlantDraft, PlantType};

struct Sample {
    name: &'static str,
    scientific_name: &'static str,
    plant_type: PlantType,
    acquired_on: (i32, u32, u32),
    location: &'static str,
    photo: &'static str,
    notes: &'static str,
    watering_interval_days: u32,
    light: LightLevel,
    watered_days_ago: i64,
}

const SAMPLES: [Sample; 4] = [
    Sample {
        name: "Monstera Deliciosa",
        scientific_name: "Monstera deliciosa",
        plant_type: PlantType::Monstera,
        acquired_on: (2024, 1, 15),
        location: "Living Room",
        photo: "https://images.unsplash.com/photo-1614594975525-e45190c55d0b?w=800",
        notes: "Beautiful large leaves, needs indirect sunlight",
        watering_interval_days: 7,
        light: LightLevel::BrightIndirect,
        watered_days_ago: 3,
    },
    Sample {
        name: "Ficus Lyrata",
        scientific_name: "Ficus lyrata",
        plant_type: PlantType::Ficus,
        acquired_on: (2024, 2, 10),
        location: "Bedroom",
        photo: "https://images.unsplash.com/photo-1592150621744-aca64f48394a?w=800",
        notes: "Fiddle leaf fig, sensitive to overwatering",
        watering_interval_days: 10,
        light: LightLevel::BrightIndirect,
        watered_days_ago: 8,
    },
    Sample {
        name: "Snake Plant",
        scientific_name: "Sansevieria trifasciata",
        plant_type: PlantType::SnakePlant,
        acquired_on: (2023, 11, 20),
        location: "Office",
        photo: "https://images.unsplash.com/photo-1593482892290-f54927ae1bb6?w=800",
        notes: "Very low maintenance, drought tolerant",
        watering_interval_days: 14,
        light: LightLevel::Low,
        watered_days_ago: 5,
    },
    Sample {
        name: "Pothos",
        scientific_name: "Epipremnum aureum",
        plant_type: PlantType::Pothos,
        acquired_on: (2024, 3, 1),
        location: "Kitchen",
        photo: "https://images.unsplash.com/photo-1632207691143-643e2a9a9361?w=800",
        notes: "Easy care, trailing vine",
        watering_interval_days: 7,
        light: LightLevel::Medium,
        watered_days_ago: 7,
    },
];

/// The starter plants, with last-watered dates relative to `now`.
pub fn sample_plants(now: DateTime<Utc>) -> Vec<PlantDraft> {
    SAMPLES
        .iter()
        .map(|sample| {
            let (year, month, day) = sample.acquired_on;
            let mut draft = PlantDraft::new(
                sample.name,
                sample.plant_type.clone(),
                sample.watering_interval_days,
            );
            draft.scientific_name = Some(sample.scientific_name.to_string());
            draft.acquired_on = NaiveDate::from_ymd_opt(year, month, day);
            draft.location = Some(sample.location.to_string());
            draft.photo = Some(sample.photo.to_string());
            draft.notes = sample.notes.to_string();
            draft.light = Some(sample.light);
            draft.last_watered = Some(now - Duration::days(sample.watered_days_ago));
            draft
        })
        .collect()
}
