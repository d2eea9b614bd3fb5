use std::path::PathBuf;

use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::format::Locale;
use crate::model::DEFAULT_WATERING_INTERVAL_DAYS;
use crate::persistence::{HISTORY_KEY, PLANTS_KEY, Preferences, StorageKeys};
use crate::schedule::DEFAULT_CALENDAR_WINDOW_DAYS;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub display: DisplayConfig,
    pub care: CareConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    /// Directory holding one JSON file per stored key
    pub data_dir: PathBuf,
    pub plants_key: String,
    pub history_key: String,
}

impl StorageConfig {
    pub fn keys(&self) -> StorageKeys {
        StorageKeys {
            plants: self.plants_key.clone(),
            history: self.history_key.clone(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            plants_key: PLANTS_KEY.to_string(),
            history_key: HISTORY_KEY.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Language code used until the user picks one (`en` or `es`)
    pub language: String,
    pub dark_mode: bool,
}

impl DisplayConfig {
    pub fn locale(&self) -> Locale {
        Locale::from_code(&self.language)
    }

    /// Preferences used until the user stores their own.
    pub fn default_preferences(&self) -> Preferences {
        Preferences {
            dark_mode: self.dark_mode,
            language: self.locale(),
            last_view: None,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            dark_mode: false,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CareConfig {
    /// Interval pre-filled for new plants
    pub default_watering_interval_days: u32,
    /// Upper bound of the calendar's "coming up" section
    pub calendar_window_days: i64,
    /// Add the sample plants when the diary is empty
    pub seed_sample_plants: bool,
}

impl Default for CareConfig {
    fn default() -> Self {
        Self {
            default_watering_interval_days: DEFAULT_WATERING_INTERVAL_DAYS,
            calendar_window_days: DEFAULT_CALENDAR_WINDOW_DAYS,
            seed_sample_plants: false,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("plant-diary")
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        // Load .env file (silently ignore if not present)
        let _ = dotenvy::dotenv();

        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("plant-diary");

        let builder = Config::builder()
            // 1. Load default values
            // Storage
            .set_default("storage.data_dir", default_data_dir().to_string_lossy().to_string())?
            .set_default("storage.plants_key", PLANTS_KEY)?
            .set_default("storage.history_key", HISTORY_KEY)?
            // Display
            .set_default("display.language", "en")?
            .set_default("display.dark_mode", false)?
            // Care
            .set_default(
                "care.default_watering_interval_days",
                i64::from(DEFAULT_WATERING_INTERVAL_DAYS),
            )?
            .set_default("care.calendar_window_days", DEFAULT_CALENDAR_WINDOW_DAYS)?
            .set_default("care.seed_sample_plants", false)?

            // 2. Load from local config file (optional, lowest priority)
            .add_source(File::from(PathBuf::from("config.toml")).required(false))

            // 3. Load from user config directory (optional, overrides local)
            .add_source(File::from(config_dir.join("config.toml")).required(false))

            // 4. Load from Environment variables (PLANT_DIARY__DISPLAY__LANGUAGE=es)
            .add_source(Environment::with_prefix("PLANT_DIARY").separator("__"));

        let s = builder.build()?;
        Ok(s.try_deserialize()?)
    }
}
