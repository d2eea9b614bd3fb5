//! Persistence adapter.
//!
//! Plants and care history are stored as two JSON array blobs in a
//! [`KeyValueStore`]. Reads and writes fail soft: an absent key is an empty
//! collection, and any store or parse failure is logged and degraded to an
//! empty collection (read) or a no-op (write). The `try_*` variants expose
//! the underlying error for callers that want to report it.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

use crate::format::Locale;
use crate::model::{CareAction, Plant, format_timestamp};
use crate::traits::{Clock, KeyValueStore, StoreError};

pub const PLANTS_KEY: &str = "plantas-pro";
pub const HISTORY_KEY: &str = "historial-cuidados";
pub const DARK_MODE_KEY: &str = "darkMode";
pub const LANGUAGE_KEY: &str = "language";
pub const VIEW_KEY: &str = "vista";

/// Errors that can occur while reading or writing persisted state.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("failed to serialize `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to parse `{key}`: {source}")]
    Deserialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Keys the two collections are stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub plants: String,
    pub history: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            plants: PLANTS_KEY.to_string(),
            history: HISTORY_KEY.to_string(),
        }
    }
}

// ==================== Collections ====================

pub fn try_load_collection<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, PersistenceError> {
    match store.get(key)? {
        None => Ok(Vec::new()),
        Some(raw) => serde_json::from_str(&raw).map_err(|source| PersistenceError::Deserialize {
            key: key.to_string(),
            source,
        }),
    }
}

pub fn try_save_collection<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    items: &[T],
) -> Result<(), PersistenceError> {
    let raw = serde_json::to_string(items).map_err(|source| PersistenceError::Serialize {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)?;
    Ok(())
}

/// Load a collection, logging and returning an empty list on failure.
pub fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    match try_load_collection(store, key) {
        Ok(items) => {
            tracing::debug!("Loaded {} records from `{}`", items.len(), key);
            items
        }
        Err(e) => {
            tracing::error!("Error loading `{}`, starting empty: {}", key, e);
            Vec::new()
        }
    }
}

/// Save a collection, logging on failure. Returns whether the write landed.
pub fn save_collection<T: Serialize>(store: &dyn KeyValueStore, key: &str, items: &[T]) -> bool {
    match try_save_collection(store, key, items) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Error saving `{}`: {}", key, e);
            false
        }
    }
}

pub fn load_plants(store: &dyn KeyValueStore, keys: &StorageKeys) -> Vec<Plant> {
    load_collection(store, &keys.plants)
}

pub fn save_plants(store: &dyn KeyValueStore, keys: &StorageKeys, plants: &[Plant]) -> bool {
    save_collection(store, &keys.plants, plants)
}

pub fn load_history(store: &dyn KeyValueStore, keys: &StorageKeys) -> Vec<CareAction> {
    load_collection(store, &keys.history)
}

pub fn save_history(store: &dyn KeyValueStore, keys: &StorageKeys, history: &[CareAction]) -> bool {
    save_collection(store, &keys.history, history)
}

// ==================== Preferences ====================

/// Top-level screens, remembered as the last active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    Landing,
    #[default]
    Dashboard,
    MyPlants,
    Calendar,
    Database,
    Settings,
}

impl View {
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Dashboard => "dashboard",
            View::MyPlants => "mis-plantas",
            View::Calendar => "calendario",
            View::Database => "base-datos",
            View::Settings => "configuracion",
        }
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "landing" => Ok(View::Landing),
            "dashboard" => Ok(View::Dashboard),
            "mis-plantas" => Ok(View::MyPlants),
            "calendario" => Ok(View::Calendar),
            "base-datos" => Ok(View::Database),
            "configuracion" => Ok(View::Settings),
            other => Err(format!("unknown view `{other}`")),
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scalar preferences, each stored under its own key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub dark_mode: bool,
    pub language: Locale,
    pub last_view: Option<View>,
}

impl Preferences {
    /// Read preferences; missing or unreadable entries keep the value from
    /// `fallback`.
    pub fn load(store: &dyn KeyValueStore, fallback: Preferences) -> Self {
        let read = |key: &str| match store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("Error reading preference `{}`: {}", key, e);
                None
            }
        };

        Self {
            dark_mode: read(DARK_MODE_KEY)
                .map(|v| v == "true")
                .unwrap_or(fallback.dark_mode),
            language: read(LANGUAGE_KEY)
                .map(|v| Locale::from_code(&v))
                .unwrap_or(fallback.language),
            last_view: read(VIEW_KEY)
                .and_then(|v| v.parse().ok())
                .or(fallback.last_view),
        }
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), PersistenceError> {
        store.set(DARK_MODE_KEY, if self.dark_mode { "true" } else { "false" })?;
        store.set(LANGUAGE_KEY, self.language.code())?;
        if let Some(view) = self.last_view {
            store.set(VIEW_KEY, view.as_str())?;
        }
        Ok(())
    }
}

// ==================== File Store ====================

/// Directory-backed store: each key lives in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        // Write beside the target and rename so a crash never leaves half a blob
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

// ==================== CSV Export ====================

#[derive(Debug, Serialize)]
struct HistoryRow<'a> {
    id: u64,
    plant_id: u64,
    plant_name: &'a str,
    kind: &'static str,
    timestamp: String,
    quantity: &'a str,
    notes: &'a str,
}

/// Export the care history to a timestamped CSV file.
///
/// # Arguments
/// * `history` - Entries to export, written in the given order
/// * `plants` - Used to resolve plant names; unknown ids export a blank name
/// * `output_dir` - Directory where the CSV file will be created
/// * `clock` - Clock for generating the timestamp in the filename
///
/// # Returns
/// The path to the created CSV file on success.
pub fn export_history_csv(
    history: &[CareAction],
    plants: &[Plant],
    output_dir: &Path,
    clock: &dyn Clock,
) -> Result<PathBuf> {
    let export_time = clock.now_utc();
    let filename = format!(
        "plant_diary_history_{}.csv",
        export_time.format("%Y%m%d_%H%M%S")
    );
    let output_path = output_dir.join(filename);

    let mut wtr = csv::Writer::from_path(&output_path).context("Failed to create CSV writer")?;
    for action in history {
        let plant_name = plants
            .iter()
            .find(|p| p.id == action.plant_id)
            .map(|p| p.name.as_str())
            .unwrap_or("");
        wtr.serialize(HistoryRow {
            id: action.id,
            plant_id: action.plant_id,
            plant_name,
            kind: action.kind.name(),
            timestamp: format_timestamp(&action.timestamp),
            quantity: action.quantity.as_deref().unwrap_or(""),
            notes: action.notes.as_deref().unwrap_or(""),
        })
        .context("Failed to serialize care action")?;
    }
    wtr.flush().context("Failed to flush CSV writer")?;

    tracing::info!("Exported {} care actions to {}", history.len(), output_path.display());
    Ok(output_path)
}
