//! Plant and care-action records as they are persisted.
//!
//! Field names and enum spellings follow the stored JSON layout exactly
//! (`nombre`, `frecuenciaRiego`, `"needs-attention"`, `"riego"`, ...) so
//! collections written by earlier versions of the diary load unchanged.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type PlantId = u64;
pub type ActionId = u64;

/// Watering interval used when a stored plant has none.
pub const DEFAULT_WATERING_INTERVAL_DAYS: u32 = 7;

/// Error returned when a user-supplied enum spelling is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} `{value}`; expected one of: {expected}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

impl ParseEnumError {
    fn new(kind: &'static str, value: &str, expected: &[&str]) -> Self {
        Self {
            kind,
            value: value.to_string(),
            expected: expected.join(", "),
        }
    }
}

// ==================== Enumerations ====================

/// Plant category.
///
/// Unknown spellings found in stored data are kept verbatim in `Custom` and
/// written back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlantType {
    Monstera,
    Ficus,
    Pothos,
    SnakePlant,
    ZzPlant,
    Philodendron,
    Calathea,
    Succulent,
    Cactus,
    Orchid,
    Fern,
    Palm,
    #[default]
    Other,
    Custom(String),
}

impl PlantType {
    /// The predefined categories, in display order.
    pub const ALL: [PlantType; 13] = [
        PlantType::Monstera,
        PlantType::Ficus,
        PlantType::Pothos,
        PlantType::SnakePlant,
        PlantType::ZzPlant,
        PlantType::Philodendron,
        PlantType::Calathea,
        PlantType::Succulent,
        PlantType::Cactus,
        PlantType::Orchid,
        PlantType::Fern,
        PlantType::Palm,
        PlantType::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            PlantType::Monstera => "Monstera",
            PlantType::Ficus => "Ficus",
            PlantType::Pothos => "Pothos",
            PlantType::SnakePlant => "Snake Plant",
            PlantType::ZzPlant => "ZZ Plant",
            PlantType::Philodendron => "Philodendron",
            PlantType::Calathea => "Calathea",
            PlantType::Succulent => "Succulent",
            PlantType::Cactus => "Cactus",
            PlantType::Orchid => "Orchid",
            PlantType::Fern => "Fern",
            PlantType::Palm => "Palm",
            PlantType::Other => "Other",
            PlantType::Custom(name) => name,
        }
    }
}

impl From<String> for PlantType {
    fn from(value: String) -> Self {
        PlantType::ALL
            .iter()
            .find(|known| known.as_str() == value)
            .cloned()
            .unwrap_or(PlantType::Custom(value))
    }
}

impl From<&str> for PlantType {
    fn from(value: &str) -> Self {
        PlantType::from(value.to_string())
    }
}

impl From<PlantType> for String {
    fn from(value: PlantType) -> Self {
        match value {
            PlantType::Custom(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for PlantType {
    type Err = std::convert::Infallible;

    /// Case-insensitive for the predefined categories; anything else
    /// becomes a custom type.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Ok(PlantType::ALL
            .iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| PlantType::Custom(trimmed.to_string())))
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived health classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HealthStatus {
    #[default]
    Healthy,
    NeedsAttention,
    Critical,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "healthy",
            HealthStatus::NeedsAttention => "needs-attention",
            HealthStatus::Critical => "critical",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Light requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LightLevel {
    Low,
    Medium,
    BrightIndirect,
    Direct,
}

impl LightLevel {
    const SPELLINGS: [&'static str; 4] = ["low", "medium", "bright-indirect", "direct"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LightLevel::Low => "low",
            LightLevel::Medium => "medium",
            LightLevel::BrightIndirect => "bright-indirect",
            LightLevel::Direct => "direct",
        }
    }
}

impl FromStr for LightLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(LightLevel::Low),
            "medium" => Ok(LightLevel::Medium),
            "bright-indirect" | "bright_indirect" => Ok(LightLevel::BrightIndirect),
            "direct" => Ok(LightLevel::Direct),
            _ => Err(ParseEnumError::new("light level", s, &Self::SPELLINGS)),
        }
    }
}

impl fmt::Display for LightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ambient humidity requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HumidityLevel {
    Low,
    Medium,
    High,
}

impl HumidityLevel {
    const SPELLINGS: [&'static str; 3] = ["low", "medium", "high"];

    pub fn as_str(&self) -> &'static str {
        match self {
            HumidityLevel::Low => "low",
            HumidityLevel::Medium => "medium",
            HumidityLevel::High => "high",
        }
    }
}

impl FromStr for HumidityLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(HumidityLevel::Low),
            "medium" => Ok(HumidityLevel::Medium),
            "high" => Ok(HumidityLevel::High),
            _ => Err(ParseEnumError::new("humidity level", s, &Self::SPELLINGS)),
        }
    }
}

impl fmt::Display for HumidityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of care event recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[serde(rename = "riego")]
    Watering,
    #[serde(rename = "fertilizacion")]
    Fertilization,
    #[serde(rename = "poda")]
    Pruning,
    #[serde(rename = "trasplante")]
    Repotting,
    #[serde(rename = "tratamiento")]
    Treatment,
    #[serde(rename = "movimiento")]
    Relocation,
    #[serde(rename = "revision")]
    Inspection,
}

impl ActionKind {
    pub const ALL: [ActionKind; 7] = [
        ActionKind::Watering,
        ActionKind::Fertilization,
        ActionKind::Pruning,
        ActionKind::Repotting,
        ActionKind::Treatment,
        ActionKind::Relocation,
        ActionKind::Inspection,
    ];

    /// Stored spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Watering => "riego",
            ActionKind::Fertilization => "fertilizacion",
            ActionKind::Pruning => "poda",
            ActionKind::Repotting => "trasplante",
            ActionKind::Treatment => "tratamiento",
            ActionKind::Relocation => "movimiento",
            ActionKind::Inspection => "revision",
        }
    }

    /// English name, also accepted when parsing.
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Watering => "watering",
            ActionKind::Fertilization => "fertilization",
            ActionKind::Pruning => "pruning",
            ActionKind::Repotting => "repotting",
            ActionKind::Treatment => "treatment",
            ActionKind::Relocation => "relocation",
            ActionKind::Inspection => "inspection",
        }
    }
}

impl FromStr for ActionKind {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        ActionKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == needle || kind.name() == needle)
            .ok_or_else(|| {
                let names: Vec<&str> = ActionKind::ALL.iter().map(ActionKind::name).collect();
                ParseEnumError::new("care action", s, &names)
            })
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ==================== Timestamps ====================

/// Format a timestamp the way it is stored: `2024-01-15T10:30:00.000Z`.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parse a stored timestamp.
///
/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and a
/// bare `YYYY-MM-DD` (midnight UTC). Blank input yields `None`.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Optional timestamps: absent, blank and unparseable values read as `None`,
/// `None` is written as `""`.
mod lenient_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(time) => serializer.serialize_str(&super::format_timestamp(time)),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(super::parse_timestamp))
    }
}

mod required_timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timestamp(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_timestamp(&raw)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp `{raw}`")))
    }
}

/// Optional calendar dates: blank and unparseable values read as `None`.
/// Full timestamps are accepted and truncated to their UTC date.
mod lenient_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().and_then(|value| {
            NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                .ok()
                .or_else(|| super::parse_timestamp(value).map(|time| time.date_naive()))
        }))
    }
}

/// Optional free text stored as a plain string: `""` reads as `None` and
/// `None` is written as `""`.
mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.trim().is_empty()))
    }
}

fn default_watering_interval() -> u32 {
    DEFAULT_WATERING_INTERVAL_DAYS
}

// ==================== Records ====================

/// A registered plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: PlantId,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(
        rename = "nombreCientifico",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub scientific_name: Option<String>,
    #[serde(rename = "tipo", default)]
    pub plant_type: PlantType,
    #[serde(
        rename = "fechaAdquisicion",
        default,
        with = "lenient_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub acquired_on: Option<NaiveDate>,
    #[serde(rename = "ubicacion", default, with = "empty_as_none")]
    pub location: Option<String>,
    #[serde(rename = "foto", default, with = "empty_as_none")]
    pub photo: Option<String>,
    #[serde(rename = "notas", default)]
    pub notes: String,

    #[serde(rename = "frecuenciaRiego", default = "default_watering_interval")]
    pub watering_interval_days: u32,
    #[serde(
        rename = "frecuenciaFertilizacion",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub fertilizing_interval_days: Option<u32>,
    #[serde(rename = "necesidadLuz", default, skip_serializing_if = "Option::is_none")]
    pub light: Option<LightLevel>,
    #[serde(rename = "temperaturaMin", default, skip_serializing_if = "Option::is_none")]
    pub min_temperature_c: Option<f64>,
    #[serde(rename = "temperaturaMax", default, skip_serializing_if = "Option::is_none")]
    pub max_temperature_c: Option<f64>,
    #[serde(rename = "humedad", default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<HumidityLevel>,

    #[serde(rename = "estadoSalud", default)]
    pub health: HealthStatus,
    #[serde(rename = "ultimoRiego", default, with = "lenient_timestamp")]
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(
        rename = "ultimaFertilizacion",
        default,
        with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_fertilized: Option<DateTime<Utc>>,
    #[serde(
        rename = "ultimaRevision",
        default,
        with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_inspected: Option<DateTime<Utc>>,
}

/// A plant without an id: the input of add and edit.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantDraft {
    pub name: String,
    pub scientific_name: Option<String>,
    pub plant_type: PlantType,
    pub acquired_on: Option<NaiveDate>,
    pub location: Option<String>,
    pub photo: Option<String>,
    pub notes: String,
    pub watering_interval_days: u32,
    pub fertilizing_interval_days: Option<u32>,
    pub light: Option<LightLevel>,
    pub min_temperature_c: Option<f64>,
    pub max_temperature_c: Option<f64>,
    pub humidity: Option<HumidityLevel>,
    pub last_watered: Option<DateTime<Utc>>,
    pub last_fertilized: Option<DateTime<Utc>>,
    pub last_inspected: Option<DateTime<Utc>>,
}

impl PlantDraft {
    pub fn new(
        name: impl Into<String>,
        plant_type: PlantType,
        watering_interval_days: u32,
    ) -> Self {
        Self {
            name: name.into(),
            scientific_name: None,
            plant_type,
            acquired_on: None,
            location: None,
            photo: None,
            notes: String::new(),
            watering_interval_days,
            fertilizing_interval_days: None,
            light: None,
            min_temperature_c: None,
            max_temperature_c: None,
            humidity: None,
            last_watered: None,
            last_fertilized: None,
            last_inspected: None,
        }
    }
}

impl Default for PlantDraft {
    fn default() -> Self {
        Self::new(String::new(), PlantType::Other, DEFAULT_WATERING_INTERVAL_DAYS)
    }
}

impl Plant {
    /// Build a record from a draft. Health starts as `Healthy`; callers
    /// classify it right after.
    pub fn from_draft(id: PlantId, draft: PlantDraft) -> Self {
        Self {
            id,
            name: draft.name,
            scientific_name: draft.scientific_name,
            plant_type: draft.plant_type,
            acquired_on: draft.acquired_on,
            location: draft.location,
            photo: draft.photo,
            notes: draft.notes,
            watering_interval_days: draft.watering_interval_days,
            fertilizing_interval_days: draft.fertilizing_interval_days,
            light: draft.light,
            min_temperature_c: draft.min_temperature_c,
            max_temperature_c: draft.max_temperature_c,
            humidity: draft.humidity,
            health: HealthStatus::Healthy,
            last_watered: draft.last_watered,
            last_fertilized: draft.last_fertilized,
            last_inspected: draft.last_inspected,
        }
    }

    /// Copy of this record's editable fields.
    pub fn to_draft(&self) -> PlantDraft {
        PlantDraft {
            name: self.name.clone(),
            scientific_name: self.scientific_name.clone(),
            plant_type: self.plant_type.clone(),
            acquired_on: self.acquired_on,
            location: self.location.clone(),
            photo: self.photo.clone(),
            notes: self.notes.clone(),
            watering_interval_days: self.watering_interval_days,
            fertilizing_interval_days: self.fertilizing_interval_days,
            light: self.light,
            min_temperature_c: self.min_temperature_c,
            max_temperature_c: self.max_temperature_c,
            humidity: self.humidity,
            last_watered: self.last_watered,
            last_fertilized: self.last_fertilized,
            last_inspected: self.last_inspected,
        }
    }
}

/// One entry of the care-history ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareAction {
    pub id: ActionId,
    #[serde(rename = "plantaId")]
    pub plant_id: PlantId,
    #[serde(rename = "tipo")]
    pub kind: ActionKind,
    #[serde(rename = "fecha", with = "required_timestamp")]
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "cantidad", default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(rename = "notas", default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A care action about to be recorded. `timestamp: None` means "now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCareAction {
    pub plant_id: PlantId,
    pub kind: ActionKind,
    pub timestamp: Option<DateTime<Utc>>,
    pub quantity: Option<String>,
    pub notes: Option<String>,
}

impl NewCareAction {
    pub fn new(plant_id: PlantId, kind: ActionKind) -> Self {
        Self {
            plant_id,
            kind,
            timestamp: None,
            quantity: None,
            notes: None,
        }
    }
}
