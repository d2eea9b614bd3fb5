//! Plant validation. Every issue is collected so the caller can show them all
//! at once; nothing is applied until the list is empty.

use thiserror::Error;
use url::Url;

use crate::model::PlantDraft;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("Plant name is required")]
    NameRequired,
    #[error("Watering frequency must be at least 1 day")]
    InvalidWateringInterval,
    #[error("Fertilizing frequency must be at least 1 day")]
    InvalidFertilizingInterval,
    #[error("Photo must be a valid URL")]
    InvalidPhotoUrl,
    #[error("Minimum temperature ({min}°C) is above maximum ({max}°C)")]
    TemperatureRange { min: f64, max: f64 },
}

/// Non-empty list of validation issues.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", .0.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    /// Human-readable messages, one per issue.
    pub fn messages(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, issue: &ValidationIssue) -> bool {
        self.0.contains(issue)
    }
}

/// `data:` URIs are accepted as embedded photos; anything else must parse as
/// an absolute URL.
pub fn is_valid_photo(photo: &str) -> bool {
    photo.starts_with("data:") || Url::parse(photo).is_ok()
}

pub fn validate_plant(draft: &PlantDraft) -> Result<(), ValidationErrors> {
    let mut issues = Vec::new();

    if draft.name.trim().is_empty() {
        issues.push(ValidationIssue::NameRequired);
    }
    if draft.watering_interval_days < 1 {
        issues.push(ValidationIssue::InvalidWateringInterval);
    }
    if draft.fertilizing_interval_days.is_some_and(|d| d < 1) {
        issues.push(ValidationIssue::InvalidFertilizingInterval);
    }
    if draft.photo.as_deref().is_some_and(|p| !is_valid_photo(p)) {
        issues.push(ValidationIssue::InvalidPhotoUrl);
    }
    if let (Some(min), Some(max)) = (draft.min_temperature_c, draft.max_temperature_c) {
        if min > max {
            issues.push(ValidationIssue::TemperatureRange { min, max });
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(issues))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PlantType;

    fn draft() -> PlantDraft {
        PlantDraft::new("Calathea", PlantType::Calathea, 5)
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(validate_plant(&draft()).is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut d = draft();
        d.name = "   ".to_string();

        let err = validate_plant(&d).unwrap_err();
        assert_eq!(err.issues(), &[ValidationIssue::NameRequired]);
        assert_eq!(err.messages(), vec!["Plant name is required".to_string()]);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let mut d = draft();
        d.watering_interval_days = 0;
        d.fertilizing_interval_days = Some(0);

        let err = validate_plant(&d).unwrap_err();
        assert!(err.contains(&ValidationIssue::InvalidWateringInterval));
        assert!(err.contains(&ValidationIssue::InvalidFertilizingInterval));
    }

    #[test]
    fn test_photo_urls() {
        assert!(is_valid_photo("https://images.unsplash.com/photo-1?w=800"));
        assert!(is_valid_photo("data:image/png;base64,iVBORw0KGgo="));
        assert!(!is_valid_photo("monstera.jpg"));
        assert!(!is_valid_photo(""));

        let mut d = draft();
        d.photo = Some("not a url".to_string());
        assert!(validate_plant(&d).unwrap_err().contains(&ValidationIssue::InvalidPhotoUrl));
    }

    #[test]
    fn test_inverted_temperature_range_rejected() {
        let mut d = draft();
        d.min_temperature_c = Some(25.0);
        d.max_temperature_c = Some(15.0);

        let err = validate_plant(&d).unwrap_err();
        assert!(err.to_string().contains("above maximum"));
    }

    #[test]
    fn test_all_issues_collected() {
        let mut d = draft();
        d.name.clear();
        d.watering_interval_days = 0;
        d.photo = Some("::".to_string());

        let err = validate_plant(&d).unwrap_err();
        assert_eq!(err.issues().len(), 3);
        assert_eq!(
            err.to_string(),
            "Plant name is required; \
             Watering frequency must be at least 1 day; \
             Photo must be a valid URL"
        );
    }

    #[test]
    fn test_errors_convert_into_anyhow() {
        let mut d = draft();
        d.name.clear();

        let err: anyhow::Error = validate_plant(&d).unwrap_err().into();
        assert_eq!(err.to_string(), "Plant name is required");
        assert!(err.downcast_ref::<ValidationErrors>().is_some());
    }
}
