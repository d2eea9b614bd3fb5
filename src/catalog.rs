//! Reference catalog of common plant ailments.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AilmentKind {
    Fungal,
    Bacterial,
    Viral,
    Pest,
}

impl AilmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AilmentKind::Fungal => "fungal",
            AilmentKind::Bacterial => "bacterial",
            AilmentKind::Viral => "viral",
            AilmentKind::Pest => "pest",
        }
    }
}

impl fmt::Display for AilmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ailment {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: AilmentKind,
    pub description: &'static str,
    pub symptoms: &'static [&'static str],
    pub treatment: &'static [&'static str],
    pub prevention: &'static [&'static str],
    pub severity: Severity,
}

pub static AILMENTS: [Ailment; 4] = [
    Ailment {
        id: "powdery-mildew",
        name: "Powdery Mildew",
        kind: AilmentKind::Fungal,
        description: "A common fungal disease affecting a wide variety of plants.",
        symptoms: &[
            "White, powdery patches on leaves and stems",
            "Yellowing or drying of leaves",
            "Distorted or stunted growth of new shoots",
            "In severe cases, leaves may turn brown and drop off",
        ],
        treatment: &[
            "Remove affected leaves immediately",
            "Apply neem oil or sulfur-based fungicide",
            "Improve air circulation around plants",
            "Water at base, avoid wetting leaves",
        ],
        prevention: &[
            "Ensure good air circulation",
            "Avoid overhead watering",
            "Don't overcrowd plants",
            "Remove debris regularly",
        ],
        severity: Severity::Medium,
    },
    Ailment {
        id: "aphids",
        name: "Aphids",
        kind: AilmentKind::Pest,
        description: "Small sap-sucking insects of the superfamily Aphidoidea.",
        symptoms: &[
            "Clusters of small insects on stems and leaves",
            "Sticky honeydew on leaves",
            "Yellowing or curling leaves",
            "Stunted growth",
        ],
        treatment: &[
            "Spray with water to dislodge",
            "Use insecticidal soap",
            "Apply neem oil",
            "Introduce beneficial insects",
        ],
        prevention: &[
            "Regular inspection",
            "Keep plants healthy",
            "Remove weeds",
            "Use reflective mulch",
        ],
        severity: Severity::Low,
    },
    Ailment {
        id: "spider-mites",
        name: "Spider Mites",
        kind: AilmentKind::Pest,
        description: "Tiny arachnids that are a common pest of houseplants and garden plants.",
        symptoms: &[
            "Fine webbing on undersides of leaves",
            "Yellow or bronze speckling on leaves",
            "Leaf drop",
            "Overall plant decline",
        ],
        treatment: &[
            "Increase humidity",
            "Spray with water regularly",
            "Use miticide or neem oil",
            "Isolate affected plants",
        ],
        prevention: &[
            "Maintain humidity",
            "Regular misting",
            "Keep plants clean",
            "Quarantine new plants",
        ],
        severity: Severity::Medium,
    },
    Ailment {
        id: "root-rot",
        name: "Root Rot",
        kind: AilmentKind::Fungal,
        description: "Decay of the roots, usually from waterlogged soil and poor drainage.",
        symptoms: &[
            "Wilting despite adequate watering",
            "Yellowing leaves",
            "Mushy, black roots",
            "Foul odor from soil",
        ],
        treatment: &[
            "Remove plant from soil",
            "Cut away rotted roots",
            "Repot in fresh, well-draining soil",
            "Reduce watering frequency",
        ],
        prevention: &[
            "Use well-draining soil",
            "Don't overwater",
            "Ensure proper drainage",
            "Use appropriate pot size",
        ],
        severity: Severity::High,
    },
];

pub fn all() -> &'static [Ailment] {
    &AILMENTS
}

pub fn find(id: &str) -> Option<&'static Ailment> {
    AILMENTS.iter().find(|ailment| ailment.id.eq_ignore_ascii_case(id.trim()))
}

/// Case-insensitive substring search over name, description and symptoms.
/// A blank query returns the whole catalog.
pub fn search(query: &str) -> Vec<&'static Ailment> {
    let needle = query.trim().to_lowercase();
    AILMENTS
        .iter()
        .filter(|ailment| {
            needle.is_empty()
                || ailment.name.to_lowercase().contains(&needle)
                || ailment.description.to_lowercase().contains(&needle)
                || ailment
                    .symptoms
                    .iter()
                    .any(|symptom| symptom.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entries() {
        assert_eq!(all().len(), 4);
        let ids: Vec<&str> = all().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec!["powdery-mildew", "aphids", "spider-mites", "root-rot"]);
        assert!(all().iter().all(|a| !a.symptoms.is_empty() && !a.treatment.is_empty()));
    }

    #[test]
    fn test_find_by_id() {
        let rot = find("root-rot").unwrap();
        assert_eq!(rot.severity, Severity::High);
        assert_eq!(rot.kind, AilmentKind::Fungal);
        assert!(find("ROOT-ROT").is_some());
        assert!(find("blight").is_none());
    }

    #[test]
    fn test_search_matches_symptoms() {
        let found: Vec<&str> = search("webbing").iter().map(|a| a.id).collect();
        assert_eq!(found, vec!["spider-mites"]);

        let yellowing: Vec<&str> = search("yellowing").iter().map(|a| a.id).collect();
        assert_eq!(yellowing, vec!["powdery-mildew", "aphids", "root-rot"]);
    }

    #[test]
    fn test_search_blank_returns_all() {
        assert_eq!(search("  ").len(), 4);
        assert!(search("locust").is_empty());
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Low < Severity::Medium && Severity::Medium < Severity::High);
        assert_eq!(Severity::High.to_string(), "high");
        assert_eq!(AilmentKind::Pest.to_string(), "pest");
    }
}
