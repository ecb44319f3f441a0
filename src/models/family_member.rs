use serde::{Deserialize, Serialize};
use std::fmt;

/// Relationship role within the care circle. Ordering matters to the
/// assignment engine: primary > medical_poa > emergency > secondary, with
/// every other role below those four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FamilyRole {
    Primary,
    Secondary,
    Emergency,
    MedicalPoa,
    Extended,
}

impl fmt::Display for FamilyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
            Self::Emergency => write!(f, "emergency"),
            Self::MedicalPoa => write!(f, "medical_poa"),
            Self::Extended => write!(f, "extended"),
        }
    }
}

/// Presence state reported by the roster collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    Available,
    Busy,
    Offline,
}

/// Historical responder performance, when the surrounding layer tracks it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceHistory {
    /// Fraction of accepted tasks completed, 0.0-1.0.
    pub completion_rate: f64,
    /// Average minutes from notification to first action.
    pub avg_response_minutes: f64,
    /// Quality score 0-100 from outcome reviews.
    pub quality_score: f64,
}

/// Care-circle member eligible for assignment. Mutated externally by roster
/// and presence updates; strictly read-only to the decision engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyMember {
    pub id: String,
    pub name: String,
    pub role: FamilyRole,
    pub availability: Availability,
    /// Count of currently assigned active items.
    pub workload: u32,
    pub skills: Vec<String>,
    pub zip_code: Option<String>,
    pub on_call: bool,
    pub history: Option<PerformanceHistory>,
}

impl FamilyMember {
    /// New member with no workload, no skills, and no history recorded.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: FamilyRole) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            availability: Availability::Available,
            workload: 0,
            skills: Vec::new(),
            zip_code: None,
            on_call: false,
            history: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serde_snake_case() {
        let json = serde_json::to_string(&FamilyRole::MedicalPoa).unwrap();
        assert_eq!(json, "\"medical_poa\"");
        let parsed: FamilyRole = serde_json::from_str("\"emergency\"").unwrap();
        assert_eq!(parsed, FamilyRole::Emergency);
    }

    #[test]
    fn test_role_display() {
        assert_eq!(FamilyRole::MedicalPoa.to_string(), "medical_poa");
    }
}
