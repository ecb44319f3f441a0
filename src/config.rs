//! Tunable configuration for assignment scoring and escalation timing.
//!
//! Both structs ship working defaults and validate on construction, so a
//! bad override is caught before it can skew scoring or stall escalation.

use serde::{Deserialize, Serialize};

use crate::error::CareOpsError;
use crate::models::Severity;

/// Weights applied to the five assignment scoring dimensions.
///
/// All weights must be strictly positive and sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentWeights {
    pub proximity: f64,
    pub skill_match: f64,
    pub availability: f64,
    pub relationship: f64,
    pub performance: f64,
}

impl Default for AssignmentWeights {
    fn default() -> Self {
        Self {
            proximity: 0.25,
            skill_match: 0.25,
            availability: 0.20,
            relationship: 0.15,
            performance: 0.15,
        }
    }
}

impl AssignmentWeights {
    const SUM_TOLERANCE: f64 = 1e-6;

    pub fn validate(&self) -> Result<(), CareOpsError> {
        let weights = [
            ("proximity", self.proximity),
            ("skill_match", self.skill_match),
            ("availability", self.availability),
            ("relationship", self.relationship),
            ("performance", self.performance),
        ];
        for (name, value) in weights {
            if value <= 0.0 {
                return Err(CareOpsError::Configuration(format!(
                    "assignment weight '{name}' must be strictly positive, got {value}"
                )));
            }
        }
        let sum: f64 = weights.iter().map(|(_, v)| v).sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(CareOpsError::Configuration(format!(
                "assignment weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

/// Minutes an item may sit unresolved, per severity, before escalation.
///
/// Timeouts must be strictly increasing from urgent through low.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationTimeouts {
    pub urgent_minutes: i64,
    pub high_minutes: i64,
    pub medium_minutes: i64,
    pub low_minutes: i64,
}

impl Default for EscalationTimeouts {
    fn default() -> Self {
        Self {
            urgent_minutes: 15,
            high_minutes: 60,
            medium_minutes: 240,
            low_minutes: 1440,
        }
    }
}

impl EscalationTimeouts {
    pub fn validate(&self) -> Result<(), CareOpsError> {
        let ordered = self.urgent_minutes < self.high_minutes
            && self.high_minutes < self.medium_minutes
            && self.medium_minutes < self.low_minutes;
        if self.urgent_minutes <= 0 {
            return Err(CareOpsError::Configuration(format!(
                "urgent escalation timeout must be positive, got {}",
                self.urgent_minutes
            )));
        }
        if !ordered {
            return Err(CareOpsError::Configuration(
                "escalation timeouts must be strictly increasing from urgent to low".to_string(),
            ));
        }
        Ok(())
    }

    /// Timeout for a given severity tier.
    pub fn for_severity(&self, severity: Severity) -> i64 {
        match severity {
            Severity::Urgent => self.urgent_minutes,
            Severity::High => self.high_minutes,
            Severity::Medium => self.medium_minutes,
            Severity::Low => self.low_minutes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_validate() {
        assert!(AssignmentWeights::default().validate().is_ok());
    }

    #[test]
    fn test_zero_weight_rejected() {
        let mut weights = AssignmentWeights::default();
        weights.proximity = 0.0;
        weights.skill_match = 0.50;
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut weights = AssignmentWeights::default();
        weights.performance = 0.30;
        assert!(weights.validate().is_err());
    }

    #[test]
    fn test_default_timeouts_validate() {
        assert!(EscalationTimeouts::default().validate().is_ok());
    }

    #[test]
    fn test_unordered_timeouts_rejected() {
        let timeouts = EscalationTimeouts {
            urgent_minutes: 60,
            high_minutes: 60,
            medium_minutes: 240,
            low_minutes: 1440,
        };
        assert!(timeouts.validate().is_err());
    }

    #[test]
    fn test_severity_lookup() {
        let timeouts = EscalationTimeouts::default();
        assert_eq!(timeouts.for_severity(Severity::Urgent), 15);
        assert_eq!(timeouts.for_severity(Severity::Low), 1440);
    }
}
