//! Pure scoring primitives for assignment decisions.
//!
//! Each function converts one candidate attribute into a 0-100 sub-score.
//! The composite weighting lives in the engine; nothing here reads shared
//! state or clocks.

use crate::models::{Availability, FamilyMember, FamilyRole};

/// Workload at or above this count scores as fully loaded.
pub const FULL_WORKLOAD: u32 = 5;

/// Zip proximity by shared prefix length. Missing zips score neutral.
pub fn proximity_score(member_zip: Option<&str>, elder_zip: Option<&str>) -> f64 {
    let (Some(member), Some(elder)) = (member_zip, elder_zip) else {
        return 50.0;
    };
    if member.is_empty() || elder.is_empty() {
        return 50.0;
    }
    if member == elder {
        return 100.0;
    }
    let shared = member
        .chars()
        .zip(elder.chars())
        .take_while(|(a, b)| a == b)
        .count();
    match shared {
        n if n >= 3 => 85.0,
        2 => 70.0,
        1 => 50.0,
        _ => 20.0,
    }
}

/// Fraction of required skills the candidate covers, scaled to 100.
pub fn skill_match_score(required_skills: &[String], member_skills: &[String]) -> f64 {
    if required_skills.is_empty() {
        return 100.0;
    }
    if member_skills.is_empty() {
        return 30.0;
    }
    let matches = required_skills
        .iter()
        .filter(|skill| member_skills.contains(skill))
        .count();
    (matches as f64 / required_skills.len() as f64) * 100.0
}

/// Availability tier: free responders score highest, offline or fully
/// loaded responders lowest.
pub fn availability_score(member: &FamilyMember) -> f64 {
    if member.workload >= FULL_WORKLOAD {
        return 20.0;
    }
    match member.availability {
        Availability::Available => {
            if member.workload == 0 {
                if member.on_call {
                    90.0
                } else {
                    80.0
                }
            } else {
                60.0
            }
        }
        Availability::Busy => 45.0,
        Availability::Offline => 25.0,
    }
}

/// Relationship preference: primary > medical POA > emergency > secondary,
/// with everything else below.
pub fn relationship_score(role: FamilyRole) -> f64 {
    match role {
        FamilyRole::Primary => 100.0,
        FamilyRole::MedicalPoa => 90.0,
        FamilyRole::Emergency => 80.0,
        FamilyRole::Secondary => 70.0,
        FamilyRole::Extended => 40.0,
    }
}

/// Historical performance. Candidates without history get a neutral 70.
pub fn performance_score(member: &FamilyMember) -> f64 {
    let Some(history) = &member.history else {
        return 70.0;
    };
    let completion = (history.completion_rate.clamp(0.0, 1.0)) * 100.0;
    let quality = history.quality_score.clamp(0.0, 100.0);
    let latency = match history.avg_response_minutes {
        m if m <= 15.0 => 100.0,
        m if m <= 30.0 => 75.0,
        m if m <= 60.0 => 50.0,
        _ => 25.0,
    };
    completion * 0.4 + quality * 0.4 + latency * 0.2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PerformanceHistory;

    fn member(availability: Availability, workload: u32, on_call: bool) -> FamilyMember {
        let mut m = FamilyMember::new("m1", "Sarah", FamilyRole::Primary);
        m.availability = availability;
        m.workload = workload;
        m.on_call = on_call;
        m
    }

    #[test]
    fn test_proximity_prefix_table() {
        assert_eq!(proximity_score(Some("94110"), Some("94110")), 100.0);
        assert_eq!(proximity_score(Some("94117"), Some("94110")), 85.0);
        assert_eq!(proximity_score(Some("94610"), Some("94110")), 70.0);
        assert_eq!(proximity_score(Some("95014"), Some("94110")), 50.0);
        assert_eq!(proximity_score(Some("10001"), Some("94110")), 20.0);
    }

    #[test]
    fn test_proximity_missing_zip_is_neutral() {
        assert_eq!(proximity_score(None, Some("94110")), 50.0);
        assert_eq!(proximity_score(Some("94110"), None), 50.0);
        assert_eq!(proximity_score(None, None), 50.0);
        assert_eq!(proximity_score(Some(""), Some("94110")), 50.0);
    }

    #[test]
    fn test_skill_match_ratios() {
        let required = vec!["medical".to_string(), "driving".to_string()];
        let both = vec!["medical".to_string(), "driving".to_string()];
        let one = vec!["driving".to_string()];

        assert_eq!(skill_match_score(&required, &both), 100.0);
        assert_eq!(skill_match_score(&required, &one), 50.0);
        assert_eq!(skill_match_score(&[], &one), 100.0);
        assert_eq!(skill_match_score(&required, &[]), 30.0);
    }

    #[test]
    fn test_availability_tiers_ordered() {
        let idle_on_call = availability_score(&member(Availability::Available, 0, true));
        let idle = availability_score(&member(Availability::Available, 0, false));
        let loaded = availability_score(&member(Availability::Available, 2, false));
        let busy = availability_score(&member(Availability::Busy, 1, false));
        let offline = availability_score(&member(Availability::Offline, 0, false));
        let maxed = availability_score(&member(Availability::Available, 5, true));

        assert!(idle_on_call >= 80.0);
        assert!(idle >= 80.0);
        assert!(idle_on_call > idle);
        assert!(idle > loaded);
        assert!(loaded > busy);
        assert!(busy > offline);
        assert!(offline > maxed);
    }

    #[test]
    fn test_relationship_preference_order() {
        let scores = [
            relationship_score(FamilyRole::Primary),
            relationship_score(FamilyRole::MedicalPoa),
            relationship_score(FamilyRole::Emergency),
            relationship_score(FamilyRole::Secondary),
            relationship_score(FamilyRole::Extended),
        ];
        assert!(scores.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_performance_neutral_without_history() {
        let m = member(Availability::Available, 0, false);
        assert_eq!(performance_score(&m), 70.0);
    }

    #[test]
    fn test_performance_rewards_strong_history() {
        let mut strong = member(Availability::Available, 0, false);
        strong.history = Some(PerformanceHistory {
            completion_rate: 0.95,
            avg_response_minutes: 10.0,
            quality_score: 92.0,
        });
        let mut weak = member(Availability::Available, 0, false);
        weak.history = Some(PerformanceHistory {
            completion_rate: 0.4,
            avg_response_minutes: 120.0,
            quality_score: 50.0,
        });

        assert!(performance_score(&strong) > 70.0);
        assert!(performance_score(&weak) < 70.0);
        assert!(performance_score(&strong) <= 100.0);
    }
}
