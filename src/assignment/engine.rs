//! Weighted assignment recommendations.
//!
//! Combines the five scoring primitives under the configured weights and
//! picks the highest composite. An empty candidate pool is a caller bug
//! and panics rather than returning a recommendation built from nothing.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::AssignmentWeights;
use crate::models::{Availability, FamilyMember};

use super::scoring::{
    availability_score, performance_score, proximity_score, relationship_score, skill_match_score,
    FULL_WORKLOAD,
};

/// What the item being assigned needs from a responder.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentContext {
    pub required_skills: Vec<String>,
    pub elder_zip: Option<String>,
}

/// Sub-scores and composite for one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    pub member_id: String,
    pub member_name: String,
    pub proximity: f64,
    pub skill_match: f64,
    pub availability: f64,
    pub relationship: f64,
    pub performance: f64,
    pub composite: f64,
}

/// The engine's pick plus the evidence behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignmentRecommendation {
    pub assignee: FamilyMember,
    pub assignee_score: CandidateScore,
    /// Remaining candidates, best first.
    pub alternatives: Vec<CandidateScore>,
    /// 0-100; higher when the winner scores well and leads clearly.
    pub confidence: u8,
    pub reasons: Vec<String>,
    pub estimated_response_minutes: u32,
}

fn score_candidate(
    member: &FamilyMember,
    context: &AssignmentContext,
    weights: &AssignmentWeights,
) -> CandidateScore {
    let proximity = proximity_score(member.zip_code.as_deref(), context.elder_zip.as_deref());
    let skill_match = skill_match_score(&context.required_skills, &member.skills);
    let availability = availability_score(member);
    let relationship = relationship_score(member.role);
    let performance = performance_score(member);
    let composite = proximity * weights.proximity
        + skill_match * weights.skill_match
        + availability * weights.availability
        + relationship * weights.relationship
        + performance * weights.performance;
    CandidateScore {
        member_id: member.id.clone(),
        member_name: member.name.clone(),
        proximity,
        skill_match,
        availability,
        relationship,
        performance,
        composite,
    }
}

/// Score all candidates, best first. Ties break by member id for a stable
/// order.
pub fn rank_candidates(
    candidates: &[FamilyMember],
    context: &AssignmentContext,
    weights: &AssignmentWeights,
) -> Vec<CandidateScore> {
    let mut scored: Vec<CandidateScore> = candidates
        .iter()
        .map(|m| score_candidate(m, context, weights))
        .collect();
    scored.sort_by(|a, b| {
        b.composite
            .partial_cmp(&a.composite)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.member_id.cmp(&b.member_id))
    });
    scored
}

fn build_reasons(score: &CandidateScore, member: &FamilyMember) -> Vec<String> {
    let mut reasons = Vec::new();
    if score.proximity >= 85.0 {
        reasons.push(format!("{} lives close to the elder", member.name));
    }
    if score.skill_match >= 100.0 {
        reasons.push("Has every skill the task requires".to_string());
    } else if score.skill_match >= 50.0 {
        reasons.push("Covers most of the required skills".to_string());
    }
    if score.availability >= 80.0 {
        reasons.push("Available now with no active workload".to_string());
    }
    if score.relationship >= 90.0 {
        reasons.push(format!("Acts as {} contact for the elder", member.role));
    }
    if score.performance > 70.0 {
        reasons.push("Strong track record on past tasks".to_string());
    }
    if reasons.is_empty() {
        reasons.push(format!(
            "Best overall fit with a composite score of {:.0}",
            score.composite
        ));
    }
    reasons
}

fn estimate_response_minutes(member: &FamilyMember) -> u32 {
    if member.workload >= FULL_WORKLOAD {
        return 120;
    }
    match member.availability {
        Availability::Available => 15,
        Availability::Busy => 45,
        Availability::Offline => 120,
    }
}

fn confidence_for(winner: f64, runner_up: Option<f64>) -> u8 {
    let margin = runner_up.map_or(10.0, |r| winner - r);
    let raw = winner * 0.8 + margin.min(25.0);
    raw.clamp(0.0, 100.0).round() as u8
}

/// Pick the best assignee from a non-empty candidate pool.
///
/// # Panics
///
/// Panics if `candidates` is empty; callers own pool construction.
pub fn calculate_best_assignee(
    candidates: &[FamilyMember],
    context: &AssignmentContext,
    weights: &AssignmentWeights,
) -> AssignmentRecommendation {
    assert!(
        !candidates.is_empty(),
        "assignment requires a non-empty candidate pool"
    );

    let ranked = rank_candidates(candidates, context, weights);
    let winner_score = ranked[0].clone();
    let alternatives = ranked[1..].to_vec();
    let winner = candidates
        .iter()
        .find(|m| m.id == winner_score.member_id)
        .cloned()
        .unwrap_or_else(|| candidates[0].clone());

    let confidence = confidence_for(
        winner_score.composite,
        alternatives.first().map(|a| a.composite),
    );
    let reasons = build_reasons(&winner_score, &winner);
    let estimated_response_minutes = estimate_response_minutes(&winner);

    info!(
        assignee = %winner.id,
        composite = winner_score.composite,
        confidence = confidence,
        "assignment recommendation computed"
    );

    AssignmentRecommendation {
        assignee: winner,
        assignee_score: winner_score,
        alternatives,
        confidence,
        reasons,
        estimated_response_minutes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FamilyRole;

    fn pool() -> Vec<FamilyMember> {
        let mut sarah = FamilyMember::new("m1", "Sarah", FamilyRole::Primary);
        sarah.zip_code = Some("94110".to_string());
        sarah.skills = vec!["medical".to_string(), "driving".to_string()];

        let mut tom = FamilyMember::new("m2", "Tom", FamilyRole::Secondary);
        tom.zip_code = Some("10001".to_string());
        tom.availability = Availability::Busy;
        tom.workload = 2;

        let mut rita = FamilyMember::new("m3", "Rita", FamilyRole::Extended);
        rita.availability = Availability::Offline;

        vec![sarah, tom, rita]
    }

    fn context() -> AssignmentContext {
        AssignmentContext {
            required_skills: vec!["medical".to_string()],
            elder_zip: Some("94110".to_string()),
        }
    }

    #[test]
    fn test_best_assignee_wins_on_composite() {
        let rec = calculate_best_assignee(&pool(), &context(), &AssignmentWeights::default());
        assert_eq!(rec.assignee.id, "m1");
        assert_eq!(rec.alternatives.len(), 2);
        assert!(rec.alternatives[0].composite >= rec.alternatives[1].composite);
        assert!(rec.assignee_score.composite > rec.alternatives[0].composite);
    }

    #[test]
    fn test_recommendation_invariants() {
        let rec = calculate_best_assignee(&pool(), &context(), &AssignmentWeights::default());
        assert!(rec.confidence <= 100);
        assert!(!rec.reasons.is_empty());
        assert!(rec.estimated_response_minutes > 0);
    }

    #[test]
    #[should_panic(expected = "non-empty candidate pool")]
    fn test_empty_pool_panics() {
        calculate_best_assignee(&[], &context(), &AssignmentWeights::default());
    }

    #[test]
    fn test_single_candidate_pool() {
        let members = vec![FamilyMember::new("only", "Ana", FamilyRole::Primary)];
        let rec = calculate_best_assignee(&members, &context(), &AssignmentWeights::default());
        assert_eq!(rec.assignee.id, "only");
        assert!(rec.alternatives.is_empty());
        assert!(!rec.reasons.is_empty());
    }

    #[test]
    fn test_ties_break_by_member_id() {
        let a = FamilyMember::new("a", "Twin A", FamilyRole::Primary);
        let b = FamilyMember::new("b", "Twin B", FamilyRole::Primary);
        let rec = calculate_best_assignee(
            &[b, a],
            &AssignmentContext::default(),
            &AssignmentWeights::default(),
        );
        assert_eq!(rec.assignee.id, "a");
    }

    #[test]
    fn test_clear_winner_raises_confidence() {
        let weights = AssignmentWeights::default();
        let close = calculate_best_assignee(
            &[
                FamilyMember::new("a", "Twin A", FamilyRole::Primary),
                FamilyMember::new("b", "Twin B", FamilyRole::Primary),
            ],
            &AssignmentContext::default(),
            &weights,
        );
        let clear = calculate_best_assignee(&pool(), &context(), &weights);
        assert!(clear.confidence > close.confidence);
    }
}
