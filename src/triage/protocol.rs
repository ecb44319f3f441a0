//! Triage protocol state machine.
//!
//! A protocol instance walks the four template steps, records responses
//! (last write wins), and routes to emergency as soon as a critical flag
//! fires. Advancing past a step with unanswered required questions is
//! rejected with the missing question ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, warn};

use crate::error::TriageError;
use crate::models::{ChecklistItem, FollowUpSpec, Severity};

use super::templates::{
    template_for, Condition, ProtocolTemplate, ProtocolType, ResponseValue, Step, StepOutcome,
};

/// Recommended course of action produced by a completed assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionRecommendation {
    Call911,
    UrgentCare,
    NurseLine,
    Monitor,
}

/// The deterministic plan generated from a protocol's responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionPlan {
    pub recommendation: ActionRecommendation,
    pub call_script: String,
    /// 1-10 scale, 10 meaning call emergency services now.
    pub urgency_level: u8,
    pub estimated_timeframe: String,
    pub follow_up_tasks: Vec<FollowUpSpec>,
}

/// A running instance of a triage protocol for one alert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageProtocol {
    pub alert_id: String,
    pub protocol_type: ProtocolType,
    /// 1-based step cursor.
    pub current_step_number: u8,
    pub responses: HashMap<String, ResponseValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TriageProtocol {
    pub fn new(alert_id: impl Into<String>, protocol_type: ProtocolType) -> Self {
        let now = Utc::now();
        Self {
            alert_id: alert_id.into(),
            protocol_type,
            current_step_number: 1,
            responses: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn template(&self) -> &'static ProtocolTemplate {
        template_for(self.protocol_type)
    }

    /// The step the cursor currently points at.
    pub fn current_step(&self) -> Result<&'static Step, TriageError> {
        self.template()
            .step(self.current_step_number)
            .ok_or(TriageError::UnknownStep {
                step: self.current_step_number,
            })
    }

    /// Record a response. Re-answering a question overwrites the earlier
    /// value.
    pub fn record_response(&mut self, question_id: impl Into<String>, value: ResponseValue) {
        let question_id = question_id.into();
        info!(
            alert_id = %self.alert_id,
            question_id = %question_id,
            "recorded triage response"
        );
        self.responses.insert(question_id, value);
        self.updated_at = Utc::now();
    }

    /// Check whether any critical flag on the current step has fired.
    pub fn has_critical_flags(&self) -> bool {
        let Ok(step) = self.current_step() else {
            return false;
        };
        step.critical_flags.iter().any(|flag| {
            let fired = self.evaluate(flag);
            if fired {
                warn!(
                    alert_id = %self.alert_id,
                    step = step.number,
                    "critical flag triggered"
                );
            }
            fired
        })
    }

    /// Determine where the protocol goes next, without moving the cursor.
    pub fn next_step(&self) -> StepOutcome {
        let Ok(step) = self.current_step() else {
            return StepOutcome::Complete;
        };
        for transition in step.transitions {
            if self.evaluate(&transition.condition) {
                return transition.outcome;
            }
        }
        match self.template().step(step.number + 1) {
            Some(next) => StepOutcome::Step(next.number),
            None => StepOutcome::Complete,
        }
    }

    /// Check that every required question on the current step is answered.
    pub fn validate_current_step(&self) -> Result<(), TriageError> {
        let step = self.current_step()?;
        let missing: Vec<String> = step
            .questions
            .iter()
            .filter(|q| q.required && !self.responses.contains_key(q.id))
            .map(|q| q.id.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TriageError::MissingResponses {
                question_ids: missing,
            })
        }
    }

    /// Validate the current step and move the cursor. Emergency and
    /// completion outcomes are returned without moving.
    pub fn advance(&mut self) -> Result<StepOutcome, TriageError> {
        self.validate_current_step()?;
        let outcome = self.next_step();
        if let StepOutcome::Step(number) = outcome {
            info!(
                alert_id = %self.alert_id,
                from = self.current_step_number,
                to = number,
                "triage step advanced"
            );
            self.current_step_number = number;
            self.updated_at = Utc::now();
        }
        Ok(outcome)
    }

    /// Discard all responses and return the cursor to step one.
    pub fn reset(&mut self) {
        self.responses.clear();
        self.current_step_number = 1;
        self.updated_at = Utc::now();
    }

    /// Validate required responses across the whole protocol, not just the
    /// current step.
    pub fn validate_all_steps(&self) -> Result<(), TriageError> {
        let missing: Vec<String> = self
            .template()
            .steps
            .iter()
            .flat_map(|s| s.questions.iter())
            .filter(|q| q.required && !self.responses.contains_key(q.id))
            .map(|q| q.id.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(TriageError::MissingResponses {
                question_ids: missing,
            })
        }
    }

    /// Generate the action plan for the responses recorded so far. Critical
    /// flags on the current step always win and produce the emergency plan.
    pub fn generate_action_plan(&self) -> ActionPlan {
        if self.has_critical_flags() {
            return self.emergency_action_plan();
        }
        match self.protocol_type {
            ProtocolType::Fall => self.fall_action_plan(),
            ProtocolType::Injury => self.injury_action_plan(),
            ProtocolType::ChestPain => self.chest_pain_action_plan(),
            ProtocolType::Confusion => self.confusion_action_plan(),
        }
    }

    fn evaluate(&self, condition: &Condition) -> bool {
        match condition {
            Condition::Default => true,
            Condition::Any(conditions) => conditions.iter().any(|c| self.evaluate(c)),
            Condition::Yes(id) => self.responses.get(*id).is_some_and(|r| r.is_yes()),
            Condition::No(id) => self.responses.get(*id).is_some_and(|r| r.is_no()),
            Condition::AtLeast(id, threshold) => self
                .responses
                .get(*id)
                .and_then(|r| r.as_number())
                .is_some_and(|n| n >= *threshold),
            Condition::Equals(id, expected) => self
                .responses
                .get(*id)
                .is_some_and(|r| matches!(r, ResponseValue::Text(s) if s == expected)),
        }
    }

    fn numeric_response(&self, id: &str) -> f64 {
        self.responses
            .get(id)
            .and_then(|r| r.as_number())
            .unwrap_or(0.0)
    }

    fn response_is_no(&self, id: &str) -> bool {
        self.responses.get(id).is_some_and(|r| r.is_no())
    }

    fn response_is_yes(&self, id: &str) -> bool {
        self.responses.get(id).is_some_and(|r| r.is_yes())
    }

    fn emergency_action_plan(&self) -> ActionPlan {
        let call_script = match self.protocol_type {
            ProtocolType::Fall => {
                "This is a medical emergency. An elderly person has fallen and may have serious injuries. Please send an ambulance immediately."
            }
            ProtocolType::Injury => {
                "This is a medical emergency. An elderly person has sustained a serious injury. Please send an ambulance immediately."
            }
            ProtocolType::ChestPain => {
                "This is a medical emergency. An elderly person is experiencing severe chest pain. This may be a heart attack. Please send an ambulance immediately."
            }
            ProtocolType::Confusion => {
                "This is a medical emergency. An elderly person is experiencing severe confusion or altered mental state. Please send an ambulance immediately."
            }
        };
        ActionPlan {
            recommendation: ActionRecommendation::Call911,
            call_script: call_script.to_string(),
            urgency_level: 10,
            estimated_timeframe: "Immediate".to_string(),
            follow_up_tasks: vec![FollowUpSpec {
                title: "Follow up on emergency response".to_string(),
                description: "Contact family members and track emergency services response"
                    .to_string(),
                priority: Severity::Urgent,
                estimated_minutes: 15,
                checklist: vec![
                    ChecklistItem::required("Confirm ambulance arrival"),
                    ChecklistItem::required("Notify primary family contacts"),
                    ChecklistItem::required("Gather medical information for hospital"),
                ],
                due_in_hours: 1.0,
            }],
        }
    }

    fn fall_action_plan(&self) -> ActionPlan {
        let pain_level = self.numeric_response("pain_level_initial");
        let cannot_move = self.response_is_no("mobility_status");

        if pain_level >= 6.0 || cannot_move {
            ActionPlan {
                recommendation: ActionRecommendation::UrgentCare,
                call_script: "The elder has fallen and is experiencing significant pain or mobility issues. Please arrange for urgent medical evaluation.".to_string(),
                urgency_level: 7,
                estimated_timeframe: "Within 2 hours".to_string(),
                follow_up_tasks: vec![FollowUpSpec {
                    title: "Arrange urgent care visit".to_string(),
                    description: "Schedule and transport to urgent care facility".to_string(),
                    priority: Severity::High,
                    estimated_minutes: 60,
                    checklist: vec![
                        ChecklistItem::required("Call urgent care to confirm availability"),
                        ChecklistItem::required("Arrange transportation"),
                        ChecklistItem::required("Gather insurance and medication information"),
                    ],
                    due_in_hours: 2.0,
                }],
            }
        } else {
            ActionPlan {
                recommendation: ActionRecommendation::Monitor,
                call_script: "The elder appears stable after the fall. Continue monitoring for any changes in condition.".to_string(),
                urgency_level: 4,
                estimated_timeframe: "Monitor for 24 hours".to_string(),
                follow_up_tasks: vec![FollowUpSpec {
                    title: "Monitor post-fall condition".to_string(),
                    description: "Check on elder regularly for next 24 hours".to_string(),
                    priority: Severity::Medium,
                    estimated_minutes: 10,
                    checklist: vec![
                        ChecklistItem::required("Check pain level every 4 hours"),
                        ChecklistItem::required("Monitor mobility and balance"),
                        ChecklistItem::required("Watch for signs of delayed injury"),
                    ],
                    due_in_hours: 4.0,
                }],
            }
        }
    }

    fn injury_action_plan(&self) -> ActionPlan {
        let pain_level = self.numeric_response("pain_scale");
        let moderate_bleeding = matches!(
            self.responses.get("bleeding_severity"),
            Some(ResponseValue::Text(s)) if s == "Moderate bleeding"
        );

        if pain_level >= 7.0 || moderate_bleeding {
            ActionPlan {
                recommendation: ActionRecommendation::UrgentCare,
                call_script: "The elder has sustained an injury requiring medical attention. Please arrange for urgent care evaluation.".to_string(),
                urgency_level: 6,
                estimated_timeframe: "Within 4 hours".to_string(),
                follow_up_tasks: vec![],
            }
        } else {
            ActionPlan {
                recommendation: ActionRecommendation::Monitor,
                call_script: "The injury appears minor. Continue monitoring and provide basic first aid as needed.".to_string(),
                urgency_level: 3,
                estimated_timeframe: "Monitor closely".to_string(),
                follow_up_tasks: vec![],
            }
        }
    }

    fn chest_pain_action_plan(&self) -> ActionPlan {
        // Non-critical chest pain still gets urgent evaluation.
        ActionPlan {
            recommendation: ActionRecommendation::UrgentCare,
            call_script: "The elder is experiencing chest pain. Given the potential cardiac implications, please arrange for immediate medical evaluation.".to_string(),
            urgency_level: 8,
            estimated_timeframe: "Within 1 hour".to_string(),
            follow_up_tasks: vec![FollowUpSpec {
                title: "Urgent cardiac evaluation".to_string(),
                description: "Ensure immediate medical assessment for chest pain".to_string(),
                priority: Severity::Urgent,
                estimated_minutes: 30,
                checklist: vec![
                    ChecklistItem::required("Contact primary care physician"),
                    ChecklistItem::required("Prepare cardiac medication list"),
                    ChecklistItem::required("Monitor vital signs if possible"),
                ],
                due_in_hours: 1.0,
            }],
        }
    }

    fn confusion_action_plan(&self) -> ActionPlan {
        let sudden_onset = matches!(
            self.responses.get("confusion_onset"),
            Some(ResponseValue::Text(s)) if s == "Suddenly (minutes)"
        );
        let medication_changes = self.response_is_yes("medication_changes");

        if sudden_onset || medication_changes {
            ActionPlan {
                recommendation: ActionRecommendation::UrgentCare,
                call_script: "The elder is experiencing confusion that may require immediate medical evaluation to rule out serious causes.".to_string(),
                urgency_level: 7,
                estimated_timeframe: "Within 2 hours".to_string(),
                follow_up_tasks: vec![],
            }
        } else {
            ActionPlan {
                recommendation: ActionRecommendation::NurseLine,
                call_script: "The elder is experiencing confusion. Please contact the nurse line or primary care provider for guidance.".to_string(),
                urgency_level: 5,
                estimated_timeframe: "Within 4 hours".to_string(),
                follow_up_tasks: vec![],
            }
        }
    }
}
