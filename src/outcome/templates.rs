//! Outcome capture templates.
//!
//! One template per task category, each with a closed list of valid outcome
//! strings, the evidence kinds it accepts, and the follow-up rules keyed to
//! specific outcomes. Const data, loaded nowhere and mutated never.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{OutcomeResult, Severity};

/// Task categories with distinct outcome vocabularies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeCategory {
    Medication,
    Safety,
    Appointment,
    General,
}

impl OutcomeCategory {
    pub const ALL: [OutcomeCategory; 4] = [
        Self::Medication,
        Self::Safety,
        Self::Appointment,
        Self::General,
    ];
}

impl fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Medication => write!(f, "medication"),
            Self::Safety => write!(f, "safety"),
            Self::Appointment => write!(f, "appointment"),
            Self::General => write!(f, "general"),
        }
    }
}

impl std::str::FromStr for OutcomeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "medication" => Ok(Self::Medication),
            "safety" => Ok(Self::Safety),
            "appointment" => Ok(Self::Appointment),
            "general" => Ok(Self::General),
            _ => Err(format!("Unknown outcome category: {s}")),
        }
    }
}

/// Evidence kinds a template accepts alongside an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    Photo,
    Video,
    Notes,
    Documents,
    Timestamp,
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Photo => write!(f, "photo"),
            Self::Video => write!(f, "video"),
            Self::Notes => write!(f, "notes"),
            Self::Documents => write!(f, "documents"),
            Self::Timestamp => write!(f, "timestamp"),
        }
    }
}

/// One valid outcome string and the result tier it maps to.
#[derive(Debug, Clone, Copy)]
pub struct OutcomeOption {
    pub text: &'static str,
    pub result: OutcomeResult,
}

const fn success(text: &'static str) -> OutcomeOption {
    OutcomeOption {
        text,
        result: OutcomeResult::Success,
    }
}

const fn partial(text: &'static str) -> OutcomeOption {
    OutcomeOption {
        text,
        result: OutcomeResult::Partial,
    }
}

const fn failed(text: &'static str) -> OutcomeOption {
    OutcomeOption {
        text,
        result: OutcomeResult::Failed,
    }
}

/// Checklist entry in a follow-up rule: text and required flag.
pub type RuleChecklistItem = (&'static str, bool);

/// Follow-up generated when a capture matches `outcome`.
#[derive(Debug, Clone)]
pub struct FollowUpRule {
    pub outcome: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub priority: Severity,
    pub estimated_minutes: u32,
    pub checklist: &'static [RuleChecklistItem],
    pub due_in_hours: f64,
}

#[derive(Debug, Clone)]
pub struct OutcomeTemplate {
    pub category: OutcomeCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub outcome_options: &'static [OutcomeOption],
    pub follow_up_rules: &'static [FollowUpRule],
    pub evidence_kinds: &'static [EvidenceKind],
}

impl OutcomeTemplate {
    /// Look up an outcome string in the closed option list.
    pub fn option(&self, text: &str) -> Option<&'static OutcomeOption> {
        self.outcome_options.iter().find(|o| o.text == text)
    }
}

pub static MEDICATION_TEMPLATE: OutcomeTemplate = OutcomeTemplate {
    category: OutcomeCategory::Medication,
    title: "Medication Verification Outcome",
    description: "Document the outcome of medication verification task",
    outcome_options: &[
        success("All doses verified and taken"),
        partial("Some doses missed"),
        failed("Doses refused"),
        failed("Unable to verify"),
        failed("Medication not available"),
    ],
    follow_up_rules: &[
        FollowUpRule {
            outcome: "Some doses missed",
            title: "Follow up on missed medication doses",
            description: "Contact elder to understand why doses were missed and reschedule",
            priority: Severity::High,
            estimated_minutes: 15,
            checklist: &[
                ("Contact elder about missed doses", true),
                ("Understand reason for missing doses", true),
                ("Reschedule missed doses if appropriate", true),
                ("Document reason in notes", false),
            ],
            due_in_hours: 4.0,
        },
        FollowUpRule {
            outcome: "Doses refused",
            title: "Investigate medication refusal",
            description: "Understand why elder is refusing medication and escalate if needed",
            priority: Severity::High,
            estimated_minutes: 20,
            checklist: &[
                ("Ask about side effects or concerns", true),
                ("Contact primary care physician if needed", true),
                ("Document refusal reason", true),
            ],
            due_in_hours: 2.0,
        },
        FollowUpRule {
            outcome: "Unable to verify",
            title: "Escalate medication verification issue",
            description: "Unable to verify medication status - escalate to primary caregiver",
            priority: Severity::Urgent,
            estimated_minutes: 10,
            checklist: &[
                ("Contact primary caregiver", true),
                ("Provide context about verification issue", true),
            ],
            due_in_hours: 1.0,
        },
    ],
    evidence_kinds: &[EvidenceKind::Photo, EvidenceKind::Notes, EvidenceKind::Timestamp],
};

pub static SAFETY_TEMPLATE: OutcomeTemplate = OutcomeTemplate {
    category: OutcomeCategory::Safety,
    title: "Safety Check Outcome",
    description: "Document the outcome of safety check task",
    outcome_options: &[
        success("All safety checks passed"),
        partial("Minor safety issues found"),
        failed("Major safety concerns identified"),
        failed("Immediate intervention required"),
    ],
    follow_up_rules: &[
        FollowUpRule {
            outcome: "Minor safety issues found",
            title: "Address minor safety issues",
            description: "Implement solutions for identified minor safety concerns",
            priority: Severity::Medium,
            estimated_minutes: 30,
            checklist: &[
                ("Identify specific safety issues", true),
                ("Implement corrective measures", true),
                ("Verify improvements", true),
            ],
            due_in_hours: 24.0,
        },
        FollowUpRule {
            outcome: "Major safety concerns identified",
            title: "Address major safety concerns",
            description: "Urgent action needed to address major safety concerns",
            priority: Severity::Urgent,
            estimated_minutes: 60,
            checklist: &[
                ("Document all safety concerns", true),
                ("Contact family members", true),
                ("Implement immediate safety measures", true),
                ("Consider professional assessment", true),
            ],
            due_in_hours: 2.0,
        },
        FollowUpRule {
            outcome: "Immediate intervention required",
            title: "Emergency safety intervention",
            description: "Immediate action required for critical safety issue",
            priority: Severity::Urgent,
            estimated_minutes: 15,
            checklist: &[
                ("Ensure elder safety immediately", true),
                ("Contact emergency services if needed", true),
                ("Notify all family members", true),
            ],
            due_in_hours: 0.5,
        },
    ],
    evidence_kinds: &[
        EvidenceKind::Photo,
        EvidenceKind::Video,
        EvidenceKind::Notes,
        EvidenceKind::Timestamp,
    ],
};

pub static APPOINTMENT_TEMPLATE: OutcomeTemplate = OutcomeTemplate {
    category: OutcomeCategory::Appointment,
    title: "Medical Appointment Outcome",
    description: "Document the outcome of medical appointment",
    outcome_options: &[
        success("Appointment completed successfully"),
        partial("Appointment rescheduled"),
        failed("Appointment cancelled"),
        failed("Elder refused to attend"),
        failed("Transportation issue"),
    ],
    follow_up_rules: &[
        FollowUpRule {
            outcome: "Appointment completed successfully",
            title: "Document appointment results",
            description: "Collect and document results from completed appointment",
            priority: Severity::Medium,
            estimated_minutes: 20,
            checklist: &[
                ("Collect appointment summary from elder", true),
                ("Document any new medications or instructions", true),
                ("Schedule any recommended follow-ups", true),
            ],
            due_in_hours: 4.0,
        },
        FollowUpRule {
            outcome: "Appointment rescheduled",
            title: "Confirm rescheduled appointment",
            description: "Confirm new appointment date and time with elder",
            priority: Severity::Medium,
            estimated_minutes: 10,
            checklist: &[
                ("Confirm new appointment date/time", true),
                ("Update calendar", true),
                ("Arrange transportation if needed", true),
            ],
            due_in_hours: 24.0,
        },
        FollowUpRule {
            outcome: "Elder refused to attend",
            title: "Follow up on appointment refusal",
            description: "Understand why elder refused appointment and escalate if needed",
            priority: Severity::High,
            estimated_minutes: 20,
            checklist: &[
                ("Understand reason for refusal", true),
                ("Contact physician if medically necessary", true),
                ("Document refusal and reason", true),
            ],
            due_in_hours: 4.0,
        },
    ],
    evidence_kinds: &[
        EvidenceKind::Notes,
        EvidenceKind::Documents,
        EvidenceKind::Timestamp,
    ],
};

pub static GENERAL_TEMPLATE: OutcomeTemplate = OutcomeTemplate {
    category: OutcomeCategory::General,
    title: "General Task Outcome",
    description: "Document the outcome of a general care task",
    outcome_options: &[
        success("Completed successfully"),
        partial("Partially completed"),
        failed("Not completed"),
        failed("Escalated"),
    ],
    follow_up_rules: &[
        FollowUpRule {
            outcome: "Partially completed",
            title: "Complete remaining task items",
            description: "Complete the remaining items from the original task",
            priority: Severity::Medium,
            estimated_minutes: 30,
            checklist: &[
                ("Review what was not completed", true),
                ("Complete remaining items", true),
                ("Verify completion", true),
            ],
            due_in_hours: 24.0,
        },
        FollowUpRule {
            outcome: "Not completed",
            title: "Retry incomplete task",
            description: "Attempt to complete the task again",
            priority: Severity::High,
            estimated_minutes: 30,
            checklist: &[
                ("Understand reason for non-completion", true),
                ("Address any barriers", true),
                ("Retry task completion", true),
            ],
            due_in_hours: 12.0,
        },
        FollowUpRule {
            outcome: "Escalated",
            title: "Handle escalated task",
            description: "Task has been escalated and requires attention",
            priority: Severity::Urgent,
            estimated_minutes: 20,
            checklist: &[
                ("Review escalation reason", true),
                ("Determine appropriate action", true),
                ("Assign to appropriate person", true),
            ],
            due_in_hours: 2.0,
        },
    ],
    evidence_kinds: &[EvidenceKind::Notes, EvidenceKind::Timestamp],
};

/// Look up the template for a category.
pub fn template_for(category: OutcomeCategory) -> &'static OutcomeTemplate {
    match category {
        OutcomeCategory::Medication => &MEDICATION_TEMPLATE,
        OutcomeCategory::Safety => &SAFETY_TEMPLATE,
        OutcomeCategory::Appointment => &APPOINTMENT_TEMPLATE,
        OutcomeCategory::General => &GENERAL_TEMPLATE,
    }
}
