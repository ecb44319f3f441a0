//! Static triage protocol templates.
//!
//! Each protocol carries the same four steps: Immediate Safety Check,
//! Rapid Assessment, Action Plan Generation, and Outcome Capture. The
//! branching rules are const data evaluated against recorded responses,
//! so templates cannot drift at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The emergency scenarios a triage protocol covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProtocolType {
    Fall,
    Injury,
    ChestPain,
    Confusion,
}

impl ProtocolType {
    pub const ALL: [ProtocolType; 4] = [
        Self::Fall,
        Self::Injury,
        Self::ChestPain,
        Self::Confusion,
    ];
}

impl fmt::Display for ProtocolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fall => write!(f, "fall"),
            Self::Injury => write!(f, "injury"),
            Self::ChestPain => write!(f, "chest_pain"),
            Self::Confusion => write!(f, "confusion"),
        }
    }
}

impl std::str::FromStr for ProtocolType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fall" => Ok(Self::Fall),
            "injury" => Ok(Self::Injury),
            "chest_pain" => Ok(Self::ChestPain),
            "confusion" => Ok(Self::Confusion),
            _ => Err(format!("Unknown protocol type: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    YesNo,
    Scale,
    MultipleChoice,
    Text,
}

/// A single triage question.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub text: &'static str,
    pub kind: QuestionKind,
    pub required: bool,
    pub critical_flag: bool,
    pub options: &'static [&'static str],
}

/// A recorded answer to a triage question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl ResponseValue {
    /// Interpret the response as an affirmative answer.
    pub fn is_yes(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => s == "yes" || s == "Yes",
            Self::Number(_) => false,
        }
    }

    /// Interpret the response as a negative answer.
    pub fn is_no(&self) -> bool {
        match self {
            Self::Bool(b) => !*b,
            Self::Text(s) => s == "no" || s == "No",
            Self::Number(_) => false,
        }
    }

    /// Numeric value, accepting numbers and numeric text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.parse().ok(),
            Self::Bool(_) => None,
        }
    }
}

/// A branching condition over recorded responses.
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    /// Always true; terminal fallback in a transition list.
    Default,
    /// True if any sub-condition holds.
    Any(&'static [Condition]),
    /// The question was answered affirmatively.
    Yes(&'static str),
    /// The question was answered negatively.
    No(&'static str),
    /// Numeric response at or above the threshold.
    AtLeast(&'static str, f64),
    /// Response text equals the given option.
    Equals(&'static str, &'static str),
}

/// Where a step transition leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Step(u8),
    Emergency,
    Complete,
}

#[derive(Debug, Clone, Copy)]
pub struct Transition {
    pub condition: Condition,
    pub outcome: StepOutcome,
}

/// One of the four steps of a protocol.
#[derive(Debug, Clone)]
pub struct Step {
    pub number: u8,
    pub title: &'static str,
    pub questions: &'static [Question],
    pub critical_flags: &'static [Condition],
    pub transitions: &'static [Transition],
}

#[derive(Debug, Clone)]
pub struct ProtocolTemplate {
    pub protocol: ProtocolType,
    pub steps: &'static [Step],
}

impl ProtocolTemplate {
    pub fn step(&self, number: u8) -> Option<&'static Step> {
        self.steps.iter().find(|s| s.number == number)
    }
}

pub const STEP_SAFETY_CHECK: &str = "Immediate Safety Check";
pub const STEP_RAPID_ASSESSMENT: &str = "Rapid Assessment";
pub const STEP_ACTION_PLAN: &str = "Action Plan Generation";
pub const STEP_OUTCOME_CAPTURE: &str = "Outcome Capture";

const fn yes_no(id: &'static str, text: &'static str, critical: bool) -> Question {
    Question {
        id,
        text,
        kind: QuestionKind::YesNo,
        required: true,
        critical_flag: critical,
        options: &[],
    }
}

const fn scale(id: &'static str, text: &'static str, critical: bool) -> Question {
    Question {
        id,
        text,
        kind: QuestionKind::Scale,
        required: true,
        critical_flag: critical,
        options: &[],
    }
}

const fn choice(
    id: &'static str,
    text: &'static str,
    options: &'static [&'static str],
    critical: bool,
) -> Question {
    Question {
        id,
        text,
        kind: QuestionKind::MultipleChoice,
        required: true,
        critical_flag: critical,
        options,
    }
}

const fn text(id: &'static str, q: &'static str, required: bool) -> Question {
    Question {
        id,
        text: q,
        kind: QuestionKind::Text,
        required,
        critical_flag: false,
        options: &[],
    }
}

pub static FALL_PROTOCOL: ProtocolTemplate = ProtocolTemplate {
    protocol: ProtocolType::Fall,
    steps: &[
        Step {
            number: 1,
            title: STEP_SAFETY_CHECK,
            questions: &[
                yes_no(
                    "consciousness",
                    "Is the elder conscious and breathing normally?",
                    true,
                ),
                yes_no(
                    "severe_injury",
                    "Is there severe bleeding, head injury, or inability to move?",
                    true,
                ),
                scale(
                    "pain_level_initial",
                    "On a scale of 1-10, how severe is the pain?",
                    false,
                ),
            ],
            critical_flags: &[
                Condition::No("consciousness"),
                Condition::Yes("severe_injury"),
                Condition::AtLeast("pain_level_initial", 8.0),
            ],
            transitions: &[
                Transition {
                    condition: Condition::Any(&[
                        Condition::No("consciousness"),
                        Condition::Yes("severe_injury"),
                        Condition::AtLeast("pain_level_initial", 8.0),
                    ]),
                    outcome: StepOutcome::Emergency,
                },
                Transition {
                    condition: Condition::Default,
                    outcome: StepOutcome::Step(2),
                },
            ],
        },
        Step {
            number: 2,
            title: STEP_RAPID_ASSESSMENT,
            questions: &[
                choice(
                    "pain_location",
                    "Where is the pain located?",
                    &[
                        "Head/Neck",
                        "Back/Spine",
                        "Hip/Pelvis",
                        "Arm/Shoulder",
                        "Leg/Knee",
                        "Other",
                    ],
                    false,
                ),
                yes_no("mobility_status", "Can the elder move without assistance?", false),
                yes_no(
                    "current_medications",
                    "Is the elder taking blood thinners or other medications?",
                    false,
                ),
                yes_no(
                    "head_injury_check",
                    "Did the elder hit their head during the fall?",
                    true,
                ),
                yes_no("confusion_check", "Is the elder confused or disoriented?", true),
            ],
            critical_flags: &[
                Condition::Yes("head_injury_check"),
                Condition::Yes("confusion_check"),
            ],
            transitions: &[
                Transition {
                    condition: Condition::Any(&[
                        Condition::Yes("head_injury_check"),
                        Condition::Yes("confusion_check"),
                    ]),
                    outcome: StepOutcome::Emergency,
                },
                Transition {
                    condition: Condition::No("mobility_status"),
                    outcome: StepOutcome::Emergency,
                },
                Transition {
                    condition: Condition::Default,
                    outcome: StepOutcome::Step(3),
                },
            ],
        },
        Step {
            number: 3,
            title: STEP_ACTION_PLAN,
            questions: &[choice(
                "action_preference",
                "Based on the assessment, what action would you prefer?",
                &["Call 911", "Go to Urgent Care", "Call Nurse Line", "Monitor at Home"],
                false,
            )],
            critical_flags: &[],
            transitions: &[Transition {
                condition: Condition::Default,
                outcome: StepOutcome::Step(4),
            }],
        },
        Step {
            number: 4,
            title: STEP_OUTCOME_CAPTURE,
            questions: &[
                text("action_taken", "What action was taken?", true),
                yes_no("emergency_called", "Were emergency services called?", false),
                text("outcome_notes", "Additional notes about the outcome:", false),
            ],
            critical_flags: &[],
            transitions: &[Transition {
                condition: Condition::Default,
                outcome: StepOutcome::Complete,
            }],
        },
    ],
};

pub static INJURY_PROTOCOL: ProtocolTemplate = ProtocolTemplate {
    protocol: ProtocolType::Injury,
    steps: &[
        Step {
            number: 1,
            title: STEP_SAFETY_CHECK,
            questions: &[
                yes_no("consciousness", "Is the elder conscious and alert?", true),
                choice(
                    "bleeding_severity",
                    "Is there active bleeding?",
                    &[
                        "No bleeding",
                        "Minor bleeding",
                        "Moderate bleeding",
                        "Severe bleeding",
                    ],
                    true,
                ),
                yes_no("breathing_status", "Is breathing normal and unlabored?", true),
            ],
            critical_flags: &[
                Condition::No("consciousness"),
                Condition::Equals("bleeding_severity", "Severe bleeding"),
                Condition::No("breathing_status"),
            ],
            transitions: &[
                Transition {
                    condition: Condition::Any(&[
                        Condition::No("consciousness"),
                        Condition::Equals("bleeding_severity", "Severe bleeding"),
                        Condition::No("breathing_status"),
                    ]),
                    outcome: StepOutcome::Emergency,
                },
                Transition {
                    condition: Condition::Default,
                    outcome: StepOutcome::Step(2),
                },
            ],
        },
        Step {
            number: 2,
            title: STEP_RAPID_ASSESSMENT,
            questions: &[
                choice(
                    "injury_location",
                    "Where is the injury located?",
                    &["Head/Face", "Neck", "Chest", "Abdomen", "Arms", "Legs", "Back"],
                    false,
                ),
                scale("pain_scale", "Pain level (0-10 scale):", false),
                yes_no("mobility_affected", "Is mobility affected by the injury?", false),
                yes_no("swelling_present", "Is there visible swelling or deformity?", false),
            ],
            critical_flags: &[Condition::AtLeast("pain_scale", 8.0)],
            transitions: &[
                Transition {
                    condition: Condition::AtLeast("pain_scale", 8.0),
                    outcome: StepOutcome::Emergency,
                },
                Transition {
                    condition: Condition::Default,
                    outcome: StepOutcome::Step(3),
                },
            ],
        },
        Step {
            number: 3,
            title: STEP_ACTION_PLAN,
            questions: &[choice(
                "recommended_action",
                "Recommended next step:",
                &["Emergency Room", "Urgent Care", "Primary Care", "Home Care"],
                false,
            )],
            critical_flags: &[],
            transitions: &[Transition {
                condition: Condition::Default,
                outcome: StepOutcome::Step(4),
            }],
        },
        Step {
            number: 4,
            title: STEP_OUTCOME_CAPTURE,
            questions: &[
                text("action_taken", "Action taken:", true),
                yes_no("emergency_called", "Were emergency services contacted?", false),
                yes_no("follow_up_needed", "Is follow-up care needed?", false),
            ],
            critical_flags: &[],
            transitions: &[Transition {
                condition: Condition::Default,
                outcome: StepOutcome::Complete,
            }],
        },
    ],
};

pub static CHEST_PAIN_PROTOCOL: ProtocolTemplate = ProtocolTemplate {
    protocol: ProtocolType::ChestPain,
    steps: &[
        Step {
            number: 1,
            title: STEP_SAFETY_CHECK,
            questions: &[
                yes_no("consciousness", "Is the elder conscious and responsive?", true),
                scale(
                    "chest_pain_severity",
                    "How severe is the chest pain (0-10)?",
                    true,
                ),
                yes_no(
                    "breathing_difficulty",
                    "Is there difficulty breathing or shortness of breath?",
                    true,
                ),
                yes_no(
                    "sweating_nausea",
                    "Is there sweating, nausea, or dizziness?",
                    true,
                ),
            ],
            critical_flags: &[
                Condition::No("consciousness"),
                Condition::AtLeast("chest_pain_severity", 7.0),
                Condition::Yes("breathing_difficulty"),
                Condition::Yes("sweating_nausea"),
            ],
            transitions: &[
                Transition {
                    condition: Condition::Any(&[
                        Condition::No("consciousness"),
                        Condition::AtLeast("chest_pain_severity", 7.0),
                        Condition::Yes("breathing_difficulty"),
                        Condition::Yes("sweating_nausea"),
                    ]),
                    outcome: StepOutcome::Emergency,
                },
                Transition {
                    condition: Condition::Default,
                    outcome: StepOutcome::Step(2),
                },
            ],
        },
        Step {
            number: 2,
            title: STEP_RAPID_ASSESSMENT,
            questions: &[
                choice(
                    "pain_duration",
                    "How long has the chest pain been present?",
                    &[
                        "Less than 5 minutes",
                        "5-15 minutes",
                        "15-30 minutes",
                        "More than 30 minutes",
                    ],
                    false,
                ),
                yes_no(
                    "pain_radiation",
                    "Does the pain radiate to arm, jaw, or back?",
                    true,
                ),
                yes_no(
                    "cardiac_history",
                    "Does the elder have a history of heart problems?",
                    false,
                ),
                yes_no(
                    "current_medications",
                    "Is the elder taking heart medications?",
                    false,
                ),
            ],
            critical_flags: &[Condition::Yes("pain_radiation")],
            transitions: &[
                Transition {
                    condition: Condition::Any(&[
                        Condition::Yes("pain_radiation"),
                        Condition::Equals("pain_duration", "More than 30 minutes"),
                    ]),
                    outcome: StepOutcome::Emergency,
                },
                Transition {
                    condition: Condition::Default,
                    outcome: StepOutcome::Step(3),
                },
            ],
        },
        Step {
            number: 3,
            title: STEP_ACTION_PLAN,
            questions: &[choice(
                "immediate_action",
                "Immediate action required:",
                &[
                    "Call 911 Immediately",
                    "Go to Emergency Room",
                    "Call Cardiologist",
                    "Monitor Closely",
                ],
                false,
            )],
            critical_flags: &[],
            transitions: &[Transition {
                condition: Condition::Default,
                outcome: StepOutcome::Step(4),
            }],
        },
        Step {
            number: 4,
            title: STEP_OUTCOME_CAPTURE,
            questions: &[
                text("action_taken", "Action taken:", true),
                yes_no("emergency_called", "Were emergency services called?", false),
                yes_no("symptoms_resolved", "Have symptoms improved or resolved?", false),
            ],
            critical_flags: &[],
            transitions: &[Transition {
                condition: Condition::Default,
                outcome: StepOutcome::Complete,
            }],
        },
    ],
};

pub static CONFUSION_PROTOCOL: ProtocolTemplate = ProtocolTemplate {
    protocol: ProtocolType::Confusion,
    steps: &[
        Step {
            number: 1,
            title: STEP_SAFETY_CHECK,
            questions: &[
                yes_no(
                    "responsiveness",
                    "Is the elder responsive to voice and touch?",
                    true,
                ),
                choice(
                    "orientation_check",
                    "Does the elder know their name, location, and date?",
                    &["Knows all three", "Knows two", "Knows one", "Knows none"],
                    true,
                ),
                yes_no(
                    "physical_symptoms",
                    "Are there any physical symptoms (fever, weakness, difficulty speaking)?",
                    true,
                ),
            ],
            critical_flags: &[
                Condition::No("responsiveness"),
                Condition::Equals("orientation_check", "Knows none"),
                Condition::Yes("physical_symptoms"),
            ],
            transitions: &[
                Transition {
                    condition: Condition::Any(&[
                        Condition::No("responsiveness"),
                        Condition::Equals("orientation_check", "Knows none"),
                        Condition::Yes("physical_symptoms"),
                    ]),
                    outcome: StepOutcome::Emergency,
                },
                Transition {
                    condition: Condition::Default,
                    outcome: StepOutcome::Step(2),
                },
            ],
        },
        Step {
            number: 2,
            title: STEP_RAPID_ASSESSMENT,
            questions: &[
                choice(
                    "confusion_onset",
                    "When did the confusion start?",
                    &[
                        "Suddenly (minutes)",
                        "Gradually (hours)",
                        "Over days",
                        "Chronic/ongoing",
                    ],
                    false,
                ),
                yes_no(
                    "medication_changes",
                    "Have there been recent medication changes?",
                    false,
                ),
                yes_no(
                    "recent_illness",
                    "Has the elder been ill recently (UTI, infection, etc.)?",
                    false,
                ),
                yes_no(
                    "safety_concerns",
                    "Are there immediate safety concerns (wandering, agitation)?",
                    true,
                ),
            ],
            critical_flags: &[Condition::Yes("safety_concerns")],
            transitions: &[
                Transition {
                    condition: Condition::Any(&[
                        Condition::Yes("safety_concerns"),
                        Condition::Equals("confusion_onset", "Suddenly (minutes)"),
                    ]),
                    outcome: StepOutcome::Emergency,
                },
                Transition {
                    condition: Condition::Default,
                    outcome: StepOutcome::Step(3),
                },
            ],
        },
        Step {
            number: 3,
            title: STEP_ACTION_PLAN,
            questions: &[choice(
                "recommended_care",
                "Recommended level of care:",
                &[
                    "Emergency Room",
                    "Urgent Care",
                    "Primary Care Same Day",
                    "Schedule Appointment",
                ],
                false,
            )],
            critical_flags: &[],
            transitions: &[Transition {
                condition: Condition::Default,
                outcome: StepOutcome::Step(4),
            }],
        },
        Step {
            number: 4,
            title: STEP_OUTCOME_CAPTURE,
            questions: &[
                text("action_taken", "Action taken:", true),
                yes_no("emergency_called", "Were emergency services called?", false),
                text("safety_measures", "What safety measures were implemented?", false),
            ],
            critical_flags: &[],
            transitions: &[Transition {
                condition: Condition::Default,
                outcome: StepOutcome::Complete,
            }],
        },
    ],
};

/// Look up the template for a protocol type.
pub fn template_for(protocol: ProtocolType) -> &'static ProtocolTemplate {
    match protocol {
        ProtocolType::Fall => &FALL_PROTOCOL,
        ProtocolType::Injury => &INJURY_PROTOCOL,
        ProtocolType::ChestPain => &CHEST_PAIN_PROTOCOL,
        ProtocolType::Confusion => &CONFUSION_PROTOCOL,
    }
}
