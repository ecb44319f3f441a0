use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::queue_item::Severity;

/// Safety alert categories produced by the monitoring collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    Fall,
    Medication,
    Cognitive,
    Emotional,
    Safety,
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fall => write!(f, "fall"),
            Self::Medication => write!(f, "medication"),
            Self::Cognitive => write!(f, "cognitive"),
            Self::Emotional => write!(f, "emotional"),
            Self::Safety => write!(f, "safety"),
        }
    }
}

/// Inbound safety alert record. Arrives from the alerting collaborator;
/// the engine reads it and normalizes it into a queue item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub severity: Severity,
    pub alert_type: AlertType,
    pub elder_id: String,
    pub elder_name: String,
    pub created_at: DateTime<Utc>,
    pub assigned_to: Option<String>,
}

impl Alert {
    pub fn new(
        severity: Severity,
        alert_type: AlertType,
        elder_id: impl Into<String>,
        elder_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            severity,
            alert_type,
            elder_id: elder_id.into(),
            elder_name: elder_name.into(),
            created_at: Utc::now(),
            assigned_to: None,
        }
    }

    /// Queue card title, derived from the alert type and elder.
    pub fn title(&self) -> String {
        format!(
            "{} alert for {}",
            capitalize(&self.alert_type.to_string()),
            self.elder_name
        )
    }

    /// Human-readable next step for the queue card, derived from type and
    /// severity.
    pub fn suggested_action(&self) -> String {
        if self.severity == Severity::Urgent {
            match self.alert_type {
                AlertType::Fall => "Start Urgent Triage Protocol".to_string(),
                AlertType::Medication => "Verify Medication Status".to_string(),
                _ => "Take Immediate Action".to_string(),
            }
        } else {
            format!("Review {} Alert", capitalize(&self.alert_type.to_string()))
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
