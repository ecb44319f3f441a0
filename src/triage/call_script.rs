//! Emergency call script generation.
//!
//! Builds the deterministic script a caller reads to a dispatcher, plus a
//! key-information summary and a one-line condition assessment, all derived
//! from the triage responses recorded so far.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::templates::{ProtocolType, ResponseValue};

/// What is known when the emergency call is placed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyCallRequest {
    pub alert_id: String,
    pub elder_id: String,
    pub elder_name: String,
    pub scenario: ProtocolType,
    pub urgency_level: u8,
    pub location: Option<String>,
    pub triage_responses: HashMap<String, ResponseValue>,
    pub requested_by: Option<String>,
}

/// The generated script and supporting facts for the dispatcher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallScript {
    pub scenario: ProtocolType,
    pub primary_script: String,
    pub key_information: Vec<String>,
    pub medical_history: Option<String>,
    pub current_condition: String,
    pub location: String,
}

const UNKNOWN_LOCATION: &str = "Location to be determined";

/// Build the call script for a request. Deterministic for a given request.
pub fn generate_call_script(request: &EmergencyCallRequest) -> CallScript {
    match request.scenario {
        ProtocolType::Fall => fall_call_script(request),
        ProtocolType::Injury => injury_call_script(request),
        ProtocolType::ChestPain => chest_pain_call_script(request),
        ProtocolType::Confusion => confusion_call_script(request),
    }
}

fn location_of(request: &EmergencyCallRequest) -> String {
    request
        .location
        .clone()
        .unwrap_or_else(|| UNKNOWN_LOCATION.to_string())
}

fn yes_no(responses: &HashMap<String, ResponseValue>, id: &str) -> &'static str {
    if responses.get(id).is_some_and(|r| r.is_yes()) {
        "Yes"
    } else {
        "No"
    }
}

fn text_of(responses: &HashMap<String, ResponseValue>, id: &str) -> String {
    match responses.get(id) {
        Some(ResponseValue::Text(s)) => s.clone(),
        Some(ResponseValue::Number(n)) => n.to_string(),
        Some(ResponseValue::Bool(b)) => b.to_string(),
        None => "unknown".to_string(),
    }
}

fn fall_call_script(request: &EmergencyCallRequest) -> CallScript {
    let responses = &request.triage_responses;
    let location = location_of(request);
    let conscious = responses.get("consciousness").is_some_and(|r| r.is_yes());
    let severe_injury = responses.get("severe_injury").is_some_and(|r| r.is_yes());
    let head_injury = responses.get("head_injury_check").is_some_and(|r| r.is_yes());
    let can_move = responses.get("mobility_status").is_some_and(|r| r.is_yes());

    let key_information = vec![
        format!("Patient: {}", request.elder_name),
        "Incident: Fall".to_string(),
        format!("Conscious: {}", yes_no(responses, "consciousness")),
        format!("Severe injury: {}", yes_no(responses, "severe_injury")),
        format!("Pain level: {}/10", text_of(responses, "pain_level_initial")),
        format!("Head injury: {}", yes_no(responses, "head_injury_check")),
        format!("Can move: {}", yes_no(responses, "mobility_status")),
    ];

    let mut script = format!(
        "This is a medical emergency. An elderly person named {} has fallen. ",
        request.elder_name
    );
    if !conscious {
        script.push_str("The person is unconscious. ");
    }
    if severe_injury {
        script.push_str("There are signs of severe injury. ");
    }
    if head_injury {
        script.push_str("There may be a head injury. ");
    }
    if !can_move {
        script.push_str("The person cannot move. ");
    }
    script.push_str(&format!("Please send an ambulance immediately to {location}."));

    CallScript {
        scenario: ProtocolType::Fall,
        primary_script: script,
        key_information,
        medical_history: None,
        current_condition: assess_fall_condition(responses),
        location,
    }
}

fn injury_call_script(request: &EmergencyCallRequest) -> CallScript {
    let responses = &request.triage_responses;
    let location = location_of(request);
    let conscious = responses.get("consciousness").is_some_and(|r| r.is_yes());
    let bleeding = text_of(responses, "bleeding_severity");
    let breathing = responses.get("breathing_status").is_some_and(|r| r.is_yes());
    let injury_location = text_of(responses, "injury_location");

    let key_information = vec![
        format!("Patient: {}", request.elder_name),
        "Incident: Injury".to_string(),
        format!("Conscious: {}", yes_no(responses, "consciousness")),
        format!("Bleeding: {bleeding}"),
        format!("Breathing normal: {}", yes_no(responses, "breathing_status")),
        format!("Pain level: {}/10", text_of(responses, "pain_scale")),
        format!("Injury location: {injury_location}"),
    ];

    let mut script = format!(
        "This is a medical emergency. An elderly person named {} has sustained an injury. ",
        request.elder_name
    );
    if !conscious {
        script.push_str("The person is unconscious. ");
    }
    if bleeding == "Severe bleeding" {
        script.push_str("There is severe bleeding. ");
    }
    if !breathing {
        script.push_str("The person is having difficulty breathing. ");
    }
    script.push_str(&format!("The injury is located at {injury_location}. "));
    script.push_str(&format!("Please send an ambulance immediately to {location}."));

    CallScript {
        scenario: ProtocolType::Injury,
        primary_script: script,
        key_information,
        medical_history: None,
        current_condition: assess_injury_condition(responses),
        location,
    }
}

fn chest_pain_call_script(request: &EmergencyCallRequest) -> CallScript {
    let responses = &request.triage_responses;
    let location = location_of(request);
    let conscious = responses.get("consciousness").is_some_and(|r| r.is_yes());
    let breathing_difficulty = responses
        .get("breathing_difficulty")
        .is_some_and(|r| r.is_yes());
    let sweating_nausea = responses.get("sweating_nausea").is_some_and(|r| r.is_yes());
    let pain_radiation = responses.get("pain_radiation").is_some_and(|r| r.is_yes());
    let cardiac_history = responses.get("cardiac_history").is_some_and(|r| r.is_yes());

    let key_information = vec![
        format!("Patient: {}", request.elder_name),
        "Incident: Chest Pain".to_string(),
        format!("Conscious: {}", yes_no(responses, "consciousness")),
        format!(
            "Pain severity: {}/10",
            text_of(responses, "chest_pain_severity")
        ),
        format!(
            "Breathing difficulty: {}",
            yes_no(responses, "breathing_difficulty")
        ),
        format!("Sweating/nausea: {}", yes_no(responses, "sweating_nausea")),
        format!("Pain radiating: {}", yes_no(responses, "pain_radiation")),
        format!("Cardiac history: {}", yes_no(responses, "cardiac_history")),
    ];

    let mut script = format!(
        "This is a medical emergency. An elderly person named {} is experiencing severe chest pain. ",
        request.elder_name
    );
    if !conscious {
        script.push_str("The person is unconscious. ");
    }
    if breathing_difficulty {
        script.push_str("There is difficulty breathing. ");
    }
    if sweating_nausea {
        script.push_str("The person is sweating and nauseous. ");
    }
    if pain_radiation {
        script.push_str("The pain is radiating to arm, jaw, or back. ");
    }
    if cardiac_history {
        script.push_str("The person has a history of heart problems. ");
    }
    script.push_str("This may be a heart attack. ");
    script.push_str(&format!("Please send an ambulance immediately to {location}."));

    CallScript {
        scenario: ProtocolType::ChestPain,
        primary_script: script,
        key_information,
        medical_history: Some(if cardiac_history {
            "History of cardiac problems".to_string()
        } else {
            "No known cardiac history".to_string()
        }),
        current_condition: assess_chest_pain_condition(responses),
        location,
    }
}

fn confusion_call_script(request: &EmergencyCallRequest) -> CallScript {
    let responses = &request.triage_responses;
    let location = location_of(request);
    let responsive = responses.get("responsiveness").is_some_and(|r| r.is_yes());
    let physical_symptoms = responses
        .get("physical_symptoms")
        .is_some_and(|r| r.is_yes());
    let safety_concerns = responses.get("safety_concerns").is_some_and(|r| r.is_yes());
    let onset = text_of(responses, "confusion_onset");

    let key_information = vec![
        format!("Patient: {}", request.elder_name),
        "Incident: Confusion/Altered Mental State".to_string(),
        format!("Responsive: {}", yes_no(responses, "responsiveness")),
        format!("Orientation: {}", text_of(responses, "orientation_check")),
        format!(
            "Physical symptoms: {}",
            yes_no(responses, "physical_symptoms")
        ),
        format!("Onset: {onset}"),
        format!("Safety concerns: {}", yes_no(responses, "safety_concerns")),
    ];

    let mut script = format!(
        "This is a medical emergency. An elderly person named {} is experiencing severe confusion or altered mental state. ",
        request.elder_name
    );
    if !responsive {
        script.push_str("The person is not responsive to voice or touch. ");
    }
    if physical_symptoms {
        script.push_str("There are physical symptoms present. ");
    }
    if safety_concerns {
        script.push_str("There are immediate safety concerns. ");
    }
    script.push_str(&format!("The confusion started {onset}. "));
    script.push_str(&format!("Please send an ambulance immediately to {location}."));

    CallScript {
        scenario: ProtocolType::Confusion,
        primary_script: script,
        key_information,
        medical_history: None,
        current_condition: assess_confusion_condition(responses),
        location,
    }
}

fn assess_fall_condition(responses: &HashMap<String, ResponseValue>) -> String {
    let conscious = responses.get("consciousness").is_some_and(|r| r.is_yes());
    let severe_injury = responses.get("severe_injury").is_some_and(|r| r.is_yes());
    let head_injury = responses.get("head_injury_check").is_some_and(|r| r.is_yes());
    let can_move = responses.get("mobility_status").is_some_and(|r| r.is_yes());

    if !conscious {
        "Critical - Unconscious".to_string()
    } else if severe_injury || head_injury {
        "Serious - Potential major injury".to_string()
    } else if !can_move {
        "Moderate - Cannot move".to_string()
    } else {
        "Stable - Conscious and mobile".to_string()
    }
}

fn assess_injury_condition(responses: &HashMap<String, ResponseValue>) -> String {
    let conscious = responses.get("consciousness").is_some_and(|r| r.is_yes());
    let bleeding = text_of(responses, "bleeding_severity");
    let breathing = responses.get("breathing_status").is_some_and(|r| r.is_yes());

    if !conscious {
        "Critical - Unconscious".to_string()
    } else if bleeding == "Severe bleeding" || !breathing {
        "Critical - Life threatening".to_string()
    } else if bleeding == "Moderate bleeding" {
        "Serious - Significant injury".to_string()
    } else {
        "Stable - Minor injury".to_string()
    }
}

fn assess_chest_pain_condition(responses: &HashMap<String, ResponseValue>) -> String {
    let conscious = responses.get("consciousness").is_some_and(|r| r.is_yes());
    let pain_severity = responses
        .get("chest_pain_severity")
        .and_then(|r| r.as_number())
        .unwrap_or(0.0);
    let breathing_difficulty = responses
        .get("breathing_difficulty")
        .is_some_and(|r| r.is_yes());
    let pain_radiation = responses.get("pain_radiation").is_some_and(|r| r.is_yes());

    if !conscious {
        "Critical - Unconscious".to_string()
    } else if pain_severity >= 8.0 || breathing_difficulty || pain_radiation {
        "Critical - Possible heart attack".to_string()
    } else if pain_severity >= 6.0 {
        "Serious - Significant chest pain".to_string()
    } else {
        "Moderate - Chest discomfort".to_string()
    }
}

fn assess_confusion_condition(responses: &HashMap<String, ResponseValue>) -> String {
    let responsive = responses.get("responsiveness").is_some_and(|r| r.is_yes());
    let physical_symptoms = responses
        .get("physical_symptoms")
        .is_some_and(|r| r.is_yes());
    let safety_concerns = responses.get("safety_concerns").is_some_and(|r| r.is_yes());

    if !responsive {
        "Critical - Unresponsive".to_string()
    } else if physical_symptoms || safety_concerns {
        "Serious - Altered mental state with complications".to_string()
    } else {
        "Moderate - Confusion requiring evaluation".to_string()
    }
}
