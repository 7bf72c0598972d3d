use serde::{ Serialize, Deserialize };
use serde_json::Value as JsonValue;

pub const UNPARSEABLE_ISSUE: &str = "Unable to parse validation response";

/// The verdict shape the validator prompt asks the model for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub suggested_fix: Option<String>,
    pub explanation: String,
}

/// Returned when the model reply is not JSON. Carries the reply text instead of failing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DegradedVerdict {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub explanation: String,
}

impl DegradedVerdict {
    pub fn new(explanation: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            issues: vec![UNPARSEABLE_ISSUE.to_string()],
            explanation: explanation.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ValidationOutcome {
    /// Whatever JSON the model produced, passed through untouched.
    Parsed(JsonValue),
    Degraded(DegradedVerdict),
}

impl ValidationOutcome {
    /// Reads the outcome as a typed verdict. `None` when the model ignored the requested shape.
    pub fn verdict(&self) -> Option<ValidationVerdict> {
        match self {
            ValidationOutcome::Parsed(value) => serde_json::from_value(value.clone()).ok(),
            ValidationOutcome::Degraded(d) => Some(ValidationVerdict {
                is_valid: d.is_valid,
                issues: d.issues.clone(),
                suggested_fix: None,
                explanation: d.explanation.clone(),
            }),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, ValidationOutcome::Degraded(_))
    }
}
