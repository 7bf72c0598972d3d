use log::debug;

use crate::models::validation::{ DegradedVerdict, ValidationOutcome };

const TAGGED_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Removes every "```json" and "```" marker, with the whitespace that follows each, then trims.
///
/// Runs to a fixed point, so `strip_code_fences(strip_code_fences(s)) == strip_code_fences(s)`
/// even when a removal joins stray backticks into a new fence.
pub fn strip_code_fences(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = remove_marker(&remove_marker(&current, TAGGED_FENCE), FENCE).trim().to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

fn remove_marker(text: &str, marker: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(idx) = rest.find(marker) {
        out.push_str(&rest[..idx]);
        rest = rest[idx + marker.len()..].trim_start();
    }
    out.push_str(rest);
    out
}

/// Turns the validator model's reply into an outcome. Never fails: text that is not JSON
/// after fence stripping becomes a degraded verdict carrying that text.
pub fn interpret_model_reply(text: &str) -> ValidationOutcome {
    let cleaned = strip_code_fences(text);
    match serde_json::from_str(&cleaned) {
        Ok(value) => ValidationOutcome::Parsed(value),
        Err(e) => {
            debug!("Model reply is not JSON ({}): {}", e, cleaned);
            ValidationOutcome::Degraded(DegradedVerdict::new(cleaned))
        }
    }
}
