/// Sampling settings sent with one kind of upstream call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub max_tokens: u32,
}

pub const CHAT_SAMPLING: Sampling = Sampling { temperature: 0.7, max_tokens: 1000 };

/// Lower temperature for the validator, which has to produce strict JSON.
pub const VALIDATION_SAMPLING: Sampling = Sampling { temperature: 0.3, max_tokens: 1024 };

const VALIDATION_TEMPLATE: &str = "You are an expert cURL command validator. Analyze this curl command and identify any issues:

curl command: {curl_command}

You must respond with ONLY a valid JSON object, no markdown formatting, no code blocks, no backticks. Just the raw JSON object with this exact structure:
{
  \"isValid\": true or false,
  \"issues\": [\"array of issue strings, empty if none\"],
  \"suggestedFix\": \"corrected curl command string or null if valid\",
  \"explanation\": \"brief explanation string\"
}

Be strict about syntax, headers, URL format, and API best practices.";

/// Builds the single user turn sent to the model when validating `curl_command`.
pub fn get_validation_prompt(curl_command: &str) -> String {
    VALIDATION_TEMPLATE.replace("{curl_command}", curl_command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_command_verbatim() {
        let prompt = get_validation_prompt("curl -X POST https://api.example.com -d '{\"a\":1}'");
        assert!(prompt.contains("curl command: curl -X POST https://api.example.com -d '{\"a\":1}'\n"));
        assert!(prompt.starts_with("You are an expert cURL command validator."));
        assert!(prompt.ends_with("Be strict about syntax, headers, URL format, and API best practices."));
    }

    #[test]
    fn asks_for_the_four_verdict_fields() {
        let prompt = get_validation_prompt("curl http://example.com");
        for field in ["\"isValid\"", "\"issues\"", "\"suggestedFix\"", "\"explanation\""] {
            assert!(prompt.contains(field), "missing {}", field);
        }
        assert!(prompt.contains("no markdown formatting"));
    }

    #[test]
    fn placeholder_text_in_command_is_left_alone() {
        let prompt = get_validation_prompt("curl http://x/{curl_command}");
        assert!(prompt.contains("curl command: curl http://x/{curl_command}\n"));
        assert!(!prompt.contains("curl command: {curl_command}"));
    }

    #[test]
    fn same_command_same_prompt() {
        assert_eq!(get_validation_prompt("curl a"), get_validation_prompt("curl a"));
    }
}
