use serde_json::Value;

use crate::error::GenerateError;

/// One way of locating a JSON payload inside free-form model output.
type Strategy = fn(&str) -> Option<String>;

/// Tried in order; the first candidate that parses wins. Adding a fallback
/// means appending a strategy here.
const STRATEGIES: &[Strategy] = &[whole_response, fenced_block, brace_span];

/// Coerce raw model output into a JSON value.
///
/// Models frequently wrap the payload in a markdown fence or surround it
/// with prose; a payload inside a fence must parse identically to the same
/// payload sent raw.
pub fn extract_json(response: &str) -> Result<Value, GenerateError> {
    for strategy in STRATEGIES {
        if let Some(candidate) = strategy(response) {
            if let Ok(value) = serde_json::from_str::<Value>(&candidate) {
                return Ok(value);
            }
        }
    }

    let preview: String = response.chars().take(120).collect();
    Err(GenerateError::MalformedResponse(preview))
}

fn whole_response(response: &str) -> Option<String> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn fenced_block(response: &str) -> Option<String> {
    let open = response.find("```")?;
    let after_fence = response.get(open + 3..)?;
    // Skip an optional language tag on the opening fence line.
    let body_start = after_fence.find('\n')?;
    let body = after_fence.get(body_start + 1..)?;
    let close = body.find("```")?;
    Some(body.get(..close)?.trim().to_string())
}

fn brace_span(response: &str) -> Option<String> {
    let start = response.find('{')?;
    let end = response.rfind('}')?;
    if end < start {
        return None;
    }
    Some(response.get(start..=end)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{"title": "Atomic Habits", "chapters": [{"chapter_number": 1}]}"#;

    #[test]
    fn raw_json_parses_directly() {
        let value = extract_json(PAYLOAD).expect("parse raw");
        assert_eq!(value["title"], "Atomic Habits");
    }

    #[test]
    fn fenced_payload_parses_identically_to_raw() {
        let fenced = format!("```json\n{PAYLOAD}\n```");
        let raw = extract_json(PAYLOAD).expect("parse raw");
        let wrapped = extract_json(&fenced).expect("parse fenced");
        assert_eq!(raw, wrapped);
    }

    #[test]
    fn fence_without_language_tag_parses() {
        let fenced = format!("```\n{PAYLOAD}\n```");
        assert!(extract_json(&fenced).is_ok());
    }

    #[test]
    fn surrounding_prose_falls_back_to_the_brace_span() {
        let chatty = format!("Here is the JSON you asked for:\n\n{PAYLOAD}\n\nLet me know!");
        let value = extract_json(&chatty).expect("parse brace span");
        assert_eq!(value["title"], "Atomic Habits");
    }

    #[test]
    fn unparseable_output_is_a_malformed_response() {
        let err = extract_json("I am sorry, I cannot do that.").unwrap_err();
        assert!(matches!(err, GenerateError::MalformedResponse(_)));
    }

    #[test]
    fn empty_output_is_a_malformed_response() {
        assert!(extract_json("   \n ").is_err());
    }
}
