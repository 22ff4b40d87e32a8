//! Best-effort extraction of a JSON payload from a free-form model response.
//!
//! Model replies often wrap JSON in markdown code fences or mix it with
//! explanatory prose. Extraction is a total function: any response that
//! yields no well-formed payload produces `None`, never an error, so every
//! caller has exactly one fallback branch to implement.

use tracing::debug;

/// Extract the JSON object payload from a model response, if any.
///
/// Strategies, in order:
/// 1. The trimmed response starts with `{`: the whole trimmed response is
///    the candidate.
/// 2. A markdown code fence (```json or bare ```) holds the candidate.
/// 3. The first balanced `{ ... }` region, scanned with string-literal and
///    escape awareness.
///
/// # Examples
///
/// ```
/// use fabula_analysis::extract_json;
///
/// let response = "Sure! Here it is: {\"scenes\": []} Hope that helps.";
/// assert_eq!(extract_json(response), Some("{\"scenes\": []}".to_string()));
/// assert_eq!(extract_json("no payload here"), None);
/// ```
pub fn extract_json(response: &str) -> Option<String> {
    let trimmed = response.trim();
    if trimmed.starts_with('{') {
        return Some(trimmed.to_string());
    }

    if let Some(json) = extract_from_code_block(response, "json") {
        return Some(json);
    }

    extract_balanced(response, '{', '}')
}

/// Extract content from markdown code blocks.
///
/// Looks for ```language fences first, then bare ``` fences. A missing
/// closing fence is treated as a truncated response and the remainder is
/// returned.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        return Some(response[content_start..].trim().to_string());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip to next newline in case there's a language specifier
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters.
///
/// Finds the first occurrence of `open` and extracts content up to the
/// matching `close`, handling nesting and string literals correctly.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + ch.len_utf8()].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Extract and deserialize the JSON payload of a model response.
///
/// Returns `None` when no payload is found or the candidate fails to
/// deserialize into `T`; the failure is logged at debug level since
/// malformed responses are an expected, tolerated outcome.
pub fn parse_payload<T>(response: &str) -> Option<T>
where
    T: serde::de::DeserializeOwned,
{
    let json = extract_json(response)?;
    match serde_json::from_str(&json) {
        Ok(value) => Some(value),
        Err(e) => {
            let preview: String = json.chars().take(100).collect();
            debug!(error = %e, json_preview = %preview, "Payload failed to deserialize");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_whole_response_when_it_is_json() {
        let response = "  {\"goals\": []}  ";
        assert_eq!(extract_json(response), Some("{\"goals\": []}".to_string()));
    }

    #[test]
    fn extracts_json_from_code_block() {
        let response = "Here's the JSON you requested:\n\n```json\n{\n  \"scenes\": []\n}\n```\n\nHope this helps!";
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"scenes\""));
        assert!(json.starts_with('{'));
    }

    #[test]
    fn extracts_balanced_braces_from_prose() {
        let response = "Sure! Here it is: {\"id\": 456, \"nested\": {\"value\": \"test\"}} Done.";
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("nested"));
    }

    #[test]
    fn handles_braces_inside_string_literals() {
        let response = r#"Result: {"text": "curly } inside", "n": 1}"#;
        let json = extract_json(response).unwrap();
        assert!(json.ends_with("\"n\": 1}"));
    }

    #[test]
    fn handles_escaped_quotes() {
        let response = r#"{"text": "She said \"hello\""}"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("She said"));
    }

    #[test]
    fn no_payload_yields_none() {
        assert_eq!(extract_json("This is just plain text"), None);
        assert_eq!(extract_json(""), None);
    }

    #[test]
    fn unclosed_code_fence_returns_remainder() {
        let response = "```json\n{\"goals\": []}";
        let json = extract_json(response).unwrap();
        assert_eq!(json, "{\"goals\": []}");
    }

    #[test]
    fn parse_payload_into_struct() {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct Payload {
            narrator: String,
        }

        let response = "The narrator is below.\n{\"narrator\": \"Stacey\"}";
        let payload: Payload = parse_payload(response).unwrap();
        assert_eq!(payload.narrator, "Stacey");
    }

    #[test]
    fn parse_payload_rejects_malformed_json() {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct Payload {
            #[allow(dead_code)]
            narrator: String,
        }

        let malformed = "{\"narrator\": \"Stacey\""; // missing closing brace
        assert!(parse_payload::<Payload>(malformed).is_none());
    }
}
