//! Shared HTTP utilities for the gateway implementation.

/// Extracts `error.message` from an API error payload, if present.
pub(super) fn extract_api_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}

/// Truncates a message to `max_chars` characters, appending an ellipsis
/// when anything was cut.
pub(super) fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{extract_api_message, truncate_for_message};

    #[rstest]
    #[case::nested(r#"{"error":{"message":"Resource not found"}}"#, Some("Resource not found"))]
    #[case::no_message(r#"{"error":{}}"#, None)]
    #[case::not_json("<html>oops</html>", None)]
    fn extracts_nested_error_message(#[case] body: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_api_message(body).as_deref(), expected);
    }

    #[rstest]
    #[case("short", 10, "short")]
    #[case("exactly", 7, "exactly")]
    #[case("truncate me", 8, "truncate...")]
    fn truncates_long_messages(#[case] input: &str, #[case] max: usize, #[case] expected: &str) {
        assert_eq!(truncate_for_message(input, max), expected);
    }
}
