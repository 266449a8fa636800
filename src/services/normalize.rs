//! Extraction of human-readable failure details from API server responses.

use std::collections::BTreeMap;

use serde_json::Value;

/// Pick the reason for a failed response.
///
/// Prefers the `message` field of a JSON object body and falls back to the
/// status line's reason phrase when the body is empty, not JSON, not an
/// object, or has no string `message`.
pub fn reason(body: &[u8], reason_phrase: &str) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| reason_phrase.to_string())
}

/// Field-level violations from the body's `params` object, empty when absent.
pub fn invalid_params(body: &[u8]) -> BTreeMap<String, String> {
    let Ok(Value::Object(mut root)) = serde_json::from_slice::<Value>(body) else {
        return BTreeMap::new();
    };
    let Some(Value::Object(params)) = root.remove("params") else {
        return BTreeMap::new();
    };
    params
        .into_iter()
        .map(|(field, violation)| {
            let text = match violation {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (field, text)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_prefers_message_field() {
        let body = br#"{"message": "Cluster not found", "status": 404}"#;
        assert_eq!(reason(body, "Not Found"), "Cluster not found");
    }

    #[test]
    fn reason_falls_back_on_non_json() {
        assert_eq!(reason(b"not json", "Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn reason_falls_back_on_empty_body() {
        assert_eq!(reason(b"", "Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn reason_falls_back_on_non_object() {
        assert_eq!(reason(b"[1, 2, 3]", "Conflict"), "Conflict");
        assert_eq!(reason(br#""message""#, "Conflict"), "Conflict");
    }

    #[test]
    fn reason_falls_back_when_message_missing() {
        assert_eq!(reason(br#"{"error": "x"}"#, "Forbidden"), "Forbidden");
    }

    #[test]
    fn invalid_params_reads_params_object() {
        let body = br#"{"message": "Invalid params", "params": {"hostname": "required", "port": 7}}"#;
        let params = invalid_params(body);
        assert_eq!(params.len(), 2);
        assert_eq!(params["hostname"], "required");
        assert_eq!(params["port"], "7");
    }

    #[test]
    fn invalid_params_empty_without_params() {
        assert!(invalid_params(br#"{"message": "nope"}"#).is_empty());
        assert!(invalid_params(b"<html>").is_empty());
        assert!(invalid_params(br#"{"params": "flat string"}"#).is_empty());
    }
}
