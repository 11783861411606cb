//! Normalization over the response envelope shapes the service emits.
//!
//! Structural probing happens only here. Callers work with the
//! [`ResponseBody`] union instead of re-probing the envelope at each site.

use serde_json::Value;

use crate::error::TriageError;

#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// A textual message body, expected to itself be JSON.
    Text(String),
    /// Content already delivered as a structured object.
    Structured(Value),
    /// No usable content anywhere in the envelope.
    Empty,
}

/// Maps a raw envelope into [`ResponseBody`].
///
/// Recognizes the chat-completion shape (`choices[0].message.content`) and
/// the output-text shape (top-level `output_text`, or `output[].content[]`
/// parts of type `output_text`). A content object that is already parsed
/// passes through as [`ResponseBody::Structured`].
pub fn normalize(envelope: &Value) -> ResponseBody {
    if let Some(content) = envelope.pointer("/choices/0/message/content") {
        match content {
            Value::String(text) if !text.trim().is_empty() => {
                return ResponseBody::Text(text.clone());
            }
            Value::Object(_) => return ResponseBody::Structured(content.clone()),
            _ => {}
        }
    }

    if let Some(text) = envelope.get("output_text").and_then(Value::as_str) {
        if !text.trim().is_empty() {
            return ResponseBody::Text(text.to_string());
        }
    }

    if let Some(output) = envelope.get("output").and_then(Value::as_array) {
        let mut text = String::new();
        for item in output {
            let parts = item.get("content").and_then(Value::as_array);
            for part in parts.into_iter().flatten() {
                if part.get("type").and_then(Value::as_str) == Some("output_text") {
                    if let Some(chunk) = part.get("text").and_then(Value::as_str) {
                        text.push_str(chunk);
                    }
                }
            }
        }
        if !text.trim().is_empty() {
            return ResponseBody::Text(text);
        }
    }

    ResponseBody::Empty
}

/// Extracts the classification object from a raw envelope.
///
/// Text bodies must parse as JSON (retryable [`TriageError::MalformedResponse`]
/// otherwise); structured bodies pass through as-is; an empty envelope is a
/// retryable [`TriageError::EmptyResponse`].
pub fn extract_result(envelope: &Value) -> Result<Value, TriageError> {
    match normalize(envelope) {
        ResponseBody::Text(text) => {
            serde_json::from_str(&text).map_err(|e| TriageError::MalformedResponse(e.to_string()))
        }
        ResponseBody::Structured(value) => Ok(value),
        ResponseBody::Empty => Err(TriageError::EmptyResponse),
    }
}
