//! Response body normalization.
//!
//! Backends answer with JSON or plain text, and error bodies may or may not
//! carry an `error` or `message` field. [`ResponseBody`] tags which of the
//! two arrived so that message extraction happens in one place.

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ApiError;

/// A response body tagged by how it was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseBody {
    /// Body declared as JSON and parsed successfully.
    Json(Value),
    /// Anything else, kept verbatim.
    Text(String),
}

/// `true` if the `Content-Type` header value denotes JSON.
#[must_use]
pub fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("application/json"))
}

impl ResponseBody {
    /// Interprets a raw body according to its content type.
    ///
    /// A body labelled JSON that fails to parse (or is empty) is kept as text.
    #[must_use]
    pub fn parse(content_type: Option<&str>, raw: String) -> Self {
        if is_json_content_type(content_type) && !raw.trim().is_empty() {
            match serde_json::from_str(&raw) {
                Ok(value) => return Self::Json(value),
                Err(e) => tracing::debug!(error = %e, "JSON-labelled body did not parse; keeping text"),
            }
        }
        Self::Text(raw)
    }

    /// Extracts the message to report for a failed request.
    ///
    /// JSON bodies yield their `error` field, then their `message` field
    /// (empty strings are skipped), then `HTTP Error: <status>`. Text bodies
    /// yield the raw text unchanged, even when it is empty.
    #[must_use]
    pub fn error_message(&self, status: u16) -> String {
        let fallback = || format!("HTTP Error: {status}");
        match self {
            Self::Json(value) => ["error", "message"]
                .into_iter()
                .find_map(|field| {
                    value
                        .get(field)
                        .and_then(Value::as_str)
                        .filter(|s| !s.is_empty())
                })
                .map_or_else(fallback, str::to_string),
            Self::Text(text) => text.clone(),
        }
    }

    /// Deserializes the body into `T`.
    ///
    /// Text bodies are offered to `T` as a JSON string, and an empty text
    /// body as `null`, so `String`, `Option<_>` and
    /// [`serde::de::IgnoredAny`] all accept non-JSON responses.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Decode`] if the body does not match `T`.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let value = match self {
            Self::Json(value) => value,
            Self::Text(text) if text.is_empty() => Value::Null,
            Self::Text(text) => Value::String(text),
        };
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }
}
