//! HTTP response model returned by the executor.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// A response received for a resolved request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// HTTP status code (e.g., 200, 404, 500).
    pub status_code: u16,

    /// HTTP status text (e.g., "OK", "Not Found").
    pub status_text: String,

    /// Response headers as returned by the server.
    pub headers: HashMap<String, String>,

    /// Response body as raw bytes.
    pub body: Vec<u8>,

    /// Time from sending the request to reading the full body.
    pub duration: Duration,
}

impl ApiResponse {
    /// Creates a new ApiResponse with the given status code and text.
    pub fn new(status_code: u16, status_text: String) -> Self {
        Self {
            status_code,
            status_text,
            headers: HashMap::new(),
            body: Vec::new(),
            duration: Duration::from_secs(0),
        }
    }

    /// Checks if the response status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }

    /// Gets the Content-Type header value if present.
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the body as UTF-8 text, replacing invalid sequences.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parses the body as JSON, falling back to a JSON string of the raw text.
    pub fn json_or_text(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body)
            .unwrap_or_else(|_| serde_json::Value::String(self.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_checks() {
        assert!(ApiResponse::new(200, "OK".to_string()).is_success());
        assert!(ApiResponse::new(204, "No Content".to_string()).is_success());
        assert!(!ApiResponse::new(404, "Not Found".to_string()).is_success());
        assert!(!ApiResponse::new(500, "Error".to_string()).is_success());
    }

    #[test]
    fn test_content_type() {
        let mut response = ApiResponse::new(200, "OK".to_string());
        assert_eq!(response.content_type(), None);

        response
            .headers
            .insert("content-type".to_string(), "application/json".to_string());
        assert_eq!(response.content_type(), Some("application/json"));
    }

    #[test]
    fn test_json_or_text() {
        let mut response = ApiResponse::new(200, "OK".to_string());
        response.body = br#"{"ok": true}"#.to_vec();
        assert_eq!(response.json_or_text()["ok"], true);

        response.body = b"plain text".to_vec();
        assert_eq!(
            response.json_or_text(),
            serde_json::Value::String("plain text".to_string())
        );
    }
}
