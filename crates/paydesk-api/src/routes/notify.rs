//! `HX-Trigger` response header builder
//!
//! The admin layout listens for a `notify` event and shows its message in
//! a single snackbar. Other events (`refresh-accounts`, `refresh-payments`)
//! make the matching tables reload themselves.

use std::convert::Infallible;

use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse, IntoResponseParts, Response, ResponseParts};
use serde_json::{Map, Value};

use crate::error::ApiError;

pub const HX_TRIGGER: &str = "hx-trigger";
pub const NOTIFY_EVENT: &str = "notify";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HxTrigger {
    events: Map<String, Value>,
}

impl HxTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snackbar message. A later call replaces the earlier one.
    pub fn notify(mut self, message: impl Into<String>) -> Self {
        self.events
            .insert(NOTIFY_EVENT.to_string(), Value::String(message.into()));
        self
    }

    /// Fire a plain event on the page body
    pub fn event(mut self, name: impl Into<String>) -> Self {
        self.events.insert(name.into(), Value::Bool(true));
        self
    }

    /// JSON header value with non-ASCII characters escaped, since header
    /// values must be visible ASCII.
    pub fn header_value(&self) -> String {
        let json = Value::Object(self.events.clone()).to_string();
        let mut out = String::with_capacity(json.len());
        for c in json.chars() {
            if c.is_ascii() {
                out.push(c);
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{:04x}", unit));
                }
            }
        }
        out
    }
}

/// Shorthand for a trigger carrying only a message
pub fn notify(message: impl Into<String>) -> HxTrigger {
    HxTrigger::new().notify(message)
}

/// Error status with an empty body and a `notify` message. HTMX does not
/// swap error responses, so whatever the user had on screen stays.
pub fn failure(prefix: &str, error: ApiError) -> Response {
    error.log();
    (
        error.status(),
        notify(format!("{}: {}", prefix, error.user_message())),
        Html(String::new()),
    )
        .into_response()
}

impl IntoResponseParts for HxTrigger {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if self.events.is_empty() {
            return Ok(res);
        }
        match HeaderValue::from_str(&self.header_value()) {
            Ok(value) => {
                res.headers_mut().insert(HX_TRIGGER, value);
            }
            Err(e) => log::warn!("Dropping unencodable HX-Trigger header: {}", e),
        }
        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use paydesk_core::CoreError;

    #[test]
    fn test_header_value() {
        let trigger = notify("Account created successfully!").event("refresh-accounts");
        let parsed: Value = serde_json::from_str(&trigger.header_value()).unwrap();
        assert_eq!(parsed["notify"], "Account created successfully!");
        assert_eq!(parsed["refresh-accounts"], true);
    }

    #[test]
    fn test_latest_message_wins() {
        let trigger = notify("first").notify("second");
        let parsed: Value = serde_json::from_str(&trigger.header_value()).unwrap();
        assert_eq!(parsed, serde_json::json!({"notify": "second"}));
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let trigger = notify("Zoë paid €5");
        let header = trigger.header_value();
        assert!(header.is_ascii());
        let parsed: Value = serde_json::from_str(&header).unwrap();
        assert_eq!(parsed["notify"], "Zoë paid €5");
    }

    #[test]
    fn test_sets_response_header() {
        let response = (notify("saved"), Html("")).into_response();
        let header = response.headers().get(HX_TRIGGER).unwrap().to_str().unwrap();
        assert!(header.contains("saved"));

        let response = (HxTrigger::new(), Html("")).into_response();
        assert!(response.headers().get(HX_TRIGGER).is_none());
    }

    #[test]
    fn test_failure_keeps_status_and_notifies() {
        let error = ApiError::from(CoreError::AccountNotFound { id: 9 });
        let response = failure("Failed to create payment", error);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let header = response.headers().get(HX_TRIGGER).unwrap().to_str().unwrap();
        let parsed: Value = serde_json::from_str(header).unwrap();
        assert_eq!(parsed["notify"], "Failed to create payment: Account not found: 9");
    }
}
