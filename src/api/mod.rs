//! REST API Client
//!
//! Frontend bindings to the backend, organized by domain. Every call goes
//! through [`ApiClient`], which sends the session cookie, unwraps the
//! `{ success, message, ... }` envelope and maps failures to [`ApiError`].

mod admin;
mod bookings;
mod contact;
mod inquiries;
mod reviews;
mod users;
mod venues;

use gloo_net::http::{Request, RequestBuilder};
use leptos_listing::FetchFailure;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use web_sys::{FormData, RequestCredentials};

use crate::models::Validate;

// Re-export all public items
pub use admin::*;
pub use bookings::*;
pub use contact::*;
pub use inquiries::*;
pub use reviews::*;
pub use users::*;
pub use venues::*;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request failed ({code}): {message}")]
    Status { code: u16, message: String },
    /// `success: false` from the backend
    #[error("{0}")]
    Rejected(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("{0}")]
    NotFound(String),
    /// Client-side validation, raised before any request is sent
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Unauthorized(String),
}

impl FetchFailure for ApiError {
    fn is_empty_collection(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }
}

impl From<gloo_net::Error> for ApiError {
    fn from(e: gloo_net::Error) -> Self {
        match e {
            gloo_net::Error::SerdeError(e) => ApiError::Decode(e.to_string()),
            other => ApiError::Network(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}

/// Fail with `Invalid` when a required text field is blank
pub(crate) fn required(value: &str, label: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::Invalid(format!("{} is required", label)))
    } else {
        Ok(())
    }
}

pub(crate) fn valid_email(email: &str) -> Result<(), ApiError> {
    required(email, "Email")?;
    let email = email.trim();
    match email.split_once('@') {
        Some((user, domain)) if !user.is_empty() && domain.contains('.') && !domain.ends_with('.') => Ok(()),
        _ => Err(ApiError::Invalid("Enter a valid email address".to_string())),
    }
}

// ========================
// Envelope Handling
// ========================

/// One page of a server-paginated listing
#[derive(Debug, Clone, PartialEq)]
pub struct PageChunk<T> {
    pub items: Vec<T>,
    pub has_more: bool,
}

fn envelope_message(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => map.get("message").and_then(Value::as_str).map(str::to_string),
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().chars().take(200).collect()),
        _ => None,
    }
}

/// Non-JSON bodies (proxy error pages, empty 204s) become strings or null
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Map an HTTP status plus decoded body to the envelope contents or an error
pub fn check_envelope(status: u16, body: Value) -> Result<Value, ApiError> {
    let message = envelope_message(&body);
    match status {
        404 => Err(ApiError::NotFound(message.unwrap_or_else(|| "Not found".to_string()))),
        401 | 403 => Err(ApiError::Unauthorized(
            message.unwrap_or_else(|| "Please log in to continue".to_string()),
        )),
        200..=299 => {
            if body.get("success").and_then(Value::as_bool) == Some(false) {
                Err(ApiError::Rejected(message.unwrap_or_else(|| "Request was rejected".to_string())))
            } else {
                Ok(body)
            }
        }
        code => Err(ApiError::Status {
            code,
            message: message.unwrap_or_else(|| "Something went wrong".to_string()),
        }),
    }
}

/// Decode `body[key]` as a list. Records that fail to decode or validate
/// are logged and skipped rather than failing the whole listing.
pub fn extract_items<T: DeserializeOwned + Validate>(body: &Value, key: &str) -> Result<Vec<T>, ApiError> {
    let raw = match body.get(key) {
        Some(Value::Array(items)) => items,
        Some(Value::Null) | None => return Ok(Vec::new()),
        Some(other) => return Err(ApiError::Decode(format!("'{}' is not a list: {}", key, kind(other)))),
    };

    let mut items = Vec::with_capacity(raw.len());
    for value in raw {
        match T::deserialize(value) {
            Ok(item) => match item.validate() {
                Ok(()) => items.push(item),
                Err(reason) => log::warn!("[api] dropping invalid {} entry: {}", key, reason),
            },
            Err(e) => log::warn!("[api] dropping undecodable {} entry: {}", key, e),
        }
    }
    Ok(items)
}

/// Decode and validate the single record under `body[key]`
pub fn extract_one<T: DeserializeOwned + Validate>(body: &Value, key: &str) -> Result<T, ApiError> {
    let value = body
        .get(key)
        .ok_or_else(|| ApiError::Decode(format!("missing '{}'", key)))?;
    let item = T::deserialize(value)?;
    item.validate().map_err(ApiError::Decode)?;
    Ok(item)
}

pub fn extract_page<T: DeserializeOwned + Validate>(body: &Value, key: &str) -> Result<PageChunk<T>, ApiError> {
    Ok(PageChunk {
        items: extract_items(body, key)?,
        has_more: body.get("hasMore").and_then(Value::as_bool).unwrap_or(false),
    })
}

fn success_message(body: &Value) -> String {
    envelope_message(body).unwrap_or_else(|| "Done".to_string())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ========================
// Client
// ========================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        let builder = match method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Patch => Request::patch(&url),
            Method::Delete => Request::delete(&url),
        };
        builder.credentials(RequestCredentials::Include)
    }

    async fn execute(request: Result<Request, gloo_net::Error>) -> Result<Value, ApiError> {
        let response = request?.send().await?;
        let status = response.status();
        let text = response.text().await?;
        check_envelope(status, parse_body(&text))
    }

    async fn get(&self, path: &str) -> Result<Value, ApiError> {
        log::debug!("[api] GET {}", path);
        Self::execute(self.builder(Method::Get, path).build()).await
    }

    async fn send_json<B: Serialize>(&self, method: Method, path: &str, body: &B) -> Result<Value, ApiError> {
        log::debug!("[api] {:?} {}", method, path);
        Self::execute(self.builder(method, path).json(body)).await
    }

    async fn send_empty(&self, method: Method, path: &str) -> Result<Value, ApiError> {
        log::debug!("[api] {:?} {}", method, path);
        Self::execute(self.builder(method, path).build()).await
    }

    async fn send_form(&self, method: Method, path: &str, form: FormData) -> Result<Value, ApiError> {
        log::debug!("[api] {:?} {} (multipart)", method, path);
        Self::execute(self.builder(method, path).body(form)).await
    }

    pub async fn get_collection<T: DeserializeOwned + Validate>(&self, path: &str, key: &str) -> Result<Vec<T>, ApiError> {
        let body = self.get(path).await?;
        extract_items(&body, key)
    }

    pub async fn get_one<T: DeserializeOwned + Validate>(&self, path: &str, key: &str) -> Result<T, ApiError> {
        let body = self.get(path).await?;
        extract_one(&body, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Venue;
    use serde_json::json;

    #[test]
    fn test_url_joins_without_double_slash() {
        let api = ApiClient::new("http://localhost:4000/api");
        assert_eq!(api.url("/venue/list"), "http://localhost:4000/api/venue/list");
        assert_eq!(api.url("venue/list"), "http://localhost:4000/api/venue/list");
    }

    #[test]
    fn test_not_found_is_empty_collection() {
        let err = check_envelope(404, json!({"success": false, "message": "No bookings"})).unwrap_err();
        assert_eq!(err, ApiError::NotFound("No bookings".to_string()));
        assert!(err.is_empty_collection());
    }

    #[test]
    fn test_success_false_is_rejected() {
        let err = check_envelope(200, json!({"success": false, "message": "Date already booked"})).unwrap_err();
        assert_eq!(err.to_string(), "Date already booked");
        assert!(!err.is_empty_collection());
    }

    #[test]
    fn test_server_error_keeps_message() {
        let err = check_envelope(500, parse_body("<html>Bad Gateway</html>")).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                code: 500,
                message: "<html>Bad Gateway</html>".to_string()
            }
        );
        let err = check_envelope(401, Value::Null).unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_extract_items_skips_invalid_records() {
        let body = json!({
            "success": true,
            "venues": [
                {"_id": "v1", "name": "Lotus Hall", "price": 100},
                {"_id": "v2", "name": ""},
                {"name": "no id at all"},
                {"_id": "v3", "name": "Rooftop", "price": 50}
            ]
        });
        let venues: Vec<Venue> = extract_items(&body, "venues").unwrap();
        let ids: Vec<_> = venues.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["v1", "v3"]);
    }

    #[test]
    fn test_extract_items_missing_key_is_empty() {
        let venues: Vec<Venue> = extract_items(&json!({"success": true}), "venues").unwrap();
        assert!(venues.is_empty());
        let err = extract_items::<Venue>(&json!({"venues": "nope"}), "venues").unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_extract_page_reads_has_more() {
        let body = json!({"success": true, "venues": [{"_id": "v1", "name": "A"}], "hasMore": true});
        let page: PageChunk<Venue> = extract_page(&body, "venues").unwrap();
        assert_eq!(page.items.len(), 1);
        assert!(page.has_more);

        let page: PageChunk<Venue> = extract_page(&json!({"venues": []}), "venues").unwrap();
        assert!(!page.has_more);
    }

    #[test]
    fn test_email_check() {
        assert!(valid_email("guest@example.com").is_ok());
        assert!(valid_email(" guest@example.com ").is_ok());
        assert!(valid_email("guest@").is_err());
        assert!(valid_email("guest.example.com").is_err());
        assert_eq!(
            valid_email("  ").unwrap_err(),
            ApiError::Invalid("Email is required".to_string())
        );
    }
}
