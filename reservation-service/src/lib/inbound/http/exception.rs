use std::any::Any;
use std::fmt;

use axum::http::StatusCode;
use serde_json::json;
use serde_json::Map;
use serde_json::Value;

/// Body carried by an [`HttpException`].
#[derive(Debug, Clone, PartialEq)]
pub enum ExceptionBody {
    /// A bare message.
    Message(String),
    /// A structured body shaped `{statusCode, message, error, data?}` where
    /// `message` may be a string or an array of strings.
    Object(Map<String, Value>),
}

/// An error that knows its HTTP status and client-facing body.
#[derive(Debug, Clone)]
pub struct HttpException {
    status: StatusCode,
    body: ExceptionBody,
    cause: Option<String>,
}

impl HttpException {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self::structured(status, Value::String(message.into()))
    }

    pub fn with_body(status: StatusCode, body: ExceptionBody) -> Self {
        Self {
            status,
            body,
            cause: None,
        }
    }

    fn structured(status: StatusCode, message: Value) -> Self {
        let mut body = Map::new();
        body.insert("statusCode".to_string(), json!(status.as_u16()));
        body.insert("message".to_string(), message);
        body.insert("error".to_string(), json!(canonical_reason(status)));
        Self::with_body(status, ExceptionBody::Object(body))
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// 400 listing every violated constraint of a request.
    pub fn validation(messages: Vec<String>) -> Self {
        let messages = messages.into_iter().map(Value::String).collect();
        Self::structured(StatusCode::BAD_REQUEST, Value::Array(messages))
    }

    /// Attach a `data` payload to be passed through to the client.
    pub fn with_data(mut self, data: Value) -> Self {
        let mut body = match self.body {
            ExceptionBody::Object(body) => body,
            ExceptionBody::Message(message) => {
                let mut body = Map::new();
                body.insert("message".to_string(), Value::String(message));
                body
            }
        };
        body.insert("data".to_string(), data);
        self.body = ExceptionBody::Object(body);
        self
    }

    /// Record diagnostic detail for the logs. Never sent to the client.
    pub fn with_cause(mut self, cause: impl fmt::Display) -> Self {
        self.cause = Some(cause.to_string());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ExceptionBody {
        &self.body
    }

    pub fn cause(&self) -> Option<&str> {
        self.cause.as_deref()
    }
}

pub fn canonical_reason(status: StatusCode) -> &'static str {
    status.canonical_reason().unwrap_or("Unknown Error")
}

/// An error with no HTTP semantics of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnhandledError {
    message: Option<String>,
    detail: String,
}

impl UnhandledError {
    pub fn new(message: Option<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.filter(|message| !message.trim().is_empty()),
            detail: detail.into(),
        }
    }

    pub fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|message| message.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned());

        let detail = match &message {
            Some(message) => format!("handler panicked: {}", message),
            None => "handler panicked with a non-string payload".to_string(),
        };

        Self::new(message, detail)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<anyhow::Error> for UnhandledError {
    fn from(e: anyhow::Error) -> Self {
        Self::new(Some(e.to_string()), format!("{:?}", e))
    }
}

/// Anything that can escape request handling.
#[derive(Debug, Clone)]
pub enum Exception {
    Http(HttpException),
    Unhandled(UnhandledError),
}

impl From<HttpException> for Exception {
    fn from(e: HttpException) -> Self {
        Exception::Http(e)
    }
}

impl From<UnhandledError> for Exception {
    fn from(e: UnhandledError) -> Self {
        Exception::Unhandled(e)
    }
}

impl From<anyhow::Error> for Exception {
    fn from(e: anyhow::Error) -> Self {
        Exception::Unhandled(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_builds_structured_body() {
        let exception = HttpException::not_found("Genre not found");

        assert_eq!(exception.status(), StatusCode::NOT_FOUND);
        let ExceptionBody::Object(body) = exception.body() else {
            panic!("expected structured body");
        };
        assert_eq!(body["statusCode"], json!(404));
        assert_eq!(body["message"], json!("Genre not found"));
        assert_eq!(body["error"], json!("Not Found"));
    }

    #[test]
    fn test_with_data_upgrades_plain_message() {
        let exception = HttpException::with_body(
            StatusCode::CONFLICT,
            ExceptionBody::Message("Taken".to_string()),
        )
        .with_data(json!({ "field": "name" }));

        let ExceptionBody::Object(body) = exception.body() else {
            panic!("expected structured body");
        };
        assert_eq!(body["message"], json!("Taken"));
        assert_eq!(body["data"], json!({ "field": "name" }));
    }

    #[test]
    fn test_panic_payloads() {
        let payload: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(UnhandledError::from_panic(payload.as_ref()).message(), Some("boom"));

        let payload: Box<dyn Any + Send> = Box::new(String::from("kaboom"));
        assert_eq!(UnhandledError::from_panic(payload.as_ref()).message(), Some("kaboom"));

        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(UnhandledError::from_panic(payload.as_ref()).message(), None);
    }

    #[test]
    fn test_blank_message_is_absent() {
        let error = UnhandledError::new(Some("  ".to_string()), "detail");
        assert_eq!(error.message(), None);
    }
}
