use std::any::Any;

use axum::body::Body;
use axum::extract::Request;
use axum::http::Method;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::Map;
use serde_json::Value;

use crate::common::Envelope;
use crate::inbound::http::exception::canonical_reason;
use crate::inbound::http::exception::Exception;
use crate::inbound::http::exception::ExceptionBody;
use crate::inbound::http::exception::HttpException;
use crate::inbound::http::exception::UnhandledError;

pub const FALLBACK_MESSAGE: &str = "Internal server error";

/// Outcome of mapping an [`Exception`] to the wire.
///
/// Travels as a response extension so the boundary middleware can log it
/// with request context.
#[derive(Debug, Clone)]
pub struct Caught {
    pub status: StatusCode,
    pub envelope: Envelope,
    pub detail: Option<String>,
}

/// Map any exception to its status and failure envelope.
pub fn catch(exception: &Exception) -> Caught {
    match exception {
        Exception::Http(http) => {
            let (message, data) = resolve_body(http.body());
            Caught {
                status: http.status(),
                envelope: Envelope::failure(message, data),
                detail: http.cause().map(str::to_string),
            }
        }
        Exception::Unhandled(error) => Caught {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            envelope: Envelope::failure(error.message().unwrap_or(FALLBACK_MESSAGE), None),
            detail: Some(error.detail().to_string()),
        },
    }
}

fn resolve_body(body: &ExceptionBody) -> (String, Option<Value>) {
    match body {
        ExceptionBody::Message(message) => (message.clone(), None),
        ExceptionBody::Object(object) => (resolve_message(object), object.get("data").cloned()),
    }
}

// `message` (arrays joined), then `error`; empty or falsy values count as absent
fn resolve_message(object: &Map<String, Value>) -> String {
    match object.get("message").filter(|value| is_present(value)) {
        Some(Value::Array(messages)) => messages
            .iter()
            .map(render)
            .collect::<Vec<_>>()
            .join(", "),
        Some(message) => render(message),
        None => object
            .get("error")
            .filter(|value| is_present(value))
            .map(render)
            .unwrap_or_else(|| FALLBACK_MESSAGE.to_string()),
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(items) => items.iter().map(render).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
        other => other.to_string(),
    }
}

impl IntoResponse for Caught {
    fn into_response(self) -> Response {
        let mut response = (self.status, Json(&self.envelope)).into_response();
        response.extensions_mut().insert(self);
        response
    }
}

impl IntoResponse for Exception {
    fn into_response(self) -> Response {
        catch(&self).into_response()
    }
}

impl IntoResponse for HttpException {
    fn into_response(self) -> Response {
        Exception::Http(self).into_response()
    }
}

/// Outermost error boundary.
///
/// Logs every caught exception with the request method and URI, and
/// rewrites error responses produced elsewhere (extractor rejections,
/// unknown routes, unsupported methods) into the failure envelope.
pub async fn exception_filter(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    if let Some(caught) = response.extensions().get::<Caught>() {
        log_caught(&method, &uri, caught);
        return response;
    }

    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let caught = normalize(status, response.into_body()).await;
    log_caught(&method, &uri, &caught);
    caught.into_response()
}

async fn normalize(status: StatusCode, body: Body) -> Caught {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();

    let body = match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(object)) => ExceptionBody::Object(object),
        _ => {
            let text = String::from_utf8_lossy(&bytes).trim().to_string();
            if text.is_empty() {
                ExceptionBody::Message(canonical_reason(status).to_string())
            } else {
                ExceptionBody::Message(text)
            }
        }
    };

    catch(&Exception::Http(HttpException::with_body(status, body)))
}

fn log_caught(method: &Method, uri: &Uri, caught: &Caught) {
    if caught.status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = caught.status.as_u16(),
            message = %caught.envelope.message,
            detail = caught.detail.as_deref().unwrap_or_default(),
            "Request failed"
        );
    } else {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = caught.status.as_u16(),
            message = %caught.envelope.message,
            "Request rejected"
        );
    }
}

/// Response for a panic captured by `CatchPanicLayer`.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    Exception::Unhandled(UnhandledError::from_panic(payload.as_ref())).into_response()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> ExceptionBody {
        match value {
            Value::Object(object) => ExceptionBody::Object(object),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_plain_message() {
        let exception = HttpException::with_body(
            StatusCode::FORBIDDEN,
            ExceptionBody::Message("Forbidden resource".to_string()),
        );

        let caught = catch(&exception.into());
        assert_eq!(caught.status, StatusCode::FORBIDDEN);
        assert_eq!(caught.envelope, Envelope::failure("Forbidden resource", None));
    }

    #[test]
    fn test_message_array_is_joined() {
        let exception = HttpException::validation(vec![
            "email must be an email".to_string(),
            "password should not be empty".to_string(),
        ]);

        let caught = catch(&exception.into());
        assert_eq!(caught.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            caught.envelope.message,
            "email must be an email, password should not be empty"
        );
    }

    #[test]
    fn test_error_field_when_message_missing() {
        let exception = HttpException::with_body(
            StatusCode::UNPROCESSABLE_ENTITY,
            object(json!({ "statusCode": 422, "error": "Unprocessable Entity" })),
        );

        let caught = catch(&exception.into());
        assert_eq!(caught.envelope.message, "Unprocessable Entity");
    }

    #[test]
    fn test_fallback_when_nothing_usable() {
        let exception = HttpException::with_body(
            StatusCode::BAD_GATEWAY,
            object(json!({ "message": null, "error": false })),
        );

        let caught = catch(&exception.into());
        assert_eq!(caught.status, StatusCode::BAD_GATEWAY);
        assert_eq!(caught.envelope.message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_empty_message_falls_back_to_error() {
        let exception = HttpException::with_body(
            StatusCode::BAD_REQUEST,
            object(json!({ "message": "", "error": "Bad Request" })),
        );

        let caught = catch(&exception.into());
        assert_eq!(caught.envelope.message, "Bad Request");

        let caught = catch(&HttpException::bad_request("").into());
        assert_eq!(caught.envelope.message, "Bad Request");
    }

    #[test]
    fn test_scalar_message_is_rendered() {
        let exception = HttpException::with_body(
            StatusCode::BAD_GATEWAY,
            object(json!({ "message": 17, "error": null })),
        );
        assert_eq!(catch(&exception.into()).envelope.message, "17");

        let exception = HttpException::with_body(
            StatusCode::BAD_REQUEST,
            object(json!({ "message": 0, "error": true })),
        );
        assert_eq!(catch(&exception.into()).envelope.message, "true");
    }

    #[test]
    fn test_data_is_passed_through() {
        let exception = HttpException::conflict("Not enough seats available")
            .with_data(json!({ "available": 2 }));

        let caught = catch(&exception.into());
        assert_eq!(caught.envelope.data, Some(json!({ "available": 2 })));
    }

    #[test]
    fn test_cause_is_kept_out_of_envelope() {
        let exception =
            HttpException::internal("Error creating user").with_cause("connection reset by peer");

        let caught = catch(&exception.into());
        assert_eq!(caught.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(caught.envelope, Envelope::failure("Error creating user", None));
        assert_eq!(caught.detail.as_deref(), Some("connection reset by peer"));
    }

    #[test]
    fn test_unstructured_error_uses_own_message() {
        let exception = Exception::from(anyhow::anyhow!("disk quota exceeded"));

        let caught = catch(&exception);
        assert_eq!(caught.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(caught.envelope.message, "disk quota exceeded");
    }

    #[test]
    fn test_unstructured_error_without_message() {
        let exception = Exception::Unhandled(UnhandledError::new(None, "opaque"));

        let caught = catch(&exception);
        assert_eq!(caught.envelope, Envelope::failure(FALLBACK_MESSAGE, None));
    }

    #[tokio::test]
    async fn test_normalize_empty_body_uses_reason() {
        let caught = normalize(StatusCode::NOT_FOUND, Body::empty()).await;
        assert_eq!(caught.status, StatusCode::NOT_FOUND);
        assert_eq!(caught.envelope.message, "Not Found");
    }

    #[tokio::test]
    async fn test_normalize_text_body() {
        let caught = normalize(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Body::from("Expected request with `Content-Type: application/json`"),
        )
        .await;
        assert_eq!(
            caught.envelope.message,
            "Expected request with `Content-Type: application/json`"
        );
    }
}
