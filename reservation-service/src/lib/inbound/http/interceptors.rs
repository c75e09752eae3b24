use anyhow::Context;
use axum::body::Body;
use axum::extract::Request;
use axum::http::header;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use serde_json::Value;

use crate::common::Envelope;
use crate::inbound::http::exception::Exception;

/// Wrap a successful payload in the success envelope.
///
/// Payloads that already have the envelope shape are returned untouched.
pub fn intercept(payload: Option<Value>) -> Value {
    match payload {
        Some(value) if Envelope::is_envelope(&value) => value,
        other => serde_json::json!(Envelope::success(other.unwrap_or(Value::Null))),
    }
}

/// Apply [`intercept`] to every 2xx response except `204 No Content`.
pub async fn response_interceptor(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let status = response.status();
    if !status.is_success() || status == StatusCode::NO_CONTENT {
        return response;
    }

    match wrap(response).await {
        Ok(response) => response,
        Err(e) => Exception::from(e).into_response(),
    }
}

async fn wrap(response: Response) -> anyhow::Result<Response> {
    let (mut parts, body) = response.into_parts();

    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .context("Failed to read response body")?;

    let is_json = parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));

    let payload = if bytes.is_empty() {
        None
    } else if is_json {
        Some(serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }))
    } else {
        Some(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    let wrapped = serde_json::to_vec(&intercept(payload)).context("Failed to encode envelope")?;

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    Ok(Response::from_parts(parts, Body::from(wrapped)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_wraps_plain_object() {
        let wrapped = intercept(Some(json!({ "id": 1 })));
        assert_eq!(
            wrapped,
            json!({ "success": true, "message": "Success", "data": { "id": 1 } })
        );
    }

    #[test]
    fn test_absent_payload_becomes_null() {
        let wrapped = intercept(None);
        assert_eq!(
            wrapped,
            json!({ "success": true, "message": "Success", "data": null })
        );
    }

    #[test]
    fn test_envelope_is_untouched() {
        let envelope = json!({ "success": false, "message": "custom", "extra": [1, 2] });
        assert_eq!(intercept(Some(envelope.clone())), envelope);
    }

    #[test]
    fn test_idempotent() {
        let once = intercept(Some(json!(["a", "b"])));
        let twice = intercept(Some(once.clone()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_partial_envelope_is_wrapped() {
        let wrapped = intercept(Some(json!({ "success": true })));
        assert_eq!(wrapped["data"], json!({ "success": true }));
    }

    #[tokio::test]
    async fn test_wrap_text_body() {
        let response = (StatusCode::OK, "ok").into_response();

        let wrapped = wrap(response).await.unwrap();
        assert_eq!(
            wrapped.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );

        let bytes = axum::body::to_bytes(wrapped.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["data"], json!("ok"));
    }
}
