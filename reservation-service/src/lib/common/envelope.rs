use serde::Serialize;
use serde_json::Value;

/// Uniform response body shared by every endpoint.
///
/// `data` is omitted from the JSON when `None`; a successful response always
/// carries `Some`, possibly `Some(Value::Null)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl Envelope {
    pub const SUCCESS_MESSAGE: &'static str = "Success";

    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            message: Self::SUCCESS_MESSAGE.to_string(),
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
        }
    }

    /// Whether `value` already has the envelope shape (`success` and `message` keys).
    pub fn is_envelope(value: &Value) -> bool {
        value
            .as_object()
            .is_some_and(|object| object.contains_key("success") && object.contains_key("message"))
    }
}
