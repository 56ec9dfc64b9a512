use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Uniform body of every API response.
///
/// `success` is always present. Failures carry a human readable `message`
/// and, for server errors, the underlying `error` text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
        }
    }

    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::ok(data)
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        let message = message.into();
        Self {
            success: false,
            data: None,
            message: Some(if message.trim().is_empty() {
                "Error inesperado".to_string()
            } else {
                message
            }),
            error,
        }
    }

    /// The payload of a successful envelope, `None` otherwise.
    pub fn into_data(self) -> Option<T> {
        if self.success { self.data } else { None }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_serializes_without_error_fields() {
        let value = serde_json::to_value(Envelope::ok(vec![1, 2])).unwrap();
        assert_eq!(value, json!({"success": true, "data": [1, 2]}));
    }

    #[test]
    fn test_absent_lookup_is_null_data() {
        let value = serde_json::to_value(Envelope::ok(None::<u8>)).unwrap();
        assert_eq!(value, json!({"success": true, "data": null}));
    }

    #[test]
    fn test_failure_always_has_message() {
        let blank: Envelope<()> = Envelope::failure("  ", None);
        assert_eq!(blank.message.as_deref(), Some("Error inesperado"));

        let value = serde_json::to_value(Envelope::<()>::failure("Falló", Some("boom".into()))).unwrap();
        assert_eq!(value, json!({"success": false, "message": "Falló", "error": "boom"}));
    }

    #[test]
    fn test_missing_data_deserializes_as_none() {
        let envelope: Envelope<crate::database::Stats> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();

        assert!(envelope.success);
        assert_eq!(envelope.data, None);
        assert_eq!(envelope.message, None);
    }

    #[test]
    fn test_into_data_ignores_failed_payloads() {
        let failed = Envelope { success: false, data: Some(3), message: None, error: None };
        assert_eq!(failed.into_data(), None);
        assert_eq!(Envelope::ok(3).into_data(), Some(3));
    }
}
