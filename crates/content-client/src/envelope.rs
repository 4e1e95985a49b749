//! Response-envelope contract.
//!
//! The backend signals success inside the body, not via HTTP status alone:
//! `status == "success"` or `success == true` together with a non-null
//! `data` payload. Any other shape is a failure, with `message` as the
//! user-facing text when present.

use serde_json::Value;

/// Fallback text when a failure envelope carries no message.
const DEFAULT_FAILURE_MESSAGE: &str = "Request failed";

/// Parsed application-level outcome of a response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Success flag present with a non-null data payload.
    Success(Value),
    /// Anything else.
    Failure { message: String },
}

impl Envelope {
    /// Classify a response body.
    pub fn from_value(body: &Value) -> Envelope {
        let flagged = body.get("status").and_then(Value::as_str) == Some("success")
            || body.get("success").and_then(Value::as_bool) == Some(true);

        if flagged {
            if let Some(data) = body.get("data").filter(|d| !d.is_null()) {
                return Envelope::Success(data.clone());
            }
        }

        let message = body
            .get("message")
            .and_then(Value::as_str)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_FAILURE_MESSAGE)
            .to_string();
        Envelope::Failure { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_success_with_data() {
        let body = json!({ "status": "success", "data": { "id": 1 } });
        assert_eq!(
            Envelope::from_value(&body),
            Envelope::Success(json!({ "id": 1 }))
        );
    }

    #[test]
    fn test_success_flag_with_data() {
        let body = json!({ "success": true, "data": [1, 2] });
        assert_eq!(Envelope::from_value(&body), Envelope::Success(json!([1, 2])));
    }

    #[test]
    fn test_success_flag_with_null_data_is_failure() {
        let body = json!({ "status": "success", "data": null });
        assert!(matches!(
            Envelope::from_value(&body),
            Envelope::Failure { .. }
        ));
    }

    #[test]
    fn test_failure_carries_message() {
        let body = json!({ "status": "error", "message": "Record not found" });
        assert_eq!(
            Envelope::from_value(&body),
            Envelope::Failure {
                message: "Record not found".to_string()
            }
        );
    }

    #[test]
    fn test_failure_without_message_uses_default() {
        let body = json!({ "status": "error" });
        assert_eq!(
            Envelope::from_value(&body),
            Envelope::Failure {
                message: DEFAULT_FAILURE_MESSAGE.to_string()
            }
        );
    }
}
