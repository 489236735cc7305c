use reqwest::StatusCode;
use serde_json::Value;

/// Failures surfaced by the gateway.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The backend answered 401. The session has already been cleared and
    /// the login view requested by the time the caller sees this.
    #[error("unauthorized")]
    Unauthorized,

    #[error("request rejected with status {status}")]
    Rejected {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("server error with status {status}")]
    Server {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("login response is missing {}", .missing.join(", "))]
    IncompleteLogin { missing: Vec<&'static str> },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("could not build HTTP client: {0}")]
    Client(String),
}

impl GatewayError {
    /// Classifies a non-success, non-401 status.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body);
        if status.is_server_error() {
            GatewayError::Server { status, message }
        } else {
            GatewayError::Rejected { status, message }
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            GatewayError::Unauthorized => Some(StatusCode::UNAUTHORIZED),
            GatewayError::Rejected { status, .. } | GatewayError::Server { status, .. } => {
                Some(*status)
            }
            GatewayError::Network(e) => e.status(),
            _ => None,
        }
    }

    /// Text to show the user: 4xx messages verbatim, anything else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            GatewayError::Rejected {
                message: Some(message),
                ..
            } => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Pulls `message` out of a structured error body such as
/// `{"message": "Username already taken"}`.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_keep_server_message() {
        let err = GatewayError::from_status(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Username already taken"}"#,
        );
        assert!(matches!(err, GatewayError::Rejected { .. }));
        assert_eq!(err.user_message("fallback"), "Username already taken");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn unstructured_bodies_use_fallback() {
        let err = GatewayError::from_status(StatusCode::CONFLICT, "plain text");
        assert_eq!(err.user_message("Try again"), "Try again");

        let err = GatewayError::from_status(StatusCode::BAD_REQUEST, r#"{"message": "  "}"#);
        assert_eq!(err.user_message("Try again"), "Try again");
    }

    #[test]
    fn server_errors_are_generic() {
        let err = GatewayError::from_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"message": "NullPointerException at line 12"}"#,
        );
        assert!(matches!(err, GatewayError::Server { .. }));
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");
    }

    #[test]
    fn incomplete_login_names_fields() {
        let err = GatewayError::IncompleteLogin {
            missing: vec!["id", "role"],
        };
        assert_eq!(err.to_string(), "login response is missing id, role");
        assert_eq!(err.status(), None);
    }
}
