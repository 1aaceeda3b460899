//! Error types for fetching server status.

use thiserror::Error;

/// Errors that can occur while fetching one server's status.
///
/// The `Display` text is what the error view shows, so it reads as a
/// sentence rather than a debug dump.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network failure before any HTTP status was received.
    #[error("Failed to fetch server status: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Failed to fetch server status: {status}{}", reason_suffix(.reason))]
    Status { status: u16, reason: String },

    /// The filter matched no records.
    #[error("No server found with name: {server_name}")]
    NotFound { server_name: String },

    /// The body did not have the expected shape.
    #[error("Malformed server response: {0}")]
    Malformed(String),
}

impl FetchError {
    /// HTTP status code, when the server produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            FetchError::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

fn reason_suffix(reason: &str) -> String {
    if reason.is_empty() {
        String::new()
    } else {
        format!(" {}", reason)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_carries_code_and_reason() {
        let err = FetchError::Status {
            status: 401,
            reason: "Unauthorized".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to fetch server status: 401 Unauthorized"
        );
        assert_eq!(err.status(), Some(401));
    }

    #[test]
    fn test_status_message_without_reason() {
        let err = FetchError::Status {
            status: 599,
            reason: String::new(),
        };
        assert_eq!(err.to_string(), "Failed to fetch server status: 599");
    }

    #[test]
    fn test_not_found_names_server() {
        let err = FetchError::NotFound {
            server_name: "nas".to_string(),
        };
        assert_eq!(err.to_string(), "No server found with name: nas");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_json_error_is_malformed() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err = FetchError::from(json_err);
        assert!(matches!(err, FetchError::Malformed(_)));
        assert!(err.to_string().starts_with("Malformed server response:"));
    }
}
