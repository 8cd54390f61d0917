//! API Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx answer without a readable JSON body
    #[error("server answered {0}")]
    Status(u16),
    #[error("could not decode response: {0}")]
    Decode(String),
    #[error("could not encode request: {0}")]
    Encode(String),
    /// `{success: false}` from the backend
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Server-provided message, if the backend sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected(message) if !message.is_empty() => Some(message),
            _ => None,
        }
    }

    /// Alert text for a failed `action` ("saving idea", "loading document")
    pub fn alert_text(&self, action: &str) -> String {
        match self {
            ApiError::Rejected(message) if message.is_empty() => format!("Error {action}: Unknown error"),
            ApiError::Rejected(message) => format!("Error {action}: {message}"),
            _ => format!("Error {action}. Please try again."),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alert_text_prefers_server_message() {
        assert_eq!(ApiError::Rejected("disk full".into()).alert_text("saving idea"), "Error saving idea: disk full");
        assert_eq!(ApiError::Rejected(String::new()).alert_text("loading document"), "Error loading document: Unknown error");
        assert_eq!(ApiError::Status(500).alert_text("saving task"), "Error saving task. Please try again.");
    }
}
