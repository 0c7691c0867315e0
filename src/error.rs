use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config error: no categories configured")]
    NoCategories,
}

/// Rejections raised before a search request ever reaches the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a tank type first")]
    NoCategory,

    #[error("Please enter at least one search parameter")]
    NoSearchField,
}

/// Failure of a suggestion lookup or a full search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl FetchError {
    /// Text shown in the result area when a search fails.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Transport(msg) | FetchError::Decode(msg) => msg.clone(),
            FetchError::Rejected { message, .. } => message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_match_notifications() {
        assert_eq!(
            ValidationError::NoCategory.to_string(),
            "Please select a tank type first"
        );
        assert_eq!(
            ValidationError::NoSearchField.to_string(),
            "Please enter at least one search parameter"
        );
    }

    #[test]
    fn test_rejected_user_message_is_server_text() {
        let err = FetchError::Rejected {
            status: 400,
            message: "Invalid capacity value".to_string(),
        };
        assert_eq!(err.user_message(), "Invalid capacity value");
        assert_eq!(
            err.to_string(),
            "Request rejected (400): Invalid capacity value"
        );
    }
}
