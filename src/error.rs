//! Error types for collective onboarding.

use crate::validation::ValidationErrors;

/// Top-level error type for the onboarding core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
}

impl Error {
    /// Single human-readable message suitable for an inline error panel.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Failures of the remote mutation/query service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{operation} request failed: {reason}")]
    RequestFailed { operation: String, reason: String },

    #[error("{operation} returned errors: {}", .messages.join("; "))]
    Graphql {
        operation: String,
        messages: Vec<String>,
    },

    #[error("Invalid response for {operation}: {reason}")]
    InvalidResponse { operation: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    /// Normalize the failure to the message shown to the user.
    ///
    /// GraphQL failures surface their first server message; transport
    /// failures surface the underlying reason.
    pub fn user_message(&self) -> String {
        match self {
            Self::Graphql { messages, .. } => messages
                .iter()
                .find(|m| !m.trim().is_empty())
                .cloned()
                .unwrap_or_else(|| "Unknown error".to_string()),
            Self::RequestFailed { reason, .. } | Self::InvalidResponse { reason, .. } => {
                reason.clone()
            }
            Self::Json(e) => e.to_string(),
        }
    }
}

/// Local wizard and form errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Validation failed on {} field(s)", .0.len())]
    Validation(ValidationErrors),

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Invalid wizard step: {0}")]
    InvalidStep(usize),

    #[error("{entity_type} accounts do not take administrators")]
    AdminsNotSupported { entity_type: String },

    #[error("Administrators can only be submitted from the administrators step")]
    NotOnAdministratorsStep,
}

/// Route transitions that the navigation capability refused.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Failed to navigate to {route}: {reason}")]
    RouteFailed { route: String, reason: String },
}

/// Result type alias for the onboarding core.
pub type Result<T> = std::result::Result<T, Error>;
