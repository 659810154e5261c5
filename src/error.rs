//! Error types for chat-audit

use thiserror::Error;

/// Errors that can occur in the observation pipeline
#[derive(Debug, Error)]
pub enum AuditError {
    /// Configuration load/save failure
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization failure
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Audit log write failure
    #[error("Failed to write audit log: {0}")]
    LogWrite(String),
}

/// Result type alias for audit operations
pub type Result<T> = std::result::Result<T, AuditError>;
