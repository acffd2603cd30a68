//! Error types for alertr
//!
//! Centralized error handling using thiserror.

use thiserror::Error;

/// All error types that can occur in alertr
#[derive(Debug, Error)]
pub enum AlertrError {
    /// Carrier name not in the gateway table
    #[error("Unknown carrier: {0}")]
    UnknownCarrier(String),

    /// Receiver is not usable for the selected delivery mode
    #[error("Invalid recipient: {0}")]
    InvalidRecipient(String),

    /// SMS delivery selected without a carrier
    #[error("SMS delivery requires a carrier")]
    CarrierRequired,

    /// No command given to run
    #[error("No command to run")]
    MissingCommand,

    /// OS credential store error
    #[error("Credential store error: {0}")]
    Keyring(#[from] keyring::Error),

    /// Mail address parse error
    #[error("Address error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// Mail message build error
    #[error("Mail error: {0}")]
    Mail(#[from] lettre::error::Error),

    /// SMTP submission error
    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for alertr operations
pub type Result<T> = std::result::Result<T, AlertrError>;
