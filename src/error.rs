use thiserror::Error;

pub type Result<T> = std::result::Result<T, PaymentError>;

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("Validation failed: {reason}")]
    ValidationFailed { reason: String },
    #[error("Unsupported payment type: {0}")]
    UnsupportedPaymentType(String),
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
    #[error("Email required for subscriptions")]
    MissingEmail,
    #[error("Missing contact channel: {0}")]
    MissingContactChannel(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Missing dependencies: {}", .0.join(", "))]
    MissingDependencies(Vec<&'static str>),
    #[error("Listener error: {0}")]
    Listener(String),
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl PaymentError {
    pub fn validation(reason: impl Into<String>) -> Self {
        PaymentError::ValidationFailed {
            reason: reason.into(),
        }
    }
}
