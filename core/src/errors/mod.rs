//! Domain-specific error types and error handling.

use thiserror::Error;

/// Authentication-related errors
///
/// These errors represent request-rejecting failure scenarios. Routine
/// verification outcomes (wrong code, expired code, exhausted attempts)
/// are not errors; they are reported as [`VerifyOutcome`] values.
///
/// [`VerifyOutcome`]: crate::services::otp::VerifyOutcome
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("SMS service failure")]
    SmsSendFailure,
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Stable error code for programmatic handling at the boundary.
    pub fn error_code(&self) -> &'static str {
        match self {
            DomainError::Internal { .. } => "INTERNAL_ERROR",
            DomainError::Auth(AuthError::InvalidPhoneFormat { .. }) => "INVALID_PHONE_FORMAT",
            DomainError::Auth(AuthError::SmsSendFailure) => "SMS_SEND_FAILURE",
        }
    }
}
