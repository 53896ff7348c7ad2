//! Types for OTP service results and boundary responses

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Result of issuing and delivering a one-time code
#[derive(Debug, Clone)]
pub struct SendOtpResult {
    /// Canonical phone number the code was issued for
    pub phone: String,
    /// The SMS message/session id from the provider
    pub message_id: String,
    /// Wall-clock time at which the code stops being valid
    pub expires_at: DateTime<Utc>,
}

/// Outcome of checking a candidate code against the store
///
/// These are ordinary result values, not errors: a wrong or stale code is
/// routine traffic, mapped into a `{success: false, message}` response at
/// the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Candidate matched while valid; the record has been consumed
    Success,
    /// No record exists for the phone (never issued, already consumed, or
    /// swept after expiry/exhaustion)
    NotFound,
    /// A record existed but its TTL had elapsed; it has been removed
    Expired,
    /// A record existed with no attempts left; it has been removed
    AttemptsExhausted,
    /// Candidate did not match; one attempt was consumed. When
    /// `attempts_remaining` reaches 0 the record is removed and the next
    /// call reports `NotFound`/`AttemptsExhausted`.
    Mismatch { attempts_remaining: u32 },
}

impl VerifyOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyOutcome::Success)
    }
}

/// Boundary response shape for both send and verify requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpResponse {
    pub success: bool,
    pub message: String,
    pub phone: String,
}

impl OtpResponse {
    /// Response for a successfully delivered code.
    pub fn from_send(result: &SendOtpResult) -> Self {
        Self {
            success: true,
            message: "OTP sent successfully".to_string(),
            phone: result.phone.clone(),
        }
    }

    /// Response for a verification outcome.
    pub fn from_outcome(phone: &str, outcome: &VerifyOutcome) -> Self {
        let (success, message) = match outcome {
            VerifyOutcome::Success => (true, "OTP verified successfully".to_string()),
            VerifyOutcome::NotFound => {
                (false, "No OTP found for this phone number".to_string())
            }
            VerifyOutcome::Expired => (false, "OTP has expired".to_string()),
            VerifyOutcome::AttemptsExhausted => {
                (false, "Maximum OTP attempts exceeded".to_string())
            }
            VerifyOutcome::Mismatch { attempts_remaining } => (
                false,
                format!("Invalid OTP. Attempts remaining: {}", attempts_remaining),
            ),
        };

        Self {
            success,
            message,
            phone: phone.to_string(),
        }
    }

    /// Response for a rejected request (invalid phone, delivery failure,
    /// internal fault).
    pub fn from_error(phone: &str, error: &DomainError) -> Self {
        Self {
            success: false,
            message: error.to_string(),
            phone: phone.to_string(),
        }
    }
}
