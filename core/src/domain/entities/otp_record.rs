//! One-time code entity for SMS-based phone authentication.

use std::time::{Duration, Instant};

use constant_time_eq::constant_time_eq;

/// Maximum number of verification attempts allowed per issued code
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the one-time code
pub const CODE_LENGTH: usize = 6;

/// Fixed lifetime of an issued code (5 minutes)
pub const CODE_TTL: Duration = Duration::from_secs(5 * 60);

/// A single issued one-time code, keyed by canonical phone number.
///
/// The store owns exactly one record per phone; issuing a new code replaces
/// any prior record wholesale. Timestamps are monotonic (`Instant`) so
/// expiry arithmetic is immune to wall-clock adjustments, which also means
/// the record is never serialized; it lives and dies inside the store.
#[derive(Debug, Clone)]
pub struct OtpRecord {
    /// Canonical phone number this code was issued for (`+91` + 10 digits)
    pub phone: String,

    /// The 6-digit one-time code
    pub code: String,

    /// When the code was generated
    pub created_at: Instant,

    /// When the code stops being valid (`created_at + CODE_TTL`)
    pub expires_at: Instant,

    /// Verification attempts left; decremented only on a failed check
    pub attempts_remaining: u32,
}

impl OtpRecord {
    /// Creates a fresh record with the full attempt budget and fixed TTL.
    pub fn new(phone: impl Into<String>, code: impl Into<String>, now: Instant) -> Self {
        Self {
            phone: phone.into(),
            code: code.into(),
            created_at: now,
            expires_at: now + CODE_TTL,
            attempts_remaining: MAX_ATTEMPTS,
        }
    }

    /// Whether the code has expired as of `now`.
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Constant-time comparison of a candidate against the stored code.
    ///
    /// Equal length is checked first; the byte comparison itself takes the
    /// same time regardless of where the codes differ.
    pub fn matches(&self, candidate: &str) -> bool {
        self.code.len() == candidate.len()
            && constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Time left until expiry, or zero if already expired.
    pub fn time_until_expiry(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}
