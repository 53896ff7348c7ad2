//! Traits for SMS gateway and OTP store integration

use std::time::Instant;

use async_trait::async_trait;

use super::types::VerifyOutcome;

/// Trait for SMS gateway integration
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Deliver a one-time code to a canonical phone number, returning the
    /// provider's message/session identifier.
    async fn send_otp(&self, phone: &str, code: &str) -> Result<String, String>;
}

/// Trait for the short-lived code store
///
/// The store holds at most one record per canonical phone number, with a
/// fixed TTL and attempt budget. The in-memory implementation never fails;
/// the `Result` exists so a distributed cache can satisfy the same
/// contract and surface transport errors.
#[async_trait]
pub trait OtpStore: Send + Sync {
    /// Unconditionally create or replace the record for `phone`.
    ///
    /// Any previously issued code for the same phone becomes unusable the
    /// moment this returns.
    async fn put(&self, phone: &str, code: &str, now: Instant) -> Result<(), String>;

    /// Check `candidate` against the stored record as of `now`.
    ///
    /// Expiry is checked before the attempt budget, so an expired record
    /// always reports [`VerifyOutcome::Expired`] regardless of attempts
    /// spent. Terminal outcomes (success, expiry, exhaustion) remove the
    /// record as a side effect.
    async fn verify(&self, phone: &str, candidate: &str, now: Instant)
        -> Result<VerifyOutcome, String>;
}
