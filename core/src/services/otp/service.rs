//! Main OTP orchestration service

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing;

use crate::domain::entities::otp_record::CODE_TTL;
use crate::errors::{AuthError, DomainError, DomainResult};

use super::generator::generate_code;
use super::phone::{mask_phone, normalize_phone};
use super::traits::{OtpStore, SmsGateway};
use super::types::{SendOtpResult, VerifyOutcome};

/// OTP service tying phone canonicalization, code generation, storage and
/// SMS delivery together.
///
/// Both collaborators are injected behind traits so the store can later be
/// backed by a distributed cache and the gateway swapped per environment.
/// `?Sized` bounds allow wiring trait objects (`Arc<dyn SmsGateway>`).
pub struct OtpService<S: SmsGateway + ?Sized, C: OtpStore + ?Sized> {
    /// SMS gateway for delivering codes
    sms_gateway: Arc<S>,
    /// Store holding issued codes
    store: Arc<C>,
}

impl<S: SmsGateway + ?Sized, C: OtpStore + ?Sized> OtpService<S, C> {
    /// Create a new OTP service.
    pub fn new(sms_gateway: Arc<S>, store: Arc<C>) -> Self {
        Self { sms_gateway, store }
    }

    /// Issue a fresh one-time code for `raw_phone` and deliver it via SMS.
    ///
    /// The flow is: normalize, generate, store, send. Storing happens
    /// strictly before the gateway call so no lock or store operation ever
    /// waits on network I/O. Issuing a new code unconditionally replaces
    /// any previous one for the same phone.
    ///
    /// If delivery fails the stored code is deliberately left in place:
    /// the caller may retry with a fresh `send_otp`, and a code that did
    /// reach the user through another channel stays verifiable.
    ///
    /// # Errors
    ///
    /// * [`AuthError::InvalidPhoneFormat`] - the input did not normalize
    /// * [`AuthError::SmsSendFailure`] - the gateway rejected the delivery
    /// * [`DomainError::Internal`] - the store failed (non-memory backends)
    pub async fn send_otp(&self, raw_phone: &str) -> DomainResult<SendOtpResult> {
        let phone = normalize_phone(raw_phone)?;
        let code = generate_code();
        let now = Instant::now();

        self.store
            .put(&phone, &code, now)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to store OTP: {}", e),
            })?;

        tracing::info!(
            phone = %mask_phone(&phone),
            event = "otp_generated",
            "Generated and stored new OTP"
        );

        let message_id = self
            .sms_gateway
            .send_otp(&phone, &code)
            .await
            .map_err(|e| {
                tracing::error!(
                    phone = %mask_phone(&phone),
                    error = %e,
                    event = "otp_send_failed",
                    "SMS gateway failed to deliver OTP"
                );
                AuthError::SmsSendFailure
            })?;

        tracing::info!(
            phone = %mask_phone(&phone),
            message_id = %message_id,
            event = "otp_sent",
            "OTP delivered to SMS gateway"
        );

        Ok(SendOtpResult {
            phone,
            message_id,
            expires_at: Utc::now() + chrono::Duration::seconds(CODE_TTL.as_secs() as i64),
        })
    }

    /// Check a candidate code for `raw_phone`.
    ///
    /// Store-level outcomes (`NotFound`, `Expired`, `AttemptsExhausted`,
    /// `Mismatch`) are ordinary values, not errors; only a malformed phone
    /// or a store fault produces an `Err`.
    pub async fn verify_otp(
        &self,
        raw_phone: &str,
        candidate: &str,
    ) -> DomainResult<VerifyOutcome> {
        let phone = normalize_phone(raw_phone)?;

        let outcome = self
            .store
            .verify(&phone, candidate, Instant::now())
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to verify OTP: {}", e),
            })?;

        match &outcome {
            VerifyOutcome::Success => {
                tracing::info!(
                    phone = %mask_phone(&phone),
                    event = "otp_verified",
                    "OTP successfully verified"
                );
            }
            VerifyOutcome::Mismatch { attempts_remaining } => {
                tracing::warn!(
                    phone = %mask_phone(&phone),
                    attempts_remaining = *attempts_remaining,
                    event = "otp_mismatch",
                    "OTP verification failed"
                );
            }
            VerifyOutcome::Expired => {
                tracing::warn!(
                    phone = %mask_phone(&phone),
                    event = "otp_expired",
                    "OTP expired before verification"
                );
            }
            VerifyOutcome::AttemptsExhausted | VerifyOutcome::NotFound => {
                tracing::warn!(
                    phone = %mask_phone(&phone),
                    event = "otp_unavailable",
                    "No verifiable OTP for phone"
                );
            }
        }

        Ok(outcome)
    }
}
